//! Package discovery over real directory trees

use aid_metrics::{core::Discoverer, MetricsError};

use super::fixtures::{create_test_module, write, TEST_MODULE};

fn import_paths(discoverer: &Discoverer) -> Vec<String> {
    discoverer
        .discover(|_| {})
        .unwrap()
        .into_iter()
        .map(|d| d.import_path)
        .collect()
}

#[test]
fn test_discovers_packages_in_path_order() {
    let module = create_test_module();
    let discoverer = Discoverer::new(module.path(), TEST_MODULE);

    assert_eq!(
        import_paths(&discoverer),
        vec![
            "github.com/alkbt/testmodule/pkg1",
            "github.com/alkbt/testmodule/pkg1/pkg2",
            "github.com/alkbt/testmodule/pkg3",
        ]
    );
}

#[test]
fn test_skips_tooling_and_test_only_directories() {
    let module = create_test_module();
    let root = module.path();
    write(root, "vendor/dep/dep.go", "package dep\n");
    write(root, "node_modules/x/x.go", "package x\n");
    write(root, ".hidden/h.go", "package h\n");
    write(root, "pkg1/testdata/fixture.go", "package fixture\n");
    write(root, "onlytests/a_test.go", "package onlytests\n");
    write(root, "docs/README.md", "# docs\n");

    let discoverer = Discoverer::new(root, TEST_MODULE);
    assert_eq!(import_paths(&discoverer).len(), 3);
}

#[test]
fn test_exclude_patterns() {
    let module = create_test_module();
    write(module.path(), "gen/mocks/m.go", "package mocks\n");

    let discoverer = Discoverer::new(module.path(), TEST_MODULE)
        .with_exclude_patterns(&["gen".to_string(), "pkg1/pkg2".to_string()])
        .unwrap();

    assert_eq!(
        import_paths(&discoverer),
        vec![
            "github.com/alkbt/testmodule/pkg1",
            "github.com/alkbt/testmodule/pkg3",
        ]
    );
}

#[test]
fn test_invalid_exclude_pattern() {
    let module = create_test_module();
    let result = Discoverer::new(module.path(), TEST_MODULE).with_exclude_patterns(&["[".to_string()]);
    assert!(result.is_err());
}

#[test]
fn test_root_pattern() {
    let module = create_test_module();
    write(module.path(), "main.go", "package main\n\nfunc main() {}\n");

    let discoverer = Discoverer::new(module.path(), TEST_MODULE).with_pattern(".");
    assert_eq!(import_paths(&discoverer), vec![TEST_MODULE.to_string()]);
}

#[test]
fn test_sub_path_pattern_is_segment_aware() {
    let module = create_test_module();
    write(module.path(), "pkg10/p.go", "package pkg10\n");

    let discoverer = Discoverer::new(module.path(), TEST_MODULE).with_pattern("./pkg1/...");
    assert_eq!(
        import_paths(&discoverer),
        vec![
            "github.com/alkbt/testmodule/pkg1",
            "github.com/alkbt/testmodule/pkg1/pkg2",
        ]
    );
}

#[test]
fn test_progress_callback_is_rate_limited() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..9 {
        write(dir.path(), &format!("p{}/p.go", i), "package p\n");
    }

    let mut calls = Vec::new();
    let found = Discoverer::new(dir.path(), "example.com/m")
        .discover(|n| calls.push(n))
        .unwrap();

    assert_eq!(found.len(), 9);
    assert_eq!(calls, vec![3, 6, 9]);
}

#[test]
fn test_missing_root_is_discovery_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Discoverer::new(dir.path().join("nope"), TEST_MODULE).discover(|_| {});
    assert!(matches!(result, Err(MetricsError::Discovery { .. })));
}

#[cfg(unix)]
#[test]
fn test_unreadable_entries_do_not_stop_discovery() {
    let module = create_test_module();
    std::os::unix::fs::symlink(
        module.path().join("does-not-exist"),
        module.path().join("dangling"),
    )
    .unwrap();

    let discoverer = Discoverer::new(module.path(), TEST_MODULE).follow_links(true);
    assert_eq!(
        import_paths(&discoverer),
        vec![
            "github.com/alkbt/testmodule/pkg1",
            "github.com/alkbt/testmodule/pkg1/pkg2",
            "github.com/alkbt/testmodule/pkg3",
        ]
    );
}
