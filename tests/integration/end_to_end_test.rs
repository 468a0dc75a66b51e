//! End-to-end tests over throwaway Go modules

use std::path::Path;

use aid_metrics::{
    analyze_module,
    core::{ModuleAnalyzer, NoopProgress},
    models::config::Settings,
    MetricsError,
};

use super::fixtures::{create_function_module, create_test_module, write, RecordingSink};

fn settings_for(root: &Path) -> Settings {
    Settings {
        module_path: root.to_path_buf(),
        ..Default::default()
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_analyze_test_module() {
    let module = create_test_module();
    let metrics = analyze_module(&settings_for(module.path()), &NoopProgress).unwrap();

    assert_eq!(metrics.module_name, "github.com/alkbt/testmodule");
    assert_eq!(
        metrics.packages.keys().cloned().collect::<Vec<_>>(),
        vec!["pkg1", "pkg1/pkg2", "pkg3"]
    );

    let pkg1 = metrics.get("pkg1").unwrap();
    assert_eq!((pkg1.ca, pkg1.ce, pkg1.na, pkg1.nc), (2, 0, 1, 2));
    assert_close(pkg1.instability, 0.0);
    assert_close(pkg1.abstractness, 0.5);
    assert_close(pkg1.distance, 0.5);

    let pkg2 = metrics.get("pkg1/pkg2").unwrap();
    assert_eq!(pkg2.id, "github.com/alkbt/testmodule/pkg1/pkg2");
    assert_eq!((pkg2.ca, pkg2.ce, pkg2.na, pkg2.nc), (1, 1, 1, 2));
    assert_close(pkg2.instability, 0.5);
    assert_close(pkg2.distance, 0.0);

    let pkg3 = metrics.get("pkg3").unwrap();
    assert_eq!((pkg3.ca, pkg3.ce, pkg3.na, pkg3.nc), (0, 2, 0, 2));
    assert_close(pkg3.instability, 1.0);
    assert_close(pkg3.abstractness, 0.0);
    assert_close(pkg3.distance, 0.0);
}

#[test]
fn test_declaration_counting() {
    let module = create_function_module();
    let metrics = analyze_module(&settings_for(module.path()), &NoopProgress).unwrap();

    // Methods and aliases are not counted
    let pkg = metrics.get("pkg").unwrap();
    assert_eq!((pkg.na, pkg.nc), (2, 8));
    assert_close(pkg.abstractness, 0.25);

    let main = metrics.get("cmd").unwrap();
    assert_eq!((main.na, main.nc), (2, 7));
    assert_eq!((main.ca, main.ce), (0, 0));
    // Isolated packages count as stable
    assert_close(main.instability, 0.0);
}

#[test]
fn test_pattern_limits_packages() {
    let module = create_test_module();
    let settings = Settings {
        pattern: "./pkg1/...".to_string(),
        ..settings_for(module.path())
    };

    let metrics = analyze_module(&settings, &NoopProgress).unwrap();

    assert_eq!(
        metrics.packages.keys().cloned().collect::<Vec<_>>(),
        vec!["pkg1", "pkg1/pkg2"]
    );
    assert_eq!(metrics.get("pkg1").unwrap().ca, 1);
}

#[test]
fn test_standard_library_imports_are_ignored() {
    let module = create_test_module();
    write(
        module.path(),
        "tools/tools.go",
        "package tools\n\nimport (\n\t\"fmt\"\n\t\"net/http\"\n\t\"golang.org/x/sync/errgroup\"\n)\n\nfunc Run() {}\n",
    );

    let metrics = analyze_module(&settings_for(module.path()), &NoopProgress).unwrap();
    let tools = metrics.get("tools").unwrap();
    assert_eq!((tools.ca, tools.ce), (0, 0));
}

#[test]
fn test_progress_reaches_completion() {
    let module = create_test_module();
    let sink = RecordingSink::default();

    analyze_module(&settings_for(module.path()), &sink).unwrap();

    let values = sink.values();
    assert_eq!(*sink.total.lock().unwrap(), Some(100));
    assert!(values.windows(2).all(|w| w[0] <= w[1]), "{:?}", values);
    assert_eq!(values.last(), Some(&100));
    assert_eq!(*sink.completed.lock().unwrap(), 1);

    let descriptions = sink.descriptions();
    assert!(descriptions.iter().any(|d| d == "Loaded 3 of 3 packages"));
    assert!(descriptions.iter().any(|d| d == "Analyzed 3 of 3 packages"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_files_for_other_platforms_are_not_counted() {
    let module = create_test_module();
    write(module.path(), "a/a_linux.go", "package a\n\nfunc helper() {}\n");
    write(module.path(), "a/a_windows.go", "package a\n\nfunc helper() {}\n");
    write(
        module.path(),
        "a/gen.go",
        "//go:build ignore\n\npackage main\n\nfunc main() {}\n",
    );

    let metrics = analyze_module(&settings_for(module.path()), &NoopProgress).unwrap();

    let a = metrics.get("a").unwrap();
    assert_eq!((a.na, a.nc), (0, 1));
}

#[test]
fn test_ignored_files_add_no_coupling() {
    let module = create_test_module();
    write(
        module.path(),
        "pkg3/gen.go",
        "//go:build ignore\n\npackage main\n\nimport _ \"github.com/alkbt/testmodule/pkg1/pkg2\"\n\nfunc main() {}\n",
    );
    write(
        module.path(),
        "tools/gen.go",
        "//go:build ignore\n\npackage main\n\nimport _ \"github.com/alkbt/testmodule/pkg1\"\n",
    );

    let metrics = analyze_module(&settings_for(module.path()), &NoopProgress).unwrap();

    assert_eq!(metrics.len(), 3);
    assert!(metrics.get("tools").is_none());
    assert_eq!(metrics.get("pkg3").unwrap().ce, 2);
    assert_eq!(metrics.get("pkg1").unwrap().ca, 2);
}

#[test]
fn test_missing_local_package_is_soft_error() {
    let module = create_test_module();
    write(
        module.path(),
        "pkg4/pkg4.go",
        "package pkg4\n\nimport \"github.com/alkbt/testmodule/gone\"\n\nvar _ = gone.X\n\nfunc F() {}\n",
    );
    let sink = RecordingSink::default();

    let metrics = analyze_module(&settings_for(module.path()), &sink).unwrap();

    let pkg4 = metrics.get("pkg4").unwrap();
    assert_eq!(pkg4.ce, 1);
    assert_eq!(pkg4.nc, 1);
    assert!(sink
        .descriptions()
        .iter()
        .any(|d| d == "Loaded 4 of 4 packages (1 with errors)"));
}

#[test]
fn test_parse_error_aborts_analysis() {
    let module = create_test_module();
    write(module.path(), "broken/broken.go", "package broken\n\nfunc (\n");
    let sink = RecordingSink::default();

    let result = analyze_module(&settings_for(module.path()), &sink);

    match result {
        Err(MetricsError::PackageAnalysis { package, .. }) => {
            assert_eq!(package, "github.com/alkbt/testmodule/broken");
        }
        other => panic!("expected package analysis error, got {:?}", other),
    }
    assert_eq!(*sink.completed.lock().unwrap(), 0);
}

#[test]
fn test_module_without_go_mod_yields_no_packages() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a/a.go", "package a\n\nfunc A() {}\n");

    let analyzer = ModuleAnalyzer::new(&settings_for(dir.path())).unwrap();
    assert_eq!(analyzer.module_name(), "");

    let metrics = analyzer.analyze(&NoopProgress).unwrap();
    assert!(metrics.is_empty());
}

#[test]
fn test_root_package_without_go_mod_is_not_reported() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "main.go",
        "package main\n\nimport \"lib\"\n\nfunc main() { lib.Run() }\n",
    );
    write(dir.path(), "lib/lib.go", "package lib\n\nfunc Run() {}\n");

    let metrics = analyze_module(&settings_for(dir.path()), &NoopProgress).unwrap();
    assert!(metrics.is_empty());
    assert!(metrics.get(".").is_none());
}

#[test]
fn test_missing_module_root() {
    let dir = tempfile::tempdir().unwrap();
    let result = analyze_module(&settings_for(&dir.path().join("missing")), &NoopProgress);
    assert!(matches!(result, Err(MetricsError::Discovery { .. })));
}

#[test]
fn test_results_do_not_depend_on_worker_count() {
    let module = create_test_module();

    let single = Settings {
        max_workers: 1,
        batch_size: 1,
        ..settings_for(module.path())
    };
    let many = Settings {
        max_workers: 8,
        ..settings_for(module.path())
    };

    let a = analyze_module(&single, &NoopProgress).unwrap();
    let b = analyze_module(&many, &NoopProgress).unwrap();
    assert_eq!(a.packages, b.packages);
}
