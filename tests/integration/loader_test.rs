//! Filesystem package loading through the batch loader

use std::sync::Arc;

use aid_metrics::{
    core::{BatchLoader, Discoverer, PackageLoader, ProgressTracker},
    parsers::{FsPackageLoader, GoSourceParser},
    MetricsError,
};

use super::fixtures::{create_test_module, write, RecordingSink, TEST_MODULE};

fn loader_for(root: &std::path::Path) -> FsPackageLoader {
    FsPackageLoader::new(root, TEST_MODULE, Arc::new(GoSourceParser::new()))
}

#[test]
fn test_load_resolves_imports() {
    let module = create_test_module();
    let loader = loader_for(module.path());

    let packages = loader
        .load(&["github.com/alkbt/testmodule/pkg3".to_string()])
        .unwrap();

    assert_eq!(packages.len(), 1);
    let pkg3 = &packages[0];
    assert_eq!(pkg3.id, "github.com/alkbt/testmodule/pkg3");
    assert_eq!(pkg3.name, "pkg3");
    assert_eq!(
        pkg3.imports,
        vec![
            "github.com/alkbt/testmodule/pkg1",
            "github.com/alkbt/testmodule/pkg1/pkg2",
        ]
    );
    assert_eq!(pkg3.source_files.len(), 1);
    assert!(!pkg3.has_diagnostics());
}

#[test]
fn test_load_rejects_foreign_import_path() {
    let module = create_test_module();
    let loader = loader_for(module.path());

    let result = loader.load(&["github.com/other/module/pkg".to_string()]);
    assert!(matches!(result, Err(MetricsError::PackageResolution { .. })));
}

#[test]
fn test_batches_report_loading_progress() {
    let module = create_test_module();
    let loader = loader_for(module.path());
    let descriptors = Discoverer::new(module.path(), TEST_MODULE)
        .discover(|_| {})
        .unwrap();

    let sink = RecordingSink::default();
    let mut progress = ProgressTracker::new(&sink);
    progress.start();

    let packages = BatchLoader::new(&loader, 2)
        .load_all(&descriptors, &mut progress)
        .unwrap();

    assert_eq!(packages.len(), 3);
    assert_eq!(
        sink.descriptions(),
        vec![
            "Loading 2 of 3 packages",
            "Loaded 2 of 3 packages",
            "Loading 3 of 3 packages",
            "Loaded 3 of 3 packages",
        ]
    );
    assert_eq!(sink.values().first(), Some(&10));
    assert_eq!(sink.values().last(), Some(&80));
}

#[test]
fn test_batch_failure_names_first_package() {
    let module = create_test_module();
    let loader = loader_for(module.path());
    let mut descriptors = Discoverer::new(module.path(), TEST_MODULE)
        .discover(|_| {})
        .unwrap();
    // Directory removed between discovery and loading
    std::fs::remove_dir_all(module.path().join("pkg3")).unwrap();
    descriptors.sort_by(|a, b| b.import_path.cmp(&a.import_path));

    let sink = RecordingSink::default();
    let mut progress = ProgressTracker::new(&sink);
    progress.start();

    let result = BatchLoader::new(&loader, 10).load_all(&descriptors, &mut progress);

    match result {
        Err(MetricsError::BatchLoad { first_path, .. }) => {
            assert_eq!(first_path, "github.com/alkbt/testmodule/pkg3");
        }
        other => panic!("expected batch load error, got {:?}", other),
    }
}

#[test]
fn test_parse_failure_is_recorded_as_diagnostic() {
    let module = create_test_module();
    write(module.path(), "pkg1/broken.go", "package pkg1\n\nfunc (\n");
    let loader = loader_for(module.path());

    let packages = loader
        .load(&["github.com/alkbt/testmodule/pkg1".to_string()])
        .unwrap();

    let pkg1 = &packages[0];
    assert!(pkg1.has_diagnostics());
    assert_eq!(pkg1.diagnostics[0].file, Some(module.path().join("pkg1/broken.go")));
    assert_eq!(pkg1.source_files.len(), 2);
    assert_eq!(pkg1.imports, vec!["fmt"]);
}
