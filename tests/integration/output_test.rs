//! Reports rendered from a real analysis

use std::fs;

use aid_metrics::{
    analyze_module,
    core::NoopProgress,
    models::{config::OutputFormat, config::Settings, metrics::ModuleMetrics},
    output::{create_formatter, create_writer},
};

use super::fixtures::create_test_module;

fn analyzed() -> (tempfile::TempDir, ModuleMetrics) {
    let module = create_test_module();
    let settings = Settings {
        module_path: module.path().to_path_buf(),
        ..Default::default()
    };
    let metrics = analyze_module(&settings, &NoopProgress).unwrap();
    (module, metrics)
}

#[test]
fn test_text_report() {
    let (module, metrics) = analyzed();
    let output = create_formatter(OutputFormat::Text, false, false)
        .format(&metrics)
        .unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], format!("MODULE: {}", module.path().display()));
    assert_eq!(lines[2], "PACKAGE    Ca  Ce  I     Na  Nc  A     D");
    assert_eq!(lines[4], "pkg1       2   0   0.00  1   2   0.50  0.50");
    assert_eq!(lines[5], "pkg1/pkg2  1   1   0.50  1   2   0.50  0.00");
    assert_eq!(lines[6], "pkg3       0   2   1.00  0   2   0.00  0.00");
}

#[test]
fn test_csv_report_written_to_file() {
    let (module, metrics) = analyzed();
    let path = module.path().join("metrics.csv");

    let report = create_formatter(OutputFormat::Csv, true, false)
        .format(&metrics)
        .unwrap();
    create_writer(Some(&path)).write(&report).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Package,Ca,Ce,I,Na,Nc,A,D\n\
         pkg1,2,0,0.00,1,2,0.50,0.50\n\
         pkg1/pkg2,1,1,0.50,1,2,0.50,0.00\n\
         pkg3,0,2,1.00,0,2,0.00,0.00\n"
    );
}

#[test]
fn test_json_report() {
    let (module, metrics) = analyzed();
    let report = create_formatter(OutputFormat::Json, false, false)
        .format(&metrics)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&report).unwrap();

    assert_eq!(value["module"], module.path().display().to_string());
    let names: Vec<&str> = value["packages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["pkg1", "pkg1/pkg2", "pkg3"]);
    assert_eq!(value["packages"][1]["instability"], 0.5);
}

#[test]
fn test_verbose_summary() {
    let (_module, metrics) = analyzed();
    let output = create_formatter(OutputFormat::Text, false, true)
        .format(&metrics)
        .unwrap();

    assert!(output.contains("Packages: 3  Mean distance: 0.17"));
    assert!(output.contains("Analyzed at: "));
}
