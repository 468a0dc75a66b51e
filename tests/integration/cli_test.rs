//! Command-line behaviour

use std::fs;
use std::path::PathBuf;

use aid_metrics::{
    cli::{args::OutputFormat as CliOutputFormat, init_config, Args, Command, InitOutcome},
    config::{load_config_with_env_prefix, CliArgs, DEFAULT_CONFIG_FILE},
    models::config::OutputFormat,
};
use clap::Parser;

use super::fixtures::create_test_module;

#[test]
fn test_cli_args_parsing() {
    let args = Args::parse_from(["aid-metrics"]);
    assert_eq!(args.path, None);
    assert_eq!(args.output, None);
    assert!(args.exclude.is_empty());
    assert!(!args.quiet);
    assert!(!args.verbose);

    let args = Args::parse_from([
        "aid-metrics",
        "/work/module",
        "--pattern",
        "./internal/...",
        "--output",
        "json",
        "--output-file",
        "metrics.json",
        "--exclude",
        "gen",
        "--quiet",
    ]);

    assert_eq!(args.path, Some(PathBuf::from("/work/module")));
    assert_eq!(args.pattern.as_deref(), Some("./internal/..."));
    assert_eq!(args.output, Some(CliOutputFormat::Json));
    assert_eq!(args.output_file, Some(PathBuf::from("metrics.json")));
    assert_eq!(args.exclude, vec!["gen".to_string()]);
    assert!(args.quiet);
}

#[test]
fn test_args_flow_into_settings() {
    let module = create_test_module();
    let config_path = module.path().join("aid.toml");
    fs::write(&config_path, "output_format = \"csv\"\nbatch_size = 4\n").unwrap();

    let args = Args::parse_from([
        "aid-metrics".to_string(),
        module.path().display().to_string(),
        "--config".to_string(),
        config_path.display().to_string(),
        "--workers".to_string(),
        "2".to_string(),
    ]);

    let settings =
        load_config_with_env_prefix(CliArgs::from(&args), "AID_METRICS_CLI_TEST_FLOW").unwrap();

    assert_eq!(settings.module_path, module.path());
    assert_eq!(settings.output_format, OutputFormat::Csv);
    assert_eq!(settings.batch_size, 4);
    assert_eq!(settings.max_workers, 2);
}

#[test]
fn test_analyze_command_writes_report() {
    let module = create_test_module();
    let output = module.path().join("report.json");
    let config_path = module.path().join("aid.toml");
    fs::write(&config_path, "").unwrap();

    let args = Args::parse_from([
        "aid-metrics".to_string(),
        module.path().display().to_string(),
        "--config".to_string(),
        config_path.display().to_string(),
        "-o".to_string(),
        "json".to_string(),
        "--output-file".to_string(),
        output.display().to_string(),
    ]);

    let command = Command::from_args(args);
    assert_eq!(command.run(), 0);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let packages = report["packages"].as_array().unwrap();
    assert_eq!(packages.len(), 3);
    assert_eq!(packages[0]["name"], "pkg1");
    assert_eq!(packages[0]["ca"], 2);
}

#[test]
fn test_missing_module_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = Args::parse_from([
        "aid-metrics".to_string(),
        dir.path().join("missing").display().to_string(),
    ]);

    assert_eq!(Command::from_args(args).run(), 1);
}

#[test]
fn test_init_creates_loadable_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);

    assert_eq!(init_config(&path).unwrap(), InitOutcome::Created(path.clone()));
    assert!(matches!(
        init_config(&path).unwrap(),
        InitOutcome::AlreadyExists(_)
    ));

    let settings = aid_metrics::config::parse_config_file(&path).unwrap();
    assert_eq!(settings.output_format, Some(OutputFormat::Text));
}
