//! Output formatting functionality
//!
//! Renders module metrics as an aligned text table, CSV or JSON.

use crate::error::{MetricsError, Result, ResultExt};
use crate::models::metrics::{ModuleMetrics, PackageMetrics};
use ansi_term::Colour::{Green, Red, Yellow};
use ansi_term::Style;
use serde::Serialize;

/// Column headers shared by the text and CSV reports
pub const COLUMNS: [&str; 8] = ["PACKAGE", "Ca", "Ce", "I", "Na", "Nc", "A", "D"];

/// Distance below which a package counts as close to the main sequence
const GOOD_DISTANCE: f64 = 0.3;
/// Distance above which a package is flagged
const BAD_DISTANCE: f64 = 0.7;

/// Packages in display-name order
pub fn sorted_packages(metrics: &ModuleMetrics) -> Vec<&PackageMetrics> {
    let mut packages: Vec<&PackageMetrics> = metrics.packages.values().collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));
    packages
}

fn row(package: &PackageMetrics) -> [String; 8] {
    [
        package.name.clone(),
        package.ca.to_string(),
        package.ce.to_string(),
        format!("{:.2}", package.instability),
        package.na.to_string(),
        package.nc.to_string(),
        format!("{:.2}", package.abstractness),
        format!("{:.2}", package.distance),
    ]
}

fn paint_distance(cell: &str, distance: f64) -> String {
    let colour = if distance < GOOD_DISTANCE {
        Green
    } else if distance < BAD_DISTANCE {
        Yellow
    } else {
        Red
    };
    colour.paint(cell).to_string()
}

/// Format metrics as an aligned table
pub fn format_metrics_text(metrics: &ModuleMetrics, use_colors: bool, verbose: bool) -> String {
    let packages = sorted_packages(metrics);
    let rows: Vec<[String; 8]> = packages.iter().map(|p| row(p)).collect();

    let mut widths = COLUMNS.map(str::len);
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    let title = format!("MODULE: {}", metrics.module_path.display());
    if use_colors {
        output.push_str(&format!("{}\n\n", Style::new().bold().paint(title)));
    } else {
        output.push_str(&format!("{}\n\n", title));
    }

    let header: Vec<String> = COLUMNS
        .iter()
        .zip(widths.iter())
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect();
    output.push_str(header.join("  ").trim_end());
    output.push('\n');

    let rule: Vec<String> = COLUMNS
        .iter()
        .zip(widths.iter())
        .map(|(name, width)| format!("{:<width$}", "-".repeat(name.len()), width = width))
        .collect();
    output.push_str(rule.join("  ").trim_end());
    output.push('\n');

    for (package, cells) in packages.iter().zip(rows.iter()) {
        let last = cells.len() - 1;
        let line: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (cell, width))| {
                if i == last {
                    // Last column is not padded so colour codes never skew alignment
                    if use_colors {
                        paint_distance(cell, package.distance)
                    } else {
                        cell.clone()
                    }
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect();
        output.push_str(&line.join("  "));
        output.push('\n');
    }

    if verbose {
        output.push_str(&format!(
            "\nPackages: {}  Mean distance: {:.2}\nAnalyzed at: {}\n",
            metrics.len(),
            metrics.mean_distance(),
            metrics.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}

#[derive(Serialize)]
struct JsonPackage<'a> {
    name: &'a str,
    ca: usize,
    ce: usize,
    instability: f64,
    na: usize,
    nc: usize,
    abstractness: f64,
    distance: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    module: String,
    packages: Vec<JsonPackage<'a>>,
}

/// Format metrics as pretty-printed JSON
pub fn format_metrics_json(metrics: &ModuleMetrics) -> Result<String> {
    let report = JsonReport {
        module: metrics.module_path.display().to_string(),
        packages: sorted_packages(metrics)
            .into_iter()
            .map(|p| JsonPackage {
                name: &p.name,
                ca: p.ca,
                ce: p.ce,
                instability: p.instability,
                na: p.na,
                nc: p.nc,
                abstractness: p.abstractness,
                distance: p.distance,
            })
            .collect(),
    };

    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

/// Format metrics as CSV with two-decimal ratios
pub fn format_metrics_csv(metrics: &ModuleMetrics) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    let mut header = COLUMNS;
    header[0] = "Package";
    writer.write_record(header)?;

    for package in sorted_packages(metrics) {
        writer.write_record(row(package))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MetricsError::io_error(e.into_error()))?;
    String::from_utf8(bytes).with_context(|| "CSV output is not valid UTF-8")
}
