// rowguard/src/commands/validate.rs
//
// USE CASE: Validate a dataset, print a summary, optionally persist the
// report. Exit code policy lives here: any error-severity violation -> 2.

use comfy_table::{Cell, Table, presets::UTF8_FULL};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use tracing::debug;

use rowguard_core::domain::violation::Severity;
use rowguard_core::infrastructure::config::{load_schema, resolve_profile};
use rowguard_core::infrastructure::dataset::load_dataset;
use rowguard_core::{Rowguard, ValidationReport};

pub fn execute(
    data: PathBuf,
    schema: PathBuf,
    profile: String,
    sample_limit: Option<usize>,
    out: Option<PathBuf>,
) -> Result<()> {
    println!("⚙️  Loading configuration...");
    let schema = load_schema(&schema).into_diagnostic()?;
    let profile = resolve_profile(&profile).into_diagnostic()?;
    let dataset = load_dataset(&data)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load dataset from {}", data.display()))?;
    debug!(rows = dataset.len(), profile = %profile.name, "inputs loaded");

    println!(
        "🔍 Validating {} row(s) against profile '{}'...",
        dataset.len(),
        profile.name
    );
    let engine = Rowguard::new(schema, profile).into_diagnostic()?;
    let report = engine.validate(&dataset, sample_limit);

    print_summary(&report);

    if let Some(out) = out {
        write_report(&report, &out)?;
        println!("📄 Report saved to {}", out.display());
    }

    if report.count_for(Severity::Error) > 0 {
        eprintln!(
            "\n❌ {} error-severity violation(s) found.",
            report.count_for(Severity::Error)
        );
        std::process::exit(2);
    }
    if report.total_violations > 0 {
        println!("\n⚠️  {} violation(s), none at error severity.", report.total_violations);
    } else {
        println!("\n✅ No violations detected.");
    }
    Ok(())
}

fn print_summary(report: &ValidationReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Severity", "Count"]);
    for severity in [Severity::Error, Severity::Warn, Severity::Info] {
        table.add_row(vec![
            Cell::new(severity.to_string()),
            Cell::new(report.count_for(severity).to_string()),
        ]);
    }
    println!("{table}");

    if !report.top_violated_columns.is_empty() {
        println!("📊 Top violated columns:");
        for (column, count) in &report.top_violated_columns {
            println!("   {} ({})", column, count);
        }
    }
}

fn write_report(report: &ValidationReport, out: &PathBuf) -> Result<()> {
    let rendered = match out.extension().and_then(|e| e.to_str()) {
        Some("md") => report.to_markdown(),
        _ => report.to_json().into_diagnostic()?,
    };
    std::fs::write(out, rendered)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write report to {}", out.display()))?;
    Ok(())
}
