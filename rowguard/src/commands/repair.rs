// rowguard/src/commands/repair.rs
//
// USE CASE: Repair a dataset. Statistics come from a saved state file when
// given, otherwise they are fitted on the input itself.

use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use rowguard_core::Rowguard;
use rowguard_core::application::repair::RepairContext;
use rowguard_core::infrastructure::config::{load_schema, resolve_profile};
use rowguard_core::infrastructure::dataset::{load_dataset, save_dataset};

pub fn execute(
    data: PathBuf,
    schema: PathBuf,
    profile: String,
    out: Option<PathBuf>,
    report: Option<PathBuf>,
    state: Option<PathBuf>,
) -> Result<()> {
    println!("⚙️  Loading configuration...");
    let schema = load_schema(&schema).into_diagnostic()?;
    let profile = resolve_profile(&profile).into_diagnostic()?;
    let dataset = load_dataset(&data)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load dataset from {}", data.display()))?;

    let mut engine = Rowguard::new(schema, profile).into_diagnostic()?;
    match state {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to read statistics from {}", path.display()))?;
            engine.context = serde_json::from_str::<RepairContext>(&raw)
                .into_diagnostic()
                .wrap_err_with(|| format!("Malformed statistics file {}", path.display()))?;
            println!("📊 Using fitted statistics from {}", path.display());
        }
        None => {
            engine.fit_stats(&dataset);
            println!("📊 Statistics fitted on the input dataset.");
        }
    }

    println!("🔧 Repairing {} row(s)...", dataset.len());
    let (repaired, repair_report) = engine.repair(&dataset, true);
    debug!(actions = repair_report.total_actions, "repair pass finished");

    println!(
        "   {} action(s); violations {} -> {}",
        repair_report.total_actions,
        repair_report.validation_before.total_violations,
        repair_report.validation_after.total_violations
    );

    if let Some(out) = out {
        save_dataset(&repaired, &out).into_diagnostic()?;
        println!("💾 Repaired dataset written to {}", out.display());
    }

    if let Some(report_path) = report {
        let rendered = match report_path.extension().and_then(|e| e.to_str()) {
            Some("md") => repair_report.to_markdown(),
            _ => repair_report.to_json().into_diagnostic()?,
        };
        fs::write(&report_path, rendered)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write report to {}", report_path.display()))?;
        println!("📄 Repair report saved to {}", report_path.display());
    }

    println!("✨ Repair finished.");
    Ok(())
}
