// rowguard/src/commands/fit.rs
//
// USE CASE: Fit imputation statistics offline, for later `repair --state`.

use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use rowguard_core::application::repair::RepairContext;
use rowguard_core::infrastructure::config::load_schema;
use rowguard_core::infrastructure::dataset::load_dataset;

pub fn execute(data: PathBuf, schema: PathBuf, out: PathBuf) -> Result<()> {
    println!("⚙️  Loading configuration...");
    let schema = load_schema(&schema).into_diagnostic()?;
    let dataset = load_dataset(&data)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to load dataset from {}", data.display()))?;

    println!("📊 Fitting statistics from {} row(s)...", dataset.len());
    let mut context = RepairContext::new();
    context.update_stats(&dataset, &schema);
    debug!(columns = context.impute_stats.len(), "statistics fitted");

    let serialized = serde_json::to_string_pretty(&context).into_diagnostic()?;
    fs::write(&out, serialized)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write statistics to {}", out.display()))?;

    println!(
        "✨ Statistics for {} column(s) written to {}",
        context.impute_stats.len(),
        out.display()
    );
    Ok(())
}
