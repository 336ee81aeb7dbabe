// rowguard/src/commands/init_schema.rs
//
// USE CASE: Scaffold a starter schema for hand editing.

use miette::{IntoDiagnostic, Result, WrapErr, bail};
use std::path::PathBuf;

use rowguard_core::infrastructure::config::{save_schema, starter_schema};

pub fn execute(columns: Vec<String>, out: PathBuf) -> Result<()> {
    if columns.is_empty() {
        bail!("--columns requires at least one column name");
    }

    let schema = starter_schema(&columns);
    save_schema(&schema, &out)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write schema to {}", out.display()))?;

    println!(
        "📐 Starter schema with {} column(s) written to {}",
        columns.len(),
        out.display()
    );
    println!("   Edit it to add bounds, types and categories.");
    Ok(())
}
