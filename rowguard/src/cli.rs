// rowguard/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rowguard")]
#[command(about = "Batch validation and deterministic repair for tabular datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📐 Scaffolds a starter schema for the given columns
    InitSchema {
        /// Comma-separated column names (ex: "bytes,packets,duration")
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Output path (.json, .yaml or .yml)
        #[arg(long, default_value = "schema.yaml")]
        out: PathBuf,
    },

    /// 🔍 Validates a dataset against a schema and profile
    Validate {
        /// Dataset file (JSON or YAML array of row objects)
        #[arg(long)]
        data: PathBuf,

        /// Schema file
        #[arg(long)]
        schema: PathBuf,

        /// Builtin profile name or profile file path
        #[arg(long, short, default_value = "telemetry_safe")]
        profile: String,

        /// Validate only the first N rows
        #[arg(long)]
        sample_limit: Option<usize>,

        /// Write the full report (.json or .md)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// 🔧 Repairs a dataset and reports every change
    Repair {
        /// Dataset file (JSON or YAML array of row objects)
        #[arg(long)]
        data: PathBuf,

        /// Schema file
        #[arg(long)]
        schema: PathBuf,

        /// Builtin profile name or profile file path
        #[arg(long, short, default_value = "telemetry_safe")]
        profile: String,

        /// Write the repaired dataset here
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the repair report (.json or .md)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Previously fitted imputation statistics (from `rowguard fit`).
        /// Without it, statistics are fitted on the input itself.
        #[arg(long)]
        state: Option<PathBuf>,
    },

    /// 📊 Fits imputation statistics from a reference dataset
    Fit {
        /// Training dataset file
        #[arg(long)]
        data: PathBuf,

        /// Schema file
        #[arg(long)]
        schema: PathBuf,

        /// Output path for the statistics (JSON)
        #[arg(long, default_value = "stats.json")]
        out: PathBuf,
    },

    /// 📋 Lists the builtin profiles
    Profiles,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_validate_defaults() -> Result<()> {
        let args = Cli::parse_from([
            "rowguard",
            "validate",
            "--data",
            "rows.json",
            "--schema",
            "schema.yaml",
        ]);
        match args.command {
            Commands::Validate {
                profile,
                sample_limit,
                out,
                ..
            } => {
                assert_eq!(profile, "telemetry_safe");
                assert_eq!(sample_limit, None);
                assert_eq!(out, None);
                Ok(())
            }
            _ => bail!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_parse_init_schema_splits_columns() -> Result<()> {
        let args = Cli::parse_from(["rowguard", "init-schema", "--columns", "bytes,packets"]);
        match args.command {
            Commands::InitSchema { columns, out } => {
                assert_eq!(columns, vec!["bytes", "packets"]);
                assert_eq!(out.to_string_lossy(), "schema.yaml");
                Ok(())
            }
            _ => bail!("Expected InitSchema command"),
        }
    }

    #[test]
    fn test_cli_parse_repair_with_state() -> Result<()> {
        let args = Cli::parse_from([
            "rowguard",
            "repair",
            "--data",
            "rows.json",
            "--schema",
            "schema.yaml",
            "--state",
            "stats.json",
            "--profile",
            "telemetry_strict",
        ]);
        match args.command {
            Commands::Repair { profile, state, .. } => {
                assert_eq!(profile, "telemetry_strict");
                assert_eq!(state.unwrap().to_string_lossy(), "stats.json");
                Ok(())
            }
            _ => bail!("Expected Repair command"),
        }
    }

    #[test]
    fn test_cli_parse_fit() -> Result<()> {
        let args = Cli::parse_from([
            "rowguard",
            "fit",
            "--data",
            "train.json",
            "--schema",
            "schema.yaml",
        ]);
        match args.command {
            Commands::Fit { out, .. } => {
                assert_eq!(out.to_string_lossy(), "stats.json");
                Ok(())
            }
            _ => bail!("Expected Fit command"),
        }
    }
}
