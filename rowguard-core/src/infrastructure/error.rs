// rowguard-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(rowguard::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / SERIALIZATION ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(rowguard::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(rowguard::infra::json),
        help("Check your JSON syntax (quoting, trailing commas).")
    )]
    Json(#[from] serde_json::Error),

    #[error("Configuration not found: {0}")]
    #[diagnostic(code(rowguard::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Unsupported file format: '{0}'")]
    #[diagnostic(
        code(rowguard::infra::format),
        help("Supported extensions: .json, .yaml, .yml")
    )]
    UnsupportedFormat(String),
}
