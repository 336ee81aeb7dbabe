// rowguard-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowguardError {
    // --- DOMAIN ERRORS (schema/profile consistency) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATIVE ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid duplicate enum variants but keep ergonomics
impl From<std::io::Error> for RowguardError {
    fn from(err: std::io::Error) -> Self {
        RowguardError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<serde_json::Error> for RowguardError {
    fn from(err: serde_json::Error) -> Self {
        RowguardError::Infrastructure(InfrastructureError::Json(err))
    }
}

impl From<serde_yaml::Error> for RowguardError {
    fn from(err: serde_yaml::Error) -> Self {
        RowguardError::Infrastructure(InfrastructureError::Yaml(err))
    }
}
