// rowguard-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Schema Error: {0}")]
    #[diagnostic(
        code(rowguard::domain::schema),
        help("Check column names, dtypes and min/max bounds in the schema file.")
    )]
    SchemaError(String),

    #[error("Profile Error: {0}")]
    #[diagnostic(
        code(rowguard::domain::profile),
        help("Check policies, severity map and relation rules in the profile.")
    )]
    ProfileError(String),

    #[error("Column '{0}' not found in schema")]
    #[diagnostic(code(rowguard::domain::column_not_found))]
    ColumnNotFound(String),

    #[error("Unknown profile '{0}'")]
    #[diagnostic(
        code(rowguard::domain::unknown_profile),
        help("Use a builtin profile name or a path to a profile file.")
    )]
    UnknownProfile(String),
}
