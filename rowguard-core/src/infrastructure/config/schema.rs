// rowguard-core/src/infrastructure/config/schema.rs
//
// Schema files are plain serde documents; the structural consistency check
// runs on load so everything downstream can assume a well-formed schema.

use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::schema::{ColumnSpec, ColumnType, Schema};
use crate::error::RowguardError;
use crate::infrastructure::dataset::FileFormat;
use crate::infrastructure::error::InfrastructureError;

#[instrument]
pub fn load_schema(path: &Path) -> Result<Schema, RowguardError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(path.display().to_string()).into());
    }
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let schema: Schema = match format {
        FileFormat::Json => serde_json::from_str(&content)?,
        FileFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    schema.check()?;
    info!(columns = schema.columns.len(), path = ?path, "Schema loaded");
    Ok(schema)
}

#[instrument(skip(schema))]
pub fn save_schema(schema: &Schema, path: &Path) -> Result<(), RowguardError> {
    schema.check()?;
    let format = FileFormat::from_path(path)?;
    let serialized = match format {
        FileFormat::Json => serde_json::to_string_pretty(schema)?,
        FileFormat::Yaml => serde_yaml::to_string(schema)?,
    };
    fs::write(path, serialized)?;
    Ok(())
}

/// Scaffold a permissive float schema over the given column names, meant to
/// be edited by hand afterwards.
pub fn starter_schema<I, S>(columns: I) -> Schema
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut template = ColumnSpec::new("", ColumnType::Float);
    template.nullable = true;
    Schema::from_columns(columns.into_iter().map(|c| c.as_ref().to_string()), &template)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_schema_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        let schema = starter_schema(["bytes", "packets"]);
        save_schema(&schema, &path).unwrap();

        let loaded = load_schema(&path).unwrap();
        assert_eq!(loaded.column_names(), vec!["bytes", "packets"]);
        assert!(loaded.columns[0].nullable);
    }

    #[test]
    fn test_load_rejects_duplicate_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(
            &path,
            r#"{"columns": [{"name": "a", "dtype": "float"}, {"name": "a", "dtype": "float"}]}"#,
        )
        .unwrap();
        assert!(load_schema(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_config_not_found() {
        let err = load_schema(Path::new("/nonexistent/schema.yaml")).unwrap_err();
        assert!(matches!(
            err,
            RowguardError::Infrastructure(InfrastructureError::ConfigNotFound(_))
        ));
    }
}
