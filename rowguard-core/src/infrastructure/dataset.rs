// rowguard-core/src/infrastructure/dataset.rs
//
// Dataset I/O. A dataset on disk is an array of row objects, JSON or YAML;
// the extension picks the parser. Columnar formats (CSV, Parquet) are left
// to upstream tooling.

use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::value::Dataset;
use crate::infrastructure::error::InfrastructureError;

/// Serialization format resolved from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    pub(crate) fn from_path(path: &Path) -> Result<Self, InfrastructureError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(FileFormat::Json),
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            _ => Err(InfrastructureError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

#[instrument]
pub fn load_dataset(path: &Path) -> Result<Dataset, InfrastructureError> {
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let dataset: Dataset = match format {
        FileFormat::Json => serde_json::from_str(&content)?,
        FileFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    info!(rows = dataset.len(), path = ?path, "Dataset loaded");
    Ok(dataset)
}

#[instrument(skip(dataset))]
pub fn save_dataset(dataset: &Dataset, path: &Path) -> Result<(), InfrastructureError> {
    let format = FileFormat::from_path(path)?;
    let serialized = match format {
        FileFormat::Json => serde_json::to_string_pretty(dataset)?,
        FileFormat::Yaml => serde_yaml::to_string(dataset)?,
    };
    fs::write(path, serialized)?;
    info!(rows = dataset.len(), path = ?path, "Dataset written");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value::Value;

    #[test]
    fn test_json_dataset_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        fs::write(
            &path,
            r#"[{"bytes": 120.5, "proto": "tcp", "active": true, "note": null}]"#,
        )
        .unwrap();

        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0]["bytes"], Value::Number(120.5));
        assert_eq!(dataset[0]["proto"], Value::Text("tcp".into()));
        assert_eq!(dataset[0]["active"], Value::Bool(true));
        assert_eq!(dataset[0]["note"], Value::Null);

        let out = dir.path().join("copy.json");
        save_dataset(&dataset, &out).unwrap();
        assert_eq!(load_dataset(&out).unwrap(), dataset);
    }

    #[test]
    fn test_yaml_extension_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.yml");
        fs::write(&path, "- bytes: 10\n  packets: 2\n").unwrap();
        let dataset = load_dataset(&path).unwrap();
        assert_eq!(dataset[0]["packets"], Value::Number(2.0));
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = load_dataset(Path::new("rows.csv")).unwrap_err();
        assert!(matches!(err, InfrastructureError::UnsupportedFormat(_)));
    }
}
