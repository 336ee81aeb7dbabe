// rowguard-core/src/infrastructure/config/profile.rs

use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::DomainError;
use crate::domain::profile::{Profile, builtin};
use crate::error::RowguardError;
use crate::infrastructure::dataset::FileFormat;

/// Resolve a profile argument: a builtin name wins, otherwise it is treated
/// as a YAML/JSON file path. Loaded profiles are consistency-checked.
#[instrument]
pub fn resolve_profile(spec: &str) -> Result<Profile, RowguardError> {
    if let Some(profile) = builtin::builtin(spec) {
        info!(profile = spec, "Using builtin profile");
        return Ok(profile);
    }

    let path = Path::new(spec);
    if !path.exists() {
        return Err(DomainError::UnknownProfile(spec.to_string()).into());
    }
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    let profile: Profile = match format {
        FileFormat::Json => serde_json::from_str(&content)?,
        FileFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    profile.check()?;
    info!(profile = %profile.name, rules = profile.relation_rules.len(), path = ?path, "Profile loaded");
    Ok(profile)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_name_wins() {
        let profile = resolve_profile("telemetry_safe").unwrap();
        assert_eq!(profile.name, "telemetry_safe");
    }

    #[test]
    fn test_unknown_spec_is_rejected() {
        let err = resolve_profile("no_such_profile").unwrap_err();
        assert!(matches!(
            err,
            RowguardError::Domain(DomainError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_custom_profile_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(
            &path,
            r#"
name: custom
numeric_policy:
  clip: true
  impute: median
  nan_policy: impute
relation_rules:
  - name: byte_order
    type: ORDER
    params:
      left: bytes
      right: packets
      op: ">="
"#,
        )
        .unwrap();
        let profile = resolve_profile(path.to_str().unwrap()).unwrap();
        assert_eq!(profile.name, "custom");
        assert_eq!(profile.relation_rules.len(), 1);
    }

    #[test]
    fn test_malformed_profile_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        // duplicate rule names fail the consistency check
        fs::write(
            &path,
            r#"
name: bad
relation_rules:
  - name: dup
    type: NONDECREASING_GROUP
    params:
      columns: [a, b]
  - name: dup
    type: NONDECREASING_GROUP
    params:
      columns: [c, d]
"#,
        )
        .unwrap();
        assert!(resolve_profile(path.to_str().unwrap()).is_err());
    }
}
