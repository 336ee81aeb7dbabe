// rowguard-core/src/application/engine.rs
//
// Orchestrator tying the pipeline together: fit imputation statistics,
// validate, repair with before/after validation, persist engine state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::application::repair::{RepairContext, repair_dataset};
use crate::application::report::{RepairReport, ValidationReport};
use crate::application::validate::{build_validation_report, validate_dataset};
use crate::domain::profile::Profile;
use crate::domain::schema::Schema;
use crate::domain::value::Dataset;
use crate::error::RowguardError;

/// Validation and repair engine for one schema/profile pair.
///
/// The engine is stateless apart from the fitted [`RepairContext`]; the same
/// instance can validate and repair any number of datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rowguard {
    pub schema: Schema,
    pub profile: Profile,
    pub context: RepairContext,
}

impl Rowguard {
    /// Build an engine, rejecting inconsistent schemas and profiles up front.
    pub fn new(schema: Schema, profile: Profile) -> Result<Self, RowguardError> {
        schema.check()?;
        profile.check()?;
        Ok(Self {
            schema,
            profile,
            context: RepairContext::new(),
        })
    }

    /// Fit per-column imputation statistics from a reference dataset.
    #[instrument(skip_all, fields(rows = dataset.len()))]
    pub fn fit_stats(&mut self, dataset: &Dataset) {
        self.context.update_stats(dataset, &self.schema);
        info!(
            columns = self.context.impute_stats.len(),
            "imputation statistics fitted"
        );
    }

    /// Validate without modifying anything.
    pub fn validate(&self, dataset: &Dataset, sample_limit: Option<usize>) -> ValidationReport {
        let (violations, total_rows) =
            validate_dataset(dataset, &self.schema, &self.profile, sample_limit);
        build_validation_report(violations, total_rows)
    }

    /// Repair a dataset and report what changed. The input is untouched; the
    /// returned dataset has the same row count. Validation runs before and
    /// after the repair pass so the report can show the effect.
    #[instrument(skip_all, fields(rows = dataset.len()))]
    pub fn repair(&self, dataset: &Dataset, keep_actions: bool) -> (Dataset, RepairReport) {
        let before = self.validate(dataset, None);
        let (repaired, actions) =
            repair_dataset(dataset, &self.schema, &self.profile, &self.context);
        let after = self.validate(&repaired, None);
        info!(
            actions = actions.len(),
            violations_before = before.total_violations,
            violations_after = after.total_violations,
            "repair complete"
        );
        let report = RepairReport::build(actions, before, after, keep_actions);
        (repaired, report)
    }

    /// Persist the engine (schema, profile and fitted statistics) as JSON.
    pub fn save_state(&self, path: &Path) -> Result<(), RowguardError> {
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)?;
        Ok(())
    }

    /// Restore an engine previously written by [`Rowguard::save_state`].
    pub fn load_state(path: &Path) -> Result<Self, RowguardError> {
        let raw = fs::read_to_string(path)?;
        let engine: Rowguard = serde_json::from_str(&raw)?;
        engine.schema.check()?;
        engine.profile.check()?;
        Ok(engine)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::profile::builtin;
    use crate::domain::schema::{ColumnSpec, ColumnType};
    use crate::domain::value::{Row, Value};
    use crate::domain::violation::Severity;

    fn telemetry_schema() -> Schema {
        let mut bytes = ColumnSpec::new("bytes", ColumnType::Float);
        bytes.minimum = Some(0.0);
        bytes.non_negative = true;
        let mut packets = ColumnSpec::new("packets", ColumnType::Int);
        packets.minimum = Some(0.0);
        Schema {
            columns: vec![bytes, packets],
        }
    }

    fn row(bytes: Value, packets: Value) -> Row {
        let mut r = Row::new();
        r.insert("bytes".to_string(), bytes);
        r.insert("packets".to_string(), packets);
        r
    }

    fn dirty_dataset() -> Dataset {
        vec![
            row(Value::Number(-100.0), Value::Number(3.5)),
            row(Value::Null, Value::Number(2.0)),
            row(Value::Number(500.0), Value::Number(1.0)),
        ]
    }

    #[test]
    fn test_repair_never_increases_error_violations() {
        let engine = Rowguard::new(telemetry_schema(), builtin::telemetry_safe()).unwrap();
        let dataset = dirty_dataset();
        let (repaired, report) = engine.repair(&dataset, false);
        assert_eq!(repaired.len(), dataset.len());
        assert!(
            report.validation_after.count_for(Severity::Error)
                <= report.validation_before.count_for(Severity::Error)
        );
        assert!(report.total_actions > 0);
        assert!(report.actions.is_none());
    }

    #[test]
    fn test_repair_leaves_input_untouched() {
        let engine = Rowguard::new(telemetry_schema(), builtin::telemetry_safe()).unwrap();
        let dataset = dirty_dataset();
        let snapshot = dataset.clone();
        let _ = engine.repair(&dataset, true);
        assert_eq!(dataset, snapshot);
    }

    #[test]
    fn test_new_rejects_bad_schema() {
        let schema = Schema {
            columns: vec![
                ColumnSpec::new("dup", ColumnType::Float),
                ColumnSpec::new("dup", ColumnType::Float),
            ],
        };
        assert!(Rowguard::new(schema, builtin::telemetry_safe()).is_err());
    }

    #[test]
    fn test_state_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");

        let mut engine = Rowguard::new(telemetry_schema(), builtin::telemetry_safe()).unwrap();
        engine.fit_stats(&vec![
            row(Value::Number(10.0), Value::Number(1.0)),
            row(Value::Number(30.0), Value::Number(3.0)),
        ]);
        engine.save_state(&path).unwrap();

        let restored = Rowguard::load_state(&path).unwrap();
        assert_eq!(restored.context.impute_stats["bytes"], 20.0);
        assert_eq!(restored.schema.columns.len(), 2);
        assert_eq!(restored.profile.name, engine.profile.name);
    }

    #[test]
    fn test_validate_counts_sample_rows_only() {
        let engine = Rowguard::new(telemetry_schema(), builtin::telemetry_safe()).unwrap();
        let report = engine.validate(&dirty_dataset(), Some(1));
        assert_eq!(report.total_rows, 1);
    }
}
