// rowguard-core/src/application/repair.rs
//
// Repair engine. Two phases per row: column-level repairs in schema order,
// then relation-rule repairs in profile order, operating on the
// column-repaired row. Every cell mutation is logged as a RepairAction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::domain::profile::{MissingStrategy, NullPolicy, Profile, RepairMode};
use crate::domain::relation::repair_relation;
use crate::domain::schema::{ColumnType, Schema};
use crate::domain::value::{Dataset, Value};
use crate::domain::violation::RepairAction;

/// Per-column imputation statistics, fitted offline from a training dataset.
/// Read-only during repair; fitting and repairing are separate phases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepairContext {
    pub impute_stats: HashMap<String, f64>,
}

impl RepairContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the median per numeric column and overwrite the stored
    /// statistic. Columns with no coercible values keep no entry.
    pub fn update_stats(&mut self, dataset: &Dataset, schema: &Schema) {
        for col in &schema.columns {
            if !col.dtype.is_numeric() {
                continue;
            }
            let mut values: Vec<f64> = dataset
                .iter()
                .filter_map(|row| row.get(&col.name))
                .filter_map(Value::as_number)
                .filter(|n| !n.is_nan())
                .collect();
            if values.is_empty() {
                self.impute_stats.remove(&col.name);
                continue;
            }
            values.sort_by(|a, b| a.total_cmp(b));
            let mid = values.len() / 2;
            let median = if values.len() % 2 == 0 {
                (values[mid - 1] + values[mid]) / 2.0
            } else {
                values[mid]
            };
            self.impute_stats.insert(col.name.clone(), median);
        }
    }

    /// Replacement value for a missing cell. Unfit columns default to 0.
    pub fn impute_value(&self, column: &str, strategy: MissingStrategy) -> f64 {
        match strategy {
            MissingStrategy::Zero | MissingStrategy::None => 0.0,
            MissingStrategy::Mean | MissingStrategy::Median => {
                self.impute_stats.get(column).copied().unwrap_or(0.0)
            }
        }
    }
}

/// Repair a dataset. Returns the repaired copy (same shape and row count)
/// plus the full ordered action log.
#[instrument(skip_all, fields(rows = dataset.len()))]
pub fn repair_dataset(
    dataset: &Dataset,
    schema: &Schema,
    profile: &Profile,
    context: &RepairContext,
) -> (Dataset, Vec<RepairAction>) {
    let mut repaired = dataset.clone();
    let mut actions: Vec<RepairAction> = Vec::new();
    let bounds = schema.bounds();

    for (row_index, row) in repaired.iter_mut().enumerate() {
        // --- PHASE 1: column-level repairs, schema order ---
        for col in &schema.columns {
            let Some(value) = row.get(&col.name).cloned() else {
                continue; // absent column: validation reports it, nothing to repair
            };
            let log = |old: Value,
                           new: Value,
                           reason: &str,
                           rule_name: &str,
                           strategy: &str,
                           delta: Option<f64>,
                           actions: &mut Vec<RepairAction>| {
                actions.push(RepairAction {
                    row_index,
                    column: col.name.clone(),
                    old_value: old,
                    new_value: new,
                    reason: reason.to_string(),
                    rule_name: rule_name.to_string(),
                    strategy: strategy.to_string(),
                    delta,
                });
            };

            match col.dtype {
                ColumnType::Float | ColumnType::Int => {
                    let mut numeric = value.to_number_lossy();
                    if numeric.is_nan() {
                        if profile.numeric_policy.nan_policy != NullPolicy::Impute {
                            continue; // cannot be validated as a number any further
                        }
                        let strategy = profile.numeric_policy.impute;
                        numeric = context.impute_value(&col.name, strategy);
                        log(
                            value.clone(),
                            Value::Number(numeric),
                            "impute",
                            "nan_policy",
                            strategy.as_str(),
                            None,
                            &mut actions,
                        );
                        row.insert(col.name.clone(), Value::Number(numeric));
                    }
                    if col.non_negative && numeric < 0.0 {
                        let new_val = 0.0;
                        log(
                            Value::Number(numeric),
                            Value::Number(new_val),
                            "non_negative",
                            "non_negative",
                            "clip",
                            Some(new_val - numeric),
                            &mut actions,
                        );
                        row.insert(col.name.clone(), Value::Number(new_val));
                        numeric = new_val;
                    }
                    if profile.numeric_policy.clip {
                        if let Some(min) = col.minimum {
                            if numeric < min {
                                log(
                                    Value::Number(numeric),
                                    Value::Number(min),
                                    "min_clip",
                                    "min_check",
                                    "clip",
                                    Some(min - numeric),
                                    &mut actions,
                                );
                                row.insert(col.name.clone(), Value::Number(min));
                                numeric = min;
                            }
                        }
                        if let Some(max) = col.maximum {
                            if numeric > max {
                                log(
                                    Value::Number(numeric),
                                    Value::Number(max),
                                    "max_clip",
                                    "max_check",
                                    "clip",
                                    Some(max - numeric),
                                    &mut actions,
                                );
                                row.insert(col.name.clone(), Value::Number(max));
                                numeric = max;
                            }
                        }
                    }
                    if col.integer_only || col.dtype == ColumnType::Int {
                        let rounded = profile.int_policy.rounding.apply(numeric);
                        if rounded != numeric {
                            log(
                                Value::Number(numeric),
                                Value::Number(rounded),
                                "integer_only",
                                "integer_check",
                                profile.int_policy.rounding.as_str(),
                                Some(rounded - numeric),
                                &mut actions,
                            );
                            row.insert(col.name.clone(), Value::Number(rounded));
                        }
                    }
                }

                ColumnType::Bool => match &value {
                    Value::Bool(_) => {}
                    Value::Number(n) if *n == 0.0 || *n == 1.0 => {
                        // silent normalization, not an audited repair
                        row.insert(col.name.clone(), Value::Bool(*n == 1.0));
                    }
                    _ => {
                        if profile.repair_mode == RepairMode::Aggressive {
                            let coerced = value.is_truthy();
                            log(
                                value.clone(),
                                Value::Bool(coerced),
                                "coerce bool",
                                "bool_check",
                                "coerce",
                                None,
                                &mut actions,
                            );
                            row.insert(col.name.clone(), Value::Bool(coerced));
                        }
                    }
                },

                ColumnType::Categorical => {
                    let in_set = match (&value, &col.categories) {
                        (Value::Text(s), Some(cats)) => cats.contains(s),
                        (_, Some(_)) => false,
                        (_, None) => true,
                    };
                    if !in_set && profile.repair_mode == RepairMode::Aggressive {
                        log(
                            value.clone(),
                            Value::Null,
                            "unknown category",
                            "category_check",
                            "nullify",
                            None,
                            &mut actions,
                        );
                        row.insert(col.name.clone(), Value::Null);
                    }
                }
            }
        }

        // --- PHASE 2: relation-rule repairs, profile order ---
        // These observe post-repair values: the working row was updated above.
        for rule in &profile.relation_rules {
            actions.extend(repair_relation(row_index, row, rule, profile, &bounds));
        }
    }

    debug!(actions = actions.len(), "repair pass finished");
    (repaired, actions)
}
