// rowguard-core/src/application/validate.rs
//
// Validation engine: a full single-threaded scan of the dataset, invoking the
// column validator and the relation-rule evaluator for every row. Violations
// come back in scan order (row, then schema column, then profile rule) and
// are never re-sorted here.

use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::application::report::ValidationReport;
use crate::domain::column::check_cell;
use crate::domain::profile::Profile;
use crate::domain::relation::evaluate_relation;
use crate::domain::schema::Schema;
use crate::domain::value::{Dataset, Value};
use crate::domain::violation::{Observed, Severity, Violation, ViolationKind};

/// Validate a dataset against schema and profile. Returns the violations and
/// the number of rows considered (a `sample_limit` takes a leading prefix).
#[instrument(skip(dataset, schema, profile), fields(rows = dataset.len()))]
pub fn validate_dataset(
    dataset: &Dataset,
    schema: &Schema,
    profile: &Profile,
    sample_limit: Option<usize>,
) -> (Vec<Violation>, usize) {
    let rows = match sample_limit {
        Some(limit) => &dataset[..limit.min(dataset.len())],
        None => &dataset[..],
    };

    let mut violations = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        for col in &schema.columns {
            let Some(value) = row.get(&col.name) else {
                // The column is absent from this row entirely: report once and
                // skip the per-cell checks, relation rules still proceed.
                violations.push(Violation {
                    row_index,
                    column: Some(col.name.clone()),
                    rule_name: "missing_column".to_string(),
                    kind: ViolationKind::Missing,
                    severity: Severity::Error,
                    observed: Observed::Cell(Value::Null),
                    expected: "column present".to_string(),
                    message: format!("Column {} missing in data", col.name),
                });
                continue;
            };
            violations.extend(check_cell(row_index, col, value, profile));
        }
        for rule in &profile.relation_rules {
            if let Some(violation) = evaluate_relation(row_index, row, rule) {
                violations.push(violation);
            }
        }
    }

    debug!(
        violations = violations.len(),
        rows = rows.len(),
        "validation pass finished"
    );
    (violations, rows.len())
}

/// Aggregate a violation list into a report: counts by severity, top-5
/// columns and rules, and a bounded sample for human inspection.
pub fn build_validation_report(violations: Vec<Violation>, total_rows: usize) -> ValidationReport {
    let mut by_severity: HashMap<Severity, usize> = HashMap::new();
    let mut by_column: HashMap<String, usize> = HashMap::new();
    let mut by_rule: HashMap<String, usize> = HashMap::new();
    for v in &violations {
        *by_severity.entry(v.severity).or_default() += 1;
        if let Some(col) = &v.column {
            *by_column.entry(col.clone()).or_default() += 1;
        }
        *by_rule.entry(v.rule_name.clone()).or_default() += 1;
    }

    ValidationReport {
        total_rows,
        total_violations: violations.len(),
        violations_by_severity: by_severity.into_iter().collect(),
        top_violated_columns: top_n(by_column, 5),
        top_violated_rules: top_n(by_rule, 5),
        sample_violations: violations.into_iter().take(50).collect(),
    }
}

/// Highest counts first; ties broken by name so the ranking is deterministic.
fn top_n(counts: HashMap<String, usize>, n: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}
