// rowguard-core/src/application/report.rs
//
// Aggregated views over the violation and action sequences. Derived state
// only: the primary records stay in scan order and are re-iterable without
// re-running evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::violation::{RepairAction, Severity, Violation};
use crate::error::RowguardError;

/// Summary of constraint violations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_rows: usize,
    pub total_violations: usize,
    pub violations_by_severity: BTreeMap<Severity, usize>,
    pub top_violated_columns: Vec<(String, usize)>,
    pub top_violated_rules: Vec<(String, usize)>,
    /// First 50 violations, in scan order.
    pub sample_violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn count_for(&self, severity: Severity) -> usize {
        self.violations_by_severity
            .get(&severity)
            .copied()
            .unwrap_or(0)
    }

    pub fn to_json(&self) -> Result<String, RowguardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_markdown(&self) -> String {
        let mut lines = vec!["# Rowguard Validation Report".to_string(), String::new()];
        lines.push(format!("Total rows: {}", self.total_rows));
        lines.push(format!("Total violations: {}", self.total_violations));
        lines.push("\n## Violations by severity".to_string());
        for (sev, count) in &self.violations_by_severity {
            lines.push(format!("- {}: {}", sev, count));
        }
        lines.push("\n## Top violated columns".to_string());
        for (col, count) in &self.top_violated_columns {
            lines.push(format!("- {}: {}", col, count));
        }
        lines.push("\n## Top violated rules".to_string());
        for (rule, count) in &self.top_violated_rules {
            lines.push(format!("- {}: {}", rule, count));
        }
        lines.push("\n## Sample violations".to_string());
        for v in &self.sample_violations {
            lines.push(format!(
                "- Row {} | {} | {} | {}: {} (expected={})",
                v.row_index,
                v.rule_name,
                v.column.as_deref().unwrap_or("rule"),
                v.kind,
                v.message,
                v.expected
            ));
        }
        lines.push("\n## How to fix".to_string());
        lines.push(
            "Focus on the highest severity violations first. Check schema bounds and \
             relation rules for the most frequent columns and rules listed above."
                .to_string(),
        );
        lines.join("\n")
    }
}

/// Summary of repair actions plus the before/after validation picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairReport {
    pub generated_at: DateTime<Utc>,
    pub total_actions: usize,
    pub actions_by_column: BTreeMap<String, usize>,
    pub actions_by_rule: BTreeMap<String, usize>,
    pub max_delta_per_column: BTreeMap<String, f64>,
    /// Full action log in scan order; callers may drop it and keep counts.
    pub actions: Option<Vec<RepairAction>>,
    pub validation_before: ValidationReport,
    pub validation_after: ValidationReport,
}

impl RepairReport {
    pub fn build(
        actions: Vec<RepairAction>,
        validation_before: ValidationReport,
        validation_after: ValidationReport,
        keep_actions: bool,
    ) -> Self {
        let mut by_column: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_rule: BTreeMap<String, usize> = BTreeMap::new();
        let mut max_delta: BTreeMap<String, f64> = BTreeMap::new();
        for action in &actions {
            *by_column.entry(action.column.clone()).or_default() += 1;
            *by_rule.entry(action.rule_name.clone()).or_default() += 1;
            if let Some(delta) = action.delta {
                let entry = max_delta.entry(action.column.clone()).or_insert(0.0);
                *entry = entry.max(delta.abs());
            }
        }
        Self {
            generated_at: Utc::now(),
            total_actions: actions.len(),
            actions_by_column: by_column,
            actions_by_rule: by_rule,
            max_delta_per_column: max_delta,
            actions: keep_actions.then_some(actions),
            validation_before,
            validation_after,
        }
    }

    pub fn to_json(&self) -> Result<String, RowguardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_markdown(&self) -> String {
        let mut lines = vec!["# Rowguard Repair Report".to_string(), String::new()];
        lines.push(format!("Total actions: {}", self.total_actions));
        lines.push("\n## Actions by column".to_string());
        for (col, count) in &self.actions_by_column {
            lines.push(format!("- {}: {}", col, count));
        }
        lines.push("\n## Actions by rule".to_string());
        for (rule, count) in &self.actions_by_rule {
            lines.push(format!("- {}: {}", rule, count));
        }
        lines.push("\n## Maximum delta per column".to_string());
        for (col, delta) in &self.max_delta_per_column {
            lines.push(format!("- {}: {}", col, delta));
        }
        lines.push("\n## Validation before repair".to_string());
        lines.push(self.validation_before.to_markdown());
        lines.push("\n## Validation after repair".to_string());
        lines.push(self.validation_after.to_markdown());
        lines.join("\n")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value::Value;

    fn empty_validation() -> ValidationReport {
        ValidationReport {
            total_rows: 0,
            total_violations: 0,
            violations_by_severity: BTreeMap::new(),
            top_violated_columns: vec![],
            top_violated_rules: vec![],
            sample_violations: vec![],
        }
    }

    fn action(column: &str, rule: &str, delta: Option<f64>) -> RepairAction {
        RepairAction {
            row_index: 0,
            column: column.into(),
            old_value: Value::Number(1.0),
            new_value: Value::Number(2.0),
            reason: "test".into(),
            rule_name: rule.into(),
            strategy: "clip".into(),
            delta,
        }
    }

    #[test]
    fn test_repair_report_aggregates() {
        let actions = vec![
            action("a", "r1", Some(-3.0)),
            action("a", "r1", Some(1.0)),
            action("b", "r2", None),
        ];
        let report = RepairReport::build(actions, empty_validation(), empty_validation(), true);
        assert_eq!(report.total_actions, 3);
        assert_eq!(report.actions_by_column["a"], 2);
        assert_eq!(report.actions_by_rule["r2"], 1);
        assert_eq!(report.max_delta_per_column["a"], 3.0);
        assert!(!report.max_delta_per_column.contains_key("b"));
        assert_eq!(report.actions.unwrap().len(), 3);
    }

    #[test]
    fn test_discarding_actions_keeps_counts() {
        let report = RepairReport::build(
            vec![action("a", "r1", Some(1.0))],
            empty_validation(),
            empty_validation(),
            false,
        );
        assert_eq!(report.total_actions, 1);
        assert!(report.actions.is_none());
    }

    #[test]
    fn test_markdown_render_contains_sections() {
        let report = RepairReport::build(
            vec![action("a", "r1", Some(1.0))],
            empty_validation(),
            empty_validation(),
            true,
        );
        let md = report.to_markdown();
        assert!(md.contains("# Rowguard Repair Report"));
        assert!(md.contains("## Actions by column"));
        assert!(md.contains("- a: 1"));
    }

    #[test]
    fn test_json_round_trip() -> anyhow::Result<()> {
        let report = RepairReport::build(
            vec![action("a", "r1", Some(1.0))],
            empty_validation(),
            empty_validation(),
            true,
        );
        let json = report.to_json()?;
        let parsed: RepairReport = serde_json::from_str(&json)?;
        assert_eq!(parsed.total_actions, 1);
        Ok(())
    }
}
