// rowguard-core/src/domain/relation/eval.rs
//
// Relation-rule evaluator. Missing and non-numeric cells coerce to NaN;
// NaN outcomes per rule kind are pinned down here (and only here):
//   - SUM_BOUNDS counts NaN terms as 0
//   - ORDER comparisons with a NaN operand fail, so a violation is reported
//   - RATIO_BOUNDS with a NaN ratio fails both bound tests, no violation
//   - IF_THEN with a NaN antecedent is condition-false, no violation
//   - NONDECREASING_GROUP skips NaN cells (no violation, running max unchanged)

use super::{RelationKind, RelationRule, ThenConstraint, bound_or};
use crate::domain::value::{Row, Value, cell_as_number};
use crate::domain::violation::{Observed, Violation, ViolationKind};

/// Evaluate one rule on one row. `None` means the rule is satisfied.
/// Column lists are walked left-to-right; the first offender in a group wins.
pub fn evaluate_relation(row_index: usize, row: &Row, rule: &RelationRule) -> Option<Violation> {
    match &rule.kind {
        RelationKind::SumBounds { columns, min, max } => {
            let total: f64 = columns
                .iter()
                .map(|c| {
                    let v = cell_as_number(row, c);
                    if v.is_nan() { 0.0 } else { v }
                })
                .sum();
            let lo = bound_or(*min, f64::NEG_INFINITY);
            let hi = bound_or(*max, f64::INFINITY);
            if total < lo || total > hi {
                return Some(Violation {
                    row_index,
                    column: None,
                    rule_name: rule.name.clone(),
                    kind: ViolationKind::SumBounds,
                    severity: rule.severity,
                    observed: Observed::Scalar(total),
                    expected: format!("{} <= sum({}) <= {}", lo, columns.join(","), hi),
                    message: rule.message.clone(),
                });
            }
            None
        }

        RelationKind::Order { left, right, op } => {
            let lv = cell_as_number(row, left);
            let rv = cell_as_number(row, right);
            if op.holds(lv, rv) {
                return None;
            }
            Some(Violation {
                row_index,
                column: None,
                rule_name: rule.name.clone(),
                kind: ViolationKind::Order,
                severity: rule.severity,
                observed: Observed::pair(left, lv, right, rv),
                expected: format!("{} {} {}", left, op, right),
                message: rule.message.clone(),
            })
        }

        RelationKind::RatioBounds {
            numerator,
            denominator,
            eps,
            min,
            max,
        } => {
            let den = cell_as_number(row, denominator);
            let ratio = cell_as_number(row, numerator) / (den + eps);
            let lo = bound_or(*min, f64::NEG_INFINITY);
            let hi = bound_or(*max, f64::INFINITY);
            if ratio < lo || ratio > hi {
                return Some(Violation {
                    row_index,
                    column: None,
                    rule_name: rule.name.clone(),
                    kind: ViolationKind::RatioBounds,
                    severity: rule.severity,
                    observed: Observed::Scalar(ratio),
                    expected: format!("{} <= {}/{} <= {}", lo, numerator, denominator, hi),
                    message: rule.message.clone(),
                });
            }
            None
        }

        RelationKind::IfThen {
            if_column,
            op,
            value,
            then_column,
            constraint,
        } => {
            let antecedent = cell_as_number(row, if_column);
            if !op.holds(antecedent, *value) {
                return None;
            }
            let target = cell_as_number(row, then_column);
            let expected = match constraint {
                ThenConstraint::NonNegative if target < 0.0 => Some(format!(
                    "{} >= 0 when {} {} {}",
                    then_column, if_column, op, value
                )),
                ThenConstraint::Min(m) if target < *m => {
                    Some(format!("{} >= {} when condition met", then_column, m))
                }
                ThenConstraint::Max(m) if target > *m => {
                    Some(format!("{} <= {} when condition met", then_column, m))
                }
                _ => None,
            };
            expected.map(|expected| Violation {
                row_index,
                column: Some(then_column.clone()),
                rule_name: rule.name.clone(),
                kind: ViolationKind::IfThen,
                severity: rule.severity,
                observed: Observed::Cell(
                    row.get(then_column).cloned().unwrap_or(Value::Null),
                ),
                expected,
                message: rule.message.clone(),
            })
        }

        RelationKind::NondecreasingGroup { columns } => {
            let mut running_max = f64::NEG_INFINITY;
            for col in columns {
                let val = cell_as_number(row, col);
                if val.is_nan() {
                    continue;
                }
                if val < running_max - 1e-9 {
                    return Some(Violation {
                        row_index,
                        column: Some(col.clone()),
                        rule_name: rule.name.clone(),
                        kind: ViolationKind::Nondecreasing,
                        severity: rule.severity,
                        observed: Observed::Cell(
                            row.get(col).cloned().unwrap_or(Value::Null),
                        ),
                        expected: format!("non-decreasing over [{}]", columns.join(",")),
                        message: rule.message.clone(),
                    });
                }
                running_max = running_max.max(val);
            }
            None
        }
    }
}
