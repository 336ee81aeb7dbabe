// rowguard-core/src/domain/relation/repair.rs
//
// Kind-specific repair algorithms operating on the column-repaired row under
// schema bounds. The rule definition is never mutated: the ORDER `<=` case is
// a row-local operand swap computed here, not a rewrite of the shared rule.

use std::collections::HashMap;

use super::{RelationKind, RelationRule, RepairStrategy, bound_or, evaluate_relation};
use crate::domain::profile::{Profile, RepairMode};
use crate::domain::schema::ColumnBounds;
use crate::domain::value::{Row, Value, cell_as_number};
use crate::domain::violation::RepairAction;

/// Repair `row` in place so the rule holds, where the strategy allows it.
/// Skipped entirely when the strategy is `none` or the rule already holds.
/// IF_THEN is validated but has no repair path; its violations persist.
pub fn repair_relation(
    row_index: usize,
    row: &mut Row,
    rule: &RelationRule,
    profile: &Profile,
    bounds: &HashMap<String, ColumnBounds>,
) -> Vec<RepairAction> {
    let Some(violation) = evaluate_relation(row_index, row, rule) else {
        return Vec::new();
    };
    if rule.repair_strategy == RepairStrategy::None {
        return Vec::new();
    }
    let reason = violation.message;

    let mut actions = Vec::new();
    let set = |row: &mut Row, col: &str, new: f64, actions: &mut Vec<RepairAction>| {
        // NaN targets arise when a referenced column is missing; a repair
        // must never write a non-finite value.
        if !new.is_finite() {
            return;
        }
        let old = row.get(col).cloned().unwrap_or(Value::Null);
        let old_num = old.to_number_lossy();
        if new == old_num {
            return;
        }
        let delta = new - old_num;
        actions.push(RepairAction {
            row_index,
            column: col.to_string(),
            old_value: old,
            new_value: Value::Number(new),
            reason: reason.clone(),
            rule_name: rule.name.clone(),
            strategy: rule.repair_strategy.as_str().to_string(),
            delta: delta.is_finite().then_some(delta),
        });
        row.insert(col.to_string(), Value::Number(new));
    };

    match &rule.kind {
        RelationKind::Order { left, right, op } => {
            // `<=` reuses the `>=` algorithm on swapped operands.
            let (l_col, r_col) = match op {
                super::OrderOp::Ge => (left.as_str(), right.as_str()),
                super::OrderOp::Le => (right.as_str(), left.as_str()),
            };
            let lv = cell_as_number(row, l_col);
            let rv = cell_as_number(row, r_col);
            let l_bounds = bounds.get(l_col).copied().unwrap_or_default();
            match profile.repair_mode {
                RepairMode::Safe => {
                    // Only the left side moves, raised toward max(left, right).
                    let new_l = l_bounds.clamp(lv.max(rv));
                    set(row, l_col, new_l, &mut actions);
                }
                RepairMode::Aggressive => {
                    let r_bounds = bounds.get(r_col).copied().unwrap_or_default();
                    let midpoint = (lv + rv) / 2.0;
                    set(row, l_col, l_bounds.clamp(midpoint), &mut actions);
                    set(row, r_col, r_bounds.clamp(midpoint), &mut actions);
                }
            }
        }

        RelationKind::SumBounds { columns, min, max } => {
            let current: f64 = columns
                .iter()
                .map(|c| {
                    let v = cell_as_number(row, c);
                    if v.is_nan() { 0.0 } else { v }
                })
                .sum();
            let lo = bound_or(*min, f64::NEG_INFINITY);
            let hi = bound_or(*max, f64::INFINITY);
            // Even split across the list; each adjustment is capped only at
            // the bound opposing the direction of motion. A cap can leave the
            // repair partial; the residual is not redistributed.
            if current < lo {
                let share = (lo - current) / columns.len() as f64;
                for col in columns {
                    let old = cell_as_number(row, col);
                    if old.is_nan() {
                        continue;
                    }
                    let mut new_val = old + share;
                    if let Some(cap) = bounds.get(col).and_then(|b| b.max) {
                        new_val = new_val.min(cap);
                    }
                    set(row, col, new_val, &mut actions);
                }
            } else if current > hi {
                let share = (current - hi) / columns.len() as f64;
                for col in columns {
                    let old = cell_as_number(row, col);
                    if old.is_nan() {
                        continue;
                    }
                    let mut new_val = old - share;
                    if let Some(floor) = bounds.get(col).and_then(|b| b.min) {
                        new_val = new_val.max(floor);
                    }
                    set(row, col, new_val, &mut actions);
                }
            }
        }

        RelationKind::RatioBounds {
            numerator,
            denominator,
            eps,
            min,
            max,
        } => {
            // The denominator is never adjusted.
            let den = cell_as_number(row, denominator);
            let ratio = cell_as_number(row, numerator) / (den + eps);
            let lo = bound_or(*min, f64::NEG_INFINITY);
            let hi = bound_or(*max, f64::INFINITY);
            if ratio < lo {
                set(row, numerator, lo * (den + eps), &mut actions);
            } else if ratio > hi {
                set(row, numerator, hi * (den + eps), &mut actions);
            }
        }

        RelationKind::NondecreasingGroup { columns } => {
            // Prefix-max smoothing: values below the running maximum are
            // raised to it, values at or above pass through and update it.
            let mut running_max = f64::NEG_INFINITY;
            for col in columns {
                let val = cell_as_number(row, col);
                if val.is_nan() {
                    continue;
                }
                if val < running_max {
                    set(row, col, running_max, &mut actions);
                } else {
                    running_max = val;
                }
            }
        }

        // No defined repair behavior: the constraint is conditional and any
        // clip would pick semantics the profile never declared.
        RelationKind::IfThen { .. } => {}
    }

    actions
}
