// rowguard-core/src/domain/profile/builtin.rs
//
// Built-in constraint profiles, addressable by name from the CLI.

use std::collections::HashMap;

use super::{
    IntPolicy, MissingStrategy, NullPolicy, NumericPolicy, Profile, RepairMode, Rounding,
};
use crate::domain::relation::{OrderOp, RelationKind, RelationRule, RepairStrategy, ThenConstraint};
use crate::domain::violation::{Severity, ViolationKind};

/// Conservative profile for telemetry with minimal repairs.
pub fn telemetry_safe() -> Profile {
    Profile {
        name: "telemetry_safe".into(),
        description: "Conservative profile for telemetry with minimal repairs.".into(),
        numeric_policy: NumericPolicy {
            clip: true,
            impute: MissingStrategy::Median,
            nan_policy: NullPolicy::Impute,
        },
        int_policy: IntPolicy {
            rounding: Rounding::Nearest,
            strict: true,
        },
        relation_rules: vec![RelationRule {
            name: "packet_order".into(),
            message: "Bytes expected to be at least packets".into(),
            severity: Severity::Warn,
            repair_strategy: RepairStrategy::MinimizeDelta,
            kind: RelationKind::Order {
                left: "bytes".into(),
                right: "packets".into(),
                op: OrderOp::Ge,
            },
        }],
        severity_map: HashMap::from([
            (ViolationKind::Range, Severity::Warn),
            (ViolationKind::Type, Severity::Error),
            (ViolationKind::Null, Severity::Error),
        ]),
        repair_mode: RepairMode::Safe,
    }
}

/// Strict bounds and rejection of missing values.
pub fn telemetry_strict() -> Profile {
    Profile {
        name: "telemetry_strict".into(),
        description: "Strict bounds and rejection of missing values.".into(),
        numeric_policy: NumericPolicy {
            clip: true,
            impute: MissingStrategy::None,
            nan_policy: NullPolicy::Reject,
        },
        int_policy: IntPolicy {
            rounding: Rounding::Nearest,
            strict: true,
        },
        relation_rules: vec![RelationRule {
            name: "percentile_order".into(),
            message: "Percentiles must be non-decreasing".into(),
            severity: Severity::Error,
            repair_strategy: RepairStrategy::MinimizeDelta,
            kind: RelationKind::NondecreasingGroup {
                columns: vec![
                    "p25".into(),
                    "p50".into(),
                    "p75".into(),
                    "p90".into(),
                    "p95".into(),
                    "p99".into(),
                ],
            },
        }],
        severity_map: HashMap::from([
            (ViolationKind::Range, Severity::Error),
            (ViolationKind::Type, Severity::Error),
            (ViolationKind::Null, Severity::Error),
        ]),
        repair_mode: RepairMode::Safe,
    }
}

/// Tolerant profile for noisy telemetry, repairs aggressively.
pub fn telemetry_noisy() -> Profile {
    Profile {
        name: "telemetry_noisy".into(),
        description: "Tolerant profile for noisy telemetry, repairs aggressively.".into(),
        numeric_policy: NumericPolicy {
            clip: true,
            impute: MissingStrategy::Mean,
            nan_policy: NullPolicy::Impute,
        },
        int_policy: IntPolicy {
            rounding: Rounding::Nearest,
            strict: false,
        },
        relation_rules: vec![RelationRule {
            name: "duration_non_negative".into(),
            message: "Duration implies non-negative bytes".into(),
            severity: Severity::Warn,
            repair_strategy: RepairStrategy::Clip,
            kind: RelationKind::IfThen {
                if_column: "duration".into(),
                op: OrderOp::Ge,
                value: 0.0,
                then_column: "bytes".into(),
                constraint: ThenConstraint::Min(0.0),
            },
        }],
        severity_map: HashMap::from([
            (ViolationKind::Range, Severity::Warn),
            (ViolationKind::Type, Severity::Warn),
            (ViolationKind::Null, Severity::Warn),
        ]),
        repair_mode: RepairMode::Aggressive,
    }
}

/// Look up a builtin profile by name.
pub fn builtin(name: &str) -> Option<Profile> {
    match name {
        "telemetry_safe" => Some(telemetry_safe()),
        "telemetry_strict" => Some(telemetry_strict()),
        "telemetry_noisy" => Some(telemetry_noisy()),
        _ => None,
    }
}

/// All builtin profiles, in listing order.
pub fn all() -> Vec<Profile> {
    vec![telemetry_safe(), telemetry_strict(), telemetry_noisy()]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_well_formed() {
        for profile in all() {
            profile.check().unwrap();
        }
    }

    #[test]
    fn test_builtin_lookup() {
        assert!(builtin("telemetry_strict").is_some());
        assert!(builtin("no_such_profile").is_none());
    }
}
