// rowguard-core/src/domain/column.rs
//
// Per-cell validator: one value against one column spec under the active
// profile's policies. Pure function of its inputs; evaluation problems become
// violations, never errors.

use crate::domain::profile::{NullPolicy, Profile};
use crate::domain::schema::{ColumnSpec, ColumnType};
use crate::domain::value::Value;
use crate::domain::violation::{Observed, Violation, ViolationKind};

const INTEGER_TOLERANCE: f64 = 1e-6;

/// Check one cell. Returns all violations for the cell in check order.
pub fn check_cell(
    row_index: usize,
    spec: &ColumnSpec,
    value: &Value,
    profile: &Profile,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let make = |rule_name: &str, kind: ViolationKind, expected: String, message: String| Violation {
        row_index,
        column: Some(spec.name.clone()),
        rule_name: rule_name.to_string(),
        kind,
        severity: profile.severity_for(kind),
        observed: Observed::Cell(value.clone()),
        expected,
        message,
    };
    let mut push = |rule_name: &str, kind: ViolationKind, expected: String, message: String| {
        violations.push(make(rule_name, kind, expected, message));
    };

    // Missing values stop all further checks; whether they violate at all is
    // a policy question (repair may impute them later).
    if value.is_missing() {
        if !spec.nullable && profile.numeric_policy.nan_policy == NullPolicy::Reject {
            return vec![make(
                "null_check",
                ViolationKind::Null,
                "non-null".to_string(),
                format!("Column {} does not allow nulls", spec.name),
            )];
        }
        return Vec::new();
    }

    match spec.dtype {
        ColumnType::Float | ColumnType::Int => {
            let Some(numeric) = value.as_number() else {
                push(
                    "type_check",
                    ViolationKind::Type,
                    if spec.dtype == ColumnType::Int { "int" } else { "float" }.to_string(),
                    format!("Value for {} is not numeric", spec.name),
                );
                return violations;
            };
            if (spec.dtype == ColumnType::Int || spec.integer_only)
                && (numeric - numeric.round()).abs() > INTEGER_TOLERANCE
            {
                push(
                    "integer_check",
                    ViolationKind::Integer,
                    "integer".to_string(),
                    format!("Column {} requires integer values", spec.name),
                );
            }
            if let Some(min) = spec.minimum {
                if numeric < min {
                    push(
                        "min_check",
                        ViolationKind::Range,
                        format!(">={}", min),
                        format!("{} below minimum", spec.name),
                    );
                }
            }
            if let Some(max) = spec.maximum {
                if numeric > max {
                    push(
                        "max_check",
                        ViolationKind::Range,
                        format!("<={}", max),
                        format!("{} above maximum", spec.name),
                    );
                }
            }
            if spec.non_negative && numeric < 0.0 {
                push(
                    "non_negative",
                    ViolationKind::Range,
                    ">=0".to_string(),
                    format!("{} must be non-negative", spec.name),
                );
            }
        }

        ColumnType::Bool => {
            let valid = matches!(value, Value::Bool(_))
                || matches!(value, Value::Number(n) if *n == 0.0 || *n == 1.0);
            if !valid {
                push(
                    "bool_check",
                    ViolationKind::Type,
                    "0/1 or true/false".to_string(),
                    format!("{} must be boolean", spec.name),
                );
            }
        }

        ColumnType::Categorical => match value {
            Value::Text(s) => {
                if let Some(cats) = &spec.categories {
                    if !cats.contains(s) {
                        push(
                            "category_check",
                            ViolationKind::Category,
                            cats.join(","),
                            format!("Unexpected category for {}", spec.name),
                        );
                    }
                }
            }
            _ => {
                push(
                    "category_check",
                    ViolationKind::Category,
                    "string".to_string(),
                    format!("Categorical value for {} must be a string", spec.name),
                );
            }
        },
    }

    violations
}
