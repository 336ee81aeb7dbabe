// rowguard-core/src/domain/violation.rs
//
// Immutable records produced by the validation and repair passes. The ordered
// sequences form the audit trail; nothing downstream mutates them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::value::Value;

// Ascending discriminators make severity comparisons (>=) native and free,
// which the report layer uses to rank violations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info, // 0
    #[default]
    Warn, // 1
    Error, // 2
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Closed set of violation kinds; the profile's severity map is keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Null,
    Type,
    Integer,
    Range,
    Category,
    Missing,
    SumBounds,
    Order,
    RatioBounds,
    IfThen,
    Nondecreasing,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Type => "type",
            Self::Integer => "integer",
            Self::Range => "range",
            Self::Category => "category",
            Self::Missing => "missing",
            Self::SumBounds => "sum_bounds",
            Self::Order => "order",
            Self::RatioBounds => "ratio_bounds",
            Self::IfThen => "if_then",
            Self::Nondecreasing => "nondecreasing",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the engine actually saw: a scalar, a raw cell, or a small mapping for
/// rules spanning several columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Observed {
    Scalar(f64),
    Cell(Value),
    Columns(BTreeMap<String, f64>),
}

impl Observed {
    pub fn pair(left: &str, lv: f64, right: &str, rv: f64) -> Self {
        let mut map = BTreeMap::new();
        map.insert(left.to_string(), lv);
        map.insert(right.to_string(), rv);
        Observed::Columns(map)
    }
}

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub row_index: usize,
    pub column: Option<String>,
    pub rule_name: String,
    pub kind: ViolationKind,
    pub severity: Severity,
    pub observed: Observed,
    pub expected: String,
    pub message: String,
}

/// A single repair action applied to a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairAction {
    pub row_index: usize,
    pub column: String,
    pub old_value: Value,
    pub new_value: Value,
    pub reason: String,
    pub rule_name: String,
    pub strategy: String,
    /// Absent when a numeric delta is not meaningful (imputation, coercion).
    pub delta: Option<f64>,
}
