// rowguard-core/src/domain/relation/mod.rs
//
// Cross-column ("relation") rules: one constraint spanning several named
// columns of the same row. The kind is a closed tagged union so that adding a
// kind forces both the evaluator and the repairer to be updated.

pub mod eval;
pub mod repair;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::violation::Severity;

pub use eval::evaluate_relation;
pub use repair::repair_relation;

const DEFAULT_EPS: f64 = 1e-6;

fn default_eps() -> f64 {
    DEFAULT_EPS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderOp {
    #[default]
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<=")]
    Le,
}

impl OrderOp {
    /// NaN operands always fail the comparison.
    pub fn holds(&self, left: f64, right: f64) -> bool {
        match self {
            Self::Ge => left >= right,
            Self::Le => left <= right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }
}

impl fmt::Display for OrderOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constraint applied to `then_column` when an IF_THEN antecedent holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThenConstraint {
    #[default]
    NonNegative,
    Min(f64),
    Max(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepairStrategy {
    #[default]
    None,
    Clip,
    MinimizeDelta,
}

impl RepairStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Clip => "clip",
            Self::MinimizeDelta => "minimize_delta",
        }
    }
}

/// Kind-specific parameters. Adjacently tagged so rule files read as
/// `{ type: SUM_BOUNDS, params: { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    SumBounds {
        columns: Vec<String>,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    Order {
        left: String,
        right: String,
        #[serde(default)]
        op: OrderOp,
    },
    RatioBounds {
        numerator: String,
        denominator: String,
        #[serde(default = "default_eps")]
        eps: f64,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    IfThen {
        if_column: String,
        #[serde(default)]
        op: OrderOp,
        #[serde(default)]
        value: f64,
        then_column: String,
        #[serde(default)]
        constraint: ThenConstraint,
    },
    NondecreasingGroup {
        columns: Vec<String>,
    },
}

/// A rule describing relationships between columns of one row. Evaluated
/// independently per row; never mutated by the repair pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationRule {
    pub name: String,
    /// Human-readable message carried into violations and repair reasons.
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub repair_strategy: RepairStrategy,
    #[serde(flatten)]
    pub kind: RelationKind,
}

impl RelationRule {
    /// Parameter sanity, checked once at profile resolve time.
    pub fn check(&self) -> Result<(), DomainError> {
        match &self.kind {
            RelationKind::SumBounds { columns, min, max } => {
                if columns.is_empty() {
                    return Err(DomainError::ProfileError(format!(
                        "Rule '{}': SUM_BOUNDS requires at least one column",
                        self.name
                    )));
                }
                if let (Some(lo), Some(hi)) = (min, max) {
                    if lo > hi {
                        return Err(DomainError::ProfileError(format!(
                            "Rule '{}': min {} greater than max {}",
                            self.name, lo, hi
                        )));
                    }
                }
            }
            RelationKind::RatioBounds { eps, min, max, .. } => {
                if *eps <= 0.0 {
                    return Err(DomainError::ProfileError(format!(
                        "Rule '{}': eps must be positive",
                        self.name
                    )));
                }
                if let (Some(lo), Some(hi)) = (min, max) {
                    if lo > hi {
                        return Err(DomainError::ProfileError(format!(
                            "Rule '{}': min {} greater than max {}",
                            self.name, lo, hi
                        )));
                    }
                }
            }
            RelationKind::NondecreasingGroup { columns } => {
                if columns.len() < 2 {
                    return Err(DomainError::ProfileError(format!(
                        "Rule '{}': NONDECREASING_GROUP requires at least two columns",
                        self.name
                    )));
                }
            }
            RelationKind::Order { .. } | RelationKind::IfThen { .. } => {}
        }
        Ok(())
    }
}

/// Bound description used in expectation strings: unbounded sides render as
/// -inf / inf, matching f64's Display.
pub(crate) fn bound_or(v: Option<f64>, unbounded: f64) -> f64 {
    v.unwrap_or(unbounded)
}
