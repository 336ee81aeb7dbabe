// rowguard-core/src/domain/profile/mod.rs
//
// A profile bundles the numeric/integer policies, the ordered relation rules,
// the severity map and the repair mode. Immutable once resolved; owned by the
// caller for the duration of a validation or repair pass.

pub mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::domain::error::DomainError;
use crate::domain::relation::RelationRule;
use crate::domain::violation::{Severity, ViolationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingStrategy {
    #[default]
    None,
    Median,
    Mean,
    Zero,
}

impl MissingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Median => "median",
            Self::Mean => "mean",
            Self::Zero => "zero",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    #[default]
    Reject,
    Impute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    #[default]
    Nearest,
    Floor,
    Ceil,
}

impl Rounding {
    /// `Nearest` rounds half away from zero (`f64::round`): 0.5 -> 1, -0.5 -> -1.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Nearest => value.round(),
            Self::Floor => value.floor(),
            Self::Ceil => value.ceil(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RepairMode {
    #[default]
    Safe,
    Aggressive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericPolicy {
    /// Clip out-of-bounds numeric values to the declared min/max during repair.
    #[serde(default)]
    pub clip: bool,
    #[serde(default)]
    pub impute: MissingStrategy,
    #[serde(default)]
    pub nan_policy: NullPolicy,
}

impl Default for NumericPolicy {
    fn default() -> Self {
        Self {
            clip: true,
            impute: MissingStrategy::None,
            nan_policy: NullPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntPolicy {
    #[serde(default)]
    pub rounding: Rounding,
    /// Carried in the profile format for forward compatibility; fractional
    /// values in integer columns are always reported.
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub numeric_policy: NumericPolicy,
    #[serde(default)]
    pub int_policy: IntPolicy,
    #[serde(default)]
    pub relation_rules: Vec<RelationRule>,
    #[serde(default)]
    pub severity_map: HashMap<ViolationKind, Severity>,
    #[serde(default)]
    pub repair_mode: RepairMode,
}

impl Profile {
    /// Severity for a violation kind. Unmapped kinds default to Warn, except
    /// `null` which defaults to Error.
    pub fn severity_for(&self, kind: ViolationKind) -> Severity {
        self.severity_map.get(&kind).copied().unwrap_or(match kind {
            ViolationKind::Null => Severity::Error,
            _ => Severity::Warn,
        })
    }

    /// Structural validation, run at load/resolve time.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::ProfileError(
                "Profile name must be provided".to_string(),
            ));
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for rule in &self.relation_rules {
            if rule.name.is_empty() {
                return Err(DomainError::ProfileError(
                    "Rule name must be provided".to_string(),
                ));
            }
            if !seen.insert(rule.name.as_str()) {
                return Err(DomainError::ProfileError(format!(
                    "Duplicate rule name '{}'",
                    rule.name
                )));
            }
            rule.check()?;
        }
        Ok(())
    }
}
