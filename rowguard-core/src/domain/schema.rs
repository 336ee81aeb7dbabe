// rowguard-core/src/domain/schema.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::HashSet;
use validator::Validate;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    #[default]
    Float,
    Int,
    Bool,
    Categorical,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Float | ColumnType::Int)
    }
}

/// Definition for a single column. Immutable once the schema is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ColumnSpec {
    #[validate(length(min = 1, message = "column name must be non-empty"))]
    pub name: String,
    #[serde(default)]
    pub dtype: ColumnType,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
    #[serde(default)]
    pub integer_only: bool,
    #[serde(default)]
    pub non_negative: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl ColumnSpec {
    pub fn new(name: &str, dtype: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            dtype,
            minimum: None,
            maximum: None,
            integer_only: false,
            non_negative: false,
            nullable: false,
            unit: None,
            description: None,
            categories: None,
        }
    }

    fn check_consistency(&self) -> Result<(), DomainError> {
        self.validate()
            .map_err(|e| DomainError::SchemaError(e.to_string()))?;
        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min > max {
                return Err(DomainError::SchemaError(format!(
                    "Minimum greater than maximum for column {}: {}>{}",
                    self.name, min, max
                )));
            }
        }
        if self.dtype == ColumnType::Categorical {
            if let Some(cats) = &self.categories {
                let unique: HashSet<&String> = cats.iter().collect();
                if unique.len() != cats.len() {
                    return Err(DomainError::SchemaError(format!(
                        "Duplicate categories for column {}",
                        self.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Effective numeric bounds for one column, as seen by the repair engine.
/// `non_negative` raises the effective minimum to at least 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnBounds {
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(min) = self.min {
            v = v.max(min);
        }
        if let Some(max) = self.max {
            v = v.min(max);
        }
        v
    }
}

/// Ordered list of column specs. The scan order of every validation and
/// repair pass follows this order, never the row's map order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Structural validation, run once at load/resolve time so the engines
    /// can assume a well-formed schema.
    pub fn check(&self) -> Result<(), DomainError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for col in &self.columns {
            col.check_consistency()?;
            if !seen.insert(col.name.as_str()) {
                return Err(DomainError::SchemaError(format!(
                    "Duplicate column name '{}'",
                    col.name
                )));
            }
        }
        Ok(())
    }

    /// Scaffold a schema from column names, cloning `template` for each.
    pub fn from_columns<I, S>(names: I, template: &ColumnSpec) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = names
            .into_iter()
            .map(|name| {
                let mut spec = template.clone();
                spec.name = name.into();
                spec
            })
            .collect();
        Self { columns }
    }

    pub fn get_column(&self, name: &str) -> Result<&ColumnSpec, DomainError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DomainError::ColumnNotFound(name.to_string()))
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Per-column effective bounds used by relation-rule repair.
    pub fn bounds(&self) -> HashMap<String, ColumnBounds> {
        let mut bounds = HashMap::new();
        for col in &self.columns {
            let mut b = ColumnBounds {
                min: col.minimum,
                max: col.maximum,
            };
            if col.non_negative {
                b.min = Some(b.min.map_or(0.0, |m| m.max(0.0)));
            }
            bounds.insert(col.name.clone(), b);
        }
        bounds
    }
}
