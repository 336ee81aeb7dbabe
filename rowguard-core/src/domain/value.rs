// rowguard-core/src/domain/value.rs
//
// Closed scalar variant for dynamically-typed cells. Rows arrive as maps of
// column name -> scalar; everything downstream coerces through this type
// instead of juggling raw JSON values.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single cell value. Untagged so JSON/YAML scalars map directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

pub type Row = HashMap<String, Value>;
pub type Dataset = Vec<Row>;

impl Value {
    /// Null and NaN are both "missing" for validation purposes.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Strict numeric coercion. Bools map to 0/1, numeric strings parse.
    /// Returns None when the value has no numeric reading (a `type` violation
    /// at the call site, never a panic).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Null => None,
        }
    }

    /// Lossy coercion used by relation rules: anything non-numeric becomes
    /// NaN and propagates through arithmetic.
    pub fn to_number_lossy(&self) -> f64 {
        self.as_number().unwrap_or(f64::NAN)
    }

    /// Python-style truthiness, used only by aggressive boolean coercion.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Lossy lookup for relation rules: a column absent from the row reads as NaN.
pub fn cell_as_number(row: &Row, column: &str) -> f64 {
    row.get(column).map_or(f64::NAN, Value::to_number_lossy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::Bool(true).as_number(), Some(1.0));
        assert_eq!(Value::Text("3.5".into()).as_number(), Some(3.5));
        assert_eq!(Value::Text("abc".into()).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_missing_detection() {
        assert!(Value::Null.is_missing());
        assert!(Value::Number(f64::NAN).is_missing());
        assert!(!Value::Number(0.0).is_missing());
        assert!(!Value::Text("".into()).is_missing());
    }

    #[test]
    fn test_lossy_coercion_propagates_nan() {
        assert!(Value::Text("oops".into()).to_number_lossy().is_nan());
        assert!(Value::Null.to_number_lossy().is_nan());
    }

    #[test]
    fn test_untagged_serde_round_trip() -> anyhow::Result<()> {
        let row: Row = serde_json::from_str(r#"{"a": 1.5, "b": true, "c": "x", "d": null}"#)?;
        assert_eq!(row["a"], Value::Number(1.5));
        assert_eq!(row["b"], Value::Bool(true));
        assert_eq!(row["c"], Value::Text("x".into()));
        assert_eq!(row["d"], Value::Null);
        Ok(())
    }

    #[test]
    fn test_missing_column_reads_as_nan() {
        let row: Row = HashMap::new();
        assert!(cell_as_number(&row, "ghost").is_nan());
    }
}
