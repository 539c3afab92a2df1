//! Attribute values stored in the cells of an [`AttributeTable`][crate::table::AttributeTable].

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::error::{GeoFrameError, Result};

/// A single attribute value.
///
/// Equality and hashing are total: floats compare by their bit pattern, so `NaN == NaN` and
/// values can be used as group keys.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric content of the value, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Add two values the way columns are merged.
    ///
    /// Numbers add, strings concatenate and a null on either side gives null.
    ///
    /// ```
    /// use geoframe::value::Value;
    ///
    /// let merged = Value::from("wl_").try_add(&Value::from("up")).unwrap();
    /// assert_eq!(merged, Value::from("wl_up"));
    /// assert_eq!(Value::Int(2).try_add(&Value::Float(0.5)).unwrap(), Value::Float(2.5));
    /// ```
    pub fn try_add(&self, rhs: &Value) -> Result<Value> {
        match (self, rhs) {
            (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
            (Value::Int(a), Value::Int(b)) => Ok(a
                .checked_add(*b)
                .map(Value::Int)
                .unwrap_or_else(|| Value::Float(*a as f64 + *b as f64))),
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => Ok(Value::Float(a + b)),
                _ => Err(GeoFrameError::IncorrectType(
                    format!("cannot add {} and {}", a.type_name(), b.type_name()).into(),
                )),
            },
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::String(v) => v.hash(state),
            Value::Date(v) => v.hash(state),
            Value::DateTime(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        i64::try_from(value)
            .map(Value::Int)
            .unwrap_or(Value::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::DateTime(value)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = GeoFrameError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(v) => Ok(Value::Bool(v)),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Ok(Value::Int(v))
                } else if let Some(v) = v.as_f64() {
                    Ok(Value::Float(v))
                } else {
                    Err(GeoFrameError::IncorrectType(
                        format!("number {v} out of range").into(),
                    ))
                }
            }
            serde_json::Value::String(v) => Ok(Value::String(v)),
            other => Err(GeoFrameError::IncorrectType(
                format!("expected a scalar value, got {other}").into(),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Value::try_from(value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn add_numbers() {
        assert_eq!(Value::Int(2).try_add(&Value::Int(3)).unwrap(), Value::Int(5));
        assert_eq!(
            Value::Float(1.5).try_add(&Value::Int(1)).unwrap(),
            Value::Float(2.5)
        );
    }

    #[test]
    fn add_null_propagates() {
        assert_eq!(Value::Null.try_add(&Value::Int(3)).unwrap(), Value::Null);
        assert_eq!(Value::from("a").try_add(&Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn add_mismatched_types() {
        let err = Value::from("a").try_add(&Value::Int(1)).unwrap_err();
        assert!(matches!(err, GeoFrameError::IncorrectType(_)));
    }

    #[test]
    fn float_keys_hash_consistently() {
        let keys: HashSet<Value> = [Value::Float(f64::NAN), Value::Float(f64::NAN), Value::Int(1)]
            .into_iter()
            .collect();
        assert_eq!(keys.len(), 2);
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn deserialize_scalars() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, true, 3, 2.5, "code"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(3),
                Value::Float(2.5),
                Value::from("code")
            ]
        );
        assert!(serde_json::from_str::<Value>("[1, 2]").is_err());
    }
}
