//! Cell values, grouping factors, and rows

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a tabular row
///
/// Deserializes from any JSON scalar: integers become [`Value::Int`],
/// other numbers [`Value::Float`], strings [`Value::Text`] and `null`
/// [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Value {
    /// Numeric view of the cell; `None` for text and null cells
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) | Value::Null => None,
        }
    }

    /// Text view of the cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check if the cell is empty
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Interpret the cell as a grouping factor
    ///
    /// Floats are accepted only when they hold an exact integer (loaders
    /// frequently widen integer columns); anything fractional, non-finite,
    /// or null is rejected.
    pub fn to_factor(&self) -> Option<Factor> {
        match self {
            Value::Int(v) => Some(Factor::Int(*v)),
            Value::Float(v) => {
                let in_range = *v >= i64::MIN as f64 && *v < i64::MAX as f64;
                if v.is_finite() && v.fract() == 0.0 && in_range {
                    Some(Factor::Int(*v as i64))
                } else {
                    None
                }
            }
            Value::Text(s) => Some(Factor::Label(s.clone())),
            Value::Null => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Int(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Float(v as f64),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Value::Null, Value::Float)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Factor> for Value {
    fn from(f: Factor) -> Self {
        match f {
            Factor::Int(v) => Value::Int(v),
            Factor::Label(s) => Value::Text(s),
        }
    }
}

/// Value of one grouping factor
///
/// Ordering is numeric for integers and lexicographic for labels; integers
/// sort before labels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Factor {
    Int(i64),
    Label(String),
}

impl Factor {
    /// Integer view of the factor; `None` for labels
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Factor::Int(v) => Some(*v),
            Factor::Label(_) => None,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factor::Int(v) => write!(f, "{}", v),
            Factor::Label(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Factor {
    fn from(v: i64) -> Self {
        Factor::Int(v)
    }
}

impl From<&str> for Factor {
    fn from(v: &str) -> Self {
        Factor::Label(v.to_owned())
    }
}

/// One row of a table, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create a new empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, returning the previous value if there was one
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Get a field's value
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Check if a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Get the number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in ascending name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
