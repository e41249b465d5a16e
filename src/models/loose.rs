use std::fmt;
use serde::{Deserialize, Deserializer};
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};

/// A scalar as found in forecast documents, where the same field may carry a string,
/// a number, an empty string or nothing at all depending on source and time of day.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Loose {
    #[default]
    Missing,
    Text(String),
    Number(Number),
    Flag(bool),
}

impl From<Value> for Loose {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Loose::Text(s),
            Value::Number(n) => Loose::Number(n),
            Value::Bool(b) => Loose::Flag(b),
            Value::Null | Value::Array(_) | Value::Object(_) => Loose::Missing,
        }
    }
}

impl From<&str> for Loose {
    fn from(s: &str) -> Self {
        Loose::Text(s.to_string())
    }
}

impl<'de> Deserialize<'de> for Loose {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Loose::from(Value::deserialize(deserializer)?))
    }
}

impl fmt::Display for Loose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Loose::Missing => Ok(()),
            Loose::Text(s) => write!(f, "{}", s),
            Loose::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() => write!(f, "{}", v),
                _ => write!(f, "{}", n),
            },
            Loose::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl Loose {
    /// Returns true for values a display layer would treat as "set": non-empty text,
    /// non-zero numbers and `true`
    pub fn is_truthy(&self) -> bool {
        match self {
            Loose::Missing => false,
            Loose::Text(s) => !s.is_empty(),
            Loose::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Loose::Flag(b) => *b,
        }
    }

    /// Returns the display text if the value is truthy
    pub fn truthy(&self) -> Option<String> {
        if self.is_truthy() {
            Some(self.to_string())
        } else {
            None
        }
    }

    /// Returns the display text for any value that is present and not an empty string.
    /// Unlike `truthy`, a zero is kept.
    pub fn present(&self) -> Option<String> {
        match self {
            Loose::Missing => None,
            Loose::Text(s) if s.is_empty() => None,
            _ => Some(self.to_string()),
        }
    }

    /// Returns the numeric value of numbers and of text holding a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Loose::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            Loose::Number(n) => n.as_f64(),
            Loose::Missing | Loose::Flag(_) => None,
        }
    }
}

/// Returns the value at the given index, or `Loose::Missing` if the index is out of bounds
///
/// # Arguments
///
/// * 'values' - parallel array from a forecast document
/// * 'index' - position to look up
pub fn at(values: &[Loose], index: usize) -> &Loose {
    const MISSING: &Loose = &Loose::Missing;
    values.get(index).unwrap_or(MISSING)
}

/// Deserializes a field and falls back to its default if the document carries
/// something of an unexpected shape
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserializes a sequence element by element so that one malformed element only
/// falls back to its default and keeps the positions of the others.
/// Anything that is not a sequence becomes an empty vector.
pub fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap_or_default())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
