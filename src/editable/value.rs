//! Attribute value types.
//!
//! This module defines the runtime representation of the raw attribute value
//! handed to the resolver. The shape set is closed: every decision function
//! matches on [`Value`] exhaustively, so adding a shape is a compile error
//! everywhere it needs handling.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// `true` / `false` flags (e.g. `published`)
    Bool(bool),

    /// No value (`nil` / `NULL` column)
    Absent,

    /// Multi-valued attributes (e.g. `tags`)
    List(Vec<Value>),

    /// Calendar dates and instants
    Temporal(Temporal),

    /// Everything else
    Scalar(Scalar),
}

/// Date/time-shaped values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temporal {
    Date(NaiveDate),
    Time(DateTime<Utc>),
}

/// Plain scalar values.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    /// Covers both signed and unsigned 64-bit ids.
    Integer(i128),
    Float(f64),

    /// A zoned timestamp. Not a calendar value by shape, but it converts to
    /// UTC, which is enough for the date editor when no source applies.
    Zoned(DateTime<FixedOffset>),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Text(value.into()))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Get the string if this is a plain text scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Whether the value can be converted to a UTC instant.
    pub fn converts_to_utc(&self) -> bool {
        match self {
            Value::Temporal(Temporal::Time(_)) | Value::Scalar(Scalar::Zoned(_)) => true,
            Value::Bool(_)
            | Value::Absent
            | Value::List(_)
            | Value::Temporal(Temporal::Date(_))
            | Value::Scalar(_) => false,
        }
    }

    /// Normalizes the value into a sequence of items.
    ///
    /// - Absent: no items
    /// - List: its elements
    /// - anything else: a single item (the value itself)
    pub fn items(&self) -> Vec<&Value> {
        match self {
            Value::Absent => Vec::new(),
            Value::List(items) => items.iter().collect(),
            Value::Bool(_) | Value::Temporal(_) | Value::Scalar(_) => vec![self],
        }
    }
}

/// The value's own string form, used when no source mapping applies.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Absent => Ok(()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Temporal(t) => write!(f, "{}", t),
            Value::Scalar(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Temporal::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S UTC")),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
            // Whole floats keep their fractional part: 1.0, not 1
            Scalar::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{:.1}", x)
            }
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Zoned(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S %z")),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Scalar(Scalar::Integer(value.into()))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Scalar(Scalar::Integer(value.into()))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::Integer(value.into()))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::Float(value))
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Temporal(Temporal::Date(value))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Temporal(Temporal::Time(value))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Value::Scalar(Scalar::Zoned(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Absent)
    }
}

/// JSON mapping.
///
/// Dates and timestamps have no JSON type of their own, so they travel as
/// single-key objects: `{"date": "2024-01-31"}`, `{"time": "<rfc3339>"}` and
/// `{"zoned": "<rfc3339>"}`. Any other object becomes its JSON text.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                match n.as_i64().map(i128::from).or_else(|| n.as_u64().map(i128::from)) {
                    Some(i) => Value::Scalar(Scalar::Integer(i)),
                    None => Value::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN))),
                }
            }
            serde_json::Value::String(s) => Value::text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                temporal_from_object(&map).unwrap_or_else(|| {
                    Value::text(serde_json::Value::Object(map).to_string())
                })
            }
        }
    }
}

fn temporal_from_object(map: &serde_json::Map<String, serde_json::Value>) -> Option<Value> {
    if map.len() != 1 {
        return None;
    }
    let (key, raw) = map.iter().next()?;
    let raw = raw.as_str()?;
    match key.as_str() {
        "date" => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(Value::from),
        "time" => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| Value::from(t.with_timezone(&Utc))),
        "zoned" => DateTime::parse_from_rfc3339(raw).ok().map(Value::from),
        _ => None,
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        use serde_json::json;

        match value {
            Value::Bool(b) => json!(b),
            Value::Absent => serde_json::Value::Null,
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Temporal(Temporal::Date(d)) => json!({ "date": d.format("%Y-%m-%d").to_string() }),
            Value::Temporal(Temporal::Time(t)) => json!({ "time": t.to_rfc3339() }),
            Value::Scalar(Scalar::Text(s)) => json!(s),
            Value::Scalar(Scalar::Integer(i)) => match (i64::try_from(i), u64::try_from(i)) {
                (Ok(signed), _) => json!(signed),
                (_, Ok(unsigned)) => json!(unsigned),
                _ => json!(i.to_string()),
            },
            Value::Scalar(Scalar::Float(x)) => serde_json::Number::from_f64(x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Scalar(Scalar::Zoned(t)) => json!({ "zoned": t.to_rfc3339() }),
        }
    }
}
