//! # Sources and Shorthand Expansion
//!
//! A *source* is the lookup table from canonical value to display label that
//! select-like editors offer as options. *Classes* use exactly the same shapes
//! and rules but map canonical values to CSS class names.
//!
//! Callers may write a source in several ways ([`SourceDef`]):
//!
//! ```text
//! ["Enabled", "Disabled"]          boolean shorthand   -> {"1": "Enabled", "0": "Disabled"}
//! ["Draft", "Live", "Archived"]    enumerable shorthand -> {"Draft": "Draft", ...}
//! {"5": "Five", "6": "Six"}        mapping, used as-is
//! [{"id": 1, "text": "Ann"}, ...]  records, looked up by `id` at display time
//! ```
//!
//! Which shorthand applies depends on the shape of the value being edited, so
//! expansion always takes the value along. Anything not recognized is passed
//! through untouched as [`Source::Passthrough`], never rejected.

use crate::value::{Scalar, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered canonical-value -> label (or class name) table.
pub type Mapping = IndexMap<String, String>;

/// One entry of a record-list source: an ordered field map.
pub type Record = IndexMap<String, Value>;

/// Field of a [`Record`] holding its identifier.
pub const RECORD_ID_FIELD: &str = "id";

/// Label shown for `true` when no source is given.
pub const DEFAULT_TRUE_LABEL: &str = "Yes";

/// Label shown for `false` when no source is given.
pub const DEFAULT_FALSE_LABEL: &str = "No";

/// A source (or classes) definition as written by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceDef {
    Labels(Vec<String>),
    Mapping(Mapping),
    Records(Vec<Record>),
}

/// A source after shorthand expansion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Source {
    /// A canonical lookup table.
    Mapping(Mapping),

    /// A caller definition no shorthand applied to. Never holds
    /// [`SourceDef::Mapping`]; mappings always expand to [`Source::Mapping`].
    Passthrough(SourceDef),
}

impl Source {
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Source::Mapping(mapping) => Some(mapping),
            Source::Passthrough(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Source::Mapping(mapping) => serde_json::Value::Object(
                mapping
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            ),
            Source::Passthrough(SourceDef::Labels(labels)) => serde_json::Value::Array(
                labels
                    .iter()
                    .cloned()
                    .map(serde_json::Value::String)
                    .collect(),
            ),
            Source::Passthrough(SourceDef::Mapping(mapping)) => {
                Source::Mapping(mapping.clone()).to_json()
            }
            Source::Passthrough(SourceDef::Records(records)) => serde_json::Value::Array(
                records
                    .iter()
                    .map(|record| {
                        serde_json::Value::Object(
                            record
                                .iter()
                                .map(|(k, v)| (k.clone(), v.clone().into()))
                                .collect(),
                        )
                    })
                    .collect(),
            ),
        }
    }
}

/// Expands shorthand definitions into a canonical mapping.
///
/// - boolean value + exactly two labels: `{"1": labels[0], "0": labels[1]}`
/// - text value + labels: identity mapping, in the given order
/// - a mapping: used as-is
/// - anything else: passed through
pub fn expand(def: Option<&SourceDef>, value: &Value) -> Option<Source> {
    let def = def?;
    let expanded = match (value, def) {
        (Value::Bool(_), SourceDef::Labels(labels)) if labels.len() == 2 => {
            Source::Mapping(boolean_mapping(&labels[0], &labels[1]))
        }
        (Value::Scalar(Scalar::Text(_)), SourceDef::Labels(labels)) if !labels.is_empty() => {
            Source::Mapping(
                labels
                    .iter()
                    .map(|label| (label.clone(), label.clone()))
                    .collect(),
            )
        }
        (_, SourceDef::Mapping(mapping)) => Source::Mapping(mapping.clone()),
        (
            Value::Bool(_) | Value::Absent | Value::List(_) | Value::Temporal(_) | Value::Scalar(_),
            SourceDef::Labels(_) | SourceDef::Records(_),
        ) => Source::Passthrough(def.clone()),
    };
    Some(expanded)
}

/// Source used when the caller supplies none: Yes/No for booleans only.
pub fn default_source_for(value: &Value) -> Option<Source> {
    match value {
        Value::Bool(_) => Some(Source::Mapping(boolean_mapping(
            DEFAULT_TRUE_LABEL,
            DEFAULT_FALSE_LABEL,
        ))),
        Value::Absent | Value::List(_) | Value::Temporal(_) | Value::Scalar(_) => None,
    }
}

/// Expands the caller's source, falling back to [`default_source_for`].
pub fn resolve_source(def: Option<&SourceDef>, value: &Value) -> Option<Source> {
    match def {
        Some(_) => expand(def, value),
        None => default_source_for(value),
    }
}

fn boolean_mapping(true_label: &str, false_label: &str) -> Mapping {
    let mut mapping = Mapping::new();
    mapping.insert("1".to_string(), true_label.to_string());
    mapping.insert("0".to_string(), false_label.to_string());
    mapping
}
