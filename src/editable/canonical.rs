//! # Canonical Values
//!
//! The canonical value is the deterministic string form of an attribute value.
//! It is used in two places with the same rule:
//!
//! - as the value transmitted to the client (`data-value`)
//! - as the lookup key into source and classes mappings
//!
//! | Value                   | Canonical form                          |
//! |-------------------------|-----------------------------------------|
//! | `true` / `false`        | `1` / `0`                               |
//! | absent                  | empty string                            |
//! | list                    | elements canonicalized, joined with `,` |
//! | text with a newline     | `\n` -> `&#10;`, `"` -> `&quot;`        |
//! | anything else           | the value's own string form             |
//!
//! The list separator is not escaped, so a list whose elements contain commas
//! cannot be split back apart. The client widget splits on `,` and depends on
//! this exact format.

use crate::value::{Scalar, Value};
use serde::Serialize;

/// Separator placed between canonicalized list elements.
pub const LIST_SEPARATOR: &str = ",";

/// Canonical (wire and lookup-key) form of a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalValue {
    text: String,

    /// Set when newline/quote escaping was applied. The markup emitter must
    /// output such text verbatim instead of escaping it again.
    pre_escaped: bool,
}

impl CanonicalValue {
    fn plain(text: String) -> Self {
        Self {
            text,
            pre_escaped: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_pre_escaped(&self) -> bool {
        self.pre_escaped
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Converts a value into its canonical form.
pub fn canonicalize(value: &Value) -> CanonicalValue {
    match value {
        Value::Bool(true) => CanonicalValue::plain("1".to_string()),
        Value::Bool(false) => CanonicalValue::plain("0".to_string()),
        Value::Absent => CanonicalValue::plain(String::new()),
        Value::List(items) => {
            let joined = items
                .iter()
                .map(|item| canonicalize(item).into_string())
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR);
            CanonicalValue::plain(joined)
        }
        Value::Scalar(Scalar::Text(text)) if text.contains('\n') => CanonicalValue {
            text: text.replace('\n', "&#10;").replace('"', "&quot;"),
            pre_escaped: true,
        },
        Value::Temporal(_) | Value::Scalar(_) => CanonicalValue::plain(value.to_string()),
    }
}
