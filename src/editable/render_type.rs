//! Editor type selection.
//!
//! The render type tells the client widget which input to build. Callers can
//! force any type (including ones this crate knows nothing about); otherwise it
//! is inferred from the value's shape and whether a source mapping applies.

use crate::source::Source;
use crate::value::{Scalar, Temporal, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type name of the rich-text widget. Its value travels base64-encoded.
pub const RICHTEXT_TYPE: &str = "wysihtml5";

/// Older rich-text type name. Elements of this type carry no `data-value`.
pub const LEGACY_RICHTEXT_TYPE: &str = "wysihtml";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RenderType {
    Text,
    Select,
    Checklist,
    Date,
    Textarea,
    RichText,
    Custom(String),
}

impl RenderType {
    pub fn as_str(&self) -> &str {
        match self {
            RenderType::Text => "text",
            RenderType::Select => "select",
            RenderType::Checklist => "checklist",
            RenderType::Date => "date",
            RenderType::Textarea => "textarea",
            RenderType::RichText => RICHTEXT_TYPE,
            RenderType::Custom(name) => name,
        }
    }

    /// Whether the element shows the display labels as its content.
    ///
    /// Select, checklist and textarea widgets fill the element themselves.
    pub fn shows_content(&self) -> bool {
        !matches!(
            self,
            RenderType::Select | RenderType::Checklist | RenderType::Textarea
        )
    }
}

impl From<&str> for RenderType {
    fn from(name: &str) -> Self {
        match name {
            "text" => RenderType::Text,
            "select" => RenderType::Select,
            "checklist" => RenderType::Checklist,
            "date" => RenderType::Date,
            "textarea" => RenderType::Textarea,
            RICHTEXT_TYPE => RenderType::RichText,
            other => RenderType::Custom(other.to_string()),
        }
    }
}

impl From<String> for RenderType {
    fn from(name: String) -> Self {
        RenderType::from(name.as_str())
    }
}

impl From<RenderType> for String {
    fn from(render_type: RenderType) -> Self {
        render_type.as_str().to_string()
    }
}

impl fmt::Display for RenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the editor type.
///
/// An explicit override always wins. Otherwise shape checks run first, so a
/// boolean or list value keeps its own type even when a mapping is present:
///
/// 1. boolean -> `select`
/// 2. list -> `checklist`
/// 3. date/time -> `date`
/// 4. source is a mapping -> `select`
/// 5. converts to UTC -> `date`
/// 6. otherwise -> `text`
pub fn select_type(
    value: &Value,
    source: Option<&Source>,
    explicit: Option<&RenderType>,
) -> RenderType {
    if let Some(render_type) = explicit {
        return render_type.clone();
    }

    match value {
        Value::Bool(_) => RenderType::Select,
        Value::List(_) => RenderType::Checklist,
        Value::Temporal(Temporal::Date(_) | Temporal::Time(_)) => RenderType::Date,
        Value::Absent | Value::Scalar(_) => {
            if source.and_then(Source::as_mapping).is_some() {
                RenderType::Select
            } else if let Value::Scalar(Scalar::Zoned(_)) = value {
                RenderType::Date
            } else {
                RenderType::Text
            }
        }
    }
}
