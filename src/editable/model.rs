use crate::error::{EditableError, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A record whose attributes can be rendered as editable elements.
pub trait Model {
    /// Full model name, possibly namespaced (e.g. `Admin::User`).
    fn model_name(&self) -> &str;

    /// Primary key; [`Value::Absent`] for unsaved records.
    fn id(&self) -> Value;

    /// Current value of an attribute, `None` if the model has no such attribute.
    fn attribute(&self, name: &str) -> Option<Value>;
}

/// A model backed by a JSON document:
///
/// ```json
/// { "model": "User", "id": 7, "attributes": { "name": "Ann", "active": true } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub model: String,
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl JsonRecord {
    pub fn new(model: impl Into<String>, id: serde_json::Value) -> Self {
        Self {
            model: model.into(),
            id,
            attributes: serde_json::Map::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(EditableError::Io)?;
        Self::from_json(&content)
    }
}

impl Model for JsonRecord {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn id(&self) -> Value {
        Value::from(self.id.clone())
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned().map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_record_document() {
        let record = JsonRecord::from_json(
            r#"{"model": "Admin::User", "id": 7, "attributes": {"active": true}}"#,
        )
        .unwrap();

        assert_eq!(record.model_name(), "Admin::User");
        assert_eq!(record.id(), Value::from(7));
        assert_eq!(record.attribute("active"), Some(Value::Bool(true)));
        assert_eq!(record.attribute("missing"), None);
    }

    #[test]
    fn missing_id_is_absent() {
        let record = JsonRecord::from_json(r#"{"model": "User"}"#).unwrap();
        assert_eq!(record.id(), Value::Absent);
    }

    #[test]
    fn null_attribute_is_present_but_absent() {
        let record = JsonRecord::new("User", json!(1)).with_attribute("bio", json!(null));
        assert_eq!(record.attribute("bio"), Some(Value::Absent));
    }

    #[test]
    fn load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("user.json");
        fs::write(&path, r#"{"model": "User", "id": 1, "attributes": {"name": "Ann"}}"#).unwrap();

        let record = JsonRecord::load(&path).unwrap();
        assert_eq!(record.attribute("name"), Some(Value::from("Ann")));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = JsonRecord::load("/definitely/not/here.json");
        assert!(matches!(result, Err(EditableError::Io(_))));
    }
}
