use crate::error::{EditableError, Result};
use crate::options::{resolve_options, Options};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "editable.json";

/// Option defaults for the editable helper, stored in editable.json.
///
/// ```json
/// {
///   "defaults": { "nowrap": true },
///   "models": {
///     "User": { "active": { "source": ["Enabled", "Disabled"] } }
///   }
/// }
/// ```
///
/// Mutation happens during setup only; rendering borrows the configuration
/// immutably, so it can be shared across threads once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Configuration {
    /// Global tier, applied to every attribute
    #[serde(default)]
    pub defaults: Options,

    /// Per-attribute tier, keyed by model name then attribute name
    #[serde(default)]
    pub models: IndexMap<String, IndexMap<String, Options>>,
}

impl Configuration {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(EditableError::Io)?;
        let config: Configuration =
            serde_json::from_str(&content).map_err(EditableError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(EditableError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(EditableError::Serialization)?;
        fs::write(config_path, content).map_err(EditableError::Io)?;
        Ok(())
    }

    pub fn set_defaults(&mut self, options: Options) {
        self.defaults = options;
    }

    /// Set the per-attribute defaults for `model`.`attribute`
    pub fn set_attribute_options(
        &mut self,
        model: &str,
        attribute: &str,
        options: Options,
    ) -> Result<()> {
        if model.trim().is_empty() || attribute.trim().is_empty() {
            return Err(EditableError::Config(format!(
                "model and attribute names are required (got `{}`.`{}`)",
                model, attribute
            )));
        }
        self.models
            .entry(model.to_string())
            .or_default()
            .insert(attribute.to_string(), options);
        Ok(())
    }

    pub fn attribute_options(&self, model: &str, attribute: &str) -> Option<&Options> {
        self.models.get(model)?.get(attribute)
    }

    /// Options for one call, merged over both configured tiers.
    pub fn options_for(&self, model: &str, attribute: &str, per_call: &Options) -> Options {
        let empty = Options::default();
        let per_attribute = self.attribute_options(model, attribute).unwrap_or(&empty);
        resolve_options(&self.defaults, per_attribute, per_call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceDef;

    #[test]
    fn test_default_config_is_empty() {
        let config = Configuration::default();
        assert_eq!(config.defaults, Options::default());
        assert!(config.models.is_empty());
    }

    #[test]
    fn test_set_attribute_options() {
        let mut config = Configuration::default();
        config
            .set_attribute_options("User", "name", Options::new().with_type("textarea"))
            .unwrap();

        let options = config.attribute_options("User", "name").unwrap();
        assert_eq!(options.render_type.as_ref().map(|t| t.as_str()), Some("textarea"));
        assert!(config.attribute_options("User", "email").is_none());
        assert!(config.attribute_options("Post", "name").is_none());
    }

    #[test]
    fn test_set_attribute_options_rejects_blank_names() {
        let mut config = Configuration::default();
        let result = config.set_attribute_options("", "name", Options::new());
        assert!(matches!(result, Err(EditableError::Config(_))));
    }

    #[test]
    fn test_options_for_applies_tiers() {
        let mut config = Configuration::default();
        config.set_defaults(Options {
            tag: Some("div".into()),
            class: Some("global".into()),
            ..Options::default()
        });
        config
            .set_attribute_options(
                "User",
                "active",
                Options {
                    class: Some("attribute".into()),
                    source: Some(SourceDef::Labels(vec!["On".into(), "Off".into()])),
                    ..Options::default()
                },
            )
            .unwrap();

        let per_call = Options {
            class: Some("call".into()),
            ..Options::default()
        };
        let merged = config.options_for("User", "active", &per_call);
        assert_eq!(merged.tag.as_deref(), Some("div"));
        assert_eq!(merged.class.as_deref(), Some("call"));
        assert!(merged.source.is_some());

        let other = config.options_for("User", "name", &Options::default());
        assert_eq!(other.class.as_deref(), Some("global"));
        assert!(other.source.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Configuration::load(temp_dir.path()).unwrap();
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_dir = temp_dir.path().join("nested");

        let mut config = Configuration::default();
        config
            .set_attribute_options("User", "active", Options::new().with_type("select"))
            .unwrap();
        config.save(&config_dir).unwrap();

        let loaded = Configuration::load(&config_dir).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "{ not json").unwrap();

        let result = Configuration::load(temp_dir.path());
        assert!(matches!(result, Err(EditableError::Serialization(_))));
    }
}
