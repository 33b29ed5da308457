//! # Helper Options
//!
//! Every knob of the editable helper, as an all-optional struct so the same
//! type serves the three configuration tiers:
//!
//! 1. **global** defaults (configuration file `defaults`)
//! 2. **per-attribute** defaults (configuration file `models.<Model>.<attribute>`)
//! 3. **per-call** options passed to [`EditableHelper::editable`](crate::helper::EditableHelper::editable)
//!
//! [`resolve_options`] merges the tiers key by key: a key present in a later
//! tier wins, maps (`html`, `data`, extra keys and mapping-shaped sources)
//! merge entry by entry instead of being replaced wholesale.
//!
//! Unknown keys are kept in [`Options::extra`] and end up as `data-*`
//! attributes on the rendered element.

use crate::error::Result;
use crate::render_type::RenderType;
use crate::source::SourceDef;
use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Tag name of the element (default `span`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Extra CSS classes, whitespace separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Title attribute; also the default placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceDef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<SourceDef>,

    /// Overrides the model's attribute value. An explicit `null` counts.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,

    /// Submit URL; defaults to the view context's URL for the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub render_type: Option<RenderType>,

    /// Markup shown instead of the value when the element is not editable
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Identifier of the nested record being edited, usually its numeric id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nid: Option<serde_json::Value>,

    /// Name of the nested association (e.g. `addresses`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nowrap: Option<bool>,

    /// Additional HTML attributes for the element (`{"tabindex": 1}`)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub html: IndexMap<String, serde_json::Value>,

    /// Data attributes; lifted to the top level by [`Options::lift_data`]
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub data: IndexMap<String, serde_json::Value>,

    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_source(mut self, source: SourceDef) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_classes(mut self, classes: SourceDef) -> Self {
        self.classes = Some(classes);
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_type(mut self, render_type: impl Into<RenderType>) -> Self {
        self.render_type = Some(render_type.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Layers `over` on top of `self`; keys present in `over` win.
    pub fn merge(self, over: Options) -> Options {
        self.layer(over, true)
    }

    /// `deep` merges maps entry by entry; otherwise a present key replaces
    /// the whole value, maps included.
    fn layer(self, over: Options, deep: bool) -> Options {
        let (source, classes, html, data, extra) = if deep {
            (
                merge_source(self.source, over.source),
                merge_source(self.classes, over.classes),
                merge_maps(self.html, over.html, merge_json),
                merge_maps(self.data, over.data, merge_json),
                merge_maps(self.extra, over.extra, merge_json),
            )
        } else {
            (
                over.source.or(self.source),
                over.classes.or(self.classes),
                replace_map(self.html, over.html),
                replace_map(self.data, over.data),
                merge_maps(self.extra, over.extra, |_, over| over),
            )
        };

        Options {
            tag: over.tag.or(self.tag),
            class: over.class.or(self.class),
            placeholder: over.placeholder.or(self.placeholder),
            title: over.title.or(self.title),
            source,
            classes,
            value: over.value.or(self.value),
            url: over.url.or(self.url),
            render_type: over.render_type.or(self.render_type),
            error: over.error.or(self.error),
            nid: over.nid.or(self.nid),
            nested: over.nested.or(self.nested),
            nowrap: over.nowrap.or(self.nowrap),
            html,
            data,
            extra,
        }
    }

    /// Moves `data` entries to the top level, where they replace options of
    /// the same name (`data: {source: [...]}` behaves like `source: [...]`).
    /// Unlike [`merge`](Self::merge), a lifted map replaces the top-level one.
    pub fn lift_data(mut self) -> Result<Options> {
        if self.data.is_empty() {
            return Ok(self);
        }
        let data = std::mem::take(&mut self.data);
        let lifted: Options = serde_json::from_value(serde_json::Value::Object(
            data.into_iter().collect(),
        ))?;
        Ok(self.layer(lifted, false))
    }
}

/// Merges the three option tiers: global < per-attribute < per-call.
pub fn resolve_options(global: &Options, per_attribute: &Options, per_call: &Options) -> Options {
    global
        .clone()
        .merge(per_attribute.clone())
        .merge(per_call.clone())
}

fn merge_source(base: Option<SourceDef>, over: Option<SourceDef>) -> Option<SourceDef> {
    match (base, over) {
        (Some(SourceDef::Mapping(mut base)), Some(SourceDef::Mapping(over))) => {
            base.extend(over);
            Some(SourceDef::Mapping(base))
        }
        (base, over) => over.or(base),
    }
}

fn replace_map<V>(base: IndexMap<String, V>, over: IndexMap<String, V>) -> IndexMap<String, V> {
    if over.is_empty() {
        base
    } else {
        over
    }
}

fn merge_maps<V: Default>(
    mut base: IndexMap<String, V>,
    over: IndexMap<String, V>,
    combine: impl Fn(V, V) -> V,
) -> IndexMap<String, V> {
    for (key, value) in over {
        match base.get_mut(&key) {
            Some(existing) => {
                let current = std::mem::take(existing);
                *existing = combine(current, value);
            }
            None => {
                base.insert(key, value);
            }
        }
    }
    base
}

/// Deep merge: objects merge per key, anything else is replaced.
fn merge_json(base: serde_json::Value, over: serde_json::Value) -> serde_json::Value {
    match (base, over) {
        (serde_json::Value::Object(mut base), serde_json::Value::Object(over)) => {
            for (key, value) in over {
                match base.get_mut(&key) {
                    Some(existing) => {
                        let current = existing.take();
                        *existing = merge_json(current, value);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            serde_json::Value::Object(base)
        }
        (_, over) => over,
    }
}
