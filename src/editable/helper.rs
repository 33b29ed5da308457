//! # Editable Helper
//!
//! The entry point for rendering: given a model, an attribute name and
//! per-call [`Options`], produce the HTML for one editable element.
//!
//! ## Role and Responsibilities
//!
//! The helper:
//! - **Merges** the configured option tiers with the per-call options
//! - **Asks** the [`ViewContext`] about authorization, submit URL and labels
//! - **Resolves** the value through the pure [`resolver`](crate::resolver)
//! - **Assembles** an [`Element`] and hands it to the markup renderer
//!
//! It makes no decisions about values itself; those all live in the resolver.
//!
//! ## Output
//!
//! Editable subjects get a tag like:
//!
//! ```html
//! <span class="editable" title="Active" data-type="select" data-model="user"
//!       data-name="active" data-value="1" data-placeholder="Active"
//!       data-source="{&quot;1&quot;:&quot;Yes&quot;,&quot;0&quot;:&quot;No&quot;}"
//!       data-url="/users/7" data-pk="7"></span>
//! ```
//!
//! Subjects the context refuses get the display labels only (or the `e`
//! option's text), with no editor metadata.

use crate::config::Configuration;
use crate::context::ViewContext;
use crate::display::display_strings;
use crate::error::{EditableError, Result};
use crate::inflect::{capitalize, demodulize, singularize, underscore};
use crate::model::Model;
use crate::options::Options;
use crate::render_type::{RenderType, LEGACY_RICHTEXT_TYPE};
use crate::resolver::{resolve, ResolveHints, Resolution};
use crate::value::Value;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use editable_markup::{Element, Renderer};
use indexmap::IndexMap;
use log::debug;
use serde_json::json;

/// Tag used when the options name none.
pub const DEFAULT_TAG: &str = "span";

/// Class every editable element carries; the client widget binds to it.
pub const EDITABLE_CLASS: &str = "editable";

/// A `data-*` attribute value before emission.
enum DataValue {
    Json(serde_json::Value),
    PreEscaped(String),
}

/// Renders editable elements for models.
///
/// Borrows the [`Configuration`] immutably: once setup is done the same
/// configuration can back any number of helpers.
pub struct EditableHelper<'a, C: ViewContext> {
    config: &'a Configuration,
    context: C,
    renderer: Renderer,
}

impl<'a, C: ViewContext> EditableHelper<'a, C> {
    pub fn new(config: &'a Configuration, context: C) -> Result<Self> {
        Ok(Self {
            config,
            context,
            renderer: Renderer::new()?,
        })
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Renders `attribute` of `subject`.
    ///
    /// # Errors
    ///
    /// Fails when the model has no such attribute (and no `value` option
    /// overrides it), when `data` options do not parse, or when markup
    /// rendering fails.
    pub fn editable(&self, subject: &dyn Model, attribute: &str, options: Options) -> Result<String> {
        let options = self.merged_options(subject, attribute, &options)?;

        if !self.context.is_editable(subject) {
            return self.render_read_only(subject, attribute, options);
        }

        let element = self.assemble(subject, attribute, options)?;
        Ok(self.renderer.render_element(&element)?)
    }

    /// Builds the element [`editable`](Self::editable) would render, ignoring
    /// authorization.
    pub fn element(&self, subject: &dyn Model, attribute: &str, options: Options) -> Result<Element> {
        let options = self.merged_options(subject, attribute, &options)?;
        self.assemble(subject, attribute, options)
    }

    /// Runs only the value resolution for `attribute` of `subject`.
    pub fn resolve(
        &self,
        subject: &dyn Model,
        attribute: &str,
        options: Options,
    ) -> Result<Resolution> {
        let options = self.merged_options(subject, attribute, &options)?;
        let value = attribute_value(subject, attribute, options.value.clone())?;
        Ok(resolve(&value, &hints(&options)))
    }

    fn merged_options(
        &self,
        subject: &dyn Model,
        attribute: &str,
        per_call: &Options,
    ) -> Result<Options> {
        self.config
            .options_for(subject.model_name(), attribute, per_call)
            .lift_data()
    }

    fn render_read_only(
        &self,
        subject: &dyn Model,
        attribute: &str,
        options: Options,
    ) -> Result<String> {
        if let Some(error) = options.error {
            return Ok(self.renderer.render_joined(&[error])?);
        }

        let value = attribute_value(subject, attribute, options.value.clone())?;
        let resolution = resolve(&value, &hints(&options));
        debug!(
            "{}.{} is read-only, showing {} label(s)",
            subject.model_name(),
            attribute,
            resolution.display.len()
        );
        Ok(self
            .renderer
            .render_joined(&display_strings(&resolution.display))?)
    }

    fn assemble(&self, subject: &dyn Model, attribute: &str, mut options: Options) -> Result<Element> {
        let model_name = subject.model_name();

        let url = options
            .url
            .take()
            .unwrap_or_else(|| self.context.submit_url(subject));
        let value = attribute_value(subject, attribute, options.value.take())?;
        let resolution = resolve(&value, &hints(&options));

        let title = match options.title.take() {
            Some(title) => title,
            None => {
                let label_model = match &options.nested {
                    Some(nested) => capitalize(&singularize(nested)),
                    None => model_name.to_string(),
                };
                self.context.human_attribute_name(&label_model, attribute)
            }
        };
        let css = css_class_list(options.class.as_deref(), resolution.css_class.as_deref());
        let tag = options.tag.take().unwrap_or_else(|| DEFAULT_TAG.to_string());
        let placeholder = options.placeholder.take().unwrap_or_else(|| title.clone());

        debug!(
            "rendering {}.{} as <{}> type={}",
            model_name, attribute, tag, resolution.render_type
        );

        let mut data: IndexMap<&str, DataValue> = IndexMap::new();
        data.insert("type", DataValue::Json(json!(resolution.render_type.as_str())));
        data.insert("model", DataValue::Json(json!(underscore(demodulize(model_name)))));
        data.insert("name", DataValue::Json(json!(attribute)));
        if let Some(transported) = transport_value(&value, &resolution) {
            data.insert("value", transported);
        }
        data.insert("placeholder", DataValue::Json(json!(placeholder)));
        if let Some(classes) = &resolution.classes {
            data.insert("classes", DataValue::Json(classes.to_json()));
        }
        if let Some(source) = &resolution.source {
            data.insert("source", DataValue::Json(source.to_json()));
        }
        data.insert("url", DataValue::Json(json!(url)));
        data.insert("pk", DataValue::Json(subject.id().into()));
        if let Some(nested) = &options.nested {
            data.insert("nested", DataValue::Json(json!(nested)));
        }
        if let Some(nid) = &options.nid {
            data.insert("nid", DataValue::Json(nid.clone()));
        }
        if let Some(nowrap) = options.nowrap {
            data.insert("nowrap", DataValue::Json(json!(nowrap)));
        }
        for (key, extra) in &options.extra {
            data.insert(key.as_str(), DataValue::Json(extra.clone()));
        }

        let mut element = Element::new(tag);
        for (name, html_value) in &options.html {
            if let Some(text) = attribute_text(html_value) {
                element = element.attr(name.as_str(), text);
            }
        }
        element = element.attr("class", css).attr("title", title);

        for (name, data_value) in &data {
            element = match data_value {
                DataValue::Json(json_value) => element.data(name, json_value),
                DataValue::PreEscaped(text) => element.safe_data(name, text.as_str()),
            };
        }

        if resolution.render_type.shows_content() {
            element = element.content(display_strings(&resolution.display));
        }
        Ok(element)
    }
}

fn hints(options: &Options) -> ResolveHints<'_> {
    ResolveHints {
        source: options.source.as_ref(),
        classes: options.classes.as_ref(),
        render_type: options.render_type.as_ref(),
    }
}

fn attribute_value(subject: &dyn Model, attribute: &str, overridden: Option<Value>) -> Result<Value> {
    match overridden {
        Some(value) => Ok(value),
        None => subject
            .attribute(attribute)
            .ok_or_else(|| EditableError::UnknownAttribute {
                model: subject.model_name().to_string(),
                attribute: attribute.to_string(),
            }),
    }
}

/// Text of an `html` option value; `null` means no attribute.
fn attribute_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// The `data-value` payload.
///
/// Rich text skips canonicalization and travels as base64 of the raw markup;
/// the legacy rich-text type carries no value at all.
fn transport_value(value: &Value, resolution: &Resolution) -> Option<DataValue> {
    match &resolution.render_type {
        RenderType::RichText => Some(DataValue::Json(json!(STANDARD.encode(value.to_string())))),
        RenderType::Custom(name) if name == LEGACY_RICHTEXT_TYPE => None,
        _ if resolution.canonical.is_pre_escaped() => {
            Some(DataValue::PreEscaped(resolution.canonical.as_str().to_string()))
        }
        _ => Some(DataValue::Json(json!(resolution.canonical.as_str()))),
    }
}

/// `editable`, then the caller's classes, then the value's class; no repeats.
fn css_class_list(extra: Option<&str>, value_class: Option<&str>) -> String {
    let candidates = std::iter::once(EDITABLE_CLASS)
        .chain(extra.unwrap_or_default().split_whitespace())
        .chain(value_class);

    let mut classes: Vec<&str> = Vec::new();
    for class in candidates {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    classes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BasicContext;
    use crate::model::JsonRecord;
    use crate::source::SourceDef;

    fn user() -> JsonRecord {
        JsonRecord::new("User", json!(7))
            .with_attribute("name", json!("Ann"))
            .with_attribute("active", json!(true))
            .with_attribute("bio", json!("line one\nsay \"hi\""))
            .with_attribute("tags", json!(["a", "b"]))
            .with_attribute("body", json!("<p>Hi</p>"))
    }

    fn helper(config: &Configuration) -> EditableHelper<'_, BasicContext> {
        EditableHelper::new(config, BasicContext::default()).unwrap()
    }

    fn opts(value: serde_json::Value) -> Options {
        serde_json::from_value(value).unwrap()
    }

    struct LabelContext;

    impl ViewContext for LabelContext {
        fn human_attribute_name(&self, model: &str, attribute: &str) -> String {
            format!("{} {}", model, attribute)
        }
    }

    #[test]
    fn renders_text_attribute() {
        let config = Configuration::default();
        let html = helper(&config)
            .editable(&user(), "name", Options::new())
            .unwrap();

        assert_eq!(
            html,
            concat!(
                r#"<span class="editable" title="Name" data-type="text" data-model="user" "#,
                r#"data-name="name" data-value="Ann" data-placeholder="Name" "#,
                r#"data-url="/users/7" data-pk="7">Ann</span>"#
            )
        );
    }

    #[test]
    fn renders_boolean_with_default_source_and_no_content() {
        let config = Configuration::default();
        let html = helper(&config)
            .editable(&user(), "active", Options::new())
            .unwrap();

        assert_eq!(
            html,
            concat!(
                r#"<span class="editable" title="Active" data-type="select" data-model="user" "#,
                r#"data-name="active" data-value="1" data-placeholder="Active" "#,
                r#"data-source="{&quot;1&quot;:&quot;Yes&quot;,&quot;0&quot;:&quot;No&quot;}" "#,
                r#"data-url="/users/7" data-pk="7"></span>"#
            )
        );
    }

    #[test]
    fn classes_add_value_class_and_data_attribute() {
        let config = Configuration::default();
        let options = Options::new()
            .with_classes(SourceDef::Labels(vec!["is-on".into(), "is-off".into()]));
        let element = helper(&config).element(&user(), "active", options).unwrap();

        assert_eq!(element.get("class").unwrap().value, "editable is-on");
        assert_eq!(
            element.get("data-classes").unwrap().value,
            r#"{"1":"is-on","0":"is-off"}"#
        );
        let names: Vec<_> = element.attributes().iter().map(|a| a.name.as_str()).collect();
        let classes_at = names.iter().position(|n| *n == "data-classes").unwrap();
        let source_at = names.iter().position(|n| *n == "data-source").unwrap();
        assert!(classes_at < source_at);
    }

    #[test]
    fn css_classes_are_deduplicated() {
        assert_eq!(
            css_class_list(Some(" big  editable big "), Some("big")),
            "editable big"
        );
        assert_eq!(css_class_list(None, None), "editable");
    }

    #[test]
    fn multiline_value_is_emitted_pre_escaped() {
        let config = Configuration::default();
        let html = helper(&config)
            .editable(&user(), "bio", Options::new())
            .unwrap();

        assert!(html.contains(r#"data-value="line one&#10;say &quot;hi&quot;""#));
        assert!(html.contains(">line one\nsay &quot;hi&quot;</span>"));
    }

    #[test]
    fn list_value_is_checklist_without_content() {
        let config = Configuration::default();
        let element = helper(&config).element(&user(), "tags", Options::new()).unwrap();

        assert_eq!(element.get("data-type").unwrap().value, "checklist");
        assert_eq!(element.get("data-value").unwrap().value, "a,b");
        assert!(element.items().is_empty());
    }

    #[test]
    fn richtext_value_is_base64_of_raw_markup() {
        let config = Configuration::default();
        let element = helper(&config)
            .element(&user(), "body", Options::new().with_type("wysihtml5"))
            .unwrap();

        assert_eq!(element.get("data-type").unwrap().value, "wysihtml5");
        assert_eq!(element.get("data-value").unwrap().value, "PHA+SGk8L3A+");
        assert_eq!(element.items(), ["<p>Hi</p>".to_string()]);
    }

    #[test]
    fn legacy_richtext_drops_value() {
        let config = Configuration::default();
        let element = helper(&config)
            .element(&user(), "body", Options::new().with_type("wysihtml"))
            .unwrap();

        assert!(element.get("data-value").is_none());
    }

    #[test]
    fn explicit_options_override_defaults() {
        let config = Configuration::default();
        let options = opts(json!({
            "tag": "div",
            "title": "Full name",
            "placeholder": "Enter a name",
            "url": "/people/7",
            "class": "big",
            "nested": "addresses",
            "nid": "3",
            "nowrap": true,
            "mode": "inline",
            "html": {"id": "user-name", "class": "ignored"}
        }));
        let html = helper(&config).editable(&user(), "name", options).unwrap();

        assert_eq!(
            html,
            concat!(
                r#"<div id="user-name" class="editable big" title="Full name" data-type="text" "#,
                r#"data-model="user" data-name="name" data-value="Ann" "#,
                r#"data-placeholder="Enter a name" data-url="/people/7" data-pk="7" "#,
                r#"data-nested="addresses" data-nid="3" data-nowrap="true" "#,
                r#"data-mode="inline">Ann</div>"#
            )
        );
    }

    #[test]
    fn numeric_nid_and_html_values_render() {
        let config = Configuration::default();
        let options = opts(json!({
            "nested": "addresses",
            "nid": 3,
            "html": {"tabindex": 1, "id": null}
        }));
        let html = helper(&config).editable(&user(), "name", options).unwrap();

        assert!(html.starts_with(r#"<span tabindex="1" class="editable""#));
        assert!(html.contains(r#"data-nested="addresses" data-nid="3">"#));
        assert!(!html.contains(" id="));

        let lifted = opts(json!({"nested": "addresses", "data": {"nid": 3}}));
        let element = helper(&config).element(&user(), "name", lifted).unwrap();
        assert_eq!(element.get("data-nid").unwrap().value, "3");
    }

    #[test]
    fn nested_title_uses_singular_association_model() {
        let config = Configuration::default();
        let helper = EditableHelper::new(&config, LabelContext).unwrap();
        let options = opts(json!({"nested": "addresses"}));
        let element = helper.element(&user(), "name", options).unwrap();

        assert_eq!(element.get("title").unwrap().value, "Address name");
    }

    #[test]
    fn title_defaults_to_human_attribute_name_of_model() {
        let config = Configuration::default();
        let helper = EditableHelper::new(&config, LabelContext).unwrap();
        let element = helper.element(&user(), "name", Options::new()).unwrap();

        assert_eq!(element.get("title").unwrap().value, "User name");
        assert_eq!(element.get("data-placeholder").unwrap().value, "User name");
    }

    #[test]
    fn namespaced_model_is_demodulized_and_underscored() {
        let config = Configuration::default();
        let record = JsonRecord::new("Admin::BlogPost", json!(1)).with_attribute("title", json!("x"));
        let element = helper(&config).element(&record, "title", Options::new()).unwrap();

        assert_eq!(element.get("data-model").unwrap().value, "blog_post");
        assert_eq!(element.get("data-url").unwrap().value, "/blog_posts/1");
    }

    #[test]
    fn unsaved_record_has_no_pk() {
        let config = Configuration::default();
        let record = JsonRecord::new("User", json!(null)).with_attribute("name", json!("x"));
        let element = helper(&config).element(&record, "name", Options::new()).unwrap();

        assert!(element.get("data-pk").is_none());
    }

    #[test]
    fn null_extra_is_dropped() {
        let config = Configuration::default();
        let options = Options::new().with_extra("emptytext", json!(null));
        let element = helper(&config).element(&user(), "name", options).unwrap();

        assert!(element.get("data-emptytext").is_none());
    }

    #[test]
    fn value_option_overrides_attribute() {
        let config = Configuration::default();
        let element = helper(&config)
            .element(&user(), "name", Options::new().with_value(false))
            .unwrap();

        assert_eq!(element.get("data-type").unwrap().value, "select");
        assert_eq!(element.get("data-value").unwrap().value, "0");
    }

    #[test]
    fn value_option_allows_attributes_the_model_lacks() {
        let config = Configuration::default();
        let html = helper(&config)
            .editable(&user(), "nickname", Options::new().with_value("Annie"))
            .unwrap();
        assert!(html.ends_with(">Annie</span>"));
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let config = Configuration::default();
        let result = helper(&config).editable(&user(), "nickname", Options::new());

        match result {
            Err(EditableError::UnknownAttribute { model, attribute }) => {
                assert_eq!(model, "User");
                assert_eq!(attribute, "nickname");
            }
            other => panic!("Expected UnknownAttribute, got {:?}", other),
        }
    }

    #[test]
    fn data_option_is_lifted() {
        let config = Configuration::default();
        let options = opts(json!({"data": {"source": ["Ann", "Bob"], "mode": "popup"}}));
        let element = helper(&config).element(&user(), "name", options).unwrap();

        assert_eq!(element.get("data-type").unwrap().value, "select");
        assert_eq!(
            element.get("data-source").unwrap().value,
            r#"{"Ann":"Ann","Bob":"Bob"}"#
        );
        assert_eq!(element.get("data-mode").unwrap().value, "popup");
        assert!(element.get("data-data").is_none());
    }

    #[test]
    fn configured_tiers_apply() {
        let mut config = Configuration::default();
        config.set_defaults(opts(json!({"class": "from-defaults"})));
        config
            .set_attribute_options("User", "active", opts(json!({"source": ["On", "Off"]})))
            .unwrap();

        let element = helper(&config).element(&user(), "active", Options::new()).unwrap();
        assert_eq!(element.get("class").unwrap().value, "editable from-defaults");
        assert_eq!(
            element.get("data-source").unwrap().value,
            r#"{"1":"On","0":"Off"}"#
        );
    }

    #[test]
    fn record_source_displays_matching_record() {
        let config = Configuration::default();
        let record = JsonRecord::new("Post", json!(1)).with_attribute("author_id", json!(2));
        let options = opts(json!({
            "type": "text",
            "source": [{"id": 1, "text": "Ann"}, {"id": 2, "text": "Bob"}]
        }));
        let html = helper(&config).editable(&record, "author_id", options).unwrap();

        assert!(html.contains(r#"title="Author""#));
        assert!(html.ends_with(">Bob</span>"));
    }

    #[test]
    fn read_only_renders_labels_only() {
        let config = Configuration::default();
        let helper = EditableHelper::new(&config, BasicContext::read_only()).unwrap();

        assert_eq!(helper.editable(&user(), "active", Options::new()).unwrap(), "Yes");
        assert_eq!(helper.editable(&user(), "tags", Options::new()).unwrap(), "a<br />b");
        assert_eq!(
            helper.editable(&user(), "body", Options::new()).unwrap(),
            "&lt;p&gt;Hi&lt;/p&gt;"
        );
    }

    #[test]
    fn read_only_prefers_error_text() {
        let config = Configuration::default();
        let helper = EditableHelper::new(&config, BasicContext::read_only()).unwrap();
        let options = opts(json!({"e": "Hidden <restricted>"}));

        assert_eq!(
            helper.editable(&user(), "name", options).unwrap(),
            "Hidden &lt;restricted&gt;"
        );
    }

    #[test]
    fn resolve_exposes_decision() {
        let config = Configuration::default();
        let resolution = helper(&config)
            .resolve(&user(), "tags", Options::new())
            .unwrap();

        assert_eq!(resolution.render_type, RenderType::Checklist);
        assert_eq!(resolution.canonical.as_str(), "a,b");
    }
}
