//! # Editable Markup - HTML Tag Emission
//!
//! A small layer that turns already-resolved element descriptions into HTML
//! markup, owning every escaping decision on the way out.
//!
//! ## The Problem
//!
//! The editable helper decides *what* goes on an element (tag name, CSS classes,
//! `data-*` attributes, display text) but must never hand-assemble strings:
//! - Attribute values carry user data and have to be escaped
//! - Some values arrive pre-escaped and must be emitted verbatim
//! - Structured `data-*` values (label tables, flags) travel as JSON text
//!
//! ## The Solution
//!
//! - **Elements** are described with the [`Element`] builder
//! - **Templates** (minijinja) lay out tags, attributes and `<br />` joins
//! - **Escaping** happens in exactly one place: the `h` template filter
//!
//! ## Quick Example
//!
//! ```rust
//! use editable_markup::{Element, Renderer};
//!
//! let element = Element::new("span")
//!     .attr("class", "editable")
//!     .data("type", &serde_json::json!("text"))
//!     .content(["Tom & Jerry"]);
//!
//! let renderer = Renderer::new().unwrap();
//! let html = renderer.render_element(&element).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<span class="editable" data-type="text">Tom &amp; Jerry</span>"#
//! );
//! ```
//!
//! ## Template Syntax
//!
//! Custom templates use [minijinja](https://docs.rs/minijinja). Auto-escaping
//! is off; pipe values through `h` to escape them:
//!
//! ```jinja
//! <a href="{{ url | h }}">{{ label | h }}</a>
//! ```

use minijinja::{AutoEscape, Environment, Value};
use serde::Serialize;

pub use minijinja::Error;

/// Name of the built-in template that renders a single [`Element`].
pub const ELEMENT_TEMPLATE: &str = "element";

/// Name of the built-in template that joins display items with `<br />`.
pub const JOINED_TEMPLATE: &str = "joined";

/// Separator placed between display items.
pub const LINE_BREAK: &str = "<br />";

const ELEMENT_SOURCE: &str = r#"<{{ tag | h }}{% for attr in attributes %} {{ attr.name | h }}="{% if attr.safe %}{{ attr.value }}{% else %}{{ attr.value | h }}{% endif %}"{% endfor %}>{% for item in content %}{% if not loop.first %}<br />{% endif %}{{ item | h }}{% endfor %}</{{ tag | h }}>"#;

const JOINED_SOURCE: &str =
    r#"{% for item in items %}{% if not loop.first %}<br />{% endif %}{{ item | h }}{% endfor %}"#;

/// Escapes text for use in HTML content and double-quoted attribute values.
///
/// Matches the character set Rails escapes: `&`, `<`, `>`, `"` and `'`.
///
/// ```rust
/// use editable_markup::escape_html;
///
/// assert_eq!(escape_html(r#"<b class="x">"#), "&lt;b class=&quot;x&quot;&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Converts a `data-*` key into its attribute form (`nested_id` -> `nested-id`).
pub fn dasherize(name: &str) -> String {
    name.replace('_', "-")
}

/// A single HTML attribute.
///
/// `safe` attributes are emitted verbatim; everything else is escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub safe: bool,
}

/// Description of one HTML element.
///
/// Attributes keep insertion order. Setting an attribute that already exists
/// replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    tag: String,
    attributes: Vec<Attribute>,
    content: Vec<String>,
}

impl Element {
    /// Creates an element with no attributes and no content.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Sets a plain attribute (escaped on output).
    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name.into(), value.into(), false)
    }

    /// Sets an attribute whose value is already escaped.
    pub fn safe_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name.into(), value.into(), true)
    }

    /// Sets a `data-*` attribute from a JSON value.
    ///
    /// Strings are used as-is, `null` is skipped, and everything else
    /// (numbers, booleans, arrays, objects) is serialized as JSON text.
    ///
    /// ```rust
    /// use editable_markup::Element;
    /// use serde_json::json;
    ///
    /// let element = Element::new("span")
    ///     .data("pk", &json!(7))
    ///     .data("nested_id", &json!("a"))
    ///     .data("nid", &json!(null));
    ///
    /// assert_eq!(element.get("data-pk").unwrap().value, "7");
    /// assert_eq!(element.get("data-nested-id").unwrap().value, "a");
    /// assert!(element.get("data-nid").is_none());
    /// ```
    pub fn data(self, name: &str, value: &serde_json::Value) -> Self {
        let text = match value {
            serde_json::Value::Null => return self,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        self.set(data_name(name), text, false)
    }

    /// Sets a `data-*` attribute whose value is already escaped.
    pub fn safe_data(self, name: &str, value: impl Into<String>) -> Self {
        self.set(data_name(name), value.into(), true)
    }

    /// Sets the content items, rendered escaped and joined by `<br />`.
    pub fn content<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn items(&self) -> &[String] {
        &self.content
    }

    /// Looks up an attribute by its full name (e.g. `data-type`).
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    fn set(mut self, name: String, value: String, safe: bool) -> Self {
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.safe = safe;
            }
            None => self.attributes.push(Attribute { name, value, safe }),
        }
        self
    }
}

fn data_name(name: &str) -> String {
    format!("data-{}", dasherize(name))
}

#[derive(Serialize)]
struct JoinedData<'a> {
    items: &'a [String],
}

/// Renders an inline template.
///
/// # Arguments
///
/// * `template` - A minijinja template string
/// * `data` - Any serializable data to pass to the template
///
/// # Example
///
/// ```rust
/// use editable_markup::render;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Data { label: String }
///
/// let output = render(
///     r#"<em>{{ label | h }}</em>"#,
///     &Data { label: "a < b".into() },
/// ).unwrap();
/// assert_eq!(output, "<em>a &lt; b</em>");
/// ```
pub fn render<T: Serialize>(template: &str, data: &T) -> Result<String, Error> {
    let mut env = Environment::new();
    configure(&mut env);

    env.add_template_owned("_inline".to_string(), template.to_string())?;
    let tmpl = env.get_template("_inline")?;
    tmpl.render(data)
}

/// A renderer with pre-registered templates.
///
/// [`Renderer::new`] registers the built-in [`ELEMENT_TEMPLATE`] and
/// [`JOINED_TEMPLATE`]; more can be added with [`Renderer::add_template`].
/// Templates are compiled once and reused.
///
/// # Example
///
/// ```rust
/// use editable_markup::Renderer;
/// use serde::Serialize;
///
/// let mut renderer = Renderer::new().unwrap();
/// renderer.add_template("label", r#"<label>{{ text | h }}</label>"#).unwrap();
///
/// #[derive(Serialize)]
/// struct Label { text: String }
///
/// let html = renderer.render("label", &Label { text: "Name".into() }).unwrap();
/// assert_eq!(html, "<label>Name</label>");
/// ```
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Creates a renderer with the built-in element templates registered.
    pub fn new() -> Result<Self, Error> {
        let mut renderer = Self::empty();
        renderer.add_template(ELEMENT_TEMPLATE, ELEMENT_SOURCE)?;
        renderer.add_template(JOINED_TEMPLATE, JOINED_SOURCE)?;
        Ok(renderer)
    }

    /// Creates a renderer with no templates registered.
    pub fn empty() -> Self {
        let mut env = Environment::new();
        configure(&mut env);
        Self { env }
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())
    }

    /// Renders a registered template with the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template name is not found or rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render(data)
    }

    /// Renders an element as `<tag attrs...>content</tag>`.
    pub fn render_element(&self, element: &Element) -> Result<String, Error> {
        self.render(ELEMENT_TEMPLATE, element)
    }

    /// Renders display items escaped and joined by `<br />`, with no wrapper.
    pub fn render_joined(&self, items: &[String]) -> Result<String, Error> {
        self.render(JOINED_TEMPLATE, &JoinedData { items })
    }
}

/// Disables auto-escaping and registers the `h` escape filter.
fn configure(env: &mut Environment<'static>) {
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("h", |value: Value| -> String {
        match value.as_str() {
            Some(text) => escape_html(text),
            None if value.is_none() || value.is_undefined() => String::new(),
            None => escape_html(&value.to_string()),
        }
    });
}
