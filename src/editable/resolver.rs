//! # Value Resolver
//!
//! Runs the four decision steps for one attribute value and bundles their
//! results. Data flows one way:
//!
//! ```text
//! source/classes ──▶ Shorthand Expander ──▶ Source ─────┐
//!                                                       ▼
//! raw value ───────▶ Canonicalizer ──▶ key ──▶ Type Selector    ──▶ render type
//!                                          └─▶ Display Resolver ──▶ labels
//! ```
//!
//! Every function here is pure: no state is kept between calls and nothing is
//! written anywhere, so resolution is safe to run from any number of threads.

use crate::canonical::{canonicalize, CanonicalValue};
use crate::display::{resolve_display, DisplaySequence};
use crate::render_type::{select_type, RenderType};
use crate::source::{expand, resolve_source, Source, SourceDef};
use crate::value::Value;
use log::debug;
use serde::Serialize;

/// Developer-supplied hints for one resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveHints<'a> {
    pub source: Option<&'a SourceDef>,
    pub classes: Option<&'a SourceDef>,
    pub render_type: Option<&'a RenderType>,
}

/// The rendering decision for one attribute value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    #[serde(rename = "type")]
    pub render_type: RenderType,
    pub canonical: CanonicalValue,
    pub source: Option<Source>,
    pub classes: Option<Source>,
    /// Entry of the classes mapping for the canonical value, if any.
    pub css_class: Option<String>,
    pub display: DisplaySequence,
}

pub fn resolve(value: &Value, hints: &ResolveHints<'_>) -> Resolution {
    let source = resolve_source(hints.source, value);
    let classes = expand(hints.classes, value);
    let canonical = canonicalize(value);

    let css_class = classes
        .as_ref()
        .and_then(Source::as_mapping)
        .and_then(|mapping| mapping.get(canonical.as_str()))
        .cloned();

    let render_type = select_type(value, source.as_ref(), hints.render_type);
    let display = resolve_display(value, source.as_ref());

    debug!(
        "resolved {:?} as {} (canonical {:?}, {} label(s))",
        value,
        render_type,
        canonical.as_str(),
        display.len()
    );

    Resolution {
        render_type,
        canonical,
        source,
        classes,
        css_class,
        display,
    }
}
