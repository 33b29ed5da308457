//! # Editable Architecture
//!
//! Editable renders **in-place editable HTML fragments** for model attributes:
//! a `<span>` (or any tag) carrying the `data-*` metadata a client-side
//! inline-editing widget needs to turn the text into an editor.
//!
//! The hard part is not the markup, it is deciding what a raw attribute value
//! *means*: which editor to show, which string to hand the client, which
//! labels to display. That decision is kept pure and separate from everything
//! that touches configuration or HTML.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Loads records and configuration from disk                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Helper (helper.rs)                                         │
//! │  - Merges option tiers, consults the ViewContext            │
//! │  - Assembles the element, hands it to the markup crate      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Value Resolver (resolver.rs and friends)                   │
//! │  - Shorthand expansion, canonical form, type, display       │
//! │  - Pure functions: no I/O, no state, no errors              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Markup (editable-markup crate)                             │
//! │  - Element builder and minijinja templates                  │
//! │  - Owns every escaping decision                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Example
//!
//! ```rust
//! use editable::{BasicContext, Configuration, EditableHelper, JsonRecord, Options};
//! use serde_json::json;
//!
//! let config = Configuration::default();
//! let helper = EditableHelper::new(&config, BasicContext::default()).unwrap();
//! let user = JsonRecord::new("User", json!(7)).with_attribute("active", json!(true));
//!
//! let html = helper.editable(&user, "active", Options::new()).unwrap();
//! assert!(html.contains(r#"data-type="select""#));
//! assert!(html.contains(r#"data-value="1""#));
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Resolver modules**: table-style unit tests of each decision step.
//!    This is where most of the testing lives.
//! 2. **Helper**: full-markup assertions for the common attribute shapes.
//! 3. **CLI**: `tests/cli.rs` drives the binary against temp files.
//!
//! ## Module Overview
//!
//! - [`value`]: The attribute value model (`Value`, `Scalar`, `Temporal`)
//! - [`source`]: Source definitions and the shorthand expander
//! - [`canonical`]: Canonical string form sent to the client
//! - [`render_type`]: Editor types and the type selector
//! - [`display`]: Labels shown for a value
//! - [`resolver`]: Runs the four steps above for one value
//! - [`options`]: Helper options and tier merging
//! - [`config`]: Configuration file management
//! - [`model`]: The `Model` trait and a JSON-backed record
//! - [`context`]: The `ViewContext` trait (authorization, URLs, labels)
//! - [`helper`]: The `EditableHelper` entry point
//! - [`inflect`]: Name inflection used for labels, URLs and model keys
//! - [`error`]: Error types

pub mod canonical;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod helper;
pub mod inflect;
pub mod model;
pub mod options;
pub mod render_type;
pub mod resolver;
pub mod source;
pub mod value;

pub use config::Configuration;
pub use context::{BasicContext, ViewContext};
pub use error::{EditableError, Result};
pub use helper::EditableHelper;
pub use model::{JsonRecord, Model};
pub use options::Options;
pub use resolver::{resolve, ResolveHints, Resolution};
pub use value::Value;
