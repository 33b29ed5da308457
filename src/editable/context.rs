//! # View Context
//!
//! The editable helper leans on the surrounding application for three answers
//! it cannot derive itself:
//!
//! - may the current user edit this record? ([`ViewContext::is_editable`])
//! - where do edits get submitted? ([`ViewContext::submit_url`])
//! - what is the human name of an attribute? ([`ViewContext::human_attribute_name`])
//!
//! Every method has a default, so a web framework only overrides what it
//! actually knows (usually authorization and routing).

use crate::inflect::{demodulize, humanize, pluralize, underscore};
use crate::model::Model;
use crate::value::Value;

pub trait ViewContext {
    /// Whether the subject renders as an editor (`false` renders plain labels).
    fn is_editable(&self, _subject: &dyn Model) -> bool {
        true
    }

    /// Submit endpoint for the subject, `/users/7` style by default.
    fn submit_url(&self, subject: &dyn Model) -> String {
        default_submit_url(subject)
    }

    /// Label for an attribute, used as the default title and placeholder.
    fn human_attribute_name(&self, _model: &str, attribute: &str) -> String {
        humanize(attribute)
    }
}

/// `/<plural model>/<id>`, or `/<plural model>` for unsaved records.
pub fn default_submit_url(subject: &dyn Model) -> String {
    let collection = pluralize(&underscore(demodulize(subject.model_name())));
    match subject.id() {
        Value::Absent => format!("/{}", collection),
        id => format!("/{}/{}", collection, id),
    }
}

/// A context with fixed answers, suitable for scripts and tests.
#[derive(Debug, Clone)]
pub struct BasicContext {
    pub editable: bool,
    pub url: Option<String>,
}

impl Default for BasicContext {
    fn default() -> Self {
        Self {
            editable: true,
            url: None,
        }
    }
}

impl BasicContext {
    pub fn read_only() -> Self {
        Self {
            editable: false,
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl ViewContext for BasicContext {
    fn is_editable(&self, _subject: &dyn Model) -> bool {
        self.editable
    }

    fn submit_url(&self, subject: &dyn Model) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => default_submit_url(subject),
        }
    }
}
