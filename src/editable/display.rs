//! Display label resolution.
//!
//! Produces the human-readable labels shown while the element is not being
//! edited. Lookups never fail: a key missing from the mapping leaves a hole
//! (`None`) in the sequence, which the markup layer renders as empty text.

use crate::canonical::canonicalize;
use crate::source::{Record, Source, SourceDef, RECORD_ID_FIELD};
use crate::value::Value;
use log::warn;

/// Labels to show, one per item of the value. `None` marks a missing label.
pub type DisplaySequence = Vec<Option<String>>;

/// Resolves the display labels for a value.
///
/// - mapping: each item is canonicalized and looked up
/// - records: the whole value is matched against each record's `id`; the
///   first match's other fields are the labels, no match gives no labels
/// - no mapping (or an unexpanded label list): each item's own string form
///
/// Any non-absent value yields at least one entry. An empty list yields a
/// single empty label.
pub fn resolve_display(value: &Value, source: Option<&Source>) -> DisplaySequence {
    match source {
        Some(Source::Mapping(mapping)) => {
            let labels: DisplaySequence = value
                .items()
                .into_iter()
                .map(|item| mapping.get(canonicalize(item).as_str()).cloned())
                .collect();
            non_empty(value, labels)
        }
        Some(Source::Passthrough(SourceDef::Records(records))) => record_labels(value, records),
        Some(Source::Passthrough(SourceDef::Labels(_) | SourceDef::Mapping(_))) | None => {
            let labels: DisplaySequence = value
                .items()
                .into_iter()
                .map(|item| Some(item.to_string()))
                .collect();
            non_empty(value, labels)
        }
    }
}

fn record_labels(value: &Value, records: &[Record]) -> DisplaySequence {
    let found = records
        .iter()
        .find(|record| record.get(RECORD_ID_FIELD) == Some(value));

    match found {
        Some(record) => record
            .values()
            .filter(|field| *field != value)
            .map(|field| Some(field.to_string()))
            .collect(),
        None => {
            warn!("no source record has {} = {:?}", RECORD_ID_FIELD, value);
            Vec::new()
        }
    }
}

fn non_empty(value: &Value, labels: DisplaySequence) -> DisplaySequence {
    if labels.is_empty() && !value.is_absent() {
        vec![Some(String::new())]
    } else {
        labels
    }
}

/// Flattens a display sequence into strings, holes becoming empty text.
pub fn display_strings(display: &[Option<String>]) -> Vec<String> {
    display
        .iter()
        .map(|label| label.clone().unwrap_or_default())
        .collect()
}
