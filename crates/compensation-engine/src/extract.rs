//! Field extraction from OCR text
//!
//! A best-effort, recall-oriented scanner: every synonym of every field is
//! tried against every line, and each successful capture replaces whatever
//! the field held before. Extracted values are provisional.
//!
//! The replacement rule means a weak synonym on a later line (for example
//! `payment` after `compensation`) silently wins over an earlier, better
//! formed value. Keeping the first match or the longest capture would be
//! stricter, but existing records were produced with last-match-wins, so
//! the behavior stays until there is a confidence score to decide with.

use crate::labels::FieldKind;
use crate::normalize::clean_value;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

struct LabelPattern {
    kind: FieldKind,
    label: &'static str,
    regex: Regex,
}

lazy_static! {
    /// One pattern per (field, synonym), in dictionary order
    static ref LABEL_PATTERNS: Vec<LabelPattern> = FieldKind::ALL
        .into_iter()
        .flat_map(|kind| {
            kind.synonyms().iter().map(move |&label| LabelPattern {
                kind,
                label,
                regex: Regex::new(&format!(
                    r"{}[:\-\s]*([\w\s.,/-]+)",
                    regex::escape(label)
                ))
                .unwrap(),
            })
        })
        .collect();
}

/// Canonical field name to cleaned value
///
/// Fields that never matched are absent rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedFields {
    values: BTreeMap<FieldKind, String>,
}

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: FieldKind) -> Option<&str> {
        self.values.get(&kind).map(String::as_str)
    }

    /// Owned copy of a field, for building records
    pub fn get_owned(&self, kind: FieldKind) -> Option<String> {
        self.values.get(&kind).cloned()
    }

    pub fn contains(&self, kind: FieldKind) -> bool {
        self.values.contains_key(&kind)
    }

    /// Sets a field, returning the value it replaced
    pub fn insert(&mut self, kind: FieldKind, value: impl Into<String>) -> Option<String> {
        self.values.insert(kind, value.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Extract labelled fields from raw OCR text
///
/// The text is lower-cased and split on `\n`. For each field, each synonym
/// and each line (in that nesting order) a line containing the synonym is
/// searched for `synonym [:\-\s]* value`, where the value is a run of word
/// characters, whitespace, `,`, `.`, `/` and `-`. A capture is cleaned with
/// [`clean_value`] and overwrites any earlier value for the field.
///
/// Never fails: an unrecognized field is simply missing from the result.
pub fn extract_fields(text: &str) -> ExtractedFields {
    let lowered = text.to_lowercase();
    let lines: Vec<&str> = lowered.split('\n').collect();
    let mut fields = ExtractedFields::new();

    for pattern in LABEL_PATTERNS.iter() {
        for (line_idx, line) in lines.iter().enumerate() {
            if !line.contains(pattern.label) {
                continue;
            }

            let Some(capture) = pattern.regex.captures(line).and_then(|c| c.get(1)) else {
                continue;
            };

            let value = clean_value(capture.as_str());
            debug!(
                field = %pattern.kind,
                label = pattern.label,
                line = line_idx + 1,
                value = %value,
                "label matched"
            );

            if let Some(previous) = fields.insert(pattern.kind, value) {
                debug!(field = %pattern.kind, previous = %previous, "earlier value replaced");
            }
        }
    }

    fields
}
