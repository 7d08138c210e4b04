// piiveil-core/src/entity.rs
//! Core data structures describing detected PII, user modifiers and the
//! registry of previously known entities.
//!
//! Offsets in [`Occurrence`] count characters (Unicode scalar values) of the
//! original, unmodified text, never bytes.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

/// A half-open character range `[start_idx, end_idx)` within a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    pub start_idx: usize,
    pub end_idx: usize,
}

impl Occurrence {
    pub fn new(start_idx: usize, end_idx: usize) -> Self {
        Self { start_idx, end_idx }
    }

    pub fn len(&self) -> usize {
        self.end_idx.saturating_sub(self.start_idx)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sensitive item detected in a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PiiEntity {
    /// Category tag, e.g. `PERSON` or `EMAIL`.
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Surface text used for matching. May already be normalized by the detector.
    pub text: String,
    /// Surface text exactly as found in the document, when the detector reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub occurrences: Vec<Occurrence>,
}

impl PiiEntity {
    pub fn new(entity_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self.label = Some(format_label(&self.entity_type, id));
        self
    }

    pub fn with_occurrence(mut self, start_idx: usize, end_idx: usize) -> Self {
        self.occurrences.push(Occurrence::new(start_idx, end_idx));
        self
    }

    /// The key used for registry matching: the lower-cased surface text.
    pub fn normalized(&self) -> String {
        normalize(&self.text)
    }

    /// `TYPE_ID` once an id is assigned, the bare type before that.
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => format_label(&self.entity_type, id),
            None => self.entity_type.clone(),
        }
    }

    /// The original surface text, falling back to `text` when the detector
    /// did not report a raw form.
    pub fn display_text(&self) -> &str {
        self.raw_text.as_deref().unwrap_or(&self.text)
    }
}

/// What a [`Modifier`] asks the masker to do with its entity string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModifierAction {
    #[default]
    Mask,
    Ignore,
    StringMask,
    WordMask,
}

/// A user override for a literal surface text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(default)]
    pub action: ModifierAction,
    pub entity: String,
    #[serde(rename = "type")]
    pub entity_type: String,
}

impl Modifier {
    pub fn new(action: ModifierAction, entity: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            action,
            entity: entity.into(),
            entity_type: entity_type.into(),
        }
    }
}

/// A registry record for an entity seen in an earlier document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownEntity {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
}

impl KnownEntity {
    pub fn new(id: u64, name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            label: Some(label.into()),
            entity_type: None,
        }
    }

    /// The entity type recorded for this entry.
    ///
    /// Derived from the label's first `_`-separated segment, so `PERSON_1`
    /// yields `PERSON` and `PHONE_NUMBER_4` yields `PHONE`. Falls back to the
    /// explicit `type` field when there is no label.
    pub fn resolved_type(&self) -> Option<String> {
        match self.label.as_deref() {
            Some(label) => Some(type_from_label(label).to_string()),
            None => self.entity_type.clone(),
        }
    }

    /// The placeholder label for this entry: the stored label, or `TYPE_ID`.
    pub fn resolved_label(&self) -> Option<String> {
        self.label
            .clone()
            .or_else(|| self.entity_type.as_deref().map(|t| format_label(t, self.id)))
    }
}

/// Lower-cases a surface text for case-insensitive exact matching.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

pub fn format_label(entity_type: &str, id: u64) -> String {
    format!("{}_{}", entity_type, id)
}

/// The literal placeholder written into masked text, e.g. `[{PERSON_1}]`.
pub fn placeholder(label: &str) -> String {
    format!("[{{{}}}]", label)
}

fn type_from_label(label: &str) -> &str {
    label.split('_').next().unwrap_or(label)
}
