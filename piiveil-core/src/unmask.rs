// piiveil-core/src/unmask.rs
//! Reverses masking: replaces `[{LABEL}]` placeholders with the names the
//! known-entity registry records for them.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::entity::KnownEntity;

// Whole-placeholder match, so `[{PERSON_10}]` can never be read as `PERSON_1`.
static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\{([^\[\]{}]+)\}\]").expect("placeholder pattern is valid")
});

fn names_by_label(known_entities: &[KnownEntity]) -> HashMap<String, &str> {
    let mut names = HashMap::new();
    for known in known_entities {
        if let Some(label) = known.resolved_label() {
            names.entry(label).or_insert(known.name.as_str());
        }
    }
    names
}

fn unmask_with(text: &str, names: &HashMap<String, &str>) -> String {
    if names.is_empty() {
        return text.to_string();
    }
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| match names.get(&caps[1]) {
            Some(name) => (*name).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Replaces every placeholder whose label is in the registry with the
/// entity's name. Unknown placeholders are left as they are.
pub fn unmask_text(text: &str, known_entities: &[KnownEntity]) -> String {
    unmask_with(text, &names_by_label(known_entities))
}

/// Returns a copy of chat-style messages with placeholders unmasked.
///
/// String `content` is unmasked directly. List `content` has the `text` of
/// each `{"type": "text"}` part unmasked; other parts and all other message
/// fields are copied unchanged.
pub fn unmask_messages(messages: &[Value], known_entities: &[KnownEntity]) -> Vec<Value> {
    let names = names_by_label(known_entities);
    if names.is_empty() {
        return messages.to_vec();
    }
    debug!("Unmasking {} message(s) against {} label(s)", messages.len(), names.len());

    messages
        .iter()
        .map(|message| {
            let mut message = message.clone();
            match message.get_mut("content") {
                Some(Value::String(content)) => {
                    *content = unmask_with(content, &names);
                }
                Some(Value::Array(parts)) => {
                    for part in parts.iter_mut() {
                        if part.get("type").and_then(Value::as_str) != Some("text") {
                            continue;
                        }
                        if let Some(Value::String(text)) = part.get_mut("text") {
                            *text = unmask_with(text, &names);
                        }
                    }
                }
                _ => {}
            }
            message
        })
        .collect()
}
