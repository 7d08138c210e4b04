// piiveil-core/src/modifiers.rs
//! Turns user modifiers into occurrence-bearing entities.
//!
//! `mask`/`string-mask` modifiers mark every literal occurrence of their
//! entity string, `word-mask` only whole-word occurrences, and `ignore`
//! removes matching detections. The located entities carry the modifier's
//! entity string as their `text`, which is what makes the resolver treat
//! their spans as modifier-sourced.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

use log::debug;

use crate::config::ModifierConfig;
use crate::consolidation::IdAllocator;
use crate::entity::{normalize, KnownEntity, Modifier, ModifierAction, Occurrence, PiiEntity};
use crate::errors::PiiVeilError;
use crate::replacement::loggable;

/// Applies `modifiers` to the detections of `text`, returning the detections
/// that survive `ignore` modifiers followed by one entity per matching mask
/// modifier.
///
/// A located entity reuses the id of an entity with the same normalized text
/// when there is one; otherwise ids continue from the largest id held by the
/// entities or by `known_entities`, so a modifier placeholder never collides
/// with a registry label.
pub fn apply_modifiers(
    text: &str,
    entities: &[PiiEntity],
    modifiers: &[Modifier],
    known_entities: &[KnownEntity],
    config: &ModifierConfig,
) -> Result<Vec<PiiEntity>, PiiVeilError> {
    let ignored: Vec<String> = modifiers
        .iter()
        .filter(|m| m.action == ModifierAction::Ignore && !m.entity.is_empty())
        .map(|m| normalize(&m.entity))
        .collect();

    let mut result: Vec<PiiEntity> = entities
        .iter()
        .filter(|e| !ignored.contains(&e.normalized()))
        .cloned()
        .collect();

    if result.len() != entities.len() {
        debug!("Ignore modifiers removed {} detection(s)", entities.len() - result.len());
    }

    let mut ids_by_text: HashMap<String, u64> = HashMap::new();
    for entity in entities {
        if let Some(id) = entity.id {
            ids_by_text.entry(entity.normalized()).or_insert(id);
        }
    }
    let mut ids = IdAllocator::above(
        entities
            .iter()
            .filter_map(|e| e.id)
            .chain(known_entities.iter().map(|known| known.id)),
    );

    for modifier in modifiers {
        if modifier.entity.is_empty() {
            continue;
        }
        let whole_words = match modifier.action {
            ModifierAction::Ignore => continue,
            ModifierAction::WordMask => true,
            ModifierAction::StringMask => false,
            ModifierAction::Mask => config.word_boundary_default,
        };

        let occurrences = locate(text, &modifier.entity, whole_words);
        if occurrences.is_empty() {
            debug!("Modifier '{}' has no match in text", loggable(&modifier.entity));
            continue;
        }

        let key = normalize(&modifier.entity);
        let id = match ids_by_text.get(&key) {
            Some(&id) => id,
            None => {
                let id = ids.next_id()?;
                ids_by_text.insert(key, id);
                id
            }
        };

        debug!(
            "Modifier '{}' located {} time(s) as {}",
            loggable(&modifier.entity),
            occurrences.len(),
            modifier.entity_type
        );

        let mut located = PiiEntity::new(modifier.entity_type.clone(), modifier.entity.clone()).with_id(id);
        located.occurrences = occurrences;
        result.push(located);
    }

    Ok(result)
}

/// Non-overlapping, case-sensitive occurrences of `needle` in `haystack`, as
/// character offsets, scanning left to right.
pub fn locate(haystack: &str, needle: &str, whole_words: bool) -> Vec<Occurrence> {
    if needle.is_empty() {
        return Vec::new();
    }

    let needle_chars = needle.chars().count();
    let mut occurrences = Vec::new();
    let mut last_byte = 0;
    let mut last_char = 0;

    for (byte_idx, matched) in haystack.match_indices(needle) {
        if whole_words && !is_word_bounded(haystack, byte_idx, byte_idx + matched.len()) {
            continue;
        }
        last_char += haystack[last_byte..byte_idx].chars().count();
        last_byte = byte_idx;
        occurrences.push(Occurrence::new(last_char, last_char + needle_chars));
    }
    occurrences
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
