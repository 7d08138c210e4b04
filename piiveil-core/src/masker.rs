// piiveil-core/src/masker.rs
//! Text masking: turns entity detections and modifiers into replacement spans,
//! resolves their overlaps and writes `[{TYPE_ID}]` placeholders into the text.
//!
//! Occurrence offsets count characters of the original text. They are
//! validated against the text before anything is replaced; an out-of-range or
//! inverted occurrence fails the whole call instead of being truncated.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use log::trace;

use crate::entity::{placeholder, Modifier, PiiEntity};
use crate::errors::PiiVeilError;
use crate::observer::{LogObserver, MaskingObserver};
use crate::replacement::ReplacementSpan;
use crate::resolver::resolve_overlaps_with;

/// Masks `text` using [`LogObserver`] for diagnostics.
pub fn text_masking(
    text: &str,
    entities: &[PiiEntity],
    modifiers: &[Modifier],
) -> Result<String, PiiVeilError> {
    text_masking_with(text, entities, modifiers, &LogObserver)
}

/// Replaces every resolved entity occurrence in `text` with its placeholder.
///
/// Spans whose source text matches a modifier's `entity` take precedence over
/// detections during overlap resolution. The input text and entities are
/// left untouched.
pub fn text_masking_with(
    text: &str,
    entities: &[PiiEntity],
    modifiers: &[Modifier],
    observer: &dyn MaskingObserver,
) -> Result<String, PiiVeilError> {
    let modifier_entities = collect_modifier_entities(modifiers);
    let spans = build_replacements(entities);

    let char_len = text.chars().count();
    for span in &spans {
        validate_span(span, char_len)?;
    }

    let resolved = resolve_overlaps_with(spans, &modifier_entities, observer);
    trace!("{} replacement span(s) survived overlap resolution", resolved.len());

    Ok(apply_replacements(text, resolved, observer))
}

/// The set of non-empty modifier surface strings.
pub fn collect_modifier_entities(modifiers: &[Modifier]) -> HashSet<String> {
    modifiers
        .iter()
        .filter(|m| !m.entity.is_empty())
        .map(|m| m.entity.clone())
        .collect()
}

/// One replacement span per entity occurrence, in entity then occurrence order.
pub fn build_replacements(entities: &[PiiEntity]) -> Vec<ReplacementSpan> {
    entities
        .iter()
        .flat_map(|entity| {
            let replacement = placeholder(&entity.label());
            entity.occurrences.iter().map(move |occ| {
                ReplacementSpan::new(occ.start_idx, occ.end_idx, replacement.clone(), entity.text.clone())
            })
        })
        .collect()
}

fn validate_span(span: &ReplacementSpan, char_len: usize) -> Result<(), PiiVeilError> {
    if span.end_idx < span.start_idx {
        return Err(PiiVeilError::InvertedOccurrence {
            start: span.start_idx,
            end: span.end_idx,
        });
    }
    if span.end_idx > char_len {
        return Err(PiiVeilError::OccurrenceOutOfRange {
            start: span.start_idx,
            end: span.end_idx,
            len: char_len,
        });
    }
    Ok(())
}

/// Applies already validated, non-overlapping spans from right to left so
/// the offsets of spans not yet applied stay valid.
fn apply_replacements(
    text: &str,
    mut spans: Vec<ReplacementSpan>,
    observer: &dyn MaskingObserver,
) -> String {
    // Byte offset of every char boundary, including the end of the text.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(byte_idx, _)| byte_idx)
        .chain(std::iter::once(text.len()))
        .collect();

    spans.sort_by(|a, b| b.start_idx.cmp(&a.start_idx));

    let mut masked = text.to_string();
    for span in &spans {
        observer.span_applied(span);
        let start = boundaries[span.start_idx];
        let end = boundaries[span.end_idx];
        masked.replace_range(start..end, &span.replacement);
    }
    masked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ModifierAction;
    use crate::observer::recording::RecordingObserver;

    #[test]
    fn test_masks_person_and_email() {
        let text = "Hello John Doe, your email is john@example.com";
        let entities = vec![
            PiiEntity::new("PERSON", "John Doe").with_id(1).with_occurrence(6, 14),
            PiiEntity::new("EMAIL", "john@example.com").with_id(2).with_occurrence(30, 46),
        ];
        let masked = text_masking(text, &entities, &[]).unwrap();
        assert_eq!(masked, "Hello [{PERSON_1}], your email is [{EMAIL_2}]");
    }

    #[test]
    fn test_overlapping_detections_keep_longer_span() {
        let text = "John Doe Smith";
        let entities = vec![
            PiiEntity::new("PERSON", "John Doe").with_id(1).with_occurrence(0, 8),
            PiiEntity::new("PERSON", "Doe Smith").with_id(2).with_occurrence(5, 14),
        ];
        let masked = text_masking(text, &entities, &[]).unwrap();
        assert_eq!(masked, "John [{PERSON_2}]");
        assert!(!masked.contains("PERSON_1"));
    }

    #[test]
    fn test_modifier_sourced_span_wins_overlap() {
        let text = "Call Acme Corp today";
        let entities = vec![
            PiiEntity::new("ORG", "Acme Corp").with_id(1).with_occurrence(5, 14),
            PiiEntity::new("BRAND", "Acme").with_id(2).with_occurrence(5, 9),
        ];
        let modifiers = vec![Modifier::new(ModifierAction::Mask, "Acme", "BRAND")];
        let masked = text_masking(text, &entities, &modifiers).unwrap();
        assert_eq!(masked, "Call [{BRAND_2}] Corp today");
    }

    #[test]
    fn test_entity_without_occurrences_contributes_nothing() {
        let entities = vec![PiiEntity::new("PERSON", "Nobody").with_id(3)];
        assert_eq!(text_masking("plain text", &entities, &[]).unwrap(), "plain text");
    }

    #[test]
    fn test_zero_length_occurrence_inserts_placeholder() {
        let entities = vec![PiiEntity::new("MARK", "").with_id(1).with_occurrence(2, 2)];
        assert_eq!(text_masking("abcd", &entities, &[]).unwrap(), "ab[{MARK_1}]cd");
    }

    #[test]
    fn test_character_offsets_with_multibyte_text() {
        let text = "Grüße an Jürgen!";
        let entities = vec![PiiEntity::new("PERSON", "Jürgen").with_id(4).with_occurrence(9, 15)];
        assert_eq!(text_masking(text, &entities, &[]).unwrap(), "Grüße an [{PERSON_4}]!");
    }

    #[test]
    fn test_out_of_range_occurrence_fails_fast() {
        let entities = vec![PiiEntity::new("PERSON", "x").with_id(1).with_occurrence(2, 50)];
        let err = text_masking("short", &entities, &[]).unwrap_err();
        assert!(matches!(err, PiiVeilError::OccurrenceOutOfRange { start: 2, end: 50, len: 5 }));
    }

    #[test]
    fn test_inverted_occurrence_fails_fast() {
        let entities = vec![PiiEntity::new("PERSON", "x").with_id(1).with_occurrence(4, 1)];
        let err = text_masking("short", &entities, &[]).unwrap_err();
        assert!(matches!(err, PiiVeilError::InvertedOccurrence { start: 4, end: 1 }));
    }

    #[test]
    fn test_masked_output_is_stable_without_entities() {
        let once = "Hello [{PERSON_1}], your email is [{EMAIL_2}]";
        assert_eq!(text_masking(once, &[], &[]).unwrap(), once);
    }

    #[test]
    fn test_observer_sees_spans_right_to_left() {
        let observer = RecordingObserver::default();
        let entities = vec![
            PiiEntity::new("A", "a").with_id(1).with_occurrence(0, 1),
            PiiEntity::new("B", "b").with_id(2).with_occurrence(2, 3),
        ];
        text_masking_with("a b", &entities, &[], &observer).unwrap();
        let applied = observer.applied.lock().unwrap();
        let starts: Vec<usize> = applied.iter().map(|s| s.start_idx).collect();
        assert_eq!(starts, vec![2, 0]);
    }
}
