// piiveil-core/tests/masking_properties.rs
//! Property tests for overlap resolution and id consolidation.

use std::collections::HashSet;

use proptest::prelude::*;

use piiveil_core::{
    build_file_entities, consolidate_pii_data, resolve_overlaps, set_file_entity_ids, KnownEntity,
    PiiEntity, ReplacementSpan,
};

fn span(start: usize, len: usize, source: &str) -> ReplacementSpan {
    ReplacementSpan::new(start, start + len, format!("[{{{}}}]", source), source)
}

/// Disjoint spans laid out from a list of (gap, length) pairs.
fn disjoint_spans(layout: &[(usize, usize)]) -> Vec<ReplacementSpan> {
    let mut cursor = 0;
    layout
        .iter()
        .enumerate()
        .map(|(i, &(gap, len))| {
            let s = span(cursor + gap, len, &format!("e{}", i));
            cursor = s.end_idx;
            s
        })
        .collect()
}

proptest! {
    #[test]
    fn non_overlapping_input_is_returned_sorted(
        layout in prop::collection::vec((0usize..5, 1usize..6), 0..12),
        seed in any::<u64>(),
    ) {
        let ordered = disjoint_spans(&layout);
        let mut shuffled = ordered.clone();
        if !shuffled.is_empty() {
            let k = (seed as usize) % shuffled.len();
            shuffled.rotate_left(k);
            shuffled.reverse();
        }
        let out = resolve_overlaps(shuffled, &HashSet::new());
        prop_assert_eq!(out, ordered);
    }

    #[test]
    fn output_never_overlaps(
        raw in prop::collection::vec((0usize..40, 0usize..10, any::<bool>()), 0..20),
    ) {
        let mut modifiers = HashSet::new();
        let spans: Vec<ReplacementSpan> = raw
            .iter()
            .enumerate()
            .map(|(i, &(start, len, is_mod))| {
                let name = format!("s{}", i);
                if is_mod {
                    modifiers.insert(name.clone());
                }
                span(start, len, &name)
            })
            .collect();
        let out = resolve_overlaps(spans, &modifiers);
        for (i, a) in out.iter().enumerate() {
            for b in out.iter().skip(i + 1) {
                prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn modifier_beats_detection_whatever_the_length(
        mod_start in 0usize..20, mod_len in 1usize..10,
        det_start in 0usize..20, det_len in 1usize..30,
    ) {
        let modifier = span(mod_start, mod_len, "mod");
        let detection = span(det_start, det_len, "det");
        prop_assume!(modifier.overlaps(&detection));
        let modifiers = HashSet::from(["mod".to_string()]);

        let out = resolve_overlaps(vec![detection.clone(), modifier.clone()], &modifiers);
        prop_assert_eq!(out, vec![modifier]);
    }

    #[test]
    fn longer_detection_wins(
        a_start in 0usize..20, a_len in 1usize..15,
        b_start in 0usize..20, b_len in 1usize..15,
    ) {
        let a = span(a_start, a_len, "a");
        let b = span(b_start, b_len, "b");
        prop_assume!(a.overlaps(&b) && a_len != b_len);
        let longer = if a_len > b_len { a.clone() } else { b.clone() };

        let out = resolve_overlaps(vec![a, b], &HashSet::new());
        prop_assert_eq!(out, vec![longer]);
    }

    #[test]
    fn equal_length_modifiers_keep_the_earlier_start(
        a_start in 0usize..20, b_start in 0usize..20, len in 1usize..10,
    ) {
        let a = span(a_start, len, "m_a");
        let b = span(b_start, len, "m_b");
        prop_assume!(a_start != b_start && a.overlaps(&b));
        let earlier = if a_start < b_start { a.clone() } else { b.clone() };
        let modifiers = HashSet::from(["m_a".to_string(), "m_b".to_string()]);

        let out = resolve_overlaps(vec![b, a], &modifiers);
        prop_assert_eq!(out, vec![earlier]);
    }

    #[test]
    fn consolidated_ids_respect_registry(
        known_names in prop::collection::hash_set("[a-z]{3,6}", 0..6),
        fresh_names in prop::collection::hash_set("[A-Z]{7,9}", 0..6),
        known_offset in 1u64..50,
    ) {
        let known: Vec<KnownEntity> = known_names
            .iter()
            .enumerate()
            .map(|(i, name)| KnownEntity::new(known_offset + i as u64, name.clone(), format!("PERSON_{}", known_offset + i as u64)))
            .collect();
        let max_known = known.iter().map(|k| k.id).max().unwrap_or(0);

        let detections: Vec<PiiEntity> = known_names
            .iter()
            .map(|n| n.to_uppercase())
            .chain(fresh_names.iter().cloned())
            .map(|name| PiiEntity::new("PERSON", name).with_occurrence(0, 1))
            .collect();

        let resolved = set_file_entity_ids(&build_file_entities(&detections), &known).unwrap();
        let out = consolidate_pii_data(&detections, &resolved).unwrap();

        let mut fresh_ids = HashSet::new();
        for entity in &out {
            let id = entity.id.unwrap();
            match known.iter().find(|k| k.name == entity.text.to_lowercase()) {
                Some(k) => prop_assert_eq!(id, k.id),
                None => {
                    prop_assert!(id > max_known);
                    prop_assert!(fresh_ids.insert(id), "duplicate fresh id {}", id);
                }
            }
        }
    }
}
