// piiveil-core/src/resolver.rs
//! Overlap resolution for replacement spans.
//!
//! Given candidate spans, some produced by user modifiers and the rest by
//! automatic detection, [`resolve_overlaps`] selects a non-overlapping subset:
//!
//! 1. A modifier-sourced span beats a detection-sourced span, whatever their lengths.
//! 2. Between spans of the same provenance the longer one wins.
//! 3. On equal length the span accepted first (the earlier-starting one) wins.
//!
//! Spans are visited in ascending `start_idx` order; ties keep their input
//! order. A candidate must win against every accepted span it overlaps to be
//! accepted, in which case it replaces all of them. Its first loss drops it
//! and leaves the accepted set untouched.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use crate::observer::{LogObserver, MaskingObserver};
use crate::replacement::ReplacementSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    CandidateWins,
    AcceptedWins,
}

fn judge(
    candidate: &ReplacementSpan,
    candidate_is_modifier: bool,
    accepted: &ReplacementSpan,
    accepted_is_modifier: bool,
) -> Verdict {
    match (candidate_is_modifier, accepted_is_modifier) {
        (true, false) => Verdict::CandidateWins,
        (false, true) => Verdict::AcceptedWins,
        // Same provenance: longer wins, ties go to the span accepted earlier.
        _ if candidate.len() > accepted.len() => Verdict::CandidateWins,
        _ => Verdict::AcceptedWins,
    }
}

/// Resolves overlaps, reporting discarded spans through [`LogObserver`].
pub fn resolve_overlaps(
    spans: Vec<ReplacementSpan>,
    modifier_entities: &HashSet<String>,
) -> Vec<ReplacementSpan> {
    resolve_overlaps_with(spans, modifier_entities, &LogObserver)
}

/// Resolves overlaps between `spans`, returning the accepted subset ordered by
/// ascending `start_idx`.
pub fn resolve_overlaps_with(
    spans: Vec<ReplacementSpan>,
    modifier_entities: &HashSet<String>,
    observer: &dyn MaskingObserver,
) -> Vec<ReplacementSpan> {
    if spans.len() <= 1 {
        return spans;
    }

    let mut sorted = spans;
    sorted.sort_by_key(|span| span.start_idx);

    let mut resolved: Vec<ReplacementSpan> = Vec::with_capacity(sorted.len());

    for candidate in sorted {
        let candidate_is_modifier = modifier_entities.contains(&candidate.source_entity);

        let conflicts: Vec<usize> = resolved
            .iter()
            .enumerate()
            .filter(|(_, accepted)| accepted.overlaps(&candidate))
            .map(|(idx, _)| idx)
            .collect();

        let mut defeated = Vec::with_capacity(conflicts.len());
        let mut candidate_lost = false;

        for idx in conflicts {
            let accepted = &resolved[idx];
            let accepted_is_modifier = modifier_entities.contains(&accepted.source_entity);

            match judge(&candidate, candidate_is_modifier, accepted, accepted_is_modifier) {
                Verdict::CandidateWins => defeated.push(idx),
                Verdict::AcceptedWins => {
                    observer.span_discarded(&candidate, accepted);
                    candidate_lost = true;
                    break;
                }
            }
        }

        if candidate_lost {
            continue;
        }

        // `defeated` is ascending, so removing from the back keeps indices valid.
        for idx in defeated.into_iter().rev() {
            let removed = resolved.remove(idx);
            observer.span_discarded(&removed, &candidate);
        }
        resolved.push(candidate);
    }

    resolved
}
