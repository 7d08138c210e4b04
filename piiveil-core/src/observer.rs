// piiveil-core/src/observer.rs
//! Defines the `MaskingObserver` trait through which the masking and
//! consolidation components report what they do.
//!
//! Components receive an observer as an argument instead of writing to a
//! process-wide logger directly, so callers decide where events go. The
//! default [`LogObserver`] forwards to the `log` facade with PII redacted;
//! [`NoopObserver`] discards everything.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::replacement::{loggable, ReplacementSpan};

/// Receives events from the resolver, masker and consolidator.
///
/// Every hook has an empty default body, so implementors only override the
/// events they care about.
pub trait MaskingObserver: Send + Sync {
    /// A candidate or previously accepted span lost an overlap conflict.
    fn span_discarded(&self, _discarded: &ReplacementSpan, _kept: &ReplacementSpan) {}

    /// A span was written into the output text.
    fn span_applied(&self, _span: &ReplacementSpan) {}

    /// An id was attached to a file entity. `reused` is true when the id came
    /// from the known-entity registry rather than a fresh allocation.
    fn id_assigned(&self, _key: &str, _id: u64, _reused: bool) {}
}

/// Forwards every event to `log::debug!`, redacting surface text unless
/// `PIIVEIL_ALLOW_DEBUG_PII=true`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl MaskingObserver for LogObserver {
    fn span_discarded(&self, discarded: &ReplacementSpan, kept: &ReplacementSpan) {
        debug!(
            "Overlap resolved: dropped [{}, {}) source='{}' in favour of [{}, {}) source='{}'",
            discarded.start_idx,
            discarded.end_idx,
            loggable(&discarded.source_entity),
            kept.start_idx,
            kept.end_idx,
            loggable(&kept.source_entity),
        );
    }

    fn span_applied(&self, span: &ReplacementSpan) {
        debug!(
            "Replacing [{}, {}) source='{}' with '{}'",
            span.start_idx,
            span.end_idx,
            loggable(&span.source_entity),
            span.replacement,
        );
    }

    fn id_assigned(&self, key: &str, id: u64, reused: bool) {
        debug!(
            "Entity '{}' assigned id {} ({})",
            loggable(key),
            id,
            if reused { "known" } else { "new" }
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MaskingObserver for NoopObserver {}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Captures events for assertions in unit tests.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub discarded: Mutex<Vec<(ReplacementSpan, ReplacementSpan)>>,
        pub applied: Mutex<Vec<ReplacementSpan>>,
        pub assigned: Mutex<Vec<(String, u64, bool)>>,
    }

    impl MaskingObserver for RecordingObserver {
        fn span_discarded(&self, discarded: &ReplacementSpan, kept: &ReplacementSpan) {
            self.discarded.lock().unwrap().push((discarded.clone(), kept.clone()));
        }

        fn span_applied(&self, span: &ReplacementSpan) {
            self.applied.lock().unwrap().push(span.clone());
        }

        fn id_assigned(&self, key: &str, id: u64, reused: bool) {
            self.assigned.lock().unwrap().push((key.to_string(), id, reused));
        }
    }
}
