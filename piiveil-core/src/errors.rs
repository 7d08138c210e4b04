//! errors.rs - Custom error types for the piiveil-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types surfaced by the `piiveil-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream exhaustive matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PiiVeilError {
    /// A detection's normalized text has no entry in the per-file entity mapping.
    #[error("No file entity mapping found for '{0}'")]
    MissingMapping(String),

    /// The mapping entry exists but `set_file_entity_ids` has not assigned an id yet.
    #[error("File entity '{0}' has no assigned id")]
    UnassignedId(String),

    #[error("Occurrence end ({end}) precedes its start ({start})")]
    InvertedOccurrence { start: usize, end: usize },

    #[error("Occurrence [{start}, {end}) is outside the text bounds [0, {len}]")]
    OccurrenceOutOfRange { start: usize, end: usize, len: usize },

    /// No id above the largest one already taken can be represented.
    #[error("Entity id space exhausted: no id available above {max_taken}")]
    IdSpaceExhausted { max_taken: u64 },
}
