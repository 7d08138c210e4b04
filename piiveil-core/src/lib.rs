// piiveil-core/src/lib.rs
//! # piiveil Core Library
//!
//! `piiveil-core` provides the deterministic, platform-independent logic for
//! de-identifying text. Given a text and the sensitive entities an external
//! detector found in it, it produces a masked text in which every entity
//! occurrence is replaced by a literal `[{TYPE_ID}]` placeholder. It also keeps
//! entity identifiers stable across documents by reconciling each document's
//! detections with a registry of previously known entities.
//!
//! The library performs no I/O beyond loading its own configuration. Entity
//! detection and registry persistence belong to the caller.
//!
//! ## Modules
//!
//! * `entity`: Occurrences, detected entities, modifiers and known-entity records.
//! * `replacement`: Replacement spans and PII-safe log rendering.
//! * `resolver`: Overlap resolution between modifier- and detection-sourced spans.
//! * `masker`: Builds spans from entities and applies them to the text.
//! * `modifiers`: Locates user modifiers in the text as occurrence-bearing entities.
//! * `consolidation`: Assigns registry-consistent ids to a document's entities.
//! * `unmask`: Replaces placeholders with registry names again.
//! * `labels`: Restricts masking to selected entity types.
//! * `breaks`: Page and chunk markers for concatenated document text.
//! * `observer`: The `MaskingObserver` hook injected into every component.
//! * `config`: YAML configuration with embedded defaults.
//! * `engine`: `PiiVeilEngine`, the configured pipeline.
//! * `headless`: One-shot convenience wrapper.
//!
//! ## Usage Example
//!
//! ```rust
//! use piiveil_core::{PiiEntity, KnownEntity, VeilConfig, PiiVeilEngine};
//!
//! fn main() -> anyhow::Result<()> {
//!     let engine = PiiVeilEngine::new(VeilConfig::load_default()?);
//!
//!     let text = "Hello John Doe, your email is john@example.com";
//!     let detections = vec![
//!         PiiEntity::new("PERSON", "JOHN DOE").with_occurrence(6, 14),
//!         PiiEntity::new("EMAIL", "john@example.com").with_occurrence(30, 46),
//!     ];
//!     let known = vec![KnownEntity::new(1, "John Doe", "PERSON_1")];
//!
//!     let doc = engine.assign_ids(&detections, &known)?;
//!     let masked = engine.mask(text, &doc.entities, &[])?;
//!     assert_eq!(masked, "Hello [{PERSON_1}], your email is [{EMAIL_2}]");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Core operations return [`PiiVeilError`]. Configuration loading and the
//! headless wrapper use `anyhow::Error` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod breaks;
pub mod config;
pub mod consolidation;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod headless;
pub mod labels;
pub mod masker;
pub mod modifiers;
pub mod observer;
pub mod replacement;
pub mod resolver;
pub mod unmask;

/// Re-exports the data model.
pub use entity::{
    format_label,
    normalize,
    placeholder,
    KnownEntity,
    Modifier,
    ModifierAction,
    Occurrence,
    PiiEntity,
};

pub use errors::PiiVeilError;

pub use config::{merge_config, ChunkingConfig, ModifierConfig, UserVeilConfig, VeilConfig};
pub use labels::LabelFilter;

pub use replacement::ReplacementSpan;
pub use resolver::{resolve_overlaps, resolve_overlaps_with};
pub use masker::{text_masking, text_masking_with};
pub use modifiers::apply_modifiers;

pub use consolidation::{
    build_file_entities,
    consolidate_document,
    consolidate_pii_data,
    set_file_entity_ids,
    set_file_entity_ids_with,
    update_registry,
    ConsolidatedDocument,
    FileEntities,
};

pub use unmask::{unmask_messages, unmask_text};
pub use breaks::{format_text_with_breaks, DocumentPage, PageMarker};

pub use observer::{LogObserver, MaskingObserver, NoopObserver};
pub use engine::PiiVeilEngine;
pub use headless::headless_mask_string;
