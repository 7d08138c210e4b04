// piiveil-core/src/engine.rs
//! Defines `PiiVeilEngine`, which bundles a configuration and an injected
//! observer with the masking, consolidation and unmasking operations.
//!
//! The engine holds no per-document state. Each call works on its own
//! inputs, so one engine can be shared across threads; callers that update a
//! shared registry must still serialize the read-allocate-write cycle.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use log::debug;

use crate::breaks::{format_text_with_breaks, DocumentPage};
use crate::config::VeilConfig;
use crate::consolidation::{consolidate_document, ConsolidatedDocument};
use crate::entity::{KnownEntity, Modifier, PiiEntity};
use crate::errors::PiiVeilError;
use crate::masker::text_masking_with;
use crate::modifiers::apply_modifiers;
use crate::observer::{LogObserver, MaskingObserver};
use crate::unmask::unmask_text;

pub struct PiiVeilEngine {
    config: VeilConfig,
    observer: Arc<dyn MaskingObserver>,
}

impl std::fmt::Debug for PiiVeilEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PiiVeilEngine").field("config", &self.config).finish_non_exhaustive()
    }
}

impl PiiVeilEngine {
    /// Creates an engine reporting through [`LogObserver`].
    pub fn new(config: VeilConfig) -> Self {
        Self::with_observer(config, Arc::new(LogObserver))
    }

    pub fn with_observer(config: VeilConfig, observer: Arc<dyn MaskingObserver>) -> Self {
        Self { config, observer }
    }

    pub fn config(&self) -> &VeilConfig {
        &self.config
    }

    /// Full masking pipeline: label filter, modifier location, overlap
    /// resolution and placeholder substitution.
    pub fn mask(
        &self,
        text: &str,
        entities: &[PiiEntity],
        modifiers: &[Modifier],
    ) -> Result<String, PiiVeilError> {
        self.mask_with_registry(text, entities, modifiers, &[])
    }

    /// Like [`PiiVeilEngine::mask`], but fresh modifier ids are allocated
    /// above every id in `known_entities` as well.
    pub fn mask_with_registry(
        &self,
        text: &str,
        entities: &[PiiEntity],
        modifiers: &[Modifier],
        known_entities: &[KnownEntity],
    ) -> Result<String, PiiVeilError> {
        let allowed = self.config.labels.filter(entities);
        if allowed.len() != entities.len() {
            debug!("Label filter skipped {} entit(ies)", entities.len() - allowed.len());
        }
        let located = apply_modifiers(text, &allowed, modifiers, known_entities, &self.config.modifiers)?;
        text_masking_with(text, &located, modifiers, self.observer.as_ref())
    }

    /// Assigns registry-consistent ids to a document's detections and
    /// returns them with the extended registry.
    pub fn assign_ids(
        &self,
        detections: &[PiiEntity],
        known_entities: &[KnownEntity],
    ) -> Result<ConsolidatedDocument, PiiVeilError> {
        consolidate_document(detections, known_entities, self.observer.as_ref())
    }

    pub fn unmask(&self, text: &str, known_entities: &[KnownEntity]) -> String {
        unmask_text(text, known_entities)
    }

    pub fn format_documents(&self, docs: &[DocumentPage]) -> String {
        format_text_with_breaks(docs, &self.config.chunking)
    }
}
