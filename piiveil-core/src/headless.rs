// piiveil-core/src/headless.rs
//! `headless.rs`
//! Convenience wrapper for one-shot, non-interactive masking of a string.

use anyhow::{Context, Result};

use crate::config::VeilConfig;
use crate::engine::PiiVeilEngine;
use crate::entity::{Modifier, PiiEntity};

/// Masks `text` in a single call.
///
/// # Arguments
///
/// * `config` - The merged configuration (defaults + optional user overrides).
/// * `text` - The original text.
/// * `entities` - Detections with ids already assigned.
/// * `modifiers` - User overrides, located in `text` before masking.
pub fn headless_mask_string(
    config: VeilConfig,
    text: &str,
    entities: &[PiiEntity],
    modifiers: &[Modifier],
) -> Result<String> {
    let engine = PiiVeilEngine::new(config);
    engine
        .mask(text, entities, modifiers)
        .context("Failed to mask input text")
}
