// piiveil/src/commands/mask.rs
//! `piiveil mask`: masks the entities of a JSON request.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use piiveil_core::{KnownEntity, Modifier, PiiEntity, PiiVeilEngine};

use crate::cli::MaskCommand;
use crate::commands::load_config;
use crate::utils::io::{read_json, write_output};

/// Input accepted by `piiveil mask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskRequest {
    pub text: String,
    #[serde(default)]
    pub entities: Vec<PiiEntity>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    /// Registry snapshot; fresh modifier ids are allocated above its ids.
    #[serde(default)]
    pub registry: Vec<KnownEntity>,
}

pub fn run_mask(cmd: &MaskCommand) -> Result<()> {
    info!("Starting mask operation.");
    let config = load_config(cmd.config.as_deref())?;
    let request: MaskRequest = read_json(cmd.input.as_deref())?;
    debug!(
        "Mask request: {} chars, {} entit(ies), {} modifier(s)",
        request.text.chars().count(),
        request.entities.len(),
        request.modifiers.len()
    );

    let masked = mask_request(&PiiVeilEngine::new(config), &request)?;
    write_output(cmd.output.as_deref(), &masked)?;
    info!("Mask operation completed.");
    Ok(())
}

pub fn mask_request(engine: &PiiVeilEngine, request: &MaskRequest) -> Result<String> {
    engine
        .mask_with_registry(&request.text, &request.entities, &request.modifiers, &request.registry)
        .context("Masking failed")
}
