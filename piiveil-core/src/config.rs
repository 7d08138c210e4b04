//! Configuration management for `piiveil-core`.
//!
//! This module defines the configuration consumed by the masking pipeline:
//! which entity labels to act on, how long document text is chunked, and how
//! plain `mask` modifiers locate their text. Configurations are YAML; the
//! defaults are embedded in the library and user files are merged on top.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use log::{debug, info};

use crate::labels::LabelFilter;

/// Text chunking parameters for documents without page information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Concatenated text longer than this many characters gets chunked.
    pub chunk_threshold: usize,
    /// Characters shared between consecutive chunks.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_threshold: 1200,
            overlap: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModifierConfig {
    /// If true, plain `mask` modifiers only match whole words.
    pub word_boundary_default: bool,
}

/// Top-level configuration for piiveil.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct VeilConfig {
    pub labels: LabelFilter,
    pub chunking: ChunkingConfig,
    pub modifiers: ModifierConfig,
}

/// A partially specified configuration as read from a user file. Absent
/// sections leave the defaults in place when merged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct UserVeilConfig {
    pub labels: Option<LabelFilter>,
    pub chunking: Option<ChunkingConfig>,
    pub modifiers: Option<ModifierConfig>,
}

impl VeilConfig {
    /// Loads the embedded default configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: VeilConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a user configuration file and merges it over the defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let user: UserVeilConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let merged = merge_config(Self::load_default()?, Some(user));
        merged
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(merged)
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.chunking.chunk_size == 0 {
            errors.push("`chunking.chunk_size` must be greater than 0.".to_string());
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            errors.push(format!(
                "`chunking.overlap` ({}) must be smaller than `chunking.chunk_size` ({}).",
                self.chunking.overlap, self.chunking.chunk_size
            ));
        }
        if self.labels.detect.is_empty() {
            errors.push("`labels.detect` is empty; nothing would be masked. Use [ALL] to mask every type.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

/// Merges a user configuration over the defaults, section by section.
pub fn merge_config(default_config: VeilConfig, user_config: Option<UserVeilConfig>) -> VeilConfig {
    let Some(user) = user_config else {
        return default_config;
    };

    let mut merged = default_config;
    if let Some(labels) = user.labels {
        debug!("Overriding label filter: detect={:?}, ignore={:?}", labels.detect, labels.ignore);
        merged.labels = labels;
    }
    if let Some(chunking) = user.chunking {
        debug!("Overriding chunking settings: {:?}", chunking);
        merged.chunking = chunking;
    }
    if let Some(modifiers) = user.modifiers {
        merged.modifiers = modifiers;
    }
    merged
}
