pub mod consolidate;
pub mod format;
pub mod mask;
pub mod unmask;

use anyhow::Result;
use std::path::Path;

use piiveil_core::VeilConfig;

/// The embedded defaults, merged with a user file when one is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<VeilConfig> {
    match path {
        Some(path) => VeilConfig::load_from_file(path),
        None => VeilConfig::load_default(),
    }
}
