// piiveil/src/utils/io.rs
//! File and stdin helpers shared by the commands.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use piiveil_core::KnownEntity;

/// Reads a file, or all of stdin when `path` is `None`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: Option<&Path>) -> Result<T> {
    let raw = read_input(path)?;
    let source = path.map(|p| p.display().to_string()).unwrap_or_else(|| "stdin".to_string());
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse JSON from {}", source))
}

/// Writes `content` plus a trailing newline to a file or stdout.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            info!("Writing output to file: {}", path.display());
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            writeln!(file, "{}", content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writeln!(writer, "{}", content)?;
        }
    }
    Ok(())
}

pub fn write_json<T: Serialize + ?Sized>(path: Option<&Path>, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    write_output(path, &rendered)
}

/// Loads the known-entity registry; a missing file is an empty registry.
pub fn load_registry(path: &Path) -> Result<Vec<KnownEntity>> {
    if !path.exists() {
        debug!("Registry {} does not exist yet; starting empty.", path.display());
        return Ok(Vec::new());
    }
    read_json(Some(path))
}

/// Replaces the registry file atomically by writing a sibling temp file first.
pub fn save_registry(path: &Path, registry: &[KnownEntity]) -> Result<()> {
    let rendered = serde_json::to_string_pretty(registry).context("Failed to serialize registry")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, rendered)
        .with_context(|| format!("Failed to write registry to {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace registry at {}", path.display()))?;
    info!("Registry with {} entit(ies) saved to {}", registry.len(), path.display());
    Ok(())
}
