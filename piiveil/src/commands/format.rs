// piiveil/src/commands/format.rs
//! `piiveil format`: concatenates documents with page or chunk markers.

use anyhow::Result;

use piiveil_core::{DocumentPage, PiiVeilEngine};

use crate::cli::FormatCommand;
use crate::commands::load_config;
use crate::utils::io::{read_json, write_output};

pub fn run_format(cmd: &FormatCommand) -> Result<()> {
    let engine = PiiVeilEngine::new(load_config(cmd.config.as_deref())?);
    let docs: Vec<DocumentPage> = read_json(cmd.input.as_deref())?;
    write_output(cmd.output.as_deref(), &engine.format_documents(&docs))
}
