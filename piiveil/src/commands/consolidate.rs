// piiveil/src/commands/consolidate.rs
//! `piiveil consolidate`: assigns registry-consistent ids to detections.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::info;

use piiveil_core::{PiiEntity, PiiVeilEngine, VeilConfig};

use crate::cli::ConsolidateCommand;
use crate::ui::output_format;
use crate::utils::io::{load_registry, read_json, save_registry, write_json};

pub fn run_consolidate(cmd: &ConsolidateCommand) -> Result<()> {
    let detections: Vec<PiiEntity> = read_json(Some(cmd.detections.as_path()))?;
    let known = load_registry(&cmd.registry)?;
    info!(
        "Consolidating {} detection(s) against {} known entit(ies).",
        detections.len(),
        known.len()
    );

    let engine = PiiVeilEngine::new(VeilConfig::default());
    let doc = engine
        .assign_ids(&detections, &known)
        .context("Consolidation failed")?;

    if cmd.write_registry {
        save_registry(&cmd.registry, &doc.registry)?;
        let added = doc.registry.len() - known.len();
        let stderr = std::io::stderr();
        let supports_color = stderr.is_terminal();
        let _ = output_format::print_info_message(
            &mut stderr.lock(),
            &format!("Registry updated: {} new entit(ies), {} total.", added, doc.registry.len()),
            supports_color,
        );
    }
    write_json(cmd.output.as_deref(), &doc.entities)
}
