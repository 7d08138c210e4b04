// piiveil/src/commands/unmask.rs
//! `piiveil unmask`: restores registry names in masked text.

use anyhow::Result;

use piiveil_core::unmask_text;

use crate::cli::UnmaskCommand;
use crate::utils::io::{load_registry, read_input, write_output};

pub fn run_unmask(cmd: &UnmaskCommand) -> Result<()> {
    let known = load_registry(&cmd.registry)?;
    let text = read_input(cmd.input.as_deref())?;
    // Stdin and files usually end with a newline that write_output adds back.
    let text = text.strip_suffix('\n').unwrap_or(&text);
    write_output(cmd.output.as_deref(), &unmask_text(text, &known))
}
