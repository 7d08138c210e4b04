// piiveil/src/main.rs
//! piiveil entry point.

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;

use piiveil::cli::{Cli, Commands};
use piiveil::commands::{consolidate, format, mask, unmask};
use piiveil::logger;
use piiveil::ui::output_format;

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Mask(cmd) => mask::run_mask(cmd),
        Commands::Consolidate(cmd) => consolidate::run_consolidate(cmd),
        Commands::Unmask(cmd) => unmask::run_unmask(cmd),
        Commands::Format(cmd) => format::run_format(cmd),
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    if let Err(err) = run(&cli) {
        let stderr = std::io::stderr();
        let supports_color = stderr.is_terminal();
        let _ = output_format::print_error_message(&mut stderr.lock(), &format!("{:#}", err), supports_color);
        std::process::exit(1);
    }
}
