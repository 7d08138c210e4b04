// piiveil/src/cli.rs
//! Command-line interface definition for the piiveil application.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "piiveil",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Mask detected PII in text with stable entity identifiers",
    long_about = "piiveil replaces detected personal data in text with [{TYPE_ID}] placeholders, resolves overlapping detections and user modifiers, and keeps entity identifiers consistent across documents through a registry of known entities.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for piiveil crates).
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Masks the entities listed in a JSON request and prints the masked text.")]
    Mask(MaskCommand),

    #[command(about = "Assigns registry-consistent ids to a document's detections.")]
    Consolidate(ConsolidateCommand),

    #[command(about = "Replaces [{TYPE_ID}] placeholders with the names recorded in a registry.")]
    Unmask(UnmaskCommand),

    #[command(about = "Joins document pages into one text with page or chunk markers.")]
    Format(FormatCommand),
}

/// Arguments for the `mask` command.
#[derive(Parser, Debug)]
pub struct MaskCommand {
    /// JSON request: `{"text": ..., "entities": [...], "modifiers": [...]}`.
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the JSON request from a file instead of stdin.")]
    pub input: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write the masked text to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[arg(long = "config", value_name = "FILE", help = "Path to a custom configuration file (YAML).")]
    pub config: Option<PathBuf>,
}

/// Arguments for the `consolidate` command.
#[derive(Parser, Debug)]
pub struct ConsolidateCommand {
    /// JSON list of detections for one document.
    #[arg(long, value_name = "FILE", help = "JSON list of detections for one document.")]
    pub detections: PathBuf,

    /// JSON list of known entities. A missing file is treated as an empty registry.
    #[arg(long, value_name = "FILE", env = "PIIVEIL_REGISTRY", help = "JSON registry of known entities.")]
    pub registry: PathBuf,

    #[arg(long = "write-registry", help = "Persist the extended registry back to the registry file.")]
    pub write_registry: bool,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write the consolidated detections to a file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `unmask` command.
#[derive(Parser, Debug)]
pub struct UnmaskCommand {
    #[arg(long, value_name = "FILE", env = "PIIVEIL_REGISTRY", help = "JSON registry of known entities.")]
    pub registry: PathBuf,

    #[arg(long, short = 'i', value_name = "FILE", help = "Read masked text from a file instead of stdin.")]
    pub input: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write the unmasked text to a file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `format` command.
#[derive(Parser, Debug)]
pub struct FormatCommand {
    /// JSON list of `{"content": ..., "page": ...}` documents.
    #[arg(long, short = 'i', value_name = "FILE", help = "Read the JSON document list from a file instead of stdin.")]
    pub input: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write the formatted text to a file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[arg(long = "config", value_name = "FILE", help = "Path to a custom configuration file (YAML).")]
    pub config: Option<PathBuf>,
}
