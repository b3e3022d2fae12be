//! CLI argument parsing for overlapper
//!
//! Global flags: --format, --config, --quiet, --verbose, --log-level, --log-json

pub mod args;
pub mod format;
pub mod parse;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{GenerateArgs, NoteArgs, SplitArgs};
pub use overlapper_core::format::OutputFormat;
use parse::parse_output_format;

/// Overlapper - overlapping cloze generation for list-based notes
#[derive(Parser, Debug)]
#[command(name = "overlapper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, records)
    #[arg(long, global = true, default_value = "human", value_parser = parse_output_format)]
    pub format: OutputFormat,

    /// Configuration file (defaults to $OVERLAPPER_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directives (e.g. `debug`, `overlapper_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate overlapping cloze cards from rich text
    Generate(GenerateArgs),

    /// Normalize an options string (`prompt`, `prompt,context` or `before,prompt,after`)
    Options {
        /// Options string; empty selects the configured defaults
        #[arg(default_value = "")]
        raw: String,
    },

    /// Show the items and markup kind extracted from rich text
    Split(SplitArgs),

    /// Update a JSON note with generated card fields
    Note(NoteArgs),

    /// Print the effective configuration
    Config,
}
