//! Command dispatch logic for overlapper

use std::time::Instant;

use crate::cli::Cli;
use overlapper_core::config::OverlapConfig;
use overlapper_core::error::Result;
use tracing::debug;

mod command;
mod commands;
mod macros;

pub use command::CommandContext;
use command::{Command, NoCommand};
use macros::trace_command;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = OverlapConfig::discover(cli.config.as_deref())?;

    debug!(elapsed = ?start.elapsed(), max_fields = config.max_fields, "load_config");

    let ctx = CommandContext::new(cli, config, start);

    let result = match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    };
    trace_command!(cli, start, "execute_command");
    result
}
