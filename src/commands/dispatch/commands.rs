//! Command implementations for all overlapper commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use overlapper_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Generate(args) => crate::commands::generate::execute(ctx, args),
            Commands::Options { raw } => crate::commands::options::execute(ctx, raw),
            Commands::Split(args) => crate::commands::split::execute(ctx, args),
            Commands::Note(args) => crate::commands::note::execute(ctx, args),
            Commands::Config => crate::commands::config::execute(ctx),
        }
    }
}
