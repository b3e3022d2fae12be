//! `overlapper config` - print the effective configuration

use crate::commands::dispatch::CommandContext;
use overlapper_core::error::{OverlapError, Result};

pub fn execute(ctx: &CommandContext) -> Result<()> {
    crate::output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&ctx.config)?);
            Ok(())
        },
        human => {
            let text = toml::to_string_pretty(&ctx.config)
                .map_err(|e| OverlapError::failed("serialize config", e))?;
            print!("{}", text);
        },
        records => {
            println!(
                "C options={} max_fields={} min_items={} incremental_ends={} no_context_first={} no_context_last={}",
                ctx.config.defaults,
                ctx.config.max_fields,
                ctx.config.min_items,
                ctx.config.incremental_ends,
                ctx.config.no_context_first,
                ctx.config.no_context_last
            );
        }
    )
}
