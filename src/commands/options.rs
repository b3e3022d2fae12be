//! `overlapper options` - normalize an options string

use serde_json::json;

use crate::commands::dispatch::CommandContext;
use overlapper_core::error::Result;
use overlapper_core::options::normalize_options;

pub fn execute(ctx: &CommandContext, raw: &str) -> Result<()> {
    let normalized = normalize_options(raw, &ctx.config.defaults)?;
    let sizes = normalized.sizes;

    crate::output_by_format_result!(ctx.cli.format,
        json => {
            let value = json!({
                "before": sizes.before,
                "prompt": sizes.prompt,
                "after": sizes.after,
                "used_defaults": normalized.used_defaults,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        },
        human => {
            if normalized.used_defaults {
                println!("{} (defaults)", sizes);
            } else {
                println!("{}", sizes);
            }
        },
        records => {
            println!(
                "O before={} prompt={} after={} defaults={}",
                sizes.before, sizes.prompt, sizes.after, normalized.used_defaults
            );
        }
    )
}
