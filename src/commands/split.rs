//! `overlapper split` - show the items extracted from rich text

use serde_json::json;

use crate::cli::SplitArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::input::read_input;
use overlapper_core::error::Result;
use overlapper_core::format::escape_record;
use overlapper_core::item::Item;
use overlapper_core::markup::split;

pub fn execute(ctx: &CommandContext, args: &SplitArgs) -> Result<()> {
    let html = read_input(args.input.as_deref())?;
    let (items, markup) = split(&html);

    crate::output_by_format_result!(ctx.cli.format,
        json => {
            let value = json!({ "markup": markup, "items": items });
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        },
        human => {
            println!("markup: {}", markup);
            for line in outline(&items, "") {
                println!("{}", line);
            }
        },
        records => {
            println!("M {}", markup);
            for line in outline(&items, "") {
                println!("I {}", escape_record(&line));
            }
        }
    )
}

/// Number items `1.`, `2.`, nested ones `2.1.`, one line per leaf
fn outline(items: &[Item], prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        let number = format!("{}{}.", prefix, idx + 1);
        match item {
            Item::Leaf(text) => lines.push(format!("{} {}", number, text)),
            Item::Nested(children) => lines.extend(outline(children, &number)),
        }
    }
    lines
}
