//! `overlapper note` - update a JSON note with generated card fields

use std::fs;

use crate::cli::NoteArgs;
use crate::commands::dispatch::CommandContext;
use overlapper_core::error::{OverlapError, Result};
use overlapper_core::note::{process_note, Note};

pub fn execute(ctx: &CommandContext, args: &NoteArgs) -> Result<()> {
    let path = &args.path;
    let content = fs::read_to_string(path)
        .map_err(|e| OverlapError::failed(&format!("read {}", path.display()), e))?;
    let note: Note = serde_json::from_str(&content)?;

    let update = process_note(&note, &ctx.config)?;

    if args.in_place {
        let mut json = serde_json::to_string_pretty(&update.note)?;
        json.push('\n');
        fs::write(path, json)
            .map_err(|e| OverlapError::failed(&format!("write {}", path.display()), e))?;
    }

    crate::output_by_format_result!(ctx.cli.format,
        json => {
            println!("{}", serde_json::to_string_pretty(&update)?);
            Ok(())
        },
        human => {
            if args.in_place {
                if !ctx.cli.quiet {
                    println!(
                        "Generated {} cards ({}, options {}) in {}",
                        update.cards,
                        update.markup,
                        update.options.sizes,
                        path.display()
                    );
                }
            } else {
                println!("{}", serde_json::to_string_pretty(&update.note)?);
            }
        },
        records => {
            println!(
                "N cards={} markup={} options={} defaults={} path={}",
                update.cards,
                update.markup,
                update.options.sizes,
                update.options.used_defaults,
                path.display()
            );
        }
    )
}
