//! `overlapper generate` - render cloze cards from rich text

use std::fs;

use serde::Serialize;
use tracing::debug;

use crate::cli::GenerateArgs;
use crate::commands::dispatch::CommandContext;
use crate::commands::input::read_input;
use overlapper_core::bail_usage;
use overlapper_core::error::{OverlapError, Result};
use overlapper_core::format::escape_record;
use overlapper_core::generator::{check_max_slots, generate};
use overlapper_core::markup::{split, MarkupKind};
use overlapper_core::options::{normalize_options, NormalizedOptions};
use overlapper_core::render::{render, RenderTarget, RenderedCards};

/// Cards plus the settings that produced them
#[derive(Debug, Serialize)]
struct GenerateReport {
    options: String,
    used_defaults: bool,
    markup: MarkupKind,
    cards: usize,
    fields: Vec<String>,
    full: String,
}

pub fn execute(ctx: &CommandContext, args: &GenerateArgs) -> Result<()> {
    let config = &ctx.config;
    let html = read_input(args.input.as_deref())?;

    let (items, markup) = split(&html);
    if items.is_empty() {
        return Err(OverlapError::NoItems);
    }
    if items.len() < config.min_items {
        return Err(OverlapError::InsufficientItems {
            found: items.len(),
            minimum: config.min_items,
        });
    }

    let options = normalize_options(&args.options, &config.defaults)?;
    let mut window = config.window_config(options.sizes);
    window.ramp |= args.incremental_ends;
    window.no_context_first |= args.no_context_first;
    window.no_context_last |= args.no_context_last;
    let max_fields = args.max_fields.unwrap_or(config.max_fields);
    check_max_slots(max_fields)?;

    let target = match &args.template {
        Some(path) => {
            if args.keys.is_empty() {
                bail_usage!("--template requires --keys with one key per item");
            }
            let template = fs::read_to_string(path)
                .map_err(|e| OverlapError::failed(&format!("read {}", path.display()), e))?;
            RenderTarget::Template {
                template,
                keys: args.keys.clone(),
                nested: config.nested_substitution,
            }
        }
        None => RenderTarget::Markup(markup),
    };

    let result = generate(&items, &window, max_fields)?;
    let rendered = render(&result, &target)?;
    debug!(cards = rendered.card_count(), elapsed = ?ctx.start.elapsed(), "generate");

    let report = GenerateReport {
        options: options.sizes.to_string(),
        used_defaults: options.used_defaults,
        markup,
        cards: rendered.card_count(),
        fields: rendered.fields.clone(),
        full: rendered.full.clone(),
    };

    crate::output_by_format_result!(ctx.cli.format,
        json => output_json(&report),
        human => { output_human(ctx, &rendered, &options); },
        records => { output_records(&report); }
    )
}

fn output_json(report: &GenerateReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn output_human(ctx: &CommandContext, rendered: &RenderedCards, options: &NormalizedOptions) {
    let names = &ctx.config.note;
    for (idx, field) in rendered.fields.iter().enumerate() {
        if !field.is_empty() {
            println!("{}: {}", names.card_field(idx + 1), field);
        }
    }
    println!("{}: {}", names.full, rendered.full);

    if !ctx.cli.quiet {
        let suffix = if options.used_defaults { " (defaults)" } else { "" };
        eprintln!(
            "Generated {} cards with options {}{}",
            rendered.card_count(),
            options.sizes,
            suffix
        );
    }
}

fn output_records(report: &GenerateReport) {
    println!(
        "H cards={} options={} markup={} defaults={}",
        report.cards, report.options, report.markup, report.used_defaults
    );
    for (idx, field) in report.fields.iter().enumerate() {
        if !field.is_empty() {
            println!("F {} {}", idx + 1, escape_record(field));
        }
    }
    println!("X full {}", escape_record(&report.full));
}
