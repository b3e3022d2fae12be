//! Note update: read the source list off a note and write the card fields
//!
//! A note is a typed bag of named HTML fields. Processing reads the
//! original list and the options string, generates the cards and writes
//! `Text1..TextN`, `Full` and, when the defaults were used, `Options`.
//! Nothing is written when any step fails.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OverlapConfig;
use crate::error::{OverlapError, Result};
use crate::generator::generate;
use crate::markup::{split, MarkupKind};
use crate::options::{normalize_options, NormalizedOptions};
use crate::render::{render, RenderTarget};
use crate::trace_time;

/// A note as handed over by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Name of the note type
    #[serde(rename = "type")]
    pub note_type: String,
    /// Field name to HTML content
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Note {
    pub fn new(note_type: impl Into<String>) -> Self {
        Self {
            note_type: note_type.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Result<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| OverlapError::FieldNotFound {
                field: name.to_string(),
            })
    }
}

/// What a successful update produced
#[derive(Debug, Clone, Serialize)]
pub struct NoteUpdate {
    pub note: Note,
    pub cards: usize,
    pub markup: MarkupKind,
    pub options: NormalizedOptions,
}

/// Generate overlapping clozes for `note` and return the updated note
#[tracing::instrument(skip(note, config), fields(note_type = %note.note_type))]
pub fn process_note(note: &Note, config: &OverlapConfig) -> Result<NoteUpdate> {
    let start = Instant::now();
    let names = &config.note;

    if note.note_type != names.note_type {
        return Err(OverlapError::WrongNoteType {
            expected: names.note_type.clone(),
            found: note.note_type.clone(),
        });
    }

    let original = note.field(&names.original)?;
    if original.trim().is_empty() {
        return Err(OverlapError::EmptyField {
            field: names.original.clone(),
        });
    }

    let (items, markup) = split(original);
    if items.is_empty() {
        return Err(OverlapError::NoItems);
    }
    if items.len() < config.min_items {
        return Err(OverlapError::InsufficientItems {
            found: items.len(),
            minimum: config.min_items,
        });
    }

    let raw_options = note.fields.get(&names.options).map_or("", String::as_str);
    let options = normalize_options(raw_options, &config.defaults)?;
    let window = config.window_config(options.sizes);

    let result = generate(&items, &window, config.max_fields)?;
    let rendered = render(&result, &RenderTarget::Markup(markup))?;

    let mut updated = note.clone();
    for (idx, content) in rendered.fields.iter().enumerate() {
        updated
            .fields
            .insert(names.card_field(idx + 1), content.clone());
    }
    updated.fields.insert(names.full.clone(), rendered.full.clone());
    if options.used_defaults {
        updated
            .fields
            .insert(names.options.clone(), config.defaults.to_string());
    }

    let cards = rendered.card_count();
    debug!(cards, markup = %markup, options = %options.sizes, "note updated");
    trace_time!(start, "process_note", cards = cards);

    Ok(NoteUpdate {
        note: updated,
        cards,
        markup,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(original: &str, options: &str) -> Note {
        Note::new("Overlapping Cloze")
            .with_field("Original", original)
            .with_field("Options", options)
    }

    #[test]
    fn test_process_note_writes_cards_and_full() {
        let config = OverlapConfig::default();
        let update = process_note(
            &note("<ol><li>a</li><li>b</li><li>c</li></ol>", "1,1,1"),
            &config,
        )
        .unwrap();

        assert_eq!(update.cards, 3);
        assert_eq!(update.markup, MarkupKind::Ordered);
        assert!(!update.options.used_defaults);
        let fields = &update.note.fields;
        assert_eq!(
            fields["Text1"],
            "<ol><li>{{c1::a}}</li><li>b</li><li>...</li></ol>"
        );
        assert_eq!(
            fields["Text2"],
            "<ol><li>a</li><li>{{c2::b}}</li><li>c</li></ol>"
        );
        assert_eq!(fields["Text20"], "");
        assert_eq!(
            fields["Full"],
            "<ol><li>{{c21::a}}</li><li>{{c21::b}}</li><li>{{c21::c}}</li></ol>"
        );
        assert_eq!(fields["Options"], "1,1,1");
    }

    #[test]
    fn test_process_note_clears_stale_cards() {
        let config = OverlapConfig::default();
        let stale = note("<div>a</div><div>b</div><div>c</div>", "")
            .with_field("Text7", "<div>old card</div>");
        let update = process_note(&stale, &config).unwrap();
        assert_eq!(update.note.fields["Text7"], "");
    }

    #[test]
    fn test_process_note_writes_back_defaults() {
        let config = OverlapConfig::default();
        let update = process_note(&note("<ul><li>a</li><li>b</li><li>c</li></ul>", ""), &config)
            .unwrap();
        assert!(update.options.used_defaults);
        assert_eq!(update.note.fields["Options"], "1,1,0");
    }

    #[test]
    fn test_process_note_missing_options_field_uses_defaults() {
        let config = OverlapConfig::default();
        let bare = Note::new("Overlapping Cloze")
            .with_field("Original", "<div>a</div><div>b</div><div>c</div>");
        let update = process_note(&bare, &config).unwrap();
        assert_eq!(update.note.fields["Options"], "1,1,0");
    }

    #[test]
    fn test_process_note_rejects_wrong_type() {
        let config = OverlapConfig::default();
        let other = Note::new("Basic").with_field("Original", "<div>a</div>");
        assert!(matches!(
            process_note(&other, &config),
            Err(OverlapError::WrongNoteType { .. })
        ));
    }

    #[test]
    fn test_process_note_input_errors() {
        let config = OverlapConfig::default();
        assert!(matches!(
            process_note(&Note::new("Overlapping Cloze"), &config),
            Err(OverlapError::FieldNotFound { .. })
        ));
        assert!(matches!(
            process_note(&note("  ", ""), &config),
            Err(OverlapError::EmptyField { .. })
        ));
        assert!(matches!(
            process_note(&note("<ol><li> </li></ol>", ""), &config),
            Err(OverlapError::NoItems)
        ));
        assert!(matches!(
            process_note(&note("<ol><li>a</li><li>b</li></ol>", ""), &config),
            Err(OverlapError::InsufficientItems {
                found: 2,
                minimum: 3
            })
        ));
        assert!(matches!(
            process_note(&note("<div>a</div><div>b</div><div>c</div>", "x"), &config),
            Err(OverlapError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_process_note_out_of_range_writes_nothing() {
        let config = OverlapConfig {
            max_fields: 2,
            ..Default::default()
        };
        let source = note("<div>a</div><div>b</div><div>c</div>", "");
        assert!(matches!(
            process_note(&source, &config),
            Err(OverlapError::OutOfRange {
                required: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn test_note_serde_shape() {
        let json = r#"{"type": "Overlapping Cloze", "fields": {"Original": "<div>x</div>"}}"#;
        let parsed: Note = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.note_type, "Overlapping Cloze");
        assert_eq!(parsed.field("Original").unwrap(), "<div>x</div>");
    }
}
