//! Configuration type definitions

use serde::{Deserialize, Serialize};

use crate::options::{ContextSize, WindowSizes};

/// Generation settings shared by every note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapConfig {
    /// Window sizes used when a note leaves its options empty
    #[serde(default)]
    pub defaults: WindowSizes,

    /// Number of card fields on the note type
    #[serde(default = "default_max_fields")]
    pub max_fields: usize,

    /// Hide the context after the hidden window on the first card
    #[serde(default)]
    pub no_context_first: bool,

    /// Hide the context before the hidden window on the last card
    #[serde(default)]
    pub no_context_last: bool,

    /// Ramp the hidden window in and out at the list ends
    #[serde(default)]
    pub incremental_ends: bool,

    /// Fewest items a note must provide
    #[serde(default = "default_min_items")]
    pub min_items: usize,

    /// How nested items are substituted into a template
    #[serde(default)]
    pub nested_substitution: NestedSubstitution,

    /// Note type and field names
    #[serde(default)]
    pub note: NoteFieldsConfig,
}

/// Substitution of nested items into template placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NestedSubstitution {
    /// Each leaf fills the next placeholder occurrence
    #[default]
    PerLeaf,
    /// Every occurrence consumed by a nested item receives the whole
    /// flattened sequence
    WholeSequence,
}

/// Names of the note type and its fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFieldsConfig {
    /// Note type the generator accepts
    #[serde(default = "default_note_type")]
    pub note_type: String,

    /// Prefix of the numbered card fields (`Text1`, `Text2`, ...)
    #[serde(default = "default_field_prefix")]
    pub field_prefix: String,

    /// Field receiving the fully clozed list
    #[serde(default = "default_full_field")]
    pub full: String,

    /// Field holding the options string
    #[serde(default = "default_options_field")]
    pub options: String,

    /// Field holding the source list
    #[serde(default = "default_original_field")]
    pub original: String,
}

impl NoteFieldsConfig {
    /// Name of the 1-based card field `number`
    pub fn card_field(&self, number: usize) -> String {
        format!("{}{}", self.field_prefix, number)
    }
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            defaults: default_window_sizes(),
            max_fields: default_max_fields(),
            no_context_first: false,
            no_context_last: false,
            incremental_ends: false,
            min_items: default_min_items(),
            nested_substitution: NestedSubstitution::default(),
            note: NoteFieldsConfig::default(),
        }
    }
}

impl Default for NoteFieldsConfig {
    fn default() -> Self {
        Self {
            note_type: default_note_type(),
            field_prefix: default_field_prefix(),
            full: default_full_field(),
            options: default_options_field(),
            original: default_original_field(),
        }
    }
}

fn default_window_sizes() -> WindowSizes {
    WindowSizes::new(ContextSize::Limit(1), 1, ContextSize::Limit(0))
}

fn default_max_fields() -> usize {
    20
}

fn default_min_items() -> usize {
    3
}

fn default_note_type() -> String {
    "Overlapping Cloze".to_string()
}

fn default_field_prefix() -> String {
    "Text".to_string()
}

fn default_full_field() -> String {
    "Full".to_string()
}

fn default_options_field() -> String {
    "Options".to_string()
}

fn default_original_field() -> String {
    "Original".to_string()
}
