use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Rich-text input file (reads stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Options string (`prompt`, `prompt,context` or `before,prompt,after`)
    #[arg(long, short, default_value = "")]
    pub options: String,

    /// Template with `{{key}}` placeholders to render into instead of list markup
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Placeholder keys, one per item, in order
    #[arg(long, value_delimiter = ',', requires = "template")]
    pub keys: Vec<String>,

    /// Override the maximum number of card fields
    #[arg(long)]
    pub max_fields: Option<usize>,

    /// Ramp the hidden window in and out at the list ends
    #[arg(long)]
    pub incremental_ends: bool,

    /// Hide the following context on the first card
    #[arg(long)]
    pub no_context_first: bool,

    /// Hide the preceding context on the last card
    #[arg(long)]
    pub no_context_last: bool,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Rich-text input file (reads stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct NoteArgs {
    /// Path to the note JSON (`{"type": ..., "fields": {...}}`)
    pub path: PathBuf,

    /// Write the updated note back to the file
    #[arg(long)]
    pub in_place: bool,
}
