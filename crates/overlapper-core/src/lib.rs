//! Overlapper Core Library
//!
//! Turns an ordered list into overlapping cloze deletions: every card hides
//! a sliding window of items and optionally reveals the items around it.

pub mod cloze;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod item;
pub mod logging;
pub mod markup;
pub mod note;
pub mod options;
pub mod reinsert;
pub mod render;

pub use error::{OverlapError, Result};
pub use generator::{generate, GenerationResult, WindowConfig};
pub use item::{Field, Item, Slot};
pub use markup::{join, split, MarkupKind};
pub use options::{normalize_options, ContextSize, NormalizedOptions, WindowSizes};
pub use reinsert::reinsert;
