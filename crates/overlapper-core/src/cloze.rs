//! Cloze deletion markup

use crate::item::Item;

/// Wrap one piece of text in cloze syntax, e.g. `{{c3::text}}`
pub fn cloze_text(ordinal: usize, text: &str) -> String {
    format!("{{{{c{}::{}}}}}", ordinal, text)
}

/// Apply cloze syntax to a single item, recursing into nested lists so
/// every leaf carries the same ordinal.
pub fn format_item(item: &Item, ordinal: usize) -> Item {
    match item {
        Item::Leaf(text) => Item::Leaf(cloze_text(ordinal, text)),
        Item::Nested(children) => Item::Nested(
            children
                .iter()
                .map(|child| format_item(child, ordinal))
                .collect(),
        ),
    }
}

/// Apply cloze syntax to a range of items, preserving its shape
pub fn format_range(items: &[Item], ordinal: usize) -> Vec<Item> {
    items.iter().map(|item| format_item(item, ordinal)).collect()
}
