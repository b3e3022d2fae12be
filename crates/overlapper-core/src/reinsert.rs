//! Substitution of generated slots into a rich-text template
//!
//! A template marks each item's position with `{{key}}`, one key per item
//! and one occurrence per leaf. Placeholder slots replace every occurrence
//! of their key with the placeholder token; other slots consume
//! occurrences one at a time, in order.

use crate::config::NestedSubstitution;
use crate::error::{OverlapError, Result};
use crate::item::{Field, Item, Slot, PLACEHOLDER};

/// The marker a template uses for `key`
pub fn marker(key: &str) -> String {
    format!("{{{{{}}}}}", key)
}

/// Fill `template` with the slots of `field`, pairing slots with `keys` in order
pub fn reinsert(
    field: &Field,
    template: &str,
    keys: &[String],
    nested: NestedSubstitution,
) -> Result<String> {
    if keys.len() != field.len() {
        return Err(OverlapError::MissingKeys {
            keys: keys.len(),
            slots: field.len(),
        });
    }

    let mut html = template.to_string();
    for (key, slot) in keys.iter().zip(&field.slots) {
        let marker = marker(key);
        match slot {
            Slot::Placeholder => html = html.replace(&marker, PLACEHOLDER),
            Slot::Context { item } | Slot::Cloze { item, .. } => {
                substitute(&mut html, &marker, item, nested)
            }
        }
    }
    Ok(html)
}

fn substitute(html: &mut String, marker: &str, item: &Item, nested: NestedSubstitution) {
    match item {
        Item::Leaf(text) => *html = html.replacen(marker, text, 1),
        Item::Nested(_) => {
            let whole = item.flat_text();
            for leaf in item.leaves() {
                let value = match nested {
                    NestedSubstitution::PerLeaf => leaf,
                    NestedSubstitution::WholeSequence => whole.as_str(),
                };
                *html = html.replacen(marker, value, 1);
            }
        }
    }
}
