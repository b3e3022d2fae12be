//! Item, slot and field types shared by generation and rendering

use serde::{Deserialize, Serialize};

/// Token shown for items that are neither hidden nor revealed on a card
pub const PLACEHOLDER: &str = "...";

/// One unit of source content: a line of text or a nested list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Leaf(String),
    Nested(Vec<Item>),
}

impl Item {
    pub fn leaf(text: impl Into<String>) -> Self {
        Item::Leaf(text.into())
    }

    /// Visit every leaf text in document order
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Item::Leaf(text) => out.push(text),
            Item::Nested(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Flatten to a single line, nested leaves separated by `, `
    pub fn flat_text(&self) -> String {
        self.leaves().join(", ")
    }
}

/// Build a sequence of leaf items from string slices
pub fn leaves<I, S>(texts: I) -> Vec<Item>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts.into_iter().map(|t| Item::Leaf(t.into())).collect()
}

/// What a single position of a card shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Slot {
    /// Neither hidden nor revealed on this card
    Placeholder,
    /// Revealed as context, unchanged
    Context { item: Item },
    /// Hidden under `ordinal`; `item` carries the cloze markup already applied
    Cloze { ordinal: usize, item: Item },
}

impl Slot {
    /// The item this slot renders, with placeholders rendered as the token
    pub fn rendered(&self) -> Item {
        match self {
            Slot::Placeholder => Item::leaf(PLACEHOLDER),
            Slot::Context { item } | Slot::Cloze { item, .. } => item.clone(),
        }
    }

    pub fn ordinal(&self) -> Option<usize> {
        match self {
            Slot::Cloze { ordinal, .. } => Some(*ordinal),
            _ => None,
        }
    }
}

/// One card's worth of slots, one per source item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub slots: Vec<Slot>,
}

impl Field {
    /// A field in which every position is a placeholder
    pub fn placeholders(len: usize) -> Self {
        Self {
            slots: vec![Slot::Placeholder; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The cloze ordinal used in this field, if any item is hidden
    pub fn ordinal(&self) -> Option<usize> {
        self.slots.iter().find_map(Slot::ordinal)
    }

    /// Positions hidden under a cloze
    pub fn hidden_positions(&self) -> Vec<usize> {
        self.positions(|slot| matches!(slot, Slot::Cloze { .. }))
    }

    pub fn context_positions(&self) -> Vec<usize> {
        self.positions(|slot| matches!(slot, Slot::Context { .. }))
    }

    fn positions(&self, pred: impl Fn(&Slot) -> bool) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| pred(slot))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Rendered items in order, placeholders included
    pub fn rendered(&self) -> Vec<Item> {
        self.slots.iter().map(Slot::rendered).collect()
    }
}
