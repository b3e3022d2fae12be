//! Conversion between rich-text list markup and items
//!
//! `split` reads the text of an HTML fragment into items. Every text node
//! contributes its non-blank lines in document order. A list nested inside
//! a list item becomes a single `Item::Nested`. The markup kind is decided
//! by the presence of an `<ol>` (first) or `<ul>` anywhere in the fragment.
//!
//! `join` renders items back into HTML of the same kind. Text is emitted
//! as-is; callers own any escaping.

use std::fmt;
use std::str::FromStr;

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};

use crate::error::OverlapError;
use crate::item::Item;

/// Markup wrapped around the items of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    /// `<ol><li>..</li></ol>`
    Ordered,
    /// `<ul><li>..</li></ul>`
    Unordered,
    /// `<div>..</div>` per item
    #[default]
    Plain,
}

impl MarkupKind {
    fn list_tag(&self) -> Option<&'static str> {
        match self {
            MarkupKind::Ordered => Some("ol"),
            MarkupKind::Unordered => Some("ul"),
            MarkupKind::Plain => None,
        }
    }
}

impl FromStr for MarkupKind {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ordered" | "ol" => Ok(MarkupKind::Ordered),
            "unordered" | "ul" => Ok(MarkupKind::Unordered),
            "plain" | "div" => Ok(MarkupKind::Plain),
            other => Err(OverlapError::UsageError(format!(
                "unknown markup kind: {} (expected: ordered, unordered, or plain)",
                other
            ))),
        }
    }
}

impl fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupKind::Ordered => write!(f, "ordered"),
            MarkupKind::Unordered => write!(f, "unordered"),
            MarkupKind::Plain => write!(f, "plain"),
        }
    }
}

/// Split rich text into items and detect its markup kind
#[tracing::instrument(skip(html), fields(bytes = html.len()))]
pub fn split(html: &str) -> (Vec<Item>, MarkupKind) {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();

    let tags: Vec<&str> = root
        .descendants()
        .filter_map(|node| node.value().as_element())
        .map(|el| el.name())
        .collect();
    let kind = if tags.contains(&"ol") {
        MarkupKind::Ordered
    } else if tags.contains(&"ul") {
        MarkupKind::Unordered
    } else {
        MarkupKind::Plain
    };

    let mut items = Vec::new();
    collect(root, false, &mut items);

    tracing::debug!(items = items.len(), kind = %kind, "split");
    (items, kind)
}

/// Walk an element's children, appending items to `out`. `in_item` is true
/// while inside an `<li>`, where a further list opens a nested item.
fn collect(element: ElementRef<'_>, in_item: bool, out: &mut Vec<Item>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(Item::leaf),
            );
            continue;
        }
        let Some(el) = ElementRef::wrap(child) else {
            continue;
        };
        match el.value().name() {
            "script" | "style" => {}
            "ol" | "ul" if in_item => {
                let mut nested = Vec::new();
                collect(el, false, &mut nested);
                if !nested.is_empty() {
                    out.push(Item::Nested(nested));
                }
            }
            "li" => collect(el, true, out),
            _ => collect(el, in_item, out),
        }
    }
}

/// Render items as rich text of the given kind
pub fn join(items: &[Item], kind: MarkupKind) -> String {
    let mut html = String::new();
    push_items(&mut html, items, kind);
    html
}

fn push_items(html: &mut String, items: &[Item], kind: MarkupKind) {
    match kind.list_tag() {
        Some(tag) => {
            html.push_str(&format!("<{}>", tag));
            for item in items {
                html.push_str("<li>");
                push_item(html, item, kind);
                html.push_str("</li>");
            }
            html.push_str(&format!("</{}>", tag));
        }
        None => {
            for item in items {
                html.push_str("<div>");
                push_item(html, item, kind);
                html.push_str("</div>");
            }
        }
    }
}

fn push_item(html: &mut String, item: &Item, kind: MarkupKind) {
    match item {
        Item::Leaf(text) => html.push_str(text),
        Item::Nested(children) => push_items(html, children, kind),
    }
}
