//! Rendering generated fields into field contents

use serde::Serialize;

use crate::config::NestedSubstitution;
use crate::error::Result;
use crate::generator::GenerationResult;
use crate::item::Field;
use crate::markup::{join, MarkupKind};
use crate::reinsert::reinsert;

/// Where generated fields are rendered to
#[derive(Debug, Clone)]
pub enum RenderTarget {
    /// Wrap items in list or block markup
    Markup(MarkupKind),
    /// Substitute items into a template addressed by per-item keys
    Template {
        template: String,
        keys: Vec<String>,
        nested: NestedSubstitution,
    },
}

/// Rendered contents, one string per card slot plus the full field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCards {
    pub fields: Vec<String>,
    pub full: String,
}

impl RenderedCards {
    /// Number of non-empty card fields
    pub fn card_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.is_empty()).count()
    }
}

/// Render a single field
pub fn render_field(field: &Field, target: &RenderTarget) -> Result<String> {
    match target {
        RenderTarget::Markup(kind) => Ok(join(&field.rendered(), *kind)),
        RenderTarget::Template {
            template,
            keys,
            nested,
        } => reinsert(field, template, keys, *nested),
    }
}

/// Render every field of a generation result
pub fn render(result: &GenerationResult, target: &RenderTarget) -> Result<RenderedCards> {
    let fields = result
        .fields
        .iter()
        .map(|field| match field {
            Some(field) => render_field(field, target),
            None => Ok(String::new()),
        })
        .collect::<Result<Vec<_>>>()?;
    let full = render_field(&result.full, target)?;
    Ok(RenderedCards { fields, full })
}
