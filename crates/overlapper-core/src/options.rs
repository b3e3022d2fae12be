//! Option string normalization
//!
//! Users steer card generation through a compact string on the note, e.g.
//! `2` (hide two items), `3,2` (hide three, show two on each side) or
//! `1,2,all` (one before, hide two, everything after). Tokens that do not
//! parse as integers stand for "unbounded" in the context positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{OverlapError, Result};

/// Word used when printing or reading an unbounded context size
pub const UNBOUNDED_WORD: &str = "all";

/// How many neighbouring items a context window may reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextSize {
    /// Reveal at most this many items (0 never reveals anything)
    Limit(usize),
    /// Reveal as much as fits
    Unbounded,
}

impl ContextSize {
    /// Parse a single option token; anything that is not an integer is unbounded
    pub fn from_token(token: &str) -> Self {
        parse_count(token).map_or(ContextSize::Unbounded, ContextSize::Limit)
    }

    /// True when this side never reveals context
    pub fn is_zero(&self) -> bool {
        matches!(self, ContextSize::Limit(0))
    }
}

impl fmt::Display for ContextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextSize::Limit(n) => write!(f, "{}", n),
            ContextSize::Unbounded => f.write_str(UNBOUNDED_WORD),
        }
    }
}

impl Serialize for ContextSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ContextSize::Limit(n) => serializer.serialize_u64(*n as u64),
            ContextSize::Unbounded => serializer.serialize_str(UNBOUNDED_WORD),
        }
    }
}

impl<'de> Deserialize<'de> for ContextSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Word(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Count(n) => ContextSize::Limit(n as usize),
            Raw::Word(word) => ContextSize::from_token(&word),
        })
    }
}

/// The three window sizes steering generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSizes {
    /// Context revealed before the hidden window
    pub before: ContextSize,
    /// Number of items hidden per card ("prompt size")
    pub prompt: usize,
    /// Context revealed after the hidden window
    pub after: ContextSize,
}

impl WindowSizes {
    pub fn new(before: ContextSize, prompt: usize, after: ContextSize) -> Self {
        Self {
            before,
            prompt,
            after,
        }
    }
}

impl Default for WindowSizes {
    fn default() -> Self {
        Self::new(ContextSize::Limit(1), 1, ContextSize::Limit(0))
    }
}

/// Renders in the same shape the normalizer accepts, e.g. `1,1,0`
impl fmt::Display for WindowSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.before, self.prompt, self.after)
    }
}

impl FromStr for WindowSizes {
    type Err = OverlapError;

    /// Parse a complete `before,prompt,after` triple without defaults
    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize_options(s, &WindowSizes::default())?;
        if normalized.used_defaults || tokenize(s).len() != 3 {
            return Err(OverlapError::invalid_options(s));
        }
        Ok(normalized.sizes)
    }
}

/// Outcome of normalizing a user-supplied options string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedOptions {
    pub sizes: WindowSizes,
    /// True when the string was empty and the defaults were substituted;
    /// callers write the defaults back in that case
    pub used_defaults: bool,
}

/// Normalize an options string into window sizes.
///
/// Accepted shapes (spaces are ignored):
/// - empty: `defaults`, flagged as `used_defaults`
/// - `before,prompt,after`: prompt must be an integer
/// - `prompt,context`: prompt must be an integer, context applies to both sides
/// - `prompt`: context sizes come from `defaults`
///
/// A zero prompt size is rejected since it would hide nothing.
pub fn normalize_options(raw: &str, defaults: &WindowSizes) -> Result<NormalizedOptions> {
    let tokens = tokenize(raw);
    if tokens.is_empty() {
        tracing::debug!(defaults = %defaults, "options empty, using defaults");
        return Ok(NormalizedOptions {
            sizes: *defaults,
            used_defaults: true,
        });
    }

    let sizes = match tokens.as_slice() {
        [before, prompt, after] => parse_count(prompt).map(|prompt| {
            WindowSizes::new(
                ContextSize::from_token(before),
                prompt,
                ContextSize::from_token(after),
            )
        }),
        [prompt, context] => parse_count(prompt).map(|prompt| {
            let context = ContextSize::from_token(context);
            WindowSizes::new(context, prompt, context)
        }),
        [prompt] => parse_count(prompt)
            .map(|prompt| WindowSizes::new(defaults.before, prompt, defaults.after)),
        _ => None,
    };

    match sizes {
        Some(sizes) if sizes.prompt > 0 => Ok(NormalizedOptions {
            sizes,
            used_defaults: false,
        }),
        _ => crate::bail_invalid_options!(raw),
    }
}

/// Strip spaces and split on commas; a blank string has no tokens
fn tokenize(raw: &str) -> Vec<String> {
    let compact: String = raw.chars().filter(|c| *c != ' ').collect();
    if compact.is_empty() {
        return Vec::new();
    }
    compact.split(',').map(str::to_string).collect()
}

/// Parse a non-negative count. Negative numbers count as non-numeric.
fn parse_count(token: &str) -> Option<usize> {
    token.parse::<usize>().ok()
}
