//! Error types and exit codes for overlapper
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, unparseable options)
//! - 3: Data error (note cannot produce cards)

mod macros;

use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - note content cannot be clozed (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while generating overlapping clozes
#[derive(Error, Debug)]
pub enum OverlapError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid options: {value:?} (expected `prompt`, `prompt,context` or `before,prompt,after`)")]
    InvalidOptions { value: String },

    #[error("max fields must be between 1 and {limit} (got {requested})")]
    InvalidSlotCount { requested: usize, limit: usize },

    #[error("{keys} placeholder keys supplied for {slots} items")]
    MissingKeys { keys: usize, slots: usize },

    // Data errors (exit code 3)
    #[error("more clozes than the note type can handle: {required} needed, {available} available")]
    OutOfRange { required: usize, available: usize },

    #[error("please enter at least {minimum} items to cloze (found {found})")]
    InsufficientItems { found: usize, minimum: usize },

    #[error("could not find items to cloze")]
    NoItems,

    #[error("please enter some text in the {field} field")]
    EmptyField { field: String },

    #[error("field not found on note: {field}")]
    FieldNotFound { field: String },

    #[error("can only generate overlapping clozes on {expected:?} notes (got {found:?})")]
    WrongNoteType { expected: String, found: String },

    // Generic failures (exit code 1)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },
}

impl OverlapError {
    /// Create an error for an options string no shape matches
    pub fn invalid_options(value: impl Into<String>) -> Self {
        OverlapError::InvalidOptions {
            value: value.into(),
        }
    }

    /// Create an error for a failed operation with a displayable cause
    pub fn failed(operation: &str, error: impl std::fmt::Display) -> Self {
        OverlapError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            OverlapError::UnknownFormat(_)
            | OverlapError::UsageError(_)
            | OverlapError::InvalidOptions { .. }
            | OverlapError::InvalidSlotCount { .. }
            | OverlapError::MissingKeys { .. } => ExitCode::Usage,

            OverlapError::OutOfRange { .. }
            | OverlapError::InsufficientItems { .. }
            | OverlapError::NoItems
            | OverlapError::EmptyField { .. }
            | OverlapError::FieldNotFound { .. }
            | OverlapError::WrongNoteType { .. } => ExitCode::Data,

            OverlapError::Json(_)
            | OverlapError::Toml(_)
            | OverlapError::FailedOperation { .. } => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            OverlapError::UnknownFormat(_) => "unknown_format",
            OverlapError::UsageError(_) => "usage_error",
            OverlapError::InvalidOptions { .. } => "invalid_options",
            OverlapError::InvalidSlotCount { .. } => "invalid_slot_count",
            OverlapError::MissingKeys { .. } => "missing_keys",
            OverlapError::OutOfRange { .. } => "out_of_range",
            OverlapError::InsufficientItems { .. } => "insufficient_items",
            OverlapError::NoItems => "no_items",
            OverlapError::EmptyField { .. } => "empty_field",
            OverlapError::FieldNotFound { .. } => "field_not_found",
            OverlapError::WrongNoteType { .. } => "wrong_note_type",
            OverlapError::Json(_) => "json_error",
            OverlapError::Toml(_) => "toml_error",
            OverlapError::FailedOperation { .. } => "failed_operation",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for overlapper operations
pub type Result<T> = std::result::Result<T, OverlapError>;
