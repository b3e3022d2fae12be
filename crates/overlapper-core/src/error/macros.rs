//! Error macros for overlapper

/// Macro for creating invalid options errors
#[macro_export]
macro_rules! bail_invalid_options {
    ($value:expr) => {
        return Err($crate::error::OverlapError::invalid_options($value))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::OverlapError::UsageError($msg.to_string()))
    };
}
