//! Command implementations for overlapper

pub mod config;
pub mod dispatch;
pub mod generate;
pub mod input;
pub mod note;
pub mod options;
pub mod split;
