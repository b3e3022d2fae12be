//! Input helpers shared by commands

use std::fs;
use std::io::Read;
use std::path::Path;

use overlapper_core::error::{OverlapError, Result};

/// Read rich text from a file, or from stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| OverlapError::failed(&format!("read {}", path.display()), e)),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| OverlapError::failed("read stdin", e))?;
            Ok(buf)
        }
    }
}
