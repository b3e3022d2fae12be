//! Generator configuration for overlapper
//!
//! Configuration lives in a TOML file. Lookup order: an explicit path,
//! the `OVERLAPPER_CONFIG` environment variable, then
//! `<config dir>/overlapper/config.toml`. Missing files fall back to the
//! built-in defaults.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OverlapError, Result};
use crate::generator::{check_max_slots, WindowConfig};
use crate::options::WindowSizes;

pub use types::{NestedSubstitution, NoteFieldsConfig, OverlapConfig};

const CONFIG_DIR: &str = "overlapper";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_PATH_ENV_VAR: &str = "OVERLAPPER_CONFIG";

impl OverlapConfig {
    /// Window configuration for the given sizes, carrying the boundary flags
    pub fn window_config(&self, sizes: WindowSizes) -> WindowConfig {
        WindowConfig {
            sizes,
            no_context_first: self.no_context_first,
            no_context_last: self.no_context_last,
            ramp: self.incremental_ends,
        }
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| OverlapError::failed(&format!("read config {}", path.display()), e))?;
        let config: OverlapConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve and load the effective configuration
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match Self::config_path(explicit) {
            Some(path) if explicit.is_some() || path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV_VAR) {
            return Some(PathBuf::from(env_path));
        }
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn validate(&self) -> Result<()> {
        if self.defaults.prompt == 0 {
            return Err(OverlapError::invalid_options(self.defaults.to_string()));
        }
        check_max_slots(self.max_fields)
    }
}
