//! Site configuration management for `site.toml`.
//!
//! The core never discovers configuration on its own; the embedding build
//! driver loads it (from a TOML file or string) and hands it to [`Site`].
//! Unknown fields are warned about rather than rejected, so a site config
//! written for a newer version still loads.
//!
//! [`Site`]: crate::site::Site

mod error;

pub use error::ConfigError;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::log;

/// Site-wide build configuration
///
/// | Field        | Purpose                                         |
/// |--------------|-------------------------------------------------|
/// | `output_dir` | Directory all disk paths are rooted under       |
/// | `extension`  | Fallback output extension (`extension` built-in) |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Output directory for compiled content.
    pub output_dir: PathBuf,
    /// Default output extension when no item or defaults layer sets one.
    pub extension: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            extension: "html".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse configuration from a TOML string.
    ///
    /// Unknown fields are collected and logged, never fatal.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;

        if !ignored.is_empty() {
            log!("warning"; "ignoring unknown config fields: {}", ignored.join(", "));
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Validate invariants that serde cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Validation(
                "extension must not be empty".to_string(),
            ));
        }
        if self.extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "extension `{}` must not include the leading dot",
                self.extension
            )));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
