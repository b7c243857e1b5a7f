//! Control tree configuration, loaded from TOML.

use std::path::Path;

use foliage_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Settings of a [`ControlTree`](crate::tree::ControlTree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Offset added to a child's position when its buffer is composited
    /// into the parent, reserving room for the parent's border stroke.
    pub border_inset: i32,
    /// Whether pointer-over swaps hoverable controls to their hover style.
    pub hover_enabled: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            border_inset: 1,
            hover_enabled: true,
        }
    }
}

impl TreeConfig {
    /// Parses a configuration; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidValue`] for a negative inset.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        if config.border_inset < 0 {
            tracing::warn!(border_inset = config.border_inset, "rejecting tree config");
            return Err(ConfigError::InvalidValue {
                key: "border_inset",
                reason: format!("must be non-negative, got {}", config.border_inset),
            });
        }
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`TreeConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
