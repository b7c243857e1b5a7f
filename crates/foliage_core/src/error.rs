//! # Core Error Types
//!
//! Errors raised by layout configuration and theme loading.

use thiserror::Error;

/// Errors from invalid layout configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A row or column was given a negative size.
    #[error("track size must be non-negative, got {size}")]
    NegativeTrackSize {
        /// The rejected value.
        size: f32,
    },

    /// A track index was outside the styles of the table.
    #[error("track index {index} out of range (have {count})")]
    TrackOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of tracks.
        count: usize,
    },
}

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors from reading theme or tree configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The TOML document did not parse or had the wrong shape.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A color string was not `#RRGGBB` or `#RRGGBBAA`.
    #[error("invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),

    /// A numeric setting was out of its valid range.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// What was wrong.
        reason: String,
    },
}
