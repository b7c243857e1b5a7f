//! Process-wide theme.
//!
//! The theme is the terminal fallback of every style chain. It is written
//! only through [`set`] or [`update`], each of which bumps a version
//! counter. Style caches compare against [`version`] and rebuild lazily, so
//! a theme swap needs no subscriber list.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::style::Color;

/// Default color/font palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Window and control background.
    pub background: Color,
    /// Text and glyph color.
    pub foreground: Color,
    /// Text color of disabled controls.
    pub foreground_disabled: Color,
    /// Border stroke color.
    pub border: Color,
    /// Accent color (pressed buttons, checked boxes, selected tabs).
    pub highlight: Color,
    /// Text drawn on top of `highlight`.
    pub highlight_text: Color,
    /// Background of hovered items.
    pub hover: Color,
    /// Background of selected items.
    pub selection: Color,
    /// Font family name.
    pub font: String,
    /// Font size in points.
    pub font_size: f32,
    /// Border stroke width in pixels.
    pub border_width: i32,
    /// Border corner radius in pixels.
    pub border_radius: i32,
}

impl Theme {
    /// The built-in light palette.
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: Color::hex(0xFF_FF_FF),
            foreground: Color::hex(0x33_33_33),
            foreground_disabled: Color::hex(0xA0_A0_A0),
            border: Color::hex(0xAC_AC_AC),
            highlight: Color::hex(0x42_81_E2),
            highlight_text: Color::WHITE,
            hover: Color::hex(0xDA_E5_F3),
            selection: Color::hex(0xC5_DA_F5),
            font: String::from("Segoe UI"),
            font_size: 14.0,
            border_width: 1,
            border_radius: 0,
        }
    }

    /// The built-in dark palette.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Color::hex(0x1E_1E_1E),
            foreground: Color::hex(0xDC_DC_DC),
            foreground_disabled: Color::hex(0x6E_6E_6E),
            border: Color::hex(0x3F_3F_46),
            highlight: Color::hex(0x00_7A_CC),
            highlight_text: Color::WHITE,
            hover: Color::hex(0x3E_3E_40),
            selection: Color::hex(0x26_4F_78),
            font: String::from("Segoe UI"),
            font_size: 14.0,
            border_width: 1,
            border_radius: 0,
        }
    }

    /// Parses a theme from TOML; missing keys keep the light defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed documents or colors and
    /// [`ConfigError::InvalidValue`] for out-of-range sizes.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let theme: Self = toml::from_str(text)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Reads and parses a theme file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Theme::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.font_size > 0.0) {
            tracing::warn!(font_size = self.font_size, "rejecting theme");
            return Err(ConfigError::InvalidValue {
                key: "font_size",
                reason: format!("must be positive, got {}", self.font_size),
            });
        }
        if self.border_width < 0 {
            tracing::warn!(border_width = self.border_width, "rejecting theme");
            return Err(ConfigError::InvalidValue {
                key: "border_width",
                reason: format!("must be non-negative, got {}", self.border_width),
            });
        }
        Ok(())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

static CURRENT: OnceLock<RwLock<Arc<Theme>>> = OnceLock::new();
static VERSION: AtomicU64 = AtomicU64::new(1);

fn slot() -> &'static RwLock<Arc<Theme>> {
    CURRENT.get_or_init(|| RwLock::new(Arc::new(Theme::default())))
}

/// Returns the active theme.
#[must_use]
pub fn current() -> Arc<Theme> {
    Arc::clone(&slot().read())
}

/// Returns the theme version. Starts at 1 and increases on every swap.
#[must_use]
pub fn version() -> u64 {
    VERSION.load(Ordering::Acquire)
}

/// Replaces the active theme and returns the new version.
pub fn set(theme: Theme) -> u64 {
    let mut guard = slot().write();
    *guard = Arc::new(theme);
    let version = VERSION.fetch_add(1, Ordering::AcqRel) + 1;
    drop(guard);
    tracing::debug!(version, "theme changed");
    version
}

/// Edits a copy of the active theme, installs it and returns the new version.
pub fn update(edit: impl FnOnce(&mut Theme)) -> u64 {
    let mut theme = (*current()).clone();
    edit(&mut theme);
    set(theme)
}
