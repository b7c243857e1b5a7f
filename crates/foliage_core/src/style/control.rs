//! Control styles and class-level defaults.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{BorderStyle, Color};
use crate::theme::{self, Theme};

/// Where a style looks next for properties it leaves unset.
#[derive(Debug, Clone, Default)]
pub enum StyleParent {
    /// Fall straight through to the theme.
    #[default]
    Theme,
    /// A class-level default, rebuilt lazily when the theme changes.
    Class(&'static ClassStyle),
    /// An explicit shared style.
    Shared(Arc<ControlStyle>),
}

/// Locally set visual properties of a control, with a parent to fall back on.
#[derive(Debug, Clone, Default)]
pub struct ControlStyle {
    /// Text and glyph color.
    pub foreground_color: Option<Color>,
    /// Fill color behind the control's content.
    pub background_color: Option<Color>,
    /// Font family name.
    pub font: Option<String>,
    /// Font size in points.
    pub font_size: Option<f32>,
    /// Border.
    pub border: BorderStyle,
    parent: StyleParent,
}

impl ControlStyle {
    /// Creates an empty style that defers everything to `parent`.
    #[must_use]
    pub fn new(parent: StyleParent) -> Self {
        Self {
            parent,
            ..Self::default()
        }
    }

    /// Creates an empty style whose parent is a class default.
    #[must_use]
    pub fn inheriting(class: &'static ClassStyle) -> Self {
        Self::new(StyleParent::Class(class))
    }

    /// The parent this style falls back to.
    #[must_use]
    pub fn parent(&self) -> &StyleParent {
        &self.parent
    }

    /// Sets the foreground color.
    #[must_use]
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground_color = Some(color);
        self
    }

    /// Sets the background color.
    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Sets the font size.
    #[must_use]
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Returns true if no property is set locally.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foreground_color.is_none()
            && self.background_color.is_none()
            && self.font.is_none()
            && self.font_size.is_none()
            && self.border == BorderStyle::default()
    }
}

/// Setup routine of a class default, re-run against each new theme.
pub type StyleSetup = fn(&mut ControlStyle, &Theme);

struct Snapshot {
    version: u64,
    style: Arc<ControlStyle>,
}

/// A shared, class-level default style.
///
/// The materialized style is cached together with the theme version it was
/// built from. The first read after a theme swap re-runs `setup`; per-instance
/// styles never rebuild because they resolve through this snapshot on every
/// read.
pub struct ClassStyle {
    name: &'static str,
    parent: Option<&'static ClassStyle>,
    overlay: bool,
    setup: StyleSetup,
    cache: RwLock<Option<Snapshot>>,
    builds: AtomicU64,
}

impl ClassStyle {
    /// Creates a class default inheriting from `parent` (or the theme).
    #[must_use]
    pub const fn new(
        name: &'static str,
        parent: Option<&'static ClassStyle>,
        setup: StyleSetup,
    ) -> Self {
        Self {
            name,
            parent,
            overlay: false,
            setup,
            cache: parking_lot::const_rwlock(None),
            builds: AtomicU64::new(0),
        }
    }

    /// Creates a parentless overlay, used for state variants such as hover.
    /// Unset properties of an overlay fall back to the control's base style.
    #[must_use]
    pub const fn overlay(name: &'static str, setup: StyleSetup) -> Self {
        Self {
            name,
            parent: None,
            overlay: true,
            setup,
            cache: parking_lot::const_rwlock(None),
            builds: AtomicU64::new(0),
        }
    }

    /// Class name, for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true for state overlays.
    #[must_use]
    pub const fn is_overlay(&self) -> bool {
        self.overlay
    }

    /// How many times the snapshot was (re)built.
    #[must_use]
    pub fn builds(&self) -> u64 {
        self.builds.load(Ordering::Relaxed)
    }

    /// Returns the style for the current theme, rebuilding it if stale.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ControlStyle> {
        let version = theme::version();
        if let Some(snapshot) = self.cache.read().as_ref() {
            if snapshot.version == version {
                return Arc::clone(&snapshot.style);
            }
        }

        let theme = theme::current();
        let parent = self.parent.map_or(StyleParent::Theme, StyleParent::Class);
        let mut style = ControlStyle::new(parent);
        (self.setup)(&mut style, &theme);
        let style = Arc::new(style);

        *self.cache.write() = Some(Snapshot {
            version,
            style: Arc::clone(&style),
        });
        self.builds.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(class = self.name, version, "class style rebuilt");
        style
    }
}

impl std::fmt::Debug for ClassStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassStyle")
            .field("name", &self.name)
            .field("parent", &self.parent.map(ClassStyle::name))
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}

/// Base default of every control; sets nothing so the theme shows through.
pub static CONTROL: ClassStyle = ClassStyle::new("Control", None, |_, _| {});
