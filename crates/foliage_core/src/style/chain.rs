//! Style resolution.
//!
//! A [`StyleChain`] is the finite, ordered list of style levels consulted
//! for a control, instance first. Each getter returns the first value set
//! along the chain and falls back to the theme. Nothing is cached: every
//! read walks the chain again.

use std::ops::Deref;
use std::sync::Arc;

use super::{ControlStyle, Side, StyleParent};
use super::Color;
use crate::theme;

/// Upper bound on chain length; deeper chains indicate a parent cycle.
const MAX_CHAIN_DEPTH: usize = 64;

enum Level<'a> {
    Borrowed(&'a ControlStyle),
    Shared(Arc<ControlStyle>),
}

impl Deref for Level<'_> {
    type Target = ControlStyle;

    fn deref(&self) -> &ControlStyle {
        match self {
            Level::Borrowed(style) => style,
            Level::Shared(style) => style,
        }
    }
}

/// Ordered list of style levels with resolving getters.
pub struct StyleChain<'a> {
    levels: Vec<Level<'a>>,
}

impl<'a> StyleChain<'a> {
    /// Chain for `style` and all of its ancestors.
    #[must_use]
    pub fn new(style: &'a ControlStyle) -> Self {
        let mut chain = Self { levels: Vec::with_capacity(4) };
        chain.push_with_ancestors(Level::Borrowed(style));
        chain
    }

    /// Chain for a state variant: `state` and its ancestors first, then
    /// `base` and its ancestors.
    #[must_use]
    pub fn with_state(state: &'a ControlStyle, base: &'a ControlStyle) -> Self {
        let mut chain = Self { levels: Vec::with_capacity(6) };
        chain.push_with_ancestors(Level::Borrowed(state));
        chain.push_with_ancestors(Level::Borrowed(base));
        chain
    }

    /// Number of levels, excluding the theme.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    fn push_with_ancestors(&mut self, level: Level<'a>) {
        let mut next = level.parent().clone();
        self.levels.push(level);

        loop {
            if self.levels.len() >= MAX_CHAIN_DEPTH {
                debug_assert!(false, "style chain exceeds {MAX_CHAIN_DEPTH} levels");
                tracing::warn!("style chain truncated at {MAX_CHAIN_DEPTH} levels");
                return;
            }
            let style = match next {
                StyleParent::Theme => return,
                StyleParent::Class(class) => class.snapshot(),
                StyleParent::Shared(style) => style,
            };
            next = style.parent().clone();
            self.levels.push(Level::Shared(style));
        }
    }

    fn find<T>(&self, pick: impl Fn(&ControlStyle) -> Option<T>) -> Option<T> {
        self.levels.iter().find_map(|level| pick(&**level))
    }

    /// Resolved foreground color.
    #[must_use]
    pub fn foreground_color(&self) -> Color {
        self.find(|s| s.foreground_color)
            .unwrap_or_else(|| theme::current().foreground)
    }

    /// Resolved background color.
    #[must_use]
    pub fn background_color(&self) -> Color {
        self.find(|s| s.background_color)
            .unwrap_or_else(|| theme::current().background)
    }

    /// Resolved font family.
    #[must_use]
    pub fn font(&self) -> String {
        self.find(|s| s.font.clone())
            .unwrap_or_else(|| theme::current().font.clone())
    }

    /// Resolved font size.
    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.find(|s| s.font_size)
            .unwrap_or_else(|| theme::current().font_size)
    }

    /// Border resolution.
    #[must_use]
    pub fn border(&self) -> BorderChain<'_, 'a> {
        BorderChain { chain: self }
    }
}

/// Border view of a [`StyleChain`].
#[derive(Clone, Copy)]
pub struct BorderChain<'c, 'a> {
    chain: &'c StyleChain<'a>,
}

impl<'c, 'a> BorderChain<'c, 'a> {
    /// One side.
    #[must_use]
    pub fn side(self, side: Side) -> SideChain<'c, 'a> {
        SideChain { chain: self.chain, side }
    }

    /// Left side.
    #[must_use]
    pub fn left(self) -> SideChain<'c, 'a> {
        self.side(Side::Left)
    }

    /// Top side.
    #[must_use]
    pub fn top(self) -> SideChain<'c, 'a> {
        self.side(Side::Top)
    }

    /// Right side.
    #[must_use]
    pub fn right(self) -> SideChain<'c, 'a> {
        self.side(Side::Right)
    }

    /// Bottom side.
    #[must_use]
    pub fn bottom(self) -> SideChain<'c, 'a> {
        self.side(Side::Bottom)
    }

    /// Resolved corner radius.
    #[must_use]
    pub fn radius(self) -> i32 {
        self.chain
            .find(|s| s.border.radius)
            .unwrap_or_else(|| theme::current().border_radius)
    }
}

/// Single-side view of a [`StyleChain`].
#[derive(Clone, Copy)]
pub struct SideChain<'c, 'a> {
    chain: &'c StyleChain<'a>,
    side: Side,
}

impl SideChain<'_, '_> {
    /// Resolved stroke color.
    #[must_use]
    pub fn color(self) -> Color {
        let side = self.side;
        self.chain
            .find(|s| s.border.side(side).color)
            .unwrap_or_else(|| theme::current().border)
    }

    /// Resolved stroke width.
    #[must_use]
    pub fn width(self) -> i32 {
        let side = self.side;
        self.chain
            .find(|s| s.border.side(side).width)
            .unwrap_or_else(|| theme::current().border_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{ClassStyle, CONTROL};

    static PANEL_LIKE: ClassStyle = ClassStyle::new("PanelLike", Some(&CONTROL), |style, theme| {
        style.background_color = Some(theme.hover);
        style.border.set_width(Some(2));
    });

    static HOVER_LIKE: ClassStyle = ClassStyle::overlay("HoverLike", |style, theme| {
        style.background_color = Some(theme.highlight);
    });

    fn nested(depth: usize, set_at: Option<usize>) -> ControlStyle {
        // Level `depth - 1` is the outermost ancestor, level 0 the instance.
        let mut parent = StyleParent::Theme;
        for level in (1..depth).rev() {
            let mut style = ControlStyle::new(parent);
            if set_at.is_some_and(|k| level >= k) {
                style.foreground_color = Some(Color::rgb(level as u8, 0, 0));
            }
            parent = StyleParent::Shared(Arc::new(style));
        }
        let mut instance = ControlStyle::new(parent);
        if set_at == Some(0) {
            instance.foreground_color = Some(Color::rgb(0, 0, 0));
        }
        instance
    }

    #[test]
    fn test_unset_everywhere_falls_back_to_theme() {
        for depth in 1..6 {
            let style = nested(depth, None);
            let chain = StyleChain::new(&style);
            assert_eq!(chain.depth(), depth);
            assert_eq!(chain.foreground_color(), theme::current().foreground);
            assert_eq!(chain.border().top().width(), theme::current().border_width);
        }
    }

    #[test]
    fn test_nearest_level_wins() {
        let depth = 5;
        for level in 0..depth {
            // Every level from `level` outwards is set; the nearest one wins.
            let style = nested(depth, Some(level));
            let chain = StyleChain::new(&style);
            assert_eq!(chain.foreground_color(), Color::rgb(level as u8, 0, 0));
        }

        let mut near = nested(depth, Some(3));
        near.foreground_color = Some(Color::WHITE);
        assert_eq!(StyleChain::new(&near).foreground_color(), Color::WHITE);
    }

    #[test]
    fn test_class_parent_and_side_overrides() {
        let mut style = ControlStyle::inheriting(&PANEL_LIKE);
        style.border.left.width = Some(5);

        let chain = StyleChain::new(&style);
        assert_eq!(chain.background_color(), theme::current().hover);
        assert_eq!(chain.border().left().width(), 5);
        assert_eq!(chain.border().right().width(), 2);
        assert_eq!(chain.border().radius(), theme::current().border_radius);
        // Instance + PanelLike + Control.
        assert_eq!(chain.depth(), 3);
    }

    #[test]
    fn test_state_chain_falls_back_to_base() {
        let base = ControlStyle::inheriting(&PANEL_LIKE).with_foreground(Color::hex(0x12_34_56));
        let hover = ControlStyle::inheriting(&HOVER_LIKE);

        let chain = StyleChain::with_state(&hover, &base);
        assert_eq!(chain.background_color(), theme::current().highlight);
        assert_eq!(chain.foreground_color(), Color::hex(0x12_34_56));
        assert_eq!(chain.border().bottom().width(), 2);
    }

    #[test]
    fn test_snapshot_cached_per_version() {
        let first = PANEL_LIKE.snapshot();
        let second = PANEL_LIKE.snapshot();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(PANEL_LIKE.builds() >= 1);
    }
}
