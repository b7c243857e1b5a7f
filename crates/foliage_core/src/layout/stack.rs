//! Sequential placement along one axis.

use super::LayoutElement;
use crate::geometry::{Rect, Size};

/// Primary axis of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Places elements one after another from the container origin.
///
/// Each element takes its preferred extent on the primary axis. On the
/// secondary axis it takes its preferred extent, or the full container
/// extent when `expand` is set; either way it is clamped to the container.
/// Spacing comes only from margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StackLayout {
    /// Primary axis.
    pub orientation: Orientation,
    /// Stretch elements across the secondary axis.
    pub expand: bool,
}

impl StackLayout {
    /// Left to right, preferred heights.
    pub const HORIZONTAL: Self = Self::new(Orientation::Horizontal, false);
    /// Top to bottom, preferred widths.
    pub const VERTICAL: Self = Self::new(Orientation::Vertical, false);
    /// Left to right, full container height.
    pub const HORIZONTAL_EXPAND: Self = Self::new(Orientation::Horizontal, true);
    /// Top to bottom, full container width.
    pub const VERTICAL_EXPAND: Self = Self::new(Orientation::Vertical, true);

    /// Creates a stack engine.
    #[must_use]
    pub const fn new(orientation: Orientation, expand: bool) -> Self {
        Self { orientation, expand }
    }

    /// Arranges `elements` inside `container` in collection order.
    pub fn layout<E: LayoutElement>(&self, container: Rect, elements: &mut [E]) {
        let proposed = container.size();

        match self.orientation {
            Orientation::Horizontal => {
                let mut x = container.x;
                for element in elements.iter_mut().filter(|e| e.is_visible()) {
                    let margin = element.margin();
                    let preferred = element.preferred_size(proposed);
                    let available = (container.height - margin.vertical()).max(0);
                    let height = if self.expand {
                        available
                    } else {
                        preferred.height.clamp(0, available)
                    };
                    let width = preferred.width.max(0);

                    let bounds = Rect::new(x + margin.left, container.y + margin.top, width, height);
                    element.set_bounds(bounds, super::BoundsSpecified::NONE);
                    x = bounds.right() + margin.right;
                }
            }
            Orientation::Vertical => {
                let mut y = container.y;
                for element in elements.iter_mut().filter(|e| e.is_visible()) {
                    let margin = element.margin();
                    let preferred = element.preferred_size(proposed);
                    let available = (container.width - margin.horizontal()).max(0);
                    let width = if self.expand {
                        available
                    } else {
                        preferred.width.clamp(0, available)
                    };
                    let height = preferred.height.max(0);

                    let bounds = Rect::new(container.x + margin.left, y + margin.top, width, height);
                    element.set_bounds(bounds, super::BoundsSpecified::NONE);
                    y = bounds.bottom() + margin.bottom;
                }
            }
        }
    }

    /// Sum of extents along the primary axis, maximum across the secondary.
    #[must_use]
    pub fn preferred_size<E: LayoutElement>(&self, elements: &[E], proposed: Size) -> Size {
        let mut primary = 0;
        let mut secondary = 0;

        for element in elements.iter().filter(|e| e.is_visible()) {
            let margin = element.margin();
            let preferred = element.preferred_size(proposed);
            match self.orientation {
                Orientation::Horizontal => {
                    primary += preferred.width + margin.horizontal();
                    secondary = secondary.max(preferred.height + margin.vertical());
                }
                Orientation::Vertical => {
                    primary += preferred.height + margin.vertical();
                    secondary = secondary.max(preferred.width + margin.horizontal());
                }
            }
        }

        match self.orientation {
            Orientation::Horizontal => Size::new(primary, secondary),
            Orientation::Vertical => Size::new(secondary, primary),
        }
    }
}
