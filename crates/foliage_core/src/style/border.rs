//! Border styles: one record per side plus a shared corner radius.

use super::Color;

/// One edge of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left edge.
    Left,
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
}

impl Side {
    /// All four sides in paint order.
    pub const ALL: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];
}

/// Locally set values of one border side. Unset values fall back along the
/// owning style chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BorderSideStyle {
    /// Stroke color.
    pub color: Option<Color>,
    /// Stroke width in pixels.
    pub width: Option<i32>,
}

/// Locally set values of a four-sided border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BorderStyle {
    /// Left side.
    pub left: BorderSideStyle,
    /// Top side.
    pub top: BorderSideStyle,
    /// Right side.
    pub right: BorderSideStyle,
    /// Bottom side.
    pub bottom: BorderSideStyle,
    /// Corner radius.
    pub radius: Option<i32>,
}

impl BorderStyle {
    /// Returns one side.
    #[must_use]
    pub const fn side(&self, side: Side) -> &BorderSideStyle {
        match side {
            Side::Left => &self.left,
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
        }
    }

    /// Returns one side for editing.
    pub fn side_mut(&mut self, side: Side) -> &mut BorderSideStyle {
        match side {
            Side::Left => &mut self.left,
            Side::Top => &mut self.top,
            Side::Right => &mut self.right,
            Side::Bottom => &mut self.bottom,
        }
    }

    /// Overwrites the color of all four sides, discarding per-side values.
    pub fn set_color(&mut self, color: Option<Color>) {
        for side in Side::ALL {
            self.side_mut(side).color = color;
        }
    }

    /// Overwrites the width of all four sides, discarding per-side values.
    pub fn set_width(&mut self, width: Option<i32>) {
        for side in Side::ALL {
            self.side_mut(side).width = width;
        }
    }

    /// Sets the corner radius.
    pub fn set_radius(&mut self, radius: Option<i32>) {
        self.radius = radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_color_overwrites_every_side() {
        let mut border = BorderStyle::default();
        border.left.color = Some(Color::hex(0x11_11_11));
        border.bottom.color = Some(Color::hex(0x22_22_22));

        border.set_color(Some(Color::WHITE));

        for side in Side::ALL {
            assert_eq!(border.side(side).color, Some(Color::WHITE));
        }
    }

    #[test]
    fn test_set_width_leaves_colors_alone() {
        let mut border = BorderStyle::default();
        border.top.color = Some(Color::BLACK);
        border.set_width(Some(3));

        assert_eq!(border.top.color, Some(Color::BLACK));
        assert_eq!(border.right.width, Some(3));
    }
}
