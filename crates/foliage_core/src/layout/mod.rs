//! Layout engines.
//!
//! Every engine is a stateless algorithm over a container rectangle and a
//! slice of [`LayoutElement`]s. Engines only ever touch elements through
//! the trait, so they run the same against a control tree or a plain test
//! vector.

mod dock;
mod stack;
mod table;

pub use dock::DockLayout;
pub use stack::{Orientation, StackLayout};
pub use table::{CellPosition, ColumnStyle, RowStyle, SizeType, TableLayout, TrackStyle};

use std::ops::BitOr;

use crate::geometry::{Padding, Rect, Size};

/// Edge a child docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DockStyle {
    /// Not docked; positioned by anchors.
    #[default]
    None,
    /// Full-width strip at the top of the remaining area.
    Top,
    /// Full-width strip at the bottom of the remaining area.
    Bottom,
    /// Full-height strip at the left of the remaining area.
    Left,
    /// Full-height strip at the right of the remaining area.
    Right,
    /// Everything that is left.
    Fill,
}

impl DockStyle {
    /// Processing priority; lower runs first.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::Fill => 4,
            Self::None => 5,
        }
    }
}

/// Set of container edges a child keeps a fixed distance to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchors(u8);

impl Anchors {
    /// No edges.
    pub const NONE: Self = Self(0);
    /// Top edge.
    pub const TOP: Self = Self(1 << 0);
    /// Bottom edge.
    pub const BOTTOM: Self = Self(1 << 1);
    /// Left edge.
    pub const LEFT: Self = Self(1 << 2);
    /// Right edge.
    pub const RIGHT: Self = Self(1 << 3);
    /// Top and left, the default.
    pub const TOP_LEFT: Self = Self(Self::TOP.0 | Self::LEFT.0);
    /// All four edges: the child stretches with the container.
    pub const ALL: Self = Self(0b1111);

    /// Returns true if every edge in `other` is set.
    #[inline]
    #[must_use]
    pub const fn has(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for Anchors {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

impl BitOr for Anchors {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Which components of a `set_bounds` call were specified by the user.
///
/// Layout engines pass [`BoundsSpecified::NONE`]; anything else is an
/// explicit placement and re-captures the element's anchor distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundsSpecified(u8);

impl BoundsSpecified {
    /// Placement computed by a layout engine.
    pub const NONE: Self = Self(0);
    /// X coordinate.
    pub const X: Self = Self(1 << 0);
    /// Y coordinate.
    pub const Y: Self = Self(1 << 1);
    /// Width.
    pub const WIDTH: Self = Self(1 << 2);
    /// Height.
    pub const HEIGHT: Self = Self(1 << 3);
    /// X and Y.
    pub const LOCATION: Self = Self(Self::X.0 | Self::Y.0);
    /// Width and height.
    pub const SIZE: Self = Self(Self::WIDTH.0 | Self::HEIGHT.0);
    /// Everything.
    pub const ALL: Self = Self(0b1111);

    /// Returns true if every component in `other` is set.
    #[inline]
    #[must_use]
    pub const fn has(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true for a user placement.
    #[inline]
    #[must_use]
    pub const fn is_explicit(self) -> bool {
        self.0 != 0
    }
}

impl BitOr for BoundsSpecified {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Distances from an element's edges to its container's edges, captured at
/// the last explicit placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AnchorInfo {
    /// Container left to element left.
    pub left: i32,
    /// Container top to element top.
    pub top: i32,
    /// Element right to container right.
    pub right: i32,
    /// Element bottom to container bottom.
    pub bottom: i32,
}

impl AnchorInfo {
    /// Captures distances of `bounds` within a container of `container` size.
    /// `bounds` is relative to the container's layout origin.
    #[must_use]
    pub const fn capture(bounds: Rect, container: Size) -> Self {
        Self {
            left: bounds.x,
            top: bounds.y,
            right: container.width - bounds.right(),
            bottom: container.height - bounds.bottom(),
        }
    }
}

/// Capabilities an element needs to take part in layout.
pub trait LayoutElement {
    /// Size the element would like when offered `proposed`.
    fn preferred_size(&self, proposed: Size) -> Size;

    /// Current bounds, relative to the container's client area.
    fn bounds(&self) -> Rect;

    /// Assigns new bounds.
    fn set_bounds(&mut self, bounds: Rect, specified: BoundsSpecified);

    /// Outer spacing.
    fn margin(&self) -> Padding {
        Padding::ZERO
    }

    /// Hidden elements are skipped by every engine.
    fn is_visible(&self) -> bool {
        true
    }

    /// Docking mode, used by [`DockLayout`].
    fn dock(&self) -> DockStyle {
        DockStyle::None
    }

    /// Anchored edges, used by [`DockLayout`] for undocked elements.
    fn anchor(&self) -> Anchors {
        Anchors::TOP_LEFT
    }

    /// Distances captured at the last explicit placement, if any.
    fn anchor_info(&self) -> Option<AnchorInfo> {
        None
    }

    /// Explicit table cell, used by [`TableLayout`].
    fn cell(&self) -> Option<CellPosition> {
        None
    }
}

/// The engine a container arranges its children with.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEngine {
    /// Dock and anchor resolution.
    Dock(DockLayout),
    /// Sequential placement along one axis.
    Stack(StackLayout),
    /// Rows and columns.
    Table(TableLayout),
}

impl LayoutEngine {
    /// Arranges `elements` inside `container`.
    pub fn layout<E: LayoutElement>(&self, container: Rect, elements: &mut [E]) {
        match self {
            Self::Dock(engine) => engine.layout(container, elements),
            Self::Stack(engine) => engine.layout(container, elements),
            Self::Table(engine) => engine.layout(container, elements),
        }
    }

    /// Minimum size that fits the arranged `elements`, excluding padding.
    #[must_use]
    pub fn preferred_size<E: LayoutElement>(&self, elements: &[E], proposed: Size) -> Size {
        match self {
            Self::Dock(engine) => engine.preferred_size(elements, proposed),
            Self::Stack(engine) => engine.preferred_size(elements, proposed),
            Self::Table(engine) => engine.preferred_size(elements, proposed),
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::Dock(DockLayout)
    }
}

/// Plain layout element for tests, benchmarks and callers without a tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Size reported by `preferred_size`.
    pub preferred: Size,
    /// Current bounds.
    pub bounds: Rect,
    /// Outer spacing.
    pub margin: Padding,
    /// Hidden elements are skipped.
    pub hidden: bool,
    /// Docking mode.
    pub dock: DockStyle,
    /// Anchored edges.
    pub anchor: Anchors,
    /// Captured anchor distances.
    pub anchor_info: Option<AnchorInfo>,
    /// Explicit table cell.
    pub cell: Option<CellPosition>,
}

impl Element {
    /// Element with a preferred size.
    #[must_use]
    pub fn sized(width: i32, height: i32) -> Self {
        Self {
            preferred: Size::new(width, height),
            bounds: Rect::new(0, 0, width, height),
            ..Self::default()
        }
    }

    /// Sets the dock mode.
    #[must_use]
    pub fn docked(mut self, dock: DockStyle) -> Self {
        self.dock = dock;
        self
    }

    /// Sets the margin.
    #[must_use]
    pub fn with_margin(mut self, margin: Padding) -> Self {
        self.margin = margin;
        self
    }

    /// Places the element explicitly inside a container of `container`
    /// size, capturing anchor distances.
    #[must_use]
    pub fn placed(mut self, bounds: Rect, container: Size, anchor: Anchors) -> Self {
        self.bounds = bounds;
        self.anchor = anchor;
        self.anchor_info = Some(AnchorInfo::capture(bounds, container));
        self
    }

    /// Pins the element to a table cell.
    #[must_use]
    pub fn in_cell(mut self, column: usize, row: usize) -> Self {
        self.cell = Some(CellPosition::new(column, row));
        self
    }
}

impl LayoutElement for Element {
    fn preferred_size(&self, _proposed: Size) -> Size {
        self.preferred
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect, _specified: BoundsSpecified) {
        self.bounds = bounds;
    }

    fn margin(&self) -> Padding {
        self.margin
    }

    fn is_visible(&self) -> bool {
        !self.hidden
    }

    fn dock(&self) -> DockStyle {
        self.dock
    }

    fn anchor(&self) -> Anchors {
        self.anchor
    }

    fn anchor_info(&self) -> Option<AnchorInfo> {
        self.anchor_info
    }

    fn cell(&self) -> Option<CellPosition> {
        self.cell
    }
}
