//! Core control types.

use std::fmt;

use foliage_core::{
    AnchorInfo, Anchors, CellPosition, ControlStyle, DockStyle, Padding, Rect, StyleChain,
};

use super::ControlKind;
use crate::render::PixelBuffer;

/// Unique identifier for a control within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u64);

impl ControlId {
    /// Creates a new control ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Control state flags (bitfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlFlags(u32);

impl ControlFlags {
    /// Control is visible.
    pub const VISIBLE: u32 = 1 << 0;
    /// Control is enabled (can receive input).
    pub const ENABLED: u32 = 1 << 1;
    /// Control is focused.
    pub const FOCUSED: u32 = 1 << 2;
    /// Pointer is over the control.
    pub const HOVERED: u32 = 1 << 3;
    /// A pointer button went down on the control and is still held.
    pub const PRESSED: u32 = 1 << 4;
    /// Pointer-over swaps the control to its hover style.
    pub const HOVERABLE: u32 = 1 << 5;
    /// Children must be re-arranged before the next paint.
    pub const LAYOUT_PENDING: u32 = 1 << 6;

    /// Default flags for a new control.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::ENABLED | Self::LAYOUT_PENDING);

    /// Creates new flags with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag; returns true if it changed.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) -> bool {
        let before = self.0;
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
        before != self.0
    }
}

/// Repaint state machine of one control.
///
/// `Idle → PendingRepaint` on invalidate, `PendingRepaint → Painting` when
/// the frame reaches the control, and back to `Idle` afterwards. An
/// invalidate while `Painting` records a single follow-up repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintState {
    /// Buffer is current.
    Idle,
    /// A repaint is scheduled for the next frame.
    #[default]
    PendingRepaint,
    /// The control is being painted.
    Painting {
        /// Invalidated during this paint.
        follow_up: bool,
    },
}

/// Per-control diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaintCounters {
    /// Invalidate calls targeting this control.
    pub invalidations: u64,
    /// Completed paints into the backing buffer.
    pub paints: u64,
    /// Backing buffer (re)allocations.
    pub buffer_allocations: u64,
}

/// One node of a [`ControlTree`](crate::tree::ControlTree).
///
/// Fields are mutated only through the tree, which keeps invalidation and
/// layout scheduling consistent.
#[derive(Debug)]
pub struct Control {
    pub(crate) id: ControlId,
    pub(crate) parent: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,
    pub(crate) bounds: Rect,
    pub(crate) margin: Padding,
    pub(crate) padding: Padding,
    pub(crate) dock: DockStyle,
    pub(crate) anchor: Anchors,
    pub(crate) anchor_info: Option<AnchorInfo>,
    pub(crate) cell: Option<CellPosition>,
    pub(crate) flags: ControlFlags,
    pub(crate) style: ControlStyle,
    pub(crate) style_hover: ControlStyle,
    pub(crate) kind: ControlKind,
    pub(crate) text: String,
    pub(crate) paint_state: PaintState,
    pub(crate) buffer: Option<PixelBuffer>,
    pub(crate) counters: PaintCounters,
}

impl Control {
    pub(crate) fn new(id: ControlId, parent: Option<ControlId>, kind: ControlKind) -> Self {
        let mut flags = ControlFlags::new();
        flags.assign(ControlFlags::HOVERABLE, kind.is_hoverable());

        Self {
            id,
            parent,
            children: Vec::new(),
            bounds: Rect::from_pos_size(foliage_core::Point::ZERO, kind.default_size()),
            margin: Padding::ZERO,
            padding: Padding::ZERO,
            dock: DockStyle::None,
            anchor: Anchors::TOP_LEFT,
            anchor_info: None,
            cell: None,
            flags,
            style: ControlStyle::inheriting(kind.class_style()),
            style_hover: ControlStyle::inheriting(kind.class_style_hover()),
            kind,
            text: String::new(),
            paint_state: PaintState::PendingRepaint,
            buffer: None,
            counters: PaintCounters::default(),
        }
    }

    /// Control ID.
    #[must_use]
    pub const fn id(&self) -> ControlId {
        self.id
    }

    /// Parent, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// Children in z-order (first is painted first).
    #[must_use]
    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    /// Bounds relative to the parent's client area.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Own pixel space: `(0, 0, width, height)`.
    #[must_use]
    pub const fn client_rect(&self) -> Rect {
        Rect::new(0, 0, self.bounds.width, self.bounds.height)
    }

    /// Client rect minus padding; children are arranged inside it.
    #[must_use]
    pub fn display_rectangle(&self) -> Rect {
        self.client_rect().deflate(self.padding)
    }

    /// Outer spacing.
    #[must_use]
    pub const fn margin(&self) -> Padding {
        self.margin
    }

    /// Inner spacing.
    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// Docking mode.
    #[must_use]
    pub const fn dock(&self) -> DockStyle {
        self.dock
    }

    /// Anchored edges.
    #[must_use]
    pub const fn anchor(&self) -> Anchors {
        self.anchor
    }

    /// Explicit table cell.
    #[must_use]
    pub const fn cell(&self) -> Option<CellPosition> {
        self.cell
    }

    /// State flags.
    #[must_use]
    pub const fn flags(&self) -> ControlFlags {
        self.flags
    }

    /// Returns true if the control is visible.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.has(ControlFlags::VISIBLE)
    }

    /// Returns true if the control accepts input.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.flags.has(ControlFlags::ENABLED)
    }

    /// Returns true if the pointer is over the control.
    #[inline]
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.flags.has(ControlFlags::HOVERED)
    }

    /// Returns true if a pointer button went down on the control and is
    /// still held.
    #[inline]
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.flags.has(ControlFlags::PRESSED)
    }

    /// Returns true if the control has keyboard focus.
    #[inline]
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.flags.has(ControlFlags::FOCUSED)
    }

    /// Returns true if hovering swaps to the hover style.
    #[inline]
    #[must_use]
    pub const fn is_hoverable(&self) -> bool {
        self.flags.has(ControlFlags::HOVERABLE)
    }

    /// Returns true if children must be re-arranged.
    #[inline]
    #[must_use]
    pub const fn is_layout_pending(&self) -> bool {
        self.flags.has(ControlFlags::LAYOUT_PENDING)
    }

    /// Base style of this instance.
    #[must_use]
    pub const fn style(&self) -> &ControlStyle {
        &self.style
    }

    /// Hover style of this instance.
    #[must_use]
    pub const fn style_hover(&self) -> &ControlStyle {
        &self.style_hover
    }

    /// The style chain in effect: hover over base while hovered, base
    /// otherwise.
    #[must_use]
    pub fn current_style(&self) -> StyleChain<'_> {
        if self.is_hovered() && self.is_hoverable() {
            StyleChain::with_state(&self.style_hover, &self.style)
        } else {
            StyleChain::new(&self.style)
        }
    }

    /// Variant data.
    #[must_use]
    pub const fn kind(&self) -> &ControlKind {
        &self.kind
    }

    /// Text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Repaint state.
    #[must_use]
    pub const fn paint_state(&self) -> PaintState {
        self.paint_state
    }

    /// Diagnostics counters.
    #[must_use]
    pub const fn counters(&self) -> PaintCounters {
        self.counters
    }

    /// Backing buffer from the last paint, if any.
    #[must_use]
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }
}
