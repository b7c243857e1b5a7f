//! Dock and anchor resolution.
//!
//! # Dock algorithm
//! 1. Start with the container rectangle as the remaining area.
//! 2. Visit docked children by priority (Top, Bottom, Left, Right, Fill),
//!    insertion order within the same edge:
//!    - Top: full width at the top of the remaining area
//!    - Bottom: full width at the bottom of the remaining area
//!    - Left: full height at the left of the remaining area
//!    - Right: full height at the right of the remaining area
//!    - Fill: all remaining area
//! 3. Undocked children keep the distances to their anchored edges that
//!    were captured at their last explicit placement.

use super::{AnchorInfo, Anchors, BoundsSpecified, DockStyle, LayoutElement};
use crate::geometry::{Rect, Size};

/// Dock/anchor engine used by plain panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DockLayout;

impl DockLayout {
    /// Arranges `elements` inside `container`.
    pub fn layout<E: LayoutElement>(&self, container: Rect, elements: &mut [E]) {
        let mut docked: Vec<usize> = (0..elements.len())
            .filter(|&i| elements[i].is_visible() && elements[i].dock() != DockStyle::None)
            .collect();
        // Stable: same-edge siblings keep insertion order.
        docked.sort_by_key(|&i| elements[i].dock().priority());

        let mut area = container;
        for index in docked {
            let element = &mut elements[index];
            let bounds = dock_one(&mut area, element);
            element.set_bounds(bounds, BoundsSpecified::NONE);
        }

        for element in elements
            .iter_mut()
            .filter(|e| e.is_visible() && e.dock() == DockStyle::None)
        {
            let bounds = anchor_one(container, &*element);
            if bounds != element.bounds() {
                element.set_bounds(bounds, BoundsSpecified::NONE);
            }
        }
    }

    /// Union of child bounds plus margins.
    ///
    /// Fill-docked children contribute nothing. Children anchored to the
    /// right (bottom) edge do not contribute to the width (height), since
    /// they follow the container rather than size it.
    #[must_use]
    pub fn preferred_size<E: LayoutElement>(&self, elements: &[E], _proposed: Size) -> Size {
        let mut size = Size::ZERO;

        for element in elements.iter().filter(|e| e.is_visible()) {
            if element.dock() == DockStyle::Fill {
                continue;
            }
            let bounds = element.bounds();
            let margin = element.margin();
            let anchor = element.anchor();
            let undocked = element.dock() == DockStyle::None;

            if !(undocked && anchor.has(Anchors::RIGHT)) {
                size.width = size.width.max(bounds.right() + margin.right);
            }
            if !(undocked && anchor.has(Anchors::BOTTOM)) {
                size.height = size.height.max(bounds.bottom() + margin.bottom);
            }
        }

        size
    }
}

fn dock_one<E: LayoutElement>(area: &mut Rect, element: &E) -> Rect {
    let margin = element.margin();
    let current = element.bounds();
    let full_width = (area.width - margin.horizontal()).max(0);
    let full_height = (area.height - margin.vertical()).max(0);

    match element.dock() {
        DockStyle::Top => {
            let height = current.height.clamp(0, full_height);
            let bounds = Rect::new(area.x + margin.left, area.y + margin.top, full_width, height);
            let used = (height + margin.vertical()).min(area.height);
            area.y += used;
            area.height -= used;
            bounds
        }
        DockStyle::Bottom => {
            let height = current.height.clamp(0, full_height);
            let bounds = Rect::new(
                area.x + margin.left,
                area.bottom() - margin.bottom - height,
                full_width,
                height,
            );
            area.height -= (height + margin.vertical()).min(area.height);
            bounds
        }
        DockStyle::Left => {
            let width = current.width.clamp(0, full_width);
            let bounds = Rect::new(area.x + margin.left, area.y + margin.top, width, full_height);
            let used = (width + margin.horizontal()).min(area.width);
            area.x += used;
            area.width -= used;
            bounds
        }
        DockStyle::Right => {
            let width = current.width.clamp(0, full_width);
            let bounds = Rect::new(
                area.right() - margin.right - width,
                area.y + margin.top,
                width,
                full_height,
            );
            area.width -= (width + margin.horizontal()).min(area.width);
            bounds
        }
        DockStyle::Fill => Rect::new(area.x + margin.left, area.y + margin.top, full_width, full_height),
        DockStyle::None => current,
    }
}

fn anchor_one<E: LayoutElement>(container: Rect, element: &E) -> Rect {
    let current = element.bounds();
    match element.anchor_info() {
        Some(info) => info.resolve(container, element.anchor(), current.size()),
        None => current,
    }
}

fn resolve_axis(
    origin: i32,
    extent: i32,
    size: i32,
    near: i32,
    far: i32,
    near_anchored: bool,
    far_anchored: bool,
) -> (i32, i32) {
    match (near_anchored, far_anchored) {
        (true, true) => (origin + near, (extent - near - far).max(0)),
        (false, true) => (origin + extent - far - size, size),
        _ => (origin + near, size),
    }
}

impl AnchorInfo {
    /// Bounds this info implies inside a container, for the given anchors
    /// and current size.
    #[must_use]
    pub fn resolve(&self, container: Rect, anchor: Anchors, size: Size) -> Rect {
        let (x, width) = resolve_axis(
            container.x,
            container.width,
            size.width,
            self.left,
            self.right,
            anchor.has(Anchors::LEFT),
            anchor.has(Anchors::RIGHT),
        );
        let (y, height) = resolve_axis(
            container.y,
            container.height,
            size.height,
            self.top,
            self.bottom,
            anchor.has(Anchors::TOP),
            anchor.has(Anchors::BOTTOM),
        );
        Rect::new(x, y, width, height)
    }
}
