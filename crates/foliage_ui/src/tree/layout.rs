//! Layout pass over the control tree.
//!
//! Engines see children through [`ChildSlot`]s: a slot borrows the tree to
//! answer preferred-size queries and buffers the bounds the engine
//! assigns. The buffered bounds are applied once the engine is done.

use foliage_core::{
    AnchorInfo, Anchors, BoundsSpecified, CellPosition, DockStyle, LayoutElement, Padding, Rect,
    Size, StyleChain,
};

use super::ControlTree;
use crate::error::{UiError, UiResult};
use crate::widget::{Control, ControlFlags, ControlId};

struct ChildSlot<'t> {
    tree: &'t ControlTree,
    control: &'t Control,
    bounds: Rect,
}

impl<'t> ChildSlot<'t> {
    fn new(tree: &'t ControlTree, id: ControlId) -> Option<Self> {
        let control = tree.get(id)?;
        Some(Self {
            tree,
            control,
            bounds: control.bounds,
        })
    }
}

impl LayoutElement for ChildSlot<'_> {
    fn preferred_size(&self, proposed: Size) -> Size {
        self.tree.measure(self.control, proposed)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect, _specified: BoundsSpecified) {
        self.bounds = bounds;
    }

    fn margin(&self) -> Padding {
        self.control.margin
    }

    fn is_visible(&self) -> bool {
        self.control.is_visible()
    }

    fn dock(&self) -> DockStyle {
        self.control.dock
    }

    fn anchor(&self) -> Anchors {
        self.control.anchor
    }

    fn anchor_info(&self) -> Option<AnchorInfo> {
        self.control.anchor_info
    }

    fn cell(&self) -> Option<CellPosition> {
        self.control.cell
    }
}

impl ControlTree {
    /// Size a control would like when offered `proposed`, padding included.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn preferred_size(&self, id: ControlId, proposed: Size) -> UiResult<Size> {
        let control = self.get(id).ok_or(UiError::UnknownControl(id))?;
        Ok(self.measure(control, proposed))
    }

    fn measure(&self, control: &Control, proposed: Size) -> Size {
        let padding = control.padding;
        let font_size = StyleChain::new(&control.style).font_size();
        let content = control.kind.content_size(control, font_size);
        let mut size = Size::new(
            content.width + padding.horizontal(),
            content.height + padding.vertical(),
        );

        if !control.children.is_empty() {
            let inner = Size::new(
                (proposed.width - padding.horizontal()).max(0),
                (proposed.height - padding.vertical()).max(0),
            );
            let slots: Vec<ChildSlot<'_>> = control
                .children
                .iter()
                .filter_map(|&child| ChildSlot::new(self, child))
                .collect();
            let arranged = control.kind.arranged_size(&slots, inner);
            // Dock extents already include the leading padding.
            let arranged = if control.kind.docks_children() {
                Size::new(arranged.width + padding.right, arranged.height + padding.bottom)
            } else {
                Size::new(
                    arranged.width + padding.horizontal(),
                    arranged.height + padding.vertical(),
                )
            };
            size = size.max(arranged);
        }

        size
    }

    /// Arranges the children of `id` and, recursively, their subtrees.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn perform_layout(&mut self, id: ControlId) -> UiResult<()> {
        let control = self.get(id).ok_or(UiError::UnknownControl(id))?;
        let display = control.display_rectangle();
        let children = control.children.clone();

        let placed: Vec<(ControlId, Rect)> = {
            let mut slots: Vec<ChildSlot<'_>> = children
                .iter()
                .filter_map(|&child| ChildSlot::new(self, child))
                .collect();
            control.kind.arrange(display, &mut slots);
            slots.iter().map(|slot| (slot.control.id, slot.bounds)).collect()
        };
        tracing::debug!(%id, children = placed.len(), "layout pass");

        self.arrange_items(id);
        if let Some(control) = self.control_entry(id) {
            control.flags.clear(ControlFlags::LAYOUT_PENDING);
        }
        for (child, bounds) in placed {
            self.apply_layout_bounds(id, child, bounds);
        }
        for child in children {
            self.perform_layout(child)?;
        }
        Ok(())
    }

    /// Runs a layout pass for every control that needs one, topmost first.
    /// Returns the number of passes started.
    pub fn layout_pending(&mut self) -> usize {
        let mut passes = 0;
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            let Some(control) = self.get(id) else {
                continue;
            };
            if control.is_layout_pending() {
                passes += 1;
                if self.perform_layout(id).is_err() {
                    tracing::warn!(%id, "control vanished during layout");
                }
            } else {
                stack.extend(control.children.iter().rev().copied());
            }
        }
        passes
    }

    fn arrange_items(&mut self, id: ControlId) {
        let Some(control) = self.control_entry(id) else {
            return;
        };
        let display = control.display_rectangle();
        let font_size = StyleChain::new(&control.style).font_size();
        let Some(engine) = control.kind.item_engine() else {
            return;
        };
        if let Some(items) = control.kind.items_mut() {
            items.arrange(engine, display, font_size);
        }
    }

    /// A resized child repaints; a moved one only needs its parent to
    /// recomposite.
    fn apply_layout_bounds(&mut self, parent: ControlId, child: ControlId, bounds: Rect) {
        let Some(control) = self.control_entry(child) else {
            return;
        };
        if control.bounds == bounds {
            return;
        }
        let resized = control.bounds.size() != bounds.size();
        control.bounds = bounds;
        if resized {
            control.flags.set(ControlFlags::LAYOUT_PENDING);
            self.mark_dirty(child);
        } else {
            self.mark_dirty(parent);
        }
    }
}
