//! Control tree for hierarchical UI management.
//!
//! Controls live in an arena keyed by [`ControlId`]; parent and child links
//! are ids, so removing a subtree needs no reference clearing. Every
//! mutator schedules the layout and repaint work its change implies.

mod layout;
mod paint;

pub use paint::FrameStats;

use std::collections::HashMap;

use foliage_core::layout::{ColumnStyle, RowStyle};
use foliage_core::{
    theme, AnchorInfo, Anchors, BoundsSpecified, CellPosition, ControlStyle, DockStyle, Padding,
    Rect, Size, TableLayout,
};

use crate::config::TreeConfig;
use crate::error::{UiError, UiResult};
use crate::items::ItemCollection;
use crate::platform::PlatformWindow;
use crate::widget::{Control, ControlFlags, ControlId, ControlKind, PaintState};

/// Owns every control of one window.
#[derive(Debug)]
pub struct ControlTree {
    controls: HashMap<ControlId, Control>,
    root: ControlId,
    next_id: u64,
    config: TreeConfig,
    pub(crate) hovered: Option<ControlId>,
    pub(crate) focused: Option<ControlId>,
    pub(crate) pressed: Option<ControlId>,
    frame_requested: bool,
    theme_version: u64,
}

impl ControlTree {
    /// Creates a tree whose root is a `root_kind` control.
    #[must_use]
    pub fn new(root_kind: ControlKind) -> Self {
        Self::with_config(root_kind, TreeConfig::default())
    }

    /// Creates a tree with explicit settings.
    #[must_use]
    pub fn with_config(root_kind: ControlKind, config: TreeConfig) -> Self {
        let root = ControlId::new(1);
        let mut controls = HashMap::with_capacity(64);
        controls.insert(root, Control::new(root, None, root_kind));

        Self {
            controls,
            root,
            next_id: 2,
            config,
            hovered: None,
            focused: None,
            pressed: None,
            frame_requested: true,
            theme_version: theme::version(),
        }
    }

    /// Tree settings.
    #[must_use]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// The root control.
    #[must_use]
    pub const fn root(&self) -> ControlId {
        self.root
    }

    /// Number of controls, root included.
    #[must_use]
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Returns true if `id` is in the tree.
    #[must_use]
    pub fn contains(&self, id: ControlId) -> bool {
        self.controls.contains_key(&id)
    }

    /// Gets a control by ID.
    #[must_use]
    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(&id)
    }

    fn control(&self, id: ControlId) -> UiResult<&Control> {
        self.controls.get(&id).ok_or(UiError::UnknownControl(id))
    }

    fn control_mut(&mut self, id: ControlId) -> UiResult<&mut Control> {
        self.controls.get_mut(&id).ok_or(UiError::UnknownControl(id))
    }

    /// Returns the children of a control.
    #[must_use]
    pub fn children(&self, id: ControlId) -> &[ControlId] {
        self.controls.get(&id).map_or(&[], |c| c.children.as_slice())
    }

    /// Returns the parent of a control.
    #[must_use]
    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.controls.get(&id).and_then(Control::parent)
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: ControlId, id: ControlId) -> bool {
        let mut next = Some(id);
        while let Some(current) = next {
            if current == ancestor {
                return true;
            }
            next = self.parent(current);
        }
        false
    }

    /// Returns all control IDs in depth-first order, root first.
    pub fn iter_dfs(&self) -> impl Iterator<Item = ControlId> + '_ {
        self.iter_subtree(self.root)
    }

    /// Returns `id` and its descendants in depth-first order.
    pub fn iter_subtree(&self, id: ControlId) -> impl Iterator<Item = ControlId> + '_ {
        ControlDfsIterator {
            tree: self,
            stack: if self.contains(id) { vec![id] } else { Vec::new() },
        }
    }

    /// Appends a new control under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `parent` is not in the tree.
    pub fn insert(&mut self, parent: ControlId, kind: ControlKind) -> UiResult<ControlId> {
        let index = self.control(parent)?.children.len();
        self.insert_at(parent, index, kind)
    }

    /// Inserts a new control under `parent` at `index` (clamped to the
    /// child count).
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `parent` is not in the tree.
    pub fn insert_at(
        &mut self,
        parent: ControlId,
        index: usize,
        kind: ControlKind,
    ) -> UiResult<ControlId> {
        let id = ControlId::new(self.next_id);
        let name = kind.name();
        let mut control = Control::new(id, Some(parent), kind);

        let siblings = self.control_mut(parent)?;
        let index = index.min(siblings.children.len());
        control.anchor_info = Some(capture_anchor(siblings, control.bounds));
        siblings.children.insert(index, id);
        siblings.flags.set(ControlFlags::LAYOUT_PENDING);

        self.next_id += 1;
        self.controls.insert(id, control);
        self.mark_dirty(id);
        tracing::debug!(%id, %parent, kind = name, "control inserted");
        Ok(id)
    }

    /// Removes a control and its whole subtree, dropping their buffers.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::CannotRemoveRoot`] for the root and
    /// [`UiError::UnknownControl`] for ids not in the tree.
    pub fn remove(&mut self, id: ControlId) -> UiResult<()> {
        if id == self.root {
            return Err(UiError::CannotRemoveRoot);
        }
        let parent = self.control(id)?.parent;
        let doomed: Vec<ControlId> = self.iter_subtree(id).collect();

        self.detach(id, parent);
        for control in &doomed {
            self.controls.remove(control);
        }
        for slot in [&mut self.hovered, &mut self.focused, &mut self.pressed] {
            if slot.is_some_and(|c| doomed.contains(&c)) {
                *slot = None;
            }
        }
        tracing::debug!(%id, removed = doomed.len(), "control removed");
        Ok(())
    }

    /// Moves a control under a new parent, appended last.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidParent`] if `new_parent` is `id` or one of
    /// its descendants (or `id` is the root), and
    /// [`UiError::UnknownControl`] for ids not in the tree.
    pub fn reparent(&mut self, id: ControlId, new_parent: ControlId) -> UiResult<()> {
        let old_parent = self.control(id)?.parent;
        self.control(new_parent)?;
        if id == self.root || self.is_ancestor_or_self(id, new_parent) {
            return Err(UiError::InvalidParent {
                child: id,
                parent: new_parent,
            });
        }

        self.detach(id, old_parent);
        let bounds = self.control(id)?.bounds;
        let target = self.control_mut(new_parent)?;
        target.children.push(id);
        target.flags.set(ControlFlags::LAYOUT_PENDING);
        let info = capture_anchor(target, bounds);

        let control = self.control_mut(id)?;
        control.parent = Some(new_parent);
        control.anchor_info = Some(info);
        self.mark_dirty(id);
        Ok(())
    }

    fn detach(&mut self, id: ControlId, parent: Option<ControlId>) {
        let Some(parent) = parent else { return };
        if let Some(control) = self.controls.get_mut(&parent) {
            control.children.retain(|&c| c != id);
            control.flags.set(ControlFlags::LAYOUT_PENDING);
        }
        self.mark_dirty(parent);
    }

    /// Sizes the root to the window's client area.
    pub fn resize_root(&mut self, size: Size) {
        let root = self.root;
        let bounds = Rect::new(0, 0, size.width.max(0), size.height.max(0));
        if let Some(control) = self.controls.get_mut(&root) {
            if control.bounds == bounds {
                return;
            }
            control.bounds = bounds;
            control.flags.set(ControlFlags::LAYOUT_PENDING);
        }
        self.mark_dirty(root);
    }

    /// Follows the window size and asks for a frame tick when work is
    /// pending.
    pub fn sync_window(&mut self, window: &dyn PlatformWindow) {
        self.resize_root(window.client_size());
        if self.needs_frame() {
            window.request_frame();
        }
    }

    /// Sets bounds; only the components in `specified` change. A user
    /// placement (anything but [`BoundsSpecified::NONE`]) re-captures the
    /// anchor distances; `NONE` applies all components as a layout engine
    /// would.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_bounds(
        &mut self,
        id: ControlId,
        bounds: Rect,
        specified: BoundsSpecified,
    ) -> UiResult<()> {
        let control = self.control(id)?;
        let old = control.bounds;
        let parent = control.parent;
        let new = if specified.is_explicit() {
            Rect::new(
                pick(specified.has(BoundsSpecified::X), bounds.x, old.x),
                pick(specified.has(BoundsSpecified::Y), bounds.y, old.y),
                pick(specified.has(BoundsSpecified::WIDTH), bounds.width, old.width),
                pick(specified.has(BoundsSpecified::HEIGHT), bounds.height, old.height),
            )
        } else {
            bounds
        };
        let new = Rect::new(new.x, new.y, new.width.max(0), new.height.max(0));

        let info = match parent {
            Some(parent) if specified.is_explicit() => {
                Some(capture_anchor(self.control(parent)?, new))
            }
            _ => None,
        };

        let control = self.control_mut(id)?;
        if let Some(info) = info {
            control.anchor_info = Some(info);
        }
        if control.bounds == new {
            return Ok(());
        }
        control.bounds = new;
        if old.size() != new.size() {
            control.flags.set(ControlFlags::LAYOUT_PENDING);
            self.mark_dirty(id);
        }
        if let Some(parent) = parent {
            self.schedule_layout(parent);
        }
        Ok(())
    }

    /// Shows or hides a control.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) -> UiResult<()> {
        let control = self.control_mut(id)?;
        if !control.flags.assign(ControlFlags::VISIBLE, visible) {
            return Ok(());
        }
        let parent = control.parent;
        if visible {
            self.mark_dirty(id);
        }
        if let Some(parent) = parent {
            self.schedule_layout(parent);
        }
        Ok(())
    }

    /// Enables or disables input; disabled controls paint dimmed text.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_enabled(&mut self, id: ControlId, enabled: bool) -> UiResult<()> {
        if self.control_mut(id)?.flags.assign(ControlFlags::ENABLED, enabled) {
            self.mark_dirty(id);
        }
        Ok(())
    }

    /// Replaces the text; the parent re-arranges since the content size
    /// may change.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_text(&mut self, id: ControlId, text: impl Into<String>) -> UiResult<()> {
        let text = text.into();
        let control = self.control_mut(id)?;
        if control.text == text {
            return Ok(());
        }
        control.text = text;
        self.invalidate_layout(id)
    }

    /// Sets the docking mode.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_dock(&mut self, id: ControlId, dock: DockStyle) -> UiResult<()> {
        self.update_placement(id, |c| std::mem::replace(&mut c.dock, dock) != dock)
    }

    /// Sets the anchored edges and captures distances from the current
    /// bounds.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_anchor(&mut self, id: ControlId, anchor: Anchors) -> UiResult<()> {
        let control = self.control(id)?;
        let bounds = control.bounds;
        let info = match control.parent {
            Some(parent) => Some(capture_anchor(self.control(parent)?, bounds)),
            None => None,
        };
        self.update_placement(id, |c| {
            c.anchor_info = info;
            std::mem::replace(&mut c.anchor, anchor) != anchor
        })
    }

    /// Sets the outer spacing.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_margin(&mut self, id: ControlId, margin: Padding) -> UiResult<()> {
        self.update_placement(id, |c| std::mem::replace(&mut c.margin, margin) != margin)
    }

    /// Pins a control to a table cell, or returns it to automatic
    /// placement.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_cell(&mut self, id: ControlId, cell: Option<CellPosition>) -> UiResult<()> {
        self.update_placement(id, |c| std::mem::replace(&mut c.cell, cell) != cell)
    }

    fn update_placement(
        &mut self,
        id: ControlId,
        edit: impl FnOnce(&mut Control) -> bool,
    ) -> UiResult<()> {
        let control = self.control_mut(id)?;
        let parent = control.parent;
        if edit(control) {
            if let Some(parent) = parent {
                self.schedule_layout(parent);
            }
        }
        Ok(())
    }

    /// Sets the inner spacing.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_padding(&mut self, id: ControlId, padding: Padding) -> UiResult<()> {
        let control = self.control_mut(id)?;
        if std::mem::replace(&mut control.padding, padding) != padding {
            self.invalidate_layout(id)?;
        }
        Ok(())
    }

    /// Base style for editing. Schedules a repaint; use
    /// [`ControlTree::set_font_size`] for changes that affect layout.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn style_mut(&mut self, id: ControlId) -> UiResult<&mut ControlStyle> {
        self.control(id)?;
        self.mark_dirty(id);
        Ok(&mut self.control_mut(id)?.style)
    }

    /// Hover style for editing. Schedules a repaint.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn style_hover_mut(&mut self, id: ControlId) -> UiResult<&mut ControlStyle> {
        self.control(id)?;
        self.mark_dirty(id);
        Ok(&mut self.control_mut(id)?.style_hover)
    }

    /// Sets the instance font size, `None` to inherit.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn set_font_size(&mut self, id: ControlId, size: Option<f32>) -> UiResult<()> {
        self.control_mut(id)?.style.font_size = size;
        self.invalidate_layout(id)
    }

    /// Items of a list box or tab strip, for editing. Schedules layout and
    /// repaint.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Unsupported`] for other kinds.
    pub fn items_mut(&mut self, id: ControlId) -> UiResult<&mut ItemCollection> {
        let kind = self.control(id)?.kind.name();
        if self.control(id)?.kind.items().is_none() {
            return Err(UiError::Unsupported {
                operation: "items",
                kind,
            });
        }
        self.invalidate_layout(id)?;
        self.control_mut(id)?
            .kind
            .items_mut()
            .ok_or(UiError::Unsupported {
                operation: "items",
                kind,
            })
    }

    /// Selects an item of a list box or tab strip, `None` to clear.
    ///
    /// The previous item is deselected and the new one selected before a
    /// single invalidation. Returns true if the selection changed.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Unsupported`] for other kinds.
    pub fn set_selected_item(&mut self, id: ControlId, index: Option<usize>) -> UiResult<bool> {
        let control = self.control_mut(id)?;
        let kind = control.kind.name();
        let items = control.kind.items_mut().ok_or(UiError::Unsupported {
            operation: "selection",
            kind,
        })?;
        let changed = items.select(index);
        if changed {
            self.mark_dirty(id);
        }
        Ok(changed)
    }

    /// Sets the state of a check box. Returns true if it changed.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Unsupported`] for other kinds.
    pub fn set_checked(&mut self, id: ControlId, value: bool) -> UiResult<bool> {
        let control = self.control_mut(id)?;
        let kind = control.kind.name();
        let ControlKind::CheckBox { checked } = &mut control.kind else {
            return Err(UiError::Unsupported {
                operation: "checked state",
                kind,
            });
        };
        let changed = std::mem::replace(checked, value) != value;
        if changed {
            self.mark_dirty(id);
        }
        Ok(changed)
    }

    /// Table engine of a table layout panel, for editing. Schedules layout.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Unsupported`] for other kinds.
    pub fn table_mut(&mut self, id: ControlId) -> UiResult<&mut TableLayout> {
        let control = self.control(id)?;
        if !matches!(control.kind, ControlKind::TableLayoutPanel(_)) {
            return Err(UiError::Unsupported {
                operation: "table styles",
                kind: control.kind.name(),
            });
        }
        self.schedule_layout(id);
        match &mut self.control_mut(id)?.kind {
            ControlKind::TableLayoutPanel(table) => Ok(table),
            other => Err(UiError::Unsupported {
                operation: "table styles",
                kind: other.name(),
            }),
        }
    }

    /// Replaces a column style of a table layout panel.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Layout`] for an out-of-range index and
    /// [`UiError::Unsupported`] for other kinds.
    pub fn set_column_style(
        &mut self,
        id: ControlId,
        index: usize,
        style: ColumnStyle,
    ) -> UiResult<()> {
        Ok(self.table_mut(id)?.set_column_style(index, style)?)
    }

    /// Replaces a row style of a table layout panel.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Layout`] for an out-of-range index and
    /// [`UiError::Unsupported`] for other kinds.
    pub fn set_row_style(&mut self, id: ControlId, index: usize, style: RowStyle) -> UiResult<()> {
        Ok(self.table_mut(id)?.set_row_style(index, style)?)
    }

    /// Schedules a repaint of `id` on the next frame. Calls before that
    /// frame coalesce into one repaint.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn invalidate(&mut self, id: ControlId) -> UiResult<()> {
        self.control(id)?;
        self.mark_dirty(id);
        Ok(())
    }

    /// Like [`ControlTree::invalidate`], for changes that also affect the
    /// control's size or its children's placement: the control and its
    /// parent are laid out again before the repaint.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::UnknownControl`] if `id` is not in the tree.
    pub fn invalidate_layout(&mut self, id: ControlId) -> UiResult<()> {
        let control = self.control_mut(id)?;
        control.flags.set(ControlFlags::LAYOUT_PENDING);
        let parent = control.parent;
        if let Some(parent) = parent {
            self.schedule_layout(parent);
        }
        self.mark_dirty(id);
        Ok(())
    }

    /// Returns true if a frame tick should be requested.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.frame_requested || self.theme_version != theme::version()
    }

    /// Control under the pointer.
    #[must_use]
    pub const fn hovered(&self) -> Option<ControlId> {
        self.hovered
    }

    /// Control with keyboard focus.
    #[must_use]
    pub const fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    pub(crate) fn control_entry(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(&id)
    }

    fn schedule_layout(&mut self, id: ControlId) {
        if let Some(control) = self.controls.get_mut(&id) {
            control.flags.set(ControlFlags::LAYOUT_PENDING);
        }
        self.mark_dirty(id);
    }

    /// Moves `id` toward a repaint and makes every ancestor recomposite.
    pub(crate) fn mark_dirty(&mut self, id: ControlId) {
        let Some(control) = self.controls.get_mut(&id) else {
            return;
        };
        control.counters.invalidations += 1;
        if control.paint_state == PaintState::PendingRepaint {
            tracing::trace!(%id, "invalidate coalesced");
        }
        control.paint_state = schedule(control.paint_state);

        let mut next = control.parent;
        while let Some(parent) = next {
            let Some(control) = self.controls.get_mut(&parent) else {
                break;
            };
            control.paint_state = schedule(control.paint_state);
            next = control.parent;
        }
        self.frame_requested = true;
    }

    pub(crate) fn observe_theme(&mut self) {
        let version = theme::version();
        if version == self.theme_version {
            return;
        }
        tracing::debug!(from = self.theme_version, to = version, "theme changed, invalidating all controls");
        self.theme_version = version;

        let ids: Vec<ControlId> = self.controls.keys().copied().collect();
        for id in ids {
            if let Some(control) = self.controls.get_mut(&id) {
                control.flags.set(ControlFlags::LAYOUT_PENDING);
            }
            self.mark_dirty(id);
        }
    }

    pub(crate) fn take_frame_request(&mut self) {
        self.frame_requested = false;
    }

    pub(crate) fn request_frame(&mut self) {
        self.frame_requested = true;
    }
}

const fn schedule(state: PaintState) -> PaintState {
    match state {
        PaintState::Idle | PaintState::PendingRepaint => PaintState::PendingRepaint,
        PaintState::Painting { .. } => PaintState::Painting { follow_up: true },
    }
}

const fn pick(specified: bool, new: i32, old: i32) -> i32 {
    if specified {
        new
    } else {
        old
    }
}

/// Anchor distances of `bounds` inside `parent`'s display rectangle.
fn capture_anchor(parent: &Control, bounds: Rect) -> AnchorInfo {
    let display = parent.display_rectangle();
    AnchorInfo::capture(bounds.offset(-display.x, -display.y), display.size())
}

/// Depth-first iterator over a control tree.
struct ControlDfsIterator<'a> {
    tree: &'a ControlTree,
    stack: Vec<ControlId>,
}

impl Iterator for ControlDfsIterator<'_> {
    type Item = ControlId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        self.stack.extend(self.tree.children(id).iter().rev().copied());

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foliage_core::StackLayout;

    fn tree() -> ControlTree {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        tree
    }

    #[test]
    fn test_tree_hierarchy() {
        let mut tree = tree();
        let root = tree.root();
        let a = tree.insert(root, ControlKind::Panel).unwrap();
        let b = tree.insert(root, ControlKind::Label).unwrap();
        let c = tree.insert_at(root, 0, ControlKind::Button).unwrap();
        let d = tree.insert(a, ControlKind::Label).unwrap();

        assert_eq!(tree.children(root), &[c, a, b]);
        assert_eq!(tree.parent(d), Some(a));
        let order: Vec<ControlId> = tree.iter_dfs().collect();
        assert_eq!(order, vec![root, c, a, d, b]);
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut tree = tree();
        let root = tree.root();
        let panel = tree.insert(root, ControlKind::Panel).unwrap();
        let label = tree.insert(panel, ControlKind::Label).unwrap();

        tree.remove(panel).unwrap();
        assert!(!tree.contains(panel));
        assert!(!tree.contains(label));
        assert!(tree.children(root).is_empty());
        assert!(matches!(tree.remove(root), Err(UiError::CannotRemoveRoot)));
        assert!(matches!(tree.remove(panel), Err(UiError::UnknownControl(_))));
    }

    #[test]
    fn test_reparent_rejects_cycles() {
        let mut tree = tree();
        let root = tree.root();
        let outer = tree.insert(root, ControlKind::Panel).unwrap();
        let inner = tree.insert(outer, ControlKind::Panel).unwrap();

        assert!(matches!(
            tree.reparent(outer, inner),
            Err(UiError::InvalidParent { .. })
        ));
        assert!(matches!(
            tree.reparent(outer, outer),
            Err(UiError::InvalidParent { .. })
        ));

        tree.reparent(inner, root).unwrap();
        assert_eq!(tree.children(root), &[outer, inner]);
        assert!(tree.children(outer).is_empty());
    }

    #[test]
    fn test_invalidations_coalesce_until_painted() {
        let mut tree = tree();
        let label = tree.insert(tree.root(), ControlKind::Label).unwrap();

        tree.invalidate(label).unwrap();
        tree.invalidate(label).unwrap();
        let control = tree.get(label).unwrap();
        assert_eq!(control.paint_state(), PaintState::PendingRepaint);
        assert!(control.counters().invalidations >= 2);
        assert!(tree.needs_frame());
    }

    #[test]
    fn test_explicit_bounds_capture_anchor() {
        let mut tree = tree();
        let button = tree.insert(tree.root(), ControlKind::Button).unwrap();
        tree.set_bounds(button, Rect::new(150, 70, 40, 20), BoundsSpecified::ALL)
            .unwrap();
        tree.set_anchor(button, Anchors::RIGHT | Anchors::BOTTOM).unwrap();

        tree.resize_root(Size::new(300, 150));
        tree.layout_pending();
        assert_eq!(tree.get(button).unwrap().bounds(), Rect::new(250, 120, 40, 20));
    }

    #[test]
    fn test_partial_bounds_keep_other_components() {
        let mut tree = tree();
        let label = tree.insert(tree.root(), ControlKind::Label).unwrap();
        tree.set_bounds(label, Rect::new(5, 6, 0, 0), BoundsSpecified::LOCATION)
            .unwrap();

        assert_eq!(tree.get(label).unwrap().bounds(), Rect::new(5, 6, 100, 23));
    }

    #[test]
    fn test_kind_specific_operations() {
        let mut tree = tree();
        let label = tree.insert(tree.root(), ControlKind::Label).unwrap();
        assert!(matches!(
            tree.set_selected_item(label, Some(0)),
            Err(UiError::Unsupported { kind: "Label", .. })
        ));
        assert!(matches!(tree.set_checked(label, true), Err(UiError::Unsupported { .. })));

        let stack = tree
            .insert(tree.root(), ControlKind::StackPanel(StackLayout::VERTICAL))
            .unwrap();
        assert!(tree.table_mut(stack).is_err());
    }

    #[test]
    fn test_table_style_errors_surface() {
        let mut tree = tree();
        let table = tree
            .insert(tree.root(), ControlKind::TableLayoutPanel(TableLayout::default()))
            .unwrap();
        let result = tree.set_column_style(table, 3, ColumnStyle::auto());
        assert!(matches!(result, Err(UiError::Layout(_))));
    }
}
