//! Input routing.
//!
//! The platform window reports pointer and keyboard events; the tree
//! hit-tests them against the bounds of the last layout pass, moves hover
//! and focus, and applies the resulting state changes with one
//! invalidation each.

use foliage_core::{Point, Rect};

use crate::tree::ControlTree;
use crate::widget::{ControlFlags, ControlId, ControlKind};

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Space bar.
    Space,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Any other key, by platform scan code.
    Other(u32),
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

/// Pointer event in root client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved.
    Moved {
        /// Position.
        position: Point,
        /// Modifier keys.
        modifiers: Modifiers,
    },
    /// Button went down.
    Pressed {
        /// Position.
        position: Point,
        /// Button.
        button: MouseButton,
        /// Modifier keys.
        modifiers: Modifiers,
    },
    /// Button went up.
    Released {
        /// Position.
        position: Point,
        /// Button.
        button: MouseButton,
        /// Modifier keys.
        modifiers: Modifiers,
    },
    /// Scroll wheel.
    Wheel {
        /// Position.
        position: Point,
        /// Scroll delta (x, y).
        delta: (f32, f32),
        /// Modifier keys.
        modifiers: Modifiers,
    },
    /// Pointer left the window.
    Left,
}

impl PointerEvent {
    /// Creates a move event without modifiers.
    #[must_use]
    pub const fn moved(x: i32, y: i32) -> Self {
        Self::Moved {
            position: Point::new(x, y),
            modifiers: Modifiers {
                shift: false,
                ctrl: false,
                alt: false,
                super_key: false,
            },
        }
    }

    /// Creates a left-button press without modifiers.
    #[must_use]
    pub const fn pressed(x: i32, y: i32) -> Self {
        Self::Pressed {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers {
                shift: false,
                ctrl: false,
                alt: false,
                super_key: false,
            },
        }
    }

    /// Creates a left-button release without modifiers.
    #[must_use]
    pub const fn released(x: i32, y: i32) -> Self {
        Self::Released {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers {
                shift: false,
                ctrl: false,
                alt: false,
                super_key: false,
            },
        }
    }

    /// Position, `None` for [`PointerEvent::Left`].
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Moved { position, .. }
            | Self::Pressed { position, .. }
            | Self::Released { position, .. }
            | Self::Wheel { position, .. } => Some(*position),
            Self::Left => None,
        }
    }
}

/// Key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key pressed.
    pub key: Key,
    /// Modifier keys.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a key event without modifiers.
    #[must_use]
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// What dispatching an event did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchResponse {
    /// Control the event was routed to.
    pub target: Option<ControlId>,
    /// Hovered control changed.
    pub hover_changed: bool,
    /// Focus moved to the target.
    pub focused: bool,
    /// A button press landed on the target.
    pub clicked: bool,
    /// A list selection changed.
    pub selection_changed: bool,
    /// A check box flipped.
    pub toggled: bool,
}

impl ControlTree {
    /// Deepest visible control containing `point` (root client
    /// coordinates). Children are scanned in order and the first match
    /// wins; each child's pixels start at its position plus the border
    /// inset.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ControlId> {
        let root = self.get(self.root())?;
        if !root.is_visible() || !root.client_rect().contains(point) {
            return None;
        }
        let inset = self.config().border_inset;
        let mut current = root.id();
        let mut local = point;

        'descend: loop {
            for &child in self.children(current) {
                let Some(control) = self.get(child) else {
                    continue;
                };
                if !control.is_visible() {
                    continue;
                }
                let origin = Point::new(control.bounds().x + inset, control.bounds().y + inset);
                let inner = Point::new(local.x - origin.x, local.y - origin.y);
                if control.client_rect().contains(inner) {
                    current = child;
                    local = inner;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    /// Position of `id`'s pixel space in root client coordinates.
    #[must_use]
    pub fn client_origin(&self, id: ControlId) -> Option<Point> {
        let inset = self.config().border_inset;
        let mut origin = Point::ZERO;
        let mut current = self.get(id)?;
        while let Some(parent) = current.parent() {
            let bounds = current.bounds();
            origin = origin.offset(bounds.x + inset, bounds.y + inset);
            current = self.get(parent)?;
        }
        Some(origin)
    }

    /// Screen-space rectangle of `id`.
    #[must_use]
    pub fn screen_bounds(&self, id: ControlId) -> Option<Rect> {
        let origin = self.client_origin(id)?;
        let size = self.get(id)?.bounds().size();
        Some(Rect::from_pos_size(origin, size))
    }

    /// Routes a pointer event.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> DispatchResponse {
        let target = event.position().and_then(|p| self.hit_test(p));
        let mut response = DispatchResponse {
            target,
            ..DispatchResponse::default()
        };

        match event {
            PointerEvent::Moved { position, .. } | PointerEvent::Wheel { position, .. } => {
                response.hover_changed = self.set_hovered(target);
                if let Some(target) = target {
                    self.update_item_hover(target, position);
                }
            }
            PointerEvent::Left => {
                response.hover_changed = self.set_hovered(None);
                if let Some(previous) = self.pressed.take() {
                    self.set_pressed_flag(previous, false);
                }
            }
            PointerEvent::Pressed {
                position,
                button: MouseButton::Left,
                ..
            } => {
                let Some(target) = target else {
                    return response;
                };
                if !self.get(target).is_some_and(|c| c.is_enabled()) {
                    return response;
                }
                response.clicked = true;
                response.focused = self.set_focus(target);
                self.pressed = Some(target);
                self.set_pressed_flag(target, true);
                self.press(target, position, &mut response);
            }
            PointerEvent::Released {
                button: MouseButton::Left,
                ..
            } => {
                if let Some(previous) = self.pressed.take() {
                    self.set_pressed_flag(previous, false);
                }
            }
            PointerEvent::Pressed { .. } | PointerEvent::Released { .. } => {}
        }
        response
    }

    /// Routes a key press to the focused control.
    pub fn dispatch_key(&mut self, event: KeyEvent) -> DispatchResponse {
        let Some(target) = self.focused else {
            return DispatchResponse::default();
        };
        let mut response = DispatchResponse {
            target: Some(target),
            ..DispatchResponse::default()
        };
        let Some(control) = self.control_entry(target) else {
            return response;
        };

        let changed = match (&mut control.kind, event.key) {
            (ControlKind::CheckBox { checked }, Key::Space) => {
                *checked = !*checked;
                response.toggled = true;
                true
            }
            (ControlKind::ListBox(items), Key::Up | Key::Down)
            | (ControlKind::TabStrip(items), Key::Left | Key::Right) => {
                let next = step(items.selected_index(), items.len(), event.key);
                let changed = items.select(next);
                response.selection_changed = changed;
                changed
            }
            (ControlKind::Custom(widget), key) => widget.on_key(key),
            _ => false,
        };
        if changed {
            self.mark_dirty(target);
        }
        response
    }

    fn press(&mut self, target: ControlId, position: Point, response: &mut DispatchResponse) {
        let origin = self.client_origin(target).unwrap_or(Point::ZERO);
        let local = Point::new(position.x - origin.x, position.y - origin.y);
        let Some(control) = self.control_entry(target) else {
            return;
        };

        let changed = match &mut control.kind {
            ControlKind::CheckBox { checked } => {
                *checked = !*checked;
                response.toggled = true;
                true
            }
            ControlKind::ListBox(items) | ControlKind::TabStrip(items) => {
                let changed = items.select(items.hit_test(local));
                response.selection_changed = changed;
                changed
            }
            ControlKind::Custom(widget) => widget.on_press(local),
            _ => false,
        };
        if changed {
            self.mark_dirty(target);
        }
    }

    fn set_hovered(&mut self, target: Option<ControlId>) -> bool {
        if !self.config().hover_enabled || self.hovered == target {
            return false;
        }
        if let Some(previous) = self.hovered.take() {
            self.update_item_hover_index(previous, None);
            self.set_hover_flag(previous, false);
        }
        if let Some(next) = target {
            self.set_hover_flag(next, true);
        }
        self.hovered = target;
        true
    }

    fn set_hover_flag(&mut self, id: ControlId, on: bool) {
        let Some(control) = self.control_entry(id) else {
            return;
        };
        if control.flags.assign(ControlFlags::HOVERED, on) && control.is_hoverable() {
            self.mark_dirty(id);
        }
    }

    fn set_pressed_flag(&mut self, id: ControlId, on: bool) {
        let Some(control) = self.control_entry(id) else {
            return;
        };
        if control.flags.assign(ControlFlags::PRESSED, on) && control.kind.shows_pressed() {
            self.mark_dirty(id);
        }
    }

    fn set_focus(&mut self, target: ControlId) -> bool {
        if self.focused == Some(target) {
            return false;
        }
        if let Some(previous) = self.focused.replace(target) {
            if let Some(control) = self.control_entry(previous) {
                control.flags.clear(ControlFlags::FOCUSED);
            }
        }
        if let Some(control) = self.control_entry(target) {
            control.flags.set(ControlFlags::FOCUSED);
        }
        true
    }

    fn update_item_hover(&mut self, target: ControlId, position: Point) {
        if !self.config().hover_enabled {
            return;
        }
        let origin = self.client_origin(target).unwrap_or(Point::ZERO);
        let local = Point::new(position.x - origin.x, position.y - origin.y);
        let index = self
            .get(target)
            .and_then(|c| c.kind().items())
            .and_then(|items| items.hit_test(local));
        self.update_item_hover_index(target, index);
    }

    fn update_item_hover_index(&mut self, id: ControlId, index: Option<usize>) {
        let changed = self
            .control_entry(id)
            .and_then(|c| c.kind.items_mut())
            .is_some_and(|items| items.set_hovered(index));
        if changed {
            self.mark_dirty(id);
        }
    }
}

fn step(selected: Option<usize>, len: usize, key: Key) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let forward = matches!(key, Key::Down | Key::Right);
    Some(match selected {
        None if forward => 0,
        None => len - 1,
        Some(i) if forward => (i + 1).min(len - 1),
        Some(i) => i.saturating_sub(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemCollection;
    use foliage_core::{BoundsSpecified, DockStyle, Size};

    fn tree_with_button() -> (ControlTree, ControlId) {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        let button = tree.insert(tree.root(), ControlKind::Button).unwrap();
        tree.set_bounds(button, Rect::new(10, 10, 50, 20), BoundsSpecified::ALL)
            .unwrap();
        tree.layout_pending();
        (tree, button)
    }

    #[test]
    fn test_hit_test_accounts_for_inset() {
        let (tree, button) = tree_with_button();
        assert_eq!(tree.hit_test(Point::new(11, 11)), Some(button));
        assert_eq!(tree.hit_test(Point::new(10, 10)), Some(tree.root()));
        assert_eq!(tree.hit_test(Point::new(60, 30)), Some(button));
        assert_eq!(tree.hit_test(Point::new(61, 31)), Some(tree.root()));
        assert_eq!(tree.hit_test(Point::new(500, 5)), None);
    }

    #[test]
    fn test_hit_test_first_child_wins() {
        let (mut tree, button) = tree_with_button();
        let other = tree.insert(tree.root(), ControlKind::Button).unwrap();
        tree.set_bounds(other, Rect::new(10, 10, 50, 20), BoundsSpecified::ALL)
            .unwrap();
        assert_eq!(tree.hit_test(Point::new(20, 20)), Some(button));

        tree.set_visible(button, false).unwrap();
        assert_eq!(tree.hit_test(Point::new(20, 20)), Some(other));
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let (mut tree, button) = tree_with_button();
        let before = tree.get(button).unwrap().counters().invalidations;

        let response = tree.dispatch_pointer(PointerEvent::moved(20, 20));
        assert!(response.hover_changed);
        assert!(tree.get(button).unwrap().is_hovered());
        assert_eq!(tree.get(button).unwrap().counters().invalidations, before + 1);

        let response = tree.dispatch_pointer(PointerEvent::moved(21, 20));
        assert!(!response.hover_changed);

        tree.dispatch_pointer(PointerEvent::Left);
        assert!(!tree.get(button).unwrap().is_hovered());
        assert_eq!(tree.hovered(), None);
        assert_eq!(tree.get(button).unwrap().counters().invalidations, before + 2);
    }

    #[test]
    fn test_click_toggles_checkbox_and_focuses() {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        let check = tree
            .insert(tree.root(), ControlKind::CheckBox { checked: false })
            .unwrap();
        tree.layout_pending();

        let response = tree.dispatch_pointer(PointerEvent::pressed(5, 5));
        assert_eq!(response.target, Some(check));
        assert!(response.toggled && response.focused);
        assert!(matches!(tree.get(check).unwrap().kind(), ControlKind::CheckBox { checked: true }));

        let response = tree.dispatch_key(KeyEvent::new(Key::Space));
        assert!(response.toggled);
        assert!(matches!(tree.get(check).unwrap().kind(), ControlKind::CheckBox { checked: false }));
    }

    #[test]
    fn test_keyboard_moves_list_selection() {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        let list = tree
            .insert(tree.root(), ControlKind::ListBox(ItemCollection::from_texts(["a", "b", "c"])))
            .unwrap();
        tree.set_dock(list, DockStyle::Fill).unwrap();
        tree.layout_pending();
        tree.dispatch_pointer(PointerEvent::pressed(5, 5));

        let items = |tree: &ControlTree| tree.get(list).unwrap().kind().items().unwrap().selected_index();
        assert_eq!(items(&tree), Some(0));

        tree.dispatch_key(KeyEvent::new(Key::Down));
        tree.dispatch_key(KeyEvent::new(Key::Down));
        let response = tree.dispatch_key(KeyEvent::new(Key::Down));
        assert_eq!(items(&tree), Some(2));
        assert!(!response.selection_changed);

        tree.dispatch_key(KeyEvent::new(Key::Up));
        assert_eq!(items(&tree), Some(1));
    }

    #[test]
    fn test_press_and_release_repaint_button() {
        let (mut tree, button) = tree_with_button();
        assert_eq!(tree.screen_bounds(button), Some(Rect::new(11, 11, 50, 20)));
        let before = tree.get(button).unwrap().counters().invalidations;

        let response = tree.dispatch_pointer(PointerEvent::pressed(20, 20));
        assert!(response.clicked);
        assert!(tree.get(button).unwrap().is_pressed());
        assert_eq!(tree.get(button).unwrap().counters().invalidations, before + 1);

        tree.dispatch_pointer(PointerEvent::released(20, 20));
        assert!(!tree.get(button).unwrap().is_pressed());
        assert_eq!(tree.get(button).unwrap().counters().invalidations, before + 2);
    }

    #[test]
    fn test_press_on_tab_selects_it_once() {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        let tabs = tree
            .insert(tree.root(), ControlKind::TabStrip(ItemCollection::from_texts(["one", "two", "three"])))
            .unwrap();
        tree.set_dock(tabs, DockStyle::Bottom).unwrap();
        let side = tree.insert(tree.root(), ControlKind::Panel).unwrap();
        tree.set_bounds(side, Rect::new(0, 0, 40, 10), BoundsSpecified::SIZE)
            .unwrap();
        tree.set_dock(side, DockStyle::Right).unwrap();
        tree.layout_pending();

        let strip = tree.screen_bounds(tabs).unwrap();
        let panel = tree.screen_bounds(side).unwrap();
        assert_eq!(strip.bottom(), 101);
        assert_eq!(panel.right(), 201);
        assert_eq!(panel.width, 40);
        assert!(panel.bottom() <= strip.y);

        let item = tree.get(tabs).unwrap().kind().items().unwrap().get(1).unwrap().bounds();
        let at = Point::new(
            strip.x + item.x + item.width / 2,
            strip.y + item.y + item.height / 2,
        );
        let before = tree.get(tabs).unwrap().counters().invalidations;

        let response = tree.dispatch_pointer(PointerEvent::Pressed {
            position: at,
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        });
        assert_eq!(response.target, Some(tabs));
        assert!(response.selection_changed);
        let selected = |tree: &ControlTree| tree.get(tabs).unwrap().kind().items().unwrap().selected_index();
        assert_eq!(selected(&tree), Some(1));
        assert_eq!(tree.get(tabs).unwrap().counters().invalidations, before + 1);

        tree.dispatch_pointer(PointerEvent::released(at.x, at.y));
        let response = tree.dispatch_pointer(PointerEvent::Pressed {
            position: at,
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        });
        assert!(!response.selection_changed);
        assert_eq!(tree.get(tabs).unwrap().counters().invalidations, before + 1);
    }

    #[test]
    fn test_disabled_controls_ignore_presses() {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        let check = tree
            .insert(tree.root(), ControlKind::CheckBox { checked: false })
            .unwrap();
        tree.set_enabled(check, false).unwrap();
        tree.layout_pending();

        let response = tree.dispatch_pointer(PointerEvent::pressed(5, 5));
        assert!(!response.clicked);
        assert!(matches!(tree.get(check).unwrap().kind(), ControlKind::CheckBox { checked: false }));
    }

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(None, 0, Key::Down), None);
        assert_eq!(step(None, 3, Key::Up), Some(2));
        assert_eq!(step(Some(0), 3, Key::Up), Some(0));
        assert_eq!(step(Some(2), 3, Key::Down), Some(2));
    }
}
