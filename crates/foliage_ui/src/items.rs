//! Item collections of list-like controls.
//!
//! Single selection per collection, linear hit-testing over the bounds
//! assigned by the most recent arrange.

use foliage_core::{BoundsSpecified, LayoutElement, Padding, Point, Rect, Size, StackLayout};

use crate::render::measure_text;

/// Space around an item's text.
pub const ITEM_PADDING: Padding = Padding::new(4, 3, 4, 3);

/// One entry of an [`ItemCollection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    text: String,
    bounds: Rect,
    preferred: Size,
    selected: bool,
    hovered: bool,
}

impl Item {
    fn new(text: String) -> Self {
        Self {
            text,
            bounds: Rect::ZERO,
            preferred: Size::ZERO,
            selected: false,
            hovered: false,
        }
    }

    /// Item text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bounds from the last arrange, in the owner's client space.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns true for the selected item.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns true for the item under the pointer.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }
}

impl LayoutElement for Item {
    fn preferred_size(&self, _proposed: Size) -> Size {
        self.preferred
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect, _specified: BoundsSpecified) {
        self.bounds = bounds;
    }
}

/// Ordered items with at most one selected and one hovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCollection {
    items: Vec<Item>,
    selected: Option<usize>,
    hovered: Option<usize>,
}

impl ItemCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection from texts.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: texts.into_iter().map(|t| Item::new(t.into())).collect(),
            ..Self::default()
        }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Iterates items in order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Appends an item.
    pub fn push(&mut self, text: impl Into<String>) {
        self.items.push(Item::new(text.into()));
    }

    /// Inserts an item, shifting later indices.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, text: impl Into<String>) {
        self.items.insert(index, Item::new(text.into()));
        shift_up(&mut self.selected, index);
        shift_up(&mut self.hovered, index);
    }

    /// Removes an item; removing the selected item clears the selection.
    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        shift_down(&mut self.selected, index);
        shift_down(&mut self.hovered, index);
        Some(item.text)
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.hovered = None;
    }

    /// Index of the selected item.
    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected item.
    #[must_use]
    pub fn selected(&self) -> Option<&Item> {
        self.selected.and_then(|i| self.items.get(i))
    }

    /// Index of the hovered item.
    #[must_use]
    pub const fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    /// Selects `index`, or clears the selection for `None`.
    ///
    /// The previous item is deselected before the new one is selected.
    /// Returns true if the selection changed. An index outside the
    /// collection selects nothing.
    pub fn select(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|&i| i < self.items.len());
        if index == self.selected {
            return false;
        }
        if let Some(item) = self.selected.and_then(|i| self.items.get_mut(i)) {
            item.selected = false;
        }
        if let Some(item) = index.and_then(|i| self.items.get_mut(i)) {
            item.selected = true;
        }
        self.selected = index;
        true
    }

    /// Marks `index` as hovered. Returns true if it changed.
    pub fn set_hovered(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|&i| i < self.items.len());
        if index == self.hovered {
            return false;
        }
        if let Some(item) = self.hovered.and_then(|i| self.items.get_mut(i)) {
            item.hovered = false;
        }
        if let Some(item) = index.and_then(|i| self.items.get_mut(i)) {
            item.hovered = true;
        }
        self.hovered = index;
        true
    }

    /// First item whose bounds contain `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.items.iter().position(|item| item.bounds.contains(point))
    }

    /// Measures every item at `font_size` and arranges them with `engine`.
    pub fn arrange(&mut self, engine: StackLayout, container: Rect, font_size: f32) {
        for item in &mut self.items {
            let text = measure_text(&item.text, font_size);
            item.preferred = Size::new(
                text.width + ITEM_PADDING.horizontal(),
                text.height + ITEM_PADDING.vertical(),
            );
        }
        engine.layout(container, &mut self.items);
    }

    /// Size of all items stacked with `engine`, at `font_size`.
    #[must_use]
    pub fn preferred_size(&self, engine: StackLayout, font_size: f32) -> Size {
        let measured: Vec<foliage_core::layout::Element> = self
            .items
            .iter()
            .map(|item| {
                let text = measure_text(&item.text, font_size);
                foliage_core::layout::Element::sized(
                    text.width + ITEM_PADDING.horizontal(),
                    text.height + ITEM_PADDING.vertical(),
                )
            })
            .collect();
        engine.preferred_size(&measured, Size::ZERO)
    }
}

fn shift_up(slot: &mut Option<usize>, inserted: usize) {
    if let Some(i) = slot {
        if *i >= inserted {
            *i += 1;
        }
    }
}

fn shift_down(slot: &mut Option<usize>, removed: usize) {
    match *slot {
        Some(i) if i == removed => *slot = None,
        Some(i) if i > removed => *slot = Some(i - 1),
        _ => {}
    }
}
