//! Per-variant behavior of controls.
//!
//! A control is a fixed [`Control`](super::Control) record plus one
//! [`ControlKind`]. The kind decides class styles, default and content
//! size, which engine arranges the children, and foreground painting.

use std::fmt;

use foliage_core::style::CONTROL;
use foliage_core::{
    ClassStyle, DockLayout, LayoutElement, Point, Rect, Size, StackLayout, TableLayout,
};

use super::styles;
use super::{Control, PaintEventArgs};
use crate::input::Key;
use crate::items::ItemCollection;
use crate::render::measure_text;

/// Side length of a check box glyph.
pub const CHECK_BOX_SIZE: i32 = 14;

/// Gap between a check box glyph and its text.
const CHECK_BOX_GAP: i32 = 4;

/// Behavior of a [`ControlKind::Custom`] control.
pub trait Widget {
    /// Kind name, for diagnostics.
    fn name(&self) -> &'static str {
        "Custom"
    }

    /// Class default the instance style inherits from.
    fn class_style(&self) -> &'static ClassStyle {
        &CONTROL
    }

    /// Hover overlay the instance hover style inherits from.
    fn class_style_hover(&self) -> &'static ClassStyle {
        &styles::CONTROL_HOVER
    }

    /// Whether pointer-over swaps to the hover style.
    fn is_hoverable(&self) -> bool {
        false
    }

    /// Size of a freshly inserted control.
    fn default_size(&self) -> Size {
        Size::new(100, 100)
    }

    /// Size of the control's own content, excluding padding.
    fn content_size(&self, control: &Control, font_size: f32) -> Size {
        let _ = font_size;
        control.bounds().size()
    }

    /// Paints foreground content after the background.
    fn paint(&self, control: &Control, args: &mut PaintEventArgs<'_>);

    /// Pointer press at `point` in client space. Returns true if the
    /// control must repaint.
    fn on_press(&mut self, point: Point) -> bool {
        let _ = point;
        false
    }

    /// Key press while focused. Returns true if the control must repaint.
    fn on_key(&mut self, key: Key) -> bool {
        let _ = key;
        false
    }
}

/// Variant data of a control.
pub enum ControlKind {
    /// Dock/anchor container.
    Panel,
    /// Stack container.
    StackPanel(StackLayout),
    /// Row/column container.
    TableLayoutPanel(TableLayout),
    /// Static text.
    Label,
    /// Push button.
    Button,
    /// Text with a two-state box.
    CheckBox {
        /// Current state.
        checked: bool,
    },
    /// Vertical list with single selection.
    ListBox(ItemCollection),
    /// Horizontal tabs with single selection.
    TabStrip(ItemCollection),
    /// Caller-supplied behavior.
    Custom(Box<dyn Widget>),
}

impl ControlKind {
    /// Kind name, for diagnostics and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Panel => "Panel",
            Self::StackPanel(_) => "StackPanel",
            Self::TableLayoutPanel(_) => "TableLayoutPanel",
            Self::Label => "Label",
            Self::Button => "Button",
            Self::CheckBox { .. } => "CheckBox",
            Self::ListBox(_) => "ListBox",
            Self::TabStrip(_) => "TabStrip",
            Self::Custom(widget) => widget.name(),
        }
    }

    /// Class default of the base style.
    #[must_use]
    pub fn class_style(&self) -> &'static ClassStyle {
        match self {
            Self::Panel | Self::StackPanel(_) | Self::TableLayoutPanel(_) => &styles::PANEL,
            Self::Label => &styles::LABEL,
            Self::Button => &styles::BUTTON,
            Self::CheckBox { .. } => &styles::CHECKBOX,
            Self::ListBox(_) => &styles::LIST_BOX,
            Self::TabStrip(_) => &styles::TAB_STRIP,
            Self::Custom(widget) => widget.class_style(),
        }
    }

    /// Class default of the hover style.
    #[must_use]
    pub fn class_style_hover(&self) -> &'static ClassStyle {
        match self {
            Self::Button => &styles::BUTTON_HOVER,
            Self::CheckBox { .. } => &styles::CHECKBOX_HOVER,
            Self::Custom(widget) => widget.class_style_hover(),
            _ => &styles::CONTROL_HOVER,
        }
    }

    /// Whether pointer-over swaps to the hover style.
    #[must_use]
    pub fn is_hoverable(&self) -> bool {
        match self {
            Self::Button | Self::CheckBox { .. } => true,
            Self::Custom(widget) => widget.is_hoverable(),
            _ => false,
        }
    }

    /// Whether a held pointer button paints the control with the theme
    /// highlight.
    #[must_use]
    pub const fn shows_pressed(&self) -> bool {
        matches!(self, Self::Button)
    }

    /// Size of a freshly inserted control.
    #[must_use]
    pub fn default_size(&self) -> Size {
        match self {
            Self::Panel | Self::StackPanel(_) | Self::TableLayoutPanel(_) => Size::new(200, 100),
            Self::Label => Size::new(100, 23),
            Self::Button => Size::new(75, 23),
            Self::CheckBox { .. } => Size::new(104, 24),
            Self::ListBox(_) => Size::new(120, 96),
            Self::TabStrip(_) => Size::new(200, 28),
            Self::Custom(widget) => widget.default_size(),
        }
    }

    /// Items of list-like kinds.
    #[must_use]
    pub fn items(&self) -> Option<&ItemCollection> {
        match self {
            Self::ListBox(items) | Self::TabStrip(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable items of list-like kinds.
    pub fn items_mut(&mut self) -> Option<&mut ItemCollection> {
        match self {
            Self::ListBox(items) | Self::TabStrip(items) => Some(items),
            _ => None,
        }
    }

    /// Engine that arranges items of list-like kinds.
    #[must_use]
    pub fn item_engine(&self) -> Option<StackLayout> {
        match self {
            Self::ListBox(_) => Some(StackLayout::VERTICAL_EXPAND),
            Self::TabStrip(_) => Some(StackLayout::HORIZONTAL_EXPAND),
            _ => None,
        }
    }

    /// Returns true if children are arranged by dock/anchor resolution,
    /// which reports extents in client space rather than content size.
    #[must_use]
    pub fn docks_children(&self) -> bool {
        !matches!(self, Self::StackPanel(_) | Self::TableLayoutPanel(_))
    }

    /// Arranges child controls inside `container`.
    pub fn arrange<E: LayoutElement>(&self, container: Rect, elements: &mut [E]) {
        match self {
            Self::StackPanel(engine) => engine.layout(container, elements),
            Self::TableLayoutPanel(engine) => engine.layout(container, elements),
            _ => DockLayout.layout(container, elements),
        }
    }

    /// Size the arranged children need, excluding padding.
    #[must_use]
    pub fn arranged_size<E: LayoutElement>(&self, elements: &[E], proposed: Size) -> Size {
        match self {
            Self::StackPanel(engine) => engine.preferred_size(elements, proposed),
            Self::TableLayoutPanel(engine) => engine.preferred_size(elements, proposed),
            _ => DockLayout.preferred_size(elements, proposed),
        }
    }

    /// Size of the control's own content, excluding padding and children.
    #[must_use]
    pub fn content_size(&self, control: &Control, font_size: f32) -> Size {
        let text = measure_text(control.text(), font_size);
        match self {
            Self::Panel | Self::StackPanel(_) | Self::TableLayoutPanel(_) => Size::ZERO,
            Self::Label => text,
            Self::Button => Size::new(text.width + 16, text.height + 8),
            Self::CheckBox { .. } => Size::new(
                CHECK_BOX_SIZE + CHECK_BOX_GAP + text.width,
                text.height.max(CHECK_BOX_SIZE),
            ),
            Self::ListBox(items) => items.preferred_size(StackLayout::VERTICAL, font_size),
            Self::TabStrip(items) => items.preferred_size(StackLayout::HORIZONTAL, font_size),
            Self::Custom(widget) => widget.content_size(control, font_size),
        }
    }
}

impl fmt::Debug for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckBox { checked } => f.debug_struct("CheckBox").field("checked", checked).finish(),
            Self::ListBox(items) | Self::TabStrip(items) => f
                .debug_struct(self.name())
                .field("items", &items.len())
                .field("selected", &items.selected_index())
                .finish(),
            _ => f.write_str(self.name()),
        }
    }
}

/// Check box glyph bounds inside `client`.
#[must_use]
pub(crate) fn check_box_rect(client: Rect) -> Rect {
    Rect::new(
        client.x,
        client.y + (client.height - CHECK_BOX_SIZE) / 2,
        CHECK_BOX_SIZE,
        CHECK_BOX_SIZE,
    )
}

/// Left edge of check box text.
pub(crate) const CHECK_BOX_TEXT_OFFSET: i32 = CHECK_BOX_SIZE + CHECK_BOX_GAP;
