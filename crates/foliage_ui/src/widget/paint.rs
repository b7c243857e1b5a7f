//! Two-phase painting: background, then foreground.

use foliage_core::style::Side;
use foliage_core::{theme, Color, ControlStyle, Point, Rect, StyleChain};

use super::kind::{check_box_rect, CHECK_BOX_TEXT_OFFSET};
use super::{styles, Control, ControlKind};
use crate::items::{ItemCollection, ITEM_PADDING};
use crate::render::{measure_text, Canvas};

/// Everything a paint handler gets.
pub struct PaintEventArgs<'a> {
    canvas: &'a mut dyn Canvas,
    style: StyleChain<'a>,
    client: Rect,
    repaint_requested: bool,
}

impl<'a> PaintEventArgs<'a> {
    /// Creates paint arguments over `canvas` for a control of `client` size.
    pub fn new(canvas: &'a mut dyn Canvas, style: StyleChain<'a>, client: Rect) -> Self {
        Self {
            canvas,
            style,
            client,
            repaint_requested: false,
        }
    }

    /// Target surface.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Style in effect for this paint.
    #[must_use]
    pub fn style(&self) -> &StyleChain<'a> {
        &self.style
    }

    /// The control's own pixel space.
    #[must_use]
    pub const fn client_rect(&self) -> Rect {
        self.client
    }

    /// Asks for exactly one more repaint after this one completes, however
    /// many times it is called.
    pub fn request_repaint(&mut self) {
        self.repaint_requested = true;
    }

    /// Returns true if a follow-up repaint was requested.
    #[must_use]
    pub const fn repaint_requested(&self) -> bool {
        self.repaint_requested
    }
}

impl Control {
    /// Fills the background and strokes each border side.
    pub fn raise_paint_background(&self, args: &mut PaintEventArgs<'_>) {
        let client = args.client_rect();
        let style = args.style();
        let background = if self.shows_pressed() {
            theme::current().highlight
        } else {
            style.background_color()
        };
        let radius = style.border().radius();
        let sides = Side::ALL.map(|side| {
            let chain = style.border().side(side);
            (side, chain.width(), chain.color())
        });

        let canvas = args.canvas();
        if background.a > 0 {
            canvas.fill_rounded_rect(client, background, radius);
        }
        for (side, width, color) in sides {
            if width <= 0 || color.a == 0 {
                continue;
            }
            let strip = match side {
                Side::Left => Rect::new(client.x, client.y, width, client.height),
                Side::Top => Rect::new(client.x, client.y, client.width, width),
                Side::Right => Rect::new(client.right() - width, client.y, width, client.height),
                Side::Bottom => Rect::new(client.x, client.bottom() - width, client.width, width),
            };
            canvas.fill_rect(strip, color);
        }
    }

    /// Paints foreground content. Children are composited by the tree
    /// afterwards.
    pub fn raise_paint(&self, args: &mut PaintEventArgs<'_>) {
        match &self.kind {
            ControlKind::Panel | ControlKind::StackPanel(_) | ControlKind::TableLayoutPanel(_) => {}
            ControlKind::Label => {
                let origin = Point::new(self.padding.left, self.padding.top);
                self.paint_text(args, origin);
            }
            ControlKind::Button => {
                let client = args.client_rect();
                let text = measure_text(&self.text, args.style().font_size());
                let origin = Point::new(
                    (client.width - text.width) / 2,
                    (client.height - text.height) / 2,
                );
                self.paint_text(args, origin);
            }
            ControlKind::CheckBox { checked } => self.paint_check_box(args, *checked),
            ControlKind::ListBox(items) => {
                self.paint_items(args, items, &styles::LIST_ITEM_SELECTED);
            }
            ControlKind::TabStrip(items) => {
                self.paint_items(args, items, &styles::TAB_SELECTED);
            }
            ControlKind::Custom(widget) => widget.paint(self, args),
        }
    }

    fn text_color(&self, style: &StyleChain<'_>) -> Color {
        if !self.is_enabled() {
            theme::current().foreground_disabled
        } else if self.shows_pressed() {
            theme::current().highlight_text
        } else {
            style.foreground_color()
        }
    }

    fn shows_pressed(&self) -> bool {
        self.is_pressed() && self.kind.shows_pressed()
    }

    fn paint_text(&self, args: &mut PaintEventArgs<'_>, origin: Point) {
        if self.text.is_empty() {
            return;
        }
        let color = self.text_color(args.style());
        let font_size = args.style().font_size();
        args.canvas().draw_text(&self.text, origin, color, font_size);
    }

    fn paint_check_box(&self, args: &mut PaintEventArgs<'_>, checked: bool) {
        let client = args.client_rect().deflate(self.padding);
        let glyph = check_box_rect(client);
        let border = args.style().border().left().color();
        let mark = self.text_color(args.style());

        let canvas = args.canvas();
        canvas.stroke_rect(glyph, border, 1);
        if checked {
            canvas.fill_rect(glyph.deflate(foliage_core::Padding::all(3)), mark);
        }

        let text = measure_text(&self.text, args.style().font_size());
        let origin = Point::new(
            client.x + CHECK_BOX_TEXT_OFFSET,
            client.y + (client.height - text.height) / 2,
        );
        self.paint_text(args, origin);
    }

    fn paint_items(
        &self,
        args: &mut PaintEventArgs<'_>,
        items: &ItemCollection,
        selected_class: &'static foliage_core::ClassStyle,
    ) {
        let selected = ControlStyle::inheriting(selected_class);
        let hovered = ControlStyle::inheriting(&styles::LIST_ITEM_HOVER);

        for item in items.iter() {
            let bounds = item.bounds();
            if bounds.is_empty() {
                continue;
            }
            let state = if item.is_selected() {
                Some(&selected)
            } else if item.is_hovered() {
                Some(&hovered)
            } else {
                None
            };

            let (fill, color, font_size) = match state {
                Some(state) => {
                    let chain = StyleChain::with_state(state, &self.style);
                    (Some(chain.background_color()), self.text_color(&chain), chain.font_size())
                }
                None => (None, self.text_color(args.style()), args.style().font_size()),
            };

            let canvas = args.canvas();
            if let Some(fill) = fill {
                canvas.fill_rect(bounds, fill);
            }
            let origin = Point::new(bounds.x + ITEM_PADDING.left, bounds.y + ITEM_PADDING.top);
            canvas.draw_text(item.text(), origin, color, font_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PixelBuffer;
    use crate::widget::ControlId;
    use foliage_core::Size;

    fn paint(control: &Control) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(control.bounds().size());
        let mut args = PaintEventArgs::new(&mut buffer, control.current_style(), control.client_rect());
        control.raise_paint_background(&mut args);
        control.raise_paint(&mut args);
        buffer
    }

    #[test]
    fn test_background_then_border() {
        let mut control = Control::new(ControlId::new(1), None, ControlKind::Panel);
        control.bounds = Rect::new(0, 0, 10, 10);
        control.style.background_color = Some(Color::rgb(1, 2, 3));
        control.style.border.set_color(Some(Color::rgb(200, 0, 0)));
        control.style.border.set_width(Some(2));

        let buffer = paint(&control);
        assert_eq!(buffer.pixel(1, 5), Some(Color::rgb(200, 0, 0)));
        assert_eq!(buffer.pixel(8, 5), Some(Color::rgb(200, 0, 0)));
        assert_eq!(buffer.pixel(5, 5), Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn test_button_text_is_centered() {
        let mut control = Control::new(ControlId::new(1), None, ControlKind::Button);
        control.text = "OK".into();
        control.style.font_size = Some(10.0);
        control.bounds = Rect::from_pos_size(Point::ZERO, Size::new(40, 25));

        let buffer = paint(&control);
        let run = &buffer.text_runs()[0];
        assert_eq!(run.text, "OK");
        assert_eq!(run.origin, Point::new(14, 5));
    }

    #[test]
    fn test_pressed_button_uses_highlight() {
        let mut control = Control::new(ControlId::new(1), None, ControlKind::Button);
        control.text = "OK".into();
        control.bounds = Rect::new(0, 0, 40, 25);
        let theme = theme::current();
        assert_ne!(paint(&control).pixel(20, 12), Some(theme.highlight));

        control.flags.set(crate::widget::ControlFlags::PRESSED);
        let buffer = paint(&control);
        assert_eq!(buffer.pixel(20, 12), Some(theme.highlight));
        assert_eq!(buffer.text_runs()[0].color, theme.highlight_text);
    }

    #[test]
    fn test_selected_item_uses_selection_style() {
        let mut items = ItemCollection::from_texts(["a", "b"]);
        items.select(Some(1));
        items.arrange(foliage_core::StackLayout::VERTICAL_EXPAND, Rect::new(0, 0, 50, 60), 10.0);

        let mut control = Control::new(ControlId::new(1), None, ControlKind::ListBox(items));
        control.bounds = Rect::new(0, 0, 50, 60);

        let buffer = paint(&control);
        let selection = theme::current().selection;
        assert_eq!(buffer.pixel(25, 30), Some(selection));
        assert_ne!(buffer.pixel(25, 10), Some(selection));
        assert_eq!(buffer.text_runs().len(), 2);
    }

    #[test]
    fn test_request_repaint_is_sticky() {
        let mut buffer = PixelBuffer::new(Size::new(1, 1));
        let style = ControlStyle::default();
        let mut args = PaintEventArgs::new(&mut buffer, StyleChain::new(&style), Rect::ZERO);
        assert!(!args.repaint_requested());
        args.request_repaint();
        args.request_repaint();
        assert!(args.repaint_requested());
    }
}
