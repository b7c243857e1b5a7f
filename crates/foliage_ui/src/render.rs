//! Drawing surface.
//!
//! Controls paint through the [`Canvas`] capability. The software
//! [`PixelBuffer`] executes draw commands into ARGB pixels and supports
//! blitting one buffer onto another, which is all compositing needs.
//! Glyph rasterization is external: text commands are recorded as
//! [`TextRun`]s that travel with the pixels when a buffer is blitted.

use foliage_core::{Color, Point, Rect, Size};

/// A primitive draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    FillRect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: i32,
    },
    /// Rectangle outline drawn inside `bounds`.
    StrokeRect {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: i32,
    },
    /// One-pixel line.
    Line {
        /// Start point.
        from: Point,
        /// End point, inclusive.
        to: Point,
        /// Line color.
        color: Color,
    },
    /// Text.
    Text {
        /// Text content.
        text: String,
        /// Top-left of the text box.
        origin: Point,
        /// Text color.
        color: Color,
        /// Font size.
        font_size: f32,
    },
    /// Scissor rect, intersected with the current one.
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
}

/// A surface that accepts draw commands.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Executes one command.
    fn execute(&mut self, command: DrawCommand);

    /// Composites `source` with its top-left corner at `at`.
    fn blit(&mut self, source: &PixelBuffer, at: Point);

    /// Overwrites every pixel and drops recorded text.
    fn clear(&mut self, color: Color);

    /// Fills a rectangle.
    fn fill_rect(&mut self, bounds: Rect, color: Color) {
        self.execute(DrawCommand::FillRect {
            bounds,
            color,
            corner_radius: 0,
        });
    }

    /// Fills a rectangle with rounded corners.
    fn fill_rounded_rect(&mut self, bounds: Rect, color: Color, corner_radius: i32) {
        self.execute(DrawCommand::FillRect {
            bounds,
            color,
            corner_radius,
        });
    }

    /// Strokes a rectangle outline.
    fn stroke_rect(&mut self, bounds: Rect, color: Color, width: i32) {
        self.execute(DrawCommand::StrokeRect { bounds, color, width });
    }

    /// Draws a line.
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.execute(DrawCommand::Line { from, to, color });
    }

    /// Draws text with its box at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color, font_size: f32) {
        self.execute(DrawCommand::Text {
            text: text.to_owned(),
            origin,
            color,
            font_size,
        });
    }

    /// Pushes a clip rect.
    fn push_clip(&mut self, bounds: Rect) {
        self.execute(DrawCommand::PushClip { bounds });
    }

    /// Pops the current clip rect.
    fn pop_clip(&mut self) {
        self.execute(DrawCommand::PopClip);
    }
}

/// Approximate text extent: `0.6 * font_size` per character and
/// `1.5 * font_size` per line.
#[must_use]
pub fn measure_text(text: &str, font_size: f32) -> Size {
    if text.is_empty() {
        return Size::ZERO;
    }
    let mut lines = 0_usize;
    let mut longest = 0_usize;
    for line in text.split('\n') {
        lines += 1;
        longest = longest.max(line.chars().count());
    }
    Size::new(
        (longest as f32 * 0.6 * font_size).ceil() as i32,
        (lines as f32 * 1.5 * font_size).ceil() as i32,
    )
}

/// Text recorded by a [`PixelBuffer`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text content.
    pub text: String,
    /// Top-left of the text box, in buffer pixels.
    pub origin: Point,
    /// Text color.
    pub color: Color,
    /// Font size.
    pub font_size: f32,
}

/// Software canvas over `0xAARRGGBB` pixels.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    pixels: Vec<u32>,
    clip_stack: Vec<Rect>,
    text_runs: Vec<TextRun>,
    command_count: usize,
}

impl PixelBuffer {
    /// Creates a transparent buffer. Negative extents become zero.
    #[must_use]
    pub fn new(size: Size) -> Self {
        let width = size.width.max(0);
        let height = size.height.max(0);
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT.to_argb(); width as usize * height as usize],
            clip_stack: Vec::with_capacity(8),
            text_runs: Vec::new(),
            command_count: 0,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Color at a pixel, `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| Color::from_argb(self.pixels[i]))
    }

    /// Raw pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixels as bytes, for presentation by a platform window.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Text drawn into this buffer, including text blitted from others.
    #[must_use]
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text_runs
    }

    /// Commands executed since the last clear.
    #[must_use]
    pub const fn command_count(&self) -> usize {
        self.command_count
    }

    /// Current clip rect; the whole buffer when the stack is empty.
    #[must_use]
    pub fn current_clip(&self) -> Rect {
        self.clip_stack.last().copied().unwrap_or_else(|| self.bounds())
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn put(&mut self, x: i32, y: i32, color: Color) {
        if !self.current_clip().contains(Point::new(x, y)) {
            return;
        }
        if let Some(i) = self.index(x, y) {
            let dst = Color::from_argb(self.pixels[i]);
            self.pixels[i] = color.blend_over(dst).to_argb();
        }
    }

    fn fill(&mut self, bounds: Rect, color: Color, corner_radius: i32) {
        let Some(area) = bounds.intersection(&self.current_clip()) else {
            return;
        };
        let radius = corner_radius.min(bounds.width / 2).min(bounds.height / 2);
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if radius <= 0 || inside_rounded(bounds, radius, x, y) {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn stroke(&mut self, bounds: Rect, color: Color, width: i32) {
        if width <= 0 || bounds.is_empty() {
            return;
        }
        let w = width.min(bounds.width).min(bounds.height);
        self.fill(Rect::new(bounds.x, bounds.y, bounds.width, w), color, 0);
        self.fill(Rect::new(bounds.x, bounds.bottom() - w, bounds.width, w), color, 0);
        let inner = (bounds.height - 2 * w).max(0);
        self.fill(Rect::new(bounds.x, bounds.y + w, w, inner), color, 0);
        self.fill(Rect::new(bounds.right() - w, bounds.y + w, w, inner), color, 0);
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let (mut x, mut y) = (from.x, from.y);
        let mut err = dx + dy;

        loop {
            self.put(x, y, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

fn inside_rounded(rect: Rect, radius: i32, x: i32, y: i32) -> bool {
    let cx = if x < rect.x + radius {
        rect.x + radius
    } else if x >= rect.right() - radius {
        rect.right() - radius - 1
    } else {
        return true;
    };
    let cy = if y < rect.y + radius {
        rect.y + radius
    } else if y >= rect.bottom() - radius {
        rect.bottom() - radius - 1
    } else {
        return true;
    };
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= radius * radius
}

impl Canvas for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn execute(&mut self, command: DrawCommand) {
        self.command_count += 1;
        match command {
            DrawCommand::FillRect {
                bounds,
                color,
                corner_radius,
            } => self.fill(bounds, color, corner_radius),
            DrawCommand::StrokeRect { bounds, color, width } => self.stroke(bounds, color, width),
            DrawCommand::Line { from, to, color } => self.line(from, to, color),
            DrawCommand::Text {
                text,
                origin,
                color,
                font_size,
            } => {
                if self.current_clip().contains(origin) {
                    self.text_runs.push(TextRun {
                        text,
                        origin,
                        color,
                        font_size,
                    });
                }
            }
            DrawCommand::PushClip { bounds } => {
                // Intersect with current clip
                let clip = self
                    .current_clip()
                    .intersection(&bounds)
                    .unwrap_or(Rect::ZERO);
                self.clip_stack.push(clip);
            }
            DrawCommand::PopClip => {
                self.clip_stack.pop();
            }
        }
    }

    fn blit(&mut self, source: &PixelBuffer, at: Point) {
        let target = Rect::from_pos_size(at, source.size());
        let Some(area) = target.intersection(&self.current_clip()) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(color) = source.pixel(x - at.x, y - at.y) {
                    self.put(x, y, color);
                }
            }
        }
        for run in &source.text_runs {
            let origin = run.origin.offset(at.x, at.y);
            if area.contains(origin) {
                self.text_runs.push(TextRun {
                    origin,
                    ..run.clone()
                });
            }
        }
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
        self.clip_stack.clear();
        self.text_runs.clear();
        self.command_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn test_fill_respects_clip() {
        let mut buffer = PixelBuffer::new(Size::new(10, 10));
        buffer.push_clip(Rect::new(0, 0, 5, 5));
        buffer.fill_rect(Rect::new(0, 0, 10, 10), RED);
        buffer.pop_clip();

        assert_eq!(buffer.pixel(4, 4), Some(RED));
        assert_eq!(buffer.pixel(5, 5), Some(Color::TRANSPARENT));
        assert_eq!(buffer.current_clip(), Rect::new(0, 0, 10, 10));
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut buffer = PixelBuffer::new(Size::new(10, 10));
        buffer.push_clip(Rect::new(0, 0, 6, 6));
        buffer.push_clip(Rect::new(4, 4, 6, 6));
        assert_eq!(buffer.current_clip(), Rect::new(4, 4, 2, 2));

        buffer.push_clip(Rect::new(8, 8, 2, 2));
        assert_eq!(buffer.current_clip(), Rect::ZERO);
    }

    #[test]
    fn test_rounded_fill_skips_corners() {
        let mut buffer = PixelBuffer::new(Size::new(20, 20));
        buffer.fill_rounded_rect(Rect::new(0, 0, 20, 20), RED, 6);

        assert_eq!(buffer.pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(buffer.pixel(10, 0), Some(RED));
        assert_eq!(buffer.pixel(10, 10), Some(RED));
    }

    #[test]
    fn test_stroke_leaves_interior() {
        let mut buffer = PixelBuffer::new(Size::new(10, 10));
        buffer.stroke_rect(Rect::new(0, 0, 10, 10), RED, 1);

        assert_eq!(buffer.pixel(0, 5), Some(RED));
        assert_eq!(buffer.pixel(9, 9), Some(RED));
        assert_eq!(buffer.pixel(5, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_diagonal_line_hits_endpoints() {
        let mut buffer = PixelBuffer::new(Size::new(8, 8));
        buffer.draw_line(Point::new(0, 0), Point::new(7, 7), RED);

        assert_eq!(buffer.pixel(0, 0), Some(RED));
        assert_eq!(buffer.pixel(3, 3), Some(RED));
        assert_eq!(buffer.pixel(7, 7), Some(RED));
        assert_eq!(buffer.pixel(7, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_blit_offsets_pixels_and_text() {
        let mut child = PixelBuffer::new(Size::new(4, 4));
        child.fill_rect(Rect::new(0, 0, 4, 4), RED);
        child.draw_text("ok", Point::new(1, 1), Color::BLACK, 10.0);

        let mut parent = PixelBuffer::new(Size::new(10, 10));
        parent.clear(Color::WHITE);
        parent.blit(&child, Point::new(3, 2));

        assert_eq!(parent.pixel(3, 2), Some(RED));
        assert_eq!(parent.pixel(6, 5), Some(RED));
        assert_eq!(parent.pixel(2, 2), Some(Color::WHITE));
        assert_eq!(parent.pixel(7, 6), Some(Color::WHITE));
        assert_eq!(parent.text_runs()[0].origin, Point::new(4, 3));
    }

    #[test]
    fn test_transparent_blit_keeps_destination() {
        let child = PixelBuffer::new(Size::new(4, 4));
        let mut parent = PixelBuffer::new(Size::new(4, 4));
        parent.clear(Color::WHITE);
        parent.blit(&child, Point::ZERO);

        assert!(parent.pixels().iter().all(|&p| p == Color::WHITE.to_argb()));
    }

    #[test]
    fn test_clear_resets_commands_and_text() {
        let mut buffer = PixelBuffer::new(Size::new(10, 10));
        buffer.fill_rect(Rect::new(0, 0, 2, 2), RED);
        buffer.draw_text("x", Point::new(1, 1), RED, 10.0);
        assert_eq!(buffer.command_count(), 2);
        assert_eq!(buffer.text_runs().len(), 1);

        buffer.clear(Color::TRANSPARENT);
        assert_eq!(buffer.command_count(), 0);
        assert!(buffer.text_runs().is_empty());
        assert_eq!(buffer.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn test_bytes_view() {
        let buffer = PixelBuffer::new(Size::new(3, 2));
        assert_eq!(buffer.as_bytes().len(), 3 * 2 * 4);
        assert!(PixelBuffer::new(Size::new(-5, 2)).pixels().is_empty());
    }

    #[test]
    fn test_measure_text() {
        assert_eq!(measure_text("", 10.0), Size::ZERO);
        assert_eq!(measure_text("abcde", 10.0), Size::new(30, 15));
        assert_eq!(measure_text("ab\nabcd", 10.0), Size::new(24, 30));
    }
}
