//! Composited paint pipeline.
//!
//! Each visible control with a positive area owns a backing buffer sized to
//! its bounds. A frame repaints pending controls into their buffers
//! (background, foreground, then children composited at their position
//! plus the border inset) and blits the root buffer onto the cleared
//! window surface. Idle controls are composited from their existing buffer.

use foliage_core::{Color, Point};

use super::ControlTree;
use crate::render::{Canvas, PixelBuffer};
use crate::widget::{ControlId, PaintEventArgs, PaintState};

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Layout passes run before painting.
    pub layout_passes: usize,
    /// Controls repainted into their buffers.
    pub painted: usize,
}

impl ControlTree {
    /// Runs one frame tick: pending layout, repaint of pending controls,
    /// then the root composited onto `surface` at the origin. The surface
    /// is cleared first, so it holds exactly the current frame.
    pub fn render_frame(&mut self, surface: &mut dyn Canvas) -> FrameStats {
        self.observe_theme();
        let mut stats = FrameStats {
            layout_passes: self.layout_pending(),
            painted: 0,
        };
        self.take_frame_request();

        let root = self.root();
        surface.clear(Color::TRANSPARENT);
        if self.paint_control(root, &mut stats) {
            if let Some(buffer) = self.get(root).and_then(|c| c.buffer()) {
                surface.blit(buffer, Point::ZERO);
            }
        }
        tracing::trace!(layout_passes = stats.layout_passes, painted = stats.painted, "frame rendered");
        stats
    }

    /// Brings the buffer of `id` up to date. Returns false for controls
    /// that are skipped: invisible, zero-area or unknown.
    fn paint_control(&mut self, id: ControlId, stats: &mut FrameStats) -> bool {
        let Some(control) = self.control_entry(id) else {
            return false;
        };
        if !control.is_visible() || control.bounds.is_empty() {
            return false;
        }
        let size = control.bounds.size();
        let current = control.buffer.as_ref().is_some_and(|b| b.size() == size);
        if control.paint_state == PaintState::Idle && current {
            return true;
        }

        let mut buffer = match control.buffer.take() {
            Some(buffer) if buffer.size() == size => buffer,
            _ => {
                control.counters.buffer_allocations += 1;
                tracing::debug!(%id, width = size.width, height = size.height, "allocating backing buffer");
                PixelBuffer::new(size)
            }
        };
        control.paint_state = PaintState::Painting { follow_up: false };
        buffer.clear(Color::TRANSPARENT);

        let repaint_requested = match self.get(id) {
            Some(control) => {
                let mut args =
                    PaintEventArgs::new(&mut buffer, control.current_style(), control.client_rect());
                control.raise_paint_background(&mut args);
                control.raise_paint(&mut args);
                args.repaint_requested()
            }
            None => false,
        };

        let inset = self.config().border_inset;
        let children = self.children(id).to_vec();
        for child in children {
            if !self.paint_control(child, stats) {
                continue;
            }
            if let Some(control) = self.get(child) {
                if let Some(child_buffer) = control.buffer() {
                    let at = Point::new(control.bounds.x + inset, control.bounds.y + inset);
                    buffer.blit(child_buffer, at);
                }
            }
        }

        if repaint_requested {
            self.mark_dirty(id);
        }
        let Some(control) = self.control_entry(id) else {
            return false;
        };
        control.buffer = Some(buffer);
        control.counters.paints += 1;
        let follow_up = matches!(control.paint_state, PaintState::Painting { follow_up: true });
        control.paint_state = if follow_up {
            PaintState::PendingRepaint
        } else {
            PaintState::Idle
        };
        stats.painted += 1;
        tracing::trace!(%id, follow_up, "control painted");

        if follow_up {
            self.request_frame();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use foliage_core::{BoundsSpecified, Color, Rect, Size};

    use crate::render::{Canvas, PixelBuffer};
    use crate::tree::ControlTree;
    use crate::widget::{ControlKind, PaintState};

    fn surface() -> PixelBuffer {
        PixelBuffer::new(Size::new(200, 100))
    }

    #[test]
    fn test_first_frame_paints_everything_once() {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        let label = tree.insert(tree.root(), ControlKind::Label).unwrap();

        let stats = tree.render_frame(&mut surface());
        assert_eq!(stats.painted, 2);
        assert!(!tree.needs_frame());

        let control = tree.get(label).unwrap();
        assert_eq!(control.counters().paints, 1);
        assert_eq!(control.counters().buffer_allocations, 1);
        assert_eq!(control.paint_state(), PaintState::Idle);

        let stats = tree.render_frame(&mut surface());
        assert_eq!(stats.painted, 0);
    }

    #[test]
    fn test_child_invalidate_repaints_ancestors_only() {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        let a = tree.insert(tree.root(), ControlKind::Label).unwrap();
        let b = tree.insert(tree.root(), ControlKind::Label).unwrap();
        tree.render_frame(&mut surface());

        tree.invalidate(a).unwrap();
        tree.invalidate(a).unwrap();
        let stats = tree.render_frame(&mut surface());

        assert_eq!(stats.painted, 2);
        assert_eq!(tree.get(a).unwrap().counters().paints, 2);
        assert_eq!(tree.get(b).unwrap().counters().paints, 1);
    }

    #[test]
    fn test_resize_reallocates_buffer() {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        let label = tree.insert(tree.root(), ControlKind::Label).unwrap();
        tree.render_frame(&mut surface());

        tree.set_bounds(label, Rect::new(0, 0, 50, 10), BoundsSpecified::SIZE)
            .unwrap();
        tree.render_frame(&mut surface());

        let control = tree.get(label).unwrap();
        assert_eq!(control.counters().buffer_allocations, 2);
        assert_eq!(control.buffer().map(Canvas::size), Some(Size::new(50, 10)));
    }

    #[test]
    fn test_root_lands_on_surface() {
        let mut tree = ControlTree::new(ControlKind::Panel);
        tree.resize_root(Size::new(200, 100));
        tree.style_mut(tree.root()).unwrap().background_color = Some(Color::rgb(9, 9, 9));

        let mut surface = surface();
        tree.render_frame(&mut surface);
        assert_eq!(surface.pixel(100, 50), Some(Color::rgb(9, 9, 9)));
    }
}
