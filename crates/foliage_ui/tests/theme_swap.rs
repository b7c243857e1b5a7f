//! # Theme Swap Test
//!
//! Swapping the process-wide theme must reach every control on the next
//! frame. Kept in its own test binary because the theme is global.

use foliage_core::{theme, BoundsSpecified, Rect, Size, StyleChain, Theme};
use foliage_ui::widget::styles;
use foliage_ui::{ControlKind, ControlTree, PixelBuffer};

#[test]
fn theme_swap_repaints_with_new_class_defaults() {
    theme::set(Theme::light());

    let mut tree = ControlTree::new(ControlKind::Panel);
    tree.resize_root(Size::new(200, 100));
    let button = tree.insert(tree.root(), ControlKind::Button).unwrap();
    tree.set_bounds(button, Rect::new(10, 10, 75, 23), BoundsSpecified::ALL)
        .unwrap();
    let label = tree.insert(tree.root(), ControlKind::Label).unwrap();
    tree.set_bounds(label, Rect::new(10, 50, 75, 23), BoundsSpecified::ALL)
        .unwrap();

    let mut surface = PixelBuffer::new(Size::new(200, 100));
    tree.render_frame(&mut surface);
    assert_eq!(surface.pixel(48, 22), Some(Theme::light().background));
    assert!(!tree.needs_frame());

    let builds = styles::BUTTON.builds();
    theme::set(Theme::dark());
    assert!(tree.needs_frame());

    let stats = tree.render_frame(&mut surface);
    assert_eq!(stats.painted, 3);
    assert_eq!(surface.pixel(48, 22), Some(Theme::dark().background));
    assert_eq!(styles::BUTTON.builds(), builds + 1);

    let control = tree.get(label).unwrap();
    assert_eq!(control.current_style().foreground_color(), Theme::dark().foreground);
    assert_eq!(
        StyleChain::new(&styles::BUTTON.snapshot()).border().left().color(),
        Theme::dark().border
    );

    let stats = tree.render_frame(&mut surface);
    assert_eq!(stats.painted, 0);
    assert_eq!(styles::BUTTON.builds(), builds + 1);
    assert_eq!(tree.get(button).unwrap().counters().paints, 2);
}
