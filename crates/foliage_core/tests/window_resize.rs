//! # Window Resize Tests
//!
//! Re-runs the engines against a growing container, the way a top-level
//! window drives them.

use foliage_core::geometry::{Rect, Size};
use foliage_core::layout::{Anchors, DockLayout, DockStyle, Element, LayoutEngine, StackLayout};

const START: Size = Size::new(200, 100);

fn container(size: Size) -> Rect {
    Rect::new(0, 0, size.width, size.height)
}

#[test]
fn anchored_elements_follow_their_edges() {
    let mut elements = vec![
        Element::sized(40, 20).placed(Rect::new(150, 70, 40, 20), START, Anchors::BOTTOM | Anchors::RIGHT),
        Element::sized(0, 0).placed(Rect::new(10, 10, 180, 50), START, Anchors::ALL),
        Element::sized(30, 30).placed(Rect::new(10, 65, 30, 30), START, Anchors::TOP_LEFT),
    ];

    DockLayout.layout(container(Size::new(300, 200)), &mut elements);
    assert_eq!(elements[0].bounds, Rect::new(250, 170, 40, 20));
    assert_eq!(elements[1].bounds, Rect::new(10, 10, 280, 150));
    assert_eq!(elements[2].bounds, Rect::new(10, 65, 30, 30));

    // Shrinking past the captured distances collapses instead of inverting.
    DockLayout.layout(container(Size::new(20, 20)), &mut elements);
    assert_eq!(elements[1].bounds.width, 0);
    assert_eq!(elements[1].bounds.height, 0);
}

#[test]
fn docked_strips_are_resolved_by_edge_priority() {
    let engine = LayoutEngine::Dock(DockLayout);
    let mut elements = vec![
        Element::sized(0, 0).docked(DockStyle::Fill),
        Element::sized(30, 0).docked(DockStyle::Left),
        Element::sized(0, 20).docked(DockStyle::Top),
        Element::sized(0, 10).docked(DockStyle::Bottom),
    ];

    for size in [START, Size::new(400, 300)] {
        engine.layout(container(size), &mut elements);
        assert_eq!(elements[2].bounds, Rect::new(0, 0, size.width, 20));
        assert_eq!(elements[3].bounds, Rect::new(0, size.height - 10, size.width, 10));
        assert_eq!(elements[1].bounds, Rect::new(0, 20, 30, size.height - 30));
        assert_eq!(
            elements[0].bounds,
            Rect::new(30, 20, size.width - 30, size.height - 30)
        );
    }
}

#[test]
fn expanding_stack_tracks_container_width() {
    let engine = LayoutEngine::Stack(StackLayout::VERTICAL_EXPAND);
    let mut elements = vec![Element::sized(10, 15), Element::sized(50, 25)];

    engine.layout(container(START), &mut elements);
    assert_eq!(elements[1].bounds, Rect::new(0, 15, 200, 25));

    engine.layout(container(Size::new(320, 100)), &mut elements);
    assert_eq!(elements[0].bounds, Rect::new(0, 0, 320, 15));
    assert_eq!(
        engine.preferred_size(&elements, START),
        Size::new(50, 40)
    );
}
