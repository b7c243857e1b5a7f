//! # Theme Cascade Test
//!
//! Class defaults are materialized lazily per theme version and instance
//! styles read through them. One test per binary because the theme is
//! process-wide.

use foliage_core::style::CONTROL;
use foliage_core::{theme, ClassStyle, Color, ControlStyle, StyleChain, Theme};

static HEADER: ClassStyle = ClassStyle::new("Header", Some(&CONTROL), |style, theme| {
    style.background_color = Some(theme.highlight);
    style.font_size = Some(theme.font_size + 4.0);
});

#[test]
fn instance_styles_follow_theme_swaps_through_class_defaults() {
    theme::set(Theme::light());

    let mut style = ControlStyle::inheriting(&HEADER);
    style.foreground_color = Some(Color::rgb(1, 2, 3));

    let chain = StyleChain::new(&style);
    assert_eq!(chain.foreground_color(), Color::rgb(1, 2, 3));
    assert_eq!(chain.background_color(), Theme::light().highlight);
    assert!((chain.font_size() - 18.0).abs() < f32::EPSILON);
    assert_eq!(chain.border().left().color(), Theme::light().border);
    drop(chain);
    let builds = HEADER.builds();

    let version = theme::update(|theme| {
        *theme = Theme::dark();
        theme.font_size = 10.0;
    });
    assert_eq!(theme::version(), version);

    let chain = StyleChain::new(&style);
    assert_eq!(chain.foreground_color(), Color::rgb(1, 2, 3));
    assert_eq!(chain.background_color(), Theme::dark().highlight);
    assert!((chain.font_size() - 14.0).abs() < f32::EPSILON);
    assert_eq!(HEADER.builds(), builds + 1);

    // Unchanged version: the snapshot is reused.
    let _ = StyleChain::new(&style).background_color();
    assert_eq!(HEADER.builds(), builds + 1);
}
