//! Class-level default styles of the built-in controls.
//!
//! Each setup reads the theme it is given, so a theme swap reaches every
//! instance that leaves a property unset.

use foliage_core::style::CONTROL;
use foliage_core::{ClassStyle, Color, ControlStyle, Theme};

/// Hover overlay that changes nothing.
pub static CONTROL_HOVER: ClassStyle = ClassStyle::overlay("ControlHover", |_, _| {});

/// Dock/anchor containers.
pub static PANEL: ClassStyle = ClassStyle::new("Panel", Some(&CONTROL), |_, _| {});

/// Plain text, no fill or border.
pub static LABEL: ClassStyle = ClassStyle::new("Label", Some(&CONTROL), label);

/// Push buttons.
pub static BUTTON: ClassStyle = ClassStyle::new("Button", Some(&CONTROL), button);

/// Push buttons under the pointer.
pub static BUTTON_HOVER: ClassStyle = ClassStyle::overlay("ButtonHover", button_hover);

/// Check boxes.
pub static CHECKBOX: ClassStyle = ClassStyle::new("CheckBox", Some(&CONTROL), label);

/// Check boxes under the pointer.
pub static CHECKBOX_HOVER: ClassStyle = ClassStyle::overlay("CheckBoxHover", checkbox_hover);

/// List boxes.
pub static LIST_BOX: ClassStyle = ClassStyle::new("ListBox", Some(&CONTROL), |_, _| {});

/// The selected item of a list.
pub static LIST_ITEM_SELECTED: ClassStyle =
    ClassStyle::overlay("ListItemSelected", list_item_selected);

/// The list item under the pointer.
pub static LIST_ITEM_HOVER: ClassStyle = ClassStyle::overlay("ListItemHover", list_item_hover);

/// Tab strips: a single bottom rule.
pub static TAB_STRIP: ClassStyle = ClassStyle::new("TabStrip", Some(&CONTROL), tab_strip);

/// The selected tab.
pub static TAB_SELECTED: ClassStyle = ClassStyle::overlay("TabSelected", tab_selected);

fn label(style: &mut ControlStyle, _theme: &Theme) {
    style.background_color = Some(Color::TRANSPARENT);
    style.border.set_width(Some(0));
}

fn button(style: &mut ControlStyle, theme: &Theme) {
    style.background_color = Some(theme.background);
    style.border.set_color(Some(theme.border));
}

fn button_hover(style: &mut ControlStyle, theme: &Theme) {
    style.background_color = Some(theme.hover);
    style.border.set_color(Some(theme.highlight));
}

fn checkbox_hover(style: &mut ControlStyle, theme: &Theme) {
    style.foreground_color = Some(theme.highlight);
}

fn list_item_selected(style: &mut ControlStyle, theme: &Theme) {
    style.background_color = Some(theme.selection);
}

fn list_item_hover(style: &mut ControlStyle, theme: &Theme) {
    style.background_color = Some(theme.hover);
}

fn tab_strip(style: &mut ControlStyle, theme: &Theme) {
    style.border.set_width(Some(0));
    style.border.bottom.width = Some(theme.border_width);
}

fn tab_selected(style: &mut ControlStyle, theme: &Theme) {
    style.background_color = Some(theme.highlight);
    style.foreground_color = Some(theme.highlight_text);
}
