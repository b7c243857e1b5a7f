//! Cascading style model.
//!
//! `BorderSideStyle` → `BorderStyle` → `ControlStyle`, each property
//! optional, resolved through a [`StyleChain`] that ends at the theme.

mod border;
mod chain;
mod color;
mod control;

pub use border::{BorderSideStyle, BorderStyle, Side};
pub use chain::{BorderChain, SideChain, StyleChain};
pub use color::Color;
pub use control::{ClassStyle, ControlStyle, StyleParent, StyleSetup, CONTROL};
