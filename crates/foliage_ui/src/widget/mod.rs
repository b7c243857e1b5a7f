//! Controls and the widget kinds they carry.
//!
//! A [`Control`] holds the state every control shares (bounds, placement,
//! style, flags, backing buffer); its [`ControlKind`] decides content size,
//! how children are arranged, and what gets painted.

mod core;
mod kind;
mod paint;
pub mod styles;

pub use self::core::{Control, ControlFlags, ControlId, PaintCounters, PaintState};
pub use kind::{ControlKind, Widget, CHECK_BOX_SIZE};
pub use paint::PaintEventArgs;
