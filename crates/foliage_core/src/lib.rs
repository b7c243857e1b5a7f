//! # Foliage Core
//!
//! Drawing-free half of the Foliage widget toolkit:
//! - Cascading styles (`BorderSideStyle` → `BorderStyle` → `ControlStyle`)
//!   that fall back through class defaults to a process-wide theme
//! - A versioned theme; class defaults rebuild lazily after a swap
//! - Stateless layout engines: stack, dock/anchor and table
//!
//! ## Data flow
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │   instance style → class default → ... → Theme         │
//! │   container rect + elements → engine → set_bounds      │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use foliage_core::geometry::Rect;
//! use foliage_core::layout::{DockLayout, DockStyle, Element};
//!
//! let mut elements = vec![
//!     Element::sized(0, 20).docked(DockStyle::Top),
//!     Element::sized(0, 0).docked(DockStyle::Fill),
//! ];
//! DockLayout.layout(Rect::new(0, 0, 200, 100), &mut elements);
//! assert_eq!(elements[1].bounds, Rect::new(0, 20, 200, 80));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod geometry;
pub mod layout;
pub mod style;
pub mod theme;

pub use error::{ConfigError, LayoutError, LayoutResult};
pub use geometry::{Padding, Point, Rect, Size};
pub use layout::{
    AnchorInfo, Anchors, BoundsSpecified, CellPosition, DockLayout, DockStyle, LayoutElement,
    LayoutEngine, Orientation, SizeType, StackLayout, TableLayout, TrackStyle,
};
pub use style::{BorderStyle, ClassStyle, Color, ControlStyle, StyleChain, StyleParent};
pub use theme::Theme;
