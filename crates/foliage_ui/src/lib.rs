//! # Foliage UI
//!
//! Retained-mode control tree with a software compositor.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         FRAME PIPELINE                        │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Input Events → Control Tree → Layout → Paint → Composite     │
//! │       ↓              ↓            ↓        ↓         ↓        │
//! │  Hit Testing   Invalidation   Engines   Buffers   Root blit   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`tree`]: the control arena, structure edits, invalidation, layout
//!   and the frame tick
//! - [`widget`]: controls, their kinds and two-phase painting
//! - [`items`]: list and tab items with selection and hover
//! - [`render`]: the [`Canvas`] capability and the [`PixelBuffer`]
//!   backing store
//! - [`input`]: pointer/keyboard routing
//! - [`platform`]: window capabilities and the blocking bridge
//!
//! Everything here runs on the UI thread; only the blocking bridge owns a
//! worker thread.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod input;
pub mod items;
pub mod platform;
pub mod render;
pub mod tree;
pub mod widget;

pub use config::TreeConfig;
pub use error::{UiError, UiResult};
pub use foliage_core::ConfigError;
pub use input::{DispatchResponse, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use items::{Item, ItemCollection};
pub use platform::{BlockingExecutor, Clipboard, FileDialogOptions, FileDialogs, PlatformWindow};
pub use render::{Canvas, DrawCommand, PixelBuffer, TextRun};
pub use tree::{ControlTree, FrameStats};
pub use widget::{Control, ControlFlags, ControlId, ControlKind, PaintEventArgs, PaintState, Widget};
