//! # UI Error Types
//!
//! All errors that can occur while building, laying out or driving a
//! control tree.

use foliage_core::{ConfigError, LayoutError};
use thiserror::Error;

use crate::widget::ControlId;

/// Errors raised by the control tree and the platform bridge.
#[derive(Error, Debug)]
pub enum UiError {
    /// The id does not name a control in this tree.
    #[error("control {0} is not in the tree")]
    UnknownControl(ControlId),

    /// Moving `child` under `parent` would make the tree cyclic.
    #[error("cannot move control {child} under {parent}: it would become its own ancestor")]
    InvalidParent {
        /// Control being moved.
        child: ControlId,
        /// Requested new parent.
        parent: ControlId,
    },

    /// The root is owned by the tree for its whole lifetime.
    #[error("the root control cannot be removed")]
    CannotRemoveRoot,

    /// The control kind has no such operation.
    #[error("{operation} is not supported by {kind} controls")]
    Unsupported {
        /// Requested operation.
        operation: &'static str,
        /// Kind of the target control.
        kind: &'static str,
    },

    /// The platform window lacks a capability (file dialogs, clipboard).
    #[error("platform capability not supported: {0}")]
    CapabilityNotSupported(&'static str),

    /// The blocking bridge could not run the task.
    #[error("blocking executor failed: {0}")]
    Executor(String),

    /// Invalid layout configuration.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Invalid theme or tree configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
