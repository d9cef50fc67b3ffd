//! Editing targets and the history of inspector-driven mutations.
//!
//! This module is decoupled from any concrete object model so that the
//! inspector crate can operate on whatever the host exposes:
//!
//! - [`Inspectable`] - an object that can be selected and mutated from the inspector
//! - [`AsAny`] - downcasting helper used to reach the concrete target type
//! - [`InvocationHistory`] - undo/redo stack plus dirty tracking
//! - [`EditError`] / [`EditResult`] - error handling for history operations
//!
//! # Undo steps
//!
//! Every mutation is preceded by [`InvocationHistory::record`], which stores
//! one undo step per target. If the target supports state capture
//! ([`Inspectable::capture_state`]), undoing the step restores the captured
//! state; otherwise the step is kept for display only and undo reports
//! [`EditError::NotRestorable`].

mod error;
mod history;
mod target;

pub use error::{EditError, EditResult};
pub use history::{DEFAULT_MAX_UNDO, InvocationHistory, UndoStep};
pub use target::{AsAny, Inspectable, ObjectId, StateSnapshot, short_type_name};
