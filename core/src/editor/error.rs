use std::fmt;

use super::target::ObjectId;

/// Error type for history operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The undo stack is empty.
    NothingToUndo,
    /// The redo stack is empty.
    NothingToRedo,
    /// The target the step was recorded for is not part of the supplied set.
    TargetNotFound(ObjectId),
    /// The step carries no snapshot, or the target rejected it.
    NotRestorable(ObjectId),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToUndo => write!(f, "nothing to undo"),
            Self::NothingToRedo => write!(f, "nothing to redo"),
            Self::TargetNotFound(id) => write!(f, "target not found: {id}"),
            Self::NotRestorable(id) => write!(f, "state of {id} cannot be restored"),
        }
    }
}

impl std::error::Error for EditError {}

/// Result type for history operations.
pub type EditResult<T = ()> = Result<T, EditError>;
