use crate::engine::ExecuteError;
use crate::error::{ErrorSeverity, GameError};

/// Undo/redo requested on an empty or blocked stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SequenceError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("the game was ended explicitly; resume it instead of undoing")]
    UndoBarrier,
}

impl GameError for SequenceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NothingToUndo => "SEQUENCE_NOTHING_TO_UNDO",
            Self::NothingToRedo => "SEQUENCE_NOTHING_TO_REDO",
            Self::UndoBarrier => "SEQUENCE_UNDO_BARRIER",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

impl GameError for JournalError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Execute(error) => error.severity(),
            Self::Sequence(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Execute(error) => error.error_code(),
            Self::Sequence(error) => error.error_code(),
        }
    }
}
