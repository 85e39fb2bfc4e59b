//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the journal, the substitution validator and snapshot
//! handling so clients can bubble them up with consistent context.
use thiserror::Error;

use scorebook_core::{
    ErrorSeverity, GameError, InitializationError, JournalError, StateError, SubstitutionError,
};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("substitution rejected: {}", join(.0))]
    Substitution(Vec<SubstitutionError>),

    #[error("a pinch hitter cannot enter with {pitches} pitches already recorded")]
    AtBatInProgress { pitches: usize },

    #[error("session requires an initial game state before building")]
    MissingInitialState,

    #[error("failed to initialize game state from lineups")]
    InitialState(#[source] InitializationError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

fn join(errors: &[SubstitutionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl RuntimeError {
    /// Severity of the underlying scoring error; runtime-only failures are
    /// recoverable except for malformed seed data and snapshots.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Journal(error) => error.severity(),
            Self::State(error) => error.severity(),
            Self::Substitution(_) | Self::AtBatInProgress { .. } => ErrorSeverity::Recoverable,
            Self::MissingInitialState | Self::InitialState(_) | Self::Snapshot(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Journal(error) => error.error_code(),
            Self::State(error) => error.error_code(),
            Self::Substitution(_) => "RUNTIME_SUBSTITUTION_REJECTED",
            Self::AtBatInProgress { .. } => "RUNTIME_AT_BAT_IN_PROGRESS",
            Self::MissingInitialState => "RUNTIME_MISSING_INITIAL_STATE",
            Self::InitialState(error) => error.error_code(),
            Self::Snapshot(_) => "RUNTIME_SNAPSHOT",
        }
    }
}
