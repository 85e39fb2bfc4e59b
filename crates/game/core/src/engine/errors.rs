//! Errors raised while the engine scores an action.
//!
//! Every rejection names the step of the scoring pipeline that refused it, so
//! a scorer can tell a bad entry from a tracker divergence after the fact.

use crate::action::{
    ActionTransition, AdvanceHalfInningAction, EndGameAction, RecordAtBatAction,
    ResumeGameAction, StateError, SubstitutionAction,
};
use crate::error::{ErrorSeverity, GameError};

/// Step of the scoring pipeline.
///
/// `PreValidate` checks the entry against the live game (batter due up,
/// advances legal, outs in range). `Apply` writes it into the half-inning.
/// `PostValidate` replays the live half and compares outs and occupancy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "entry check",
            TransitionPhase::Apply => "scoring",
            TransitionPhase::PostValidate => "tracker replay",
        }
    }
}

/// A rejected play or roster move, tagged with the step that refused it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rejected it: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// A scorer action the engine refused, one variant per action kind.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("at-bat not recorded: {0}")]
    RecordAtBat(TransitionPhaseError<<RecordAtBatAction as ActionTransition>::Error>),

    #[error("substitution not applied: {0}")]
    Substitution(TransitionPhaseError<<SubstitutionAction as ActionTransition>::Error>),

    #[error("half-inning not closed: {0}")]
    AdvanceHalfInning(TransitionPhaseError<<AdvanceHalfInningAction as ActionTransition>::Error>),

    #[error("game not ended: {0}")]
    EndGame(TransitionPhaseError<<EndGameAction as ActionTransition>::Error>),

    #[error("game not resumed: {0}")]
    ResumeGame(TransitionPhaseError<<ResumeGameAction as ActionTransition>::Error>),

    #[error(transparent)]
    State(#[from] StateError),
}

impl ExecuteError {
    /// Pipeline phase that failed; `None` for lifecycle rejections raised
    /// before the pipeline started.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::RecordAtBat(error) => Some(error.phase),
            Self::Substitution(error) => Some(error.phase),
            Self::AdvanceHalfInning(error) => Some(error.phase),
            Self::EndGame(error) => Some(error.phase),
            Self::ResumeGame(error) => Some(error.phase),
            Self::State(_) => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RecordAtBat(error) => error.error.severity(),
            Self::Substitution(error) => error.error.severity(),
            Self::AdvanceHalfInning(error) => error.error.severity(),
            Self::EndGame(error) => error.error.severity(),
            Self::ResumeGame(error) => error.error.severity(),
            Self::State(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RecordAtBat(error) => error.error.error_code(),
            Self::Substitution(error) => error.error.error_code(),
            Self::AdvanceHalfInning(error) => error.error.error_code(),
            Self::EndGame(error) => error.error.error_code(),
            Self::ResumeGame(error) => error.error.error_code(),
            Self::State(error) => error.error_code(),
        }
    }
}
