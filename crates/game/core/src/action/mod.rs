//! Action domain.
//!
//! Every change to a [`GameState`] is expressed as a [`GameAction`] and runs
//! through the three-phase [`ActionTransition`] pipeline inside the engine.
//!
//! # Module Structure
//!
//! - `at_bat`: RecordAtBat (forced-advance completion, out/run accounting)
//! - `substitution`: ApplySubstitution and the substitution validator
//! - `inning`: AdvanceHalfInning, EndGame and ResumeGame
//! - `error`: ValidationError, SubstitutionError, StateError
//! - `root`: SHA-256 commitments over action sequences and states

pub mod at_bat;
pub mod error;
pub mod inning;
pub mod root;
pub mod substitution;

pub use at_bat::RecordAtBatAction;
pub use error::{StateError, SubstitutionError, ValidationError};
pub use inning::{AdvanceHalfInningAction, EndGameAction, ResumeGameAction};
#[cfg(feature = "serde")]
pub use root::{compute_actions_root, compute_state_root};
pub use substitution::{SubstitutionAction, SubstitutionKind, SubstitutionRecord};

use crate::config::GameConfig;
use crate::state::{AtBat, GameState, Timestamp};

/// Defines how a concrete action variant mutates game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. All hooks
/// receive the read-only [`GameConfig`] and must stay side-effect free.
pub trait ActionTransition {
    type Error;
    /// Data `apply` hands back; the engine turns it into an inverse delta.
    type Result;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations
    /// should assume that `pre_validate` has already run successfully.
    fn apply(
        &self,
        state: &mut GameState,
        config: &GameConfig,
    ) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Top-level action enum recorded in the journal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameAction {
    RecordAtBat(RecordAtBatAction),
    ApplySubstitution(SubstitutionAction),
    AdvanceHalfInning(AdvanceHalfInningAction),
    EndGame(EndGameAction),
    ResumeGame(ResumeGameAction),
}

impl GameAction {
    pub fn record_at_bat(at_bat: AtBat) -> Self {
        Self::RecordAtBat(RecordAtBatAction::new(at_bat))
    }

    pub fn substitute(record: SubstitutionRecord) -> Self {
        Self::ApplySubstitution(SubstitutionAction::new(record))
    }

    pub fn advance_half_inning() -> Self {
        Self::AdvanceHalfInning(AdvanceHalfInningAction)
    }

    pub fn end_game(end_time: Timestamp) -> Self {
        Self::EndGame(EndGameAction::new(end_time))
    }

    pub fn resume_game() -> Self {
        Self::ResumeGame(ResumeGameAction)
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            GameAction::RecordAtBat(_) => ActionKind::RecordAtBat,
            GameAction::ApplySubstitution(_) => ActionKind::ApplySubstitution,
            GameAction::AdvanceHalfInning(_) => ActionKind::AdvanceHalfInning,
            GameAction::EndGame(_) => ActionKind::EndGame,
            GameAction::ResumeGame(_) => ActionKind::ResumeGame,
        }
    }

    /// Ending a game is final; only an explicit resume reopens it.
    pub fn is_undoable(&self) -> bool {
        !matches!(self, GameAction::EndGame(_))
    }

    /// Short human-readable description for undo toasts and logs.
    pub fn describe(&self) -> String {
        match self {
            GameAction::RecordAtBat(action) => format!(
                "{} by {}",
                action.at_bat.result.label(),
                action.at_bat.batter
            ),
            GameAction::ApplySubstitution(action) => action.record.describe(),
            GameAction::AdvanceHalfInning(_) => "end of half-inning".to_string(),
            GameAction::EndGame(_) => "game ended".to_string(),
            GameAction::ResumeGame(_) => "game resumed".to_string(),
        }
    }

    pub fn summary(&self, nonce: u64) -> ActionSummary {
        ActionSummary {
            nonce,
            kind: self.kind(),
            description: self.describe(),
        }
    }
}

/// Discriminant of [`GameAction`], used for logging and event routing.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    RecordAtBat,
    ApplySubstitution,
    AdvanceHalfInning,
    EndGame,
    ResumeGame,
}

/// Descriptor of a committed action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSummary {
    /// Nonce of the state the action produced.
    pub nonce: u64,
    pub kind: ActionKind,
    pub description: String,
}

impl From<RecordAtBatAction> for GameAction {
    fn from(action: RecordAtBatAction) -> Self {
        Self::RecordAtBat(action)
    }
}

impl From<SubstitutionAction> for GameAction {
    fn from(action: SubstitutionAction) -> Self {
        Self::ApplySubstitution(action)
    }
}
