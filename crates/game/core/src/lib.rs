//! Deterministic baseball scoring rules and data types.
//!
//! `scorebook-core` defines the canonical scoring model (lineups, at-bats,
//! runner advances, innings) and exposes pure APIs shared by the runtime and
//! offline tools. All state mutation flows through [`engine::GameEngine`];
//! [`journal::ActionJournal`] layers the committed log and undo/redo on top.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod journal;
pub mod rules;
pub mod scoring;
pub mod state;

pub use action::{
    ActionKind, ActionSummary, ActionTransition, AdvanceHalfInningAction, EndGameAction,
    GameAction, RecordAtBatAction, ResumeGameAction, StateError, SubstitutionAction,
    SubstitutionError, SubstitutionKind, SubstitutionRecord, ValidationError,
};
#[cfg(feature = "serde")]
pub use action::{compute_actions_root, compute_state_root};
pub use config::GameConfig;
pub use engine::{
    ExecuteError, GameEngine, InverseDelta, Progression, ProgressionController, Transition,
    TransitionPhase, TransitionPhaseError,
};
pub use error::{ErrorSeverity, GameError};
pub use journal::{ActionJournal, JournalEntry, JournalError, SequenceError};
pub use rules::{compute_forced_advances, derive_rbis, ends_on_force_play, fill_forced_advances};
pub use scoring::{ScoreRow, Scoreboard, TrackerError, verify_live_half};
pub use state::{
    AdvanceOutcome, AdvanceReason, AtBat, Base, BaseOccupancy, Bases, BattingPointers,
    BattingResult, DefensivePlay, FieldPosition, GameId, GameState, Half, InitializationError,
    Inning, Lineup, LineupSlot, Pitch, PitchCount, Player, PlayerId, RunnerAdvance, RunnerSlot,
    Scoreline, TeamLine, TeamSide, Timestamp,
};
