//! Action execution errors.
//!
//! Errors raised while validating and applying scoring actions.

use crate::error::{ErrorSeverity, GameError};
use crate::scoring::TrackerError;
use crate::state::{Base, FieldPosition, PlayerId, RunnerSlot, TeamSide};

// ============================================================================
// Validation Errors
// ============================================================================

/// A submitted action breaks a scoring rule.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("half-inning already has {outs} outs")]
    HalfInningClosed { outs: u8 },

    #[error("half-inning is not over ({outs} outs)")]
    HalfInningNotOver { outs: u8 },

    #[error("batter {found} is not due up (expected {expected})")]
    WrongBatter { expected: PlayerId, found: PlayerId },

    #[error("batting order {found} is not due up (expected {expected})")]
    WrongBattingOrder { expected: u8, found: u8 },

    #[error("{runner} advances from {from} to {to}")]
    AdvanceBackwards {
        runner: RunnerSlot,
        from: Base,
        to: Base,
    },

    #[error("{runner} cannot start an advance from home")]
    AdvanceFromHome { runner: RunnerSlot },

    #[error("{runner} appeal must stay on {from} (got {to})")]
    AppealBaseMismatch {
        runner: RunnerSlot,
        from: Base,
        to: Base,
    },

    #[error("{runner} scored flag disagrees with a safe arrival at home")]
    ScoredFlagMismatch { runner: RunnerSlot },

    #[error("{runner} is not on {base}")]
    RunnerNotOnBase { runner: RunnerSlot, base: Base },

    #[error("two runners end the play on {base}")]
    BaseConflict { base: Base },

    #[error("{runner} passes {passed}")]
    RunnerPassed {
        runner: RunnerSlot,
        passed: RunnerSlot,
    },

    #[error("{runner} is forced off {base} but does not advance")]
    ForcedRunnerStranded { runner: RunnerSlot, base: Base },

    #[error("batter-runner advance contradicts a {result}")]
    BatterAdvanceContradictsResult { result: String },

    #[error("play produces {produced} outs with {current} already recorded")]
    OutsExceeded { current: u8, produced: u8 },

    #[error("a {result} needs at least {required} outs (recorded {recorded})")]
    OutsUnderstated {
        result: String,
        required: u8,
        recorded: u8,
    },

    #[error("declared {declared} outs but the advances produce {derived}")]
    OutsMismatch { declared: u8, derived: u8 },

    #[error("{rbis} runs batted in exceed the {runs} runs scored")]
    RbisExceedRuns { rbis: u8, runs: u32 },

    #[error("{runs} run(s) cannot count when the third out is a force play")]
    RunScoredOnForceOut { runs: u32 },

    #[error("inning counter overflow")]
    InningOverflow,

    #[error("substitution rejected: {}", join_errors(.0))]
    Substitution(Vec<SubstitutionError>),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

fn join_errors(errors: &[SubstitutionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl GameError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::WrongBatter { .. }
            | Self::WrongBattingOrder { .. }
            | Self::HalfInningClosed { .. }
            | Self::HalfInningNotOver { .. } => ErrorSeverity::Recoverable,
            Self::Substitution(errors) => {
                if errors.iter().all(|error| error.severity().is_recoverable()) {
                    ErrorSeverity::Recoverable
                } else {
                    ErrorSeverity::Validation
                }
            }
            Self::Tracker(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HalfInningClosed { .. } => "VALIDATION_HALF_INNING_CLOSED",
            Self::HalfInningNotOver { .. } => "VALIDATION_HALF_INNING_NOT_OVER",
            Self::WrongBatter { .. } => "VALIDATION_WRONG_BATTER",
            Self::WrongBattingOrder { .. } => "VALIDATION_WRONG_BATTING_ORDER",
            Self::AdvanceBackwards { .. } => "VALIDATION_ADVANCE_BACKWARDS",
            Self::AdvanceFromHome { .. } => "VALIDATION_ADVANCE_FROM_HOME",
            Self::AppealBaseMismatch { .. } => "VALIDATION_APPEAL_BASE_MISMATCH",
            Self::ScoredFlagMismatch { .. } => "VALIDATION_SCORED_FLAG_MISMATCH",
            Self::RunnerNotOnBase { .. } => "VALIDATION_RUNNER_NOT_ON_BASE",
            Self::BaseConflict { .. } => "VALIDATION_BASE_CONFLICT",
            Self::RunnerPassed { .. } => "VALIDATION_RUNNER_PASSED",
            Self::ForcedRunnerStranded { .. } => "VALIDATION_FORCED_RUNNER_STRANDED",
            Self::BatterAdvanceContradictsResult { .. } => "VALIDATION_BATTER_ADVANCE",
            Self::OutsExceeded { .. } => "VALIDATION_OUTS_EXCEEDED",
            Self::OutsUnderstated { .. } => "VALIDATION_OUTS_UNDERSTATED",
            Self::OutsMismatch { .. } => "VALIDATION_OUTS_MISMATCH",
            Self::RbisExceedRuns { .. } => "VALIDATION_RBIS_EXCEED_RUNS",
            Self::RunScoredOnForceOut { .. } => "VALIDATION_RUN_ON_FORCE_OUT",
            Self::InningOverflow => "VALIDATION_INNING_OVERFLOW",
            Self::Substitution(_) => "VALIDATION_SUBSTITUTION",
            Self::Tracker(error) => error.error_code(),
        }
    }
}

// ============================================================================
// Substitution Errors
// ============================================================================

/// One violated substitution precondition. The validator reports all of them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubstitutionError {
    #[error("{player} is not on the {team} bench")]
    UnknownPlayer { team: TeamSide, player: PlayerId },

    #[error("{player} is already in the {team} lineup")]
    PlayerAlreadyInLineup { team: TeamSide, player: PlayerId },

    #[error("{team} lineup has no batting order {batting_order}")]
    InvalidBattingOrder { team: TeamSide, batting_order: u8 },

    #[error("expected {expected} in the target spot, found {}", display_holder(.found))]
    StaleTarget {
        expected: PlayerId,
        found: Option<PlayerId>,
    },

    #[error("{team} has nobody at {position}")]
    PositionNotHeld {
        team: TeamSide,
        position: FieldPosition,
    },

    #[error("{position} would be held twice")]
    DuplicatePosition { position: FieldPosition },

    #[error("swap needs two different positions (got {position} twice)")]
    IdenticalSwapPositions { position: FieldPosition },

    #[error("{position} is not a fielding position")]
    NotDefensivePosition { position: FieldPosition },

    #[error("{base} is not a base a runner can occupy")]
    InvalidBase { base: Base },

    #[error("nobody is on {base}")]
    EmptyBase { base: Base },

    #[error("{team} is not batting")]
    NotBattingTeam { team: TeamSide },
}

fn display_holder(found: &Option<PlayerId>) -> String {
    found.map_or_else(|| "nobody".to_string(), |player| player.to_string())
}

impl GameError for SubstitutionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StaleTarget { .. } | Self::EmptyBase { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPlayer { .. } => "SUBSTITUTION_UNKNOWN_PLAYER",
            Self::PlayerAlreadyInLineup { .. } => "SUBSTITUTION_PLAYER_ALREADY_IN_LINEUP",
            Self::InvalidBattingOrder { .. } => "SUBSTITUTION_INVALID_BATTING_ORDER",
            Self::StaleTarget { .. } => "SUBSTITUTION_STALE_TARGET",
            Self::PositionNotHeld { .. } => "SUBSTITUTION_POSITION_NOT_HELD",
            Self::DuplicatePosition { .. } => "SUBSTITUTION_DUPLICATE_POSITION",
            Self::IdenticalSwapPositions { .. } => "SUBSTITUTION_IDENTICAL_SWAP_POSITIONS",
            Self::NotDefensivePosition { .. } => "SUBSTITUTION_NOT_DEFENSIVE_POSITION",
            Self::InvalidBase { .. } => "SUBSTITUTION_INVALID_BASE",
            Self::EmptyBase { .. } => "SUBSTITUTION_EMPTY_BASE",
            Self::NotBattingTeam { .. } => "SUBSTITUTION_NOT_BATTING_TEAM",
        }
    }
}

// ============================================================================
// Game State Errors
// ============================================================================

/// The action does not fit the game's lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("game has ended; resume it before recording further actions")]
    GameEnded,

    #[error("game has not ended")]
    GameNotEnded,
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameEnded => "STATE_GAME_ENDED",
            Self::GameNotEnded => "STATE_GAME_NOT_ENDED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_errors_are_listed_together() {
        let error = ValidationError::Substitution(vec![
            SubstitutionError::UnknownPlayer {
                team: TeamSide::Home,
                player: PlayerId(40),
            },
            SubstitutionError::StaleTarget {
                expected: PlayerId(3),
                found: None,
            },
        ]);
        assert_eq!(
            error.to_string(),
            "substitution rejected: #40 is not on the home bench; \
             expected #3 in the target spot, found nobody"
        );
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert_eq!(error.error_code(), "VALIDATION_SUBSTITUTION");
    }

    #[test]
    fn lifecycle_errors_are_recoverable() {
        assert!(StateError::GameEnded.severity().is_recoverable());
        assert_eq!(StateError::GameNotEnded.error_code(), "STATE_GAME_NOT_ENDED");
    }
}
