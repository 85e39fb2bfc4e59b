//! Errors raised while building a game from seed roster data.

use crate::error::{ErrorSeverity, GameError};
use crate::scoring::TrackerError;
use crate::state::{FieldPosition, PlayerId, TeamSide};

/// Malformed seed data. These are the only fatal errors in the engine: no
/// game can be scored from a lineup card that breaks its own invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    #[error("lineup has no batting slots")]
    EmptyLineup,

    #[error("lineup has {actual} slots (max: {max})")]
    LineupTooLarge { max: usize, actual: usize },

    #[error("batting order must be contiguous: expected {expected}, found {found}")]
    BattingOrderGap { expected: u8, found: u8 },

    #[error("player {player} appears more than once on the lineup card")]
    DuplicatePlayer { player: PlayerId },

    #[error("position {position} is assigned to more than one slot")]
    DuplicatePosition { position: FieldPosition },

    #[error("{side} lineup is invalid: {source}")]
    Team {
        side: TeamSide,
        #[source]
        source: Box<InitializationError>,
    },

    #[error("player {player} is listed on both rosters")]
    SharedPlayer { player: PlayerId },

    #[error("slot holder {player} is not on the roster")]
    UnrosteredPlayer { player: PlayerId },

    #[error("live half has {outs} outs (max: {max})")]
    OutsOutOfRange { outs: u8, max: u8 },

    #[error("{side} batting pointer {pointer} is past a lineup of {len}")]
    BattingPointerOutOfRange {
        side: TeamSide,
        pointer: usize,
        len: usize,
    },

    #[error("recorded history does not match the live half: {source}")]
    History {
        #[source]
        source: TrackerError,
    },
}

impl InitializationError {
    pub(crate) fn for_team(side: TeamSide, source: InitializationError) -> Self {
        Self::Team {
            side,
            source: Box::new(source),
        }
    }
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLineup => "INIT_EMPTY_LINEUP",
            Self::LineupTooLarge { .. } => "INIT_LINEUP_TOO_LARGE",
            Self::BattingOrderGap { .. } => "INIT_BATTING_ORDER_GAP",
            Self::DuplicatePlayer { .. } => "INIT_DUPLICATE_PLAYER",
            Self::DuplicatePosition { .. } => "INIT_DUPLICATE_POSITION",
            Self::Team { source, .. } => source.error_code(),
            Self::SharedPlayer { .. } => "INIT_SHARED_PLAYER",
            Self::UnrosteredPlayer { .. } => "INIT_UNROSTERED_PLAYER",
            Self::OutsOutOfRange { .. } => "INIT_OUTS_OUT_OF_RANGE",
            Self::BattingPointerOutOfRange { .. } => "INIT_BATTING_POINTER_OUT_OF_RANGE",
            Self::History { .. } => "INIT_HISTORY",
        }
    }
}
