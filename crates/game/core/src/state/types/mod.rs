pub mod bases;
pub mod common;
pub mod inning;
pub mod lineup;
pub mod play;

pub use bases::{Base, BaseOccupancy, Bases, RunnerSlot};
pub use common::{GameId, Half, PlayerId, TeamSide, Timestamp};
pub use inning::{AtBat, Inning};
pub use lineup::{FieldPosition, Lineup, LineupSlot, Player};
pub use play::{
    AdvanceOutcome, AdvanceReason, BattingResult, DefensivePlay, FieldingMarker, FieldingStep,
    Pitch, PitchCount, RunnerAdvance,
};
