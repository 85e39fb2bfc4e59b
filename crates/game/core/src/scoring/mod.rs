//! Runner/out/score tracker.
//!
//! Everything here is derived from the recorded at-bats rather than from the
//! cached counters on [`GameState`]. The reducer uses these functions after
//! every at-bat to check that the cached live state still agrees with
//! history; the scoreboard uses them for the per-inning grid.
mod board;

pub use board::{ScoreRow, Scoreboard};

use crate::action::ValidationError;
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::rules::replay_advances;
use crate::state::{Bases, GameState, Half, Inning};

/// Recorded history disagrees with itself or with the live state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackerError {
    #[error("at-bat {at_bat} would bring the half to {outs} outs")]
    OutsExceeded { at_bat: usize, outs: u8 },

    #[error("at-bat {at_bat} does not replay: {source}")]
    Replay {
        at_bat: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("live bases {live:?} differ from replayed {derived:?}")]
    OccupancyDiverged { live: Bases, derived: Bases },

    #[error("live outs {live} differ from replayed {derived}")]
    OutsDiverged { live: u8, derived: u8 },
}

impl GameError for TrackerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutsExceeded { .. } => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutsExceeded { .. } => "TRACKER_OUTS_EXCEEDED",
            Self::Replay { .. } => "TRACKER_REPLAY",
            Self::OccupancyDiverged { .. } => "TRACKER_OCCUPANCY_DIVERGED",
            Self::OutsDiverged { .. } => "TRACKER_OUTS_DIVERGED",
        }
    }
}

/// Replays one half's advances from empty bases.
pub fn derive_runners(inning: &Inning) -> Result<Bases, TrackerError> {
    inning
        .at_bats
        .iter()
        .enumerate()
        .try_fold(Bases::empty(), |occupied, (at_bat, record)| {
            replay_advances(occupied, &record.advances)
                .map(|replay| replay.occupied())
                .map_err(|error| TrackerError::Replay {
                    at_bat,
                    source: Box::new(error),
                })
        })
}

/// Cumulative outs of one half, checked against the three-out limit.
pub fn recalculate_outs(inning: &Inning) -> Result<u8, TrackerError> {
    let mut outs: u8 = 0;
    for (at_bat, record) in inning.at_bats.iter().enumerate() {
        outs = outs.saturating_add(record.outs_produced);
        if outs > GameConfig::OUTS_PER_HALF {
            return Err(TrackerError::OutsExceeded { at_bat, outs });
        }
    }
    Ok(outs)
}

/// Runs scored in one half; zero when it has not been played.
pub fn inning_score(state: &GameState, inning_number: u8, half: Half) -> u32 {
    state
        .inning_entry(inning_number, half)
        .map(|inning| inning.at_bats.iter().map(|at_bat| at_bat.runs()).sum())
        .unwrap_or(0)
}

/// Hits by the team batting in `half`, across the whole game.
pub fn team_hits(state: &GameState, half: Half) -> u32 {
    halves(state, half)
        .flat_map(|inning| inning.at_bats.iter())
        .filter(|at_bat| at_bat.result.is_hit())
        .count() as u32
}

/// Errors charged during `half`, i.e. committed by the team fielding in it.
pub fn team_errors(state: &GameState, half: Half) -> u32 {
    halves(state, half)
        .flat_map(|inning| inning.at_bats.iter())
        .map(|at_bat| at_bat.errors_charged())
        .sum()
}

fn halves(state: &GameState, half: Half) -> impl Iterator<Item = &Inning> + '_ {
    state.innings.iter().filter(move |inning| inning.half == half)
}

/// Re-derives the live half and compares it with the cached counters.
pub fn verify_live_half(state: &GameState) -> Result<(), TrackerError> {
    let (derived_bases, derived_outs) = match state.live_inning() {
        Some(inning) => (derive_runners(inning)?, recalculate_outs(inning)?),
        None => (Bases::empty(), 0),
    };

    let live_bases = state.bases.occupied();
    if live_bases != derived_bases {
        return Err(TrackerError::OccupancyDiverged {
            live: live_bases,
            derived: derived_bases,
        });
    }
    if state.outs != derived_outs {
        return Err(TrackerError::OutsDiverged {
            live: state.outs,
            derived: derived_outs,
        });
    }
    Ok(())
}
