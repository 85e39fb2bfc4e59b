//! Authoritative game state representation.
//!
//! This module owns the data structures that describe lineups, the live
//! half-inning (outs, runners, batter pointers), cumulative totals and the
//! per-inning at-bat history. Callers clone or query this state but mutate it
//! exclusively through the engine.
mod error;
pub mod types;

use crate::config::GameConfig;
use crate::scoring;

pub use error::InitializationError;
pub use types::{
    AdvanceOutcome, AdvanceReason, AtBat, Base, BaseOccupancy, Bases, BattingResult,
    DefensivePlay, FieldPosition, FieldingMarker, FieldingStep, GameId, Half, Inning, Lineup,
    LineupSlot, Pitch, PitchCount, Player, PlayerId, RunnerAdvance, RunnerSlot, TeamSide,
    Timestamp,
};

/// Runs, hits and errors for one team.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamLine {
    pub runs: u32,
    pub hits: u32,
    /// Errors committed by this team while fielding.
    pub errors: u32,
}

/// Cumulative R/H/E for both teams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoreline {
    pub away: TeamLine,
    pub home: TeamLine,
}

impl Scoreline {
    pub fn team(&self, side: TeamSide) -> &TeamLine {
        match side {
            TeamSide::Away => &self.away,
            TeamSide::Home => &self.home,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut TeamLine {
        match side {
            TeamSide::Away => &mut self.away,
            TeamSide::Home => &mut self.home,
        }
    }
}

/// Index of the next batter in each lineup. Persists across innings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattingPointers {
    pub away: usize,
    pub home: usize,
}

impl BattingPointers {
    pub fn get(&self, side: TeamSide) -> usize {
        match side {
            TeamSide::Away => self.away,
            TeamSide::Home => self.home,
        }
    }

    pub fn set(&mut self, side: TeamSide, index: usize) {
        match side {
            TeamSide::Away => self.away = index,
            TeamSide::Home => self.home = index,
        }
    }
}

/// Canonical snapshot of a game being scored.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub id: GameId,
    /// Scheduled start, supplied with the roster metadata.
    pub date: Timestamp,
    pub away: Lineup,
    pub home: Lineup,

    /// Current inning number, starting at 1.
    pub inning: u8,
    pub half: Half,
    /// Outs in the live half. Reaches 3 only until the half is advanced (or
    /// for good once the game ends on the final out).
    pub outs: u8,
    /// Runners on base in the live half; reset at every half boundary.
    pub bases: BaseOccupancy,
    pub batting_pointers: BattingPointers,
    pub totals: Scoreline,

    /// One entry per half that has seen an at-bat, in order of play.
    pub innings: Vec<Inning>,
    pub end_time: Option<Timestamp>,

    /// Sequential counter incremented by every applied action and restored on undo.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nonce: u64,
}

impl GameState {
    /// Creates a fresh game in the top of the first inning.
    pub fn new(
        id: GameId,
        date: Timestamp,
        away: Lineup,
        home: Lineup,
    ) -> Result<Self, InitializationError> {
        let state = Self {
            id,
            date,
            away,
            home,
            inning: 1,
            half: Half::Top,
            outs: 0,
            bases: BaseOccupancy::empty(),
            batting_pointers: BattingPointers::default(),
            totals: Scoreline::default(),
            innings: Vec::new(),
            end_time: None,
            nonce: 0,
        };
        state.validate()?;
        Ok(state)
    }

    /// Checks the invariants the engine maintains. Used for seed lineups and
    /// for states loaded from outside the engine, such as snapshots.
    pub fn validate(&self) -> Result<(), InitializationError> {
        for side in [TeamSide::Away, TeamSide::Home] {
            let lineup = self.lineup(side);
            lineup
                .validate()
                .map_err(|error| InitializationError::for_team(side, error))?;

            let pointer = self.batting_pointers.get(side);
            if pointer >= lineup.len() {
                return Err(InitializationError::BattingPointerOutOfRange {
                    side,
                    pointer,
                    len: lineup.len(),
                });
            }
        }

        if let Some(shared) = self
            .away
            .roster
            .iter()
            .chain(self.away.bench.iter())
            .find(|player| self.home.player(player.id).is_some())
        {
            return Err(InitializationError::SharedPlayer { player: shared.id });
        }

        if self.outs > GameConfig::OUTS_PER_HALF {
            return Err(InitializationError::OutsOutOfRange {
                outs: self.outs,
                max: GameConfig::OUTS_PER_HALF,
            });
        }

        scoring::verify_live_half(self).map_err(|source| InitializationError::History { source })
    }

    pub fn lineup(&self, side: TeamSide) -> &Lineup {
        match side {
            TeamSide::Away => &self.away,
            TeamSide::Home => &self.home,
        }
    }

    pub fn lineup_mut(&mut self, side: TeamSide) -> &mut Lineup {
        match side {
            TeamSide::Away => &mut self.away,
            TeamSide::Home => &mut self.home,
        }
    }

    pub fn batting_side(&self) -> TeamSide {
        self.half.batting_side()
    }

    pub fn fielding_side(&self) -> TeamSide {
        self.half.fielding_side()
    }

    /// Slot due up next for the given team.
    pub fn due_up(&self, side: TeamSide) -> Option<&LineupSlot> {
        let lineup = self.lineup(side);
        if lineup.is_empty() {
            return None;
        }
        lineup
            .slots
            .get(self.batting_pointers.get(side) % lineup.len())
    }

    /// Slot of the batter at the plate.
    pub fn current_batter(&self) -> Option<&LineupSlot> {
        self.due_up(self.batting_side())
    }

    pub fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    /// Index of the live half's inning entry, if it has seen an at-bat.
    pub fn live_inning_index(&self) -> Option<usize> {
        let index = self.innings.len().checked_sub(1)?;
        let last = &self.innings[index];
        (last.number == self.inning && last.half == self.half).then_some(index)
    }

    pub fn live_inning(&self) -> Option<&Inning> {
        self.live_inning_index().map(|index| &self.innings[index])
    }

    pub fn inning_entry(&self, number: u8, half: Half) -> Option<&Inning> {
        self.innings
            .iter()
            .find(|inning| inning.number == number && inning.half == half)
    }

    pub fn last_at_bat(&self) -> Option<&AtBat> {
        self.innings.iter().rev().find_map(Inning::last_at_bat)
    }

    pub fn runs(&self, side: TeamSide) -> u32 {
        self.totals.team(side).runs
    }

    /// Looks a player up on either roster.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.away.player(id).or_else(|| self.home.player(id))
    }
}
