//! Inning/half progression.
//!
//! After every committed at-bat the journal asks the controller whether the
//! game should move on by itself: the half closes at three outs, and the game
//! ends on a walk-off or when regulation is complete with a decided score.

use crate::action::GameAction;
use crate::config::GameConfig;
use crate::state::{GameState, Half, TeamSide};

/// Where the game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Progression {
    TopHalf(u8),
    BottomHalf(u8),
    GameEnded,
}

impl Progression {
    pub fn of(state: &GameState) -> Self {
        if state.is_ended() {
            return Progression::GameEnded;
        }
        match state.half {
            Half::Top => Progression::TopHalf(state.inning),
            Half::Bottom => Progression::BottomHalf(state.inning),
        }
    }
}

/// Decides the automatic follow-up of a committed action.
pub struct ProgressionController<'a> {
    config: &'a GameConfig,
}

impl<'a> ProgressionController<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Follow-up action for `state` right after `trigger` was applied.
    ///
    /// Only at-bats trigger progression. Automatic end times use the at-bat's
    /// timestamp.
    pub fn next_action(&self, state: &GameState, trigger: &GameAction) -> Option<GameAction> {
        let GameAction::RecordAtBat(action) = trigger else {
            return None;
        };
        if state.is_ended() {
            return None;
        }

        let timestamp = action.at_bat.timestamp;
        if self.is_walk_off(state) {
            return Some(GameAction::end_game(timestamp));
        }
        if state.outs < GameConfig::OUTS_PER_HALF {
            return None;
        }
        if self.is_regulation_end(state) {
            Some(GameAction::end_game(timestamp))
        } else {
            Some(GameAction::advance_half_inning())
        }
    }

    /// Home team ahead in the bottom of a regulation or extra inning.
    pub fn is_walk_off(&self, state: &GameState) -> bool {
        self.config.walk_off
            && state.half == Half::Bottom
            && state.inning >= self.config.regulation_innings
            && state.runs(TeamSide::Home) > state.runs(TeamSide::Away)
    }

    /// The closing half leaves a decided game at or past regulation.
    pub fn is_regulation_end(&self, state: &GameState) -> bool {
        if state.inning < self.config.regulation_innings {
            return false;
        }
        let home = state.runs(TeamSide::Home);
        let away = state.runs(TeamSide::Away);
        match state.half {
            Half::Top => home > away,
            Half::Bottom => home != away,
        }
    }
}
