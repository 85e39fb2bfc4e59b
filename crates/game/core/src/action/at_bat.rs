//! RecordAtBat: appends a completed plate appearance to the live half.

use crate::config::GameConfig;
use crate::engine::AtBatInverse;
use crate::rules::{
    PlayReplay, derive_rbis, ends_on_force_play, fill_forced_advances, replay_advances,
};
use crate::scoring;
use crate::state::{AtBat, BaseOccupancy, BattingResult, GameState, Inning, RunnerSlot};

use super::{ActionTransition, ValidationError};

/// Records one plate appearance as submitted by the scorer.
///
/// Forced advances the scorer left out are filled in, the batter's implicit
/// out is counted for out results, and `outs_produced` is derived from the
/// advances. A non-zero declared `outs_produced` must match the derived count.
/// Runs batted in are derived when the scorer leaves them unset, and no run
/// may score on a third out made by force.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordAtBatAction {
    pub at_bat: AtBat,
}

/// A submitted at-bat completed against the current bases.
#[derive(Clone, Debug)]
pub(crate) struct ResolvedPlay {
    pub at_bat: AtBat,
    pub replay: PlayReplay,
}

impl RecordAtBatAction {
    pub fn new(at_bat: AtBat) -> Self {
        Self { at_bat }
    }

    pub(crate) fn resolve(&self, state: &GameState) -> Result<ResolvedPlay, ValidationError> {
        let submitted = &self.at_bat;
        let result = &submitted.result;
        let occupied = state.bases.occupied();

        let advances = fill_forced_advances(occupied, result, &submitted.advances);
        let replay = replay_advances(occupied, &advances)?;
        check_batter(result, &replay)?;

        let implicit_batter_out = result.retires_batter() && replay.batter_untouched();
        let outs = replay.outs + u8::from(implicit_batter_out);

        if submitted.outs_produced != 0 && submitted.outs_produced != outs {
            return Err(ValidationError::OutsMismatch {
                declared: submitted.outs_produced,
                derived: outs,
            });
        }
        let required = result.minimum_outs();
        if outs < required {
            return Err(ValidationError::OutsUnderstated {
                result: result.label().to_string(),
                required,
                recorded: outs,
            });
        }
        if state.outs + outs > GameConfig::OUTS_PER_HALF {
            return Err(ValidationError::OutsExceeded {
                current: state.outs,
                produced: outs,
            });
        }
        if state.outs + outs == GameConfig::OUTS_PER_HALF
            && replay.runs > 0
            && ends_on_force_play(occupied, result, &advances, implicit_batter_out)
        {
            return Err(ValidationError::RunScoredOnForceOut { runs: replay.runs });
        }
        let rbis = match submitted.rbis {
            Some(rbis) if u32::from(rbis) > replay.runs => {
                return Err(ValidationError::RbisExceedRuns {
                    rbis,
                    runs: replay.runs,
                });
            }
            Some(rbis) => rbis,
            None => derive_rbis(result, &advances),
        };

        let mut at_bat = submitted.clone();
        at_bat.advances = advances;
        at_bat.outs_produced = outs;
        at_bat.rbis = Some(rbis);
        Ok(ResolvedPlay { at_bat, replay })
    }
}

/// The batter-runner's movement must agree with the recorded result.
fn check_batter(result: &BattingResult, replay: &PlayReplay) -> Result<(), ValidationError> {
    let contradiction = || ValidationError::BatterAdvanceContradictsResult {
        result: result.label().to_string(),
    };

    if !result.completes_plate_appearance() && !replay.batter_untouched() {
        return Err(contradiction());
    }
    if result.retires_batter() && replay.batter_reached() {
        return Err(contradiction());
    }
    if let Some(destination) = result.batter_destination() {
        let short = !replay.is_retired(RunnerSlot::Batter)
            && replay
                .position(RunnerSlot::Batter)
                .is_none_or(|base| base < destination);
        if short {
            return Err(contradiction());
        }
    }
    Ok(())
}

/// Identities of the runners left on base after the play.
fn occupancy_after(
    before: &BaseOccupancy,
    replay: &PlayReplay,
    at_bat: &AtBat,
) -> BaseOccupancy {
    let mut bases = BaseOccupancy::empty();
    for (runner, base) in replay.runners_on() {
        let player = match runner {
            RunnerSlot::Batter => Some(at_bat.batter),
            _ => before.runner_on(runner.origin()),
        };
        bases.set(base, player);
    }
    bases
}

impl ActionTransition for RecordAtBatAction {
    type Error = ValidationError;
    type Result = AtBatInverse;

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        if state.outs >= GameConfig::OUTS_PER_HALF {
            return Err(ValidationError::HalfInningClosed { outs: state.outs });
        }

        let due_up = state.current_batter().ok_or(ValidationError::WrongBattingOrder {
            expected: 0,
            found: self.at_bat.batting_order,
        })?;
        if due_up.player_id != self.at_bat.batter {
            return Err(ValidationError::WrongBatter {
                expected: due_up.player_id,
                found: self.at_bat.batter,
            });
        }
        if due_up.batting_order != self.at_bat.batting_order {
            return Err(ValidationError::WrongBattingOrder {
                expected: due_up.batting_order,
                found: self.at_bat.batting_order,
            });
        }

        self.resolve(state).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, _config: &GameConfig) -> Result<AtBatInverse, Self::Error> {
        let ResolvedPlay { at_bat, replay } = self.resolve(state)?;
        let batting = state.batting_side();
        let fielding = state.fielding_side();

        let (inning_index, created_inning) = match state.live_inning_index() {
            Some(index) => (index, false),
            None => {
                state.innings.push(Inning::new(state.inning, state.half));
                (state.innings.len() - 1, true)
            }
        };

        let inverse = AtBatInverse {
            inning_index,
            created_inning,
            outs: state.outs,
            bases: state.bases.clone(),
            pointers: state.batting_pointers,
            totals: state.totals,
            inning_runs: state.innings[inning_index].runs_scored,
        };

        state.bases = occupancy_after(&state.bases, &replay, &at_bat);
        state.outs += at_bat.outs_produced;

        let line = state.totals.team_mut(batting);
        line.runs += replay.runs;
        line.hits += u32::from(at_bat.result.is_hit());
        state.totals.team_mut(fielding).errors += at_bat.errors_charged();

        if at_bat.result.completes_plate_appearance() {
            let len = state.lineup(batting).len().max(1);
            let next = (state.batting_pointers.get(batting) + 1) % len;
            state.batting_pointers.set(batting, next);
        }

        let inning = &mut state.innings[inning_index];
        inning.runs_scored += replay.runs;
        inning.at_bats.push(at_bat);

        Ok(inverse)
    }

    fn post_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        scoring::verify_live_half(state)?;
        Ok(())
    }
}
