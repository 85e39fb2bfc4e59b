//! Replays the runner advances of one play over the bases occupied when it
//! started.
//!
//! Advances are processed in submission order, so one runner may appear more
//! than once (a stolen base followed by an advance on the throw). Each
//! advance must start where the previous one for the same runner ended.
//! Occupancy and passing are checked on the final positions, which makes the
//! relative order of different runners irrelevant.

use crate::action::ValidationError;
use crate::config::GameConfig;
use crate::state::{AdvanceOutcome, Base, Bases, RunnerAdvance, RunnerSlot};

use super::forced::forced_runner_floor;

/// Where every runner of a play ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayReplay {
    /// Indexed by runner slot. `None` once retired or when the slot was
    /// empty; `Some(Home)` for runners who scored.
    positions: [Option<Base>; GameConfig::MAX_RUNNERS],
    retired: [bool; GameConfig::MAX_RUNNERS],
    batter_reached: bool,
    pub runs: u32,
    pub outs: u8,
}

impl PlayReplay {
    fn start(occupied: Bases) -> Self {
        let mut positions = [None; GameConfig::MAX_RUNNERS];
        for runner in RunnerSlot::ALL {
            let origin = runner.origin();
            if runner == RunnerSlot::Batter || occupied.is_occupied(origin) {
                positions[runner.index()] = Some(origin);
            }
        }
        Self {
            positions,
            retired: [false; GameConfig::MAX_RUNNERS],
            batter_reached: false,
            runs: 0,
            outs: 0,
        }
    }

    pub fn position(&self, runner: RunnerSlot) -> Option<Base> {
        self.positions[runner.index()]
    }

    pub fn is_retired(&self, runner: RunnerSlot) -> bool {
        self.retired[runner.index()]
    }

    /// True when the batter's first movement on the play was safe.
    pub fn batter_reached(&self) -> bool {
        self.batter_reached
    }

    /// True when the batter neither moved nor was put out.
    pub fn batter_untouched(&self) -> bool {
        self.position(RunnerSlot::Batter) == Some(Base::Plate)
    }

    /// Runners left standing on first, second or third.
    pub fn runners_on(&self) -> impl Iterator<Item = (RunnerSlot, Base)> + '_ {
        RunnerSlot::ALL.into_iter().filter_map(|runner| {
            self.position(runner)
                .filter(|base| base.is_occupiable())
                .map(|base| (runner, base))
        })
    }

    pub fn occupied(&self) -> Bases {
        self.runners_on()
            .fold(Bases::empty(), |acc, (_, base)| acc | Bases::of(base))
    }

    fn record(&mut self, advance: &RunnerAdvance) -> Result<(), ValidationError> {
        let index = advance.runner.index();
        if self.positions[index] != Some(advance.from) {
            return Err(ValidationError::RunnerNotOnBase {
                runner: advance.runner,
                base: advance.from,
            });
        }

        if advance.runner == RunnerSlot::Batter && advance.from == Base::Plate {
            self.batter_reached = !advance.is_out();
        }

        if advance.is_out() {
            self.positions[index] = None;
            self.retired[index] = true;
            self.outs += 1;
        } else {
            self.positions[index] = Some(advance.to);
            if advance.to == Base::Home {
                self.runs += 1;
            }
        }
        Ok(())
    }

    /// Runners still in play must keep their order and stand on distinct bases.
    fn check_final_positions(&self) -> Result<(), ValidationError> {
        for (trailing_index, trailing) in RunnerSlot::ALL.into_iter().enumerate() {
            let Some(trailing_base) = self.position(trailing) else {
                continue;
            };
            if trailing_base == Base::Plate {
                continue;
            }
            for lead in RunnerSlot::ALL.into_iter().skip(trailing_index + 1) {
                let Some(lead_base) = self.position(lead) else {
                    continue;
                };
                if trailing_base == lead_base && lead_base != Base::Home {
                    return Err(ValidationError::BaseConflict { base: lead_base });
                }
                if trailing_base > lead_base {
                    return Err(ValidationError::RunnerPassed {
                        runner: trailing,
                        passed: lead,
                    });
                }
            }
        }
        Ok(())
    }

    /// A forced runner still in play must reach the next base unless a
    /// trailing runner was put out first, which removes the force.
    fn check_forced(&self, occupied: Bases) -> Result<(), ValidationError> {
        let mut force_removed = self.is_retired(RunnerSlot::Batter);
        for forced in forced_runner_floor(occupied, self.batter_reached).iter().rev() {
            if self.is_retired(forced.runner) {
                force_removed = true;
                continue;
            }
            if force_removed {
                continue;
            }
            let stranded = self
                .position(forced.runner)
                .is_none_or(|base| base < forced.floor);
            if stranded {
                return Err(ValidationError::ForcedRunnerStranded {
                    runner: forced.runner,
                    base: forced.from,
                });
            }
        }
        Ok(())
    }
}

/// Checks one advance on its own: direction, appeal placement and the
/// scored flag.
pub fn check_advance_shape(advance: &RunnerAdvance) -> Result<(), ValidationError> {
    let RunnerAdvance {
        runner, from, to, ..
    } = *advance;

    if from == Base::Home {
        return Err(ValidationError::AdvanceFromHome { runner });
    }
    match advance.outcome {
        AdvanceOutcome::Appeal if to != from => {
            return Err(ValidationError::AppealBaseMismatch { runner, from, to });
        }
        AdvanceOutcome::Appeal => {}
        AdvanceOutcome::Safe | AdvanceOutcome::Out | AdvanceOutcome::TagOut if to <= from => {
            return Err(ValidationError::AdvanceBackwards { runner, from, to });
        }
        AdvanceOutcome::Safe | AdvanceOutcome::Out | AdvanceOutcome::TagOut => {}
    }

    let should_score = to == Base::Home && !advance.is_out();
    if advance.scored != should_score {
        return Err(ValidationError::ScoredFlagMismatch { runner });
    }
    Ok(())
}

/// Replays `advances` starting from `occupied`, the batter at the plate.
pub fn replay_advances(
    occupied: Bases,
    advances: &[RunnerAdvance],
) -> Result<PlayReplay, ValidationError> {
    let mut replay = PlayReplay::start(occupied);
    for advance in advances {
        check_advance_shape(advance)?;
        replay.record(advance)?;
    }
    replay.check_forced(occupied)?;
    replay.check_final_positions()?;
    Ok(replay)
}
