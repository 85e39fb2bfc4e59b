//! Half-inning and game lifecycle actions.

use crate::config::GameConfig;
use crate::engine::{EndGameInverse, HalfInningInverse, ResumeInverse};
use crate::state::{GameState, Half, Timestamp};

use super::{ActionTransition, StateError, ValidationError};

/// Closes the live half at three outs and opens the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvanceHalfInningAction;

impl ActionTransition for AdvanceHalfInningAction {
    type Error = ValidationError;
    type Result = HalfInningInverse;

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        if state.outs != GameConfig::OUTS_PER_HALF {
            return Err(ValidationError::HalfInningNotOver { outs: state.outs });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _config: &GameConfig,
    ) -> Result<HalfInningInverse, Self::Error> {
        let (inning, half) = match state.half {
            Half::Top => (state.inning, Half::Bottom),
            Half::Bottom => (
                state
                    .inning
                    .checked_add(1)
                    .ok_or(ValidationError::InningOverflow)?,
                Half::Top,
            ),
        };

        let inverse = HalfInningInverse {
            inning: state.inning,
            half: state.half,
            outs: state.outs,
            bases: state.bases.clone(),
            closed_inning: close_live_inning(state),
        };

        state.inning = inning;
        state.half = half;
        state.outs = 0;
        state.bases.clear();
        Ok(inverse)
    }
}

/// Marks the game finished at `end_time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndGameAction {
    pub end_time: Timestamp,
}

impl EndGameAction {
    pub fn new(end_time: Timestamp) -> Self {
        Self { end_time }
    }
}

impl ActionTransition for EndGameAction {
    type Error = StateError;
    type Result = EndGameInverse;

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        if state.is_ended() {
            return Err(StateError::GameEnded);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _config: &GameConfig) -> Result<EndGameInverse, Self::Error> {
        let closed_inning = close_live_inning(state);
        state.end_time = Some(self.end_time);
        Ok(EndGameInverse { closed_inning })
    }
}

/// Reopens an ended game where it stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResumeGameAction;

impl ActionTransition for ResumeGameAction {
    type Error = StateError;
    type Result = ResumeInverse;

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        if !state.is_ended() {
            return Err(StateError::GameNotEnded);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _config: &GameConfig) -> Result<ResumeInverse, Self::Error> {
        let end_time = state.end_time.take().ok_or(StateError::GameNotEnded)?;
        let reopened_inning = state.live_inning_index().and_then(|index| {
            let inning = &mut state.innings[index];
            inning.outs_at_close.take().map(|outs| (index, outs))
        });
        Ok(ResumeInverse {
            end_time,
            reopened_inning,
        })
    }
}

/// Records the live half's outs on its inning entry, if it has one and it is
/// still open. Returns the index that was closed.
fn close_live_inning(state: &mut GameState) -> Option<usize> {
    let outs = state.outs;
    let index = state.live_inning_index()?;
    let inning = &mut state.innings[index];
    if inning.is_closed() {
        return None;
    }
    inning.outs_at_close = Some(outs);
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Base, Inning, PlayerId, fixtures};

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn half_cannot_end_before_three_outs() {
        let mut state = fixtures::game();
        state.outs = 2;
        assert_eq!(
            AdvanceHalfInningAction.pre_validate(&state, &config()),
            Err(ValidationError::HalfInningNotOver { outs: 2 })
        );
    }

    #[test]
    fn advancing_resets_the_field() {
        let mut state = fixtures::game();
        state.innings.push(Inning::new(1, Half::Top));
        state.outs = 3;
        state.bases.set(Base::Third, Some(PlayerId(3)));
        state.batting_pointers.away = 4;

        let inverse = AdvanceHalfInningAction.apply(&mut state, &config()).unwrap();
        assert_eq!((state.inning, state.half), (1, Half::Bottom));
        assert_eq!(state.outs, 0);
        assert!(state.bases.is_empty());
        assert_eq!(state.innings[0].outs_at_close, Some(3));
        assert_eq!(state.batting_pointers.away, 4);
        assert_eq!(inverse.closed_inning, Some(0));

        state.outs = 3;
        AdvanceHalfInningAction.apply(&mut state, &config()).unwrap();
        assert_eq!((state.inning, state.half), (2, Half::Top));
    }

    #[test]
    fn inning_number_cannot_overflow() {
        let mut state = fixtures::game();
        state.inning = u8::MAX;
        state.half = Half::Bottom;
        state.outs = 3;
        assert_eq!(
            AdvanceHalfInningAction.apply(&mut state, &config()),
            Err(ValidationError::InningOverflow)
        );
    }

    #[test]
    fn end_then_resume_reopens_the_half() {
        let mut state = fixtures::game();
        state.innings.push(Inning::new(1, Half::Top));
        state.outs = 1;

        EndGameAction::new(Timestamp(50)).apply(&mut state, &config()).unwrap();
        assert!(state.is_ended());
        assert_eq!(state.innings[0].outs_at_close, Some(1));
        assert_eq!(
            EndGameAction::new(Timestamp(60)).pre_validate(&state, &config()),
            Err(StateError::GameEnded)
        );

        let inverse = ResumeGameAction.apply(&mut state, &config()).unwrap();
        assert!(!state.is_ended());
        assert!(!state.innings[0].is_closed());
        assert_eq!(inverse.end_time, Timestamp(50));
        assert_eq!(inverse.reopened_inning, Some((0, 1)));
    }

    #[test]
    fn resume_requires_an_ended_game() {
        let state = fixtures::game();
        assert_eq!(
            ResumeGameAction.pre_validate(&state, &config()),
            Err(StateError::GameNotEnded)
        );
    }
}
