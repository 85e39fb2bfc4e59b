//! State reducer and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! routes every [`GameAction`] through the transition phases, surfaces rich
//! error information for the runtime and hands back the inverse delta that
//! undo needs.

mod errors;
mod inverse;
mod progression;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use inverse::{
    AtBatInverse, EndGameInverse, HalfInningInverse, InverseDelta, ResumeInverse,
    SubstitutionInverse,
};
pub use progression::{Progression, ProgressionController};

use crate::action::{GameAction, StateError};
use crate::config::GameConfig;
use crate::state::GameState;

/// Result of applying one action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub state: GameState,
    /// Reverting this on `state` yields the input state.
    pub inverse: InverseDelta,
}

/// Pure reducer: `apply` never touches its input state.
#[derive(Clone, Copy, Debug)]
pub struct GameEngine<'a> {
    config: &'a GameConfig,
}

impl<'a> GameEngine<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    /// Applies `action` to a copy of `state`.
    ///
    /// An ended game accepts nothing but [`GameAction::ResumeGame`]. The
    /// nonce of the produced state is one past the input's.
    pub fn apply(&self, state: &GameState, action: &GameAction) -> Result<Transition, ExecuteError> {
        let mut next = state.clone();
        let inverse = self.apply_in_place(&mut next, action)?;
        Ok(Transition {
            state: next,
            inverse,
        })
    }

    /// Mutating form used by the journal. On error `state` may be partially
    /// updated; callers that need atomicity work on a copy.
    pub(crate) fn apply_in_place(
        &self,
        state: &mut GameState,
        action: &GameAction,
    ) -> Result<InverseDelta, ExecuteError> {
        if state.is_ended() && !matches!(action, GameAction::ResumeGame(_)) {
            return Err(StateError::GameEnded.into());
        }

        let inverse = transition::execute_transition(action, state, self.config)?;
        state.nonce += 1;
        Ok(inverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ValidationError;
    use crate::error::{ErrorSeverity, GameError};
    use crate::state::{AtBat, BattingResult, PlayerId, Timestamp, fixtures};

    fn single(batter: u32) -> GameAction {
        GameAction::record_at_bat(AtBat::new(
            PlayerId(batter),
            batter as u8,
            BattingResult::Single,
            Timestamp(10),
        ))
    }

    #[test]
    fn apply_leaves_the_input_untouched() {
        let config = GameConfig::default();
        let engine = GameEngine::new(&config);
        let state = fixtures::game();

        let transition = engine.apply(&state, &single(1)).unwrap();
        assert_eq!(state, fixtures::game());
        assert_eq!(transition.state.nonce, 1);

        let mut reverted = transition.state.clone();
        transition.inverse.revert(&mut reverted);
        assert_eq!(reverted, state);
    }

    #[test]
    fn ended_game_only_accepts_resume() {
        let config = GameConfig::default();
        let engine = GameEngine::new(&config);
        let ended = engine
            .apply(&fixtures::game(), &GameAction::end_game(Timestamp(5)))
            .unwrap()
            .state;

        assert_eq!(
            engine.apply(&ended, &single(1)),
            Err(ExecuteError::State(StateError::GameEnded))
        );
        assert!(engine.apply(&ended, &GameAction::resume_game()).is_ok());
    }

    #[test]
    fn errors_carry_the_failing_phase() {
        let config = GameConfig::default();
        let engine = GameEngine::new(&config);
        let error = engine.apply(&fixtures::game(), &single(2)).unwrap_err();

        assert_eq!(error.phase(), Some(TransitionPhase::PreValidate));
        assert_eq!(error.severity(), ErrorSeverity::Recoverable);
        assert!(matches!(
            error,
            ExecuteError::RecordAtBat(TransitionPhaseError {
                error: ValidationError::WrongBatter { .. },
                ..
            })
        ));
        assert_eq!(
            error.to_string(),
            "at-bat not recorded: entry check rejected it: batter #2 is not due up (expected #1)"
        );
    }
}
