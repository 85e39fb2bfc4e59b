//! Runs scorer actions through the scoring pipeline.

use crate::action::{ActionTransition, GameAction};
use crate::config::GameConfig;
use crate::state::GameState;

use super::InverseDelta;
use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Scores one action: checks the entry against the live game, writes it in,
/// then replays the live half to confirm outs and occupancy still agree.
///
/// The payload returned by `apply` is what undo needs to take the action
/// back. A failed replay leaves the play written, so callers score on a copy.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    config: &GameConfig,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, config)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Scores `action` and keeps its undo payload under the matching delta.
pub(super) fn execute_transition(
    action: &GameAction,
    state: &mut GameState,
    config: &GameConfig,
) -> Result<InverseDelta, ExecuteError> {
    match action {
        GameAction::RecordAtBat(transition) => drive_transition(transition, state, config)
            .map(InverseDelta::AtBat)
            .map_err(ExecuteError::RecordAtBat),
        GameAction::ApplySubstitution(transition) => drive_transition(transition, state, config)
            .map(InverseDelta::Substitution)
            .map_err(ExecuteError::Substitution),
        GameAction::AdvanceHalfInning(transition) => drive_transition(transition, state, config)
            .map(InverseDelta::HalfInning)
            .map_err(ExecuteError::AdvanceHalfInning),
        GameAction::EndGame(transition) => drive_transition(transition, state, config)
            .map(InverseDelta::EndGame)
            .map_err(ExecuteError::EndGame),
        GameAction::ResumeGame(transition) => drive_transition(transition, state, config)
            .map(InverseDelta::Resume)
            .map_err(ExecuteError::ResumeGame),
    }
}
