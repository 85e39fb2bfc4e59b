//! Inverse deltas recorded by every successful transition.
//!
//! Each variant carries only the constant-size prior values its action
//! overwrote, plus stable indices into `innings`/`at_bats`. Reverting the
//! deltas of a log suffix in reverse order restores the state that preceded
//! it exactly, nonce included.

use arrayvec::ArrayVec;

use crate::state::{
    Base, BaseOccupancy, BattingPointers, GameState, Half, LineupSlot, PlayerId, Scoreline,
    TeamSide, Timestamp,
};

/// Prior values overwritten by an at-bat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtBatInverse {
    pub inning_index: usize,
    /// The at-bat opened this half's inning entry.
    pub created_inning: bool,
    pub outs: u8,
    pub bases: BaseOccupancy,
    pub pointers: BattingPointers,
    pub totals: Scoreline,
    pub inning_runs: u32,
}

/// Lineup slots, bench position and runner identity a substitution replaced.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstitutionInverse {
    pub side: TeamSide,
    pub slots: ArrayVec<(usize, LineupSlot), 2>,
    /// Bench index the incoming player left, if one entered.
    pub bench_index: Option<usize>,
    pub runner: Option<(Base, PlayerId)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfInningInverse {
    pub inning: u8,
    pub half: Half,
    pub outs: u8,
    pub bases: BaseOccupancy,
    /// Inning entry whose `outs_at_close` was set.
    pub closed_inning: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndGameInverse {
    pub closed_inning: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResumeInverse {
    pub end_time: Timestamp,
    /// Inning entry reopened by the resume and the outs it had closed with.
    pub reopened_inning: Option<(usize, u8)>,
}

/// Everything needed to take one applied action back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InverseDelta {
    AtBat(AtBatInverse),
    Substitution(SubstitutionInverse),
    HalfInning(HalfInningInverse),
    EndGame(EndGameInverse),
    Resume(ResumeInverse),
}

impl InverseDelta {
    /// Restores the state that preceded the action. Must be applied to the
    /// exact state the action produced.
    pub fn revert(&self, state: &mut GameState) {
        match self {
            InverseDelta::AtBat(inverse) => revert_at_bat(inverse, state),
            InverseDelta::Substitution(inverse) => revert_substitution(inverse, state),
            InverseDelta::HalfInning(inverse) => {
                state.inning = inverse.inning;
                state.half = inverse.half;
                state.outs = inverse.outs;
                state.bases = inverse.bases.clone();
                reopen(state, inverse.closed_inning);
            }
            InverseDelta::EndGame(inverse) => {
                state.end_time = None;
                reopen(state, inverse.closed_inning);
            }
            InverseDelta::Resume(inverse) => {
                state.end_time = Some(inverse.end_time);
                if let Some((index, outs)) = inverse.reopened_inning {
                    if let Some(inning) = state.innings.get_mut(index) {
                        inning.outs_at_close = Some(outs);
                    }
                }
            }
        }
        state.nonce = state.nonce.saturating_sub(1);
    }
}

fn revert_at_bat(inverse: &AtBatInverse, state: &mut GameState) {
    if inverse.created_inning {
        state.innings.truncate(inverse.inning_index);
    } else if let Some(inning) = state.innings.get_mut(inverse.inning_index) {
        inning.at_bats.pop();
        inning.runs_scored = inverse.inning_runs;
    }
    state.outs = inverse.outs;
    state.bases = inverse.bases.clone();
    state.batting_pointers = inverse.pointers;
    state.totals = inverse.totals;
}

fn revert_substitution(inverse: &SubstitutionInverse, state: &mut GameState) {
    let lineup = state.lineup_mut(inverse.side);
    for (index, slot) in inverse.slots.iter().rev() {
        if let Some(current) = lineup.slots.get_mut(*index) {
            *current = slot.clone();
        }
    }
    if let Some(bench_index) = inverse.bench_index {
        lineup.return_to_bench(bench_index);
    }
    if let Some((base, runner)) = inverse.runner {
        state.bases.set(base, Some(runner));
    }
}

fn reopen(state: &mut GameState, closed_inning: Option<usize>) {
    if let Some(inning) = closed_inning.and_then(|index| state.innings.get_mut(index)) {
        inning.outs_at_close = None;
    }
}
