//! Lineup substitutions and their validator.
//!
//! The validator is exposed on its own so a UI can preflight a substitution
//! and show every problem at once; the action runs the same checks in its
//! `pre_validate` phase.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::engine::SubstitutionInverse;
use crate::state::{Base, FieldPosition, GameState, LineupSlot, PlayerId, TeamSide};

use super::{ActionTransition, SubstitutionError, ValidationError};

/// What a substitution replaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum SubstitutionKind {
    /// Pinch hitter for the slot at `batting_order`.
    Batter { batting_order: u8 },
    /// Pinch runner for the runner on `base`.
    Runner { base: Base },
    /// Defensive replacement at `position`.
    Defense { position: FieldPosition },
    /// Two fielders exchange positions; nobody enters the game.
    DefenseSwap {
        from: FieldPosition,
        to: FieldPosition,
    },
}

/// A substitution as entered by the scorer.
///
/// For [`SubstitutionKind::DefenseSwap`], `original` holds `from` and
/// `incoming` holds `to` before the swap.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstitutionRecord {
    pub team: TeamSide,
    pub original: PlayerId,
    pub incoming: PlayerId,
    pub kind: SubstitutionKind,
}

impl SubstitutionRecord {
    pub fn describe(&self) -> String {
        match self.kind {
            SubstitutionKind::Batter { .. } => {
                format!("pinch hitter {} for {}", self.incoming, self.original)
            }
            SubstitutionKind::Runner { base } => {
                format!("pinch runner {} for {} on {base}", self.incoming, self.original)
            }
            SubstitutionKind::Defense { position } => format!(
                "defensive replacement {} for {} at {position}",
                self.incoming, self.original
            ),
            SubstitutionKind::DefenseSwap { from, to } => format!(
                "position swap {} ({from}) and {} ({to})",
                self.original, self.incoming
            ),
        }
    }
}

/// Collects every violated precondition of `record` against `state`.
pub fn validate(state: &GameState, record: &SubstitutionRecord) -> Result<(), Vec<SubstitutionError>> {
    let team = record.team;
    let lineup = state.lineup(team);
    let mut errors = Vec::new();

    if let SubstitutionKind::DefenseSwap { from, to } = record.kind {
        if from == to {
            errors.push(SubstitutionError::IdenticalSwapPositions { position: from });
        }
        for (position, expected) in [(from, record.original), (to, record.incoming)] {
            if !position.is_defensive() {
                errors.push(SubstitutionError::NotDefensivePosition { position });
                continue;
            }
            match lineup.holders_of(position).next() {
                None => errors.push(SubstitutionError::PositionNotHeld { team, position }),
                Some(index) => {
                    let found = lineup.slots[index].player_id;
                    if found != expected {
                        errors.push(SubstitutionError::StaleTarget {
                            expected,
                            found: Some(found),
                        });
                    }
                }
            }
        }
        return finish(errors);
    }

    if lineup.is_active(record.incoming) {
        errors.push(SubstitutionError::PlayerAlreadyInLineup {
            team,
            player: record.incoming,
        });
    } else if lineup.bench_index(record.incoming).is_none() {
        errors.push(SubstitutionError::UnknownPlayer {
            team,
            player: record.incoming,
        });
    }

    match record.kind {
        SubstitutionKind::Batter { batting_order } => match lineup.slot(batting_order) {
            None => errors.push(SubstitutionError::InvalidBattingOrder {
                team,
                batting_order,
            }),
            Some(slot) if slot.player_id != record.original => {
                errors.push(SubstitutionError::StaleTarget {
                    expected: record.original,
                    found: Some(slot.player_id),
                });
            }
            Some(_) => {}
        },
        SubstitutionKind::Runner { base } => {
            if team != state.batting_side() {
                errors.push(SubstitutionError::NotBattingTeam { team });
            }
            if !base.is_occupiable() {
                errors.push(SubstitutionError::InvalidBase { base });
            } else {
                match state.bases.runner_on(base) {
                    None => errors.push(SubstitutionError::EmptyBase { base }),
                    Some(runner) if runner != record.original => {
                        errors.push(SubstitutionError::StaleTarget {
                            expected: record.original,
                            found: Some(runner),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        SubstitutionKind::Defense { position } => {
            let held_by_original = lineup
                .slot_index_of(record.original)
                .map(|index| lineup.slots[index].position);
            if held_by_original.is_none() {
                errors.push(SubstitutionError::StaleTarget {
                    expected: record.original,
                    found: None,
                });
            }
            if !position.is_defensive() {
                errors.push(SubstitutionError::NotDefensivePosition { position });
            } else if held_by_original != Some(position) {
                let taken = lineup
                    .holders_of(position)
                    .any(|index| lineup.slots[index].player_id != record.original);
                if taken {
                    errors.push(SubstitutionError::DuplicatePosition { position });
                }
            }
        }
        SubstitutionKind::DefenseSwap { .. } => {}
    }

    finish(errors)
}

fn finish(errors: Vec<SubstitutionError>) -> Result<(), Vec<SubstitutionError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Applies a validated [`SubstitutionRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubstitutionAction {
    pub record: SubstitutionRecord,
}

impl SubstitutionAction {
    pub fn new(record: SubstitutionRecord) -> Self {
        Self { record }
    }
}

impl ActionTransition for SubstitutionAction {
    type Error = ValidationError;
    type Result = SubstitutionInverse;

    fn pre_validate(&self, state: &GameState, _config: &GameConfig) -> Result<(), Self::Error> {
        validate(state, &self.record).map_err(ValidationError::Substitution)
    }

    fn apply(
        &self,
        state: &mut GameState,
        _config: &GameConfig,
    ) -> Result<SubstitutionInverse, Self::Error> {
        let record = &self.record;
        let mut inverse = SubstitutionInverse {
            side: record.team,
            slots: ArrayVec::new(),
            bench_index: None,
            runner: None,
        };
        let stale = |found: Option<PlayerId>| {
            ValidationError::Substitution(vec![SubstitutionError::StaleTarget {
                expected: record.original,
                found,
            }])
        };

        if let SubstitutionKind::Runner { base } = record.kind {
            let previous = state.bases.set(base, Some(record.incoming));
            inverse.runner = previous.map(|runner| (base, runner));
        }

        let lineup = state.lineup_mut(record.team);
        match record.kind {
            SubstitutionKind::DefenseSwap { from, to } => {
                let first = lineup.holders_of(from).next().ok_or_else(|| stale(None))?;
                let second = lineup.holders_of(to).next().ok_or_else(|| stale(None))?;
                for index in [first, second] {
                    inverse.slots.push((index, lineup.slots[index].clone()));
                }
                lineup.slots[first].position = to;
                lineup.slots[second].position = from;
            }
            kind => {
                let index = match kind {
                    SubstitutionKind::Batter { batting_order } => {
                        lineup.slot_index_for_order(batting_order)
                    }
                    _ => lineup.slot_index_of(record.original),
                }
                .ok_or_else(|| stale(None))?;

                let previous: LineupSlot = lineup.slots[index].clone();
                inverse.slots.push((index, previous));
                let slot = &mut lineup.slots[index];
                slot.player_id = record.incoming;
                if let SubstitutionKind::Defense { position } = kind {
                    slot.position = position;
                }
                inverse.bench_index = lineup.promote_from_bench(record.incoming);
            }
        }

        Ok(inverse)
    }
}
