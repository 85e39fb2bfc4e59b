use crate::config::GameConfig;
use crate::state::InitializationError;

use super::PlayerId;

/// A rostered player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Uniform number.
    pub number: u8,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, number: u8) -> Self {
        Self {
            id,
            name: name.into(),
            number,
        }
    }
}

/// Fielding assignment of a lineup slot, in standard scorer numbering.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FieldPosition {
    Pitcher,
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    Shortstop,
    LeftField,
    CenterField,
    RightField,
    /// Bats but does not field.
    DesignatedHitter,
}

impl FieldPosition {
    /// Scorer's position number (1-9); `None` for the designated hitter.
    pub const fn scoring_number(self) -> Option<u8> {
        match self {
            FieldPosition::Pitcher => Some(1),
            FieldPosition::Catcher => Some(2),
            FieldPosition::FirstBase => Some(3),
            FieldPosition::SecondBase => Some(4),
            FieldPosition::ThirdBase => Some(5),
            FieldPosition::Shortstop => Some(6),
            FieldPosition::LeftField => Some(7),
            FieldPosition::CenterField => Some(8),
            FieldPosition::RightField => Some(9),
            FieldPosition::DesignatedHitter => None,
        }
    }

    pub const fn is_defensive(self) -> bool {
        self.scoring_number().is_some()
    }
}

/// One spot in the batting order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineupSlot {
    /// 1-based batting order.
    pub batting_order: u8,
    pub player_id: PlayerId,
    pub position: FieldPosition,
}

/// A team's lineup card.
///
/// `slots` are kept sorted by batting order. `roster` lists every player who
/// has held a slot (starters plus substitutes that entered); `bench` lists the
/// players still available to enter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lineup {
    pub slots: Vec<LineupSlot>,
    pub bench: Vec<Player>,
    pub roster: Vec<Player>,
}

impl Lineup {
    /// Builds a lineup from starters in batting order; orders are numbered 1..N.
    pub fn new(starters: Vec<(Player, FieldPosition)>, bench: Vec<Player>) -> Self {
        let mut slots = Vec::with_capacity(starters.len());
        let mut roster = Vec::with_capacity(starters.len());
        for (index, (player, position)) in starters.into_iter().enumerate() {
            slots.push(LineupSlot {
                batting_order: (index + 1) as u8,
                player_id: player.id,
                position,
            });
            roster.push(player);
        }
        Self {
            slots,
            bench,
            roster,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, batting_order: u8) -> Option<&LineupSlot> {
        self.slots
            .iter()
            .find(|slot| slot.batting_order == batting_order)
    }

    pub fn slot_index_for_order(&self, batting_order: u8) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.batting_order == batting_order)
    }

    pub fn slot_index_of(&self, player: PlayerId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.player_id == player)
    }

    /// Indices of every slot assigned to `position`.
    pub fn holders_of(&self, position: FieldPosition) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| slot.position == position)
            .map(|(index, _)| index)
    }

    pub fn bench_index(&self, player: PlayerId) -> Option<usize> {
        self.bench.iter().position(|candidate| candidate.id == player)
    }

    pub fn is_active(&self, player: PlayerId) -> bool {
        self.slot_index_of(player).is_some()
    }

    /// Looks up a player on the roster or the bench.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster
            .iter()
            .chain(self.bench.iter())
            .find(|player| player.id == id)
    }

    /// Moves a bench player onto the roster, returning the bench index it left.
    pub(crate) fn promote_from_bench(&mut self, player: PlayerId) -> Option<usize> {
        let index = self.bench_index(player)?;
        let entering = self.bench.remove(index);
        self.roster.push(entering);
        Some(index)
    }

    /// Reverses [`Self::promote_from_bench`].
    pub(crate) fn return_to_bench(&mut self, bench_index: usize) {
        if let Some(player) = self.roster.pop() {
            let index = bench_index.min(self.bench.len());
            self.bench.insert(index, player);
        }
    }

    /// Checks the seed invariants: contiguous unique batting orders, unique
    /// rostered players, and at most one holder per position (designated
    /// hitter included).
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.slots.is_empty() {
            return Err(InitializationError::EmptyLineup);
        }
        if self.slots.len() > GameConfig::MAX_LINEUP_SLOTS {
            return Err(InitializationError::LineupTooLarge {
                max: GameConfig::MAX_LINEUP_SLOTS,
                actual: self.slots.len(),
            });
        }

        for (index, slot) in self.slots.iter().enumerate() {
            let expected = (index + 1) as u8;
            if slot.batting_order != expected {
                return Err(InitializationError::BattingOrderGap {
                    expected,
                    found: slot.batting_order,
                });
            }
            if self.slots[..index]
                .iter()
                .any(|earlier| earlier.player_id == slot.player_id)
            {
                return Err(InitializationError::DuplicatePlayer {
                    player: slot.player_id,
                });
            }
            if !self.roster.iter().any(|player| player.id == slot.player_id) {
                return Err(InitializationError::UnrosteredPlayer {
                    player: slot.player_id,
                });
            }
            if self.holders_of(slot.position).count() > 1 {
                return Err(InitializationError::DuplicatePosition {
                    position: slot.position,
                });
            }
            if self.bench_index(slot.player_id).is_some() {
                return Err(InitializationError::DuplicatePlayer {
                    player: slot.player_id,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32) -> Player {
        Player::new(PlayerId(id), format!("Player {id}"), id as u8)
    }

    #[test]
    fn new_numbers_batting_order_from_one() {
        let lineup = Lineup::new(
            vec![
                (player(1), FieldPosition::Shortstop),
                (player(2), FieldPosition::CenterField),
                (player(3), FieldPosition::FirstBase),
            ],
            vec![player(10)],
        );

        let orders: Vec<u8> = lineup.slots.iter().map(|slot| slot.batting_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert!(lineup.validate().is_ok());
        assert_eq!(lineup.player(PlayerId(10)).map(|p| p.number), Some(10));
    }

    #[test]
    fn validate_rejects_gap_in_batting_order() {
        let mut lineup = Lineup::new(
            vec![
                (player(1), FieldPosition::Shortstop),
                (player(2), FieldPosition::Catcher),
            ],
            Vec::new(),
        );
        lineup.slots[1].batting_order = 3;

        assert_eq!(
            lineup.validate(),
            Err(InitializationError::BattingOrderGap {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn validate_rejects_two_catchers() {
        let lineup = Lineup::new(
            vec![
                (player(1), FieldPosition::Catcher),
                (player(2), FieldPosition::Catcher),
            ],
            Vec::new(),
        );

        assert_eq!(
            lineup.validate(),
            Err(InitializationError::DuplicatePosition {
                position: FieldPosition::Catcher
            })
        );
    }

    #[test]
    fn validate_rejects_two_designated_hitters() {
        let lineup = Lineup::new(
            vec![
                (player(1), FieldPosition::DesignatedHitter),
                (player(2), FieldPosition::DesignatedHitter),
            ],
            Vec::new(),
        );

        assert_eq!(
            lineup.validate(),
            Err(InitializationError::DuplicatePosition {
                position: FieldPosition::DesignatedHitter
            })
        );
    }

    #[test]
    fn validate_rejects_slot_holder_missing_from_roster() {
        let mut lineup = Lineup::new(
            vec![
                (player(1), FieldPosition::Shortstop),
                (player(2), FieldPosition::Catcher),
            ],
            Vec::new(),
        );
        lineup.slots[1].player_id = PlayerId(77);

        assert_eq!(
            lineup.validate(),
            Err(InitializationError::UnrosteredPlayer {
                player: PlayerId(77)
            })
        );
    }

    #[test]
    fn designated_hitter_does_not_count_as_defensive() {
        assert!(!FieldPosition::DesignatedHitter.is_defensive());
        assert_eq!(FieldPosition::Shortstop.scoring_number(), Some(6));
    }

    #[test]
    fn promote_and_return_bench_player_restores_order() {
        let mut lineup = Lineup::new(
            vec![(player(1), FieldPosition::Pitcher)],
            vec![player(20), player(21), player(22)],
        );
        let before = lineup.clone();

        let index = lineup.promote_from_bench(PlayerId(21)).unwrap();
        assert_eq!(index, 1);
        assert!(lineup.bench_index(PlayerId(21)).is_none());
        assert_eq!(lineup.roster.last().map(|p| p.id), Some(PlayerId(21)));

        lineup.return_to_bench(index);
        assert_eq!(lineup, before);
    }
}
