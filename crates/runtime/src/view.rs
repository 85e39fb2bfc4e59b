//! Read models for the field, info bar and play-by-play collaborators.

use serde::{Deserialize, Serialize};

use scorebook_core::{Base, GameState, Half, PitchCount, PlayerId, TeamSide};

/// A runner standing on a base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRunner {
    pub base: Base,
    pub player: PlayerId,
    pub name: String,
}

/// Current base occupancy for the field diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    /// First, second and third, in that order.
    pub bases: [Option<BaseRunner>; 3],
    pub outs: u8,
}

impl FieldView {
    pub fn from_state(state: &GameState) -> Self {
        let side = state.batting_side();
        let bases = Base::OCCUPIABLE.map(|base| {
            state.bases.runner_on(base).map(|player| BaseRunner {
                base,
                player,
                name: player_name(state, side, player),
            })
        });
        Self {
            bases,
            outs: state.outs,
        }
    }

    pub fn runner_on(&self, base: Base) -> Option<&BaseRunner> {
        self.bases.iter().flatten().find(|runner| runner.base == base)
    }
}

/// Situation line: inning, batter, count, outs and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoBar {
    pub inning: u8,
    pub half: Half,
    pub batter: Option<PlayerId>,
    pub batter_name: Option<String>,
    pub batting_order: Option<u8>,
    pub balls: u8,
    pub strikes: u8,
    pub outs: u8,
    pub away_runs: u32,
    pub home_runs: u32,
    pub ended: bool,
}

impl InfoBar {
    pub fn from_state(state: &GameState, count: PitchCount) -> Self {
        let side = state.batting_side();
        let slot = state.current_batter();
        Self {
            inning: state.inning,
            half: state.half,
            batter: slot.map(|slot| slot.player_id),
            batter_name: slot.map(|slot| player_name(state, side, slot.player_id)),
            batting_order: slot.map(|slot| slot.batting_order),
            balls: count.balls,
            strikes: count.strikes,
            outs: state.outs,
            away_runs: state.runs(TeamSide::Away),
            home_runs: state.runs(TeamSide::Home),
            ended: state.is_ended(),
        }
    }
}

/// One line of the play-by-play history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBatLine {
    pub inning: u8,
    pub half: Half,
    pub batter: PlayerId,
    pub batter_name: String,
    pub result: String,
    /// Scorebook notation of the defensive play, e.g. `6-4-3`.
    pub notation: Option<String>,
    pub pitches: usize,
    pub runs: u32,
    pub rbis: u8,
    pub outs: u8,
}

/// Every recorded at-bat in order of play.
pub fn history(state: &GameState) -> Vec<AtBatLine> {
    state
        .innings
        .iter()
        .flat_map(|inning| {
            let side = inning.half.batting_side();
            inning.at_bats.iter().map(move |at_bat| AtBatLine {
                inning: inning.number,
                half: inning.half,
                batter: at_bat.batter,
                batter_name: player_name(state, side, at_bat.batter),
                result: at_bat.result.label().to_string(),
                notation: at_bat.defense.as_ref().map(|defense| defense.notation()),
                pitches: at_bat.pitches.len(),
                runs: at_bat.runs(),
                rbis: at_bat.rbi_count(),
                outs: at_bat.outs_produced,
            })
        })
        .collect()
}

fn player_name(state: &GameState, side: TeamSide, player: PlayerId) -> String {
    state
        .lineup(side)
        .player(player)
        .map(|player| player.name.clone())
        .unwrap_or_else(|| player.to_string())
}
