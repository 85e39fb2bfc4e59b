use crate::config::GameConfig;
use crate::state::{GameState, Half, TeamSide};

use super::{inning_score, team_errors, team_hits};

/// One team's line on the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreRow {
    pub side: TeamSide,
    /// `None` for halves not reached yet, including a bottom half skipped
    /// because the game ended.
    pub runs_by_inning: Vec<Option<u32>>,
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
}

/// Inning-by-inning run grid with R/H/E totals.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scoreboard {
    /// Number of inning columns: regulation length, or more in extra innings.
    pub columns: u8,
    pub away: ScoreRow,
    pub home: ScoreRow,
}

impl Scoreboard {
    pub fn from_state(state: &GameState, config: &GameConfig) -> Self {
        let columns = config.regulation_innings.max(state.inning);
        Self {
            columns,
            away: row(state, TeamSide::Away, columns),
            home: row(state, TeamSide::Home, columns),
        }
    }

    pub fn row(&self, side: TeamSide) -> &ScoreRow {
        match side {
            TeamSide::Away => &self.away,
            TeamSide::Home => &self.home,
        }
    }
}

fn row(state: &GameState, side: TeamSide, columns: u8) -> ScoreRow {
    let batting = Half::batting_half_of(side);
    let fielding = Half::batting_half_of(side.opponent());
    let current = (state.inning, state.half);

    let runs_by_inning = (1..=columns)
        .map(|number| ((number, batting) <= current).then(|| inning_score(state, number, batting)))
        .collect();

    ScoreRow {
        side,
        runs_by_inning,
        runs: state.runs(side),
        hits: team_hits(state, batting),
        errors: team_errors(state, fielding),
    }
}
