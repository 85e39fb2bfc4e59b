use super::{
    AdvanceReason, BattingResult, DefensivePlay, Half, Pitch, PitchCount, PlayerId,
    RunnerAdvance, RunnerSlot, Timestamp,
};

/// A completed plate appearance as submitted by the scorer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AtBat {
    pub batter: PlayerId,
    pub batting_order: u8,
    pub pitches: Vec<Pitch>,
    pub result: BattingResult,
    /// Runner movements in the order they happened; lead runners first.
    pub advances: Vec<RunnerAdvance>,
    /// Runs batted in. Left `None` by the scorer to have the engine derive
    /// it; always `Some` once recorded.
    pub rbis: Option<u8>,
    pub outs_produced: u8,
    pub defense: Option<DefensivePlay>,
    pub timestamp: Timestamp,
}

impl AtBat {
    pub fn new(
        batter: PlayerId,
        batting_order: u8,
        result: BattingResult,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            batter,
            batting_order,
            pitches: Vec::new(),
            result,
            advances: Vec::new(),
            rbis: None,
            outs_produced: 0,
            defense: None,
            timestamp,
        }
    }

    pub fn with_pitches(mut self, pitches: Vec<Pitch>) -> Self {
        self.pitches = pitches;
        self
    }

    pub fn with_advances(mut self, advances: impl IntoIterator<Item = RunnerAdvance>) -> Self {
        self.advances = advances.into_iter().collect();
        self
    }

    pub fn with_outs(mut self, outs_produced: u8) -> Self {
        self.outs_produced = outs_produced;
        self
    }

    pub fn with_rbis(mut self, rbis: u8) -> Self {
        self.rbis = Some(rbis);
        self
    }

    pub fn with_defense(mut self, defense: DefensivePlay) -> Self {
        self.defense = Some(defense);
        self
    }

    pub fn count(&self) -> PitchCount {
        PitchCount::from_pitches(&self.pitches)
    }

    /// Runs that crossed the plate on this play.
    pub fn runs(&self) -> u32 {
        self.advances.iter().filter(|advance| advance.is_run()).count() as u32
    }

    pub fn rbi_count(&self) -> u8 {
        self.rbis.unwrap_or_default()
    }

    pub fn batter_advance(&self) -> Option<&RunnerAdvance> {
        self.advances
            .iter()
            .find(|advance| advance.runner == RunnerSlot::Batter)
    }

    /// Errors charged to the fielding team.
    ///
    /// A recorded defensive sequence is authoritative; without one, a
    /// reached-on-error result or any advance on an error charges one error.
    pub fn errors_charged(&self) -> u32 {
        match &self.defense {
            Some(defense) => defense.error_count(),
            None => {
                let implied = matches!(self.result, BattingResult::ReachedOnError { .. })
                    || self
                        .advances
                        .iter()
                        .any(|advance| advance.reason == AdvanceReason::Error);
                u32::from(implied)
            }
        }
    }
}

/// One half-inning of play.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inning {
    pub number: u8,
    pub half: Half,
    pub at_bats: Vec<AtBat>,
    pub runs_scored: u32,
    /// Outs recorded when the half closed; `None` while it is live.
    pub outs_at_close: Option<u8>,
}

impl Inning {
    pub fn new(number: u8, half: Half) -> Self {
        Self {
            number,
            half,
            at_bats: Vec::new(),
            runs_scored: 0,
            outs_at_close: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.outs_at_close.is_some()
    }

    pub fn last_at_bat(&self) -> Option<&AtBat> {
        self.at_bats.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Base, FieldPosition};

    #[test]
    fn counts_runs_and_errors() {
        let at_bat = AtBat::new(
            PlayerId(4),
            4,
            BattingResult::ReachedOnError {
                fielder: FieldPosition::Shortstop,
            },
            Timestamp(10),
        )
        .with_advances([
            RunnerAdvance::safe(RunnerSlot::Third, Base::Third, Base::Home, AdvanceReason::Error),
            RunnerAdvance::safe(RunnerSlot::Batter, Base::Plate, Base::First, AdvanceReason::Error),
        ]);

        assert_eq!(at_bat.runs(), 1);
        assert_eq!(at_bat.errors_charged(), 1);
        assert_eq!(at_bat.batter_advance().map(|a| a.to), Some(Base::First));
    }

    #[test]
    fn defensive_sequence_is_authoritative_for_errors() {
        let at_bat = AtBat::new(PlayerId(4), 4, BattingResult::Single, Timestamp(10))
            .with_defense(
                DefensivePlay::new()
                    .then_error(FieldPosition::LeftField)
                    .then_error(FieldPosition::Catcher),
            );
        assert_eq!(at_bat.errors_charged(), 2);
    }
}
