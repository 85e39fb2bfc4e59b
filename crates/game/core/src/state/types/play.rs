//! Play-level records: pitches, batting results, runner advances and the
//! defensive sequence of a batted ball.

use super::{Base, FieldPosition, RunnerSlot};

/// Result of a single pitch.
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
pub enum Pitch {
    Ball,
    CalledStrike,
    SwingingStrike,
    Foul,
    /// Caught foul tip; counts as a strike even with two strikes.
    FoulTip,
    InPlay,
    HitByPitch,
    Pitchout,
    IntentionalBall,
}

/// Balls and strikes derived from a pitch sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchCount {
    pub balls: u8,
    pub strikes: u8,
}

impl PitchCount {
    pub const MAX_BALLS: u8 = 4;
    pub const MAX_STRIKES: u8 = 3;

    /// Replays a pitch sequence. A foul never makes the third strike.
    pub fn from_pitches(pitches: &[Pitch]) -> Self {
        pitches.iter().fold(Self::default(), |count, pitch| count.after(*pitch))
    }

    pub fn after(self, pitch: Pitch) -> Self {
        let Self { balls, strikes } = self;
        match pitch {
            Pitch::Ball | Pitch::Pitchout | Pitch::IntentionalBall => Self {
                balls: (balls + 1).min(Self::MAX_BALLS),
                strikes,
            },
            Pitch::CalledStrike | Pitch::SwingingStrike | Pitch::FoulTip => Self {
                balls,
                strikes: (strikes + 1).min(Self::MAX_STRIKES),
            },
            Pitch::Foul if strikes < 2 => Self {
                balls,
                strikes: strikes + 1,
            },
            Pitch::Foul | Pitch::InPlay | Pitch::HitByPitch => self,
        }
    }

    pub fn is_walk(self) -> bool {
        self.balls >= Self::MAX_BALLS
    }

    pub fn is_strikeout(self) -> bool {
        self.strikes >= Self::MAX_STRIKES
    }
}

/// Outcome of a plate appearance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BattingResult {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    IntentionalWalk,
    HitByPitch,
    Strikeout {
        looking: bool,
    },
    /// Uncaught third strike; the batter reached first.
    DroppedThirdStrike,
    GroundOut,
    FlyOut,
    LineOut,
    PopOut,
    DoublePlay,
    TriplePlay,
    SacrificeBunt,
    SacrificeFly,
    FieldersChoice,
    ReachedOnError {
        fielder: FieldPosition,
    },
    CatcherInterference,
    /// The plate appearance ended on a baserunning out before the batter
    /// finished; the batter stays due up.
    Baserunning,
}

impl BattingResult {
    pub const fn is_hit(&self) -> bool {
        matches!(
            self,
            BattingResult::Single
                | BattingResult::Double
                | BattingResult::Triple
                | BattingResult::HomeRun
        )
    }

    /// Base the batter is awarded or reaches; `None` when the batter is out.
    pub const fn batter_destination(&self) -> Option<Base> {
        match self {
            BattingResult::Single => Some(Base::First),
            BattingResult::Double => Some(Base::Second),
            BattingResult::Triple => Some(Base::Third),
            BattingResult::HomeRun => Some(Base::Home),
            BattingResult::Walk
            | BattingResult::IntentionalWalk
            | BattingResult::HitByPitch
            | BattingResult::DroppedThirdStrike
            | BattingResult::FieldersChoice
            | BattingResult::ReachedOnError { .. }
            | BattingResult::CatcherInterference => Some(Base::First),
            BattingResult::Strikeout { .. }
            | BattingResult::GroundOut
            | BattingResult::FlyOut
            | BattingResult::LineOut
            | BattingResult::PopOut
            | BattingResult::DoublePlay
            | BattingResult::TriplePlay
            | BattingResult::SacrificeBunt
            | BattingResult::SacrificeFly
            | BattingResult::Baserunning => None,
        }
    }

    /// Reason attached to the advances this result forces.
    pub const fn advance_reason(&self) -> AdvanceReason {
        match self {
            BattingResult::Single
            | BattingResult::Double
            | BattingResult::Triple
            | BattingResult::HomeRun => AdvanceReason::Hit,
            BattingResult::Walk | BattingResult::IntentionalWalk => AdvanceReason::Walk,
            BattingResult::HitByPitch => AdvanceReason::HitByPitch,
            BattingResult::ReachedOnError { .. } => AdvanceReason::Error,
            BattingResult::FieldersChoice => AdvanceReason::FieldersChoice,
            BattingResult::CatcherInterference => AdvanceReason::FielderInterference,
            BattingResult::SacrificeBunt => AdvanceReason::SacrificeHit,
            BattingResult::SacrificeFly => AdvanceReason::SacrificeFly,
            BattingResult::Strikeout { .. }
            | BattingResult::DroppedThirdStrike
            | BattingResult::GroundOut
            | BattingResult::FlyOut
            | BattingResult::LineOut
            | BattingResult::PopOut
            | BattingResult::DoublePlay
            | BattingResult::TriplePlay
            | BattingResult::Baserunning => AdvanceReason::Other,
        }
    }

    /// Minimum outs the result itself implies.
    pub const fn minimum_outs(&self) -> u8 {
        match self {
            BattingResult::DoublePlay => 2,
            BattingResult::TriplePlay => 3,
            BattingResult::Strikeout { .. }
            | BattingResult::GroundOut
            | BattingResult::FlyOut
            | BattingResult::LineOut
            | BattingResult::PopOut
            | BattingResult::SacrificeBunt
            | BattingResult::SacrificeFly => 1,
            _ => 0,
        }
    }

    /// Whether the batter is retired by the result (with or without an
    /// explicit batter-runner advance).
    pub const fn retires_batter(&self) -> bool {
        matches!(
            self,
            BattingResult::Strikeout { .. }
                | BattingResult::GroundOut
                | BattingResult::FlyOut
                | BattingResult::LineOut
                | BattingResult::PopOut
                | BattingResult::DoublePlay
                | BattingResult::TriplePlay
                | BattingResult::SacrificeBunt
                | BattingResult::SacrificeFly
        )
    }

    /// Batted balls on which the batter is put out running to first. Caught
    /// balls and strikeouts retire the batter at the plate instead.
    pub const fn retires_batter_runner(&self) -> bool {
        matches!(
            self,
            BattingResult::GroundOut
                | BattingResult::DoublePlay
                | BattingResult::TriplePlay
                | BattingResult::SacrificeBunt
        )
    }

    /// Results whose forced runs count as batted in; any other run on the
    /// play was not driven in by the batter.
    pub const fn forces_in_rbis(&self) -> bool {
        matches!(
            self,
            BattingResult::Walk
                | BattingResult::IntentionalWalk
                | BattingResult::HitByPitch
                | BattingResult::CatcherInterference
        )
    }

    /// False only for [`BattingResult::Baserunning`]: the batter keeps the plate.
    pub const fn completes_plate_appearance(&self) -> bool {
        !matches!(self, BattingResult::Baserunning)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BattingResult::Single => "single",
            BattingResult::Double => "double",
            BattingResult::Triple => "triple",
            BattingResult::HomeRun => "home run",
            BattingResult::Walk => "walk",
            BattingResult::IntentionalWalk => "intentional walk",
            BattingResult::HitByPitch => "hit by pitch",
            BattingResult::Strikeout { looking: true } => "strikeout looking",
            BattingResult::Strikeout { looking: false } => "strikeout swinging",
            BattingResult::DroppedThirdStrike => "dropped third strike",
            BattingResult::GroundOut => "ground out",
            BattingResult::FlyOut => "fly out",
            BattingResult::LineOut => "line out",
            BattingResult::PopOut => "pop out",
            BattingResult::DoublePlay => "double play",
            BattingResult::TriplePlay => "triple play",
            BattingResult::SacrificeBunt => "sacrifice bunt",
            BattingResult::SacrificeFly => "sacrifice fly",
            BattingResult::FieldersChoice => "fielder's choice",
            BattingResult::ReachedOnError { .. } => "reached on error",
            BattingResult::CatcherInterference => "catcher's interference",
            BattingResult::Baserunning => "baserunning play",
        }
    }
}

/// Why a runner moved (or was put out).
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
pub enum AdvanceReason {
    Hit,
    #[strum(serialize = "BB")]
    Walk,
    #[strum(serialize = "HBP")]
    HitByPitch,
    #[strum(serialize = "SB")]
    StolenBase,
    #[strum(serialize = "CS")]
    CaughtStealing,
    #[strum(serialize = "PO")]
    PickedOff,
    #[strum(serialize = "WP")]
    WildPitch,
    #[strum(serialize = "PB")]
    PassedBall,
    #[strum(serialize = "BK")]
    Balk,
    #[strum(serialize = "DI")]
    DefensiveIndifference,
    #[strum(serialize = "E")]
    Error,
    #[strum(serialize = "FC")]
    FieldersChoice,
    #[strum(serialize = "SF")]
    SacrificeFly,
    #[strum(serialize = "SH")]
    SacrificeHit,
    BatterInterference,
    FielderInterference,
    RunnerInterference,
    TagUp,
    Overtake,
    AbandonBase,
    Appeal,
    Other,
}

impl AdvanceReason {
    /// Interference and obstruction placements are the scorer's call; the
    /// engine accepts them as submitted and never derives them.
    pub const fn is_manual_placement(self) -> bool {
        matches!(
            self,
            AdvanceReason::BatterInterference
                | AdvanceReason::FielderInterference
                | AdvanceReason::RunnerInterference
        )
    }

    /// Movements that drive in a run for the batter when the result allows it.
    pub const fn credits_rbi(self) -> bool {
        matches!(
            self,
            AdvanceReason::Hit
                | AdvanceReason::Walk
                | AdvanceReason::HitByPitch
                | AdvanceReason::FieldersChoice
                | AdvanceReason::SacrificeFly
                | AdvanceReason::SacrificeHit
                | AdvanceReason::TagUp
                | AdvanceReason::FielderInterference
                | AdvanceReason::Other
        )
    }
}

/// How a runner's movement ended.
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
pub enum AdvanceOutcome {
    Safe,
    Out,
    TagOut,
    /// Out on appeal; the runner is recorded at the base they failed to touch.
    Appeal,
}

impl AdvanceOutcome {
    pub const fn is_out(self) -> bool {
        !matches!(self, AdvanceOutcome::Safe)
    }
}

/// Movement of one runner during a play.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunnerAdvance {
    pub runner: RunnerSlot,
    pub from: Base,
    pub to: Base,
    pub reason: AdvanceReason,
    pub outcome: AdvanceOutcome,
    pub scored: bool,
}

impl RunnerAdvance {
    /// Safe advance; `scored` is set when the runner reaches home.
    pub fn safe(runner: RunnerSlot, from: Base, to: Base, reason: AdvanceReason) -> Self {
        Self {
            runner,
            from,
            to,
            reason,
            outcome: AdvanceOutcome::Safe,
            scored: to == Base::Home,
        }
    }

    /// Runner retired between `from` and `to`.
    pub fn out(runner: RunnerSlot, from: Base, to: Base, reason: AdvanceReason) -> Self {
        Self {
            runner,
            from,
            to,
            reason,
            outcome: AdvanceOutcome::Out,
            scored: false,
        }
    }

    /// Runner retired on appeal at the base they stand on.
    pub fn appeal(runner: RunnerSlot, base: Base) -> Self {
        Self {
            runner,
            from: base,
            to: base,
            reason: AdvanceReason::Appeal,
            outcome: AdvanceOutcome::Appeal,
            scored: false,
        }
    }

    pub fn with_outcome(mut self, outcome: AdvanceOutcome) -> Self {
        self.outcome = outcome;
        if outcome.is_out() {
            self.scored = false;
        }
        self
    }

    pub const fn is_out(&self) -> bool {
        self.outcome.is_out()
    }

    /// Runner reached home safely.
    pub fn is_run(&self) -> bool {
        self.scored && self.to == Base::Home && !self.outcome.is_out()
    }
}

/// Marker attached to a fielder in the defensive sequence.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldingMarker {
    #[strum(serialize = "E")]
    Error,
    #[strum(serialize = "FC")]
    FieldersChoice,
}

/// One fielder touching the ball.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldingStep {
    pub position: FieldPosition,
    pub marker: Option<FieldingMarker>,
}

/// Ordered fielding positions of a batted-ball play, e.g. 6-4-3 or E5.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefensivePlay {
    pub sequence: Vec<FieldingStep>,
}

impl DefensivePlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, position: FieldPosition) -> Self {
        self.sequence.push(FieldingStep {
            position,
            marker: None,
        });
        self
    }

    pub fn then_error(mut self, position: FieldPosition) -> Self {
        self.sequence.push(FieldingStep {
            position,
            marker: Some(FieldingMarker::Error),
        });
        self
    }

    pub fn then_fielders_choice(mut self, position: FieldPosition) -> Self {
        self.sequence.push(FieldingStep {
            position,
            marker: Some(FieldingMarker::FieldersChoice),
        });
        self
    }

    pub fn error_count(&self) -> u32 {
        self.sequence
            .iter()
            .filter(|step| step.marker == Some(FieldingMarker::Error))
            .count() as u32
    }

    /// Scorebook notation: position numbers joined by dashes, errors prefixed
    /// with `E`.
    pub fn notation(&self) -> String {
        self.sequence
            .iter()
            .map(|step| {
                let number = step
                    .position
                    .scoring_number()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "DH".to_string());
                match step.marker {
                    Some(FieldingMarker::Error) => format!("E{number}"),
                    Some(FieldingMarker::FieldersChoice) => format!("FC{number}"),
                    None => number,
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    }
}
