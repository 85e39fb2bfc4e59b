use std::fmt;

/// Unique identifier for a player on either roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier assigned to a game by the session that seeded it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "game-{}", self.0)
    }
}

/// Milliseconds since the Unix epoch.
///
/// Stamped by the caller when an action is assembled and stored verbatim, so
/// replaying an action never regenerates it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

/// Half of an inning. The away team bats in the top, the home team in the bottom.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Half {
    #[default]
    Top,
    Bottom,
}

impl Half {
    /// Team at the plate during this half.
    pub const fn batting_side(self) -> TeamSide {
        match self {
            Half::Top => TeamSide::Away,
            Half::Bottom => TeamSide::Home,
        }
    }

    /// Team in the field during this half.
    pub const fn fielding_side(self) -> TeamSide {
        self.batting_side().opponent()
    }

    /// Half in which the given team bats.
    pub const fn batting_half_of(side: TeamSide) -> Half {
        match side {
            TeamSide::Away => Half::Top,
            TeamSide::Home => Half::Bottom,
        }
    }
}

/// Which of the two teams.
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
pub enum TeamSide {
    Away,
    Home,
}

impl TeamSide {
    pub const fn opponent(self) -> TeamSide {
        match self {
            TeamSide::Away => TeamSide::Home,
            TeamSide::Home => TeamSide::Away,
        }
    }
}
