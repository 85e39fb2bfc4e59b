/// Scoring rules constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Number of innings in a regulation game. Walk-off and regulation-end
    /// checks apply from this inning onward.
    pub regulation_innings: u8,

    /// Ends the game as soon as the home team takes the lead in the bottom
    /// half of a regulation or extra inning.
    pub walk_off: bool,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Outs that close a half-inning.
    pub const OUTS_PER_HALF: u8 = 3;
    /// Batter-runner plus three base runners.
    pub const MAX_RUNNERS: usize = 4;
    /// Occupiable bases (first, second, third).
    pub const BASES: usize = 3;
    pub const MAX_LINEUP_SLOTS: usize = 20;
    /// Upper bound on automatic progression steps chained after one commit.
    pub const MAX_FOLLOW_UPS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REGULATION_INNINGS: u8 = 9;

    pub fn new() -> Self {
        Self {
            regulation_innings: Self::DEFAULT_REGULATION_INNINGS,
            walk_off: true,
        }
    }

    pub fn with_regulation_innings(regulation_innings: u8) -> Self {
        Self {
            regulation_innings,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
