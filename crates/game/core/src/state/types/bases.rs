use bitflags::bitflags;

use super::PlayerId;

/// A point on the basepath: the batter's box (0), the three bases, and home (4).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Base {
    /// Where the batter starts.
    Plate = 0,
    First = 1,
    Second = 2,
    Third = 3,
    /// Reaching home scores a run.
    Home = 4,
}

impl Base {
    pub const OCCUPIABLE: [Base; 3] = [Base::First, Base::Second, Base::Third];

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Base> {
        Base::from_repr(index)
    }

    /// The next base along the path; `None` past home.
    pub fn next(self) -> Option<Base> {
        Base::from_repr(self.index() + 1)
    }

    /// True for first, second and third.
    pub const fn is_occupiable(self) -> bool {
        matches!(self, Base::First | Base::Second | Base::Third)
    }

    const fn slot(self) -> Option<usize> {
        match self {
            Base::First => Some(0),
            Base::Second => Some(1),
            Base::Third => Some(2),
            Base::Plate | Base::Home => None,
        }
    }
}

/// Logical runner slot of an advance: identity by starting base, not by person.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunnerSlot {
    #[strum(serialize = "BR")]
    Batter,
    #[strum(serialize = "R1")]
    First,
    #[strum(serialize = "R2")]
    Second,
    #[strum(serialize = "R3")]
    Third,
}

impl RunnerSlot {
    /// Trailing runner first.
    pub const ALL: [RunnerSlot; 4] = [
        RunnerSlot::Batter,
        RunnerSlot::First,
        RunnerSlot::Second,
        RunnerSlot::Third,
    ];

    /// Slot of the runner who started the play on `base`.
    pub const fn from_base(base: Base) -> Option<RunnerSlot> {
        match base {
            Base::Plate => Some(RunnerSlot::Batter),
            Base::First => Some(RunnerSlot::First),
            Base::Second => Some(RunnerSlot::Second),
            Base::Third => Some(RunnerSlot::Third),
            Base::Home => None,
        }
    }

    /// Base the runner occupied when the play started.
    pub const fn origin(self) -> Base {
        match self {
            RunnerSlot::Batter => Base::Plate,
            RunnerSlot::First => Base::First,
            RunnerSlot::Second => Base::Second,
            RunnerSlot::Third => Base::Third,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self.origin().index() as usize
    }
}

bitflags! {
    /// Set of occupied bases, used as the forced-advance calculator input.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Bases: u8 {
        const FIRST  = 1 << 0;
        const SECOND = 1 << 1;
        const THIRD  = 1 << 2;
    }
}

impl Bases {
    /// Flag for one base; empty for the plate and home.
    pub const fn of(base: Base) -> Bases {
        match base {
            Base::First => Bases::FIRST,
            Base::Second => Bases::SECOND,
            Base::Third => Bases::THIRD,
            Base::Plate | Base::Home => Bases::empty(),
        }
    }

    pub fn is_occupied(self, base: Base) -> bool {
        let flag = Bases::of(base);
        !flag.is_empty() && self.contains(flag)
    }
}

/// Live runner identities on first, second and third.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseOccupancy {
    runners: [Option<PlayerId>; 3],
}

impl BaseOccupancy {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn runner_on(&self, base: Base) -> Option<PlayerId> {
        base.slot().and_then(|slot| self.runners[slot])
    }

    /// Places (or clears) the runner on an occupiable base and returns the
    /// previous occupant. The plate and home hold nobody.
    pub fn set(&mut self, base: Base, runner: Option<PlayerId>) -> Option<PlayerId> {
        match base.slot() {
            Some(slot) => core::mem::replace(&mut self.runners[slot], runner),
            None => None,
        }
    }

    pub fn take(&mut self, base: Base) -> Option<PlayerId> {
        self.set(base, None)
    }

    pub fn occupied(&self) -> Bases {
        Base::OCCUPIABLE
            .iter()
            .filter(|base| self.runner_on(**base).is_some())
            .fold(Bases::empty(), |acc, base| acc | Bases::of(*base))
    }

    /// Base currently held by `player`, if any.
    pub fn base_of(&self, player: PlayerId) -> Option<Base> {
        Base::OCCUPIABLE
            .iter()
            .copied()
            .find(|base| self.runner_on(*base) == Some(player))
    }

    pub fn count(&self) -> usize {
        self.runners.iter().filter(|runner| runner.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn clear(&mut self) {
        self.runners = [None; 3];
    }

    /// Occupied bases paired with their runner, lead runner first.
    pub fn iter_lead_first(&self) -> impl Iterator<Item = (Base, PlayerId)> + '_ {
        Base::OCCUPIABLE
            .iter()
            .rev()
            .filter_map(|base| self.runner_on(*base).map(|runner| (*base, runner)))
    }
}
