//! Forced-advance calculator.
//!
//! A runner is forced exactly one base when every base from first up to and
//! including their own is occupied and the batter reaches base. Runners
//! outside that chain are never moved here; their advances are optional and
//! belong to the scorer.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{AdvanceReason, Base, Bases, BattingResult, RunnerAdvance, RunnerSlot};

pub type ForcedAdvances = ArrayVec<RunnerAdvance, { GameConfig::MAX_RUNNERS }>;

/// A runner forced off their base and the least they must reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForcedRunner {
    pub runner: RunnerSlot,
    pub from: Base,
    pub floor: Base,
}

/// Forced runners, lead runner first. Empty unless the batter reaches base.
pub fn forced_runner_floor(
    occupied: Bases,
    batter_reaches: bool,
) -> ArrayVec<ForcedRunner, { GameConfig::BASES }> {
    let mut forced = ArrayVec::new();
    if !batter_reaches {
        return forced;
    }

    let chain = Base::OCCUPIABLE
        .iter()
        .take_while(|base| occupied.is_occupied(**base))
        .count() as u8;

    for index in (1..=chain).rev() {
        let Some(from) = Base::from_index(index) else {
            continue;
        };
        let (Some(runner), Some(floor)) = (RunnerSlot::from_base(from), from.next()) else {
            continue;
        };
        forced.push(ForcedRunner { runner, from, floor });
    }
    forced
}

/// Forced advances for a batter reaching `batter_destination`, lead runner
/// first and the batter last. Returns nothing when the batter is retired.
pub fn compute_forced_advances(
    occupied: Bases,
    batter_destination: Option<Base>,
    reason: AdvanceReason,
) -> ForcedAdvances {
    let mut advances = ForcedAdvances::new();
    let Some(destination) = batter_destination else {
        return advances;
    };

    let mut bases = occupied;
    for forced in forced_runner_floor(occupied, true) {
        // The runner ahead has already moved up.
        debug_assert!(!bases.is_occupied(forced.floor));
        bases.remove(Bases::of(forced.from));
        bases.insert(Bases::of(forced.floor));
        advances.push(RunnerAdvance::safe(
            forced.runner,
            forced.from,
            forced.floor,
            reason,
        ));
    }

    advances.push(RunnerAdvance::safe(
        RunnerSlot::Batter,
        Base::Plate,
        destination,
        reason,
    ));
    advances
}

/// Completes a submitted advance list with the forced advances it omits.
///
/// The batter's destination comes from the first submitted batter advance
/// (none when it is an out) and falls back to the result's default. Missing
/// forced runners are prepended lead first; a missing batter advance is
/// appended.
pub fn fill_forced_advances(
    occupied: Bases,
    result: &BattingResult,
    advances: &[RunnerAdvance],
) -> Vec<RunnerAdvance> {
    let batter_advance = advances
        .iter()
        .find(|advance| advance.runner == RunnerSlot::Batter);
    let batter_destination = match batter_advance {
        Some(advance) if advance.is_out() => None,
        Some(advance) => Some(advance.to),
        None => result.batter_destination(),
    };
    let listed = |runner: RunnerSlot| advances.iter().any(|advance| advance.runner == runner);

    let forced = compute_forced_advances(occupied, batter_destination, result.advance_reason());

    let mut filled = Vec::with_capacity(forced.len() + advances.len());
    filled.extend(
        forced
            .iter()
            .filter(|advance| advance.runner != RunnerSlot::Batter && !listed(advance.runner))
            .cloned(),
    );
    filled.extend_from_slice(advances);
    if batter_advance.is_none() {
        filled.extend(
            forced
                .iter()
                .filter(|advance| advance.runner == RunnerSlot::Batter)
                .cloned(),
        );
    }
    filled
}
