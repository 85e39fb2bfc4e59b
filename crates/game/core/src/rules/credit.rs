//! Run and RBI credit for a play.
//!
//! No run counts when a play's third out is the batter-runner retired before
//! reaching first or a runner retired on a force. Outs on caught balls and
//! strikeouts are time plays: runs that crossed the plate first still count.

use crate::state::{AdvanceOutcome, Base, Bases, BattingResult, RunnerAdvance, RunnerSlot};

use super::forced::forced_runner_floor;

/// Whether the last out of the play was the batter-runner short of first or a
/// forced runner put out at the base they were forced to.
///
/// `implicit_batter_out` marks a batter retired by the result with no advance
/// of their own; that out is taken to be the last one recorded.
pub fn ends_on_force_play(
    occupied: Bases,
    result: &BattingResult,
    advances: &[RunnerAdvance],
    implicit_batter_out: bool,
) -> bool {
    if implicit_batter_out {
        return result.retires_batter_runner();
    }

    let batter_runs = result.batter_destination().is_some()
        || result.retires_batter_runner()
        || advances
            .iter()
            .any(|advance| advance.runner == RunnerSlot::Batter && advance.from == Base::Plate);
    let forced = forced_runner_floor(occupied, batter_runs);

    // Lowest origin of a runner already retired; it lifts the force ahead.
    let mut removed: Option<Base> = None;
    let mut last_out_forced = false;
    for advance in advances.iter().filter(|advance| advance.is_out()) {
        let is_force = if advance.runner == RunnerSlot::Batter {
            advance.from == Base::Plate && advance.to == Base::First
        } else {
            advance.outcome == AdvanceOutcome::Out
                && !removed.is_some_and(|base| base < advance.from)
                && forced.iter().any(|runner| {
                    runner.runner == advance.runner
                        && runner.from == advance.from
                        && runner.floor == advance.to
                })
        };
        last_out_forced = is_force;
        removed = Some(removed.map_or(advance.from, |base| base.min(advance.from)));
    }
    last_out_forced
}

/// Runs batted in by the play, for at-bats recorded without an explicit count.
///
/// Forced-in runs count on walks and hit batsmen. On hits, sacrifices,
/// fielder's choices and ground outs every run driven by the ball in play
/// counts. Double plays, errors and outs in the air drive in nothing unless
/// the scorer says so.
pub fn derive_rbis(result: &BattingResult, advances: &[RunnerAdvance]) -> u8 {
    let runs = advances.iter().filter(|advance| advance.is_run());
    let credited = if result.forces_in_rbis() {
        let reason = result.advance_reason();
        runs.filter(|advance| advance.reason == reason).count()
    } else {
        match result {
            BattingResult::Single
            | BattingResult::Double
            | BattingResult::Triple
            | BattingResult::HomeRun
            | BattingResult::SacrificeFly
            | BattingResult::SacrificeBunt
            | BattingResult::GroundOut
            | BattingResult::FieldersChoice => {
                runs.filter(|advance| advance.reason.credits_rbi()).count()
            }
            _ => 0,
        }
    };
    u8::try_from(credited).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AdvanceReason;

    #[test]
    fn ground_out_batter_is_a_force_out() {
        assert!(ends_on_force_play(Bases::THIRD, &BattingResult::GroundOut, &[], true));
        assert!(!ends_on_force_play(Bases::THIRD, &BattingResult::FlyOut, &[], true));
        assert!(!ends_on_force_play(
            Bases::THIRD,
            &BattingResult::Strikeout { looking: false },
            &[],
            true
        ));
    }

    #[test]
    fn forced_runner_out_at_the_next_base() {
        let advances = [
            RunnerAdvance::safe(
                RunnerSlot::Third,
                Base::Third,
                Base::Home,
                AdvanceReason::FieldersChoice,
            ),
            RunnerAdvance::out(
                RunnerSlot::First,
                Base::First,
                Base::Second,
                AdvanceReason::FieldersChoice,
            ),
            RunnerAdvance::safe(
                RunnerSlot::Batter,
                Base::Plate,
                Base::First,
                AdvanceReason::FieldersChoice,
            ),
        ];
        assert!(ends_on_force_play(
            Bases::FIRST | Bases::THIRD,
            &BattingResult::FieldersChoice,
            &advances,
            false
        ));
    }

    #[test]
    fn tag_out_and_lifted_force_are_time_plays() {
        let tagged = [
            RunnerAdvance::safe(
                RunnerSlot::Third,
                Base::Third,
                Base::Home,
                AdvanceReason::FieldersChoice,
            ),
            RunnerAdvance::out(
                RunnerSlot::First,
                Base::First,
                Base::Second,
                AdvanceReason::FieldersChoice,
            )
            .with_outcome(AdvanceOutcome::TagOut),
            RunnerAdvance::safe(
                RunnerSlot::Batter,
                Base::Plate,
                Base::First,
                AdvanceReason::FieldersChoice,
            ),
        ];
        assert!(!ends_on_force_play(
            Bases::FIRST | Bases::THIRD,
            &BattingResult::FieldersChoice,
            &tagged,
            false
        ));

        // Batter retired first, then the runner from first is caught at second.
        let reversed = [
            RunnerAdvance::out(RunnerSlot::Batter, Base::Plate, Base::First, AdvanceReason::Other),
            RunnerAdvance::out(RunnerSlot::First, Base::First, Base::Second, AdvanceReason::Other),
        ];
        assert!(!ends_on_force_play(
            Bases::FIRST,
            &BattingResult::DoublePlay,
            &reversed,
            false
        ));
    }

    #[test]
    fn caught_stealing_is_not_a_force() {
        let advances = [RunnerAdvance::out(
            RunnerSlot::First,
            Base::First,
            Base::Second,
            AdvanceReason::CaughtStealing,
        )];
        assert!(!ends_on_force_play(
            Bases::FIRST,
            &BattingResult::Baserunning,
            &advances,
            false
        ));
    }

    #[test]
    fn forced_in_runs_are_batted_in() {
        let advances = [
            RunnerAdvance::safe(
                RunnerSlot::Third,
                Base::Third,
                Base::Home,
                AdvanceReason::HitByPitch,
            ),
            RunnerAdvance::safe(
                RunnerSlot::Second,
                Base::Second,
                Base::Third,
                AdvanceReason::HitByPitch,
            ),
        ];
        assert_eq!(derive_rbis(&BattingResult::HitByPitch, &advances), 1);

        let wild_pitch = [RunnerAdvance::safe(
            RunnerSlot::Third,
            Base::Third,
            Base::Home,
            AdvanceReason::WildPitch,
        )];
        assert_eq!(derive_rbis(&BattingResult::Walk, &wild_pitch), 0);
    }

    #[test]
    fn runs_on_errors_and_double_plays_are_not_batted_in() {
        let scored = |reason| {
            RunnerAdvance::safe(RunnerSlot::Third, Base::Third, Base::Home, reason)
        };
        assert_eq!(derive_rbis(&BattingResult::Single, &[scored(AdvanceReason::Hit)]), 1);
        assert_eq!(derive_rbis(&BattingResult::Single, &[scored(AdvanceReason::Error)]), 0);
        assert_eq!(derive_rbis(&BattingResult::DoublePlay, &[scored(AdvanceReason::Other)]), 0);
        assert_eq!(
            derive_rbis(
                &BattingResult::ReachedOnError {
                    fielder: crate::state::FieldPosition::Shortstop
                },
                &[scored(AdvanceReason::Error)]
            ),
            0
        );
    }
}
