//! Action journal: the committed log plus undo/redo.
//!
//! History is strictly linear. Every commit clears the redo stack; undo pops
//! the newest entry and reverts it through its inverse deltas; redo feeds the
//! stored action back through the reducer, so automatic follow-ups are
//! recomputed rather than replayed from storage.
mod error;

pub use error::{JournalError, SequenceError};

use arrayvec::ArrayVec;

use crate::action::substitution::{self, SubstitutionRecord};
use crate::action::{ActionSummary, GameAction, SubstitutionError};
use crate::config::GameConfig;
use crate::engine::{GameEngine, InverseDelta, ProgressionController};
use crate::state::GameState;

/// Follow-up actions applied automatically inside one journal entry.
pub type FollowUps = ArrayVec<(GameAction, InverseDelta), { GameConfig::MAX_FOLLOW_UPS }>;

/// One committed action with everything needed to take it back.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JournalEntry {
    pub action: GameAction,
    pub inverse: InverseDelta,
    /// Automatic half-inning or game-end steps, in application order.
    pub follow_ups: FollowUps,
    /// Nonce of the state after the entry, follow-ups included.
    pub nonce: u64,
}

impl JournalEntry {
    pub fn summary(&self) -> ActionSummary {
        self.action.summary(self.nonce)
    }

    /// Whether progression closed the half or ended the game after this action.
    pub fn triggered_progression(&self) -> bool {
        !self.follow_ups.is_empty()
    }
}

/// Owns the live game state and its action history.
#[derive(Clone, Debug)]
pub struct ActionJournal {
    config: GameConfig,
    state: GameState,
    log: Vec<JournalEntry>,
    redo: Vec<GameAction>,
}

impl ActionJournal {
    pub fn new(config: GameConfig, state: GameState) -> Self {
        Self {
            config,
            state,
            log: Vec::new(),
            redo: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn log(&self) -> &[JournalEntry] {
        &self.log
    }

    /// Actions waiting on the redo stack, newest last.
    pub fn redo_stack(&self) -> &[GameAction] {
        &self.redo
    }

    /// Applies `action` and its automatic follow-ups as one entry.
    ///
    /// On failure the state, log and redo stack are left unchanged.
    pub fn commit(&mut self, action: GameAction) -> Result<&JournalEntry, JournalError> {
        let entry = self.execute(action)?;
        self.redo.clear();
        Ok(self.push(entry))
    }

    /// Reverts the newest entry and moves its action to the redo stack.
    pub fn undo(&mut self) -> Result<ActionSummary, JournalError> {
        let newest = self.log.last().ok_or(SequenceError::NothingToUndo)?;
        if !newest.action.is_undoable() {
            return Err(SequenceError::UndoBarrier.into());
        }
        let entry = self.log.pop().ok_or(SequenceError::NothingToUndo)?;

        for (_, inverse) in entry.follow_ups.iter().rev() {
            inverse.revert(&mut self.state);
        }
        entry.inverse.revert(&mut self.state);

        let summary = entry.summary();
        self.redo.push(entry.action);
        Ok(summary)
    }

    /// Re-applies the newest undone action.
    ///
    /// If the action no longer applies it stays on the redo stack.
    pub fn redo(&mut self) -> Result<&JournalEntry, JournalError> {
        let action = self.redo.pop().ok_or(SequenceError::NothingToRedo)?;
        match self.execute(action.clone()) {
            Ok(entry) => Ok(self.push(entry)),
            Err(error) => {
                self.redo.push(action);
                Err(error)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.log.last().is_some_and(|entry| entry.action.is_undoable())
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Descriptor of the newest committed action.
    pub fn last_action(&self) -> Option<ActionSummary> {
        self.log.last().map(JournalEntry::summary)
    }

    /// Runs the substitution validator against the live state.
    pub fn preflight_substitution(
        &self,
        record: &SubstitutionRecord,
    ) -> Result<(), Vec<SubstitutionError>> {
        substitution::validate(&self.state, record)
    }

    /// Commitment over the committed actions, follow-ups excluded.
    #[cfg(feature = "serde")]
    pub fn log_root(&self) -> [u8; 32] {
        let actions: Vec<GameAction> = self.log.iter().map(|entry| entry.action.clone()).collect();
        crate::action::compute_actions_root(&actions)
    }

    /// Applies `action` plus follow-ups to a copy of the live state.
    fn execute(&self, action: GameAction) -> Result<(GameState, JournalEntry), JournalError> {
        let engine = GameEngine::new(&self.config);
        let controller = ProgressionController::new(&self.config);

        let mut next = self.state.clone();
        let inverse = engine.apply_in_place(&mut next, &action)?;

        let mut follow_ups = FollowUps::new();
        let mut trigger = action.clone();
        while !follow_ups.is_full() {
            let Some(follow_up) = controller.next_action(&next, &trigger) else {
                break;
            };
            let inverse = engine.apply_in_place(&mut next, &follow_up)?;
            trigger = follow_up.clone();
            follow_ups.push((follow_up, inverse));
        }

        let entry = JournalEntry {
            action,
            inverse,
            follow_ups,
            nonce: next.nonce,
        };
        Ok((next, entry))
    }

    fn push(&mut self, (state, entry): (GameState, JournalEntry)) -> &JournalEntry {
        self.state = state;
        self.log.push(entry);
        &self.log[self.log.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{StateError, SubstitutionKind, SubstitutionRecord};
    use crate::engine::ExecuteError;
    use crate::state::{
        AdvanceReason, AtBat, Base, BattingResult, FieldPosition, GameState, Half, PlayerId,
        RunnerAdvance, RunnerSlot, TeamSide, Timestamp, fixtures,
    };

    fn journal() -> ActionJournal {
        ActionJournal::new(GameConfig::default(), fixtures::game())
    }

    fn at_bat(journal: &ActionJournal, result: BattingResult) -> AtBat {
        let slot = journal.state().current_batter().expect("lineup has a batter");
        AtBat::new(slot.player_id, slot.batting_order, result, Timestamp(1_000 + journal.log().len() as i64))
    }

    fn play(journal: &mut ActionJournal, result: BattingResult) {
        let record = at_bat(journal, result);
        journal.commit(GameAction::record_at_bat(record)).unwrap();
    }

    fn moves(advances: &[RunnerAdvance]) -> Vec<(RunnerSlot, Base, Base, AdvanceReason)> {
        advances
            .iter()
            .map(|advance| (advance.runner, advance.from, advance.to, advance.reason))
            .collect()
    }

    fn last_advances(journal: &ActionJournal) -> Vec<RunnerAdvance> {
        journal
            .state()
            .last_at_bat()
            .map(|at_bat| at_bat.advances.clone())
            .unwrap_or_default()
    }

    #[test]
    fn single_with_empty_bases() {
        let mut journal = journal();
        play(&mut journal, BattingResult::Single);

        assert_eq!(
            moves(&last_advances(&journal)),
            vec![(RunnerSlot::Batter, Base::Plate, Base::First, AdvanceReason::Hit)]
        );
        assert_eq!(journal.state().outs, 0);
        assert_eq!(journal.state().runs(TeamSide::Away), 0);
    }

    #[test]
    fn walk_forces_only_the_unbroken_chain() {
        let mut journal = journal();
        play(&mut journal, BattingResult::Single);
        play(&mut journal, BattingResult::Single);
        play(&mut journal, BattingResult::Walk);

        assert_eq!(
            moves(&last_advances(&journal)),
            vec![
                (RunnerSlot::Second, Base::Second, Base::Third, AdvanceReason::Walk),
                (RunnerSlot::First, Base::First, Base::Second, AdvanceReason::Walk),
                (RunnerSlot::Batter, Base::Plate, Base::First, AdvanceReason::Walk),
            ]
        );
        assert_eq!(journal.state().bases.count(), 3);
        assert_eq!(journal.state().bases.runner_on(Base::Third), Some(PlayerId(1)));
    }

    #[test]
    fn hit_by_pitch_with_bases_loaded_forces_in_a_run() {
        let mut journal = journal();
        for _ in 0..3 {
            play(&mut journal, BattingResult::Walk);
        }
        play(&mut journal, BattingResult::HitByPitch);

        let advances = last_advances(&journal);
        assert_eq!(
            moves(&advances),
            vec![
                (RunnerSlot::Third, Base::Third, Base::Home, AdvanceReason::HitByPitch),
                (RunnerSlot::Second, Base::Second, Base::Third, AdvanceReason::HitByPitch),
                (RunnerSlot::First, Base::First, Base::Second, AdvanceReason::HitByPitch),
                (RunnerSlot::Batter, Base::Plate, Base::First, AdvanceReason::HitByPitch),
            ]
        );
        assert!(advances[0].scored);
        assert_eq!(journal.state().runs(TeamSide::Away), 1);
        assert_eq!(journal.state().last_at_bat().and_then(|at_bat| at_bat.rbis), Some(1));
    }

    #[test]
    fn sacrifice_fly_scores_before_the_half_closes() {
        let mut journal = journal();
        play(&mut journal, BattingResult::Triple);
        play(&mut journal, BattingResult::Strikeout { looking: false });
        play(&mut journal, BattingResult::PopOut);
        assert_eq!(journal.state().outs, 2);

        let record = at_bat(&journal, BattingResult::SacrificeFly)
            .with_advances([RunnerAdvance::safe(
                RunnerSlot::Third,
                Base::Third,
                Base::Home,
                AdvanceReason::TagUp,
            )]);
        let entry = journal.commit(GameAction::record_at_bat(record)).unwrap();
        assert!(entry.triggered_progression());
        assert_eq!(journal.state().innings[0].at_bats[3].rbis, Some(1));

        let state = journal.state();
        assert_eq!(state.runs(TeamSide::Away), 1);
        assert_eq!(state.innings[0].runs_scored, 1);
        assert_eq!(state.innings[0].outs_at_close, Some(3));
        assert_eq!((state.inning, state.half, state.outs), (1, Half::Bottom, 0));
        assert!(state.bases.is_empty());
    }

    #[test]
    fn undo_then_redo_reproduces_the_at_bat() {
        let mut journal = journal();
        let before = journal.state().clone();
        play(&mut journal, BattingResult::Single);
        let applied = journal.state().clone();

        let summary = journal.undo().unwrap();
        assert_eq!(summary.description, "single by #1");
        assert_eq!(journal.state(), &before);
        assert!(journal.log().is_empty());
        assert!(journal.can_redo());

        journal.redo().unwrap();
        assert_eq!(journal.state(), &applied);
        assert_eq!(
            journal.state().last_at_bat().map(|at_bat| at_bat.timestamp),
            Some(Timestamp(1_000))
        );
        assert!(!journal.can_redo());
    }

    #[test]
    fn undo_reverts_the_automatic_half_change() {
        let mut journal = journal();
        play(&mut journal, BattingResult::GroundOut);
        play(&mut journal, BattingResult::GroundOut);
        let before = journal.state().clone();
        play(&mut journal, BattingResult::GroundOut);
        assert_eq!(journal.state().half, Half::Bottom);
        assert_eq!(journal.state().batting_pointers.away, 3);

        journal.undo().unwrap();
        assert_eq!(journal.state(), &before);
    }

    #[test]
    fn half_changes_keep_each_lineup_in_order() {
        let mut journal = journal();
        for _ in 0..3 {
            play(&mut journal, BattingResult::FlyOut);
        }
        for _ in 0..3 {
            play(&mut journal, BattingResult::FlyOut);
        }
        let state = journal.state();
        assert_eq!((state.inning, state.half), (2, Half::Top));
        assert_eq!(state.current_batter().map(|slot| slot.batting_order), Some(4));
        assert_eq!(state.due_up(TeamSide::Home).map(|slot| slot.batting_order), Some(4));
    }

    #[test]
    fn commit_clears_the_redo_stack() {
        let mut journal = journal();
        play(&mut journal, BattingResult::Single);
        journal.undo().unwrap();
        assert!(journal.can_redo());

        play(&mut journal, BattingResult::Double);
        assert!(!journal.can_redo());
        assert_eq!(journal.redo(), Err(SequenceError::NothingToRedo.into()));
    }

    #[test]
    fn failed_commit_changes_nothing() {
        let mut journal = journal();
        let record = AtBat::new(PlayerId(5), 5, BattingResult::Single, Timestamp(0));
        assert!(journal.commit(GameAction::record_at_bat(record)).is_err());
        assert!(journal.log().is_empty());
        assert_eq!(journal.state(), &fixtures::game());
        assert_eq!(journal.undo(), Err(SequenceError::NothingToUndo.into()));
    }

    #[test]
    fn explicit_end_is_an_undo_barrier() {
        let mut journal = journal();
        play(&mut journal, BattingResult::Single);
        journal.commit(GameAction::end_game(Timestamp(9_000))).unwrap();

        assert!(!journal.can_undo());
        assert_eq!(journal.undo(), Err(SequenceError::UndoBarrier.into()));
        assert_eq!(
            journal
                .commit(GameAction::record_at_bat(at_bat(&journal, BattingResult::Single)))
                .map(|_| ()),
            Err(JournalError::Execute(ExecuteError::State(StateError::GameEnded)))
        );

        journal.commit(GameAction::resume_game()).unwrap();
        assert!(!journal.state().is_ended());
        assert!(journal.can_undo());
        journal.undo().unwrap();
        assert_eq!(journal.state().end_time, Some(Timestamp(9_000)));
    }

    #[test]
    fn walk_off_ends_the_game_and_undoes_with_its_at_bat() {
        let mut journal = ActionJournal::new(GameConfig::with_regulation_innings(1), fixtures::game());
        for _ in 0..3 {
            play(&mut journal, BattingResult::FlyOut);
        }
        assert_eq!(journal.state().half, Half::Bottom);

        let record = at_bat(&journal, BattingResult::HomeRun).with_rbis(1);
        let timestamp = record.timestamp;
        let entry = journal.commit(GameAction::record_at_bat(record)).unwrap();
        assert_eq!(entry.follow_ups.len(), 1);
        assert_eq!(journal.state().end_time, Some(timestamp));
        assert_eq!(journal.state().outs, 0);

        assert!(journal.can_undo());
        journal.undo().unwrap();
        assert!(!journal.state().is_ended());
        assert_eq!(journal.state().runs(TeamSide::Home), 0);
    }

    #[test]
    fn home_lead_after_the_top_of_the_last_inning_ends_the_game() {
        let mut journal = ActionJournal::new(GameConfig::with_regulation_innings(2), fixtures::game());
        for _ in 0..3 {
            play(&mut journal, BattingResult::FlyOut);
        }
        play(&mut journal, BattingResult::HomeRun);
        assert!(!journal.state().is_ended());
        for _ in 0..6 {
            play(&mut journal, BattingResult::FlyOut);
        }

        let state = journal.state();
        assert!(state.is_ended());
        assert_eq!((state.inning, state.half, state.outs), (2, Half::Top, 3));
        assert_eq!(state.end_time, state.last_at_bat().map(|at_bat| at_bat.timestamp));
        assert_eq!(state.runs(TeamSide::Home), 1);
    }

    #[test]
    fn substitution_round_trips_through_undo() {
        let mut journal = journal();
        let before = journal.state().clone();
        let record = SubstitutionRecord {
            team: TeamSide::Away,
            original: PlayerId(1),
            incoming: PlayerId(12),
            kind: SubstitutionKind::Batter { batting_order: 1 },
        };
        assert_eq!(journal.preflight_substitution(&record), Ok(()));
        journal.commit(GameAction::substitute(record)).unwrap();
        assert_eq!(
            journal.state().current_batter().map(|slot| slot.player_id),
            Some(PlayerId(12))
        );
        assert_eq!(
            journal.last_action().map(|summary| summary.description),
            Some("pinch hitter #12 for #1".to_string())
        );

        journal.undo().unwrap();
        assert_eq!(journal.state(), &before);
    }

    /// Commits `record`, then checks undo restores the prior state and redo
    /// the substituted one.
    fn substitute_round_trip(
        journal: &mut ActionJournal,
        record: SubstitutionRecord,
    ) -> GameState {
        let before = journal.state().clone();
        journal.commit(GameAction::substitute(record)).unwrap();
        let applied = journal.state().clone();
        assert_ne!(applied, before);

        journal.undo().unwrap();
        assert_eq!(journal.state(), &before);
        journal.redo().unwrap();
        assert_eq!(journal.state(), &applied);
        journal.undo().unwrap();
        applied
    }

    #[test]
    fn pinch_runner_round_trips_through_undo() {
        let mut journal = journal();
        play(&mut journal, BattingResult::Single);
        let record = SubstitutionRecord {
            team: TeamSide::Away,
            original: PlayerId(1),
            incoming: PlayerId(11),
            kind: SubstitutionKind::Runner { base: Base::First },
        };

        let applied = substitute_round_trip(&mut journal, record);
        assert_eq!(applied.bases.runner_on(Base::First), Some(PlayerId(11)));
        assert_eq!(applied.away.slots[0].player_id, PlayerId(11));
        assert!(applied.away.bench_index(PlayerId(11)).is_none());

        let state = journal.state();
        assert_eq!(state.bases.runner_on(Base::First), Some(PlayerId(1)));
        assert_eq!(state.away.slots[0].player_id, PlayerId(1));
        assert!(state.away.bench_index(PlayerId(11)).is_some());
    }

    #[test]
    fn defensive_replacement_round_trips_through_undo() {
        let mut journal = journal();
        let record = SubstitutionRecord {
            team: TeamSide::Home,
            original: PlayerId(29),
            incoming: PlayerId(31),
            kind: SubstitutionKind::Defense {
                position: FieldPosition::Pitcher,
            },
        };

        let applied = substitute_round_trip(&mut journal, record);
        assert_eq!(applied.home.slots[8].player_id, PlayerId(31));
        assert_eq!(applied.home.slots[8].position, FieldPosition::Pitcher);

        let state = journal.state();
        assert_eq!(state.home.slots[8].player_id, PlayerId(29));
        assert!(state.home.bench_index(PlayerId(31)).is_some());
        assert_eq!(state, &fixtures::game());
    }

    #[test]
    fn position_swap_round_trips_through_undo() {
        let mut journal = journal();
        let record = SubstitutionRecord {
            team: TeamSide::Home,
            original: PlayerId(22),
            incoming: PlayerId(21),
            kind: SubstitutionKind::DefenseSwap {
                from: FieldPosition::Shortstop,
                to: FieldPosition::CenterField,
            },
        };

        let applied = substitute_round_trip(&mut journal, record);
        assert_eq!(applied.home.slots[0].position, FieldPosition::Shortstop);
        assert_eq!(applied.home.slots[1].position, FieldPosition::CenterField);
        assert_eq!(applied.home.bench, fixtures::game().home.bench);

        let state = journal.state();
        assert_eq!(state.home.slots[0].position, FieldPosition::CenterField);
        assert_eq!(state.home.slots[1].position, FieldPosition::Shortstop);
        assert_eq!(state, &fixtures::game());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn redo_reproduces_the_log_root() {
        let mut journal = journal();
        play(&mut journal, BattingResult::Walk);
        let record = at_bat(&journal, BattingResult::Double).with_advances([RunnerAdvance::safe(
            RunnerSlot::First,
            Base::First,
            Base::Third,
            AdvanceReason::Hit,
        )]);
        journal.commit(GameAction::record_at_bat(record)).unwrap();
        assert_eq!(journal.state().bases.runner_on(Base::Third), Some(PlayerId(1)));
        assert_eq!(journal.state().bases.runner_on(Base::Second), Some(PlayerId(2)));
        let root = journal.log_root();

        journal.undo().unwrap();
        journal.undo().unwrap();
        journal.redo().unwrap();
        journal.redo().unwrap();
        assert_eq!(journal.log_root(), root);
    }
}
