use scorebook_core::{
    ActionKind, AdvanceReason, Base, BattingResult, ErrorSeverity, FieldPosition, GameId, Half,
    Lineup, Pitch, Player, PlayerId, RunnerAdvance, RunnerSlot, SubstitutionKind,
    SubstitutionRecord, TeamSide, Timestamp,
};
use scorebook_runtime::{PlayInput, RuntimeConfig, RuntimeError, ScoringSession, SessionEvent};

const POSITIONS: [FieldPosition; 9] = [
    FieldPosition::CenterField,
    FieldPosition::Shortstop,
    FieldPosition::LeftField,
    FieldPosition::FirstBase,
    FieldPosition::RightField,
    FieldPosition::ThirdBase,
    FieldPosition::Catcher,
    FieldPosition::SecondBase,
    FieldPosition::Pitcher,
];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn fixed_clock() -> Timestamp {
    Timestamp(42_000)
}

fn lineup(team: &str, first_id: u32) -> Lineup {
    let starters = POSITIONS
        .iter()
        .enumerate()
        .map(|(offset, position)| {
            let id = first_id + offset as u32;
            (Player::new(PlayerId(id), format!("{team} {id}"), id as u8), *position)
        })
        .collect();
    let bench = (10..13)
        .map(|offset| {
            let id = first_id + offset;
            Player::new(PlayerId(id), format!("{team} bench {id}"), id as u8)
        })
        .collect();
    Lineup::new(starters, bench)
}

fn session() -> ScoringSession {
    init_tracing();
    ScoringSession::builder()
        .lineups(GameId(7), Timestamp(1_000), lineup("Away", 1), lineup("Home", 21))
        .clock(fixed_clock)
        .build()
        .expect("lineups are valid")
}

#[test]
fn four_balls_become_a_walk() {
    let mut session = session();
    for _ in 0..4 {
        session.record_pitch(Pitch::Ball).unwrap();
    }
    assert_eq!(session.pitch_count().balls, 4);
    assert_eq!(session.info_bar().balls, 4);

    let summary = session.record_at_bat(PlayInput::new(BattingResult::Walk)).unwrap();
    assert_eq!(summary.kind, ActionKind::RecordAtBat);
    assert_eq!(summary.description, "walk by #1");
    assert!(session.pending_pitches().is_empty());

    let field = session.field_view();
    let runner = field.runner_on(Base::First).expect("batter walked to first");
    assert_eq!(runner.player, PlayerId(1));
    assert_eq!(runner.name, "Away 1");

    let info = session.info_bar();
    assert_eq!(info.batter, Some(PlayerId(2)));
    assert_eq!(info.batting_order, Some(2));
    assert_eq!((info.balls, info.strikes), (0, 0));

    let history = session.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].pitches, 4);
    assert_eq!(history[0].result, "walk");
    assert_eq!((history[0].inning, history[0].half), (1, Half::Top));
}

#[test]
fn rejected_at_bat_keeps_the_pitches() {
    let mut session = session();
    session.record_pitch(Pitch::CalledStrike).unwrap();
    session.record_pitch(Pitch::InPlay).unwrap();
    session.drain_events();

    let error = session
        .record_at_bat(PlayInput::new(BattingResult::Single).rbis(1))
        .unwrap_err();
    assert_eq!(error.severity(), ErrorSeverity::Recoverable);
    assert_eq!(error.error_code(), "VALIDATION_RBIS_EXCEED_RUNS");
    assert_eq!(session.pending_pitches().len(), 2);
    assert_eq!(session.state().nonce, 0);

    let events = session.drain_events();
    assert!(matches!(
        events.as_slice(),
        [SessionEvent::Rejected { kind: Some(ActionKind::RecordAtBat), .. }]
    ));
}

#[test]
fn bases_loaded_hit_batsman_drives_in_a_run() {
    let mut session = session();
    for _ in 0..3 {
        session.record_at_bat(PlayInput::new(BattingResult::Walk)).unwrap();
    }
    session
        .record_at_bat(PlayInput::new(BattingResult::HitByPitch))
        .unwrap();

    let history = session.history();
    assert_eq!(history[3].runs, 1);
    assert_eq!(history[3].rbis, 1);
    assert_eq!(session.scoreboard().away.runs, 1);
}

#[test]
fn run_on_a_force_out_for_the_third_out_is_refused() {
    let mut session = session();
    session.record_at_bat(PlayInput::new(BattingResult::Triple)).unwrap();
    session.record_at_bat(PlayInput::new(BattingResult::FlyOut)).unwrap();
    session.record_at_bat(PlayInput::new(BattingResult::FlyOut)).unwrap();

    let error = session
        .record_at_bat(PlayInput::new(BattingResult::GroundOut).advances([
            RunnerAdvance::safe(RunnerSlot::Third, Base::Third, Base::Home, AdvanceReason::Other),
        ]))
        .unwrap_err();
    assert_eq!(error.error_code(), "VALIDATION_RUN_ON_FORCE_OUT");
    assert_eq!(session.scoreboard().away.runs, 0);
    assert_eq!(session.state().outs, 2);
}

#[test]
fn third_out_flips_the_half_and_undo_flips_it_back() {
    let mut session = session();
    for _ in 0..3 {
        session
            .record_at_bat(PlayInput::new(BattingResult::Strikeout { looking: true }))
            .unwrap();
    }
    assert_eq!(session.state().half, Half::Bottom);
    assert_eq!(session.info_bar().batter, Some(PlayerId(21)));

    let events = session.drain_events();
    assert_eq!(
        events.last(),
        Some(&SessionEvent::HalfInningChanged {
            inning: 1,
            half: Half::Bottom
        })
    );

    let undone = session.undo().unwrap();
    assert_eq!(undone.description, "strikeout looking by #3");
    assert_eq!(session.state().half, Half::Top);
    assert_eq!(session.state().outs, 2);
    assert_eq!(session.info_bar().batter, Some(PlayerId(3)));
    assert!(session.drain_events().contains(&SessionEvent::HalfInningChanged {
        inning: 1,
        half: Half::Top
    }));

    let redone = session.redo().unwrap();
    assert_eq!(redone.description, undone.description);
    assert_eq!(session.state().half, Half::Bottom);
    assert!(!session.can_redo());
}

#[test]
fn undo_and_redo_on_an_empty_journal_are_rejected() {
    let mut session = session();
    assert!(!session.can_undo());
    let error = session.undo().unwrap_err();
    assert_eq!(error.error_code(), "SEQUENCE_NOTHING_TO_UNDO");
    let error = session.redo().unwrap_err();
    assert_eq!(error.error_code(), "SEQUENCE_NOTHING_TO_REDO");
}

#[test]
fn snapshot_round_trip_preserves_the_game() {
    let mut session = session();
    session.record_at_bat(PlayInput::new(BattingResult::Double)).unwrap();
    session.record_at_bat(PlayInput::new(BattingResult::GroundOut)).unwrap();

    let json = session.to_snapshot_json().unwrap();
    let restored = ScoringSession::from_snapshot_json(&json, RuntimeConfig::default()).unwrap();

    assert_eq!(restored.state(), session.state());
    assert_eq!(restored.state_root(), session.state_root());
    assert_eq!(restored.state_root().len(), 64);
    assert!(!restored.can_undo());
}

#[test]
fn malformed_snapshot_is_fatal() {
    let error = ScoringSession::from_snapshot_json("{\"id\":", RuntimeConfig::default())
        .err()
        .expect("snapshot is truncated");
    assert!(matches!(error, RuntimeError::Snapshot(_)));
    assert_eq!(error.severity(), ErrorSeverity::Fatal);
}

#[test]
fn tampered_snapshot_is_rejected() {
    let session = session();
    let json = session.to_snapshot_json().unwrap();

    let mut too_many_outs: serde_json::Value = serde_json::from_str(&json).unwrap();
    too_many_outs["outs"] = serde_json::json!(7);
    let error = ScoringSession::from_snapshot_json(
        &too_many_outs.to_string(),
        RuntimeConfig::default(),
    )
    .err()
    .expect("seven outs in a half");
    assert!(matches!(error, RuntimeError::InitialState(_)));
    assert_eq!(error.error_code(), "INIT_OUTS_OUT_OF_RANGE");
    assert_eq!(error.severity(), ErrorSeverity::Fatal);

    let mut reordered: serde_json::Value = serde_json::from_str(&json).unwrap();
    reordered["away"]["slots"][1]["batting_order"] = serde_json::json!(5);
    let error =
        ScoringSession::from_snapshot_json(&reordered.to_string(), RuntimeConfig::default())
            .err()
            .expect("batting order has a gap");
    assert_eq!(error.error_code(), "INIT_BATTING_ORDER_GAP");
}

#[test]
fn pinch_hitter_waits_for_a_fresh_at_bat() {
    let mut session = session();
    session.record_pitch(Pitch::Ball).unwrap();

    let record = SubstitutionRecord {
        team: TeamSide::Away,
        original: PlayerId(1),
        incoming: PlayerId(11),
        kind: SubstitutionKind::Batter { batting_order: 1 },
    };
    let error = session.substitute(record.clone()).unwrap_err();
    assert!(matches!(error, RuntimeError::AtBatInProgress { pitches: 1 }));

    session.clear_pitches();
    assert_eq!(session.preflight(&record), Ok(()));
    let summary = session.substitute(record).unwrap();
    assert_eq!(summary.kind, ActionKind::ApplySubstitution);

    let info = session.info_bar();
    assert_eq!(info.batter, Some(PlayerId(11)));
    assert_eq!(info.batter_name.as_deref(), Some("Away bench 11"));
}

#[test]
fn invalid_substitution_reports_every_problem() {
    let mut session = session();
    let record = SubstitutionRecord {
        team: TeamSide::Away,
        original: PlayerId(99),
        incoming: PlayerId(2),
        kind: SubstitutionKind::Batter { batting_order: 1 },
    };
    match session.substitute(record) {
        Err(RuntimeError::Substitution(errors)) => assert!(errors.len() >= 2),
        other => panic!("expected substitution errors, got {other:?}"),
    }
    assert_eq!(session.state().nonce, 0);
}

#[test]
fn ended_game_is_final_until_resumed() {
    let mut session = session();
    session.record_at_bat(PlayInput::new(BattingResult::Single)).unwrap();
    session.drain_events();

    session.end_game().unwrap();
    assert!(session.state().is_ended());
    assert!(session.drain_events().contains(&SessionEvent::GameEnded {
        end_time: fixed_clock()
    }));

    assert!(matches!(
        session.record_pitch(Pitch::Ball),
        Err(RuntimeError::State(_))
    ));
    assert_eq!(
        session
            .record_at_bat(PlayInput::new(BattingResult::Single))
            .unwrap_err()
            .error_code(),
        "STATE_GAME_ENDED"
    );
    assert_eq!(session.undo().unwrap_err().error_code(), "SEQUENCE_UNDO_BARRIER");

    session.resume_game().unwrap();
    assert!(!session.state().is_ended());
    assert!(session.drain_events().contains(&SessionEvent::GameResumed));
    assert_eq!(session.info_bar().batter, Some(PlayerId(2)));
}

#[test]
fn scoreboard_and_suggestions_follow_play() {
    let mut session = session();
    session
        .record_at_bat(PlayInput::new(BattingResult::HomeRun))
        .unwrap();
    session.record_at_bat(PlayInput::new(BattingResult::Single)).unwrap();

    let board = session.scoreboard();
    assert_eq!(board.columns, 9);
    assert_eq!(board.away.runs, 1);
    assert_eq!(board.away.hits, 2);
    assert_eq!(board.away.runs_by_inning[0], Some(1));
    assert_eq!(board.home.runs_by_inning[0], None);
    assert_eq!(session.info_bar().away_runs, 1);
    assert_eq!(session.history()[0].rbis, 1);

    let suggested = session.suggest_advances(&BattingResult::Walk);
    assert_eq!(suggested.len(), 2);
    assert_eq!(suggested[0].from, Base::First);
    assert_eq!(suggested[0].to, Base::Second);
    assert_eq!(suggested[1].to, Base::First);
    assert!(session.suggest_advances(&BattingResult::FlyOut).is_empty());
}

#[test]
fn builder_requires_a_valid_starting_state() {
    assert!(matches!(
        ScoringSession::builder().build().err(),
        Some(RuntimeError::MissingInitialState)
    ));

    let error = ScoringSession::builder()
        .lineups(GameId(8), Timestamp(0), lineup("Away", 1), lineup("Home", 5))
        .build()
        .err()
        .expect("rosters overlap");
    assert!(matches!(error, RuntimeError::InitialState(_)));
    assert_eq!(error.error_code(), "INIT_SHARED_PLAYER");
}

#[test]
fn event_feed_is_bounded() {
    init_tracing();
    let mut session = ScoringSession::builder()
        .lineups(GameId(9), Timestamp(0), lineup("Away", 1), lineup("Home", 21))
        .event_buffer_size(2)
        .clock(fixed_clock)
        .build()
        .unwrap();
    for _ in 0..4 {
        session.record_at_bat(PlayInput::new(BattingResult::Walk)).unwrap();
    }
    let events = session.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[1], SessionEvent::Committed(summary) if summary.description == "walk by #4"));
}
