//! Scoring session orchestrator.
//!
//! The session owns the action journal, the pitches of the at-bat in
//! progress and the event feed, and exposes a builder-based API for the
//! input wizard and the read-only collaborators.

use scorebook_core::{
    ActionJournal, ActionKind, ActionSummary, AtBat, BattingResult, DefensivePlay, GameAction,
    GameConfig, GameError, GameId, GameState, JournalEntry, Lineup, Pitch, PitchCount,
    Progression, RunnerAdvance, Scoreboard, StateError, SubstitutionError, SubstitutionKind,
    SubstitutionRecord, Timestamp, compute_forced_advances, compute_state_root,
};
use tracing::{debug, info, warn};

use crate::error::{Result, RuntimeError};
use crate::events::{EventFeed, SessionEvent};
use crate::view::{self, AtBatLine, FieldView, InfoBar};

/// Runtime configuration shared across the session.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
        }
    }
}

/// Source of at-bat and game-end timestamps.
pub type Clock = fn() -> Timestamp;

/// Wall-clock milliseconds since the Unix epoch.
pub fn utc_now() -> Timestamp {
    Timestamp::from_millis(chrono::Utc::now().timestamp_millis())
}

/// The scorer's finished description of a plate appearance.
///
/// Advances may be left empty (or partial); forced advances are filled in by
/// the engine. Runs batted in are derived unless the scorer sets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayInput {
    pub result: BattingResult,
    pub advances: Vec<RunnerAdvance>,
    pub rbis: Option<u8>,
    pub defense: Option<DefensivePlay>,
}

impl PlayInput {
    pub fn new(result: BattingResult) -> Self {
        Self {
            result,
            advances: Vec::new(),
            rbis: None,
            defense: None,
        }
    }

    pub fn advances(mut self, advances: impl IntoIterator<Item = RunnerAdvance>) -> Self {
        self.advances = advances.into_iter().collect();
        self
    }

    pub fn rbis(mut self, rbis: u8) -> Self {
        self.rbis = Some(rbis);
        self
    }

    pub fn defense(mut self, defense: DefensivePlay) -> Self {
        self.defense = Some(defense);
        self
    }
}

/// Live scoring session for one game.
pub struct ScoringSession {
    config: RuntimeConfig,
    journal: ActionJournal,
    pending_pitches: Vec<Pitch>,
    events: EventFeed,
    clock: Clock,
}

impl ScoringSession {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        self.journal.state()
    }

    pub fn journal(&self) -> &ActionJournal {
        &self.journal
    }

    // ===== at-bat in progress =====

    /// Adds a pitch to the at-bat in progress and returns the new count.
    pub fn record_pitch(&mut self, pitch: Pitch) -> Result<PitchCount> {
        if self.state().is_ended() {
            return Err(StateError::GameEnded.into());
        }
        self.pending_pitches.push(pitch);
        let count = self.pitch_count();
        debug!(?pitch, balls = count.balls, strikes = count.strikes, "pitch recorded");
        Ok(count)
    }

    pub fn pending_pitches(&self) -> &[Pitch] {
        &self.pending_pitches
    }

    pub fn pitch_count(&self) -> PitchCount {
        PitchCount::from_pitches(&self.pending_pitches)
    }

    /// Discards the pitches of the at-bat in progress.
    pub fn clear_pitches(&mut self) {
        self.pending_pitches.clear();
    }

    /// Forced advances for `result` on the current bases, as a starting
    /// point for the advance editor.
    pub fn suggest_advances(&self, result: &BattingResult) -> Vec<RunnerAdvance> {
        compute_forced_advances(
            self.state().bases.occupied(),
            result.batter_destination(),
            result.advance_reason(),
        )
        .into_iter()
        .collect()
    }

    // ===== actions =====

    /// Commits the at-bat in progress for the batter due up.
    ///
    /// The pending pitches become the at-bat's pitch sequence and are cleared
    /// only when the commit succeeds.
    pub fn record_at_bat(&mut self, play: PlayInput) -> Result<ActionSummary> {
        let due_up = self
            .state()
            .current_batter()
            .map(|slot| (slot.player_id, slot.batting_order));
        let (batter, batting_order) = match due_up {
            Some(due_up) if !self.state().is_ended() => due_up,
            _ => return self.reject(Some(ActionKind::RecordAtBat), StateError::GameEnded.into()),
        };

        let mut at_bat = AtBat::new(batter, batting_order, play.result, (self.clock)())
            .with_pitches(self.pending_pitches.clone())
            .with_advances(play.advances);
        at_bat.rbis = play.rbis;
        at_bat.defense = play.defense;

        let summary = self.commit(GameAction::record_at_bat(at_bat))?;
        self.pending_pitches.clear();
        Ok(summary)
    }

    /// Runs the substitution validator without committing anything.
    pub fn preflight(
        &self,
        record: &SubstitutionRecord,
    ) -> std::result::Result<(), Vec<SubstitutionError>> {
        self.journal.preflight_substitution(record)
    }

    pub fn substitute(&mut self, record: SubstitutionRecord) -> Result<ActionSummary> {
        let pinch_hitter = matches!(record.kind, SubstitutionKind::Batter { .. });
        if pinch_hitter && !self.pending_pitches.is_empty() {
            let error = RuntimeError::AtBatInProgress {
                pitches: self.pending_pitches.len(),
            };
            return self.reject(Some(ActionKind::ApplySubstitution), error);
        }
        if let Err(errors) = self.preflight(&record) {
            let error = RuntimeError::Substitution(errors);
            return self.reject(Some(ActionKind::ApplySubstitution), error);
        }
        self.commit(GameAction::substitute(record))
    }

    /// Ends the game now. Ending is final until [`Self::resume_game`].
    pub fn end_game(&mut self) -> Result<ActionSummary> {
        let summary = self.commit(GameAction::end_game((self.clock)()))?;
        self.pending_pitches.clear();
        Ok(summary)
    }

    pub fn resume_game(&mut self) -> Result<ActionSummary> {
        self.commit(GameAction::resume_game())
    }

    pub fn undo(&mut self) -> Result<ActionSummary> {
        let before = Progression::of(self.state());
        let summary = self.journal.undo().inspect_err(|error| {
            warn!(code = error.error_code(), %error, "undo rejected");
        })?;
        debug!(nonce = self.state().nonce, action = %summary.description, "undone");
        self.events.publish(SessionEvent::Undone(summary.clone()));
        self.publish_progression(before);
        Ok(summary)
    }

    pub fn redo(&mut self) -> Result<ActionSummary> {
        let before = Progression::of(self.state());
        let summary = self
            .journal
            .redo()
            .map(JournalEntry::summary)
            .inspect_err(|error| {
                warn!(code = error.error_code(), %error, "redo rejected");
            })?;
        debug!(nonce = summary.nonce, action = %summary.description, "redone");
        self.events.publish(SessionEvent::Redone(summary.clone()));
        self.publish_progression(before);
        Ok(summary)
    }

    pub fn can_undo(&self) -> bool {
        self.journal.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.journal.can_redo()
    }

    pub fn last_action(&self) -> Option<ActionSummary> {
        self.journal.last_action()
    }

    // ===== read models =====

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard::from_state(self.state(), &self.config.game_config)
    }

    pub fn field_view(&self) -> FieldView {
        FieldView::from_state(self.state())
    }

    pub fn info_bar(&self) -> InfoBar {
        InfoBar::from_state(self.state(), self.pitch_count())
    }

    pub fn history(&self) -> Vec<AtBatLine> {
        view::history(self.state())
    }

    /// Takes every event published since the last drain.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    // ===== snapshots =====

    /// Serializes the game state; the JSON schema is the persistence contract.
    pub fn to_snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.state())?)
    }

    /// Starts a session from a saved game state. The state is checked like a
    /// seed lineup. Undo history is not saved, so the new session starts with
    /// an empty journal.
    pub fn from_snapshot_json(json: &str, config: RuntimeConfig) -> Result<Self> {
        let state: GameState = serde_json::from_str(json)?;
        Self::builder().config(config).initial_state(state).build()
    }

    /// Hex SHA-256 of the current game state.
    pub fn state_root(&self) -> String {
        hex::encode(compute_state_root(self.state()))
    }

    // ===== internals =====

    fn commit(&mut self, action: GameAction) -> Result<ActionSummary> {
        let before = Progression::of(self.state());
        let kind = action.kind();
        match self.journal.commit(action) {
            Ok(entry) => {
                let summary = entry.summary();
                let follow_ups = entry.follow_ups.len();
                debug!(
                    nonce = summary.nonce,
                    kind = %kind,
                    action = %summary.description,
                    follow_ups,
                    "committed"
                );
                self.events.publish(SessionEvent::Committed(summary.clone()));
                self.publish_progression(before);
                Ok(summary)
            }
            Err(error) => self.reject(Some(kind), error.into()),
        }
    }

    fn reject<T>(&mut self, kind: Option<ActionKind>, error: RuntimeError) -> Result<T> {
        let code = error.error_code();
        let severity = error.severity().as_str();
        warn!(?kind, code, severity, %error, "action rejected");
        self.events.publish(SessionEvent::Rejected {
            kind,
            code: code.to_string(),
            message: error.to_string(),
        });
        Err(error)
    }

    fn publish_progression(&mut self, before: Progression) {
        let state = self.journal.state();
        let after = Progression::of(state);
        let Some(event) = SessionEvent::progression(before, after, state.end_time) else {
            return;
        };
        match &event {
            SessionEvent::HalfInningChanged { inning, half } => {
                info!(inning, %half, "half-inning changed");
            }
            SessionEvent::GameEnded { end_time } => {
                info!(
                    end_time = end_time.as_millis(),
                    away = state.totals.away.runs,
                    home = state.totals.home.runs,
                    "game ended"
                );
            }
            SessionEvent::GameResumed => info!("game resumed"),
            _ => {}
        }
        self.events.publish(event);
    }
}

/// Builder for [`ScoringSession`] with flexible configuration.
pub struct SessionBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    lineups: Option<(GameId, Timestamp, Lineup, Lineup)>,
    clock: Clock,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            lineups: None,
            clock: utc_now,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.config.event_buffer_size = size;
        self
    }

    /// Provide an already built game state (e.g. from a snapshot); it is
    /// validated on build
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Seed a new game from two lineup cards
    pub fn lineups(mut self, id: GameId, date: Timestamp, away: Lineup, home: Lineup) -> Self {
        self.lineups = Some((id, date, away, home));
        self
    }

    /// Replace the wall clock, e.g. with a fixed clock in tests
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> Result<ScoringSession> {
        let state = match (self.state, self.lineups) {
            (Some(state), _) => {
                state.validate().map_err(RuntimeError::InitialState)?;
                state
            }
            (None, Some((id, date, away, home))) => {
                GameState::new(id, date, away, home).map_err(RuntimeError::InitialState)?
            }
            (None, None) => return Err(RuntimeError::MissingInitialState),
        };

        info!(
            game = %state.id,
            inning = state.inning,
            half = %state.half,
            nonce = state.nonce,
            "scoring session ready"
        );

        Ok(ScoringSession {
            journal: ActionJournal::new(self.config.game_config.clone(), state),
            events: EventFeed::with_capacity(self.config.event_buffer_size),
            pending_pitches: Vec::new(),
            clock: self.clock,
            config: self.config,
        })
    }
}
