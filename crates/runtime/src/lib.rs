//! Runtime orchestration for live game scoring.
//!
//! This crate wraps the deterministic [`scorebook_core`] engine with the
//! pieces a scoring client needs: a wall clock for timestamps, the pitches of
//! the at-bat in progress, structured logging, an event feed for UI toasts,
//! read models for the field and info bar, and JSON snapshots. Consumers embed
//! [`ScoringSession`] and drive it through its builder.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`events`] provides the bounded event feed
//! - [`view`] derives display-ready read models from the game state
//! - [`error`] unifies failures surfaced by the runtime API
pub mod error;
pub mod events;
pub mod session;
pub mod view;

pub use error::{Result, RuntimeError};
pub use events::{EventFeed, SessionEvent};
pub use session::{
    Clock, PlayInput, RuntimeConfig, ScoringSession, SessionBuilder, utc_now,
};
pub use view::{AtBatLine, BaseRunner, FieldView, InfoBar, history};
