//! Session events for UI toasts.
//!
//! Events are pushed into a bounded [`EventFeed`]; when the feed is full the
//! oldest event is dropped. The UI drains it after every interaction.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use scorebook_core::{ActionKind, ActionSummary, Half, Progression, Timestamp};

/// Something the scorer should be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// An action was committed to the journal.
    Committed(ActionSummary),

    /// The newest entry was taken back.
    Undone(ActionSummary),

    /// An undone entry was applied again.
    Redone(ActionSummary),

    /// Play moved to a new half-inning.
    HalfInningChanged { inning: u8, half: Half },

    GameEnded { end_time: Timestamp },

    GameResumed,

    /// An action failed validation; nothing changed.
    Rejected {
        kind: Option<ActionKind>,
        code: String,
        message: String,
    },
}

impl SessionEvent {
    /// Events describing how the game moved from `before` to `after`.
    pub(crate) fn progression(
        before: Progression,
        after: Progression,
        end_time: Option<Timestamp>,
    ) -> Option<SessionEvent> {
        if before == after {
            return None;
        }
        match (before, after) {
            (_, Progression::GameEnded) => end_time.map(|end_time| SessionEvent::GameEnded { end_time }),
            (Progression::GameEnded, _) => Some(SessionEvent::GameResumed),
            (_, Progression::TopHalf(inning)) => Some(SessionEvent::HalfInningChanged {
                inning,
                half: Half::Top,
            }),
            (_, Progression::BottomHalf(inning)) => Some(SessionEvent::HalfInningChanged {
                inning,
                half: Half::Bottom,
            }),
        }
    }
}

/// Bounded queue of pending [`SessionEvent`]s.
#[derive(Debug, Clone)]
pub struct EventFeed {
    capacity: usize,
    events: VecDeque<SessionEvent>,
}

impl EventFeed {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
        }
    }

    pub fn publish(&mut self, event: SessionEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<SessionEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
