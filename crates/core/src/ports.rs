//! Collaborator traits the session talks to.
//!
//! Implementations must not fail: persistence problems are handled (and
//! logged) behind the trait so a turn always completes.

use std::cell::Cell;
use std::rc::Rc;

use crate::types::FeedbackEvent;

/// Persistence for the single best score.
pub trait HighScoreStore {
    /// Stored high score, or 0 when nothing has been saved yet.
    fn load_high_score(&mut self) -> u32;

    fn save_high_score(&mut self, score: u32);
}

/// In-memory store. Clones share the same value, so a test can keep one
/// handle and hand the other to a [`GameState`](crate::GameState).
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    value: Rc<Cell<u32>>,
    saves: Rc<Cell<u32>>,
}

impl MemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
            saves: Rc::new(Cell::new(0)),
        }
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// Number of `save_high_score` calls seen.
    pub fn save_count(&self) -> u32 {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load_high_score(&mut self) -> u32 {
        self.value.get()
    }

    fn save_high_score(&mut self, score: u32) {
        self.value.set(score);
        self.saves.set(self.saves.get() + 1);
    }
}

/// Receiver for fire-and-forget feedback events (audio, haptics, logging).
pub trait FeedbackSink {
    fn notify(&mut self, event: FeedbackEvent);
}

impl<F: FnMut(FeedbackEvent)> FeedbackSink for F {
    fn notify(&mut self, event: FeedbackEvent) {
        self(event)
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn notify(&mut self, _event: FeedbackEvent) {}
}
