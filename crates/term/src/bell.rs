//! Audio feedback for terminals: the bell.

use std::io::{self, Write};

use crate::core::FeedbackSink;
use crate::types::FeedbackEvent;

/// Rings the terminal bell on clears and at game over.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalBell<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FeedbackSink for TerminalBell<W> {
    fn notify(&mut self, event: FeedbackEvent) {
        let rings = match event {
            FeedbackEvent::LinesCleared { .. } | FeedbackEvent::GameOver { .. } => 1,
            FeedbackEvent::Combo { .. } => 2,
            _ => return,
        };
        for _ in 0..rings {
            // Write failures are ignored; the turn has already happened.
            let _ = self.out.write_all(b"\x07");
        }
        let _ = self.out.flush();
    }
}
