use block_blast_core::FeedbackSink;
use block_blast_types::FeedbackEvent;

/// Sink that records every event through the `log` facade.
///
/// Useful as a stand-in audio or haptic collaborator when none is available.
#[derive(Debug, Clone)]
pub struct LogFeedback {
    channel: &'static str,
}

impl LogFeedback {
    pub fn new(channel: &'static str) -> Self {
        Self { channel }
    }
}

impl FeedbackSink for LogFeedback {
    fn notify(&mut self, event: FeedbackEvent) {
        match event {
            FeedbackEvent::GameOver { .. } | FeedbackEvent::Combo { .. } => {
                log::info!(target: "block_blast::feedback", "[{}] {event:?}", self.channel)
            }
            _ => log::debug!(target: "block_blast::feedback", "[{}] {event:?}", self.channel),
        }
    }
}
