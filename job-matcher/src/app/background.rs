//! Draining background results and per-frame housekeeping

use std::time::Instant;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::debug;

use super::*;

impl App {
    /// Apply every background result that has arrived. Never blocks.
    pub fn poll_background(&mut self) {
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => self.handle_background_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("Background channel closed");
                    break;
                }
            }
        }
    }

    /// Called once per frame
    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.notifications.cleanup_expired();
        self.poll_background();

        let due = self
            .pending_handoff
            .as_ref()
            .is_some_and(|pending| pending.due <= Instant::now());
        if due {
            if let Some(pending) = self.pending_handoff.take() {
                self.open_results_with(Some(pending.handoff));
            }
        }
    }
}
