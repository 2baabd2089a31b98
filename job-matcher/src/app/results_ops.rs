//! Results view: entering, refreshing, scrolling and leaving

use tracing::info;

use super::*;
use crate::matches::{self, ResultsEntry};
use crate::orchestrator::Handoff;

impl App {
    /// Switch to results from the dashboard key binding. A run still in
    /// flight is detached; a completed run waiting out its delay is shown
    /// straight away.
    pub fn open_results(&mut self) {
        let handoff = self.pending_handoff.take().map(|pending| pending.handoff);
        if handoff.is_none() && self.orchestrator.is_running() {
            self.orchestrator.detach();
            self.notifications.warning(
                "Run detached",
                "The workflow keeps running on the server; its result will not be shown here",
            );
        }
        self.open_results_with(handoff);
    }

    pub fn open_results_with(&mut self, handoff: Option<Handoff>) {
        let email = self
            .orchestrator
            .user_email()
            .map(str::to_string)
            .or_else(|| Some(self.form.email.clone()));
        let entry = ResultsEntry::from_parts(handoff, email.as_deref());

        self.current_view = View::Results;
        self.results_scroll = 0;
        self.results_email = entry.user_email().map(str::to_string);
        self.load_results(entry);
    }

    /// Re-query stored matches for the current email
    pub fn refresh_results(&mut self) {
        let entry = ResultsEntry::from_parts(None, self.results_email.as_deref());
        if entry == ResultsEntry::Empty {
            self.notifications
                .info("Nothing to refresh", "Enter your email on the dashboard first");
            return;
        }
        self.load_results(entry);
    }

    fn load_results(&mut self, entry: ResultsEntry) {
        match entry {
            ResultsEntry::Requery { user_email } => {
                info!(user_email = %user_email, "Loading stored matches");
                self.results_loading = true;
                let api = self.orchestrator.api();
                let tx = self.events_tx.clone();
                self.tokio_runtime.spawn(async move {
                    let (list, error) = matches::load(
                        api.as_ref(),
                        ResultsEntry::Requery {
                            user_email: user_email.clone(),
                        },
                    )
                    .await;
                    let _ = tx.send(BackgroundEvent::MatchesLoaded {
                        user_email,
                        list,
                        error,
                    });
                });
            }
            ResultsEntry::Handoff(handoff) => {
                self.results_loading = false;
                self.results = MatchList::new(handoff.matched_jobs);
            }
            ResultsEntry::Empty => {
                self.results_loading = false;
                self.results = MatchList::default();
            }
        }
    }

    pub fn back_to_dashboard(&mut self) {
        self.current_view = View::Dashboard;
    }

    pub fn scroll_results_down(&mut self) {
        if self.results_scroll + 1 < self.results.len() {
            self.results_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }
}
