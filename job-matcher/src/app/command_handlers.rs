//! Handling of results reported by background tasks

use std::time::Instant;

use super::*;
use crate::orchestrator::EXECUTE_FAILED;
use crate::upload::UPLOAD_FAILED;

impl App {
    pub fn handle_background_event(&mut self, event: BackgroundEvent) {
        match event {
            BackgroundEvent::UploadFinished { user_email, result } => {
                self.uploading = false;
                match result {
                    Ok(resume) if self.orchestrator.register_upload(&resume.id, &user_email) => {
                        // A finished run waiting to open belongs to the old résumé
                        self.pending_handoff = None;
                        self.form.reset_resume();
                        self.notifications.success(
                            "Resume uploaded",
                            "Resume uploaded successfully! You can now run the workflow.",
                        );
                    }
                    Ok(_) => {
                        self.notifications.warning(
                            "Upload not applied",
                            "A workflow run started before the upload finished. Upload again once it completes.",
                        );
                    }
                    Err(err) => {
                        self.notifications
                            .error("Upload failed", err.user_message(UPLOAD_FAILED));
                    }
                }
            }

            BackgroundEvent::RunFinished(outcome) => match self.orchestrator.settle(outcome) {
                None => {}
                Some(Ok(handoff)) => {
                    let matched = self
                        .orchestrator
                        .jobs_matched()
                        .unwrap_or(handoff.matched_jobs.len() as u32);
                    let mut message = format!("Found {} matching jobs!", matched);
                    if self.config.workflow.send_email {
                        message.push_str(" Check your email.");
                    }
                    self.notifications.success("Workflow completed", message);
                    self.pending_handoff = Some(PendingHandoff {
                        due: Instant::now() + self.config.handoff_delay,
                        handoff,
                    });
                }
                Some(Err(err)) => {
                    self.notifications
                        .error("Workflow failed", err.user_message(EXECUTE_FAILED));
                }
            },

            BackgroundEvent::MatchesLoaded {
                user_email,
                list,
                error,
            } => {
                // A later refresh or navigation may have replaced the request
                if self.results_email.as_deref() != Some(user_email.as_str()) {
                    return;
                }
                self.results_loading = false;
                self.results = list;
                self.results_scroll = 0;
                if let Some(error) = error {
                    self.notifications.warning("Could not load matches", error);
                }
            }
        }
    }
}
