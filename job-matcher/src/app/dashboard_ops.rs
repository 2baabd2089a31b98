//! Dashboard actions: form editing, résumé upload and starting a run

use tracing::info;

use super::*;
use crate::orchestrator::EXECUTE_FAILED;
use crate::upload::{self, UploadMode};

impl App {
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Current value of a text row
    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Email => &self.form.email,
            FormField::Mode => self.form.mode.label(),
            FormField::Resume => match self.form.mode {
                UploadMode::Text => &self.form.resume_text,
                UploadMode::File => &self.form.file_path,
            },
        }
    }

    fn field_value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Email => Some(&mut self.form.email),
            FormField::Mode => None,
            FormField::Resume => Some(match self.form.mode {
                UploadMode::Text => &mut self.form.resume_text,
                UploadMode::File => &mut self.form.file_path,
            }),
        }
    }

    /// Enter on a row: edit text rows, flip the mode row
    pub fn activate_field(&mut self) {
        if self.focus.is_text() {
            self.edit_buffer = self.field_value(self.focus).to_string();
            self.is_editing = true;
        } else {
            self.form.mode = self.form.mode.toggle();
        }
    }

    pub fn save_edit(&mut self) {
        let buffer = std::mem::take(&mut self.edit_buffer);
        if let Some(value) = self.field_value_mut(self.focus) {
            *value = buffer;
        }
        self.is_editing = false;
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.is_editing = false;
    }

    /// Pasted text goes into the field being edited, or starts editing the
    /// focused text row
    pub fn paste(&mut self, text: &str) {
        if !self.focus.is_text() {
            return;
        }
        if !self.is_editing {
            self.activate_field();
        }
        let text = if self.focus == FormField::Email || self.form.mode == UploadMode::File {
            text.trim().replace(['\r', '\n'], "")
        } else {
            text.replace("\r\n", "\n").replace('\r', "\n")
        };
        self.edit_buffer.push_str(&text);
    }

    /// Validate the form and send the upload in the background
    pub fn submit_upload(&mut self) {
        if self.uploading {
            self.notifications
                .warning("Upload in progress", "Please wait for the current upload to finish");
            return;
        }
        if self.orchestrator.is_running() {
            self.notifications
                .warning("Workflow running", "Please wait for the workflow to finish before uploading");
            return;
        }

        let upload = match self.form.build() {
            Ok(upload) => upload,
            Err(err) => {
                self.notifications.error("Invalid input", err.to_string());
                return;
            }
        };

        self.uploading = true;
        let api = self.orchestrator.api();
        let tx = self.events_tx.clone();
        self.tokio_runtime.spawn(async move {
            let result = upload::submit(api.as_ref(), &upload).await;
            let _ = tx.send(BackgroundEvent::UploadFinished {
                user_email: upload.user_email,
                result,
            });
        });
    }

    /// Dispatch a run; its result arrives as [`BackgroundEvent::RunFinished`]
    pub fn start_run(&mut self) {
        let request = match self.orchestrator.dispatch() {
            Ok(request) => request,
            Err(err) => {
                self.notifications
                    .error("Cannot run workflow", err.user_message(EXECUTE_FAILED));
                return;
            }
        };

        self.pending_handoff = None;
        let tx = self.events_tx.clone();
        self.tokio_runtime.spawn(async move {
            let outcome = request.await;
            let _ = tx.send(BackgroundEvent::RunFinished(outcome));
        });

        info!("Workflow dispatched from dashboard");
        self.notifications.info(
            "Workflow started",
            "Running the job matcher, this may take a few minutes",
        );
    }
}
