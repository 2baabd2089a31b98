//! Workflow orchestrator
//!
//! Owns the run record for one user session and is its only writer. A run is
//! started with [`Orchestrator::dispatch`], which hands back a `'static`
//! future so the caller decides where it runs, and finished with
//! [`Orchestrator::settle`]. [`Orchestrator::execute`] does both for callers
//! that can simply await.

use chrono::{DateTime, Local};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use job_matcher_sdk::{ExecutionRequest, ExecutionResult, JobMatch, ResultVerdict, RunStatus};

use crate::api::JobMatcherApi;
use crate::config::WorkflowSettings;
use crate::error::{ApiError, JobMatcherError};
use crate::projector::{project, Projection};
use crate::upload::{self, ResumeUpload};

pub const EXECUTE_FAILED: &str = "Failed to execute workflow";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUpload {
    pub resume_id: String,
    pub user_email: String,
}

/// Everything the client knows about the current run
#[derive(Debug, Clone, Default)]
pub struct RunRecord {
    pub status: RunStatus,
    pub jobs_found: Option<u32>,
    pub jobs_matched: Option<u32>,
    pub matched_jobs: Vec<JobMatch>,
    pub error: Option<String>,
    pub started_at: Option<DateTime<Local>>,
    pub finished_at: Option<DateTime<Local>>,
}

/// Result of a dispatched request, tagged with the generation that issued it
/// and the email the request was made for
#[derive(Debug)]
pub struct RunOutcome {
    pub generation: u64,
    pub user_email: String,
    pub result: Result<ExecutionResult, ApiError>,
}

/// Payload passed to match presentation after a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub user_email: String,
    pub matched_jobs: Vec<JobMatch>,
}

pub struct Orchestrator {
    api: Arc<dyn JobMatcherApi>,
    settings: WorkflowSettings,
    upload: Option<RegisteredUpload>,
    run: RunRecord,
    generation: u64,
    in_flight: Option<u64>,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn JobMatcherApi>, settings: &WorkflowSettings) -> Self {
        Self {
            api,
            settings: settings.clone(),
            upload: None,
            run: RunRecord::default(),
            generation: 0,
            in_flight: None,
        }
    }

    pub fn api(&self) -> Arc<dyn JobMatcherApi> {
        Arc::clone(&self.api)
    }

    /// Remember the uploaded résumé for the next run. Returns false, leaving
    /// any earlier registration in place, when the id or email is empty or a
    /// run is in flight.
    pub fn register_upload(&mut self, resume_id: &str, user_email: &str) -> bool {
        let user_email = user_email.trim();
        if resume_id.trim().is_empty() || user_email.is_empty() {
            debug!("Ignoring upload registration without a resume id or email");
            return false;
        }
        if let Some(generation) = self.in_flight {
            warn!(generation, resume_id, "Ignoring upload registration while a run is in flight");
            return false;
        }

        self.upload = Some(RegisteredUpload {
            resume_id: resume_id.to_string(),
            user_email: user_email.to_string(),
        });
        true
    }

    /// Validate and send a résumé, registering it on success
    pub async fn upload(&mut self, request: &ResumeUpload) -> Result<String, JobMatcherError> {
        if self.in_flight.is_some() {
            return Err(JobMatcherError::AlreadyRunning);
        }
        let resume = upload::submit(self.api.as_ref(), request).await?;
        self.register_upload(&resume.id, &request.user_email);
        Ok(resume.id)
    }

    /// Start a run. The status is `running` by the time this returns; the
    /// returned future performs the request and must be passed to
    /// [`settle`](Self::settle).
    pub fn dispatch(&mut self) -> Result<BoxFuture<'static, RunOutcome>, JobMatcherError> {
        if self.in_flight.is_some() {
            return Err(JobMatcherError::AlreadyRunning);
        }
        let Some(registered) = self.upload.as_ref() else {
            return Err(JobMatcherError::MissingPrerequisite);
        };

        let request = ExecutionRequest {
            user_email: registered.user_email.clone(),
            resume_id: registered.resume_id.clone(),
            job_sources: self.settings.job_sources.clone(),
            send_email: self.settings.send_email,
        };

        self.generation += 1;
        let generation = self.generation;
        self.in_flight = Some(generation);
        self.run = RunRecord {
            status: RunStatus::Running,
            started_at: Some(Local::now()),
            ..Default::default()
        };

        info!(
            generation,
            resume_id = %request.resume_id,
            user_email = %request.user_email,
            "Workflow run started"
        );

        let api = Arc::clone(&self.api);
        Ok(async move {
            let result = api.execute_workflow(&request).await;
            RunOutcome {
                generation,
                user_email: request.user_email,
                result,
            }
        }
        .boxed())
    }

    /// Apply a finished request. Returns `None` when the outcome belongs to
    /// a run that has since been detached.
    pub fn settle(&mut self, outcome: RunOutcome) -> Option<Result<Handoff, JobMatcherError>> {
        if self.in_flight != Some(outcome.generation) {
            debug!(
                generation = outcome.generation,
                current = self.generation,
                "Discarding stale workflow response"
            );
            return None;
        }
        self.in_flight = None;
        self.run.finished_at = Some(Local::now());

        let RunOutcome { user_email, result, .. } = outcome;
        let result = match result {
            Ok(result) => result,
            Err(err) => {
                let err = JobMatcherError::Transport(err);
                let message = err.user_message(EXECUTE_FAILED);
                warn!(error = %err, "Workflow request failed");
                self.fail(message);
                return Some(Err(err));
            }
        };

        match result.verdict() {
            ResultVerdict::Completed => {
                let matched_jobs = result.matched_jobs.unwrap_or_default();
                self.run.status = RunStatus::Completed;
                self.run.jobs_found = result.jobs_found;
                self.run.jobs_matched = result.jobs_matched;
                self.run.matched_jobs = matched_jobs.clone();

                info!(
                    execution_id = result.execution_id.as_deref().unwrap_or("-"),
                    jobs_found = result.jobs_found.unwrap_or(0),
                    jobs_matched = result.jobs_matched.unwrap_or(0),
                    "Workflow run completed"
                );

                Some(Ok(Handoff {
                    user_email,
                    matched_jobs,
                }))
            }
            ResultVerdict::Failed(message) => {
                warn!(status = %result.status, error = %message, "Workflow reported failure");
                self.run.jobs_found = result.jobs_found;
                self.run.jobs_matched = result.jobs_matched;
                self.fail(message.clone());
                Some(Err(JobMatcherError::ServerReportedFailure(message)))
            }
        }
    }

    /// Dispatch and await a run in one step
    pub async fn execute(&mut self) -> Result<Handoff, JobMatcherError> {
        let request = self.dispatch()?;
        let outcome = request.await;
        self.settle(outcome).unwrap_or(Err(JobMatcherError::Superseded))
    }

    /// Forget the current run. A response still in flight will be discarded
    /// when it arrives. The registered upload is kept.
    pub fn detach(&mut self) {
        if self.in_flight.take().is_some() {
            info!(generation = self.generation, "Detached from running workflow");
        }
        self.generation += 1;
        self.run = RunRecord::default();
    }

    fn fail(&mut self, message: String) {
        self.run.status = RunStatus::Failed;
        self.run.error = Some(message);
    }

    pub fn status(&self) -> RunStatus {
        self.run.status
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn run(&self) -> &RunRecord {
        &self.run
    }

    pub fn jobs_found(&self) -> Option<u32> {
        self.run.jobs_found
    }

    pub fn jobs_matched(&self) -> Option<u32> {
        self.run.jobs_matched
    }

    pub fn error(&self) -> Option<&str> {
        self.run.error.as_deref()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.upload.as_ref().map(|u| u.user_email.as_str())
    }

    pub fn resume_id(&self) -> Option<&str> {
        self.upload.as_ref().map(|u| u.resume_id.as_str())
    }

    pub fn has_upload(&self) -> bool {
        self.upload.is_some()
    }

    pub fn projection(&self) -> Projection {
        project(self.run.status)
    }
}
