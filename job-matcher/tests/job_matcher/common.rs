//! Common test utilities for job-matcher tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use job_matcher::api::JobMatcherApi;
use job_matcher::config::WorkflowSettings;
use job_matcher::error::ApiError;
use job_matcher::orchestrator::Orchestrator;
use job_matcher::upload::ResumeUpload;
use job_matcher_sdk::{ExecutionRequest, ExecutionResult, JobMatch, UploadedResume};

/// One scripted answer to `execute_workflow`
#[derive(Debug, Clone)]
pub enum Reply {
    Result(ExecutionResult),
    ServerError { status: u16, detail: Option<String> },
}

/// Mock backend that counts every call and answers from a script
#[derive(Default)]
pub struct MockApi {
    pub upload_calls: AtomicUsize,
    pub execute_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    pub replies: Mutex<VecDeque<Reply>>,
    pub stored_matches: Mutex<Vec<JobMatch>>,
    pub requests: Mutex<Vec<ExecutionRequest>>,
    /// When set, `execute_workflow` waits for a permit before answering
    pub gate: Option<Arc<Notify>>,
}

impl MockApi {
    pub fn replying(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    pub fn gated(replies: Vec<Reply>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::replying(replies)
        }
    }

    pub fn executes(&self) -> usize {
        self.execute_calls.load(Ordering::SeqCst)
    }

    pub fn uploads(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobMatcherApi for MockApi {
    async fn upload_resume(&self, _upload: &ResumeUpload) -> Result<UploadedResume, ApiError> {
        let n = self.upload_calls.fetch_add(1, Ordering::SeqCst);
        Ok(UploadedResume {
            id: format!("r{}", n + 1),
            user_id: None,
            file_name: None,
            file_type: None,
            parsed_skills: vec!["Rust".to_string()],
        })
    }

    async fn execute_workflow(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ApiError> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Result(result)) => Ok(result),
            Some(Reply::ServerError { status, detail }) => Err(ApiError::Server { status, detail }),
            None => Err(ApiError::Server {
                status: 500,
                detail: Some("no scripted reply".to_string()),
            }),
        }
    }

    async fn fetch_matches(&self, _user_email: &str) -> Result<Vec<JobMatch>, ApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored_matches.lock().unwrap().clone())
    }
}

pub fn orchestrator(api: &Arc<MockApi>) -> Orchestrator {
    Orchestrator::new(api.clone(), &WorkflowSettings::default())
}

pub fn sample_job(title: &str, company: &str, score: f64) -> JobMatch {
    JobMatch {
        title: title.to_string(),
        company: company.to_string(),
        location: Some("Remote".to_string()),
        url: format!("https://jobs.example/{}", title.to_lowercase().replace(' ', "-")),
        source: "linkedin".to_string(),
        description: None,
        match_score: score,
        match_reason: format!("{} experience lines up", title),
    }
}

pub fn completed(found: u32, jobs: Vec<JobMatch>) -> Reply {
    Reply::Result(ExecutionResult {
        status: "completed".to_string(),
        execution_id: Some("x1".to_string()),
        jobs_found: Some(found),
        jobs_matched: Some(jobs.len() as u32),
        matched_jobs: Some(jobs),
        error: Some(String::new()),
    })
}

pub fn failed(error: &str) -> Reply {
    Reply::Result(ExecutionResult {
        status: "failed".to_string(),
        error: Some(error.to_string()),
        ..Default::default()
    })
}
