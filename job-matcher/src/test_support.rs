//! Fixtures shared by the unit tests

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

use job_matcher_sdk::{ExecutionRequest, ExecutionResult, JobMatch, UploadedResume};

use crate::api::JobMatcherApi;
use crate::app::App;
use crate::error::ApiError;
use crate::upload::ResumeUpload;

pub fn job(title: &str, score: f64) -> JobMatch {
    JobMatch {
        title: title.to_string(),
        company: "Acme".to_string(),
        url: format!("https://jobs.example/{}", title.to_lowercase()),
        source: "linkedin".to_string(),
        match_score: score,
        match_reason: format!("{} fits", title),
        ..Default::default()
    }
}

/// Answers every call immediately
#[derive(Default)]
pub struct StubApi {
    pub result: ExecutionResult,
    pub matches: Vec<JobMatch>,
    pub fail_matches: bool,
}

impl StubApi {
    pub fn shared() -> Arc<dyn JobMatcherApi> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl JobMatcherApi for StubApi {
    async fn upload_resume(&self, _upload: &ResumeUpload) -> Result<UploadedResume, ApiError> {
        Ok(UploadedResume {
            id: "r-stub".to_string(),
            user_id: None,
            file_name: None,
            file_type: None,
            parsed_skills: Vec::new(),
        })
    }

    async fn execute_workflow(
        &self,
        _request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ApiError> {
        Ok(self.result.clone())
    }

    async fn fetch_matches(&self, _user_email: &str) -> Result<Vec<JobMatch>, ApiError> {
        if self.fail_matches {
            return Err(ApiError::Server {
                status: 500,
                detail: None,
            });
        }
        Ok(self.matches.clone())
    }
}

/// Tick the app until `done` holds, failing the test after two seconds
pub fn wait_for(app: &mut App, done: impl Fn(&App) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !done(app) {
        assert!(Instant::now() < deadline, "timed out waiting for background work");
        std::thread::sleep(Duration::from_millis(5));
        app.on_tick();
    }
}
