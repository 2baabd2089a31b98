//! Request and response payloads of the job-matcher HTTP API

use serde::{Deserialize, Serialize};

use crate::status::RunStatus;

/// Job boards searched when the caller does not choose its own list
pub const DEFAULT_JOB_SOURCES: [&str; 8] = [
    "linkedin",
    "indeed",
    "jobrights",
    "startups_gallery",
    "briansjobs",
    "glassdoor",
    "ycombinator",
    "wellfound",
];

/// Body of `POST /api/workflow/execute`
///
/// `user_email` travels as a query parameter, not in the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    #[serde(skip)]
    pub user_email: String,
    pub resume_id: String,
    pub job_sources: Vec<String>,
    pub send_email: bool,
}

impl ExecutionRequest {
    pub fn new(resume_id: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            user_email: user_email.into(),
            resume_id: resume_id.into(),
            job_sources: DEFAULT_JOB_SOURCES.iter().map(|s| s.to_string()).collect(),
            send_email: true,
        }
    }
}

/// Terminal payload returned by the execution service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs_found: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs_matched: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_jobs: Option<Vec<JobMatch>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// How a 2xx execution response should be treated
#[derive(Debug, Clone, PartialEq)]
pub enum ResultVerdict {
    Completed,
    Failed(String),
}

impl ExecutionResult {
    /// Error text, with an empty string treated as absent
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }

    /// A non-empty `error` always means failure. Otherwise the status string
    /// decides, and anything other than a completed status is a failure.
    pub fn verdict(&self) -> ResultVerdict {
        if let Some(message) = self.error_message() {
            return ResultVerdict::Failed(message.to_string());
        }

        match RunStatus::from_wire(&self.status) {
            Some(RunStatus::Completed) => ResultVerdict::Completed,
            Some(RunStatus::Failed) => ResultVerdict::Failed("Workflow failed".to_string()),
            _ => ResultVerdict::Failed(format!(
                "Unexpected workflow status '{}'",
                self.status
            )),
        }
    }
}

/// One ranked job result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobMatch {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 0-100
    #[serde(default)]
    pub match_score: f64,
    #[serde(default)]
    pub match_reason: String,
}

/// Response of `POST /api/resume/upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedResume {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default)]
    pub parsed_skills: Vec<String>,
}

/// Error body of a non-2xx response
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorBody {
    /// `detail` is usually a string but validation errors send a list
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) if text.trim().is_empty() => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}
