//! Error taxonomy for the client
//!
//! Every error is handled at the boundary where it happens (upload form,
//! run trigger) and turned into a notification for the user.

use thiserror::Error;

/// Failures talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid API base URL '{0}'")]
    InvalidUrl(String),
}

impl ApiError {
    /// Server-provided detail message, if the backend sent one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Input problems caught before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your email address")]
    MissingEmail,

    #[error("Please paste your resume text")]
    MissingResumeText,

    #[error("Please select a PDF file")]
    MissingFile,

    #[error("Please upload a PDF file ({file_name} is not a PDF)")]
    NotPdf { file_name: String },

    #[error("{file_name} is {size} bytes; the limit is {limit} bytes")]
    FileTooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },

    #[error("Could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum JobMatcherError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Please upload your resume first")]
    MissingPrerequisite,

    #[error("A workflow run is already in progress")]
    AlreadyRunning,

    #[error("Request failed: {0}")]
    Transport(#[from] ApiError),

    #[error("Workflow failed: {0}")]
    ServerReportedFailure(String),

    #[error("The run was superseded before its result arrived")]
    Superseded,
}

impl JobMatcherError {
    /// Text shown to the user. Transport errors show the server detail when
    /// there is one and `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            JobMatcherError::Transport(err) => err
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
            JobMatcherError::ServerReportedFailure(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
