//! HTTP client for the job-matcher backend
//!
//! [`JobMatcherApi`] is the seam between the client and the remote services.
//! [`HttpApi`] talks to the real backend; tests substitute their own
//! implementation.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use job_matcher_sdk::{ErrorBody, ExecutionRequest, ExecutionResult, JobMatch, UploadedResume};

use crate::config::Config;
use crate::error::ApiError;
use crate::upload::{ResumeSource, ResumeUpload, PDF_MIME};

#[async_trait]
pub trait JobMatcherApi: Send + Sync {
    /// `POST /api/resume/upload`
    async fn upload_resume(&self, upload: &ResumeUpload) -> Result<UploadedResume, ApiError>;

    /// `POST /api/workflow/execute?user_email=...`
    ///
    /// Resolves only once the whole pipeline has finished on the server.
    async fn execute_workflow(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ApiError>;

    /// `GET /api/jobs/matches/{user_email}`
    async fn fetch_matches(&self, user_email: &str) -> Result<Vec<JobMatch>, ApiError>;
}

pub struct HttpApi {
    client: Client,
    base_url: Url,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    /// Join `segments` under the base URL's path, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl JobMatcherApi for HttpApi {
    async fn upload_resume(&self, upload: &ResumeUpload) -> Result<UploadedResume, ApiError> {
        let url = self.endpoint(&["api", "resume", "upload"])?;

        let form = Form::new().text("user_email", upload.user_email.clone());
        let form = match &upload.source {
            ResumeSource::Text(text) => form.text("resume_text", text.clone()),
            ResumeSource::Pdf(file) => {
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.file_name.clone())
                    .mime_str(file.mime.as_deref().unwrap_or(PDF_MIME))?;
                form.part("file", part)
            }
        };

        debug!(%url, "Uploading resume");
        let response = self.client.post(url).multipart(form).send().await?;
        read_json(response).await
    }

    async fn execute_workflow(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ApiError> {
        let url = self.endpoint(&["api", "workflow", "execute"])?;

        debug!(%url, resume_id = %request.resume_id, sources = request.job_sources.len(), "Executing workflow");
        let response = self
            .client
            .post(url)
            .query(&[("user_email", request.user_email.as_str())])
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }

    async fn fetch_matches(&self, user_email: &str) -> Result<Vec<JobMatch>, ApiError> {
        let url = self.endpoint(&["api", "jobs", "matches", user_email])?;

        debug!(%url, "Fetching stored matches");
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }
}

/// Decode a JSON body, turning non-2xx responses into [`ApiError::Server`]
/// with the backend's `detail` message when it sent one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message());
        return Err(ApiError::Server {
            status: status.as_u16(),
            detail,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
