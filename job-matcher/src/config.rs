//! Runtime configuration
//!
//! Values come from the environment (a `.env` file is honoured) and can be
//! overridden by command-line flags. The resulting [`Config`] is passed into
//! the API client and orchestrator explicitly.

use anyhow::{Context, Result};
use job_matcher_sdk::DEFAULT_JOB_SOURCES;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Args;

pub const DEFAULT_API_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_HANDOFF_DELAY_MS: u64 = 2000;

/// Settings copied into every execution request
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSettings {
    pub job_sources: Vec<String>,
    pub send_email: bool,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            job_sources: DEFAULT_JOB_SOURCES.iter().map(|s| s.to_string()).collect(),
            send_email: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL, without the `/api` suffix
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Pause between a completed run and the switch to the results view
    pub handoff_delay: Duration,
    pub workflow: WorkflowSettings,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            handoff_delay: Duration::from_millis(DEFAULT_HANDOFF_DELAY_MS),
            workflow: WorkflowSettings::default(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load from process environment, reading `.env` if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(url) = lookup("JOB_MATCHER_API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_base_url = normalize_base_url(&url);
        }

        if let Some(secs) = lookup("JOB_MATCHER_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .context("JOB_MATCHER_TIMEOUT_SECS must be a whole number of seconds")?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(ms) = lookup("JOB_MATCHER_HANDOFF_DELAY_MS") {
            let ms = ms
                .trim()
                .parse::<u64>()
                .context("JOB_MATCHER_HANDOFF_DELAY_MS must be a whole number of milliseconds")?;
            config.handoff_delay = Duration::from_millis(ms);
        }

        if let Some(sources) = lookup("JOB_MATCHER_JOB_SOURCES") {
            let sources: Vec<String> = sources
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if sources.is_empty() {
                anyhow::bail!("JOB_MATCHER_JOB_SOURCES must name at least one source");
            }
            config.workflow.job_sources = sources;
        }

        if let Some(flag) = lookup("JOB_MATCHER_SEND_EMAIL") {
            config.workflow.send_email = parse_bool(&flag)
                .with_context(|| format!("JOB_MATCHER_SEND_EMAIL has invalid value '{}'", flag))?;
        }

        if let Some(path) = lookup("JOB_MATCHER_LOG_FILE").filter(|v| !v.trim().is_empty()) {
            config.log_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Command-line flags take precedence over the environment
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(url) = &args.api_url {
            self.api_base_url = normalize_base_url(url);
        }
        if let Some(ms) = args.handoff_delay_ms {
            self.handoff_delay = Duration::from_millis(ms);
        }
        if let Some(path) = &args.log_file {
            self.log_file = Some(path.clone());
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("expected true or false"),
    }
}
