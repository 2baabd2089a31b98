//! Command-line arguments
//!
//! Without a subcommand the interactive terminal UI starts. The `run` and
//! `matches` subcommands drive the same core without a UI, for scripting.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::error::ValidationError;
use crate::upload::{PdfFile, ResumeSource, ResumeUpload};

/// Submit a resume, run the job-matching pipeline and browse ranked matches
#[derive(Parser, Debug, Clone)]
#[command(name = "job-matcher")]
#[command(about = "Submit a resume and watch the job-matching pipeline run")]
#[command(version)]
pub struct Args {
    /// Backend base URL (overrides JOB_MATCHER_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Write logs to this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Milliseconds to keep the completed graph on screen before showing results
    #[arg(long, value_name = "MS")]
    pub handoff_delay_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Upload a resume and run the pipeline without the terminal UI
    Run(RunArgs),

    /// Print the stored matches for an email address
    Matches {
        /// Email address the matches were recorded under
        #[arg(long, value_name = "EMAIL")]
        email: String,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Email address that receives the matches
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// PDF resume to upload
    #[arg(long, value_name = "PATH", conflicts_with = "resume_text")]
    pub resume_file: Option<PathBuf>,

    /// Resume as plain text
    #[arg(long, value_name = "TEXT")]
    pub resume_text: Option<String>,

    /// Do not ask the backend to email the results
    #[arg(long)]
    pub no_email: bool,
}

impl RunArgs {
    /// Build and validate the upload described by these flags
    pub fn to_upload(&self) -> Result<ResumeUpload, ValidationError> {
        let source = match (&self.resume_file, &self.resume_text) {
            (Some(path), _) => ResumeSource::Pdf(PdfFile::load(path)?),
            (None, Some(text)) => ResumeSource::Text(text.clone()),
            (None, None) => return Err(ValidationError::MissingResumeText),
        };

        let upload = ResumeUpload {
            user_email: self.email.trim().to_string(),
            source,
        };
        upload.validate()?;
        Ok(upload)
    }
}
