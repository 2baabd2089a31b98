//! Resume submission: form model, client-side validation and the upload call

use std::path::Path;
use tracing::{info, warn};

use job_matcher_sdk::UploadedResume;

use crate::api::JobMatcherApi;
use crate::error::{JobMatcherError, ValidationError};

/// Practical cap on PDF uploads
pub const MAX_PDF_BYTES: u64 = 5 * 1024 * 1024;

pub const PDF_MIME: &str = "application/pdf";

pub const UPLOAD_FAILED: &str = "Failed to upload resume";

/// A PDF read from disk, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct PdfFile {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl PdfFile {
    /// Read a PDF from `path`. The extension is checked before the file is
    /// opened so a wrong file type never touches the disk.
    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        if !is_pdf(&file_name, None) {
            return Err(ValidationError::NotPdf { file_name });
        }

        let unreadable = |err: std::io::Error| ValidationError::Unreadable {
            path: path.display().to_string(),
            reason: err.to_string(),
        };

        let size = std::fs::metadata(path).map_err(unreadable)?.len();
        if size > MAX_PDF_BYTES {
            return Err(ValidationError::FileTooLarge {
                file_name,
                size,
                limit: MAX_PDF_BYTES,
            });
        }

        let bytes = std::fs::read(path).map_err(unreadable)?;
        Ok(Self {
            file_name,
            mime: Some(PDF_MIME.to_string()),
            bytes,
        })
    }
}

/// A PDF is recognised by MIME type or by a `.pdf` extension
pub fn is_pdf(file_name: &str, mime: Option<&str>) -> bool {
    mime.is_some_and(|m| m.eq_ignore_ascii_case(PDF_MIME))
        || file_name.to_ascii_lowercase().ends_with(".pdf")
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResumeSource {
    Text(String),
    Pdf(PdfFile),
}

/// One upload request: the user's email plus the resume itself
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeUpload {
    pub user_email: String,
    pub source: ResumeSource,
}

impl ResumeUpload {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_email.trim().is_empty() {
            return Err(ValidationError::MissingEmail);
        }

        match &self.source {
            ResumeSource::Text(text) if text.trim().is_empty() => {
                Err(ValidationError::MissingResumeText)
            }
            ResumeSource::Text(_) => Ok(()),
            ResumeSource::Pdf(file) => {
                if !is_pdf(&file.file_name, file.mime.as_deref()) {
                    return Err(ValidationError::NotPdf {
                        file_name: file.file_name.clone(),
                    });
                }
                let size = file.bytes.len() as u64;
                if size > MAX_PDF_BYTES {
                    return Err(ValidationError::FileTooLarge {
                        file_name: file.file_name.clone(),
                        size,
                        limit: MAX_PDF_BYTES,
                    });
                }
                Ok(())
            }
        }
    }
}

/// Which input the form sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMode {
    #[default]
    Text,
    File,
}

impl UploadMode {
    pub fn toggle(self) -> Self {
        match self {
            UploadMode::Text => UploadMode::File,
            UploadMode::File => UploadMode::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UploadMode::Text => "Text",
            UploadMode::File => "PDF",
        }
    }
}

/// Editable dashboard form
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub email: String,
    pub mode: UploadMode,
    pub resume_text: String,
    pub file_path: String,
}

impl UploadForm {
    /// Validate the form and build the upload. Checks run in the order the
    /// user sees the fields: email first, then the active resume input.
    pub fn build(&self) -> Result<ResumeUpload, ValidationError> {
        let user_email = self.email.trim();
        if user_email.is_empty() {
            return Err(ValidationError::MissingEmail);
        }

        let source = match self.mode {
            UploadMode::Text => ResumeSource::Text(self.resume_text.clone()),
            UploadMode::File => {
                let path = self.file_path.trim();
                if path.is_empty() {
                    return Err(ValidationError::MissingFile);
                }
                ResumeSource::Pdf(PdfFile::load(Path::new(path))?)
            }
        };

        let upload = ResumeUpload {
            user_email: user_email.to_string(),
            source,
        };
        upload.validate()?;
        Ok(upload)
    }

    /// Clear the resume inputs after a successful upload; the email stays
    pub fn reset_resume(&mut self) {
        self.resume_text.clear();
        self.file_path.clear();
    }
}

/// Validate and send an upload. Nothing goes over the wire unless the
/// upload passes validation.
pub async fn submit(
    api: &dyn JobMatcherApi,
    upload: &ResumeUpload,
) -> Result<UploadedResume, JobMatcherError> {
    upload.validate()?;

    match api.upload_resume(upload).await {
        Ok(resume) => {
            info!(resume_id = %resume.id, user_email = %upload.user_email, "Resume uploaded");
            Ok(resume)
        }
        Err(err) => {
            warn!(error = %err, "Resume upload failed");
            Err(err.into())
        }
    }
}
