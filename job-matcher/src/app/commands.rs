//! Messages sent back to the App from background tasks
//!
//! Network calls run on the App's tokio runtime. Each one reports back
//! through a [`BackgroundEvent`] that the event loop drains every frame.

use job_matcher_sdk::UploadedResume;

use crate::error::JobMatcherError;
use crate::matches::MatchList;
use crate::orchestrator::RunOutcome;

#[derive(Debug)]
pub enum BackgroundEvent {
    /// A résumé upload finished
    UploadFinished {
        user_email: String,
        result: Result<UploadedResume, JobMatcherError>,
    },

    /// A dispatched workflow request returned
    RunFinished(RunOutcome),

    /// Stored matches were fetched for the results view
    MatchesLoaded {
        user_email: String,
        list: MatchList,
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}
