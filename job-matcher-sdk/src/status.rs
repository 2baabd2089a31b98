//! Run-level and per-stage status values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse status of one whole pipeline execution attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub const ALL: [RunStatus; 4] = [
        RunStatus::Idle,
        RunStatus::Running,
        RunStatus::Completed,
        RunStatus::Failed,
    ];

    /// Interpret a status string as sent by the backend.
    ///
    /// `completed_no_email` is a completed run where delivery was skipped.
    /// Unknown values yield `None`.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "idle" => Some(RunStatus::Idle),
            "running" => Some(RunStatus::Running),
            "completed" | "completed_no_email" => Some(RunStatus::Completed),
            "failed" => Some(RunStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual state of a single stage, derived from [`RunStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageVisualState {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl StageVisualState {
    pub fn as_str(self) -> &'static str {
        match self {
            StageVisualState::Pending => "pending",
            StageVisualState::Running => "running",
            StageVisualState::Completed => "completed",
            StageVisualState::Failed => "failed",
        }
    }
}

impl fmt::Display for StageVisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
