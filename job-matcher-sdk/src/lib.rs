// Pipeline topology (stages and dependency edges)
pub mod pipeline;

// Run-level and per-stage status values
pub mod status;

// HTTP request/response payloads shared with the backend
pub mod wire;

pub use pipeline::{Edge, PipelineError, Stage};
pub use status::{RunStatus, StageVisualState};
pub use wire::{
    ErrorBody, ExecutionRequest, ExecutionResult, JobMatch, ResultVerdict, UploadedResume,
    DEFAULT_JOB_SOURCES,
};
