//! Orchestrator state machine and request guards

use super::common::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use job_matcher::error::JobMatcherError;
use job_matcher_sdk::{RunStatus, Stage, StageVisualState};

// ============================================================================
// Prerequisites
// ============================================================================

#[tokio::test]
async fn test_execute_without_upload_makes_no_call() {
    let api = Arc::new(MockApi::replying(vec![completed(1, vec![])]));
    let mut orch = orchestrator(&api);

    let err = orch.execute().await.unwrap_err();
    assert!(matches!(err, JobMatcherError::MissingPrerequisite));
    assert_eq!(err.to_string(), "Please upload your resume first");
    assert_eq!(api.executes(), 0);
    assert_eq!(orch.status(), RunStatus::Idle);
}

#[tokio::test]
async fn test_empty_resume_id_does_not_register() {
    let api = Arc::new(MockApi::replying(vec![completed(1, vec![])]));
    let mut orch = orchestrator(&api);

    orch.register_upload("", "a@x.com");
    assert!(matches!(
        orch.execute().await,
        Err(JobMatcherError::MissingPrerequisite)
    ));
    assert_eq!(api.executes(), 0);
}

#[tokio::test]
async fn test_empty_email_does_not_register() {
    let api = Arc::new(MockApi::replying(vec![completed(1, vec![])]));
    let mut orch = orchestrator(&api);

    assert!(!orch.register_upload("r1", ""));
    assert!(matches!(
        orch.execute().await,
        Err(JobMatcherError::MissingPrerequisite)
    ));
    assert_eq!(api.executes(), 0);
    assert_eq!(orch.status(), RunStatus::Idle);
}

// ============================================================================
// Concurrency guard
// ============================================================================

#[tokio::test]
async fn test_second_execute_while_pending_is_rejected() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(MockApi::gated(vec![completed(2, vec![])], gate.clone()));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    let first = tokio::spawn(orch.dispatch().unwrap());
    while api.executes() == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    assert!(matches!(orch.dispatch(), Err(JobMatcherError::AlreadyRunning)));
    assert!(matches!(
        orch.execute().await,
        Err(JobMatcherError::AlreadyRunning)
    ));
    assert_eq!(orch.status(), RunStatus::Running);

    gate.notify_one();
    let outcome = first.await.unwrap();
    assert!(orch.settle(outcome).unwrap().is_ok());

    assert_eq!(api.executes(), 1);
    assert_eq!(orch.status(), RunStatus::Completed);
}

#[tokio::test]
async fn test_running_projection_while_pending() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(MockApi::gated(vec![completed(0, vec![])], gate.clone()));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    let pending = orch.dispatch().unwrap();
    let projection = orch.projection();
    assert_eq!(projection.stage(Stage::Upload), StageVisualState::Completed);
    assert_eq!(projection.stage(Stage::SendEmail), StageVisualState::Running);

    gate.notify_one();
    orch.settle(pending.await);
}

#[tokio::test]
async fn test_upload_during_run_does_not_change_the_run() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(MockApi::gated(vec![completed(1, vec![])], gate.clone()));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    let pending = tokio::spawn(orch.dispatch().unwrap());
    while api.executes() == 0 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    assert!(!orch.register_upload("r2", "b@y.com"));
    let upload = job_matcher::upload::ResumeUpload {
        user_email: "b@y.com".to_string(),
        source: job_matcher::upload::ResumeSource::Text("Go, Kubernetes".to_string()),
    };
    assert!(matches!(
        orch.upload(&upload).await,
        Err(JobMatcherError::AlreadyRunning)
    ));
    assert_eq!(api.uploads(), 0);

    gate.notify_one();
    let handoff = orch.settle(pending.await.unwrap()).unwrap().unwrap();
    assert_eq!(handoff.user_email, "a@x.com");
    assert_eq!(orch.resume_id(), Some("r1"));
}

// ============================================================================
// Stale responses
// ============================================================================

#[tokio::test]
async fn test_response_after_detach_is_discarded() {
    let api = Arc::new(MockApi::replying(vec![
        failed("late failure"),
        completed(5, vec![sample_job("Rust Engineer", "Acme", 90.0)]),
    ]));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    let stale = orch.dispatch().unwrap();
    orch.detach();
    let stale_outcome = stale.await;

    // A fresh run can start once detached
    let handoff = orch.execute().await.unwrap();
    assert_eq!(handoff.matched_jobs.len(), 1);

    assert!(orch.settle(stale_outcome).is_none());
    assert_eq!(orch.status(), RunStatus::Completed);
    assert!(orch.error().is_none());
    assert_eq!(api.executes(), 2);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_transport_error_uses_server_detail() {
    let api = Arc::new(MockApi::replying(vec![Reply::ServerError {
        status: 404,
        detail: Some("Resume not found".to_string()),
    }]));
    let mut orch = orchestrator(&api);
    orch.register_upload("missing", "a@x.com");

    let err = orch.execute().await.unwrap_err();
    assert!(matches!(err, JobMatcherError::Transport(_)));
    assert_eq!(orch.status(), RunStatus::Failed);
    assert_eq!(orch.error(), Some("Resume not found"));
}

#[tokio::test]
async fn test_transport_error_without_detail_uses_generic_message() {
    let api = Arc::new(MockApi::replying(vec![Reply::ServerError {
        status: 502,
        detail: None,
    }]));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    orch.execute().await.unwrap_err();
    assert_eq!(orch.error(), Some("Failed to execute workflow"));
}

#[tokio::test]
async fn test_no_automatic_retry() {
    let api = Arc::new(MockApi::replying(vec![
        Reply::ServerError {
            status: 503,
            detail: None,
        },
        completed(1, vec![]),
    ]));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    assert!(orch.execute().await.is_err());
    assert_eq!(api.executes(), 1);

    // The user can run again by hand
    assert!(orch.execute().await.is_ok());
    assert_eq!(api.executes(), 2);
    assert_eq!(orch.status(), RunStatus::Completed);
}

#[tokio::test]
async fn test_unknown_terminal_status_is_failure() {
    let api = Arc::new(MockApi::replying(vec![Reply::Result(
        job_matcher_sdk::ExecutionResult {
            status: "jobs_fetched".to_string(),
            ..Default::default()
        },
    )]));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    let err = orch.execute().await.unwrap_err();
    assert!(matches!(err, JobMatcherError::ServerReportedFailure(_)));
    assert_eq!(orch.status(), RunStatus::Failed);
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_upload_registers_and_request_carries_it() {
    let api = Arc::new(MockApi::replying(vec![completed(1, vec![])]));
    let mut orch = orchestrator(&api);

    let upload = job_matcher::upload::ResumeUpload {
        user_email: "a@x.com".to_string(),
        source: job_matcher::upload::ResumeSource::Text("Rust, Tokio, Postgres".to_string()),
    };
    let id = orch.upload(&upload).await.unwrap();
    orch.execute().await.unwrap();

    let requests = api.requests.lock().unwrap();
    assert_eq!(requests[0].resume_id, id);
    assert_eq!(requests[0].user_email, "a@x.com");
    assert_eq!(requests[0].job_sources.len(), 8);
    assert!(requests[0].send_email);
}
