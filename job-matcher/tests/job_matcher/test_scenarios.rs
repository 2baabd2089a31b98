//! End-to-end scenarios: upload, run, hand off and present

use super::common::*;
use std::sync::Arc;

use job_matcher::dag;
use job_matcher::error::{JobMatcherError, ValidationError};
use job_matcher::matches::{self, MatchList, ResultsEntry, EMPTY_TITLE};
use job_matcher::upload::{self, PdfFile, ResumeSource, ResumeUpload, UploadForm, UploadMode};
use job_matcher_sdk::{RunStatus, Stage, StageVisualState};

#[tokio::test]
async fn test_scenario_completed_run_presents_matches_in_order() {
    let jobs = vec![
        sample_job("Backend Engineer", "Acme", 91.0),
        sample_job("Platform Engineer", "Globex", 77.0),
        sample_job("SRE", "Initech", 64.0),
    ];
    let api = Arc::new(MockApi::replying(vec![completed(12, jobs.clone())]));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    let handoff = orch.execute().await.unwrap();

    assert_eq!(orch.status(), RunStatus::Completed);
    assert_eq!(orch.jobs_found(), Some(12));
    assert_eq!(orch.jobs_matched(), Some(3));

    let graph = dag::layout(Some(orch.status()));
    assert!(graph
        .nodes
        .iter()
        .all(|n| n.state == StageVisualState::Completed));
    assert!(graph.edges.iter().all(|e| !e.animated));

    let (list, error) = matches::load(api.as_ref(), ResultsEntry::Handoff(handoff)).await;
    assert!(error.is_none());
    assert_eq!(list.jobs(), jobs.as_slice());
    let indices: Vec<usize> = list.entries().map(|e| e.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    // The payload was shown directly
    assert_eq!(api.fetches(), 0);
}

#[tokio::test]
async fn test_scenario_server_reported_failure() {
    let api = Arc::new(MockApi::replying(vec![failed("no jobs found")]));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    let err = orch.execute().await.unwrap_err();
    assert!(matches!(err, JobMatcherError::ServerReportedFailure(ref m) if m == "no jobs found"));
    assert_eq!(err.user_message("ignored"), "no jobs found");
    assert_eq!(orch.status(), RunStatus::Failed);
    assert_eq!(orch.error(), Some("no jobs found"));

    let projection = orch.projection();
    assert_eq!(projection.stage(Stage::Upload), StageVisualState::Completed);
    for stage in [Stage::Parse, Stage::FetchJobs, Stage::MatchJobs, Stage::SendEmail] {
        assert_eq!(projection.stage(stage), StageVisualState::Pending);
    }
}

#[tokio::test]
async fn test_scenario_completed_without_matches_shows_empty_state() {
    let api = Arc::new(MockApi::replying(vec![completed(40, vec![])]));
    let mut orch = orchestrator(&api);
    orch.register_upload("r1", "a@x.com");

    let handoff = orch.execute().await.unwrap();
    let (list, _) = matches::load(api.as_ref(), ResultsEntry::Handoff(handoff)).await;

    assert!(list.is_empty());
    let text = list.render_text();
    assert!(text.contains("Found 0 jobs matching your profile"));
    assert!(text.contains(EMPTY_TITLE));
}

#[tokio::test]
async fn test_scenario_non_pdf_rejected_before_any_request() {
    let api = Arc::new(MockApi::default());
    let orch = orchestrator(&api);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, b"not a pdf").unwrap();

    let form = UploadForm {
        email: "a@x.com".to_string(),
        mode: UploadMode::File,
        resume_text: String::new(),
        file_path: path.display().to_string(),
    };
    assert_eq!(
        form.build(),
        Err(ValidationError::NotPdf {
            file_name: "resume.docx".to_string()
        })
    );

    // Same check when an upload is built by hand
    let upload = ResumeUpload {
        user_email: "a@x.com".to_string(),
        source: ResumeSource::Pdf(PdfFile {
            file_name: "resume.docx".to_string(),
            mime: Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string()),
            bytes: b"not a pdf".to_vec(),
        }),
    };
    let err = upload::submit(api.as_ref(), &upload).await.unwrap_err();
    assert!(matches!(err, JobMatcherError::Validation(ValidationError::NotPdf { .. })));

    assert_eq!(api.uploads(), 0);
    assert_eq!(orch.status(), RunStatus::Idle);
    assert!(orch.resume_id().is_none());
}

#[tokio::test]
async fn test_results_without_handoff_requery_by_email() {
    let api = Arc::new(MockApi::default());
    *api.stored_matches.lock().unwrap() = vec![
        sample_job("Stored One", "Acme", 88.0),
        sample_job("Stored Two", "Acme", 61.0),
    ];

    let entry = ResultsEntry::from_parts(None, Some("a@x.com"));
    let (list, error) = matches::load(api.as_ref(), entry).await;

    assert!(error.is_none());
    assert_eq!(api.fetches(), 1);
    assert_eq!(list.len(), 2);
    assert_eq!(list.jobs()[0].title, "Stored One");
}

#[tokio::test]
async fn test_results_without_email_show_empty_state() {
    let api = Arc::new(MockApi::default());
    let (list, error) = matches::load(api.as_ref(), ResultsEntry::from_parts(None, None)).await;
    assert_eq!(list, MatchList::default());
    assert!(error.is_none());
    assert_eq!(api.fetches(), 0);
}
