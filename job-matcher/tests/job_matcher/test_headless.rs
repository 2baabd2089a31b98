//! Headless `run` and `matches` commands

use super::common::*;
use std::sync::Arc;

use job_matcher::cli::RunArgs;
use job_matcher::config::WorkflowSettings;
use job_matcher::headless;

fn run_args(text: &str) -> RunArgs {
    RunArgs {
        email: "a@x.com".to_string(),
        resume_file: None,
        resume_text: Some(text.to_string()),
        no_email: false,
    }
}

#[tokio::test]
async fn test_run_prints_graph_counts_and_matches() {
    let api = Arc::new(MockApi::replying(vec![completed(
        12,
        vec![
            sample_job("Backend Engineer", "Acme", 91.0),
            sample_job("Data Engineer", "Globex", 72.0),
        ],
    )]));

    let mut out = Vec::new();
    headless::run(&mut out, api.clone(), &WorkflowSettings::default(), &run_args("Rust"))
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Resume uploaded: r1"));
    assert!(out.contains("Pipeline (completed)"));
    assert_eq!(out.matches("✓ COMPLETED").count(), 5);
    assert!(out.contains("Jobs found:   12"));
    assert!(out.contains("Jobs matched: 2"));
    assert!(out.find("#1 Backend Engineer").unwrap() < out.find("#2 Data Engineer").unwrap());
    assert_eq!(api.uploads(), 1);
    assert_eq!(api.executes(), 1);
}

#[tokio::test]
async fn test_run_failure_is_an_error() {
    let api = Arc::new(MockApi::replying(vec![failed("no jobs found")]));

    let mut out = Vec::new();
    let err = headless::run(&mut out, api.clone(), &WorkflowSettings::default(), &run_args("Rust"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "no jobs found");

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Pipeline (failed)"));
}

#[tokio::test]
async fn test_run_no_email_flag_is_sent() {
    let api = Arc::new(MockApi::replying(vec![completed(0, vec![])]));
    let mut args = run_args("Rust");
    args.no_email = true;

    let mut out = Vec::new();
    headless::run(&mut out, api.clone(), &WorkflowSettings::default(), &args)
        .await
        .unwrap();
    assert!(!api.requests.lock().unwrap()[0].send_email);
}

#[tokio::test]
async fn test_run_invalid_input_makes_no_call() {
    let api = Arc::new(MockApi::default());
    let mut out = Vec::new();
    let result =
        headless::run(&mut out, api.clone(), &WorkflowSettings::default(), &run_args("  ")).await;
    assert!(result.is_err());
    assert_eq!(api.uploads(), 0);
    assert_eq!(api.executes(), 0);
}

#[tokio::test]
async fn test_matches_prints_stored_matches() {
    let api = Arc::new(MockApi::default());
    *api.stored_matches.lock().unwrap() = vec![sample_job("Stored", "Acme", 83.0)];

    let mut out = Vec::new();
    headless::matches(&mut out, api.clone(), "a@x.com").await.unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.starts_with("Found 1 jobs matching your profile"));
    assert!(out.contains("#1 Stored [83% Match]"));
}
