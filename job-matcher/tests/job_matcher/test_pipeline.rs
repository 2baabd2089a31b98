//! Pipeline topology, status projection and graph layout

use job_matcher::dag;
use job_matcher::projector::project;
use job_matcher_sdk::pipeline::{self, Edge, PipelineError};
use job_matcher_sdk::{RunStatus, Stage, StageVisualState};

#[test]
fn test_pipeline_validates_in_dependency_order() {
    let order = pipeline::validate().unwrap();
    assert_eq!(order.first(), Some(&Stage::Upload));
    assert_eq!(order.last(), Some(&Stage::SendEmail));

    for edge in pipeline::edges() {
        let from = order.iter().position(|s| *s == edge.from).unwrap();
        let to = order.iter().position(|s| *s == edge.to).unwrap();
        assert!(from < to, "{} out of order", edge);
    }
}

#[test]
fn test_cyclic_edges_are_rejected() {
    let mut edges = pipeline::edges().to_vec();
    edges.push(Edge::new(Stage::SendEmail, Stage::Parse));
    assert!(matches!(
        pipeline::validate_edges(&edges),
        Err(PipelineError::Cycle(_))
    ));
}

#[test]
fn test_projection_is_total_and_deterministic() {
    for status in RunStatus::ALL {
        let projection = project(status);
        assert_eq!(projection, project(status));
        for stage in Stage::ALL {
            assert!(projection.stage_states.contains_key(&stage));
        }
    }
}

#[test]
fn test_completed_never_shows_pending_or_running() {
    let projection = project(RunStatus::Completed);
    assert!(projection.stage_states.values().all(|s| !matches!(
        s,
        StageVisualState::Pending | StageVisualState::Running
    )));
}

#[test]
fn test_graph_for_every_wire_status() {
    for (wire, expected) in [
        (Some("running"), RunStatus::Running),
        (Some("completed"), RunStatus::Completed),
        (Some("completed_no_email"), RunStatus::Completed),
        (Some("failed"), RunStatus::Failed),
        (Some("garbage"), RunStatus::Idle),
        (None, RunStatus::Idle),
    ] {
        let graph = dag::layout_wire(wire);
        assert_eq!(graph.status, expected, "wire status {:?}", wire);
        assert_eq!(graph.nodes.len(), 5);
        assert_eq!(graph.edges.len(), 5);
    }
}

#[test]
fn test_edge_ids() {
    let ids: Vec<String> = pipeline::edges().iter().map(|e| e.id()).collect();
    assert_eq!(ids, vec!["e1-2", "e2-3", "e2-4", "e3-5", "e4-5"]);
}
