//! Projection of the coarse run status onto the pipeline graph
//!
//! The backend only reports one status for the whole run, so every stage's
//! visual state is derived from it here. This is the only place that mapping
//! lives; a backend that reports per-stage progress would replace [`project`].

use std::collections::BTreeMap;

use job_matcher_sdk::pipeline;
use job_matcher_sdk::{Edge, RunStatus, Stage, StageVisualState};

/// Visual state of every stage and animation flag of every edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub stage_states: BTreeMap<Stage, StageVisualState>,
    pub edge_animated: BTreeMap<Edge, bool>,
}

impl Projection {
    pub fn stage(&self, stage: Stage) -> StageVisualState {
        self.stage_states.get(&stage).copied().unwrap_or_default()
    }

    pub fn is_animated(&self, edge: &Edge) -> bool {
        self.edge_animated.get(edge).copied().unwrap_or(false)
    }
}

/// Map a run status to per-stage and per-edge visual attributes.
///
/// Pure: the same status always yields an equal projection.
pub fn project(status: RunStatus) -> Projection {
    let stage_states = pipeline::stages()
        .iter()
        .map(|stage| (*stage, stage_state(status, *stage)))
        .collect();

    let animated = status == RunStatus::Running;
    let edge_animated = pipeline::edges()
        .iter()
        .map(|edge| (*edge, animated))
        .collect();

    Projection {
        stage_states,
        edge_animated,
    }
}

fn stage_state(status: RunStatus, stage: Stage) -> StageVisualState {
    match (status, stage) {
        (RunStatus::Idle, _) => StageVisualState::Pending,
        // The upload finished before the request could be issued
        (RunStatus::Running | RunStatus::Failed, Stage::Upload) => StageVisualState::Completed,
        // No intermediate signal from the backend: the whole remainder is in flight
        (RunStatus::Running, _) => StageVisualState::Running,
        (RunStatus::Completed, _) => StageVisualState::Completed,
        // The backend does not say which stage failed
        (RunStatus::Failed, _) => StageVisualState::Pending,
    }
}
