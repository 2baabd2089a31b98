//! Renderable model of the pipeline graph
//!
//! Nodes sit on a fixed three-column grid; positions are a property of the
//! stage and never recomputed. Painting to the terminal happens in
//! `ui::dag_view`.

use ratatui::style::Color;

use job_matcher_sdk::pipeline;
use job_matcher_sdk::{Edge, RunStatus, Stage, StageVisualState};

use crate::projector::{project, Projection};

pub const GRID_COLUMNS: u16 = 3;
pub const GRID_ROWS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub column: u16,
    pub row: u16,
}

/// Fixed layout: one centered spine with the fetch/match branches on either side
pub fn position(stage: Stage) -> GridPosition {
    let (column, row) = match stage {
        Stage::Upload => (1, 0),
        Stage::Parse => (1, 1),
        Stage::FetchJobs => (0, 2),
        Stage::MatchJobs => (2, 2),
        Stage::SendEmail => (1, 3),
    };
    GridPosition { column, row }
}

pub fn state_color(state: StageVisualState) -> Color {
    match state {
        StageVisualState::Pending => Color::Gray,
        StageVisualState::Running => Color::Blue,
        StageVisualState::Completed => Color::Green,
        StageVisualState::Failed => Color::Red,
    }
}

pub fn state_badge(state: StageVisualState) -> String {
    match state {
        StageVisualState::Completed => format!("✓ {}", state.as_str().to_uppercase()),
        other => other.as_str().to_uppercase(),
    }
}

pub const EDGE_COLOR: Color = Color::Blue;

#[derive(Debug, Clone, PartialEq)]
pub struct DagNode {
    pub stage: Stage,
    pub label: &'static str,
    pub description: &'static str,
    pub position: GridPosition,
    pub state: StageVisualState,
    pub badge: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DagEdge {
    pub edge: Edge,
    pub from: GridPosition,
    pub to: GridPosition,
    pub animated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DagGraph {
    pub status: RunStatus,
    pub nodes: Vec<DagNode>,
    pub edges: Vec<DagEdge>,
}

impl DagGraph {
    pub fn node(&self, stage: Stage) -> Option<&DagNode> {
        self.nodes.iter().find(|n| n.stage == stage)
    }

    /// Edges leaving grid row `row`
    pub fn edges_from_row(&self, row: u16) -> impl Iterator<Item = &DagEdge> {
        self.edges.iter().filter(move |e| e.from.row == row)
    }
}

/// Lay out the graph for a run status. `None` renders as idle.
pub fn layout(status: Option<RunStatus>) -> DagGraph {
    let status = status.unwrap_or_default();
    build(status, &project(status))
}

/// Lay out the graph from a raw status string. Unknown values render as idle.
pub fn layout_wire(status: Option<&str>) -> DagGraph {
    layout(status.and_then(RunStatus::from_wire))
}

fn build(status: RunStatus, projection: &Projection) -> DagGraph {
    let nodes = pipeline::stages()
        .iter()
        .map(|stage| {
            let state = projection.stage(*stage);
            DagNode {
                stage: *stage,
                label: stage.label(),
                description: stage.description(),
                position: position(*stage),
                state,
                badge: state_badge(state),
                color: state_color(state),
            }
        })
        .collect();

    let edges = pipeline::edges()
        .iter()
        .map(|edge| DagEdge {
            edge: *edge,
            from: position(edge.from),
            to: position(edge.to),
            animated: projection.is_animated(edge),
        })
        .collect();

    DagGraph {
        status,
        nodes,
        edges,
    }
}

/// One line per stage, for plain-text output
pub fn describe(graph: &DagGraph) -> Vec<String> {
    graph
        .nodes
        .iter()
        .map(|node| format!("{:<14} {}", node.label, node.badge))
        .collect()
}
