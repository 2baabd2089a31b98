//! Static definition of the job-matching pipeline
//!
//! The pipeline is five stages joined by five dependency edges:
//!
//! ```text
//!            Upload
//!              |
//!            Parse
//!           /     \
//!     FetchJobs  MatchJobs
//!           \     /
//!          SendEmail
//! ```
//!
//! The topology is configuration, not state. It is checked once at startup
//! with [`validate`] and never changes afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// One node of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Upload,
    Parse,
    FetchJobs,
    MatchJobs,
    SendEmail,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 5] = [
        Stage::Upload,
        Stage::Parse,
        Stage::FetchJobs,
        Stage::MatchJobs,
        Stage::SendEmail,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Stage::Upload => "upload",
            Stage::Parse => "parse",
            Stage::FetchJobs => "fetch_jobs",
            Stage::MatchJobs => "match_jobs",
            Stage::SendEmail => "send_email",
        }
    }

    /// Numeric node id, used to build edge ids such as `e2-3`
    pub fn node_number(self) -> u8 {
        match self {
            Stage::Upload => 1,
            Stage::Parse => 2,
            Stage::FetchJobs => 3,
            Stage::MatchJobs => 4,
            Stage::SendEmail => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Upload => "Upload Resume",
            Stage::Parse => "Parse Resume",
            Stage::FetchJobs => "Fetch Jobs",
            Stage::MatchJobs => "Match Jobs",
            Stage::SendEmail => "Send Email",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Upload => "Upload your resume (PDF or text)",
            Stage::Parse => "Extract skills using GPT-4o",
            Stage::FetchJobs => "Search 8+ job boards (24h)",
            Stage::MatchJobs => "AI-powered job matching",
            Stage::SendEmail => "Email matched jobs to you",
        }
    }

    /// Stages that must finish before this one may start
    pub fn depends_on(self) -> Vec<Stage> {
        EDGES
            .iter()
            .filter(|edge| edge.to == self)
            .map(|edge| edge.from)
            .collect()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Directed dependency edge; `to` depends on `from`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub from: Stage,
    pub to: Stage,
}

impl Edge {
    pub const fn new(from: Stage, to: Stage) -> Self {
        Self { from, to }
    }

    /// Edge id in the `e<from>-<to>` form
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}-{}", self.from.node_number(), self.to.node_number())
    }
}

/// The fixed dependency edges of the pipeline
pub const EDGES: [Edge; 5] = [
    Edge::new(Stage::Upload, Stage::Parse),
    Edge::new(Stage::Parse, Stage::FetchJobs),
    Edge::new(Stage::Parse, Stage::MatchJobs),
    Edge::new(Stage::FetchJobs, Stage::SendEmail),
    Edge::new(Stage::MatchJobs, Stage::SendEmail),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Dependency cycle detected among stages: {0:?}")]
    Cycle(Vec<Stage>),

    #[error("Expected Upload as the only source stage, found {0:?}")]
    Sources(Vec<Stage>),

    #[error("Expected SendEmail as the only sink stage, found {0:?}")]
    Sinks(Vec<Stage>),
}

/// Stages in pipeline order
pub fn stages() -> &'static [Stage] {
    &Stage::ALL
}

/// All dependency edges
pub fn edges() -> &'static [Edge] {
    &EDGES
}

/// Outgoing edges of `stage`
pub fn edges_of(stage: Stage) -> impl Iterator<Item = &'static Edge> {
    EDGES.iter().filter(move |edge| edge.from == stage)
}

/// Check the built-in topology
pub fn validate() -> Result<Vec<Stage>, PipelineError> {
    validate_edges(&EDGES)
}

/// Check that `edges` form a DAG over all stages with Upload as the single
/// source and SendEmail as the single sink. Returns a topological order.
pub fn validate_edges(edges: &[Edge]) -> Result<Vec<Stage>, PipelineError> {
    let mut in_degree: BTreeMap<Stage, usize> = Stage::ALL.iter().map(|s| (*s, 0)).collect();
    let mut out_degree: BTreeMap<Stage, usize> = in_degree.clone();

    for edge in edges {
        *in_degree.entry(edge.to).or_default() += 1;
        *out_degree.entry(edge.from).or_default() += 1;
    }

    // Kahn's algorithm
    let mut remaining = in_degree.clone();
    let mut ready: Vec<Stage> = remaining
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(stage, _)| *stage)
        .collect();
    let mut order = Vec::with_capacity(Stage::ALL.len());

    while let Some(stage) = ready.pop() {
        order.push(stage);
        for edge in edges.iter().filter(|e| e.from == stage) {
            if let Some(degree) = remaining.get_mut(&edge.to) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(edge.to);
                }
            }
        }
    }

    if order.len() != Stage::ALL.len() {
        let stuck = Stage::ALL
            .iter()
            .copied()
            .filter(|s| !order.contains(s))
            .collect();
        return Err(PipelineError::Cycle(stuck));
    }

    let sources: Vec<Stage> = in_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(s, _)| *s)
        .collect();
    if sources != [Stage::Upload] {
        return Err(PipelineError::Sources(sources));
    }

    let sinks: Vec<Stage> = out_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(s, _)| *s)
        .collect();
    if sinks != [Stage::SendEmail] {
        return Err(PipelineError::Sinks(sinks));
    }

    Ok(order)
}
