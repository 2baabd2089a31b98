//! Ranked match presentation
//!
//! Matches are shown in the order the backend ranked them. Nothing here
//! sorts or filters.

use ratatui::style::Color;
use tracing::{info, warn};

use job_matcher_sdk::JobMatch;

use crate::api::JobMatcherApi;
use crate::orchestrator::Handoff;

pub const EMPTY_TITLE: &str = "No matches found";
pub const EMPTY_GUIDANCE: &str = "We couldn't find any jobs matching your profile in the last 24 hours. Try again later or update your resume.";
pub const DEFAULT_REASON: &str = "Good fit based on your skills and experience";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Strong,
    Good,
    Fair,
    Low,
}

impl ScoreTier {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreTier::Strong
        } else if score >= 70.0 {
            ScoreTier::Good
        } else if score >= 60.0 {
            ScoreTier::Fair
        } else {
            ScoreTier::Low
        }
    }

    pub fn color(self) -> Color {
        match self {
            ScoreTier::Strong => Color::Green,
            ScoreTier::Good => Color::Blue,
            ScoreTier::Fair => Color::Yellow,
            ScoreTier::Low => Color::Gray,
        }
    }
}

/// One card in the results list
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEntry<'a> {
    /// 1-based display position
    pub index: usize,
    pub job: &'a JobMatch,
}

impl MatchEntry<'_> {
    pub fn score_badge(&self) -> String {
        format!("{}% Match", self.job.match_score.round() as i64)
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_score(self.job.match_score)
    }

    pub fn reason(&self) -> &str {
        let reason = self.job.match_reason.trim();
        if reason.is_empty() {
            DEFAULT_REASON
        } else {
            reason
        }
    }

    pub fn source(&self) -> String {
        capitalize(&self.job.source)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(self.job.location.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(self.job.description.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The list shown in the results view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchList {
    jobs: Vec<JobMatch>,
}

impl MatchList {
    pub fn new(jobs: Vec<JobMatch>) -> Self {
        Self { jobs }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[JobMatch] {
        &self.jobs
    }

    pub fn entries(&self) -> impl Iterator<Item = MatchEntry<'_>> {
        self.jobs
            .iter()
            .enumerate()
            .map(|(i, job)| MatchEntry { index: i + 1, job })
    }

    pub fn summary(&self) -> String {
        format!("Found {} jobs matching your profile", self.jobs.len())
    }

    /// Plain-text rendering used by the headless commands
    pub fn render_text(&self) -> String {
        let mut out = format!("{}\n", self.summary());

        if self.is_empty() {
            out.push_str(&format!("\n{}\n{}\n", EMPTY_TITLE, EMPTY_GUIDANCE));
            return out;
        }

        for entry in self.entries() {
            out.push_str(&format!(
                "\n#{} {} [{}]\n",
                entry.index,
                entry.job.title,
                entry.score_badge()
            ));
            out.push_str(&format!("   {} | {}", entry.job.company, entry.source()));
            if let Some(location) = entry.location() {
                out.push_str(&format!(" | {}", location));
            }
            out.push('\n');
            out.push_str(&format!("   Why: {}\n", entry.reason()));
            if let Some(description) = entry.description() {
                out.push_str(&format!("   {}\n", description));
            }
            if !entry.job.url.is_empty() {
                out.push_str(&format!("   {}\n", entry.job.url));
            }
        }
        out
    }
}

/// How the results view was entered
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsEntry {
    /// Straight from a completed run
    Handoff(Handoff),
    /// Without a payload, but with a known email to look matches up by
    Requery { user_email: String },
    Empty,
}

impl ResultsEntry {
    pub fn from_parts(handoff: Option<Handoff>, user_email: Option<&str>) -> Self {
        match (handoff, user_email.map(str::trim).filter(|e| !e.is_empty())) {
            (Some(handoff), _) => ResultsEntry::Handoff(handoff),
            (None, Some(email)) => ResultsEntry::Requery {
                user_email: email.to_string(),
            },
            (None, None) => ResultsEntry::Empty,
        }
    }

    pub fn user_email(&self) -> Option<&str> {
        match self {
            ResultsEntry::Handoff(handoff) => Some(handoff.user_email.as_str()),
            ResultsEntry::Requery { user_email } => Some(user_email.as_str()),
            ResultsEntry::Empty => None,
        }
    }
}

/// Resolve the list for a results entry. A failed re-query is logged and
/// yields the empty list along with the error text.
pub async fn load(api: &dyn JobMatcherApi, entry: ResultsEntry) -> (MatchList, Option<String>) {
    match entry {
        ResultsEntry::Handoff(handoff) => (MatchList::new(handoff.matched_jobs), None),
        ResultsEntry::Empty => (MatchList::default(), None),
        ResultsEntry::Requery { user_email } => match api.fetch_matches(&user_email).await {
            Ok(jobs) => {
                info!(user_email = %user_email, count = jobs.len(), "Loaded stored matches");
                (MatchList::new(jobs), None)
            }
            Err(err) => {
                warn!(user_email = %user_email, error = %err, "Error fetching job matches");
                (MatchList::default(), Some(err.to_string()))
            }
        },
    }
}
