//! UI rendering for the job-matcher TUI

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, View};

mod dag_view;
mod dashboard;
mod header_footer;
mod notifications;
mod results_view;

pub use dag_view::{node_rects, DagWidget};
pub use dashboard::render_dashboard;
pub use header_footer::{render_footer, render_header};
pub use notifications::render_notifications;
pub use results_view::render_results;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    match app.current_view {
        View::Dashboard => render_dashboard(f, chunks[1], app),
        View::Results => render_results(f, chunks[1], app),
    }

    render_footer(f, chunks[2], app);
    render_notifications(f, app, chunks[1]);
}
