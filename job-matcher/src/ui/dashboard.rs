//! Dashboard view: upload form, run controls and the pipeline graph

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use job_matcher_sdk::RunStatus;

use super::dag_view::DagWidget;
use crate::app::{App, FormField};
use crate::dag;
use crate::upload::UploadMode;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn render_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(9),
            Constraint::Length(7),
        ])
        .split(columns[0]);

    render_upload_form(f, left[0], app);
    render_controls(f, left[1], app);
    render_how_it_works(f, left[2]);
    render_graph(f, columns[1], app);
}

fn field_style(app: &App, field: FormField) -> Style {
    if app.focus == field {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// The stored value, or the edit buffer with a cursor when the field is being edited
fn display_value(app: &App, field: FormField) -> String {
    if app.is_editing && app.focus == field {
        format!("{}▏", app.edit_buffer)
    } else {
        app.field_value(field).to_string()
    }
}

fn render_upload_form(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Upload Resume ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let email = display_value(app, FormField::Email);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Email:  ", field_style(app, FormField::Email)),
            Span::raw(if email.is_empty() {
                "your.email@example.com".to_string()
            } else {
                email
            }),
        ])),
        rows[0],
    );

    let mode_span = |mode: UploadMode| {
        let style = if app.form.mode == mode {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {} ", mode.label()), style)
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Input:  ", field_style(app, FormField::Mode)),
            mode_span(UploadMode::Text),
            Span::raw(" "),
            mode_span(UploadMode::File),
        ])),
        rows[1],
    );

    let resume_label = match app.form.mode {
        UploadMode::Text => "Resume text:",
        UploadMode::File => "PDF path (max 5 MB):",
    };
    f.render_widget(
        Paragraph::new(Span::styled(resume_label, field_style(app, FormField::Resume))),
        rows[2],
    );

    let resume = display_value(app, FormField::Resume);
    let resume_block = Block::default()
        .borders(Borders::ALL)
        .border_style(field_style(app, FormField::Resume));
    let resume = if resume.is_empty() {
        Paragraph::new(Span::styled(
            match app.form.mode {
                UploadMode::Text => "Paste your resume here...",
                UploadMode::File => "/path/to/resume.pdf",
            },
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(resume)
    };
    f.render_widget(
        resume.block(resume_block).wrap(Wrap { trim: false }),
        rows[3],
    );
}

fn status_color(status: RunStatus) -> Color {
    match status {
        RunStatus::Idle => Color::Gray,
        RunStatus::Running => Color::Blue,
        RunStatus::Completed => Color::Green,
        RunStatus::Failed => Color::Red,
    }
}

fn render_controls(f: &mut Frame, area: Rect, app: &App) {
    let orchestrator = &app.orchestrator;
    let run = orchestrator.run();
    let mut lines = Vec::new();

    let resume_line = if app.uploading {
        Line::from(Span::styled(
            format!("{} Uploading...", SPINNER[(app.tick / 3 % 4) as usize]),
            Style::default().fg(Color::Blue),
        ))
    } else {
        match orchestrator.resume_id() {
            Some(id) => Line::from(vec![
                Span::raw("Resume: "),
                Span::styled(format!("✓ {}", id), Style::default().fg(Color::Green)),
            ]),
            None => Line::from(Span::styled(
                "Resume: not uploaded",
                Style::default().fg(Color::DarkGray),
            )),
        }
    };
    lines.push(resume_line);

    let status = orchestrator.status();
    let mut status_spans = vec![
        Span::raw("Status: "),
        Span::styled(
            status.as_str(),
            Style::default()
                .fg(status_color(status))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if status == RunStatus::Running {
        status_spans.push(Span::raw(format!(" {}", SPINNER[(app.tick / 3 % 4) as usize])));
    }
    lines.push(Line::from(status_spans));

    if let Some(started) = run.started_at {
        let end = run.finished_at.unwrap_or_else(Local::now);
        let secs = (end - started).num_seconds().max(0);
        lines.push(Line::from(format!("Elapsed: {}m {:02}s", secs / 60, secs % 60)));
    }
    if let Some(found) = orchestrator.jobs_found() {
        lines.push(Line::from(format!("Jobs found: {}", found)));
    }
    if let Some(matched) = orchestrator.jobs_matched() {
        lines.push(Line::from(format!("Matched: {}", matched)));
    }
    if let Some(error) = orchestrator.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Workflow Control "),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_how_it_works(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("• Upload your resume (PDF or text)"),
        Line::from("• Skills and experience are extracted"),
        Line::from("• 8+ job boards are searched (last 24h)"),
        Line::from("• Jobs are ranked against your profile"),
        Line::from("• Results are sent to your email"),
    ];
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(" How It Works "));
    f.render_widget(paragraph, area);
}

fn render_graph(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Workflow Visualization ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let graph = dag::layout(Some(app.orchestrator.status()));
    f.render_widget(DagWidget::new(&graph, app.tick), inner);
}
