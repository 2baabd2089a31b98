//! Results view: ranked match cards

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::matches::{MatchEntry, EMPTY_GUIDANCE, EMPTY_TITLE};

pub fn render_results(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let mut title = vec![Span::styled(
        "Your Job Matches",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if !app.results_loading {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            app.results.summary(),
            Style::default().fg(Color::Gray),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(title)).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    if app.results_loading {
        let loading = Paragraph::new("Loading your job matches...")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(loading, chunks[1]);
    } else if app.results.is_empty() {
        render_empty_state(f, chunks[1]);
    } else {
        render_cards(f, chunks[1], app);
    }
}

fn render_empty_state(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            EMPTY_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(EMPTY_GUIDANCE, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Back to Dashboard"),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn card_lines(entry: &MatchEntry<'_>) -> Vec<Line<'static>> {
    let mut meta = vec![Span::raw(entry.job.company.clone())];
    if let Some(location) = entry.location() {
        meta.push(Span::raw(format!("  ·  {}", location)));
    }
    meta.push(Span::styled(
        format!("  ·  {}", entry.source()),
        Style::default().fg(Color::Gray),
    ));

    let mut lines = vec![
        Line::from(meta),
        Line::from(Span::styled(
            "Why it matches:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(entry.reason().to_string()),
    ];
    if let Some(description) = entry.description() {
        lines.push(Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !entry.job.url.is_empty() {
        lines.push(Line::from(Span::styled(
            entry.job.url.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )));
    }
    lines
}

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let mut y = area.y;
    let bottom = area.y + area.height;

    for entry in app.results.entries().skip(app.results_scroll) {
        let lines = card_lines(&entry);
        let height = lines.len() as u16 + 2;
        if y >= bottom {
            break;
        }
        let rect = Rect::new(area.x, y, area.width, height.min(bottom - y));

        let tier = entry.tier().color();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(tier))
            .title(Line::from(vec![
                Span::styled(
                    format!(" {}. {} ", entry.index, entry.job.title),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {} ", entry.score_badge()),
                    Style::default().fg(Color::Black).bg(tier),
                ),
            ]));

        f.render_widget(Paragraph::new(lines).block(block), rect);
        y += height;
    }
}
