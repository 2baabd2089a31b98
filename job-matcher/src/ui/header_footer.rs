//! Header and footer rendering functions

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, FormField, View};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().add_modifier(Modifier::BOLD))
}

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.current_view {
        View::Dashboard => "Job Matcher - Dashboard",
        View::Results => "Job Matcher - Results",
    };

    let mut spans = vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("      "),
    ];

    let email = app
        .results_email
        .as_deref()
        .filter(|_| app.current_view == View::Results)
        .or(app.orchestrator.user_email());
    if let Some(email) = email {
        spans.push(Span::styled(
            format!("✉ {}", email),
            Style::default().fg(Color::Gray),
        ));
        spans.push(Span::raw("      "));
    }

    spans.push(key("[Q]"));
    spans.push(Span::raw("uit"));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer_text = if app.is_editing {
        let mut spans = vec![
            Span::styled(
                "TYPE",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to edit  "),
            key("[Enter]"),
            Span::raw(" Save  "),
        ];
        if app.focus == FormField::Resume {
            spans.push(key("[Alt+Enter]"));
            spans.push(Span::raw(" Newline  "));
        }
        spans.extend([
            key("[Esc]"),
            Span::raw(" Cancel  "),
            key("[Backspace]"),
            Span::raw(" Delete"),
        ]);
        Line::from(spans)
    } else {
        match app.current_view {
            View::Dashboard => Line::from(vec![
                key("[↑↓/Tab]"),
                Span::raw(" Field  "),
                key("[Enter]"),
                Span::raw(" Edit  "),
                key("[M]"),
                Span::raw(" Text/PDF  "),
                key("[U]"),
                Span::raw(" Upload  "),
                key("[R]"),
                Span::raw(" Run  "),
                key("[V]"),
                Span::raw(" Results  "),
                key("[X]"),
                Span::raw(" Dismiss  "),
                key("[Q]"),
                Span::raw(" Quit"),
            ]),
            View::Results => Line::from(vec![
                key("[↑↓/jk]"),
                Span::raw(" Scroll  "),
                key("[R]"),
                Span::raw(" Refresh  "),
                key("[Esc/B]"),
                Span::raw(" Back  "),
                key("[X]"),
                Span::raw(" Dismiss  "),
                key("[Q]"),
                Span::raw(" Quit"),
            ]),
        }
    };

    let footer = Paragraph::new(footer_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
