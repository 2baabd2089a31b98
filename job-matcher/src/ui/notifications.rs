//! Toast rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, NotificationLevel};

const MAX_VISIBLE: usize = 3;
const TOAST_HEIGHT: u16 = 4;
const TOAST_WIDTH: u16 = 48;

/// Stack the newest toasts in the top-right corner of `area`
pub fn render_notifications(f: &mut Frame, app: &App, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;

    for (idx, notification) in app
        .notifications
        .get_active()
        .into_iter()
        .take(MAX_VISIBLE)
        .enumerate()
    {
        let y = area.y + idx as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, TOAST_HEIGHT);

        let (color, icon) = match notification.level {
            NotificationLevel::Error => (Color::Red, "✗"),
            NotificationLevel::Warning => (Color::Yellow, "⚠"),
            NotificationLevel::Info => (Color::Blue, "ℹ"),
            NotificationLevel::Success => (Color::Green, "✓"),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} {} ", icon, notification.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        let paragraph = Paragraph::new(Line::from(notification.message.clone()))
            .block(block)
            .wrap(Wrap { trim: true });

        f.render_widget(Clear, rect);
        f.render_widget(paragraph, rect);
    }
}
