//! Key handling per view

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.is_editing {
            self.handle_edit_key(key);
            return;
        }

        match self.current_view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Results => self.handle_results_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                if self.focus == FormField::Resume {
                    self.edit_buffer.push('\n');
                }
            }
            KeyCode::Enter => self.save_edit(),
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Char(c) => self.edit_buffer.push(c),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => self.focus_next(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => self.focus_previous(),
            KeyCode::Enter => self.activate_field(),
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.form.mode = self.form.mode.toggle();
            }
            KeyCode::Char('u') | KeyCode::Char('U') => self.submit_upload(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.start_run(),
            KeyCode::Char('v') | KeyCode::Char('V') => self.open_results(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.notifications.dismiss_latest(),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.scroll_results_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_results_up(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_results(),
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => self.back_to_dashboard(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.notifications.dismiss_latest(),
            _ => {}
        }
    }
}
