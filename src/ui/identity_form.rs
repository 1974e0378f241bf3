//! Single-line editors for the identity page

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};
use tui_textarea::{CursorMove, TextArea};

use crate::survey::{IdentityField, IdentityInputs, ValidationErrors};

/// Rows taken by one bordered editor
const FIELD_HEIGHT: u16 = 3;

pub struct IdentityForm {
    editors: Vec<(IdentityField, TextArea<'static>)>,
    focus: usize,
}

impl IdentityForm {
    pub fn new() -> Self {
        Self {
            editors: IdentityField::all()
                .iter()
                .map(|&field| (field, TextArea::default()))
                .collect(),
            focus: 0,
        }
    }

    pub fn focused_field(&self) -> IdentityField {
        self.editors[self.focus].0
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.editors.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.editors.len() - 1) % self.editors.len();
    }

    /// Feed a key to the focused editor. Returns the field and its new text
    /// when the key changed it.
    pub fn input(&mut self, key: KeyEvent) -> Option<(IdentityField, String)> {
        let (field, editor) = &mut self.editors[self.focus];
        if editor.input(key) {
            Some((*field, editor.lines().join("")))
        } else {
            None
        }
    }

    /// Replace every editor's text, e.g. after the survey is reset
    pub fn load(&mut self, inputs: &IdentityInputs) {
        for (field, editor) in &mut self.editors {
            let mut fresh = TextArea::new(vec![inputs.get(*field).to_string()]);
            fresh.move_cursor(CursorMove::End);
            *editor = fresh;
        }
        self.focus = 0;
    }

    /// Draw every field; a field in error gets a red border and its message
    /// in the title
    pub fn render(&mut self, frame: &mut Frame, area: Rect, errors: &ValidationErrors) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.editors
                    .iter()
                    .map(|_| Constraint::Length(FIELD_HEIGHT))
                    .chain(std::iter::once(Constraint::Min(0))),
            )
            .split(area);

        for (i, (field, editor)) in self.editors.iter_mut().enumerate() {
            let focused = i == self.focus;
            let error = errors.field_message(*field);
            let border_color = match (error, focused) {
                (Some(_), _) => Color::Red,
                (None, true) => Color::Cyan,
                (None, false) => Color::Gray,
            };

            let mut title = vec![Span::raw(format!(" {} ", field.label()))];
            if let Some(message) = error {
                title.push(Span::styled(
                    format!("{} ", message),
                    Style::default().fg(Color::Red),
                ));
            }

            editor.set_cursor_line_style(Style::default());
            editor.set_cursor_style(if focused {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            });
            editor.set_block(
                Block::default()
                    .title(Line::from(title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );
            frame.render_widget(&*editor, rows[i]);
        }
    }
}

impl Default for IdentityForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_reports_new_value() {
        let mut form = IdentityForm::new();
        assert_eq!(
            form.input(key(KeyCode::Char('A'))),
            Some((IdentityField::Name, "A".to_string()))
        );
        assert_eq!(
            form.input(key(KeyCode::Char('d'))),
            Some((IdentityField::Name, "Ad".to_string()))
        );
        assert_eq!(
            form.input(key(KeyCode::Backspace)),
            Some((IdentityField::Name, "A".to_string()))
        );
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = IdentityForm::new();
        form.focus_prev();
        assert_eq!(form.focused_field(), IdentityField::Occupation);
        form.focus_next();
        assert_eq!(form.focused_field(), IdentityField::Name);
        form.focus_next();
        assert_eq!(form.focused_field(), IdentityField::Gender);
    }

    #[test]
    fn test_load_replaces_text() {
        let mut form = IdentityForm::new();
        form.input(key(KeyCode::Char('x')));
        form.focus_next();

        let mut inputs = IdentityInputs::default();
        inputs.set(IdentityField::City, "Lagos");
        form.load(&inputs);

        assert_eq!(form.focused_field(), IdentityField::Name);
        assert_eq!(form.editors[0].1.lines().join(""), "");
        assert_eq!(form.editors[3].1.lines().join(""), "Lagos");
    }
}
