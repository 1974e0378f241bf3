use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;

/// Modal alert for submission outcomes
pub struct NoticeDialog {
    pub visible: bool,
    message: String,
    success: bool,
}

impl NoticeDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            message: String::new(),
            success: false,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, success: bool) {
        self.message = message.into();
        self.success = success;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn message(&self) -> Option<&str> {
        self.visible.then_some(self.message.as_str())
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(50, 25, frame.area());
        frame.render_widget(Clear, area);

        let accent = if self.success { Color::Green } else { Color::Red };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.message.as_str(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Yellow)),
                Span::raw(" dismiss"),
            ]),
        ];

        let dialog = Paragraph::new(text)
            .block(
                Block::default()
                    .title(" Notice ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(dialog, area);
    }
}

impl Default for NoticeDialog {
    fn default() -> Self {
        Self::new()
    }
}
