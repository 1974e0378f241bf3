use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::survey::Wizard;
use crate::ui::SurveyScreen;

impl SurveyScreen {
    pub(crate) fn render_identity_page(&mut self, frame: &mut Frame, area: Rect, wizard: &Wizard) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(area);

        let title = wizard
            .current_descriptor()
            .map(|p| p.title())
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ))),
            chunks[0],
        );

        self.identity_form
            .render(frame, chunks[1], wizard.errors());
    }
}
