use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::survey::Wizard;
use crate::ui::SurveyScreen;

impl SurveyScreen {
    pub(crate) fn render_info_page(
        &self,
        frame: &mut Frame,
        area: Rect,
        wizard: &Wizard,
        title: &str,
        body: &[&str],
    ) {
        let mut lines = vec![
            Line::from(Span::styled(
                title.to_string(),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        lines.extend(body.iter().map(|text| Line::from(text.to_string())));

        if wizard.is_last_page() {
            let trigger = wizard.trigger();
            let style = if trigger.is_enabled() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("[ {} ]", trigger.label()),
                style,
            )));
        }

        let offset = wizard
            .view()
            .scroll_offset
            .min(lines.len().saturating_sub(1));
        let offset = u16::try_from(offset).unwrap_or(u16::MAX);
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((offset, 0));
        frame.render_widget(paragraph, area.inner(ratatui::layout::Margin::new(1, 1)));
    }
}
