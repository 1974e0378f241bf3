use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::survey::catalog::{FRUSTRATIONS_QUESTION, FRUSTRATION_TITLES};
use crate::survey::rating::{rating_label, star_row};
use crate::survey::Wizard;
use crate::ui::SurveyScreen;

impl SurveyScreen {
    pub(crate) fn render_rating_page(&mut self, frame: &mut Frame, area: Rect, wizard: &Wizard) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(2), Constraint::Min(6)])
            .split(area);

        let question = Paragraph::new(Line::from(Span::styled(
            FRUSTRATIONS_QUESTION,
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(question, chunks[0]);

        let ratings = &wizard.session().ratings;
        let items: Vec<ListItem> = FRUSTRATION_TITLES
            .iter()
            .enumerate()
            .map(|(track, title)| {
                let value = ratings.get(track).unwrap_or(0);
                let star_style = if value > 0 {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(vec![
                    Line::from(Span::styled(*title, Style::default().add_modifier(Modifier::BOLD))),
                    Line::from(vec![
                        Span::raw("   "),
                        Span::styled(star_row(value), star_style),
                        Span::raw("  "),
                        Span::styled(rating_label(value), Style::default().fg(Color::Gray)),
                    ]),
                ])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }
}
