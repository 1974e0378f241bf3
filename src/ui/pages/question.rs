use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::survey::catalog::OptionStyle;
use crate::survey::group::OptionState;
use crate::survey::{QuestionGroupConfig, SelectionGroup, SelectionMode, Urgency, Wizard};
use crate::ui::SurveyScreen;

/// Checkbox, radio or icon marker for one option
fn marker(group: &SelectionGroup, option: &OptionState) -> String {
    match (group.mode(), group.style()) {
        (SelectionMode::Single, _) if option.checked => "(•)".to_string(),
        (SelectionMode::Single, _) => "( )".to_string(),
        (SelectionMode::Multi, OptionStyle::Icon) => {
            format!("{:<7}", format!("[{}]", option.icon()))
        }
        (SelectionMode::Multi, OptionStyle::Plain) if option.checked => "[x]".to_string(),
        (SelectionMode::Multi, OptionStyle::Plain) => "[ ]".to_string(),
    }
}

fn counter(group: &SelectionGroup) -> Span<'static> {
    let text = format!(
        "Selected: {} / {}",
        group.counter_text(),
        group.max_selections()
    );
    let color = match group.urgency() {
        Urgency::BelowLimit => Color::Blue,
        Urgency::AtLimit => Color::Red,
    };
    Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

impl SurveyScreen {
    pub(crate) fn render_question_page(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        wizard: &Wizard,
        config: &QuestionGroupConfig,
    ) {
        let Some(group) = wizard.group(config.name) else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Question
                Constraint::Length(2), // Counter
                Constraint::Min(3),    // Options
                Constraint::Length(1), // Error
            ])
            .split(area);

        let question = Paragraph::new(Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(question, chunks[0]);
        frame.render_widget(Paragraph::new(Line::from(counter(group))), chunks[1]);

        let now = Instant::now();
        let items: Vec<ListItem> = group
            .options()
            .iter()
            .map(|option| {
                let style = if option.is_highlighted(now) {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else if option.checked {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else if option.disabled {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{} {}", marker(group, option), option.text()),
                    style,
                )))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[2], &mut self.list_state);

        if let Some(message) = wizard.errors().group_message(config.name) {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    message.to_string(),
                    Style::default().fg(Color::Red),
                ))),
                chunks[3],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::PageCatalog;

    fn group(name: &str) -> SelectionGroup {
        SelectionGroup::from_config(PageCatalog::standard().group_by_name(name).unwrap())
    }

    #[test]
    fn test_markers_follow_mode_and_style() {
        let mut vibe = group("vibe");
        assert_eq!(marker(&vibe, &vibe.options()[0]).trim_end(), "[add]");
        vibe.toggle(0).unwrap();
        assert_eq!(marker(&vibe, &vibe.options()[0]).trim_end(), "[check]");

        let mut new_things = group("new_things");
        new_things.toggle(1).unwrap();
        assert_eq!(marker(&new_things, &new_things.options()[1]), "(•)");
        assert_eq!(marker(&new_things, &new_things.options()[0]), "( )");
    }

    #[test]
    fn test_counter_text() {
        let mut weekend = group("weekend");
        weekend.toggle(0).unwrap();
        assert_eq!(counter(&weekend).content, "Selected: 1 / 3");
    }

    #[test]
    fn test_single_select_counter_tracks_choice() {
        let mut new_things = group("new_things");
        let empty = counter(&new_things);
        assert_eq!(empty.content, "Selected: 0 / 1");
        assert_eq!(empty.style.fg, Some(Color::Blue));

        new_things.toggle(2).unwrap();
        let chosen = counter(&new_things);
        assert_eq!(chosen.content, "Selected: 1 / 1");
        assert_eq!(chosen.style.fg, Some(Color::Red));

        // Switching keeps the count at one
        new_things.toggle(0).unwrap();
        assert_eq!(counter(&new_things).content, "Selected: 1 / 1");
    }
}
