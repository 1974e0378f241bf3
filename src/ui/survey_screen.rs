//! Full-screen survey view: header gauge, page body, key hints.
//!
//! Each page kind renders from its own module under `ui::pages`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, ListState, Paragraph},
    Frame,
};

use super::identity_form::IdentityForm;
use super::notice::NoticeDialog;
use crate::survey::rating::{MAX_STARS, TRACK_COUNT};
use crate::survey::{PageKind, Transition, Wizard};

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    None,
    /// Start sending the answers
    Submit,
    Quit,
}

/// Input handling for the page on display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageInput {
    Info,
    Identity,
    Question {
        group: &'static str,
        options: usize,
    },
    Rating,
}

impl PageInput {
    fn of(wizard: &Wizard) -> Self {
        match wizard.current_descriptor().map(|p| &p.kind) {
            Some(PageKind::Identity) => PageInput::Identity,
            Some(PageKind::Question(config)) => PageInput::Question {
                group: config.name,
                options: config.option_count(),
            },
            Some(PageKind::Rating) => PageInput::Rating,
            Some(PageKind::Info { .. }) | None => PageInput::Info,
        }
    }

    /// Rows the cursor moves over
    fn cursor_rows(self) -> usize {
        match self {
            PageInput::Question { options, .. } => options,
            PageInput::Rating => TRACK_COUNT,
            PageInput::Info | PageInput::Identity => 0,
        }
    }
}

pub struct SurveyScreen {
    pub(crate) identity_form: IdentityForm,
    /// Cursor over options or rating tracks
    pub(crate) list_state: ListState,
    pub(crate) notice: NoticeDialog,
    shown_page: usize,
}

impl SurveyScreen {
    pub fn new(wizard: &Wizard) -> Self {
        let mut screen = Self {
            identity_form: IdentityForm::new(),
            list_state: ListState::default(),
            notice: NoticeDialog::new(),
            shown_page: 0,
        };
        screen.sync(wizard);
        screen
    }

    pub fn notice(&self) -> &NoticeDialog {
        &self.notice
    }

    pub fn show_notice(&mut self, message: impl Into<String>, success: bool) {
        self.notice.show(message, success);
    }

    /// Reload editors and cursor from the wizard, e.g. after a reset
    pub fn sync(&mut self, wizard: &Wizard) {
        self.identity_form.load(wizard.identity());
        self.shown_page = 0;
        self.follow_page(wizard);
    }

    /// Reset the cursor when the wizard has moved to another page
    fn follow_page(&mut self, wizard: &Wizard) {
        if self.shown_page == wizard.current_page() {
            return;
        }
        self.shown_page = wizard.current_page();
        let rows = PageInput::of(wizard).cursor_rows();
        self.list_state.select(if rows > 0 { Some(0) } else { None });
    }

    fn cursor(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    fn move_cursor(&mut self, rows: usize, down: bool) {
        if rows == 0 {
            return;
        }
        let current = self.cursor();
        let next = if down {
            (current + 1).min(rows - 1)
        } else {
            current.saturating_sub(1)
        };
        self.list_state.select(Some(next));
    }

    fn navigate(&mut self, wizard: &mut Wizard, forward: bool) {
        let result = if forward { wizard.next() } else { wizard.prev() };
        match result {
            Ok(Transition::Blocked) => {
                tracing::debug!(page = wizard.current_page(), "staying on page with errors");
            }
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "navigation failed"),
        }
        self.follow_page(wizard);
    }

    pub fn handle_key(&mut self, wizard: &mut Wizard, key: KeyEvent) -> ScreenAction {
        if key.kind != KeyEventKind::Press {
            return ScreenAction::None;
        }

        if self.notice.visible {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.notice.hide();
            }
            return ScreenAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return ScreenAction::Quit,
                KeyCode::Char('s') if wizard.is_last_page() => return ScreenAction::Submit,
                // Start over is held back while a request is out
                KeyCode::Char('r') if wizard.trigger().is_enabled() => {
                    wizard.reset();
                    self.sync(wizard);
                    return ScreenAction::None;
                }
                _ => {}
            }
        }

        let input = PageInput::of(wizard);
        match input {
            PageInput::Identity => match key.code {
                KeyCode::Enter => self.navigate(wizard, true),
                KeyCode::Esc => self.navigate(wizard, false),
                KeyCode::Tab | KeyCode::Down => self.identity_form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => self.identity_form.focus_prev(),
                _ => {
                    if let Some((field, value)) = self.identity_form.input(key) {
                        wizard.set_identity(field, value);
                    }
                }
            },
            PageInput::Question { group, options } => match key.code {
                KeyCode::Up => self.move_cursor(options, false),
                KeyCode::Down => self.move_cursor(options, true),
                KeyCode::Char(' ') => {
                    if let Err(err) = wizard.toggle_option(group, self.cursor()) {
                        tracing::warn!(error = %err, "toggle failed");
                    }
                }
                KeyCode::Enter | KeyCode::Right => self.navigate(wizard, true),
                KeyCode::Esc | KeyCode::Left => self.navigate(wizard, false),
                _ => {}
            },
            PageInput::Rating => match key.code {
                KeyCode::Up => self.move_cursor(TRACK_COUNT, false),
                KeyCode::Down => self.move_cursor(TRACK_COUNT, true),
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    let value = c as u8 - b'0';
                    if (1..=MAX_STARS).contains(&value) {
                        if let Err(err) = wizard.rate(self.cursor(), value) {
                            tracing::warn!(error = %err, "rating failed");
                        }
                    }
                }
                KeyCode::Enter | KeyCode::Right => self.navigate(wizard, true),
                KeyCode::Esc | KeyCode::Left => self.navigate(wizard, false),
                _ => {}
            },
            PageInput::Info => match key.code {
                KeyCode::Up => wizard.scroll_by(-1),
                KeyCode::Down => wizard.scroll_by(1),
                KeyCode::Enter if wizard.is_last_page() => return ScreenAction::Submit,
                KeyCode::Enter | KeyCode::Right => self.navigate(wizard, true),
                KeyCode::Esc | KeyCode::Left => self.navigate(wizard, false),
                _ => {}
            },
        }

        ScreenAction::None
    }

    pub fn render(&mut self, frame: &mut Frame, wizard: &Wizard) {
        self.follow_page(wizard);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Progress
                Constraint::Min(8),    // Page body
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], wizard);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    format!("{}/{}", wizard.current_page(), wizard.catalog().total_pages()),
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let input = PageInput::of(wizard);
        match wizard.current_descriptor().map(|p| &p.kind) {
            Some(PageKind::Info { title, body }) => {
                self.render_info_page(frame, inner, wizard, title, body)
            }
            Some(PageKind::Identity) => self.render_identity_page(frame, inner, wizard),
            Some(PageKind::Question(config)) => {
                self.render_question_page(frame, inner, wizard, config)
            }
            Some(PageKind::Rating) => self.render_rating_page(frame, inner, wizard),
            None => {}
        }

        self.render_footer(frame, chunks[2], wizard, input);
        self.notice.render(frame);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, wizard: &Wizard) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(" Survey ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
            .ratio((wizard.progress() / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", wizard.progress()));
        frame.render_widget(gauge, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, wizard: &Wizard, input: PageInput) {
        let mut hints: Vec<(&str, &str)> = match input {
            PageInput::Identity => vec![("Tab", "field"), ("Enter", "next"), ("Esc", "back")],
            PageInput::Question { .. } => vec![
                ("↑↓", "move"),
                ("Space", "toggle"),
                ("Enter", "next"),
                ("Esc", "back"),
            ],
            PageInput::Rating => vec![
                ("↑↓", "track"),
                ("1-5", "rate"),
                ("Enter", "next"),
                ("Esc", "back"),
            ],
            PageInput::Info if wizard.is_last_page() => {
                vec![("Enter", "submit"), ("Esc", "back")]
            }
            PageInput::Info => vec![("Enter", "next"), ("Esc", "back")],
        };
        hints.push(("^R", "start over"));
        hints.push(("^C", "quit"));

        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(key, Style::default().fg(Color::Yellow)),
                    Span::raw(format!(" {}  ", action)),
                ]
            })
            .collect();

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn draw(screen: &mut SurveyScreen, wizard: &Wizard) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| screen.render(f, wizard)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn screen_at(page: usize) -> (SurveyScreen, Wizard) {
        let mut wizard = Wizard::standard();
        wizard.retreat_to(page).unwrap();
        let screen = SurveyScreen::new(&wizard);
        (screen, wizard)
    }

    #[test]
    fn test_renders_welcome_page() {
        let wizard = Wizard::standard();
        let mut screen = SurveyScreen::new(&wizard);
        let text = draw(&mut screen, &wizard);
        assert!(text.contains("Welcome"));
        assert!(text.contains("1/19"));
    }

    #[test]
    fn test_enter_and_esc_navigate() {
        let (mut screen, mut wizard) = screen_at(1);
        screen.handle_key(&mut wizard, press(KeyCode::Enter));
        screen.handle_key(&mut wizard, press(KeyCode::Right));
        assert_eq!(wizard.current_page(), 3);
        screen.handle_key(&mut wizard, press(KeyCode::Esc));
        assert_eq!(wizard.current_page(), 2);
    }

    #[test]
    fn test_space_toggles_option_under_cursor() {
        let (mut screen, mut wizard) = screen_at(5);
        screen.handle_key(&mut wizard, press(KeyCode::Down));
        screen.handle_key(&mut wizard, press(KeyCode::Char(' ')));

        let group = wizard.group("weekend").unwrap();
        assert!(group.options()[1].checked);
        assert_eq!(group.selected_count(), 1);

        let text = draw(&mut screen, &wizard);
        assert!(text.contains("[x] Chilling at home"));
        assert!(text.contains("1 / 3"));
    }

    #[test]
    fn test_cursor_resets_on_page_change() {
        let (mut screen, mut wizard) = screen_at(5);
        screen.handle_key(&mut wizard, press(KeyCode::Down));
        screen.handle_key(&mut wizard, press(KeyCode::Down));
        assert_eq!(screen.cursor(), 2);
        screen.handle_key(&mut wizard, press(KeyCode::Enter));
        assert_eq!(wizard.current_page(), 6);
        assert_eq!(screen.cursor(), 0);
    }

    #[test]
    fn test_over_cap_error_is_drawn() {
        let (mut screen, mut wizard) = screen_at(5);
        for i in 0..4 {
            wizard.set_option_checked("weekend", i, true).unwrap();
        }
        screen.handle_key(&mut wizard, press(KeyCode::Enter));
        assert_eq!(wizard.current_page(), 5);
        let text = draw(&mut screen, &wizard);
        assert!(text.contains("Please select up to 3 options"));
    }

    #[test]
    fn test_digit_rates_track_under_cursor() {
        let (mut screen, mut wizard) = screen_at(10);
        screen.handle_key(&mut wizard, press(KeyCode::Down));
        screen.handle_key(&mut wizard, press(KeyCode::Char('4')));
        assert_eq!(wizard.session().ratings.get(1), Some(4));

        screen.handle_key(&mut wizard, press(KeyCode::Char('9')));
        assert_eq!(wizard.session().ratings.get(1), Some(4));

        let text = draw(&mut screen, &wizard);
        assert!(text.contains("★★★★☆"));
        assert!(text.contains("4 stars"));
    }

    #[test]
    fn test_typing_on_identity_page() {
        let (mut screen, mut wizard) = screen_at(4);
        for c in "Ada".chars() {
            screen.handle_key(&mut wizard, press(KeyCode::Char(c)));
        }
        screen.handle_key(&mut wizard, press(KeyCode::Tab));
        screen.handle_key(&mut wizard, press(KeyCode::Char('f')));

        assert_eq!(wizard.identity().get(crate::survey::IdentityField::Name), "Ada");
        assert_eq!(wizard.identity().get(crate::survey::IdentityField::Gender), "f");
    }

    #[test]
    fn test_submit_only_from_last_page() {
        let (mut screen, mut wizard) = screen_at(18);
        assert_eq!(screen.handle_key(&mut wizard, ctrl('s')), ScreenAction::None);

        screen.handle_key(&mut wizard, press(KeyCode::Enter));
        assert_eq!(wizard.current_page(), 19);
        assert_eq!(screen.handle_key(&mut wizard, ctrl('s')), ScreenAction::Submit);
        assert_eq!(
            screen.handle_key(&mut wizard, press(KeyCode::Enter)),
            ScreenAction::Submit
        );

        let text = draw(&mut screen, &wizard);
        assert!(text.contains("[ Submit ]"));
    }

    #[test]
    fn test_notice_swallows_keys_until_dismissed() {
        let (mut screen, mut wizard) = screen_at(2);
        screen.show_notice("Error: duplicate", false);
        assert!(draw(&mut screen, &wizard).contains("Error: duplicate"));

        screen.handle_key(&mut wizard, press(KeyCode::Right));
        assert_eq!(wizard.current_page(), 2);

        screen.handle_key(&mut wizard, press(KeyCode::Enter));
        assert!(screen.notice().message().is_none());
        assert_eq!(wizard.current_page(), 2);
    }

    #[test]
    fn test_ctrl_r_starts_over() {
        let (mut screen, mut wizard) = screen_at(4);
        screen.handle_key(&mut wizard, press(KeyCode::Char('z')));
        screen.handle_key(&mut wizard, ctrl('r'));

        assert_eq!(wizard.current_page(), 1);
        assert_eq!(wizard.identity().get(crate::survey::IdentityField::Name), "");
        assert_eq!(screen.handle_key(&mut wizard, ctrl('c')), ScreenAction::Quit);
    }

    #[test]
    fn test_submit_trigger_stays_visible_when_scrolling() {
        let (mut screen, mut wizard) = screen_at(19);
        for _ in 0..20 {
            screen.handle_key(&mut wizard, press(KeyCode::Down));
        }

        assert_eq!(wizard.view().scroll_offset, wizard.page_line_count() - 1);
        let text = draw(&mut screen, &wizard);
        assert!(text.contains("[ Submit ]"));

        screen.handle_key(&mut wizard, press(KeyCode::Up));
        let text = draw(&mut screen, &wizard);
        assert!(text.contains("[ Submit ]"));
    }

    #[test]
    fn test_ctrl_r_ignored_while_submitting() {
        let (mut screen, mut wizard) = screen_at(19);
        let _pending = wizard.begin_submission().unwrap();

        screen.handle_key(&mut wizard, ctrl('r'));

        assert_eq!(wizard.current_page(), 19);
        assert!(wizard.trigger().is_busy());
    }
}
