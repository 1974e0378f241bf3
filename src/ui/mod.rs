pub mod identity_form;
mod notice;
mod pages;
pub mod survey_screen;
pub mod terminal_guard;

pub use identity_form::IdentityForm;
pub use notice::NoticeDialog;
pub use survey_screen::{ScreenAction, SurveyScreen};
pub use terminal_guard::{install_panic_hook, TerminalGuard};

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Helper to create a centered rect
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
