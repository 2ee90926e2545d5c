//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::App;
use super::widgets;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header bar
            Constraint::Length(widgets::file_list::height(app)),
            Constraint::Length(1), // output directory
            Constraint::Length(3), // progress gauge
            Constraint::Min(3),    // results log
            Constraint::Length(1), // status bar
        ])
        .split(size);

    widgets::header_bar::render(frame, app, vertical[0]);
    widgets::file_list::render(frame, app, vertical[1]);
    widgets::file_list::render_output_dir(frame, app, vertical[2]);
    widgets::progress::render(frame, app, vertical[3]);
    widgets::results_log::render(frame, app, vertical[4]);
    widgets::status_bar::render(frame, app, vertical[5]);

    // Popups (rendered on top of everything)
    if let Some(browser) = app.browser.as_mut() {
        widgets::browser_popup::render(frame, browser);
    }
    if app.show_help {
        widgets::help_popup::render(frame);
    }
    if app.show_summary {
        widgets::dialog::render_summary(frame, app);
    }
    if app.confirm_quit {
        widgets::dialog::render_quit_confirm(frame);
    }
}
