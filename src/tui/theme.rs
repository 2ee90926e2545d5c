//! Color theme definitions for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// A complete color theme for the TUI.
pub struct Theme {
    pub header_bar: Style,
    pub header_title: Style,
    pub status_bar: Style,
    pub key_hint: Style,
    pub label: Style,
    pub dim: Style,
    pub list_selected: Style,
    pub list_marked: Style,
    pub list_normal: Style,
    pub dir_entry: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub gauge: Style,
    pub border: Style,
    pub popup: Style,
    pub popup_title: Style,
}

impl Theme {
    /// Dark theme (default).
    pub fn dark() -> Self {
        let bar_bg = Color::Rgb(30, 30, 46);
        Self {
            header_bar: Style::default().fg(Color::Rgb(200, 200, 220)).bg(bar_bg),
            header_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .bg(bar_bg)
                .add_modifier(Modifier::BOLD),
            status_bar: Style::default().fg(Color::Rgb(150, 150, 170)).bg(bar_bg),
            key_hint: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            label: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(110, 110, 130)),
            list_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 100)),
            list_marked: Style::default().fg(Color::Yellow),
            list_normal: Style::default().fg(Color::Rgb(200, 200, 220)),
            dir_entry: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Rgb(120, 200, 120)),
            warning: Style::default().fg(Color::Rgb(230, 190, 90)),
            error: Style::default().fg(Color::Rgb(235, 110, 110)),
            gauge: Style::default()
                .fg(Color::Rgb(90, 130, 220))
                .bg(Color::Rgb(40, 40, 60)),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            popup: Style::default()
                .fg(Color::Rgb(220, 220, 230))
                .bg(Color::Rgb(20, 20, 35)),
            popup_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Return the active theme.
pub fn current_theme() -> Theme {
    Theme::dark()
}
