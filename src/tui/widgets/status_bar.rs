//! Bottom status bar showing transient messages or context-sensitive keyboard hints.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::browser::BrowserMode;
use crate::tui::theme::current_theme;

/// Version string shown at the right edge of the status bar.
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let version_text = format!("v{VERSION} ");
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(version_text.len() as u16),
        ])
        .split(area);

    let content = if let Some((msg, _)) = &app.status_message {
        Line::from(Span::styled(format!(" {msg}"), theme.status_bar))
    } else {
        let mut spans = Vec::new();
        for (i, (key, desc, enabled)) in build_hints(app).into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", theme.status_bar));
            }
            let (key_style, desc_style) = if enabled {
                (theme.key_hint, theme.status_bar)
            } else {
                (theme.dim, theme.dim)
            };
            spans.push(Span::styled(format!(" {key}"), key_style));
            spans.push(Span::styled(format!(":{desc}"), desc_style));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(content).style(theme.status_bar), chunks[0]);

    let version = Paragraph::new(Line::from(Span::styled(version_text, theme.border)))
        .alignment(Alignment::Right)
        .style(theme.status_bar);
    frame.render_widget(version, chunks[1]);
}

/// Hint triples (key, description, enabled) for the current context.
fn build_hints(app: &App) -> Vec<(&'static str, &'static str, bool)> {
    if let Some(browser) = &app.browser {
        let mut hints = vec![
            ("j/k", i18n::tui_hint_nav(), true),
            ("Enter", i18n::tui_hint_open_dir(), true),
            ("Bksp", i18n::tui_hint_parent(), true),
        ];
        match browser.mode {
            BrowserMode::Files => {
                hints.push(("Space", i18n::tui_hint_mark(), true));
                hints.push(("a", i18n::tui_hint_add(), true));
                hints.push((".", i18n::tui_hint_all_files(), true));
            }
            BrowserMode::OutputDir => hints.push(("s", i18n::tui_hint_choose_dir(), true)),
        }
        hints.push(("Esc", i18n::tui_hint_cancel(), true));
        return hints;
    }

    let idle = !app.is_converting();
    vec![
        ("b", i18n::tui_hint_browse(), idle),
        ("x", i18n::tui_hint_clear(), idle),
        ("d", i18n::tui_hint_output(), true),
        ("c", i18n::tui_hint_convert(), app.can_convert()),
        ("f", i18n::tui_hint_open_folder(), app.can_open_folder),
        ("X", i18n::tui_hint_clear_all(), idle),
        ("j/k", i18n::tui_hint_scroll(), !app.results.is_empty()),
        ("?", i18n::tui_hint_help(), true),
        ("q", i18n::tui_hint_quit(), true),
    ]
}
