//! Help popup listing keyboard shortcuts, one or two columns wide.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::i18n;
use crate::tui::theme::{current_theme, Theme};

use super::centered_rect;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const KEY_WIDTH: usize = 8;

type Shortcut = (&'static str, &'static str);

fn main_shortcuts() -> Vec<Shortcut> {
    vec![
        ("b", i18n::tui_help_browse_files()),
        ("x", i18n::tui_help_clear_files()),
        ("d", i18n::tui_help_output_dir()),
        ("c/Enter", i18n::tui_help_convert()),
        ("f", i18n::tui_help_open_folder()),
        ("X", i18n::tui_help_clear_all()),
        ("j/k", i18n::tui_help_scroll_log()),
        ("?", i18n::tui_help_this_help()),
        ("q", i18n::tui_help_quit()),
    ]
}

fn browser_shortcuts() -> Vec<Shortcut> {
    vec![
        ("j/k", i18n::tui_help_nav()),
        ("Enter", i18n::tui_help_enter()),
        ("Bksp", i18n::tui_help_parent()),
        ("Space", i18n::tui_help_mark()),
        ("a", i18n::tui_help_add_marked()),
        ("s", i18n::tui_help_choose_dir()),
        (".", i18n::tui_help_toggle_all()),
        ("Esc", i18n::tui_help_close()),
    ]
}

pub fn render(frame: &mut Frame) {
    let theme = current_theme();
    let screen = frame.area();

    let popup_width = (screen.width * 70 / 100).min(screen.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(2) as usize;
    let cols = if inner_width >= 64 { 2 } else { 1 };
    let col_width = inner_width / cols;

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("  {}", i18n::tui_title()), theme.popup_title),
            Span::styled(format!("  v{VERSION}"), theme.dim),
        ]),
        Line::from(""),
    ];
    add_section(&mut lines, i18n::tui_help_main(), &main_shortcuts(), cols, col_width, &theme);
    lines.push(Line::from(""));
    add_section(
        &mut lines,
        i18n::tui_help_browser(),
        &browser_shortcuts(),
        cols,
        col_width,
        &theme,
    );

    let popup_height = (lines.len() as u16 + 3).min(screen.height.saturating_sub(2));
    let area = centered_rect(popup_width, popup_height, screen);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_help_title())
        .style(theme.popup);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Section title followed by its shortcuts laid out in `cols` columns.
fn add_section(
    lines: &mut Vec<Line<'static>>,
    title: &str,
    shortcuts: &[Shortcut],
    cols: usize,
    col_width: usize,
    theme: &Theme,
) {
    lines.push(Line::from(Span::styled(format!("  {title}"), theme.label)));

    for row in shortcuts.chunks(cols) {
        let mut spans = vec![Span::raw("  ")];
        for (key, desc) in row {
            let used = KEY_WIDTH + 1 + desc.width();
            spans.push(Span::styled(format!("{key:>KEY_WIDTH$}"), theme.key_hint));
            spans.push(Span::styled(format!(" {desc}"), theme.popup));
            spans.push(Span::raw(" ".repeat(col_width.saturating_sub(used).max(1))));
        }
        lines.push(Line::from(spans));
    }
}
