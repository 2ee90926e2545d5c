//! File browser popup for picking templates or the output directory.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::i18n;
use crate::tui::browser::{BrowserMode, FileBrowser};
use crate::tui::theme::current_theme;

use super::centered_rect;

pub fn render(frame: &mut Frame, browser: &mut FileBrowser) {
    let theme = current_theme();
    let screen = frame.area();
    let area = centered_rect(
        (screen.width * 70 / 100).max(40),
        (screen.height * 70 / 100).max(10),
        screen,
    );

    frame.render_widget(Clear, area);

    let title = match browser.mode {
        BrowserMode::Files => i18n::tui_browser_files_title(),
        BrowserMode::OutputDir => i18n::tui_browser_dir_title(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(title)
        .style(theme.popup);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Current directory (1) + listing
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let cwd = browser.cwd.display().to_string();
    let max = rows[0].width as usize;
    let cwd = if cwd.width() > max {
        // Keep the tail, which is the part that changes while navigating
        let skip = cwd.chars().count().saturating_sub(max.saturating_sub(1));
        format!("\u{2026}{}", cwd.chars().skip(skip).collect::<String>())
    } else {
        cwd
    };
    frame.render_widget(
        Paragraph::new(Span::styled(cwd, theme.label)),
        rows[0],
    );

    let viewport = rows[1].height as usize;
    browser.viewport_height = viewport;

    if browser.entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("  {}", i18n::tui_browser_empty()),
                theme.dim,
            )),
            rows[1],
        );
        return;
    }

    let lines: Vec<Line> = browser
        .entries
        .iter()
        .enumerate()
        .skip(browser.scroll_offset)
        .take(viewport)
        .map(|(i, entry)| {
            let marked = browser.is_marked(&entry.path);
            let marker = if marked { "*" } else { " " };
            let name = if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            let mut style = if entry.is_dir {
                theme.dir_entry
            } else if marked {
                theme.list_marked
            } else {
                theme.list_normal
            };
            if i == browser.selected {
                style = theme.list_selected.add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(format!("{marker} {name}"), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), rows[1]);
}
