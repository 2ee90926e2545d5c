//! Selected-files panel and the output directory line.

use std::path::PathBuf;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Rows the panel needs, borders included.
pub fn height(app: &App) -> u16 {
    let lines = preview_lines(&app.files, app.config.display.file_preview_count).len();
    (lines.max(1) + 2) as u16
}

/// Text rows for the panel: a count line, the first `preview` names, and an
/// "and N more" line when the list is longer. Empty when nothing is selected.
pub fn preview_lines(files: &[PathBuf], preview: usize) -> Vec<String> {
    if files.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(preview + 2);
    lines.push(format!("{} {}", files.len(), i18n::tui_files_ready()));
    for file in files.iter().take(preview) {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());
        lines.push(format!("  \u{2022} {name}"));
    }
    if files.len() > preview {
        lines.push(format!(
            "  \u{2022} ... {} {} {}",
            i18n::tui_and(),
            files.len() - preview,
            i18n::tui_more_files()
        ));
    }
    lines
}

/// Render the selected-files panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(i18n::tui_files_title());

    let lines: Vec<Line> = if app.files.is_empty() {
        vec![Line::from(Span::styled(
            format!(" {}", i18n::tui_no_files()),
            theme.dim,
        ))]
    } else {
        preview_lines(&app.files, app.config.display.file_preview_count)
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == 0 { theme.success } else { theme.list_normal };
                Line::from(Span::styled(format!(" {text}"), style))
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the single-line output directory display.
pub fn render_output_dir(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let line = Line::from(vec![
        Span::styled(format!(" {}", i18n::tui_output_dir()), theme.label),
        Span::styled(app.output_dir.display().to_string(), theme.list_normal),
        Span::styled(format!("  [d] {}", i18n::tui_hint_output()), theme.dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
