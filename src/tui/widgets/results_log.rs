//! Scrollable log of per-file conversion results.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::{App, ResultLine};
use crate::tui::theme::current_theme;

/// Log text for one result: `✓ a.oft → a.eml` or `✗ a.oft - Error: …`.
pub fn format_line(line: &ResultLine) -> String {
    match line {
        ResultLine::Converted { input, output } => format!("\u{2713} {input} \u{2192} {output}"),
        ResultLine::Failed { input, error } => {
            format!("\u{2717} {input} - {}: {error}", i18n::tui_error())
        }
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(i18n::tui_results_title());

    let inner_height = block.inner(area).height as usize;
    // Keep the scrolled-to line on the last visible row once the log overflows
    let first = (app.results_scroll + 1).saturating_sub(inner_height.max(1));

    let lines: Vec<Line> = app
        .results
        .iter()
        .skip(first)
        .take(inner_height)
        .map(|result| {
            let style = match result {
                ResultLine::Converted { .. } => theme.success,
                ResultLine::Failed { .. } => theme.error,
            };
            Line::from(Span::styled(format!(" {}", format_line(result)), style))
        })
        .collect();

    let log = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(log, area);
}
