//! Progress gauge with its status label.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders, Gauge};
use ratatui::Frame;

use crate::i18n;
use crate::tui::app::{App, Progress};
use crate::tui::theme::current_theme;

/// Text shown on the gauge for a given state.
pub fn label(progress: &Progress) -> String {
    match *progress {
        Progress::Idle => i18n::tui_ready().to_string(),
        Progress::Converting { current, total } => format!(
            "{} {} {} {}...",
            i18n::tui_converting_file(),
            current.max(1),
            i18n::tui_of(),
            total
        ),
        Progress::Complete {
            succeeded,
            total,
            cancelled,
        } => {
            let mut text = format!(
                "{} {succeeded}/{total} {}",
                i18n::tui_complete(),
                i18n::tui_files_converted()
            );
            if cancelled {
                text.push(' ');
                text.push_str(i18n::tui_cancelled());
            }
            text
        }
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(i18n::tui_progress_title());

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(theme.gauge)
        .ratio(app.progress.ratio().clamp(0.0, 1.0))
        .label(label(&app.progress));

    frame.render_widget(gauge, area);
}
