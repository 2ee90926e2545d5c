//! Modal dialogs: the end-of-batch summary and the quit confirmation.

use ratatui::layout::Alignment;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::convert::batch::{BatchReport, BatchSummary};
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

use super::centered_rect;

/// Title and message for a finished batch.
pub fn summary_text(report: &BatchReport) -> (&'static str, String) {
    match report.summary() {
        BatchSummary::AllSucceeded => (
            i18n::tui_summary_ok_title(),
            format!("{} ({})", i18n::tui_summary_all_ok(), report.total()),
        ),
        BatchSummary::Partial => (
            i18n::tui_summary_partial_title(),
            format!(
                "{} {} {} {}",
                report.succeeded(),
                i18n::tui_of(),
                report.total(),
                i18n::tui_summary_partial()
            ),
        ),
        BatchSummary::AllFailed | BatchSummary::Empty => (
            i18n::tui_summary_failed_title(),
            i18n::tui_summary_none().to_string(),
        ),
    }
}

pub fn render_summary(frame: &mut Frame, app: &App) {
    let Some(report) = &app.last_report else {
        return;
    };
    let theme = current_theme();
    let (title, message) = summary_text(report);
    let border = match report.summary() {
        BatchSummary::AllSucceeded => theme.success,
        BatchSummary::Partial => theme.warning,
        BatchSummary::AllFailed | BatchSummary::Empty => theme.error,
    };
    render_dialog(frame, title, &message, i18n::tui_press_any_key(), border);
}

pub fn render_quit_confirm(frame: &mut Frame) {
    let theme = current_theme();
    render_dialog(
        frame,
        i18n::tui_quit_title(),
        i18n::tui_quit_confirm(),
        "",
        theme.warning,
    );
}

fn render_dialog(frame: &mut Frame, title: &str, message: &str, footer: &str, border: Style) {
    let theme = current_theme();
    let area = centered_rect(56, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title.to_string(), theme.popup_title))
        .style(theme.popup);

    let mut lines = vec![Line::from(""), Line::from(message.to_string())];
    if !footer.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(footer.to_string(), theme.dim)));
    }

    let body = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, area);
}
