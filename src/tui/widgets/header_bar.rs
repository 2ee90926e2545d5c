//! Top header bar showing the title and selection count.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the top header bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let mut spans = vec![
        Span::styled(format!(" {}", i18n::tui_title()), theme.header_title),
        Span::styled(
            format!(" | {} {}", app.files.len(), i18n::tui_status_added()),
            theme.header_bar,
        ),
    ];
    if app.is_converting() {
        spans.push(Span::styled(" | ...", theme.header_bar));
    }

    // Right-aligned help hint
    let left_len: usize = spans.iter().map(|s| s.content.width()).sum();
    let right_text = format!(" [?] {} ", i18n::tui_hint_help());
    let right_len = right_text.width();
    if (area.width as usize) > left_len + right_len {
        let padding = area.width as usize - left_len - right_len;
        spans.push(Span::styled(" ".repeat(padding), theme.header_bar));
        spans.push(Span::styled(right_text, theme.header_bar));
    }

    let bar = Paragraph::new(Line::from(spans)).style(theme.header_bar);
    frame.render_widget(bar, area);
}
