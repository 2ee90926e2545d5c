//! TUI widgets for rendering different UI panels.

pub mod browser_popup;
pub mod dialog;
pub mod file_list;
pub mod header_bar;
pub mod help_popup;
pub mod progress;
pub mod results_log;
pub mod status_bar;

use ratatui::layout::Rect;

/// A rectangle of `width` x `height` centered in `area`, clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
