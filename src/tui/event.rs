//! Keyboard and input event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::App;
use super::browser::BrowserMode;
use crate::i18n;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // Windows reports both press and release
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    // ── Popup handling (captures all keys) ────────────────
    if app.confirm_quit {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('s') | KeyCode::Char('S') => {
                app.should_quit = true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm_quit = false,
            _ => {}
        }
        return Ok(());
    }

    if (key.modifiers, key.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
        app.request_quit();
        return Ok(());
    }

    if app.show_summary {
        app.show_summary = false;
        return Ok(());
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Ok(());
    }

    if app.browser.is_some() {
        handle_browser_keys(app, key);
        return Ok(());
    }

    handle_main_keys(app, key);
    Ok(())
}

/// Key handling for the main window.
fn handle_main_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('b') | KeyCode::Char('o') => app.open_file_browser(),
        KeyCode::Char('x') => app.clear_files(),
        KeyCode::Char('d') => app.open_dir_browser(),
        KeyCode::Char('c') | KeyCode::Enter => app.start_conversion(),
        KeyCode::Char('f') => app.open_output_folder(),
        KeyCode::Char('X') => app.clear_all(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_results(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_results(-1),
        KeyCode::Char('g') | KeyCode::Home => app.results_scroll = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.results_scroll = app.results.len().saturating_sub(1);
        }
        _ => {}
    }
}

/// Key handling while the file browser popup is open.
fn handle_browser_keys(app: &mut App, key: KeyEvent) {
    let Some(browser) = app.browser.as_mut() else {
        return;
    };
    let page = browser.viewport_height.max(1) as isize;

    let result = match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.browser = None;
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            browser.move_selection(1);
            Ok(())
        }
        KeyCode::Char('k') | KeyCode::Up => {
            browser.move_selection(-1);
            Ok(())
        }
        KeyCode::PageDown => {
            browser.move_selection(page);
            Ok(())
        }
        KeyCode::PageUp => {
            browser.move_selection(-page);
            Ok(())
        }
        KeyCode::Char('g') | KeyCode::Home => {
            browser.select_first();
            Ok(())
        }
        KeyCode::Char('G') | KeyCode::End => {
            browser.select_last();
            Ok(())
        }
        KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => browser.parent(),
        KeyCode::Char(' ') if browser.mode == BrowserMode::Files => {
            browser.toggle_mark();
            browser.move_selection(1);
            Ok(())
        }
        KeyCode::Char('.') if browser.mode == BrowserMode::Files => browser.toggle_show_all(),
        KeyCode::Char('a') if browser.mode == BrowserMode::Files => {
            let selection = browser.take_selection();
            if !selection.is_empty() {
                app.browser = None;
                app.add_files(selection);
            }
            return;
        }
        KeyCode::Char('s') if browser.mode == BrowserMode::OutputDir => {
            let dir = browser.cwd.clone();
            app.browser = None;
            app.set_output_dir(dir);
            return;
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => match browser.enter() {
            Ok(Some(file)) => {
                // Enter on a file adds the marked set (or just this file)
                let mut selection = browser.take_selection();
                if selection.is_empty() {
                    selection.push(file);
                }
                app.browser = None;
                app.add_files(selection);
                return;
            }
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        },
        _ => Ok(()),
    };

    if let Err(e) = result {
        tracing::warn!(error = %e, "Browser navigation failed");
        app.set_status(&format!("{}: {e}", i18n::tui_status_read_dir_failed()));
    }
}
