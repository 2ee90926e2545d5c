//! Terminal UI: entry point and event loop.

pub mod app;
pub mod browser;
pub mod event;
pub mod opener;
pub mod theme;
pub mod ui;
pub mod widgets;
pub mod worker;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{poll as ct_poll, read as ct_read, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use self::app::App;
use crate::config::Config;

/// Run the interactive converter. Blocks until the user quits.
///
/// `files` pre-populate the selection. Settings are saved on exit.
pub fn run_tui(files: Vec<PathBuf>, config: Config) -> anyhow::Result<()> {
    let app = App::new(files, config, None);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app);

    // Restore terminal (always, even on error)
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop: render → poll → handle → repeat.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| {
            ui::render(frame, &mut app);
        })?;

        if ct_poll(tick_rate)? {
            if let Event::Key(key) = ct_read()? {
                event::handle_key_event(&mut app, key)?;
            }
        }

        // Drain worker messages, expire status text
        app.tick();

        if app.should_quit {
            break;
        }
    }

    if let Some(mut worker) = app.worker.take() {
        tracing::info!("Quitting during conversion, waiting for the current file");
        worker.shutdown();
    }
    app.persist_config();
    Ok(())
}
