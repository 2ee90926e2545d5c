//! Global application state for the TUI (the "Model" in Elm architecture).

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{self, Config};
use crate::convert::batch::{BatchEvent, BatchOptions, BatchReport};
use crate::i18n;
use crate::tui::browser::{BrowserMode, FileBrowser};
use crate::tui::opener;
use crate::tui::worker::{ConversionWorker, WorkerMessage};

/// State of the progress gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Idle,
    /// `current` is one-based.
    Converting { current: usize, total: usize },
    Complete {
        succeeded: usize,
        total: usize,
        cancelled: bool,
    },
}

impl Progress {
    /// Fraction for the gauge, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        match *self {
            Self::Idle => 0.0,
            Self::Converting { current, total } if total > 0 => {
                current.saturating_sub(1) as f64 / total as f64
            }
            Self::Converting { .. } => 0.0,
            Self::Complete { .. } => 1.0,
        }
    }
}

/// One line of the results log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultLine {
    Converted { input: String, output: String },
    Failed { input: String, error: String },
}

/// Complete TUI state.
pub struct App {
    // ── Data ──────────────────────────────────
    /// Templates queued for conversion, in selection order.
    pub files: Vec<PathBuf>,
    /// Where converted messages are written.
    pub output_dir: PathBuf,
    /// Loaded settings; written back when the output directory changes.
    pub config: Config,
    /// Explicit settings file, if any (tests use a temporary one).
    pub config_path: Option<PathBuf>,

    // ── Conversion ────────────────────────────
    pub worker: Option<ConversionWorker>,
    pub progress: Progress,
    pub results: Vec<ResultLine>,
    /// First visible line of the results log.
    pub results_scroll: usize,
    /// Report of the last finished batch.
    pub last_report: Option<BatchReport>,
    /// Enabled once a batch has written at least one file.
    pub can_open_folder: bool,

    // ── UI state ──────────────────────────────
    pub browser: Option<FileBrowser>,
    pub show_help: bool,
    pub show_summary: bool,
    pub confirm_quit: bool,

    // ── Lifecycle ─────────────────────────────
    pub should_quit: bool,
    /// Transient status message and the instant it was set.
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app with `files` pre-selected.
    pub fn new(files: Vec<PathBuf>, config: Config, config_path: Option<PathBuf>) -> Self {
        let output_dir = config.output_dir();
        let mut app = Self {
            files: Vec::new(),
            output_dir,
            config,
            config_path,
            worker: None,
            progress: Progress::Idle,
            results: Vec::new(),
            results_scroll: 0,
            last_report: None,
            can_open_folder: false,
            browser: None,
            show_help: false,
            show_summary: false,
            confirm_quit: false,
            should_quit: false,
            status_message: None,
        };
        app.add_files(files);
        app.status_message = None;
        app
    }

    pub fn is_converting(&self) -> bool {
        self.worker.is_some()
    }

    /// Whether the convert action is available.
    pub fn can_convert(&self) -> bool {
        !self.is_converting() && !self.files.is_empty()
    }

    // ── Selection ─────────────────────────────

    /// Append files to the selection, skipping ones already queued.
    pub fn add_files(&mut self, paths: Vec<PathBuf>) {
        let before = self.files.len();
        for path in paths {
            if !self.files.contains(&path) {
                self.files.push(path);
            }
        }
        let added = self.files.len() - before;
        self.set_status(&format!("{added} {}", i18n::tui_status_added()));
    }

    pub fn clear_files(&mut self) {
        if self.is_converting() {
            self.set_status(i18n::tui_status_busy());
            return;
        }
        self.files.clear();
        self.set_status(i18n::tui_status_cleared());
    }

    /// Reset files, log, and progress.
    pub fn clear_all(&mut self) {
        if self.is_converting() {
            self.set_status(i18n::tui_status_busy());
            return;
        }
        self.files.clear();
        self.results.clear();
        self.results_scroll = 0;
        self.progress = Progress::Idle;
        self.last_report = None;
        self.can_open_folder = false;
        self.set_status(i18n::tui_status_cleared());
    }

    // ── Browser ───────────────────────────────

    /// Open the picker for templates, starting next to the last selected file.
    pub fn open_file_browser(&mut self) {
        if self.is_converting() {
            self.set_status(i18n::tui_status_busy());
            return;
        }
        let start = self
            .files
            .last()
            .and_then(|p| p.parent())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        self.open_browser(BrowserMode::Files, &start);
    }

    /// Open the picker for the output directory.
    pub fn open_dir_browser(&mut self) {
        if self.is_converting() {
            self.set_status(i18n::tui_status_busy());
            return;
        }
        let start = self.output_dir.clone();
        self.open_browser(BrowserMode::OutputDir, &start);
    }

    fn open_browser(&mut self, mode: BrowserMode, start: &Path) {
        match FileBrowser::open(mode, start, self.config.display.show_all_files) {
            Ok(browser) => self.browser = Some(browser),
            Err(e) => {
                tracing::warn!(dir = %start.display(), error = %e, "Cannot open browser");
                self.set_status(&format!("{}: {e}", i18n::tui_status_read_dir_failed()));
            }
        }
    }

    /// Use `dir` as the output directory and persist it right away.
    ///
    /// Ignored while a batch is writing into the current directory.
    pub fn set_output_dir(&mut self, dir: PathBuf) {
        if self.is_converting() {
            self.set_status(i18n::tui_status_busy());
            return;
        }
        self.output_dir = dir.clone();
        self.config.convert.output_dir = Some(dir);
        self.persist_config();
        self.set_status(i18n::tui_status_output_set());
    }

    /// Write the settings file; failures are logged and otherwise ignored.
    pub fn persist_config(&self) {
        let result = match &self.config_path {
            Some(path) => config::save_config_to(&self.config, path),
            None => config::save_config(&self.config),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to save settings");
        }
    }

    // ── Conversion ────────────────────────────

    /// Start converting the selection on the worker thread.
    pub fn start_conversion(&mut self) {
        if self.is_converting() {
            self.set_status(i18n::tui_status_busy());
            return;
        }
        if self.files.is_empty() {
            self.set_status(i18n::tui_status_no_files());
            return;
        }

        let options = BatchOptions {
            overwrite: self.config.convert.overwrite,
        };
        match ConversionWorker::spawn(self.files.clone(), self.output_dir.clone(), options) {
            Ok(worker) => {
                self.results.clear();
                self.results_scroll = 0;
                self.last_report = None;
                self.show_summary = false;
                self.progress = Progress::Converting {
                    current: 0,
                    total: self.files.len(),
                };
                self.worker = Some(worker);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to start worker");
                self.set_status(&format!("{}: {e}", i18n::tui_error()));
            }
        }
    }

    /// Apply one message from the worker.
    pub fn handle_worker_message(&mut self, message: WorkerMessage) {
        match message {
            WorkerMessage::Progress(BatchEvent::Started { index, total, .. }) => {
                self.progress = Progress::Converting {
                    current: index + 1,
                    total,
                };
            }
            WorkerMessage::Progress(BatchEvent::Converted { input, output, .. }) => {
                self.push_result(ResultLine::Converted {
                    input: file_name(&input),
                    output: file_name(&output),
                });
            }
            WorkerMessage::Progress(BatchEvent::Failed { input, error, .. }) => {
                self.push_result(ResultLine::Failed {
                    input: file_name(&input),
                    error,
                });
            }
            WorkerMessage::Finished(report) => {
                self.worker = None;
                self.progress = Progress::Complete {
                    succeeded: report.succeeded(),
                    total: report.total(),
                    cancelled: report.cancelled,
                };
                if report.succeeded() > 0 {
                    self.can_open_folder = true;
                }
                self.last_report = Some(report);
                self.show_summary = true;
            }
            WorkerMessage::Failed(error) => {
                self.worker = None;
                self.progress = Progress::Idle;
                self.push_result(ResultLine::Failed {
                    input: self.output_dir.display().to_string(),
                    error,
                });
            }
        }
    }

    fn push_result(&mut self, line: ResultLine) {
        self.results.push(line);
        // Follow the tail of the log
        self.results_scroll = self.results.len().saturating_sub(1);
    }

    pub fn scroll_results(&mut self, delta: isize) {
        let last = self.results.len().saturating_sub(1);
        self.results_scroll = self.results_scroll.saturating_add_signed(delta).min(last);
    }

    pub fn open_output_folder(&mut self) {
        if !self.can_open_folder {
            self.set_status(i18n::tui_status_nothing_converted());
            return;
        }
        match opener::open_folder(&self.output_dir) {
            Ok(()) => self.set_status(i18n::tui_status_opened()),
            Err(e) => {
                tracing::warn!(dir = %self.output_dir.display(), error = %e, "Cannot open folder");
                self.set_status(&format!("{}: {e}", i18n::tui_status_open_failed()));
            }
        }
    }

    // ── Lifecycle ─────────────────────────────

    /// Quit, asking first while a conversion runs.
    pub fn request_quit(&mut self) {
        if self.is_converting() {
            self.confirm_quit = true;
        } else {
            self.should_quit = true;
        }
    }

    /// Set a transient status message that auto-clears after a few seconds.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
    }

    /// Called every tick: drains the worker and clears expired status messages.
    pub fn tick(&mut self) {
        let messages = self
            .worker
            .as_ref()
            .map(ConversionWorker::drain)
            .unwrap_or_default();
        for message in messages {
            self.handle_worker_message(message);
        }

        if let Some((_, when)) = &self.status_message {
            if when.elapsed().as_secs() >= 5 {
                self.status_message = None;
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
