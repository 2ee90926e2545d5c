//! Batch conversion shared by the CLI and the terminal UI.
//!
//! A failing file never aborts the batch: its error is recorded and the next
//! file is processed.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::convert::{convert_oft_to_eml, output_path_in};
use crate::error::{ConvertError, Result};

/// Options applied to every file of a batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Replace existing `.eml` files instead of picking a unique name.
    pub overwrite: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    /// File `index` (zero-based) of `total` is about to be converted.
    Started {
        index: usize,
        total: usize,
        input: PathBuf,
    },
    /// File `index` was written to `output`.
    Converted {
        index: usize,
        input: PathBuf,
        output: PathBuf,
    },
    /// File `index` failed.
    Failed {
        index: usize,
        input: PathBuf,
        error: String,
    },
}

/// Result for a single input file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub input: PathBuf,
    /// Output path, or the error message.
    pub result: std::result::Result<PathBuf, String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate verdict of a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSummary {
    /// Nothing was converted because no files were given.
    Empty,
    AllSucceeded,
    Partial,
    AllFailed,
}

/// Everything that happened during a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    /// Set if the batch stopped early on request.
    pub cancelled: bool,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn summary(&self) -> BatchSummary {
        match (self.total(), self.succeeded()) {
            (0, _) => BatchSummary::Empty,
            (total, ok) if ok == total => BatchSummary::AllSucceeded,
            (_, 0) => BatchSummary::AllFailed,
            _ => BatchSummary::Partial,
        }
    }
}

/// Convert `files` into `output_dir`, one after another.
///
/// `cancel` is checked before each file; once set, the remaining files are
/// skipped and the report is marked as cancelled. Returns an error only if
/// the output directory cannot be created.
pub fn convert_batch(
    files: &[PathBuf],
    output_dir: &Path,
    options: BatchOptions,
    progress: &dyn Fn(BatchEvent),
    cancel: Option<&AtomicBool>,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;

    let total = files.len();
    let mut report = BatchReport {
        outcomes: Vec::with_capacity(total),
        cancelled: false,
    };

    for (index, input) in files.iter().enumerate() {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            info!(done = index, total, "Batch cancelled");
            report.cancelled = true;
            break;
        }

        progress(BatchEvent::Started {
            index,
            total,
            input: input.clone(),
        });

        let result = output_path_in(input, output_dir, options.overwrite)
            .and_then(|output| convert_oft_to_eml(input, Some(&output)));

        match result {
            Ok(output) => {
                progress(BatchEvent::Converted {
                    index,
                    input: input.clone(),
                    output: output.clone(),
                });
                report.outcomes.push(FileOutcome {
                    input: input.clone(),
                    result: Ok(output),
                });
            }
            Err(e) => {
                warn!(input = %input.display(), error = %e, "Conversion failed");
                let error = e.to_string();
                progress(BatchEvent::Failed {
                    index,
                    input: input.clone(),
                    error: error.clone(),
                });
                report.outcomes.push(FileOutcome {
                    input: input.clone(),
                    result: Err(error),
                });
            }
        }
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        total,
        "Batch finished"
    );
    Ok(report)
}
