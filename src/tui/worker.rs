//! Background conversion worker.
//!
//! One thread runs [`convert_batch`] and reports back over an `mpsc`
//! channel; the UI drains the channel on every tick.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::convert::batch::{convert_batch, BatchEvent, BatchOptions, BatchReport};

/// Messages sent from the worker thread to the UI.
#[derive(Debug)]
pub enum WorkerMessage {
    Progress(BatchEvent),
    Finished(BatchReport),
    /// The batch could not start (e.g. the output directory is unusable).
    Failed(String),
}

/// Handle to a running conversion.
pub struct ConversionWorker {
    rx: Receiver<WorkerMessage>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ConversionWorker {
    /// Start converting `files` into `output_dir` on a new thread.
    pub fn spawn(
        files: Vec<PathBuf>,
        output_dir: PathBuf,
        options: BatchOptions,
    ) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let handle = std::thread::Builder::new()
            .name("oft2eml-worker".into())
            .spawn(move || {
                tracing::debug!(files = files.len(), "Worker started");
                let progress_tx = tx.clone();
                let result = convert_batch(
                    &files,
                    &output_dir,
                    options,
                    &|event| {
                        // The UI may already be gone; nothing left to report to
                        let _ = progress_tx.send(WorkerMessage::Progress(event));
                    },
                    Some(&*flag),
                );
                let message = match result {
                    Ok(report) => WorkerMessage::Finished(report),
                    Err(e) => WorkerMessage::Failed(e.to_string()),
                };
                let _ = tx.send(message);
            })?;

        Ok(Self {
            rx,
            cancel,
            handle: Some(handle),
        })
    }

    /// Everything the worker has sent since the last call, without blocking.
    pub fn drain(&self) -> Vec<WorkerMessage> {
        let mut messages = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(msg) => messages.push(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        messages
    }

    /// Ask the worker to stop before the next file.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Cancel and wait for the thread to exit. The file being converted is
    /// finished first.
    pub fn shutdown(&mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Conversion worker panicked");
            }
        }
    }
}

impl Drop for ConversionWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_finish(worker: &ConversionWorker) -> Vec<WorkerMessage> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut all = Vec::new();
        while Instant::now() < deadline {
            all.extend(worker.drain());
            if all
                .iter()
                .any(|m| matches!(m, WorkerMessage::Finished(_) | WorkerMessage::Failed(_)))
            {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        all
    }

    #[test]
    fn test_worker_reports_progress_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![dir.path().join("missing.oft")];
        let worker =
            ConversionWorker::spawn(files, dir.path().join("out"), BatchOptions::default())
                .unwrap();

        let messages = wait_for_finish(&worker);
        assert!(matches!(
            messages.first(),
            Some(WorkerMessage::Progress(BatchEvent::Started { total: 1, .. }))
        ));
        match messages.last() {
            Some(WorkerMessage::Finished(report)) => {
                assert_eq!(report.total(), 1);
                assert_eq!(report.failed(), 1);
            }
            other => panic!("unexpected final message: {other:?}"),
        }
    }

    #[test]
    fn test_worker_fails_on_unusable_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();

        let worker = ConversionWorker::spawn(
            vec![dir.path().join("a.oft")],
            blocker.join("out"),
            BatchOptions::default(),
        )
        .unwrap();

        let messages = wait_for_finish(&worker);
        assert!(matches!(messages.last(), Some(WorkerMessage::Failed(_))));
    }
}
