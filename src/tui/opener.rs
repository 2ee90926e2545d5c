//! Open a folder in the platform file manager.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";

#[cfg(target_os = "macos")]
const OPENER: &str = "open";

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const OPENER: &str = "xdg-open";

/// Launch the file manager on `dir` without waiting for it.
pub fn open_folder(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("not a directory: {}", dir.display()),
        ));
    }
    tracing::debug!(opener = OPENER, dir = %dir.display(), "Opening folder");
    Command::new(OPENER)
        .arg(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
