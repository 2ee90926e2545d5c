//! File browser state used by the picker popup.
//!
//! In [`BrowserMode::Files`] it lists directories and `.oft` templates and
//! hands back the chosen files; in [`BrowserMode::OutputDir`] it only lists
//! directories and hands back the current one.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

/// What the browser is picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserMode {
    Files,
    OutputDir,
}

/// One row of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Directory listing with a cursor and a set of marked files.
#[derive(Debug)]
pub struct FileBrowser {
    pub mode: BrowserMode,
    pub cwd: PathBuf,
    pub entries: Vec<BrowserEntry>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub marked: BTreeSet<PathBuf>,
    /// List every file, not just templates (files mode only).
    pub show_all: bool,
    /// Rows visible in the popup (set during render).
    pub viewport_height: usize,
}

/// Whether `path` has the `.oft` extension (any case).
pub fn is_template(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("oft"))
}

impl FileBrowser {
    /// Open a browser rooted at `start`, falling back to the current directory
    /// when `start` is not a readable directory.
    pub fn open(mode: BrowserMode, start: &Path, show_all: bool) -> io::Result<Self> {
        let cwd = if start.is_dir() {
            start.to_path_buf()
        } else {
            std::env::current_dir()?
        };
        let mut browser = Self {
            mode,
            cwd,
            entries: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            marked: BTreeSet::new(),
            show_all,
            viewport_height: 10,
        };
        browser.refresh()?;
        Ok(browser)
    }

    /// Re-read the current directory.
    pub fn refresh(&mut self) -> io::Result<()> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in std::fs::read_dir(&self.cwd)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let is_dir = path.is_dir();
            if is_dir {
                dirs.push(BrowserEntry { name, path, is_dir });
            } else if self.mode == BrowserMode::Files && (self.show_all || is_template(&path)) {
                files.push(BrowserEntry { name, path, is_dir });
            }
        }

        dirs.sort_by_key(|e| e.name.to_lowercase());
        files.sort_by_key(|e| e.name.to_lowercase());
        dirs.extend(files);

        self.entries = dirs;
        self.selected = 0;
        self.scroll_offset = 0;
        Ok(())
    }

    /// The highlighted row.
    pub fn current(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.selected)
    }

    /// Move the cursor by `delta` rows, clamped to the listing.
    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.ensure_selected_visible();
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.ensure_selected_visible();
    }

    pub fn select_last(&mut self) {
        self.selected = self.entries.len().saturating_sub(1);
        self.ensure_selected_visible();
    }

    /// Activate the highlighted row.
    ///
    /// Directories are entered and `None` is returned; a file is returned so
    /// the caller can add it.
    pub fn enter(&mut self) -> io::Result<Option<PathBuf>> {
        let Some(entry) = self.current().cloned() else {
            return Ok(None);
        };
        if entry.is_dir {
            self.change_dir(entry.path)?;
            Ok(None)
        } else {
            Ok(Some(entry.path))
        }
    }

    /// Go to the parent directory, keeping the cursor on the directory we
    /// came from.
    pub fn parent(&mut self) -> io::Result<()> {
        let Some(parent) = self.cwd.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        let previous = std::mem::replace(&mut self.cwd, parent.clone());
        if let Err(e) = self.refresh() {
            self.cwd = previous;
            return Err(e);
        }
        if let Some(pos) = self.entries.iter().position(|e| e.path == previous) {
            self.selected = pos;
            self.ensure_selected_visible();
        }
        Ok(())
    }

    fn change_dir(&mut self, dir: PathBuf) -> io::Result<()> {
        let previous = std::mem::replace(&mut self.cwd, dir);
        if let Err(e) = self.refresh() {
            self.cwd = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Mark or unmark the highlighted file. Directories cannot be marked.
    pub fn toggle_mark(&mut self) {
        let Some(entry) = self.current() else {
            return;
        };
        if entry.is_dir {
            return;
        }
        let path = entry.path.clone();
        if !self.marked.remove(&path) {
            self.marked.insert(path);
        }
    }

    pub fn is_marked(&self, path: &Path) -> bool {
        self.marked.contains(path)
    }

    /// Flip between templates only and all files.
    pub fn toggle_show_all(&mut self) -> io::Result<()> {
        self.show_all = !self.show_all;
        self.refresh()
    }

    /// Files to add: the marked ones, else the highlighted file.
    pub fn take_selection(&self) -> Vec<PathBuf> {
        if !self.marked.is_empty() {
            return self.marked.iter().cloned().collect();
        }
        self.current()
            .filter(|e| !e.is_dir)
            .map(|e| vec![e.path.clone()])
            .unwrap_or_default()
    }

    fn ensure_selected_visible(&mut self) {
        let vp = self.viewport_height.max(1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + vp {
            self.scroll_offset = self.selected.saturating_sub(vp - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Zeta")).unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::write(dir.path().join("b.oft"), b"x").unwrap();
        std::fs::write(dir.path().join("A.OFT"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::write(dir.path().join(".hidden.oft"), b"x").unwrap();
        dir
    }

    fn names(browser: &FileBrowser) -> Vec<&str> {
        browser.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_is_template() {
        assert!(is_template(Path::new("a.oft")));
        assert!(is_template(Path::new("dir/B.OFT")));
        assert!(!is_template(Path::new("a.msg")));
        assert!(!is_template(Path::new("oft")));
    }

    #[test]
    fn test_files_mode_lists_dirs_then_templates() {
        let dir = fixture();
        let browser = FileBrowser::open(BrowserMode::Files, dir.path(), false).unwrap();
        assert_eq!(names(&browser), vec!["alpha", "Zeta", "A.OFT", "b.oft"]);
    }

    #[test]
    fn test_show_all_and_dir_mode() {
        let dir = fixture();
        let mut browser = FileBrowser::open(BrowserMode::Files, dir.path(), false).unwrap();
        browser.toggle_show_all().unwrap();
        assert!(names(&browser).contains(&"notes.txt"));

        let browser = FileBrowser::open(BrowserMode::OutputDir, dir.path(), true).unwrap();
        assert_eq!(names(&browser), vec!["alpha", "Zeta"]);
    }

    #[test]
    fn test_enter_and_parent() {
        let dir = fixture();
        std::fs::write(dir.path().join("Zeta").join("inner.oft"), b"x").unwrap();
        let mut browser = FileBrowser::open(BrowserMode::Files, dir.path(), false).unwrap();

        browser.move_selection(1);
        assert_eq!(browser.enter().unwrap(), None);
        assert_eq!(browser.cwd, dir.path().join("Zeta"));
        assert_eq!(names(&browser), vec!["inner.oft"]);
        assert_eq!(browser.enter().unwrap(), Some(dir.path().join("Zeta").join("inner.oft")));

        browser.parent().unwrap();
        assert_eq!(browser.cwd, dir.path());
        assert_eq!(browser.current().unwrap().name, "Zeta");
    }

    #[test]
    fn test_marking_and_selection() {
        let dir = fixture();
        let mut browser = FileBrowser::open(BrowserMode::Files, dir.path(), false).unwrap();

        // Directories cannot be marked
        browser.toggle_mark();
        assert!(browser.marked.is_empty());
        assert!(browser.take_selection().is_empty());

        browser.select_last();
        assert_eq!(browser.take_selection(), vec![dir.path().join("b.oft")]);

        browser.toggle_mark();
        browser.move_selection(-1);
        browser.toggle_mark();
        assert_eq!(
            browser.take_selection(),
            vec![dir.path().join("A.OFT"), dir.path().join("b.oft")]
        );

        browser.toggle_mark();
        assert!(!browser.is_marked(&dir.path().join("A.OFT")));
    }

    #[test]
    fn test_move_selection_clamps() {
        let dir = fixture();
        let mut browser = FileBrowser::open(BrowserMode::Files, dir.path(), false).unwrap();
        browser.move_selection(-5);
        assert_eq!(browser.selected, 0);
        browser.move_selection(100);
        assert_eq!(browser.selected, 3);
    }
}
