//! In-memory copy source for copy/paste.

use std::path::{Path, PathBuf};

/// A marked copy source. `file_name` is for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardState {
    source_path: PathBuf,
    file_name: String,
}

impl ClipboardState {
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Holds at most one copy source. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    state: Option<ClipboardState>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any previous source.
    pub fn mark(&mut self, source_path: PathBuf, file_name: impl Into<String>) {
        self.state = Some(ClipboardState {
            source_path,
            file_name: file_name.into(),
        });
    }

    pub fn get(&self) -> Option<&ClipboardState> {
        self.state.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none()
    }

    /// Where pasting into `dir` would write: `dir` joined with the source's
    /// on-disk name.
    pub fn destination_in(&self, dir: &Path) -> Option<PathBuf> {
        let name = self.state.as_ref()?.source_path.file_name()?;
        Some(dir.join(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let clipboard = Clipboard::new();
        assert!(clipboard.is_empty());
        assert!(clipboard.destination_in(Path::new("/b")).is_none());
    }

    #[test]
    fn mark_then_destination() {
        let mut clipboard = Clipboard::new();
        clipboard.mark(PathBuf::from("/a/c.txt"), "c.txt");

        let state = clipboard.get().unwrap();
        assert_eq!(state.source_path(), Path::new("/a/c.txt"));
        assert_eq!(state.file_name(), "c.txt");
        assert_eq!(
            clipboard.destination_in(Path::new("/b")),
            Some(PathBuf::from("/b/c.txt"))
        );
        assert_eq!(
            clipboard.destination_in(Path::new("/")),
            Some(PathBuf::from("/c.txt"))
        );
    }

    #[test]
    fn destination_uses_disk_name_not_display_name() {
        let mut clipboard = Clipboard::new();
        clipboard.mark(PathBuf::from("/a/re\u{301}sume\u{301}.txt"), "r\u{e9}sum\u{e9}.txt");
        assert_eq!(
            clipboard.destination_in(Path::new("/b")),
            Some(PathBuf::from("/b/re\u{301}sume\u{301}.txt"))
        );
    }

    #[test]
    fn mark_replaces_previous_source() {
        let mut clipboard = Clipboard::new();
        clipboard.mark(PathBuf::from("/a/one"), "one");
        clipboard.mark(PathBuf::from("/a/two"), "two");
        assert_eq!(clipboard.get().unwrap().file_name(), "two");
    }
}
