//! The navigation state record.
//!
//! [`NavigationState`] holds the current directory, the visible entries and
//! the selection. All transitions consume `self` and return a new instance;
//! the selection is clamped on every transition so that
//! `selected_index < entries.len()` holds whenever the list is non-empty.

use std::path::{Path, PathBuf};

use crate::fs::entry::DirectoryEntry;
use crate::nav::path::join_entry;

/// Current directory, visible entries and selection.
///
/// `current_path` may run ahead of the entries while a navigation is
/// pending; `listed_path` always names the directory the entries came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    current_path: PathBuf,
    listed_path: Option<PathBuf>,
    entries: Vec<DirectoryEntry>,
    selected_index: usize,
    filtered: bool,
}

impl NavigationState {
    /// Creates a state pointing at `current_path` with nothing listed yet.
    pub fn new(current_path: PathBuf) -> Self {
        Self {
            current_path,
            listed_path: None,
            entries: Vec::new(),
            selected_index: 0,
            filtered: false,
        }
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    /// The directory whose listing is currently shown, if any listing succeeded.
    pub fn listed_path(&self) -> Option<&Path> {
        self.listed_path.as_deref()
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.entries.get(self.selected_index)
    }

    /// Absolute path of the selected entry, resolved against the listed directory.
    pub fn selected_path(&self) -> Option<PathBuf> {
        let dir = self.listed_path.as_deref()?;
        let entry = self.selected_entry()?;
        join_entry(dir, entry.os_name()).ok()
    }

    /// `true` while the current path has not been listed yet.
    pub fn is_pending(&self) -> bool {
        self.listed_path.as_deref() != Some(self.current_path.as_path())
    }

    /// `true` when the entries are search results rather than the full listing.
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Returns a new state with the selection moved to `index` (clamped to bounds).
    #[must_use]
    pub fn with_selection(self, index: usize) -> Self {
        let selected_index = clamp_index(index, self.entries.len());
        Self {
            selected_index,
            ..self
        }
    }

    /// Moves the selection up by one. No-op at the top.
    #[must_use]
    pub fn move_up(self) -> Self {
        if self.selected_index == 0 {
            return self;
        }
        let index = self.selected_index - 1;
        self.with_selection(index)
    }

    /// Moves the selection down by one. No-op at the bottom.
    #[must_use]
    pub fn move_down(self) -> Self {
        if self.selected_index + 1 >= self.entries.len() {
            return self;
        }
        let index = self.selected_index + 1;
        self.with_selection(index)
    }

    #[must_use]
    pub fn go_to_first(self) -> Self {
        self.with_selection(0)
    }

    #[must_use]
    pub fn go_to_last(self) -> Self {
        let last = self.entries.len().saturating_sub(1);
        self.with_selection(last)
    }

    /// Points the state at a new directory. Entries are kept until its listing arrives.
    #[must_use]
    pub fn with_current_path(self, current_path: PathBuf) -> Self {
        Self {
            current_path,
            ..self
        }
    }

    /// Applies a successful listing of `path`: entries replaced, selection reset.
    #[must_use]
    pub fn with_listing(self, path: PathBuf, entries: Vec<DirectoryEntry>) -> Self {
        Self {
            current_path: path.clone(),
            listed_path: Some(path),
            entries,
            selected_index: 0,
            filtered: false,
        }
    }

    /// Applies a fresh listing of the same directory, keeping the selection
    /// where it was (clamped into the new bounds).
    #[must_use]
    pub fn with_refreshed(self, entries: Vec<DirectoryEntry>) -> Self {
        let selected_index = clamp_index(self.selected_index, entries.len());
        Self {
            listed_path: Some(self.current_path.clone()),
            entries,
            selected_index,
            filtered: false,
            ..self
        }
    }

    /// Replaces the entries with search results for the current directory.
    #[must_use]
    pub fn with_search_results(self, entries: Vec<DirectoryEntry>) -> Self {
        Self {
            entries,
            selected_index: 0,
            filtered: true,
            ..self
        }
    }

    /// Points the state back at the last listed directory.
    ///
    /// Returns `None` when nothing has been listed yet.
    #[must_use]
    pub fn reverted(self) -> Option<Self> {
        let listed = self.listed_path.clone()?;
        Some(Self {
            current_path: listed,
            ..self
        })
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listed(names: &[&str]) -> NavigationState {
        let entries = names.iter().map(DirectoryEntry::file).collect();
        NavigationState::new(PathBuf::from("/")).with_listing(PathBuf::from("/"), entries)
    }

    #[test]
    fn new_state_is_pending_and_empty() {
        let state = NavigationState::new(PathBuf::from("/home"));
        assert!(state.is_pending());
        assert!(state.entries().is_empty());
        assert_eq!(state.selected_index(), 0);
        assert!(state.selected_entry().is_none());
        assert!(state.selected_path().is_none());
    }

    #[test]
    fn listing_settles_pending() {
        let state = listed(&["a", "b"]);
        assert!(!state.is_pending());
        assert_eq!(state.listed_path(), Some(Path::new("/")));
    }

    #[test]
    fn with_selection_clamps_to_bounds() {
        let state = listed(&["a", "b"]).with_selection(100);
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn with_selection_on_empty_is_zero() {
        let state = listed(&[]).with_selection(5);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn move_up_at_zero_is_noop() {
        let state = listed(&["a", "b"]).move_up();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn move_down_at_last_is_noop() {
        let state = listed(&["a", "b"]).with_selection(1).move_down();
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn move_down_on_empty_stays_at_zero() {
        let state = listed(&[]).move_down();
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn move_down_then_up() {
        let state = listed(&["a", "b", "c"]).move_down().move_down();
        assert_eq!(state.selected_index(), 2);
        assert_eq!(state.move_up().selected_index(), 1);
    }

    #[test]
    fn go_to_first_and_last() {
        let state = listed(&["a", "b", "c"]).go_to_last();
        assert_eq!(state.selected_index(), 2);
        assert_eq!(state.go_to_first().selected_index(), 0);
    }

    #[test]
    fn go_to_last_on_empty() {
        assert_eq!(listed(&[]).go_to_last().selected_index(), 0);
    }

    #[test]
    fn selected_path_joins_listed_dir() {
        let state = listed(&["a", "c.txt"]).with_selection(1);
        assert_eq!(state.selected_path(), Some(PathBuf::from("/c.txt")));
    }

    #[test]
    fn current_path_change_keeps_entries_and_pends() {
        let state = listed(&["a"]).with_current_path(PathBuf::from("/a"));
        assert!(state.is_pending());
        assert_eq!(state.entries().len(), 1);
        // the shown entries still resolve against the listed directory
        assert_eq!(state.selected_path(), Some(PathBuf::from("/a")));
    }

    #[test]
    fn listing_resets_selection() {
        let state = listed(&["a", "b", "c"]).with_selection(2);
        let state = state.with_listing(PathBuf::from("/x"), vec![DirectoryEntry::file("y")]);
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.current_path(), Path::new("/x"));
    }

    #[test]
    fn refresh_clamps_selection() {
        let state = listed(&["a", "b", "c"]).with_selection(2);
        let state = state.with_refreshed(vec![DirectoryEntry::file("a"), DirectoryEntry::file("b")]);
        assert_eq!(state.selected_index(), 1);

        let state = state.with_selection(0).with_refreshed(vec![
            DirectoryEntry::file("a"),
            DirectoryEntry::file("b"),
        ]);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn refresh_to_empty_resets_to_zero() {
        let state = listed(&["a", "b"]).with_selection(1).with_refreshed(vec![]);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn search_results_mark_filtered_and_reset_selection() {
        let state = listed(&["a", "b"]).with_selection(1);
        let state = state.with_search_results(vec![DirectoryEntry::file("b")]);
        assert!(state.is_filtered());
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.current_path(), Path::new("/"));

        let state = state.with_refreshed(vec![DirectoryEntry::file("a")]);
        assert!(!state.is_filtered());
    }

    #[test]
    fn reverted_returns_to_listed_dir() {
        let state = listed(&["a"]).with_current_path(PathBuf::from("/a"));
        let state = state.reverted().unwrap();
        assert_eq!(state.current_path(), Path::new("/"));
        assert!(!state.is_pending());
        assert_eq!(state.entries().len(), 1);
    }

    #[test]
    fn reverted_without_listing_is_none() {
        assert!(NavigationState::new(PathBuf::from("/a")).reverted().is_none());
    }
}
