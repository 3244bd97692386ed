//! Event system for communication between UI and Core.
//!
//! The UI translates user input into [`Command`]s, which the
//! [`Browser`](crate::browser::Browser) processes. The browser reports what
//! happened back as [`Event`]s, which the UI shows as notifications.

use std::path::PathBuf;

/// An action the UI requests the core to perform.
///
/// Commands flow **UI → Core**. The core never creates commands itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move the selection up by one entry.
    CursorUp,
    /// Move the selection down by one entry.
    CursorDown,
    /// Jump the selection to the first entry.
    CursorTop,
    /// Jump the selection to the last entry.
    CursorBottom,
    /// Select the entry at the given index with the pointer.
    PointerSelect(usize),
    /// Select and activate the entry at the given index with the pointer.
    PointerActivate(usize),
    /// Scroll the viewport by the given number of rows with the pointer.
    PointerScroll(isize),
    /// Activate the selected entry (enter directory or open file).
    Enter,
    /// Move to the parent directory.
    GoUp,
    /// Re-read the current directory.
    Refresh,
    /// Give the search input focus.
    FocusSearch,
    /// Append a character to the search query.
    SearchInput(char),
    /// Remove the last character of the search query.
    SearchBackspace,
    /// Commit the search query.
    CommitSearch,
    /// Take focus away from the search input.
    BlurSearch,
    /// Remember the selected entry as the copy source.
    MarkCopySource,
    /// Copy the copy source into the current directory.
    Paste,
    /// Delete the selected entry.
    DeleteSelected,
    /// Open the name prompt to rename the selected entry.
    BeginRename,
    /// Open the name prompt to create an empty file.
    BeginCreateFile,
    /// Open the name prompt to create a directory.
    BeginCreateDir,
    /// Append a character to the name prompt.
    PromptInput(char),
    /// Remove the last character of the name prompt.
    PromptBackspace,
    /// Rename or create with the typed name.
    CommitPrompt,
    /// Close the name prompt without doing anything.
    CancelPrompt,
}

/// A notification the core sends back to the UI.
///
/// Events flow **Core → UI**. The UI uses these to update its status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A directory listing was applied.
    DirectoryLoaded {
        /// The absolute path of the directory.
        path: PathBuf,
        /// Number of entries now shown.
        count: usize,
    },
    /// Listing a directory failed; the browser moved back to `reverted_to`.
    NavigationFailed {
        path: PathBuf,
        reverted_to: PathBuf,
        error: String,
    },
    /// Search results were applied.
    SearchCompleted { query: String, matches: usize },
    /// Searching failed; an empty result set is shown.
    SearchFailed { query: String, error: String },
    /// The selected entry was marked as the copy source.
    CopySourceMarked { path: PathBuf },
    /// A file operation completed successfully.
    OperationComplete {
        /// Human-readable description of the operation.
        operation: String,
    },
    /// A file operation failed.
    OperationFailed {
        /// Human-readable description of the operation.
        operation: String,
        /// The error message.
        error: String,
    },
}

impl Event {
    /// `true` for events that report a failure.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::NavigationFailed { .. } | Self::SearchFailed { .. } | Self::OperationFailed { .. }
        )
    }

    /// One-line message for a status bar.
    pub fn message(&self) -> String {
        match self {
            Self::DirectoryLoaded { path, count } => {
                format!("{} ({count} entries)", path.display())
            }
            Self::NavigationFailed {
                path,
                reverted_to,
                error,
            } => format!(
                "Cannot open {}: {error} (back in {})",
                path.display(),
                reverted_to.display()
            ),
            Self::SearchCompleted { query, matches } => {
                format!("{matches} match(es) for \"{query}\"")
            }
            Self::SearchFailed { query, error } => {
                format!("Search for \"{query}\" failed: {error}")
            }
            Self::CopySourceMarked { path } => format!("Copy source: {}", path.display()),
            Self::OperationComplete { operation } => format!("{operation}: done"),
            Self::OperationFailed { operation, error } => format!("{operation} failed: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_events_are_errors() {
        let failed = Event::OperationFailed {
            operation: "delete x".to_string(),
            error: "permission denied: /x".to_string(),
        };
        assert!(failed.is_error());
        assert_eq!(failed.message(), "delete x failed: permission denied: /x");
    }

    #[test]
    fn success_events_are_not_errors() {
        let loaded = Event::DirectoryLoaded {
            path: PathBuf::from("/a"),
            count: 3,
        };
        assert!(!loaded.is_error());
        assert_eq!(loaded.message(), "/a (3 entries)");
    }

    #[test]
    fn navigation_failure_message_names_both_paths() {
        let event = Event::NavigationFailed {
            path: PathBuf::from("/root"),
            reverted_to: PathBuf::from("/"),
            error: "permission denied: /root".to_string(),
        };
        let msg = event.message();
        assert!(msg.contains("/root"));
        assert!(msg.contains("back in /"));
    }
}
