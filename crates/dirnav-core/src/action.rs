//! Unified action system.
//!
//! Every user-triggerable action is represented by the [`Action`] enum.
//! [`ActionRegistry`] provides metadata (id, name, description, category)
//! used to resolve `keymap.toml` entries and to render the help overlay.

/// Every user-triggerable action.
///
/// Variants carry no parameters — context is determined at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    CursorUp,
    CursorDown,
    CursorTop,
    CursorBottom,
    GoParent,
    Open,
    Refresh,
    // Search
    Search,
    // File Operations
    Copy,
    Paste,
    Delete,
    Rename,
    NewFile,
    NewDir,
    // System
    Help,
    Quit,
}

/// Broad category for grouping actions in the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Search,
    FileOps,
    System,
}

impl ActionCategory {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Search => "Search",
            Self::FileOps => "File",
            Self::System => "System",
        }
    }
}

/// Metadata for a single action.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    pub action: Action,
    /// Snake-case identifier used in `keymap.toml` (e.g. `"cursor_up"`).
    pub id: &'static str,
    /// Human-readable name (e.g. `"Cursor Up"`).
    pub name: &'static str,
    /// Short description (e.g. `"Move cursor up one entry"`).
    pub description: &'static str,
    pub category: ActionCategory,
}

/// Registry of all available actions.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    descriptors: Vec<ActionDescriptor>,
}

impl ActionRegistry {
    /// Builds the registry containing every known action.
    pub fn new() -> Self {
        let descriptors = vec![
            // Navigation
            ActionDescriptor {
                action: Action::CursorUp,
                id: "cursor_up",
                name: "Cursor Up",
                description: "Move cursor up one entry",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorDown,
                id: "cursor_down",
                name: "Cursor Down",
                description: "Move cursor down one entry",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorTop,
                id: "go_first",
                name: "Go to First",
                description: "Jump to the first entry",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::CursorBottom,
                id: "go_last",
                name: "Go to Last",
                description: "Jump to the last entry",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::GoParent,
                id: "go_parent",
                name: "Go Parent",
                description: "Navigate to parent directory",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Open,
                id: "open",
                name: "Open",
                description: "Enter directory or open file with default application",
                category: ActionCategory::Navigation,
            },
            ActionDescriptor {
                action: Action::Refresh,
                id: "refresh",
                name: "Refresh",
                description: "Refresh current directory",
                category: ActionCategory::Navigation,
            },
            // Search
            ActionDescriptor {
                action: Action::Search,
                id: "search",
                name: "Search",
                description: "Search the current directory",
                category: ActionCategory::Search,
            },
            // File Operations
            ActionDescriptor {
                action: Action::Copy,
                id: "copy",
                name: "Copy",
                description: "Mark selected file as copy source",
                category: ActionCategory::FileOps,
            },
            ActionDescriptor {
                action: Action::Paste,
                id: "paste",
                name: "Paste",
                description: "Copy the marked file into this directory",
                category: ActionCategory::FileOps,
            },
            ActionDescriptor {
                action: Action::Delete,
                id: "delete",
                name: "Delete",
                description: "Delete selected entry",
                category: ActionCategory::FileOps,
            },
            ActionDescriptor {
                action: Action::Rename,
                id: "rename",
                name: "Rename",
                description: "Rename selected entry",
                category: ActionCategory::FileOps,
            },
            ActionDescriptor {
                action: Action::NewFile,
                id: "new_file",
                name: "New File",
                description: "Create an empty file here",
                category: ActionCategory::FileOps,
            },
            ActionDescriptor {
                action: Action::NewDir,
                id: "new_dir",
                name: "New Directory",
                description: "Create a directory here",
                category: ActionCategory::FileOps,
            },
            // System
            ActionDescriptor {
                action: Action::Help,
                id: "help",
                name: "Help",
                description: "Show keyboard shortcuts",
                category: ActionCategory::System,
            },
            ActionDescriptor {
                action: Action::Quit,
                id: "quit",
                name: "Quit",
                description: "Exit dirnav",
                category: ActionCategory::System,
            },
        ];
        Self { descriptors }
    }

    /// Returns all descriptors.
    pub fn all(&self) -> &[ActionDescriptor] {
        &self.descriptors
    }

    /// Finds an action by its string id (for keymap.toml parsing).
    pub fn find_by_id(&self, id: &str) -> Option<Action> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.action)
    }

    /// Returns the descriptor for a given action.
    pub fn descriptor_for(&self, action: Action) -> Option<&ActionDescriptor> {
        self.descriptors.iter().find(|d| d.action == action)
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
