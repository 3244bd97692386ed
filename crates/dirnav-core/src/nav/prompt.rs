//! Name prompt for renaming and creating entries.
//!
//! While a prompt is open it owns the keyboard: the
//! [`Browser`](crate::browser::Browser) routes text input to it and ignores
//! every other command until the prompt is committed or cancelled.

use std::path::PathBuf;

/// What committing the prompt does with the typed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPurpose {
    /// Rename `path`. `original` is its display name.
    Rename { path: PathBuf, original: String },
    CreateFile,
    CreateDir,
}

/// An open name prompt and the text typed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePrompt {
    purpose: PromptPurpose,
    input: String,
}

impl NamePrompt {
    /// A rename prompt pre-filled with the current name.
    pub fn rename(path: PathBuf, original: &str) -> Self {
        Self {
            purpose: PromptPurpose::Rename {
                path,
                original: original.to_string(),
            },
            input: original.to_string(),
        }
    }

    pub fn create_file() -> Self {
        Self {
            purpose: PromptPurpose::CreateFile,
            input: String::new(),
        }
    }

    pub fn create_dir() -> Self {
        Self {
            purpose: PromptPurpose::CreateDir,
            input: String::new(),
        }
    }

    pub fn purpose(&self) -> &PromptPurpose {
        &self.purpose
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Popup title for this prompt.
    pub fn title(&self) -> &'static str {
        match self.purpose {
            PromptPurpose::Rename { .. } => "Rename",
            PromptPurpose::CreateFile => "New file",
            PromptPurpose::CreateDir => "New directory",
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Closes the prompt, returning its purpose and the trimmed name.
    ///
    /// `None` when the name is blank, or when a rename kept the original name.
    pub fn finish(self) -> Option<(PromptPurpose, String)> {
        let name = self.input.trim();
        if name.is_empty() {
            return None;
        }
        if let PromptPurpose::Rename { original, .. } = &self.purpose {
            if name == original {
                return None;
            }
        }
        let name = name.to_string();
        Some((self.purpose, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_starts_with_current_name() {
        let prompt = NamePrompt::rename(PathBuf::from("/a/notes.txt"), "notes.txt");
        assert_eq!(prompt.input(), "notes.txt");
        assert_eq!(prompt.title(), "Rename");
    }

    #[test]
    fn create_starts_empty() {
        assert_eq!(NamePrompt::create_file().input(), "");
        assert_eq!(NamePrompt::create_dir().title(), "New directory");
    }

    #[test]
    fn editing() {
        let mut prompt = NamePrompt::create_file();
        for c in "todo.mdx".chars() {
            prompt.push_char(c);
        }
        prompt.pop_char();
        assert_eq!(prompt.input(), "todo.md");
    }

    #[test]
    fn finish_trims() {
        let mut prompt = NamePrompt::create_dir();
        for c in "  build ".chars() {
            prompt.push_char(c);
        }
        assert_eq!(
            prompt.finish(),
            Some((PromptPurpose::CreateDir, "build".to_string()))
        );
    }

    #[test]
    fn blank_name_finishes_with_nothing() {
        let mut prompt = NamePrompt::create_file();
        prompt.push_char(' ');
        assert_eq!(prompt.finish(), None);
    }

    #[test]
    fn unchanged_rename_finishes_with_nothing() {
        let prompt = NamePrompt::rename(PathBuf::from("/a/x"), "x");
        assert_eq!(prompt.finish(), None);
    }
}
