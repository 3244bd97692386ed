//! Directory entry representation.

use std::ffi::{OsStr, OsString};

use unicode_normalization::UnicodeNormalization;

/// One child of a directory as reported by the directory service.
///
/// `DirectoryEntry` is immutable. A listing is always replaced wholesale,
/// never patched entry by entry.
///
/// The entry keeps two names. [`DirectoryEntry::os_name`] is the name exactly
/// as stored on disk and is the only one ever joined onto a path.
/// [`DirectoryEntry::file_name`] is an NFC-normalised, lossy UTF-8 rendering
/// used for display, sorting and matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectoryEntry {
    os_name: OsString,
    file_name: String,
    is_dir: bool,
    permitted: bool,
}

impl DirectoryEntry {
    /// Creates an entry from its on-disk name.
    pub fn from_os(os_name: OsString, is_dir: bool, permitted: bool) -> Self {
        let file_name = os_name.to_string_lossy().nfc().collect();
        Self {
            os_name,
            file_name,
            is_dir,
            permitted,
        }
    }

    /// Creates an entry from a UTF-8 name. The name is used verbatim on disk.
    pub fn new(file_name: impl AsRef<str>, is_dir: bool, permitted: bool) -> Self {
        Self::from_os(OsString::from(file_name.as_ref()), is_dir, permitted)
    }

    /// Shorthand for a permitted directory entry.
    pub fn dir(file_name: impl AsRef<str>) -> Self {
        Self::new(file_name, true, true)
    }

    /// Shorthand for a permitted file entry.
    pub fn file(file_name: impl AsRef<str>) -> Self {
        Self::new(file_name, false, true)
    }

    /// Display name (NFC, lossy for names that are not valid UTF-8).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The name as stored on disk. Join this, never [`DirectoryEntry::file_name`].
    pub fn os_name(&self) -> &OsStr {
        &self.os_name
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the current user may traverse (directories) or read (files) it.
    pub fn permitted(&self) -> bool {
        self.permitted
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.file_name.starts_with('.')
    }

    /// Returns a copy of this entry with the permission flag replaced.
    #[must_use]
    pub fn with_permitted(self, permitted: bool) -> Self {
        Self { permitted, ..self }
    }
}
