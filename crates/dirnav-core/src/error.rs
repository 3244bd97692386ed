//! Error types for `dirnav-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::path::{Path, PathBuf};

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message or take corrective action.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The destination of a create or rename is already taken.
    #[error("already exists: {0}")]
    AlreadyExists(PathBuf),

    /// A regular file was expected (copy sources must be regular files).
    #[error("not a regular file: {0}")]
    NotARegularFile(PathBuf),

    /// A file or directory name is invalid (empty, contains path separators, etc.).
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The operation is not supported for this target or platform.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Maps an I/O error raised while touching `path` to the most specific variant.
    pub fn from_io(err: std::io::Error, path: &Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_path_buf()),
            _ => Self::Io(err),
        }
    }
}

/// Convenience alias used throughout `dirnav-core`.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn not_found_displays_path() {
        let err = CoreError::NotFound(PathBuf::from("/missing/file"));
        assert_eq!(err.to_string(), "path not found: /missing/file");
    }

    #[test]
    fn permission_denied_displays_path() {
        let err = CoreError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "permission denied: /secret");
    }

    #[test]
    fn not_a_regular_file_displays_path() {
        let err = CoreError::NotARegularFile(PathBuf::from("/dev/null"));
        assert_eq!(err.to_string(), "not a regular file: /dev/null");
    }

    #[test]
    fn unsupported_displays_message() {
        let err = CoreError::Unsupported("cannot open a directory".to_string());
        assert_eq!(err.to_string(), "unsupported: cannot open a directory");
    }

    #[test]
    fn from_io_maps_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CoreError::from_io(io_err, Path::new("/a"));
        assert!(matches!(err, CoreError::NotFound(p) if p == Path::new("/a")));
    }

    #[test]
    fn from_io_maps_permission_denied() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        let err = CoreError::from_io(io_err, Path::new("/root"));
        assert!(matches!(err, CoreError::PermissionDenied(_)));
    }

    #[test]
    fn from_io_maps_already_exists() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "taken");
        let err = CoreError::from_io(io_err, Path::new("/a/new"));
        assert!(matches!(err, CoreError::AlreadyExists(p) if p == Path::new("/a/new")));
        assert_eq!(
            CoreError::AlreadyExists(PathBuf::from("/a/new")).to_string(),
            "already exists: /a/new"
        );
    }

    #[test]
    fn from_io_keeps_other_kinds() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = CoreError::from_io(io_err, Path::new("/x"));
        assert!(matches!(err, CoreError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
    }
}
