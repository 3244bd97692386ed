//! The directory service contract and its plumbing.
//!
//! [`DirectoryService`] is the boundary between the navigation state machine
//! and whatever performs file-system I/O. The [`Browser`](crate::browser::Browser)
//! never calls it directly: it emits [`Request`]s, a [`Dispatcher`] runs them
//! on the async runtime, and the resulting [`Outcome`]s are fed back in.

pub mod dispatch;
pub mod local;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::fs::entry::DirectoryEntry;
use crate::nav::fetch::FetchToken;

pub use dispatch::Dispatcher;
pub use local::LocalDirectoryService;

/// Options for [`DirectoryService::list_directory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    /// Include dot-prefixed entries.
    pub include_hidden: bool,
    /// Directories first, then case-insensitive by name.
    pub sorted: bool,
}

/// File-system operations consumed by the browser.
///
/// Every method resolves to an explicit result; implementations must not panic
/// on I/O failure.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Lists the children of `path`.
    async fn list_directory(
        &self,
        path: &Path,
        options: ListOptions,
    ) -> CoreResult<Vec<DirectoryEntry>>;

    /// Copies `source` to `destination`.
    async fn copy_file(&self, source: &Path, destination: &Path) -> CoreResult<()>;

    /// Deletes `path` (recursively for directories).
    async fn delete_file(&self, path: &Path) -> CoreResult<()>;

    /// Renames `path` to `new_name` within the same parent. Never overwrites.
    async fn rename_file(&self, path: &Path, new_name: &str) -> CoreResult<()>;

    /// Creates an empty directory at `path`.
    async fn create_dir(&self, path: &Path) -> CoreResult<()>;

    /// Creates an empty file at `path`. Never truncates an existing file.
    async fn create_file(&self, path: &Path) -> CoreResult<()>;

    /// Opens `path` with the system's default handler.
    async fn open_with_default_application(
        &self,
        path: &Path,
        entry: &DirectoryEntry,
    ) -> CoreResult<()>;

    /// Returns the children of `path` whose names match `query`.
    async fn search_files(&self, path: &Path, query: &str) -> CoreResult<Vec<DirectoryEntry>>;
}

/// What [`Request::Create`] makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateKind {
    File,
    Dir,
}

/// A service call the browser wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// List `path`; the result is tagged with `token`.
    List {
        token: FetchToken,
        path: PathBuf,
        options: ListOptions,
    },
    /// Search `path` for `query`; the result is tagged with `token`.
    Search {
        token: FetchToken,
        path: PathBuf,
        query: String,
    },
    /// Copy `source` to `destination`, then refresh `origin`.
    Copy {
        source: PathBuf,
        destination: PathBuf,
        origin: PathBuf,
    },
    /// Delete `path`, then refresh `origin`.
    Delete { path: PathBuf, origin: PathBuf },
    /// Rename `path` to `new_name`, then refresh `origin`.
    Rename {
        path: PathBuf,
        new_name: String,
        origin: PathBuf,
    },
    /// Create an empty file or directory at `path`, then refresh `origin`.
    Create {
        path: PathBuf,
        kind: CreateKind,
        origin: PathBuf,
    },
    /// Open a file with its default application.
    Open { path: PathBuf, entry: DirectoryEntry },
}

/// The settled result of a [`Request`].
#[derive(Debug)]
pub enum Outcome {
    Listed {
        token: FetchToken,
        path: PathBuf,
        result: CoreResult<Vec<DirectoryEntry>>,
    },
    Searched {
        token: FetchToken,
        path: PathBuf,
        query: String,
        result: CoreResult<Vec<DirectoryEntry>>,
    },
    Copied {
        source: PathBuf,
        destination: PathBuf,
        origin: PathBuf,
        result: CoreResult<()>,
    },
    Deleted {
        path: PathBuf,
        origin: PathBuf,
        result: CoreResult<()>,
    },
    Renamed {
        path: PathBuf,
        new_name: String,
        origin: PathBuf,
        result: CoreResult<()>,
    },
    Created {
        path: PathBuf,
        kind: CreateKind,
        origin: PathBuf,
        result: CoreResult<()>,
    },
    Opened {
        path: PathBuf,
        result: CoreResult<()>,
    },
}
