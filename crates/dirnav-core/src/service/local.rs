//! [`DirectoryService`] backed by the local file system.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::DirectoryEntry;
use crate::fs::ops;
use crate::nav::filter::MatchMode;
use crate::service::{DirectoryService, ListOptions};

/// Runs the blocking primitives in [`crate::fs::ops`] on tokio's blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirectoryService {
    match_mode: MatchMode,
}

impl LocalDirectoryService {
    pub fn new(match_mode: MatchMode) -> Self {
        Self { match_mode }
    }
}

async fn blocking<T, F>(f: F) -> CoreResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> CoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

#[async_trait]
impl DirectoryService for LocalDirectoryService {
    async fn list_directory(
        &self,
        path: &Path,
        options: ListOptions,
    ) -> CoreResult<Vec<DirectoryEntry>> {
        let path = path.to_path_buf();
        blocking(move || ops::list_directory(&path, options)).await
    }

    async fn copy_file(&self, source: &Path, destination: &Path) -> CoreResult<()> {
        let (source, destination) = (source.to_path_buf(), destination.to_path_buf());
        blocking(move || ops::copy_file(&source, &destination)).await
    }

    async fn delete_file(&self, path: &Path) -> CoreResult<()> {
        let path = path.to_path_buf();
        blocking(move || ops::delete_file(&path)).await
    }

    async fn rename_file(&self, path: &Path, new_name: &str) -> CoreResult<()> {
        let path = path.to_path_buf();
        let new_name = new_name.to_string();
        blocking(move || ops::rename_file(&path, &new_name)).await
    }

    async fn create_dir(&self, path: &Path) -> CoreResult<()> {
        let path = path.to_path_buf();
        blocking(move || ops::create_dir(&path)).await
    }

    async fn create_file(&self, path: &Path) -> CoreResult<()> {
        let path = path.to_path_buf();
        blocking(move || ops::create_file(&path)).await
    }

    async fn open_with_default_application(
        &self,
        path: &Path,
        entry: &DirectoryEntry,
    ) -> CoreResult<()> {
        let path: PathBuf = path.to_path_buf();
        let entry = entry.clone();
        blocking(move || ops::open_with_default_application(&path, &entry)).await
    }

    async fn search_files(&self, path: &Path, query: &str) -> CoreResult<Vec<DirectoryEntry>> {
        let path = path.to_path_buf();
        let query = query.to_string();
        let mode = self.match_mode;
        blocking(move || ops::search_files(&path, &query, mode)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn lists_through_blocking_pool() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("dir")).unwrap();

        let service = LocalDirectoryService::default();
        let entries = service
            .list_directory(
                tmp.path(),
                ListOptions {
                    include_hidden: false,
                    sorted: true,
                },
            )
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_name(), "dir");
    }

    #[tokio::test]
    async fn search_uses_configured_mode() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("report.pdf"), "").unwrap();

        let substring = LocalDirectoryService::new(MatchMode::Substring);
        assert!(substring.search_files(tmp.path(), "rpt").await.unwrap().is_empty());

        let fuzzy = LocalDirectoryService::new(MatchMode::Fuzzy);
        assert_eq!(fuzzy.search_files(tmp.path(), "rpt").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn copy_and_delete_round_trip_on_disk() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("c.txt");
        fs::write(&src, "data").unwrap();
        fs::create_dir(tmp.path().join("dest")).unwrap();
        let dest = tmp.path().join("dest").join("c.txt");

        let service = LocalDirectoryService::default();
        service.copy_file(&src, &dest).await.unwrap();
        assert!(dest.exists());

        service.delete_file(&dest).await.unwrap();
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn create_then_rename_on_disk() {
        let tmp = TempDir::new().unwrap();
        let service = LocalDirectoryService::default();

        service.create_dir(&tmp.path().join("notes")).await.unwrap();
        service
            .create_file(&tmp.path().join("notes").join("draft.md"))
            .await
            .unwrap();
        service
            .rename_file(&tmp.path().join("notes").join("draft.md"), "final.md")
            .await
            .unwrap();

        assert!(tmp.path().join("notes/final.md").is_file());
        assert!(!tmp.path().join("notes/draft.md").exists());
        let again = service.create_dir(&tmp.path().join("notes")).await;
        assert!(matches!(again.unwrap_err(), CoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn listing_missing_directory_errors() {
        let tmp = TempDir::new().unwrap();
        let service = LocalDirectoryService::default();
        let result = service
            .list_directory(&tmp.path().join("missing"), ListOptions::default())
            .await;
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }
}
