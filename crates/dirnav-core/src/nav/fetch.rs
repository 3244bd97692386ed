//! Fetch coordination: at most one listing or search is current.
//!
//! Every request for entries is tagged with a monotonically increasing
//! [`FetchToken`]. Beginning a new fetch supersedes the previous one, and a
//! result is applied only if its token (and path) still match the current
//! fetch. Superseded requests are not cancelled; their results are dropped.

use std::path::{Path, PathBuf};

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Why entries are being fetched. Decides how a result is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Listing a directory the user navigated to. Selection resets.
    Navigate,
    /// Re-listing the shown directory after a file operation. Selection is clamped.
    Refresh,
    /// Restoring the full listing after an empty search commit. Selection resets.
    Restore,
    /// Filtered search results for the current directory. Selection resets.
    Search,
}

/// The fetch whose result is still wanted.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingFetch {
    token: FetchToken,
    path: PathBuf,
    kind: FetchKind,
}

/// Issues tokens and decides which results are still current.
#[derive(Debug, Default)]
pub struct FetchCoordinator {
    next_token: u64,
    current: Option<PendingFetch>,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch of `path`, superseding any outstanding one.
    pub fn begin(&mut self, path: PathBuf, kind: FetchKind) -> FetchToken {
        let token = FetchToken(self.next_token);
        self.next_token += 1;
        if let Some(prev) = self.current.replace(PendingFetch { token, path, kind }) {
            tracing::debug!(
                token = prev.token.0,
                path = %prev.path.display(),
                "fetch superseded"
            );
        }
        token
    }

    /// Claims the result for `token`/`path`.
    ///
    /// Returns the fetch's kind and clears it when the result is current;
    /// returns `None` (and changes nothing) for stale results.
    pub fn settle(&mut self, token: FetchToken, path: &Path) -> Option<FetchKind> {
        match &self.current {
            Some(pending) if pending.token == token && pending.path == path => {
                self.current.take().map(|p| p.kind)
            }
            _ => {
                tracing::debug!(token = token.0, path = %path.display(), "discarding stale result");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase() {
        let mut fetch = FetchCoordinator::new();
        let a = fetch.begin(PathBuf::from("/a"), FetchKind::Navigate);
        let b = fetch.begin(PathBuf::from("/b"), FetchKind::Navigate);
        assert!(b > a);
        assert_eq!(b.value(), a.value() + 1);
    }

    #[test]
    fn current_result_settles_once() {
        let mut fetch = FetchCoordinator::new();
        let t = fetch.begin(PathBuf::from("/a"), FetchKind::Refresh);

        assert_eq!(fetch.settle(t, Path::new("/a")), Some(FetchKind::Refresh));
        assert_eq!(fetch.settle(t, Path::new("/a")), None);
    }

    #[test]
    fn superseded_result_is_discarded() {
        let mut fetch = FetchCoordinator::new();
        let old = fetch.begin(PathBuf::from("/a"), FetchKind::Navigate);
        let new = fetch.begin(PathBuf::from("/b"), FetchKind::Navigate);

        assert_eq!(fetch.settle(old, Path::new("/a")), None);
        // stale result must not clear the newer fetch
        assert_eq!(fetch.settle(new, Path::new("/b")), Some(FetchKind::Navigate));
    }

    #[test]
    fn same_path_requested_twice_honours_only_latest() {
        let mut fetch = FetchCoordinator::new();
        let first = fetch.begin(PathBuf::from("/a"), FetchKind::Navigate);
        let second = fetch.begin(PathBuf::from("/a"), FetchKind::Refresh);

        assert_eq!(fetch.settle(first, Path::new("/a")), None);
        assert_eq!(fetch.settle(second, Path::new("/a")), Some(FetchKind::Refresh));
    }

    #[test]
    fn mismatched_path_is_discarded() {
        let mut fetch = FetchCoordinator::new();
        let t = fetch.begin(PathBuf::from("/a"), FetchKind::Search);
        assert_eq!(fetch.settle(t, Path::new("/b")), None);
        // still outstanding for the right path
        assert_eq!(fetch.settle(t, Path::new("/a")), Some(FetchKind::Search));
    }
}
