//! Sorting and filtering for directory entries.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

use crate::fs::entry::DirectoryEntry;

/// How a search query is matched against entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Skim-style fuzzy match, best score first.
    Fuzzy,
}

/// Sorts entries case-insensitively by name.
///
/// When `dirs_first` is `true`, directories always appear before files.
/// Returns a **new** `Vec` — the input slice is never mutated.
pub fn sort_entries(entries: &[DirectoryEntry], dirs_first: bool) -> Vec<DirectoryEntry> {
    let mut sorted = entries.to_vec();

    sorted.sort_by(|a, b| {
        if dirs_first {
            let dir_cmp = b.is_dir().cmp(&a.is_dir());
            if dir_cmp != std::cmp::Ordering::Equal {
                return dir_cmp;
            }
        }
        a.file_name()
            .to_lowercase()
            .cmp(&b.file_name().to_lowercase())
    });

    sorted
}

/// Filters out hidden entries when `show_hidden` is `false`.
pub fn filter_hidden(entries: &[DirectoryEntry], show_hidden: bool) -> Vec<DirectoryEntry> {
    if show_hidden {
        return entries.to_vec();
    }
    entries.iter().filter(|e| !e.is_hidden()).cloned().collect()
}

/// Keeps entries whose name contains `query`, ignoring case.
///
/// Input order is preserved.
pub fn substring_filter(entries: &[DirectoryEntry], query: &str) -> Vec<DirectoryEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.file_name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Fuzzy-matches `query` against each entry name, highest score first.
///
/// An empty query returns every entry in input order.
pub fn fuzzy_filter(entries: &[DirectoryEntry], query: &str) -> Vec<DirectoryEntry> {
    if query.is_empty() {
        return entries.to_vec();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &DirectoryEntry)> = entries
        .iter()
        .filter_map(|e| matcher.fuzzy_match(e.file_name(), query).map(|s| (s, e)))
        .collect();

    // stable: equal scores keep listing order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, e)| e.clone()).collect()
}

/// Applies `mode` to `entries`.
pub fn match_entries(entries: &[DirectoryEntry], query: &str, mode: MatchMode) -> Vec<DirectoryEntry> {
    match mode {
        MatchMode::Substring => substring_filter(entries, query),
        MatchMode::Fuzzy => fuzzy_filter(entries, query),
    }
}
