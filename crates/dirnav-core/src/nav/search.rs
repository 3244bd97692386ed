//! Search session: browsing mode vs. search mode.
//!
//! The session only tracks focus and the query text. Committing hands the
//! query back to the [`Browser`](crate::browser::Browser), which decides
//! whether to restore the full listing or issue a search.

/// What committing the search asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCommit {
    /// Empty query: show the unfiltered listing again.
    Reset,
    /// Non-empty query: filter the current directory.
    Query(String),
}

/// Focus state and query text of the search input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    active: bool,
    query: String,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Enters search mode. The previous query text is kept for editing.
    pub fn focus(&mut self) {
        self.active = true;
    }

    /// Leaves search mode without touching the entries.
    pub fn blur(&mut self) {
        self.active = false;
    }

    pub fn push_char(&mut self, c: char) {
        if self.active {
            self.query.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.active {
            self.query.pop();
        }
    }

    /// Leaves search mode and reports what the query asks for.
    ///
    /// A query of only whitespace counts as empty.
    pub fn commit(&mut self) -> SearchCommit {
        self.active = false;
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            self.query.clear();
            SearchCommit::Reset
        } else {
            SearchCommit::Query(trimmed.to_string())
        }
    }

    /// Leaves search mode and forgets the query, e.g. after navigating to
    /// another directory.
    pub fn clear(&mut self) {
        self.active = false;
        self.query.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive_and_empty() {
        let session = SearchSession::new();
        assert!(!session.is_active());
        assert_eq!(session.query(), "");
    }

    #[test]
    fn typing_only_applies_while_active() {
        let mut session = SearchSession::new();
        session.push_char('x');
        assert_eq!(session.query(), "");

        session.focus();
        session.push_char('a');
        session.push_char('b');
        session.pop_char();
        assert_eq!(session.query(), "a");
    }

    #[test]
    fn blur_keeps_query() {
        let mut session = SearchSession::new();
        session.focus();
        session.push_char('q');
        session.blur();
        assert!(!session.is_active());
        assert_eq!(session.query(), "q");
    }

    #[test]
    fn commit_empty_resets() {
        let mut session = SearchSession::new();
        session.focus();
        assert_eq!(session.commit(), SearchCommit::Reset);
        assert!(!session.is_active());
    }

    #[test]
    fn commit_whitespace_resets_and_clears() {
        let mut session = SearchSession::new();
        session.focus();
        session.push_char(' ');
        assert_eq!(session.commit(), SearchCommit::Reset);
        assert_eq!(session.query(), "");
    }

    #[test]
    fn commit_query_trims() {
        let mut session = SearchSession::new();
        session.focus();
        for c in " rep ".chars() {
            session.push_char(c);
        }
        assert_eq!(session.commit(), SearchCommit::Query("rep".to_string()));
        assert!(!session.is_active());
    }

    #[test]
    fn clear_leaves_search_mode() {
        let mut session = SearchSession::new();
        session.focus();
        session.push_char('q');
        session.clear();
        assert!(!session.is_active());
        assert_eq!(session.query(), "");
    }
}
