//! The navigation controller.
//!
//! [`Browser`] owns the [`NavigationState`] and is the only thing that
//! mutates it. It is a synchronous state machine: [`Command`]s and service
//! [`Outcome`]s go in, service [`Request`]s come out, and user-facing
//! [`Event`]s queue up until the UI drains them with [`Browser::take_events`].
//!
//! Every state transition goes through one place that compares the old and
//! new record: a path change issues a listing, a selection or entry change
//! re-syncs the viewport.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::event::{Command, Event};
use crate::fs::entry::DirectoryEntry;
use crate::nav::clipboard::Clipboard;
use crate::nav::fetch::{FetchCoordinator, FetchKind};
use crate::nav::path::{is_root, join_entry, normalize, parent_of};
use crate::nav::prompt::{NamePrompt, PromptPurpose};
use crate::nav::scroll::ScrollSync;
use crate::nav::search::{SearchCommit, SearchSession};
use crate::nav::state::NavigationState;
use crate::service::{CreateKind, ListOptions, Outcome, Request};

/// What caused a state transition. Decides how the viewport reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Keyboard,
    Pointer,
    Fetch,
}

/// Navigation controller composing state, fetch coordination, search,
/// clipboard, the name prompt and scroll sync.
#[derive(Debug)]
pub struct Browser {
    state: NavigationState,
    fetch: FetchCoordinator,
    search: SearchSession,
    clipboard: Clipboard,
    prompt: Option<NamePrompt>,
    scroll: ScrollSync,
    list_options: ListOptions,
    viewport_height: usize,
    events: Vec<Event>,
}

impl Browser {
    /// Creates a browser pointing at `start`. Nothing is listed until [`Browser::start`].
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidName`] if `start` is not absolute.
    pub fn new(start: &Path, list_options: ListOptions) -> CoreResult<Self> {
        Ok(Self {
            state: NavigationState::new(normalize(start)?),
            fetch: FetchCoordinator::new(),
            search: SearchSession::new(),
            clipboard: Clipboard::new(),
            prompt: None,
            scroll: ScrollSync::new(),
            list_options,
            viewport_height: 0,
            events: Vec::new(),
        })
    }

    /// Issues the initial listing.
    pub fn start(&mut self) -> Vec<Request> {
        vec![self.request_listing(FetchKind::Navigate)]
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// The open name prompt, if any.
    pub fn prompt(&self) -> Option<&NamePrompt> {
        self.prompt.as_ref()
    }

    pub fn scroll(&self) -> &ScrollSync {
        &self.scroll
    }

    pub fn list_options(&self) -> ListOptions {
        self.list_options
    }

    /// Drains the queued notifications.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Tells the browser how many rows the list viewport has.
    pub fn set_viewport_height(&mut self, height: usize) {
        if self.viewport_height != height {
            self.viewport_height = height;
            self.follow_selection();
        }
    }

    /// Processes one user command.
    ///
    /// Navigation is suppressed while the search input has focus. An open
    /// name prompt takes every command until it is committed or cancelled.
    pub fn handle_command(&mut self, cmd: Command) -> Vec<Request> {
        if self.prompt.is_some() && !is_prompt_command(&cmd) {
            tracing::trace!(?cmd, "command ignored while the name prompt is open");
            return Vec::new();
        }
        if self.search.is_active() && is_navigation_key(&cmd) {
            tracing::trace!(?cmd, "navigation suppressed during search input");
            return Vec::new();
        }
        match cmd {
            Command::CursorUp => self.keyboard(NavigationState::move_up),
            Command::CursorDown => self.keyboard(NavigationState::move_down),
            Command::CursorTop => self.keyboard(|s| s.go_to_first()),
            Command::CursorBottom => self.keyboard(|s| s.go_to_last()),
            Command::PointerSelect(index) => self.set_selection(index),
            Command::PointerActivate(index) => {
                let mut requests = self.set_selection(index);
                if self.state.selected_index() == index {
                    requests.extend(self.enter_selected());
                }
                requests
            }
            Command::PointerScroll(delta) => {
                self.scroll
                    .scroll_by(delta, self.state.entries().len(), self.viewport_height);
                Vec::new()
            }
            Command::Enter => self.enter_selected(),
            Command::GoUp => self.go_to_parent(),
            Command::Refresh => self.refresh(),
            Command::FocusSearch => {
                self.search.focus();
                Vec::new()
            }
            Command::SearchInput(c) => {
                self.search.push_char(c);
                Vec::new()
            }
            Command::SearchBackspace => {
                self.search.pop_char();
                Vec::new()
            }
            Command::CommitSearch => self.commit_search(),
            Command::BlurSearch => {
                self.search.blur();
                Vec::new()
            }
            Command::MarkCopySource => {
                self.mark_copy_source();
                Vec::new()
            }
            Command::Paste => self.paste(),
            Command::DeleteSelected => self.delete_selected(),
            Command::BeginRename => {
                if let (Some(entry), Some(path)) =
                    (self.state.selected_entry(), self.state.selected_path())
                {
                    self.prompt = Some(NamePrompt::rename(path, entry.file_name()));
                }
                Vec::new()
            }
            Command::BeginCreateFile => {
                self.prompt = Some(NamePrompt::create_file());
                Vec::new()
            }
            Command::BeginCreateDir => {
                self.prompt = Some(NamePrompt::create_dir());
                Vec::new()
            }
            Command::PromptInput(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.push_char(c);
                }
                Vec::new()
            }
            Command::PromptBackspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.pop_char();
                }
                Vec::new()
            }
            Command::CommitPrompt => self.commit_prompt(),
            Command::CancelPrompt => {
                self.prompt = None;
                Vec::new()
            }
        }
    }

    /// Applies the result of a service call.
    pub fn handle_outcome(&mut self, outcome: Outcome) -> Vec<Request> {
        match outcome {
            Outcome::Listed {
                token,
                path,
                result,
            } => {
                let Some(kind) = self.fetch.settle(token, &path) else {
                    return Vec::new();
                };
                if path != self.state.current_path() {
                    tracing::debug!(path = %path.display(), "listing for a path no longer current");
                    return Vec::new();
                }
                match result {
                    Ok(entries) => {
                        self.on_fetch_succeeded(path, entries, kind);
                        Vec::new()
                    }
                    Err(err) => self.on_fetch_failed(path, err),
                }
            }
            Outcome::Searched {
                token,
                path,
                query,
                result,
            } => {
                if self.fetch.settle(token, &path).is_none() || path != self.state.current_path() {
                    return Vec::new();
                }
                self.on_search_settled(path, query, result)
            }
            Outcome::Copied {
                source,
                destination,
                origin,
                result,
            } => {
                let operation = format!(
                    "copy {} to {}",
                    display_name(&source),
                    destination.display()
                );
                self.report(operation, result);
                self.refresh_if_current(&origin)
            }
            Outcome::Deleted {
                path,
                origin,
                result,
            } => {
                self.report(format!("delete {}", display_name(&path)), result);
                self.refresh_if_current(&origin)
            }
            Outcome::Renamed {
                path,
                new_name,
                origin,
                result,
            } => {
                let operation = format!("rename {} to {new_name}", display_name(&path));
                self.report(operation, result);
                self.refresh_if_current(&origin)
            }
            Outcome::Created {
                path,
                kind,
                origin,
                result,
            } => {
                self.report(format!("create {} {}", noun(kind), display_name(&path)), result);
                self.refresh_if_current(&origin)
            }
            Outcome::Opened { path, result } => {
                self.report(format!("open {}", display_name(&path)), result);
                Vec::new()
            }
        }
    }

    fn set_selection(&mut self, index: usize) -> Vec<Request> {
        self.scroll.on_pointer();
        let next = self.state.clone().with_selection(index);
        self.apply(next, Origin::Pointer)
    }

    fn keyboard(&mut self, f: impl FnOnce(NavigationState) -> NavigationState) -> Vec<Request> {
        let next = f(self.state.clone());
        self.apply(next, Origin::Keyboard)
    }

    fn enter_selected(&mut self) -> Vec<Request> {
        if self.state.is_pending() {
            tracing::debug!("enter ignored while a navigation is pending");
            return Vec::new();
        }
        let Some(entry) = self.state.selected_entry().cloned() else {
            return Vec::new();
        };
        if !entry.permitted() {
            tracing::debug!(name = entry.file_name(), "entry is not permitted");
            return Vec::new();
        }

        let target = match join_entry(self.state.current_path(), entry.os_name()) {
            Ok(target) => target,
            Err(err) => {
                self.push_failure(format!("open {}", entry.file_name()), &err);
                return Vec::new();
            }
        };

        if entry.is_dir() {
            tracing::info!(path = %target.display(), "entering directory");
            self.search.clear();
            let next = self.state.clone().with_current_path(target);
            self.apply(next, Origin::Keyboard)
        } else {
            vec![Request::Open {
                path: target,
                entry,
            }]
        }
    }

    fn go_to_parent(&mut self) -> Vec<Request> {
        let Some(parent) = parent_of(self.state.current_path()) else {
            return Vec::new();
        };
        tracing::info!(path = %parent.display(), "going to parent");
        self.search.clear();
        let next = self.state.clone().with_current_path(parent);
        self.apply(next, Origin::Keyboard)
    }

    fn refresh(&mut self) -> Vec<Request> {
        let kind = if self.state.is_pending() {
            FetchKind::Navigate
        } else {
            FetchKind::Refresh
        };
        vec![self.request_listing(kind)]
    }

    fn refresh_if_current(&mut self, origin: &Path) -> Vec<Request> {
        if origin == self.state.current_path() {
            self.refresh()
        } else {
            tracing::debug!(origin = %origin.display(), "skipping refresh of a directory no longer shown");
            Vec::new()
        }
    }

    fn commit_search(&mut self) -> Vec<Request> {
        match self.search.commit() {
            SearchCommit::Reset => {
                let kind = if self.state.is_pending() {
                    FetchKind::Navigate
                } else {
                    FetchKind::Restore
                };
                vec![self.request_listing(kind)]
            }
            SearchCommit::Query(query) => {
                let path = self.state.current_path().to_path_buf();
                let token = self.fetch.begin(path.clone(), FetchKind::Search);
                vec![Request::Search { token, path, query }]
            }
        }
    }

    fn mark_copy_source(&mut self) {
        let (Some(entry), Some(path)) = (self.state.selected_entry(), self.state.selected_path())
        else {
            return;
        };
        let name = entry.file_name().to_string();
        tracing::info!(path = %path.display(), "copy source marked");
        self.clipboard.mark(path.clone(), name);
        self.events.push(Event::CopySourceMarked { path });
    }

    fn paste(&mut self) -> Vec<Request> {
        let origin = self.state.current_path().to_path_buf();
        let (Some(source), Some(destination)) =
            (self.clipboard.get(), self.clipboard.destination_in(&origin))
        else {
            return Vec::new();
        };
        tracing::info!(
            source = %source.source_path().display(),
            destination = %destination.display(),
            "pasting"
        );
        vec![Request::Copy {
            source: source.source_path().to_path_buf(),
            destination,
            origin,
        }]
    }

    fn delete_selected(&mut self) -> Vec<Request> {
        let (Some(path), Some(origin)) = (self.state.selected_path(), self.state.listed_path())
        else {
            return Vec::new();
        };
        tracing::info!(path = %path.display(), "deleting");
        vec![Request::Delete {
            path,
            origin: origin.to_path_buf(),
        }]
    }

    fn commit_prompt(&mut self) -> Vec<Request> {
        let Some((purpose, name)) = self.prompt.take().and_then(NamePrompt::finish) else {
            return Vec::new();
        };
        let Some(origin) = self.state.listed_path().map(Path::to_path_buf) else {
            return Vec::new();
        };
        match purpose {
            PromptPurpose::Rename { path, .. } => match validate_rename(&path, &name) {
                Ok(_) => {
                    tracing::info!(path = %path.display(), new_name = name, "renaming");
                    vec![Request::Rename {
                        path,
                        new_name: name,
                        origin,
                    }]
                }
                Err(err) => {
                    let operation = format!("rename {} to {name}", display_name(&path));
                    self.push_failure(operation, &err);
                    Vec::new()
                }
            },
            PromptPurpose::CreateFile => self.create(origin, &name, CreateKind::File),
            PromptPurpose::CreateDir => self.create(origin, &name, CreateKind::Dir),
        }
    }

    fn create(&mut self, origin: PathBuf, name: &str, kind: CreateKind) -> Vec<Request> {
        match join_entry(&origin, name) {
            Ok(path) => {
                tracing::info!(path = %path.display(), ?kind, "creating");
                vec![Request::Create { path, kind, origin }]
            }
            Err(err) => {
                self.push_failure(format!("create {} {name}", noun(kind)), &err);
                Vec::new()
            }
        }
    }

    fn on_fetch_succeeded(
        &mut self,
        path: PathBuf,
        entries: Vec<DirectoryEntry>,
        kind: FetchKind,
    ) {
        let count = entries.len();
        let next = match kind {
            FetchKind::Refresh if !self.state.is_pending() => {
                self.state.clone().with_refreshed(entries)
            }
            _ => {
                self.scroll.reset();
                self.state.clone().with_listing(path.clone(), entries)
            }
        };
        tracing::info!(path = %path.display(), count, "directory loaded");
        self.apply(next, Origin::Fetch);
        self.events.push(Event::DirectoryLoaded { path, count });
    }

    fn on_fetch_failed(&mut self, path: PathBuf, err: CoreError) -> Vec<Request> {
        tracing::warn!(path = %path.display(), error = %err, "listing failed");

        // A pending navigation falls back to what is on screen. A failed
        // refresh (or initial load) means the shown directory itself is
        // unreadable, so move to its parent.
        let next = if self.state.is_pending() {
            self.state.clone().reverted()
        } else {
            None
        };
        let next = match next {
            Some(next) => next,
            None if is_root(&path) => {
                self.events.push(Event::NavigationFailed {
                    reverted_to: path.clone(),
                    path,
                    error: err.to_string(),
                });
                return Vec::new();
            }
            None => {
                let parent = parent_of(&path).unwrap_or_else(|| path.clone());
                self.state.clone().with_current_path(parent)
            }
        };

        self.events.push(Event::NavigationFailed {
            path,
            reverted_to: next.current_path().to_path_buf(),
            error: err.to_string(),
        });
        self.apply(next, Origin::Fetch)
    }

    fn on_search_settled(
        &mut self,
        path: PathBuf,
        query: String,
        result: CoreResult<Vec<DirectoryEntry>>,
    ) -> Vec<Request> {
        let pending = self.state.is_pending();
        match result {
            Ok(results) => {
                let matches = results.len();
                let base = if pending {
                    self.state.clone().with_listing(path, Vec::new())
                } else {
                    self.state.clone()
                };
                self.scroll.reset();
                self.apply(base.with_search_results(results), Origin::Fetch);
                self.events.push(Event::SearchCompleted { query, matches });
                Vec::new()
            }
            // the directory itself could not be read: same as a failed listing
            Err(err) if pending => self.on_fetch_failed(path, err),
            Err(err) => {
                tracing::warn!(query, error = %err, "search failed, showing no results");
                self.scroll.reset();
                let next = self.state.clone().with_search_results(Vec::new());
                self.apply(next, Origin::Fetch);
                self.events.push(Event::SearchFailed {
                    query,
                    error: err.to_string(),
                });
                Vec::new()
            }
        }
    }

    fn request_listing(&mut self, kind: FetchKind) -> Request {
        let path = self.state.current_path().to_path_buf();
        let token = self.fetch.begin(path.clone(), kind);
        tracing::debug!(token = token.value(), path = %path.display(), ?kind, "requesting listing");
        Request::List {
            token,
            path,
            options: self.list_options,
        }
    }

    /// The single mutation point: swaps in `next` and notifies dependents.
    fn apply(&mut self, next: NavigationState, origin: Origin) -> Vec<Request> {
        let prev = std::mem::replace(&mut self.state, next);
        let mut requests = Vec::new();

        let path_changed = prev.current_path() != self.state.current_path();
        if path_changed && (origin != Origin::Fetch || self.state.is_pending()) {
            requests.push(self.request_listing(FetchKind::Navigate));
        }

        let selection_changed = prev.selected_index() != self.state.selected_index();
        if selection_changed || prev.entries() != self.state.entries() {
            if selection_changed && origin == Origin::Keyboard {
                self.scroll.on_keyboard();
            }
            self.follow_selection();
        }

        requests
    }

    fn follow_selection(&mut self) {
        self.scroll.follow(
            self.state.selected_index(),
            self.state.entries().len(),
            self.viewport_height,
        );
    }

    fn report(&mut self, operation: String, result: CoreResult<()>) {
        match result {
            Ok(()) => {
                tracing::info!(operation, "operation complete");
                self.events.push(Event::OperationComplete { operation });
            }
            Err(err) => self.push_failure(operation, &err),
        }
    }

    fn push_failure(&mut self, operation: String, err: &CoreError) {
        tracing::warn!(operation, error = %err, "operation failed");
        self.events.push(Event::OperationFailed {
            operation,
            error: err.to_string(),
        });
    }
}

fn is_navigation_key(cmd: &Command) -> bool {
    matches!(
        cmd,
        Command::CursorUp
            | Command::CursorDown
            | Command::CursorTop
            | Command::CursorBottom
            | Command::PointerActivate(_)
            | Command::Enter
            | Command::GoUp
            | Command::DeleteSelected
            | Command::BeginRename
            | Command::BeginCreateFile
            | Command::BeginCreateDir
    )
}

fn is_prompt_command(cmd: &Command) -> bool {
    matches!(
        cmd,
        Command::PromptInput(_)
            | Command::PromptBackspace
            | Command::CommitPrompt
            | Command::CancelPrompt
    )
}

fn validate_rename(path: &Path, new_name: &str) -> CoreResult<PathBuf> {
    let parent = parent_of(path)
        .ok_or_else(|| CoreError::InvalidName("no parent directory".to_string()))?;
    join_entry(&parent, new_name)
}

fn noun(kind: CreateKind) -> &'static str {
    match kind {
        CreateKind::File => "file",
        CreateKind::Dir => "directory",
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
