//! DirNav core library — UI-agnostic directory browsing logic.
//!
//! `dirnav-core` holds the navigation and input state machine of an
//! interactive directory browser. It is decoupled from any UI framework: a
//! frontend feeds [`Command`]s into a [`Browser`], hands the returned
//! [`Request`]s to a [`Dispatcher`], and feeds the resulting [`Outcome`]s
//! back in.
//!
//! # Modules
//!
//! - [`browser`] — [`Browser`], the navigation controller.
//! - [`nav`] — Navigation state, fetch coordination, search, clipboard, scroll sync, filtering.
//! - [`service`] — The [`DirectoryService`] contract, its local implementation and the async dispatcher.
//! - [`fs`] — [`DirectoryEntry`] and blocking file-system operations.
//! - [`config`] — User-facing configuration (TOML-based settings, keymaps).
//! - [`action`] — Every user-triggerable [`Action`] and its metadata.
//! - [`event`] — Command and event types for UI ↔ Core communication.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod action;
pub mod browser;
pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod nav;
pub mod service;

pub use action::{Action, ActionCategory, ActionDescriptor, ActionRegistry};
pub use browser::Browser;
pub use config::keymap::{KeyCombo, Keymap};
pub use config::settings::Config;
pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};
pub use fs::entry::DirectoryEntry;
pub use nav::filter::MatchMode;
pub use nav::state::NavigationState;
pub use service::{
    CreateKind, DirectoryService, Dispatcher, ListOptions, LocalDirectoryService, Outcome, Request,
};
