//! Navigation logic for DirNav.
//!
//! The [`state::NavigationState`] record, the [`fetch::FetchCoordinator`]
//! that guards it against stale results, the [`search::SearchSession`],
//! the [`clipboard::Clipboard`], the rename/create [`prompt::NamePrompt`],
//! viewport [`scroll::ScrollSync`], path helpers and entry [`filter`]ing.

pub mod clipboard;
pub mod fetch;
pub mod filter;
pub mod path;
pub mod prompt;
pub mod scroll;
pub mod search;
pub mod state;
