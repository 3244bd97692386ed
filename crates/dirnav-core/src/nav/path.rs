//! Path helpers for the navigation state.
//!
//! The browser's current path is always absolute and normalized: no `.`
//! components, no `..` components, no trailing separator except for the root.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Normalizes an absolute path lexically.
///
/// `.` components are dropped and `..` pops the previous component (never
/// above the root). Symlinks are not resolved.
///
/// # Errors
///
/// [`CoreError::InvalidName`] if `path` is relative.
pub fn normalize(path: &Path) -> CoreResult<PathBuf> {
    if !path.is_absolute() {
        return Err(CoreError::InvalidName(format!(
            "path is not absolute: {}",
            path.display()
        )));
    }

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    Ok(out)
}

/// Appends a single entry name to `dir`.
///
/// `name` is joined byte for byte, so pass the on-disk name of an entry.
///
/// # Errors
///
/// [`CoreError::InvalidName`] if `name` is empty, `.`/`..`, or contains a
/// path separator.
pub fn join_entry(dir: &Path, name: impl AsRef<OsStr>) -> CoreResult<PathBuf> {
    let name = name.as_ref();
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !has_separator(name) => Ok(dir.join(name)),
        _ => Err(CoreError::InvalidName(name.to_string_lossy().into_owned())),
    }
}

// `components` drops a trailing separator, so "a/" would otherwise pass
fn has_separator(name: &OsStr) -> bool {
    name.as_encoded_bytes()
        .iter()
        .any(|b| *b == b'/' || (cfg!(windows) && *b == b'\\'))
}

/// Returns the parent of `path`, or `None` at the root.
pub fn parent_of(path: &Path) -> Option<PathBuf> {
    path.parent().map(Path::to_path_buf)
}

/// Returns `true` if `path` has no parent.
pub fn is_root(path: &Path) -> bool {
    path.parent().is_none()
}
