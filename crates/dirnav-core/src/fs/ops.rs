//! Blocking file-system primitives backing the local directory service.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::DirectoryEntry;
use crate::nav::filter::{filter_hidden, match_entries, sort_entries, MatchMode};
use crate::nav::path::join_entry;
use crate::service::ListOptions;

/// Decides whether the permission class that applies to `(uid, gid)` grants
/// access to an inode with the given `mode` and ownership.
///
/// Directories need the execute bit to be traversable; everything else
/// needs the read bit. The superuser (`uid == 0`) is always permitted.
pub fn check_access(
    mode: u32,
    owner_uid: u32,
    owner_gid: u32,
    uid: u32,
    gid: u32,
    is_dir: bool,
) -> bool {
    if uid == 0 {
        return true;
    }
    let bits = if uid == owner_uid {
        (mode >> 6) & 0o7
    } else if gid == owner_gid {
        (mode >> 3) & 0o7
    } else {
        mode & 0o7
    };
    if is_dir {
        bits & 0o1 != 0
    } else {
        bits & 0o4 != 0
    }
}

#[cfg(unix)]
fn is_permitted(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;

    // SAFETY: geteuid/getegid cannot fail and touch no memory.
    let (uid, gid) = unsafe { (libc::geteuid(), libc::getegid()) };
    check_access(
        metadata.mode(),
        metadata.uid(),
        metadata.gid(),
        uid,
        gid,
        metadata.is_dir(),
    )
}

#[cfg(not(unix))]
fn is_permitted(_metadata: &std::fs::Metadata) -> bool {
    true
}

/// Reads the immediate children of `path` as [`DirectoryEntry`] values.
///
/// Symlinks are followed so a link to a directory is listed as a directory;
/// broken links fall back to the link's own metadata. Children whose
/// metadata cannot be read at all are skipped.
fn read_children(path: &Path) -> CoreResult<Vec<DirectoryEntry>> {
    let metadata = std::fs::metadata(path).map_err(|e| CoreError::from_io(e, path))?;
    if !metadata.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(e, path))?;

    let entries = read_dir
        .filter_map(Result::ok)
        .filter_map(|dir_entry| {
            let child = dir_entry.path();
            let metadata = std::fs::metadata(&child)
                .or_else(|_| std::fs::symlink_metadata(&child))
                .ok()?;
            Some(DirectoryEntry::from_os(
                dir_entry.file_name(),
                metadata.is_dir(),
                is_permitted(&metadata),
            ))
        })
        .collect();

    Ok(entries)
}

/// Lists the directory at `path`.
///
/// Hidden (dot-prefixed) entries are dropped unless `options.include_hidden`
/// is set. With `options.sorted`, directories come first and each group is
/// ordered case-insensitively by name.
///
/// # Errors
///
/// - [`CoreError::NotFound`] — the path does not exist.
/// - [`CoreError::NotADirectory`] — the path is not a directory.
/// - [`CoreError::PermissionDenied`] — read access is denied.
/// - [`CoreError::Io`] — any other I/O error.
pub fn list_directory(path: &Path, options: ListOptions) -> CoreResult<Vec<DirectoryEntry>> {
    let entries = filter_hidden(&read_children(path)?, options.include_hidden);
    if options.sorted {
        Ok(sort_entries(&entries, true))
    } else {
        Ok(entries)
    }
}

/// Returns the children of `path` whose names match `query`.
///
/// Hidden entries are searched too. Substring results are ordered
/// directories first; fuzzy results are ordered by score.
///
/// # Errors
///
/// Same as [`list_directory`].
pub fn search_files(path: &Path, query: &str, mode: MatchMode) -> CoreResult<Vec<DirectoryEntry>> {
    let children = read_children(path)?;
    match mode {
        MatchMode::Substring => Ok(sort_entries(&match_entries(&children, query, mode), true)),
        MatchMode::Fuzzy => Ok(match_entries(&sort_entries(&children, true), query, mode)),
    }
}

/// Copies the regular file `src` to `dest`, overwriting `dest` if it exists.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `src` does not exist.
/// - [`CoreError::NotARegularFile`] if `src` is a directory or special file.
/// - [`CoreError::InvalidName`] if `src` and `dest` name the same file.
/// - [`CoreError::Io`] for any I/O failure during the copy.
pub fn copy_file(src: &Path, dest: &Path) -> CoreResult<()> {
    let meta = std::fs::metadata(src).map_err(|e| CoreError::from_io(e, src))?;
    if !meta.is_file() {
        return Err(CoreError::NotARegularFile(src.to_path_buf()));
    }

    if let (Ok(a), Ok(b)) = (src.canonicalize(), dest.canonicalize()) {
        if a == b {
            return Err(CoreError::InvalidName(format!(
                "source and destination are the same file: {}",
                src.display()
            )));
        }
    }

    std::fs::copy(src, dest).map_err(|e| CoreError::from_io(e, dest))?;
    Ok(())
}

/// Deletes a file or directory (recursively).
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::PermissionDenied`] if removal is refused.
/// - [`CoreError::Io`] for any other failure.
pub fn delete_file(path: &Path) -> CoreResult<()> {
    // symlink_metadata: a link is removed, never its target
    let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;

    if meta.is_dir() {
        std::fs::remove_dir_all(path).map_err(|e| CoreError::from_io(e, path))?;
    } else {
        std::fs::remove_file(path).map_err(|e| CoreError::from_io(e, path))?;
    }

    Ok(())
}

/// Renames a file or directory within its parent directory.
///
/// An existing entry named `new_name` is never overwritten.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::InvalidName`] if `new_name` is not a single path component
///   or `path` has no parent.
/// - [`CoreError::AlreadyExists`] if `new_name` is taken.
/// - [`CoreError::Io`] for any other failure.
pub fn rename_file(path: &Path, new_name: &str) -> CoreResult<()> {
    // symlink_metadata: a link is renamed, never its target
    std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;

    let parent = path
        .parent()
        .ok_or_else(|| CoreError::InvalidName("no parent directory".to_string()))?;
    let new_path = join_entry(parent, new_name)?;
    if new_path == path {
        return Ok(());
    }
    if std::fs::symlink_metadata(&new_path).is_ok() {
        return Err(CoreError::AlreadyExists(new_path));
    }

    std::fs::rename(path, &new_path).map_err(|e| CoreError::from_io(e, path))?;
    Ok(())
}

/// Creates an empty directory at `path`.
///
/// # Errors
///
/// - [`CoreError::AlreadyExists`] if something already exists at `path`.
/// - [`CoreError::NotFound`] if the parent directory does not exist.
/// - [`CoreError::PermissionDenied`] if the parent is not writable.
pub fn create_dir(path: &Path) -> CoreResult<()> {
    std::fs::create_dir(path).map_err(|e| CoreError::from_io(e, path))
}

/// Creates an empty regular file at `path`. An existing file is left untouched.
///
/// # Errors
///
/// Same as [`create_dir`].
pub fn create_file(path: &Path) -> CoreResult<()> {
    std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| CoreError::from_io(e, path))?;
    Ok(())
}

/// Launches the platform's default handler for `path` without waiting for it.
///
/// # Errors
///
/// - [`CoreError::Unsupported`] if `entry` is a directory or the platform
///   has no known opener.
/// - [`CoreError::Io`] if the opener process cannot be spawned.
pub fn open_with_default_application(path: &Path, entry: &DirectoryEntry) -> CoreResult<()> {
    if entry.is_dir() {
        return Err(CoreError::Unsupported("cannot open a directory".to_string()));
    }

    let mut cmd = if cfg!(target_os = "macos") {
        std::process::Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = std::process::Command::new("cmd");
        c.args(["/c", "start", ""]);
        c
    } else if cfg!(unix) {
        std::process::Command::new("xdg-open")
    } else {
        return Err(CoreError::Unsupported(format!(
            "no default opener for {}",
            std::env::consts::OS
        )));
    };

    cmd.arg(path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()?;
    Ok(())
}
