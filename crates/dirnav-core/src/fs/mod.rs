//! File system abstractions.
//!
//! [`entry::DirectoryEntry`] is the unit the browser shows; [`ops`] holds the
//! blocking primitives behind [`LocalDirectoryService`](crate::service::LocalDirectoryService).

pub mod entry;
pub mod ops;
