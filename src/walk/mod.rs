//! # Directory Listing and the Recursive Walker
//!
//! This module is the core of the crate. It provides:
//!
//! - [`list_dir`]: one directory's immediate entries, containers first.
//! - [`walk`]: depth-first, pre-order traversal of a whole tree, invoking a
//!   visitor for every entry and honoring its skip/abort signals.
//! - [`project`] / [`walk_from_to`]: prefix rewriting that projects a walk
//!   over one tree into parallel paths inside a second tree.
//!
//! All higher-level operations in this crate ([`crate::tree`],
//! [`crate::pack`]) are built on these three primitives.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::fsx;
use crate::TreeError;

/// Metadata snapshot of a single filesystem object, observed at listing time.
///
/// Produced fresh by each [`list_dir`] call and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The object's file name (no directory components).
    pub name: OsString,
    /// True if this entry is a directory.
    pub is_dir: bool,
    /// Size in bytes. Zero for directories on most platforms.
    pub size: u64,
    /// Unix-style permission bits, if the platform records them.
    pub permissions: Option<u32>,
    /// Modification time as a Unix timestamp.
    pub modified: u64,
}

impl Entry {
    fn from_metadata(name: OsString, metadata: &fsx::Metadata) -> Result<Self, TreeError> {
        // Platforms without mtime support report 0.
        let modified = match metadata.modified() {
            Ok(time) => time.duration_since(UNIX_EPOCH)?.as_secs(),
            Err(_) => 0,
        };
        Ok(Entry {
            name,
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            permissions: fsx::mode(metadata),
            modified,
        })
    }
}

/// Sorts entries so that every directory precedes every file.
///
/// The sort key is the single is-directory boolean and the sort is stable,
/// so within each group the raw enumeration order is preserved.
fn sort_dirs_first(entries: &mut [Entry]) {
    entries.sort_by_key(|e| !e.is_dir);
}

/// Lists the immediate contents of a directory, directories first.
///
/// The whole listing is materialized before it is returned; entries within
/// the directory group and within the file group keep the order the
/// underlying directory read produced them in.
pub fn list_dir(dir: &Path) -> Result<Vec<Entry>, TreeError> {
    let mut entries = Vec::new();
    for item in fsx::read_dir(dir).map_err(|e| TreeError::io(e, dir))? {
        let item = item.map_err(|e| TreeError::io(e, dir))?;
        let metadata = item.metadata().map_err(|e| TreeError::io(e, item.path()))?;
        entries.push(Entry::from_metadata(item.file_name(), &metadata)?);
    }
    sort_dirs_first(&mut entries);
    Ok(entries)
}

/// The visitor's verdict on one entry.
#[derive(Debug)]
pub enum WalkOutcome {
    /// Keep going; descend into the entry if it is a directory.
    Continue,
    /// Do not descend into this directory's children. No-op on a file.
    SkipSubtree,
    /// Stop the whole walk immediately and surface this error.
    Abort(TreeError),
}

/// Recursively walks a directory tree in depth-first, pre-order.
///
/// The visitor is invoked as `visit(parent_dir, entry)` for every entry in
/// the tree; the root itself is never visited. A directory's children are
/// listed via [`list_dir`] only after the directory entry was visited and
/// only if the visitor returned [`WalkOutcome::Continue`] for it.
///
/// Depth is unbounded; a tree made self-referential through symlinks is not
/// detected and will not terminate.
pub fn walk<F>(root: &Path, mut visit: F) -> Result<(), TreeError>
where
    F: FnMut(&Path, &Entry) -> WalkOutcome,
{
    walk_inner(root, &mut visit)
}

fn walk_inner(
    root: &Path,
    visit: &mut dyn FnMut(&Path, &Entry) -> WalkOutcome,
) -> Result<(), TreeError> {
    for entry in list_dir(root)? {
        match visit(root, &entry) {
            WalkOutcome::Abort(err) => return Err(err),
            WalkOutcome::SkipSubtree => {}
            WalkOutcome::Continue => {
                if entry.is_dir {
                    walk_inner(&root.join(&entry.name), visit)?;
                }
            }
        }
    }
    Ok(())
}

/// Rewrites `observed` from the `source_root` tree into the `dest_root` tree.
///
/// `observed` must be `source_root` itself or a descendant of it, which is
/// what a walk started at `source_root` produces; anything else fails with
/// [`TreeError::StripPrefix`].
pub fn project(source_root: &Path, dest_root: &Path, observed: &Path) -> Result<PathBuf, TreeError> {
    let suffix = observed
        .strip_prefix(source_root)
        .map_err(|_| TreeError::StripPrefix {
            prefix: source_root.to_path_buf(),
            path: observed.to_path_buf(),
        })?;
    Ok(dest_root.join(suffix))
}

/// Walks `from` while projecting every visited directory into the `to` tree.
///
/// The callback receives `(source_dir, projected_dest_dir, entry)`, where
/// the two directories always share the same suffix relative to their
/// respective roots.
pub fn walk_from_to<F>(from: &Path, to: &Path, mut f: F) -> Result<(), TreeError>
where
    F: FnMut(&Path, &Path, &Entry) -> WalkOutcome,
{
    walk(from, |dir, entry| match project(from, to, dir) {
        Ok(dest_dir) => f(dir, &dest_dir, entry),
        Err(err) => WalkOutcome::Abort(err),
    })
}
