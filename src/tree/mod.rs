//! # Whole-Tree Operations
//!
//! Recursive copy and recursive move of directory trees, built by combining
//! the walker, the path projection, and the single-file transfer primitives.

use std::path::Path;

use tracing::debug;

use crate::fsx;
use crate::transfer::{copy_file, move_file};
use crate::walk::{walk_from_to, Entry, WalkOutcome};
use crate::TreeError;

fn outcome(step: Result<(), TreeError>) -> WalkOutcome {
    match step {
        Ok(()) => WalkOutcome::Continue,
        Err(err) => WalkOutcome::Abort(err),
    }
}

/// Recursively copies the directory tree at `from` into `to`.
///
/// Destination containers are created before any leaf below them is copied.
/// The first error aborts the walk and is returned; files copied up to that
/// point are left in place.
pub fn copy_tree(from: &Path, to: &Path) -> Result<(), TreeError> {
    debug!(from = %from.display(), to = %to.display(), "copying directory tree");
    fsx::create_dir_all(to).map_err(|e| TreeError::io(e, to))?;
    walk_from_to(from, to, |src_dir, dst_dir, entry| {
        outcome(copy_entry(src_dir, dst_dir, entry))
    })
}

fn copy_entry(src_dir: &Path, dst_dir: &Path, entry: &Entry) -> Result<(), TreeError> {
    let dst = dst_dir.join(&entry.name);
    if entry.is_dir {
        fsx::create_dir_all(&dst).map_err(|e| TreeError::io(e, &dst))
    } else {
        copy_file(&src_dir.join(&entry.name), &dst)
    }
}

/// Recursively moves the directory tree at `from` to `to`.
///
/// Attempts an atomic whole-directory rename first. On any rename failure
/// the tree is walked and every leaf is moved individually (creating
/// destination containers as needed), then the emptied source tree is
/// removed. If a per-file move fails mid-walk, the walk aborts immediately
/// and the source is left partially moved; no rollback is performed.
pub fn move_tree(from: &Path, to: &Path) -> Result<(), TreeError> {
    if fsx::rename(from, to).is_ok() {
        return Ok(());
    }
    debug!(from = %from.display(), to = %to.display(), "rename failed, moving tree file by file");
    fsx::create_dir_all(to).map_err(|e| TreeError::io(e, to))?;
    walk_from_to(from, to, |src_dir, dst_dir, entry| {
        outcome(move_entry(src_dir, dst_dir, entry))
    })?;
    fsx::remove_dir_all(from).map_err(|e| TreeError::io(e, from))
}

fn move_entry(src_dir: &Path, dst_dir: &Path, entry: &Entry) -> Result<(), TreeError> {
    let dst = dst_dir.join(&entry.name);
    if entry.is_dir {
        fsx::create_dir_all(&dst).map_err(|e| TreeError::io(e, &dst))
    } else {
        move_file(&src_dir.join(&entry.name), &dst)
    }
}
