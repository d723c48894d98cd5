//! # Single-File Transfer
//!
//! Copy and move primitives for individual files. [`crate::tree`] drives
//! these per leaf when operating on whole trees.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::fsx;
use crate::TreeError;

/// Copies a single file, preserving its permission bits.
///
/// The source is opened read-only and fails with [`TreeError::NotFound`] if
/// it is absent; the destination is created or truncated. Both handles are
/// closed on every exit path, success or failure.
pub fn copy_file(from: &Path, to: &Path) -> Result<(), TreeError> {
    let mut src = fsx::File::open(from).map_err(|e| TreeError::io(e, from))?;
    let metadata = src.metadata().map_err(|e| TreeError::io(e, from))?;
    let mut dst = fsx::File::create(to).map_err(|e| TreeError::io(e, to))?;
    io::copy(&mut src, &mut dst).map_err(|e| TreeError::io(e, to))?;
    if let Some(mode) = fsx::mode(&metadata) {
        fsx::set_unix_permissions(to, mode).map_err(|e| TreeError::io(e, to))?;
    }
    Ok(())
}

/// Moves a single file.
///
/// Attempts an atomic rename first. If the rename fails for any reason
/// (cross-device link, platform target semantics), falls back to copying
/// and then deleting the source. The source is deleted only once the copy
/// has fully succeeded; on a failed copy it is left intact.
pub fn move_file(from: &Path, to: &Path) -> Result<(), TreeError> {
    if fsx::rename(from, to).is_ok() {
        return Ok(());
    }
    debug!(from = %from.display(), to = %to.display(), "rename failed, falling back to copy");
    copy_file(from, to)?;
    fsx::remove_file(from).map_err(|e| TreeError::io(e, from))
}
