//! Cross-platform filesystem wrapper.
//!
//! On Unix we transparently re-export std::fs and read/write POSIX
//! permission bits directly. On Windows permission bits are not available,
//! so [`mode`] returns `None` and [`set_unix_permissions`] is a no-op; the
//! rest of the crate treats the bits as optional metadata throughout.
//!
//! Call-sites import `crate::fsx` instead of touching `std::fs` directly so
//! they stay identical across OSes.

use std::io;
use std::path::Path;

pub use std::fs::*;

/// Read the POSIX permission bits of already-fetched metadata.
#[cfg(not(target_os = "windows"))]
pub fn mode(metadata: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode())
}

/// Set POSIX permission bits on Unix.
#[cfg(not(target_os = "windows"))]
pub fn set_unix_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

/// Permission bits are not recorded on Windows.
#[cfg(target_os = "windows")]
pub fn mode(_metadata: &Metadata) -> Option<u32> {
    None
}

/// No-op on Windows: POSIX permission bits are not preserved.
#[cfg(target_os = "windows")]
pub fn set_unix_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
