use std::io;
use std::path::PathBuf;
use std::time::SystemTimeError;

use zip::result::ZipError;

/// The primary error type for all operations in the `treepack` crate.
#[derive(Debug)]
pub enum TreeError {
    /// The path does not exist.
    NotFound(PathBuf),

    /// The path exists but access to it was refused.
    PermissionDenied(PathBuf),

    /// The destination already exists where the operation requires absence.
    AlreadyExists(PathBuf),

    /// Any other I/O error, typically while reading or writing a file.
    /// Includes the path where the error happened.
    Io { source: io::Error, path: PathBuf },

    /// An error occurred when trying to strip a prefix from a file path.
    StripPrefix { prefix: PathBuf, path: PathBuf },

    /// An error from the underlying zip codec while packing or unpacking.
    Archive(ZipError),

    /// A system time error, which can occur when reading file metadata.
    SystemTime(SystemTimeError),
}

impl TreeError {
    /// Wraps an `io::Error` with the path it happened on, classifying the
    /// well-known kinds into their own variants.
    pub(crate) fn io(source: io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => TreeError::NotFound(path),
            io::ErrorKind::PermissionDenied => TreeError::PermissionDenied(path),
            io::ErrorKind::AlreadyExists => TreeError::AlreadyExists(path),
            _ => TreeError::Io { source, path },
        }
    }
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::NotFound(path) => write!(f, "Path not found: '{}'", path.display()),
            TreeError::PermissionDenied(path) => write!(f, "Permission denied on path '{}'", path.display()),
            TreeError::AlreadyExists(path) => write!(f, "Path already exists: '{}'", path.display()),
            TreeError::Io { source, path } => write!(f, "I/O error on path '{}': {}", path.display(), source),
            TreeError::StripPrefix { prefix, path } => write!(f, "Could not strip prefix '{}' from path '{}'", prefix.display(), path.display()),
            TreeError::Archive(e) => write!(f, "Archive error: {}", e),
            TreeError::SystemTime(e) => write!(f, "System time error: {}", e),
        }
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TreeError::Io { source, .. } => Some(source),
            TreeError::Archive(e) => Some(e),
            TreeError::SystemTime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ZipError> for TreeError {
    fn from(err: ZipError) -> Self {
        TreeError::Archive(err)
    }
}

impl From<SystemTimeError> for TreeError {
    fn from(err: SystemTimeError) -> Self {
        TreeError::SystemTime(err)
    }
}

