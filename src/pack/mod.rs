//! # Archive Packing and Unpacking
//!
//! Packs a directory tree into a zip stream and unpacks a zip stream back
//! into a directory.
//!
//! Entry names inside the archive are always relative to the packed root
//! and always use forward slashes, on every platform. Container entries end
//! with a slash and carry no content; leaf entries are deflated and record
//! the source file's unix permission bits.

use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::read::ZipArchive;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::fsx;
use crate::walk::{walk, Entry, WalkOutcome};
use crate::TreeError;

/// Packs the directory tree at `source` into a zip archive written to `dest`.
///
/// Entries are recorded in walk order, so a container always precedes the
/// leaves inside it. The archive's central directory is written only after
/// the walk has completed successfully; when the walk fails partway the
/// error is returned and the caller must discard the stream.
pub fn pack_directory<W: Write + Seek>(source: &Path, dest: W) -> Result<W, TreeError> {
    debug!(source = %source.display(), "packing directory");
    let mut writer = ZipWriter::new(dest);
    walk(source, |dir, entry| {
        match append_entry(&mut writer, source, dir, entry) {
            Ok(()) => WalkOutcome::Continue,
            Err(err) => WalkOutcome::Abort(err),
        }
    })?;
    Ok(writer.finish()?)
}

fn append_entry<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    root: &Path,
    dir: &Path,
    entry: &Entry,
) -> Result<(), TreeError> {
    let full = dir.join(&entry.name);
    let name = archive_name(root, &full)?;
    let mut options = FileOptions::default();
    if let Some(mode) = entry.permissions {
        options = options.unix_permissions(mode);
    }
    if entry.is_dir {
        // The codec appends the trailing slash to the recorded name.
        writer.add_directory(name, options.compression_method(CompressionMethod::Stored))?;
        return Ok(());
    }
    writer.start_file(name, options.compression_method(CompressionMethod::Deflated))?;
    let mut file = fsx::File::open(&full).map_err(|e| TreeError::io(e, &full))?;
    io::copy(&mut file, writer).map_err(|e| TreeError::io(e, &full))?;
    Ok(())
}

/// Rewrites a path under `root` into its archive name: the suffix relative
/// to `root`, with components joined by forward slashes.
fn archive_name(root: &Path, path: &Path) -> Result<String, TreeError> {
    let rel = path.strip_prefix(root).map_err(|_| TreeError::StripPrefix {
        prefix: root.to_path_buf(),
        path: path.to_path_buf(),
    })?;
    let mut name = String::new();
    for component in rel.components() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    Ok(name)
}

/// Unpacks a zip archive read from `source` into the directory `dest_dir`.
///
/// `dest_dir` is created if absent. Entries are processed in archive order:
/// containers become subdirectories (idempotently), leaves are written out
/// with their decompressed content and recorded permission bits. Entries
/// whose names would escape `dest_dir` are skipped.
pub fn unpack_archive<R: Read + Seek>(source: R, dest_dir: &Path) -> Result<(), TreeError> {
    let mut archive = ZipArchive::new(source)?;
    debug!(dest = %dest_dir.display(), entries = archive.len(), "unpacking archive");
    fsx::create_dir_all(dest_dir).map_err(|e| TreeError::io(e, dest_dir))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let rel: PathBuf = match entry.enclosed_name() {
            Some(p) => p.to_path_buf(),
            None => {
                debug!(name = entry.name(), "skipping entry with unsafe name");
                continue;
            }
        };
        let out = dest_dir.join(rel);

        if entry.is_dir() {
            fsx::create_dir_all(&out).map_err(|e| TreeError::io(e, &out))?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fsx::create_dir_all(parent).map_err(|e| TreeError::io(e, parent))?;
        }
        let mut file = fsx::File::create(&out).map_err(|e| TreeError::io(e, &out))?;
        io::copy(&mut entry, &mut file).map_err(|e| TreeError::io(e, &out))?;
        if let Some(mode) = entry.unix_mode() {
            fsx::set_unix_permissions(&out, mode).map_err(|e| TreeError::io(e, &out))?;
        }
    }
    Ok(())
}

/// Packs `source` into a fresh zip file created at `dest_path`.
pub fn pack_to_file(source: &Path, dest_path: &Path) -> Result<(), TreeError> {
    let file = fsx::File::create(dest_path).map_err(|e| TreeError::io(e, dest_path))?;
    pack_directory(source, file)?;
    Ok(())
}

/// Unpacks the zip file at `archive_path` into `dest_dir`.
pub fn unpack_from_file(archive_path: &Path, dest_dir: &Path) -> Result<(), TreeError> {
    let file = fsx::File::open(archive_path).map_err(|e| TreeError::io(e, archive_path))?;
    unpack_archive(file, dest_dir)
}
