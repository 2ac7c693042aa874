use crate::error::Error;
use crate::result::Result;
use crate::store::BlobStore;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Bundle the named blobs into a single flat ZIP archive at `output_path`.
///
/// Entry names are the base names of the sources; directory structure from
/// the blob names is discarded. When two names collapse to the same base
/// name, the last occurrence wins. An existing file at `output_path` is
/// overwritten.
///
/// Preconditions are checked in order before anything is written: the file
/// list must be non-empty, every blob must exist in the store, and the
/// output path's parent directory must exist and be writable. A failed
/// precondition leaves no file behind at `output_path`; a failure during
/// writing may leave a partial file, callers must not assume atomicity.
pub fn create_zip<S: AsRef<str>>(
    store: &dyn BlobStore,
    files: &[S],
    output_path: &Path,
) -> Result<()> {
    if files.is_empty() {
        warn!("No files provided for ZIP creation");
        return Err(Error::EmptyInput);
    }

    for file in files {
        if !store.exists(file.as_ref()) {
            return Err(Error::SourceNotFound(file.as_ref().to_string()));
        }
    }

    let output_dir = parent_dir(output_path);
    if !is_writable_dir(&output_dir) {
        return Err(Error::InvalidOutputPath(output_dir));
    }

    let entries = plan_entries(store, files)?;

    write_zip_file(store, &entries, output_path)
}

/// Map blob names to `(entry name, blob name)` pairs, in input order.
///
/// Entry names are the final segment of the resolved content path. Duplicate
/// base names replace the earlier entry in place: last write wins, decided
/// here rather than left to the zip library.
fn plan_entries<S: AsRef<str>>(
    store: &dyn BlobStore,
    files: &[S],
) -> Result<Vec<(String, String)>> {
    let mut entries: Vec<(String, String)> = Vec::with_capacity(files.len());

    for file in files {
        let name = store
            .resolve(file.as_ref())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::SourceNotFound(file.as_ref().to_string()))?;

        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = file.as_ref().to_string(),
            None => entries.push((name, file.as_ref().to_string())),
        }
    }

    Ok(entries)
}

fn write_zip_file(
    store: &dyn BlobStore,
    entries: &[(String, String)],
    output_path: &Path,
) -> Result<()> {
    let file = File::create(output_path).map_err(archive_write)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, blob) in entries {
        zip.start_file(name.as_str(), options)
            .map_err(archive_write)?;

        let content = store.read(blob).map_err(archive_write)?;
        zip.write_all(&content).map_err(archive_write)?;
    }

    zip.finish().map_err(archive_write)?;
    Ok(())
}

fn archive_write<E: std::fmt::Display>(err: E) -> Error {
    Error::ArchiveWrite(err.to_string())
}

// Parent directory of an output path; a bare file name resolves to `.`.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_writable_dir(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }

    // Permission bits miss effective access (root, ACLs), so attempt a real
    // create and clean it up again.
    let scratch = dir.join(format!(".blobpack-writecheck-{}", uuid::Uuid::new_v4()));
    match File::create(&scratch) {
        Ok(_) => {
            let _ = fs::remove_file(&scratch);
            true
        }
        Err(_) => false,
    }
}
