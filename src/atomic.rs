//! Failure-safe all-or-nothing file writes.
//!
//! Every artifact the pipeline emits goes through this module. The target
//! path either ends up with the complete new content or keeps its prior
//! state; a partial file is never observable, even if the process dies or
//! the disk fills mid-write.
//!
//! Mechanism: stage to a `<path>.tmp` sibling, flush and sync, then rename
//! onto the final path. Rename within one directory is atomic on the
//! platforms we target. On any staging failure the temporary file is
//! removed and the error propagates to the caller.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Atomic write failure, carrying the target path and the OS cause.
#[derive(Debug, Error)]
pub enum AtomicWriteError {
    /// Filesystem operation failed while staging or replacing.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Final target path.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// The document could not be serialized to JSON.
    #[error("failed to serialize document for {path}: {source}")]
    Serialize {
        /// Final target path.
        path: PathBuf,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
}

/// Atomically write raw bytes to `path`.
///
/// Parent directories are created as needed before staging.
pub fn write_bytes_atomic(path: &Path, content: &[u8]) -> Result<(), AtomicWriteError> {
    let io_err = |source| AtomicWriteError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let tmp = tmp_path(path);
    match stage(&tmp, content) {
        Ok(()) => {}
        Err(source) => {
            cleanup_tmp(&tmp);
            return Err(io_err(source));
        }
    }

    if let Err(source) = fs::rename(&tmp, path) {
        cleanup_tmp(&tmp);
        return Err(io_err(source));
    }

    tracing::debug!(path = %path.display(), bytes = content.len(), "atomic write complete");
    Ok(())
}

/// Atomically write a document as human-readable (2-space indented) UTF-8
/// JSON.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), AtomicWriteError> {
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| AtomicWriteError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    write_bytes_atomic(path, &bytes)
}

fn stage(tmp: &Path, content: &[u8]) -> Result<(), std::io::Error> {
    let mut file = File::create(tmp)?;
    file.write_all(content)?;
    file.flush()?;
    // Durability before the rename makes the replace meaningful.
    file.sync_all()?;
    Ok(())
}

fn cleanup_tmp(tmp: &Path) {
    if tmp.exists() {
        if let Err(e) = fs::remove_file(tmp) {
            tracing::error!(tmp = %tmp.display(), error = %e, "failed to remove staging file");
        }
    }
}

/// `output/manifest.jsonld` stages at `output/manifest.jsonld.tmp`, a
/// sibling, so the final rename never crosses a filesystem boundary.
fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}
