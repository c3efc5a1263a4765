//! Local register file ingest.
//!
//! Loads the raw dataset from a local JSON file and keeps a dated audit
//! copy of exactly what was read. The feed's envelope is
//! `{"Count": N, "Organisations": [...]}`; a bare record array is also
//! accepted.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::atomic::{write_json_atomic, AtomicWriteError};
use crate::types::RawFirmRecord;

/// Ingest failure. All variants are fatal for the run: without input
/// records there is nothing to build.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input file does not exist.
    #[error("register input file not found: {path}")]
    NotFound {
        /// Requested path.
        path: PathBuf,
    },
    /// Reading the input file failed.
    #[error("failed to read register input {path}: {source}")]
    Read {
        /// Requested path.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// The input file is not valid register JSON.
    #[error("failed to parse register input {path}: {source}")]
    Parse {
        /// Requested path.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },
    /// Writing the raw audit copy failed.
    #[error(transparent)]
    AuditCopy(#[from] AtomicWriteError),
}

/// Load raw register records from `input_file`, writing an audit copy of
/// the unmodified payload to `audit_copy_path`.
pub fn load_register(
    input_file: &Path,
    audit_copy_path: &Path,
) -> Result<Vec<RawFirmRecord>, IngestError> {
    if !input_file.exists() {
        return Err(IngestError::NotFound {
            path: input_file.to_path_buf(),
        });
    }

    info!(path = %input_file.display(), "loading register dataset");

    let text = std::fs::read_to_string(input_file).map_err(|source| IngestError::Read {
        path: input_file.to_path_buf(),
        source,
    })?;
    let parse_err = |source| IngestError::Parse {
        path: input_file.to_path_buf(),
        source,
    };

    let payload: Value = serde_json::from_str(&text).map_err(parse_err)?;

    let records: Vec<RawFirmRecord> = match &payload {
        Value::Array(_) => serde_json::from_value(payload.clone()).map_err(parse_err)?,
        Value::Object(map) => {
            let organisations = map.get("Organisations").cloned().unwrap_or(Value::Array(vec![]));
            serde_json::from_value(organisations).map_err(parse_err)?
        }
        _ => {
            return Err(parse_err(serde::de::Error::custom(
                "expected an object with Organisations or an array of records",
            )))
        }
    };

    info!(count = records.len(), "loaded register records");

    // The audit copy is the payload as read, not a re-projection of the
    // typed records.
    write_json_atomic(audit_copy_path, &payload)?;

    Ok(records)
}
