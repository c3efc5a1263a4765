//! Top-level pipeline error.
//!
//! Propagation policy: per-record data-quality problems are absorbed and
//! summarized where they occur (normalization, validation, manifest
//! file-info collection); only structural and I/O problems surface here,
//! each carrying a precise cause for the operator.

use thiserror::Error;

use crate::atomic::AtomicWriteError;
use crate::canonical::CanonicalError;
use crate::config::ConfigError;
use crate::ingest::IngestError;
use crate::manifest::ManifestError;

/// Fatal pipeline failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The raw register could not be read.
    #[error(transparent)]
    Ingest(#[from] IngestError),
    /// A document could not be canonicalized (programming error upstream).
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
    /// An artifact could not be written atomically.
    #[error(transparent)]
    Write(#[from] AtomicWriteError),
    /// Manifest assembly or signing failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
