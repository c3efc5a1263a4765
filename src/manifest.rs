//! Tamper-evident manifest over emitted artifacts.
//!
//! The manifest is the only signed artifact. Per run it moves through
//! `collect file info → canonicalize → (sign | skip) → write`; all states
//! before the write are pure and can only produce missing-file warnings.
//! Signing is an enhancement, never a correctness requirement: without a
//! usable key the manifest is written unsigned.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::canonical::{to_canonical_bytes, CanonicalError};
use crate::hash::file_sha256;
use crate::signing::{ManifestSigner, SigningError, SIGNATURE_ALGORITHM};

/// Context URIs carried by every manifest.
const MANIFEST_CONTEXT: [&str; 2] = [
    "https://schema.org/",
    "https://veritrustgroup.org/def/tier0/",
];

/// Fatal manifest failure. Missing artifacts are not errors; they are
/// skipped with a warning.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Reading an artifact that exists on disk failed mid-hash.
    #[error("failed to hash artifact {path}: {source}")]
    Hash {
        /// Artifact path.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// The manifest itself failed to canonicalize (programming error).
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
    /// Signing with a successfully loaded key failed.
    #[error(transparent)]
    Signing(#[from] SigningError),
}

/// One artifact listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Artifact file name (not its full path).
    pub path: String,
    /// SHA-256 hex digest of the file's raw bytes.
    pub sha256: String,
    /// File size in bytes.
    #[serde(rename = "sizeInBytes")]
    pub size_in_bytes: u64,
}

/// Detached signature embedded in a signed manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Signature algorithm name, e.g. `RSA-SHA256`.
    pub algorithm: String,
    /// Hex-encoded signature over the unsigned manifest's canonical bytes.
    pub value: String,
}

/// The dataset manifest document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// JSON-LD context URIs.
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    /// Fixed manifest identifier.
    #[serde(rename = "@id")]
    pub id: String,
    /// Always `"Dataset"`.
    #[serde(rename = "@type")]
    pub doc_type: String,
    /// Display name.
    pub name: String,
    /// Generation timestamp, ISO-8601 UTC.
    #[serde(rename = "dateModified")]
    pub date_modified: String,
    /// Hashed artifact entries, in the order the artifacts were listed.
    pub distribution: Vec<ManifestEntry>,
    /// Signature over the unsigned manifest's canonical bytes, when a key
    /// was available.
    #[serde(rename = "vt:signature", skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
}

/// Build a manifest over `artifacts`, optionally signing it.
///
/// For each artifact that exists on disk, an entry with its file name,
/// content hash, and byte size is emitted; artifacts that do not exist are
/// skipped with a warning. The signature, when present, covers the
/// canonical bytes of the manifest *without* its `vt:signature` field.
pub fn build_manifest(
    artifacts: &[&Path],
    manifest_id: &str,
    manifest_name: &str,
    signer: Option<&ManifestSigner>,
    now: DateTime<Utc>,
) -> Result<Manifest, ManifestError> {
    let mut distribution = Vec::with_capacity(artifacts.len());
    for path in artifacts {
        match file_info(path)? {
            Some(entry) => distribution.push(entry),
            None => warn!(path = %path.display(), "missing file skipped in manifest"),
        }
    }

    let mut manifest = Manifest {
        context: MANIFEST_CONTEXT.iter().map(|s| s.to_string()).collect(),
        id: manifest_id.to_string(),
        doc_type: "Dataset".to_string(),
        name: manifest_name.to_string(),
        date_modified: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        distribution,
        signature: None,
    };

    let canonical_bytes = to_canonical_bytes(&manifest)?;

    match signer {
        Some(signer) => {
            let value = signer.sign(&canonical_bytes)?;
            manifest.signature = Some(Signature {
                algorithm: SIGNATURE_ALGORITHM.to_string(),
                value,
            });
            info!(entries = manifest.distribution.len(), "manifest signed");
        }
        None => {
            warn!("no signing key available; manifest will not be signed");
        }
    }

    Ok(manifest)
}

/// Hash and measure one artifact; `None` when it does not exist.
fn file_info(path: &Path) -> Result<Option<ManifestEntry>, ManifestError> {
    if !path.exists() {
        return Ok(None);
    }
    let hash_err = |source| ManifestError::Hash {
        path: path.to_path_buf(),
        source,
    };

    let sha256 = file_sha256(path).map_err(hash_err)?;
    let size_in_bytes = path.metadata().map_err(hash_err)?.len();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Some(ManifestEntry {
        path: name,
        sha256,
        size_in_bytes,
    }))
}
