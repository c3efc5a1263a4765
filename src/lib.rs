//! # register-graph
//!
//! Deterministic JSON-LD graph construction and signed manifests for a
//! regulatory register dataset.
//!
//! The pipeline ingests raw organisation + office records, normalizes them
//! into a canonical schema, renders them as a linked-data graph, and seals
//! the emitted artifacts with a tamper-evident manifest.
//!
//! ## Architecture
//!
//! ```text
//! raw records → normalize → validate → GraphBuilder → firms.jsonld
//!                                          │
//!                                          ├────────→ dataset.jsonld
//!                                          │
//!                    file hashes → ManifestBuilder → manifest.jsonld
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same input records + same configuration → byte-identical graph
//! - Canonical serialization: key-sorted, compact, UTF-8 (see [`canonical`])
//! - Entity ordering is firm-then-children in input order, never
//!   hash-iteration order
//! - The manifest signature covers the canonical bytes of the unsigned
//!   manifest
//!
//! All artifact writes are atomic: a run interrupted mid-write never
//! leaves a partial file at a final path.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atomic;
pub mod canonical;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod graph;
pub mod hash;
pub mod ingest;
pub mod iri;
pub mod manifest;
pub mod normalize;
pub mod pipeline;
pub mod signing;
pub mod types;
pub mod validate;

// Re-exports
pub use atomic::{write_bytes_atomic, write_json_atomic, AtomicWriteError};
pub use canonical::{canonical_hash_hex, to_canonical_bytes, CanonicalError};
pub use config::{ConfigError, PipelineConfig};
pub use descriptor::{build_descriptor, DatasetDescriptor};
pub use error::PipelineError;
pub use graph::{build_graph, vocabulary_context};
pub use hash::{file_sha256, sha256_hex};
pub use ingest::{load_register, IngestError};
pub use manifest::{build_manifest, Manifest, ManifestEntry, ManifestError, Signature};
pub use normalize::normalise_records;
pub use pipeline::{run, RunSummary};
pub use signing::{verify_signature, ManifestSigner, SigningError, SIGNATURE_ALGORITHM};
pub use types::{
    Address, FirmEntity, GraphDocument, GraphEntity, IriRef, NormalizedFirm, NormalizedOffice,
    OfficeEntity, PostalAddress, RawFirmRecord, RawOfficeRecord,
};
pub use validate::{validate_records, Rejection, RejectionReason, ValidationReport};
