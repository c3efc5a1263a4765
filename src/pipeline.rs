//! End-to-end pipeline orchestration.
//!
//! One synchronous, single-threaded batch per invocation:
//!
//! ```text
//! ingest → normalize → validate → build graph → write graph
//!        → write descriptor → build/sign manifest → write manifest
//! ```
//!
//! Concurrent runs against the same output paths are not supported; the
//! atomic writer protects against torn files, not against racing writers.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::atomic::write_json_atomic;
use crate::canonical::canonical_hash_hex;
use crate::config::PipelineConfig;
use crate::descriptor::build_descriptor;
use crate::error::PipelineError;
use crate::graph::build_graph;
use crate::ingest::load_register;
use crate::manifest::build_manifest;
use crate::normalize::normalise_records;
use crate::signing::ManifestSigner;
use crate::validate::validate_records;

/// Summary of one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Firms accepted into the graph.
    pub firm_count: usize,
    /// Offices accepted into the graph.
    pub office_count: usize,
    /// Records rejected by validation.
    pub rejection_count: usize,
    /// Artifacts listed in the manifest.
    pub manifest_entries: usize,
    /// Whether the manifest carries a signature.
    pub signed: bool,
}

/// Run the full pipeline against `cfg`.
///
/// Every artifact write is atomic; an interrupted run leaves each output
/// path either in its prior state or fully written, never torn.
pub fn run(cfg: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let now = Utc::now();

    let records = load_register(&cfg.input_file, &audit_copy_path(cfg, now))?;
    let (firms, offices) = normalise_records(&records, &cfg.head_office_code);
    let report = validate_records(firms, offices);

    let graph = build_graph(&cfg.public_id_base, &report.firms, &report.offices);
    // Audit line: lets operators compare graph content across runs without
    // diffing files.
    let graph_hash = canonical_hash_hex(&graph)?;
    info!(sha256 = %graph_hash, "entity graph canonical hash");
    write_json_atomic(&cfg.jsonld_firms, &graph)?;
    info!(path = %cfg.jsonld_firms.display(), "entity graph written");

    let descriptor = build_descriptor(cfg, &cfg.jsonld_firms, now);
    write_json_atomic(&cfg.jsonld_dataset, &descriptor)?;
    info!(path = %cfg.jsonld_dataset.display(), "dataset descriptor written");

    let signer = load_signer(cfg);
    let manifest = build_manifest(
        &[cfg.jsonld_firms.as_path(), cfg.jsonld_dataset.as_path()],
        &cfg.manifest_id,
        &cfg.manifest_name,
        signer.as_ref(),
        now,
    )?;
    write_json_atomic(&cfg.jsonld_manifest, &manifest)?;
    info!(path = %cfg.jsonld_manifest.display(), "manifest written");

    let summary = RunSummary {
        firm_count: report.firms.len(),
        office_count: report.offices.len(),
        rejection_count: report.rejections.len(),
        manifest_entries: manifest.distribution.len(),
        signed: manifest.signature.is_some(),
    };
    info!(
        firms = summary.firm_count,
        offices = summary.office_count,
        rejected = summary.rejection_count,
        signed = summary.signed,
        "pipeline run complete"
    );
    Ok(summary)
}

fn load_signer(cfg: &PipelineConfig) -> Option<ManifestSigner> {
    match cfg.signing_key_pem.as_deref() {
        Some(pem) => ManifestSigner::from_pem(pem),
        None => {
            warn!("VT_PRIVATE_KEY_PEM not set; manifest will not be signed");
            None
        }
    }
}

fn audit_copy_path(cfg: &PipelineConfig, now: DateTime<Utc>) -> PathBuf {
    cfg.raw_output_dir
        .join(format!("register-{}.json", now.format("%Y%m%d")))
}
