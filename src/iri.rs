//! Stable identifier (IRI) construction.
//!
//! Every entity IRI is derived from its natural key and a configured base,
//! so the same input always yields the same identifier strings. The same
//! firm and office IRIs are shared across all datasets that reference this
//! register.

use std::path::Path;

/// Canonical firm IRI: `<id_base>firm/<sra_id>`.
pub fn firm_iri(id_base: &str, sra_id: &str) -> String {
    format!("{}firm/{}", ensure_trailing_slash(id_base), sra_id)
}

/// Canonical office IRI: `<id_base>office/<office_id>`.
pub fn office_iri(id_base: &str, office_id: &str) -> String {
    format!("{}office/{}", ensure_trailing_slash(id_base), office_id)
}

/// Map a local output file to its public download URL.
///
/// Only the file name participates: `output/firms.jsonld` under a files
/// base of `https://api.test/files/` becomes
/// `https://api.test/files/firms.jsonld`.
pub fn public_file_url(files_base: &str, local_path: &Path) -> String {
    let name = local_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}", ensure_trailing_slash(files_base), name)
}

fn ensure_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}
