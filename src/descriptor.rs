//! Dataset descriptor document.
//!
//! A small schema.org `Dataset` node pointing consumers at the entity
//! graph's public download URL.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::iri::public_file_url;

/// A downloadable distribution of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataDownload {
    /// Always `"DataDownload"`.
    #[serde(rename = "@type")]
    pub doc_type: String,
    /// Public URL of the file.
    #[serde(rename = "contentUrl")]
    pub content_url: String,
    /// MIME type of the file.
    #[serde(rename = "encodingFormat")]
    pub encoding_format: String,
}

/// The publishing organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    /// Always `"Organization"`.
    #[serde(rename = "@type")]
    pub doc_type: String,
    /// Organisation name.
    pub name: String,
}

/// The dataset descriptor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Plain schema.org context.
    #[serde(rename = "@context")]
    pub context: String,
    /// Fixed dataset identifier.
    #[serde(rename = "@id")]
    pub id: String,
    /// Always `"Dataset"`.
    #[serde(rename = "@type")]
    pub doc_type: String,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Publishing organisation.
    pub creator: Creator,
    /// Generation timestamp, ISO-8601 UTC.
    #[serde(rename = "dateModified")]
    pub date_modified: String,
    /// Download locations; exactly one, the entity graph.
    pub distribution: Vec<DataDownload>,
}

/// Build the descriptor referencing the entity graph at `graph_path`.
pub fn build_descriptor(
    cfg: &PipelineConfig,
    graph_path: &Path,
    now: DateTime<Utc>,
) -> DatasetDescriptor {
    DatasetDescriptor {
        context: "https://schema.org/".to_string(),
        id: cfg.dataset_id.clone(),
        doc_type: "Dataset".to_string(),
        name: cfg.dataset_name.clone(),
        description: cfg.dataset_description.clone(),
        creator: Creator {
            doc_type: "Organization".to_string(),
            name: cfg.creator_name.clone(),
        },
        date_modified: now.to_rfc3339_opts(SecondsFormat::Micros, true),
        distribution: vec![DataDownload {
            doc_type: "DataDownload".to_string(),
            content_url: public_file_url(&cfg.public_files_base, graph_path),
            encoding_format: "application/ld+json".to_string(),
        }],
    }
}
