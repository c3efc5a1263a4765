//! Normalized firm and office records.
//!
//! These are the canonical in-memory shapes produced by normalization and
//! consumed by validation and the graph builder. Field names serialize in
//! the canonical camelCase form used by every downstream artifact.

use serde::{Deserialize, Serialize};

/// A postal address attached to an office.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Joined street lines.
    pub street_address: String,
    /// Town or locality.
    pub address_locality: String,
    /// Postcode.
    pub postal_code: String,
    /// Country.
    pub address_country: String,
}

impl Address {
    /// True when every field is blank. An all-empty address disqualifies
    /// its owning office.
    pub fn is_empty(&self) -> bool {
        self.street_address.is_empty()
            && self.address_locality.is_empty()
            && self.postal_code.is_empty()
            && self.address_country.is_empty()
    }
}

/// A normalized firm record. `sra_id` is the primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFirm {
    /// Register identifier; primary key, non-empty after cleanup.
    pub sra_id: String,
    /// Secondary register number (may be empty).
    pub sra_number: String,
    /// Trading name, non-empty after cleanup.
    pub name: String,
    /// Authorisation status, e.g. "Active".
    pub regulatory_status: String,
    /// Authorisation type classification, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorisation_type: Option<String>,
    /// Organisation type classification, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_type: Option<String>,
    /// Companies House registration number, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_reg_no: Option<String>,
    /// Legal constitution, when published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constitution: Option<String>,
}

/// A normalized office record, owned by a firm via `firm_sra_id`.
///
/// Referential integrity is not enforced here: an office whose firm is
/// absent from the batch still flows through and becomes an orphan graph
/// entity downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOffice {
    /// Office identifier; unique within a run.
    pub office_id: String,
    /// Foreign key to the owning firm's `sra_id`.
    pub firm_sra_id: String,
    /// True when the office's type code matched the configured head-office
    /// code exactly.
    pub is_head_office: bool,
    /// Postal address; never all-empty for records that survive
    /// normalization.
    pub address: Address,
}
