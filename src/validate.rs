//! Minimal structural validation of normalized records.
//!
//! Invalidity is a filtering signal, not a fatal error: each bad record is
//! dropped individually with a logged reason, and the batch always
//! completes. An empty accepted set is a valid outcome.
//!
//! Validation is explicit tagged-result checking: a record either passes
//! or yields a [`RejectionReason`], with no reflection over field
//! annotations.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::types::{NormalizedFirm, NormalizedOffice};

/// Why a record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum RejectionReason {
    /// Firm is missing its register identifier.
    #[error("blank sraId")]
    BlankSraId,
    /// Firm is missing its name.
    #[error("blank name")]
    BlankName,
    /// Firm is missing its regulatory status.
    #[error("blank regulatoryStatus")]
    BlankRegulatoryStatus,
    /// Office is missing its identifier.
    #[error("blank officeId")]
    BlankOfficeId,
    /// Office is missing its owning-firm reference.
    #[error("blank firmSraId")]
    BlankFirmSraId,
    /// Office is missing its street address.
    #[error("blank streetAddress")]
    BlankStreetAddress,
}

/// One rejected record: enough context for offline audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Identifier of the rejected record ("?" when the identifier itself
    /// was the blank field).
    pub record_id: String,
    /// Why it was rejected.
    pub reason: RejectionReason,
}

/// Outcome of validating one batch.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Firms that passed.
    pub firms: Vec<NormalizedFirm>,
    /// Offices that passed.
    pub offices: Vec<NormalizedOffice>,
    /// Everything that was dropped, with reasons.
    pub rejections: Vec<Rejection>,
}

/// Filter firm and office records down to the structurally valid subset.
///
/// Input order is preserved for accepted records; the graph builder's
/// deterministic ordering depends on it.
pub fn validate_records(
    firms: Vec<NormalizedFirm>,
    offices: Vec<NormalizedOffice>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    for firm in firms {
        match check_firm(&firm) {
            Ok(()) => report.firms.push(firm),
            Err(reason) => {
                let record_id = non_blank_or(&firm.sra_id, "?");
                warn!(record_id = %record_id, reason = %reason, "rejecting firm");
                report.rejections.push(Rejection { record_id, reason });
            }
        }
    }

    for office in offices {
        match check_office(&office) {
            Ok(()) => report.offices.push(office),
            Err(reason) => {
                let record_id = non_blank_or(&office.office_id, "?");
                warn!(record_id = %record_id, reason = %reason, "rejecting office");
                report.rejections.push(Rejection { record_id, reason });
            }
        }
    }

    info!(
        accepted_firms = report.firms.len(),
        accepted_offices = report.offices.len(),
        rejected = report.rejections.len(),
        "validation complete"
    );
    report
}

fn check_firm(firm: &NormalizedFirm) -> Result<(), RejectionReason> {
    if is_blank(&firm.sra_id) {
        return Err(RejectionReason::BlankSraId);
    }
    if is_blank(&firm.name) {
        return Err(RejectionReason::BlankName);
    }
    if is_blank(&firm.regulatory_status) {
        return Err(RejectionReason::BlankRegulatoryStatus);
    }
    Ok(())
}

fn check_office(office: &NormalizedOffice) -> Result<(), RejectionReason> {
    if is_blank(&office.office_id) {
        return Err(RejectionReason::BlankOfficeId);
    }
    if is_blank(&office.firm_sra_id) {
        return Err(RejectionReason::BlankFirmSraId);
    }
    if is_blank(&office.address.street_address) {
        return Err(RejectionReason::BlankStreetAddress);
    }
    Ok(())
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn non_blank_or(s: &str, fallback: &str) -> String {
    if is_blank(s) {
        fallback.to_string()
    } else {
        s.to_string()
    }
}
