//! First-pass cleanup: raw register records to normalized firm/office
//! records.
//!
//! Normalization is defensive, never fatal. A record the feed mangled is
//! skipped with a warning and the batch continues.

use serde_json::Value;
use tracing::{info, warn};

use crate::types::{Address, NormalizedFirm, NormalizedOffice, RawFirmRecord, RawOfficeRecord};

/// Convert raw register records into canonical firm and office lists.
///
/// `head_office_code` is the office-type code that marks a head office;
/// matching is exact and case-sensitive.
///
/// Dropped along the way:
/// - records with a blank `Id`
/// - offices with a blank `OfficeId`
/// - offices whose cleaned address is empty in every field
pub fn normalise_records(
    records: &[RawFirmRecord],
    head_office_code: &str,
) -> (Vec<NormalizedFirm>, Vec<NormalizedOffice>) {
    let mut firms = Vec::with_capacity(records.len());
    let mut offices = Vec::new();

    for rec in records {
        let firm_id = clean_value(rec.id.as_ref());
        if firm_id.is_empty() {
            warn!("skipping record with no Id");
            continue;
        }

        firms.push(NormalizedFirm {
            sra_id: firm_id.clone(),
            sra_number: clean_value(rec.sra_number.as_ref()),
            name: clean_opt(rec.practice_name.as_deref()),
            regulatory_status: clean_opt(rec.authorisation_status.as_deref()),
            authorisation_type: clean_classification(rec.authorisation_type.as_deref()),
            organisation_type: clean_classification(rec.organisation_type.as_deref()),
            company_reg_no: clean_classification(rec.company_reg_no.as_deref()),
            constitution: clean_classification(rec.constitution.as_deref()),
        });

        for office in &rec.offices {
            let office_id = clean_value(office.office_id.as_ref());
            if office_id.is_empty() {
                continue;
            }

            let address = build_address(office);
            if address.is_empty() {
                warn!(office_id = %office_id, "skipping office: empty address");
                continue;
            }

            offices.push(NormalizedOffice {
                office_id,
                firm_sra_id: firm_id.clone(),
                is_head_office: office.office_type.as_deref() == Some(head_office_code),
                address,
            });
        }
    }

    info!(
        firms = firms.len(),
        offices = offices.len(),
        "normalisation complete"
    );
    (firms, offices)
}

/// Collapse whitespace runs to single spaces and trim.
pub fn clean(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_opt(value: Option<&str>) -> String {
    value.map(clean).unwrap_or_default()
}

/// Classification fields stay optional: blank means "not published".
fn clean_classification(value: Option<&str>) -> Option<String> {
    let cleaned = clean_opt(value);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Stringify an identifier-like raw value. The feed mixes strings and
/// numbers for the same field across records.
fn clean_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => clean(s),
        Some(other) => clean(&other.to_string()),
    }
}

fn build_address(office: &RawOfficeRecord) -> Address {
    let street = [
        office.address1.as_deref(),
        office.address2.as_deref(),
        office.address3.as_deref(),
        office.address4.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|p| !p.trim().is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    Address {
        street_address: clean(&street),
        address_locality: clean_opt(office.town.as_deref()),
        postal_code: clean_opt(office.postcode.as_deref()),
        address_country: clean_opt(office.country.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_firm(id: &str) -> RawFirmRecord {
        RawFirmRecord {
            id: Some(Value::from(id)),
            practice_name: Some("Firm One".to_string()),
            authorisation_status: Some("Active".to_string()),
            ..RawFirmRecord::default()
        }
    }

    fn raw_office(id: &str) -> RawOfficeRecord {
        RawOfficeRecord {
            office_id: Some(Value::from(id)),
            address1: Some("1 High St".to_string()),
            town: Some("Town".to_string()),
            postcode: Some("AB1 2CD".to_string()),
            country: Some("UK".to_string()),
            ..RawOfficeRecord::default()
        }
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean("  Firm   One \t Ltd \n"), "Firm One Ltd");
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
    }

    #[test]
    fn test_basic_normalisation() {
        let mut rec = raw_firm("F1");
        rec.offices.push(raw_office("O1"));

        let (firms, offices) = normalise_records(&[rec], "HO");

        assert_eq!(firms.len(), 1);
        assert_eq!(firms[0].sra_id, "F1");
        assert_eq!(firms[0].name, "Firm One");
        assert_eq!(offices.len(), 1);
        assert_eq!(offices[0].firm_sra_id, "F1");
        assert_eq!(offices[0].address.street_address, "1 High St");
    }

    #[test]
    fn test_numeric_ids_are_stringified() {
        let rec = RawFirmRecord {
            id: Some(json!(12345)),
            sra_number: Some(json!(987)),
            ..RawFirmRecord::default()
        };
        let (firms, _) = normalise_records(&[rec], "HO");
        assert_eq!(firms[0].sra_id, "12345");
        assert_eq!(firms[0].sra_number, "987");
    }

    #[test]
    fn test_record_without_id_is_skipped() {
        let (firms, _) = normalise_records(&[RawFirmRecord::default()], "HO");
        assert!(firms.is_empty());
    }

    #[test]
    fn test_office_without_id_is_skipped() {
        let mut rec = raw_firm("F1");
        rec.offices.push(RawOfficeRecord {
            office_id: None,
            ..raw_office("ignored")
        });

        let (_, offices) = normalise_records(&[rec], "HO");
        assert!(offices.is_empty());
    }

    #[test]
    fn test_office_with_all_empty_address_is_dropped() {
        let mut rec = raw_firm("F1");
        rec.offices.push(RawOfficeRecord {
            office_id: Some(Value::from("O1")),
            ..RawOfficeRecord::default()
        });

        let (firms, offices) = normalise_records(&[rec], "HO");
        assert_eq!(firms.len(), 1);
        assert!(offices.is_empty());
    }

    #[test]
    fn test_street_joins_nonempty_lines() {
        let mut rec = raw_firm("F1");
        rec.offices.push(RawOfficeRecord {
            office_id: Some(Value::from("O1")),
            address1: Some("Unit 4".to_string()),
            address2: None,
            address3: Some("  Mill  Lane ".to_string()),
            town: Some("Town".to_string()),
            ..RawOfficeRecord::default()
        });

        let (_, offices) = normalise_records(&[rec], "HO");
        assert_eq!(offices[0].address.street_address, "Unit 4 Mill Lane");
    }

    #[test]
    fn test_head_office_match_is_exact_and_case_sensitive() {
        // Assumption from upstream: the head-office code comparison is
        // exact. "ho" or "Ho" must not count.
        let mut rec = raw_firm("F1");
        for (i, code) in ["HO", "ho", "Ho", "HEAD OFFICE"].iter().enumerate() {
            rec.offices.push(RawOfficeRecord {
                office_type: Some(code.to_string()),
                ..raw_office(&format!("O{i}"))
            });
        }

        let (_, offices) = normalise_records(&[rec], "HO");
        let flags: Vec<bool> = offices.iter().map(|o| o.is_head_office).collect();
        assert_eq!(flags, vec![true, false, false, false]);
    }

    #[test]
    fn test_blank_classification_fields_become_none() {
        let rec = RawFirmRecord {
            id: Some(Value::from("F1")),
            authorisation_type: Some("  ".to_string()),
            organisation_type: Some("Partnership".to_string()),
            ..RawFirmRecord::default()
        };
        let (firms, _) = normalise_records(&[rec], "HO");
        assert_eq!(firms[0].authorisation_type, None);
        assert_eq!(
            firms[0].organisation_type.as_deref(),
            Some("Partnership")
        );
    }
}
