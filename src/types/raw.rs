//! Raw register records as published upstream.
//!
//! Field names mirror the source feed verbatim (`Id`, `PracticeName`, ...).
//! Everything is optional: the feed omits fields freely and sometimes emits
//! numeric identifiers, so identifier-like fields are kept as raw JSON values
//! until normalization stringifies them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One office as it appears inside a raw firm record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOfficeRecord {
    /// Office identifier (string or number in the feed).
    #[serde(rename = "OfficeId")]
    pub office_id: Option<Value>,
    /// Office classification code; compared against the configured
    /// head-office code to derive `isHeadOffice`.
    #[serde(rename = "OfficeType")]
    pub office_type: Option<String>,
    /// First address line.
    #[serde(rename = "Address1")]
    pub address1: Option<String>,
    /// Second address line.
    #[serde(rename = "Address2")]
    pub address2: Option<String>,
    /// Third address line.
    #[serde(rename = "Address3")]
    pub address3: Option<String>,
    /// Fourth address line.
    #[serde(rename = "Address4")]
    pub address4: Option<String>,
    /// Town or locality.
    #[serde(rename = "Town")]
    pub town: Option<String>,
    /// Postcode.
    #[serde(rename = "Postcode")]
    pub postcode: Option<String>,
    /// Country.
    #[serde(rename = "Country")]
    pub country: Option<String>,
}

/// One organisation as it appears in the raw feed, offices embedded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFirmRecord {
    /// Register identifier (string or number in the feed).
    #[serde(rename = "Id")]
    pub id: Option<Value>,
    /// Trading name.
    #[serde(rename = "PracticeName")]
    pub practice_name: Option<String>,
    /// Authorisation status, e.g. "Active".
    #[serde(rename = "AuthorisationStatus")]
    pub authorisation_status: Option<String>,
    /// Secondary register number (string or number in the feed).
    #[serde(rename = "SraNumber")]
    pub sra_number: Option<Value>,
    /// Authorisation type classification.
    #[serde(rename = "AuthorisationType")]
    pub authorisation_type: Option<String>,
    /// Organisation type classification.
    #[serde(rename = "OrganisationType")]
    pub organisation_type: Option<String>,
    /// Companies House registration number, if any.
    #[serde(rename = "CompanyRegNo")]
    pub company_reg_no: Option<String>,
    /// Legal constitution, if any.
    #[serde(rename = "Constitution")]
    pub constitution: Option<String>,
    /// Offices operated by this organisation.
    #[serde(rename = "Offices")]
    pub offices: Vec<RawOfficeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let rec: RawFirmRecord = serde_json::from_str(r#"{"Id": "F1"}"#).unwrap();
        assert_eq!(rec.id, Some(Value::from("F1")));
        assert!(rec.offices.is_empty());
        assert!(rec.practice_name.is_none());
    }

    #[test]
    fn test_deserialize_numeric_id() {
        let rec: RawFirmRecord = serde_json::from_str(r#"{"Id": 12345}"#).unwrap();
        assert_eq!(rec.id, Some(Value::from(12345)));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let rec: RawFirmRecord =
            serde_json::from_str(r#"{"Id": "F1", "SomethingNew": true}"#).unwrap();
        assert_eq!(rec.id, Some(Value::from("F1")));
    }
}
