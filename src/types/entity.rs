//! JSON-LD graph entities.
//!
//! Entities are a closed tagged union ([`GraphEntity`]) so the
//! canonicalizer is total over a known set of shapes. Every variant carries
//! a stable IRI (`@id`) and a type tag (`@type`); serialization order of
//! struct fields is declaration order, which keeps the emitted documents
//! stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::Address;

/// Type tag emitted for firm entities.
pub const FIRM_TYPE: &str = "RegulatedFirm";
/// Type tag emitted for office entities.
pub const OFFICE_TYPE: &str = "RegulatedOffice";
/// Type tag emitted for nested postal addresses.
pub const POSTAL_ADDRESS_TYPE: &str = "PostalAddress";

/// A reference to another entity by IRI, serialized as `{"@id": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IriRef {
    /// Target entity IRI.
    #[serde(rename = "@id")]
    pub id: String,
}

impl IriRef {
    /// Wrap an IRI string.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A postal address as a nested JSON-LD node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    /// Always [`POSTAL_ADDRESS_TYPE`].
    #[serde(rename = "@type")]
    pub entity_type: String,
    /// Joined street lines.
    #[serde(rename = "streetAddress")]
    pub street_address: String,
    /// Town or locality.
    #[serde(rename = "addressLocality")]
    pub address_locality: String,
    /// Postcode.
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    /// Country.
    #[serde(rename = "addressCountry")]
    pub address_country: String,
}

impl From<&Address> for PostalAddress {
    fn from(addr: &Address) -> Self {
        Self {
            entity_type: POSTAL_ADDRESS_TYPE.to_string(),
            street_address: addr.street_address.clone(),
            address_locality: addr.address_locality.clone(),
            postal_code: addr.postal_code.clone(),
            address_country: addr.address_country.clone(),
        }
    }
}

/// A firm entity in the `@graph` list.
///
/// Owns an ordered list of references (not copies) to its offices. Firms
/// with zero offices omit `hasOffice` entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmEntity {
    /// Stable IRI: `<id_base>firm/<sraId>`.
    #[serde(rename = "@id")]
    pub id: String,
    /// Always [`FIRM_TYPE`].
    #[serde(rename = "@type")]
    pub entity_type: String,
    /// Register identifier.
    #[serde(rename = "sraId")]
    pub sra_id: String,
    /// Trading name.
    pub name: String,
    /// Authorisation status.
    #[serde(rename = "regulatoryStatus")]
    pub regulatory_status: String,
    /// Ordered references to this firm's offices.
    #[serde(rename = "hasOffice", default, skip_serializing_if = "Vec::is_empty")]
    pub has_office: Vec<IriRef>,
}

/// An office entity in the `@graph` list, with a back-reference to its
/// owning firm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeEntity {
    /// Stable IRI: `<id_base>office/<officeId>`.
    #[serde(rename = "@id")]
    pub id: String,
    /// Always [`OFFICE_TYPE`].
    #[serde(rename = "@type")]
    pub entity_type: String,
    /// Office identifier.
    #[serde(rename = "officeId")]
    pub office_id: String,
    /// Owning firm's register identifier.
    #[serde(rename = "firmSraId")]
    pub firm_sra_id: String,
    /// Back-reference to the owning firm's IRI. For orphan offices this
    /// points at a firm absent from the batch.
    pub firm: IriRef,
    /// Head-office flag.
    #[serde(rename = "isHeadOffice")]
    pub is_head_office: bool,
    /// Postal address node.
    pub address: PostalAddress,
}

/// Closed union of all entity shapes that can appear in `@graph`.
///
/// Serialized untagged: the discriminant on the wire is the `@type` field
/// each variant already carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphEntity {
    /// A regulated firm.
    Firm(FirmEntity),
    /// A regulated office.
    Office(OfficeEntity),
}

impl GraphEntity {
    /// Stable IRI of this entity.
    pub fn iri(&self) -> &str {
        match self {
            Self::Firm(f) => &f.id,
            Self::Office(o) => &o.id,
        }
    }

    /// Type tag of this entity.
    pub fn entity_type(&self) -> &str {
        match self {
            Self::Firm(f) => &f.entity_type,
            Self::Office(o) => &o.entity_type,
        }
    }
}

/// The complete entity graph document: a context block plus a flat ordered
/// entity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Vocabulary mapping (short name to full URI). BTreeMap so the
    /// emitted context is key-sorted regardless of construction order.
    #[serde(rename = "@context")]
    pub context: BTreeMap<String, String>,
    /// Flat entity list in firm-then-children order.
    #[serde(rename = "@graph")]
    pub graph: Vec<GraphEntity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_office() -> OfficeEntity {
        OfficeEntity {
            id: "https://api.test/id/office/O1".to_string(),
            entity_type: OFFICE_TYPE.to_string(),
            office_id: "O1".to_string(),
            firm_sra_id: "F1".to_string(),
            firm: IriRef::new("https://api.test/id/firm/F1"),
            is_head_office: false,
            address: PostalAddress {
                entity_type: POSTAL_ADDRESS_TYPE.to_string(),
                street_address: "1 High St".to_string(),
                address_locality: "Town".to_string(),
                postal_code: "AB1 2CD".to_string(),
                address_country: "UK".to_string(),
            },
        }
    }

    #[test]
    fn test_firm_omits_empty_office_list() {
        let firm = FirmEntity {
            id: "https://api.test/id/firm/F1".to_string(),
            entity_type: FIRM_TYPE.to_string(),
            sra_id: "F1".to_string(),
            name: "Firm One".to_string(),
            regulatory_status: "Active".to_string(),
            has_office: vec![],
        };
        let json = serde_json::to_value(&firm).unwrap();
        assert!(json.get("hasOffice").is_none());
        assert_eq!(json["@type"], FIRM_TYPE);
    }

    #[test]
    fn test_office_serializes_jsonld_keys() {
        let json = serde_json::to_value(sample_office()).unwrap();
        assert_eq!(json["@id"], "https://api.test/id/office/O1");
        assert_eq!(json["firm"]["@id"], "https://api.test/id/firm/F1");
        assert_eq!(json["address"]["@type"], POSTAL_ADDRESS_TYPE);
    }

    #[test]
    fn test_graph_entity_untagged_round_trip() {
        let entity = GraphEntity::Office(sample_office());
        let json = serde_json::to_string(&entity).unwrap();
        // No serde enum wrapper on the wire.
        assert!(!json.contains("\"Office\":"));
        let back: GraphEntity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entity);
        assert_eq!(back.entity_type(), OFFICE_TYPE);
    }
}
