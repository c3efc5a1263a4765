//! Deterministic JSON-LD graph construction.
//!
//! Converts validated firm/office records into one [`GraphDocument`] whose
//! entity order is part of the contract: for each firm in input order, the
//! firm entity followed immediately by its office entities in their input
//! order, then any orphan offices. Order never depends on hash-based
//! iteration; every index used here preserves insertion order.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::iri::{firm_iri, office_iri};
use crate::types::{
    FirmEntity, GraphDocument, GraphEntity, IriRef, NormalizedFirm, NormalizedOffice,
    OfficeEntity, PostalAddress,
};
use crate::types::entity::{FIRM_TYPE, OFFICE_TYPE};

/// Fixed vocabulary mapping emitted as the graph document's `@context`.
///
/// Short names map to terms under the register vocabulary; the default
/// vocabulary is schema.org.
pub fn vocabulary_context() -> BTreeMap<String, String> {
    [
        ("@vocab", "https://schema.org/"),
        ("vt", "https://veritrustgroup.org/def/tier0/"),
        ("RegulatedFirm", "vt:RegulatedFirm"),
        ("RegulatedOffice", "vt:RegulatedOffice"),
        ("sraId", "vt:sraId"),
        ("officeId", "vt:officeId"),
        ("regulatoryStatus", "vt:regulatoryStatus"),
        ("isHeadOffice", "vt:isHeadOffice"),
        ("hasOffice", "vt:hasOffice"),
        ("firm", "vt:firm"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Build the entity graph document from validated records.
///
/// `id_base` is the configured identifier base URI; the same input and
/// base always produce identical entity IRIs and ordering. Offices whose
/// `firm_sra_id` matches no firm in the batch are emitted as orphans after
/// all firms, referenced by nobody.
pub fn build_graph(
    id_base: &str,
    firms: &[NormalizedFirm],
    offices: &[NormalizedOffice],
) -> GraphDocument {
    // Insertion-order index: offices grouped per firm, orphans kept aside,
    // both in input order.
    let mut by_firm: BTreeMap<&str, Vec<&NormalizedOffice>> = BTreeMap::new();
    for firm in firms {
        by_firm.entry(&firm.sra_id).or_default();
    }
    let mut orphans: Vec<&NormalizedOffice> = Vec::new();
    for office in offices {
        match by_firm.get_mut(office.firm_sra_id.as_str()) {
            Some(bucket) => bucket.push(office),
            None => orphans.push(office),
        }
    }

    let mut graph: Vec<GraphEntity> =
        Vec::with_capacity(firms.len() + offices.len());

    for firm in firms {
        let owned = by_firm
            .get(firm.sra_id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let office_entities: Vec<OfficeEntity> = owned
            .iter()
            .map(|office| build_office_entity(id_base, office))
            .collect();

        graph.push(GraphEntity::Firm(build_firm_entity(
            id_base,
            firm,
            &office_entities,
        )));
        graph.extend(office_entities.into_iter().map(GraphEntity::Office));
    }

    for office in &orphans {
        warn!(
            office_id = %office.office_id,
            firm_sra_id = %office.firm_sra_id,
            "emitting orphan office: owning firm not in batch"
        );
        graph.push(GraphEntity::Office(build_office_entity(id_base, office)));
    }

    debug!(entities = graph.len(), orphans = orphans.len(), "graph built");

    GraphDocument {
        context: vocabulary_context(),
        graph,
    }
}

fn build_firm_entity(
    id_base: &str,
    firm: &NormalizedFirm,
    offices: &[OfficeEntity],
) -> FirmEntity {
    FirmEntity {
        id: firm_iri(id_base, &firm.sra_id),
        entity_type: FIRM_TYPE.to_string(),
        sra_id: firm.sra_id.clone(),
        name: firm.name.clone(),
        regulatory_status: firm.regulatory_status.clone(),
        has_office: offices.iter().map(|o| IriRef::new(o.id.clone())).collect(),
    }
}

fn build_office_entity(id_base: &str, office: &NormalizedOffice) -> OfficeEntity {
    OfficeEntity {
        id: office_iri(id_base, &office.office_id),
        entity_type: OFFICE_TYPE.to_string(),
        office_id: office.office_id.clone(),
        firm_sra_id: office.firm_sra_id.clone(),
        firm: IriRef::new(firm_iri(id_base, &office.firm_sra_id)),
        is_head_office: office.is_head_office,
        address: PostalAddress::from(&office.address),
    }
}
