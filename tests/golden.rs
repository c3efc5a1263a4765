//! Golden tests for canonicalization and graph construction.
//!
//! These pin the deterministic contract: exact canonical bytes for fixed
//! documents, exact entity ordering for fixed inputs, and stable hashes
//! across repeated builds.

use register_graph::{
    build_graph, canonical_hash_hex, to_canonical_bytes, validate_records, Address,
    GraphEntity, NormalizedFirm, NormalizedOffice,
};
use serde_json::json;

const ID_BASE: &str = "https://api.test/id/";

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn firm(sra_id: &str, name: &str, status: &str) -> NormalizedFirm {
    NormalizedFirm {
        sra_id: sra_id.to_string(),
        name: name.to_string(),
        regulatory_status: status.to_string(),
        ..NormalizedFirm::default()
    }
}

fn office(office_id: &str, firm_sra_id: &str, head: bool) -> NormalizedOffice {
    NormalizedOffice {
        office_id: office_id.to_string(),
        firm_sra_id: firm_sra_id.to_string(),
        is_head_office: head,
        address: Address {
            street_address: "X".to_string(),
            address_locality: "Town".to_string(),
            postal_code: "123".to_string(),
            address_country: "UK".to_string(),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Canonicalization
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn canonical_bytes_golden() {
    let doc = json!({
        "name": "Firm One",
        "@id": "https://api.test/id/firm/F1",
        "hasOffice": [{"@id": "https://api.test/id/office/O1"}],
        "isHeadOffice": true
    });
    let bytes = to_canonical_bytes(&doc).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "{\"@id\":\"https://api.test/id/firm/F1\",\
         \"hasOffice\":[{\"@id\":\"https://api.test/id/office/O1\"}],\
         \"isHeadOffice\":true,\"name\":\"Firm One\"}"
    );
}

#[test]
fn hash_is_independent_of_key_order() {
    let h1 = canonical_hash_hex(&json!({"b": 1, "a": 2})).unwrap();
    let h2 = canonical_hash_hex(&json!({"a": 2, "b": 1})).unwrap();
    assert_eq!(h1, h2);
}

#[test]
fn canonical_hash_golden() {
    // canon({"a":2,"b":1}) == b"{\"a\":2,\"b\":1}"
    let expected = register_graph::sha256_hex(b"{\"a\":2,\"b\":1}");
    assert_eq!(canonical_hash_hex(&json!({"b": 1, "a": 2})).unwrap(), expected);
}

// ─────────────────────────────────────────────────────────────────────────────
// Graph shape
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn graph_shape_one_firm_one_office() {
    let doc = build_graph(
        ID_BASE,
        &[firm("F1", "Firm One", "Active")],
        &[office("O1", "F1", true)],
    );

    assert_eq!(doc.graph.len(), 2);
    let GraphEntity::Firm(f) = &doc.graph[0] else {
        panic!("first entity must be the firm");
    };
    let GraphEntity::Office(o) = &doc.graph[1] else {
        panic!("second entity must be the office");
    };

    assert_eq!(f.id, "https://api.test/id/firm/F1");
    assert_eq!(o.id, "https://api.test/id/office/O1");
    assert_eq!(f.has_office.len(), 1);
    assert_eq!(f.has_office[0].id, o.id);
    assert!(o.is_head_office);
    assert_eq!(o.firm.id, f.id);
}

#[test]
fn orphan_office_appears_once_unreferenced() {
    let doc = build_graph(
        ID_BASE,
        &[firm("F1", "Firm One", "Active")],
        &[office("OX", "NO_SUCH_FIRM", false)],
    );

    let orphan = "https://api.test/id/office/OX";
    assert_eq!(
        doc.graph.iter().filter(|e| e.iri() == orphan).count(),
        1
    );
    for entity in &doc.graph {
        if let GraphEntity::Firm(f) = entity {
            assert!(f.has_office.iter().all(|r| r.id != orphan));
        }
    }
}

#[test]
fn graph_document_hash_is_stable() {
    let firms = vec![firm("F1", "One", "Active"), firm("F2", "Two", "Revoked")];
    let offices = vec![office("O1", "F1", true), office("O2", "F2", false)];

    let h1 = canonical_hash_hex(&build_graph(ID_BASE, &firms, &offices)).unwrap();
    let h2 = canonical_hash_hex(&build_graph(ID_BASE, &firms, &offices)).unwrap();
    assert_eq!(h1, h2);
    assert_eq!(h1.len(), 64);
}

#[test]
fn validated_graph_end_to_end_determinism() {
    // Validation filters, then the graph builder orders; the combined
    // output must be reproducible and free of rejected records.
    let firms = vec![
        firm("F1", "One", "Active"),
        firm("", "Nameless", "Active"), // rejected
    ];
    let offices = vec![office("O1", "F1", true)];

    let r1 = validate_records(firms.clone(), offices.clone());
    let r2 = validate_records(firms, offices);

    let d1 = build_graph(ID_BASE, &r1.firms, &r1.offices);
    let d2 = build_graph(ID_BASE, &r2.firms, &r2.offices);

    assert_eq!(d1.graph.len(), 2);
    assert_eq!(r1.rejections.len(), 1);
    assert_eq!(
        serde_json::to_string(&d1).unwrap(),
        serde_json::to_string(&d2).unwrap()
    );
}
