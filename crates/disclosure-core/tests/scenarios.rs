//! scenarios.rs
//!
//! End-to-end flows through the public API:
//! - projection and index mapping of a person record
//! - sign / verify with the reference engine
//! - proof creation and verification with a nonce

use disclosure_core::prelude::*;
use ed25519_dalek::SigningKey;
use serde_json::{json, Value};

fn person() -> Value {
    json!({
        "firstName": "Jane",
        "phoneNumbers": ["555-0100", "555-0101"],
        "address": {"state": "CA", "postalCode": "394221"}
    })
}

const PATHS: [&str; 3] = [
    "$.firstName",
    "$.phoneNumbers[*]",
    "$[?(@.state === 'CA')].postalCode",
];

fn signer() -> SigningKey {
    SigningKey::from_bytes(&[42u8; 32])
}

#[test]
fn projection_and_indices() -> anyhow::Result<()> {
    let doc = person();
    let projected = project(&doc, &PATHS)?;
    assert_eq!(
        projected,
        json!({
            "firstName": "Jane",
            "phoneNumbers": ["555-0100", "555-0101"],
            "address": {"postalCode": "394221"}
        })
    );

    let indices = map_indices(&doc, &projected)?;
    assert_eq!(indices, vec![0, 2, 3, 4]);

    let full = canonicalize(&doc)?;
    let part = canonicalize_projection(&projected, &CanonicalizeOptions::default())?;
    for (stmt, &i) in part.iter().zip(&indices) {
        assert_eq!(full.get(i).map(|s| s.text()), Some(stmt.text()));
    }
    Ok(())
}

#[test]
fn disclose_matches_separate_calls() -> anyhow::Result<()> {
    let doc = person();
    let d = disclose(&doc, &PATHS, MatchStrategy::FirstMatch)?;
    assert_eq!(d.projected, project(&doc, &PATHS)?);
    assert_eq!(d.indices, map_indices(&doc, &d.projected)?);
    Ok(())
}

#[test]
fn sign_verify_round_trip() -> anyhow::Result<()> {
    let sd = SelectiveDisclosure::new(Ed25519MessageEngine::new());
    let sk = signer();
    let pk = sk.verifying_key();
    let doc = person();

    let sig = sd.sign(&doc, &sk)?;
    assert!(sd.verify(&doc, &pk, &sig)?);

    let mut mutated = doc.clone();
    mutated["address"]["postalCode"] = json!("394222");
    assert!(!sd.verify(&mutated, &pk, &sig)?);

    let mut reordered = serde_json::Map::new();
    reordered.insert("address".into(), doc["address"].clone());
    reordered.insert("phoneNumbers".into(), doc["phoneNumbers"].clone());
    reordered.insert("firstName".into(), doc["firstName"].clone());
    assert!(sd.verify(&Value::Object(reordered), &pk, &sig)?);
    Ok(())
}

#[test]
fn proof_round_trip_with_nonce() -> anyhow::Result<()> {
    let sd = SelectiveDisclosure::new(Ed25519MessageEngine::new());
    let sk = signer();
    let pk = sk.verifying_key();
    let doc = person();
    let sig = sd.sign(&doc, &sk)?;

    let nonce = Nonce::from("123");
    let res = sd.create_proof(&doc, &pk, &sig, &nonce, &PATHS)?;
    assert_eq!(res.revealed_indices, vec![0, 2, 3, 4]);
    assert!(sd.verify_proof(&res.projected_document, &pk, &nonce, &res.proof)?);
    assert!(!sd.verify_proof(&res.projected_document, &pk, &Nonce::from("456"), &res.proof)?);

    let byte_nonce = Nonce::from_value(&json!([49, 50, 51]))?;
    assert!(sd.verify_proof(&res.projected_document, &pk, &byte_nonce, &res.proof)?);

    let mut forged = res.projected_document.clone();
    forged["firstName"] = json!("John");
    assert!(!sd.verify_proof(&forged, &pk, &nonce, &res.proof)?);
    Ok(())
}

#[test]
fn proof_over_filtered_sequence_element() -> anyhow::Result<()> {
    let sd = SelectiveDisclosure::new(Ed25519MessageEngine::new());
    let sk = signer();
    let pk = sk.verifying_key();
    let doc = json!({
        "name": "Jane",
        "phoneNumbers": [
            {"type": "home", "number": "555-0100"},
            {"type": "work", "number": "555-0101"}
        ]
    });
    let sig = sd.sign(&doc, &sk)?;
    let nonce = Nonce::from("123");

    let work = ["$.phoneNumbers[?(@.type == 'work')]"];
    let res = sd.create_proof(&doc, &pk, &sig, &nonce, &work)?;
    assert_eq!(
        res.projected_document,
        json!({"phoneNumbers": [null, {"type": "work", "number": "555-0101"}]})
    );
    assert_eq!(res.revealed_indices, vec![3, 4]);
    assert!(sd.verify_proof(&res.projected_document, &pk, &nonce, &res.proof)?);

    let mut filled = res.projected_document.clone();
    filled["phoneNumbers"][0] = json!({"type": "home", "number": "555-0100"});
    assert!(!sd.verify_proof(&filled, &pk, &nonce, &res.proof)?);

    let res = sd.create_proof(&doc, &pk, &sig, &nonce, &["$.phoneNumbers[1].number"])?;
    assert_eq!(res.revealed_indices, vec![3]);
    assert!(sd.verify_proof(&res.projected_document, &pk, &nonce, &res.proof)?);
    Ok(())
}

#[test]
fn empty_selection_reveals_nothing() -> anyhow::Result<()> {
    let sd = SelectiveDisclosure::new(Ed25519MessageEngine::new());
    let sk = signer();
    let doc = person();
    let sig = sd.sign(&doc, &sk)?;

    let nonce = Nonce::from("n");
    let res = sd.create_proof(&doc, &sk.verifying_key(), &sig, &nonce, &["$.nickname"])?;
    assert_eq!(res.projected_document, json!({}));
    assert!(res.revealed_indices.is_empty());
    assert!(sd.verify_proof(&json!({}), &sk.verifying_key(), &nonce, &res.proof)?);
    Ok(())
}

#[test]
fn consume_once_spreads_duplicate_statements() -> anyhow::Result<()> {
    let full = CanonicalSet::from_sorted_texts(vec![
        r#"{"/a":1}"#.to_string(),
        r#"{"/a":1}"#.to_string(),
    ])?;
    let projected = full.clone();
    let first = disclosure_core::mapping::map_sets(&full, &projected, MatchStrategy::FirstMatch)?;
    let once = disclosure_core::mapping::map_sets(&full, &projected, MatchStrategy::ConsumeOnce)?;
    assert_eq!(first, vec![0, 0]);
    assert_eq!(once, vec![0, 1]);
    Ok(())
}
