//! properties.rs
//!
//! Property tests over generated documents:
//! - canonicalization is deterministic and independent of key order
//! - projecting `$..*` reproduces an object document
//! - revealed indices point at equal statements of the full set, including
//!   when selected sequence elements leave vacant slots before them

use disclosure_core::prelude::*;
use proptest::prelude::*;
use serde_json::{Map, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-zA-Z0-9 ~/é]{0,8}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-c~/]{1,3}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-e]{1,3}", arb_value(), 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

/// Rebuild every map with its entries inserted in reverse order.
fn reversed(v: &Value) -> Value {
    match v {
        Value::Object(m) => {
            let mut out = Map::new();
            for (k, child) in m.iter().rev() {
                out.insert(k.clone(), reversed(child));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(reversed).collect()),
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn canonicalization_is_deterministic(doc in arb_value()) {
        let a = canonicalize(&doc).unwrap();
        let b = canonicalize(&doc).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a, canonicalize(&reversed(&doc)).unwrap());
    }

    #[test]
    fn canonical_texts_are_sorted(doc in arb_value()) {
        let set = canonicalize(&doc).unwrap();
        let texts = set.texts();
        for w in texts.windows(2) {
            prop_assert!(w[0].as_bytes() <= w[1].as_bytes());
        }
    }

    // `..` selects descendants only, so a scalar or empty root projects to
    // `{}`; object roots are the documents this identity holds for.
    #[test]
    fn full_projection_is_identity(doc in arb_object()) {
        let projected = project(&doc, &["$..*"]).unwrap();
        prop_assert_eq!(&projected, &doc);
    }

    #[test]
    fn revealed_indices_are_valid(
        doc in arb_object(),
        picks in prop::collection::vec(
            prop::sample::select(vec![
                "$",
                "$.*",
                "$..a",
                "$..b[0]",
                "$.c[*]",
                "$..*",
                "$.c[1]",
                "$..b[-1]",
                "$.d[?(@.a)]",
                "$.e[?(@ == true)]",
            ]),
            0..4,
        ),
    ) {
        let d = disclose(&doc, &picks, MatchStrategy::FirstMatch).unwrap();
        let full = canonicalize(&doc).unwrap();
        let part = canonicalize_projection(&d.projected, &CanonicalizeOptions::default()).unwrap();

        prop_assert_eq!(d.indices.len(), part.len());
        for (stmt, &i) in part.iter().zip(&d.indices) {
            prop_assert!(i < full.len());
            prop_assert_eq!(full.get(i).map(|s| s.text()), Some(stmt.text()));
        }
    }
}
