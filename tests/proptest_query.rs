//! Property-based tests using proptest
//!
//! These tests verify the query encoder's ordering guarantees and the
//! request signature's stability using randomized inputs.

use cloudstack::{Credentials, QueryParams};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Generate parameter names as the API spells them
fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,15}"
}

/// Generate parameter values, including characters that need escaping
fn arb_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._/:=&%-]{0,24}"
}

fn arb_params() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((arb_key(), arb_value()), 0..20)
}

proptest! {
    /// Encoding depends on the final contents, not on insertion order
    #[test]
    fn test_encode_ignores_insertion_order(params in arb_params()) {
        let mut forward = QueryParams::new();
        for (k, v) in &params {
            forward.set(k.as_str(), v.as_str());
        }

        // Last write wins, so replay in reverse only the surviving values
        let surviving: BTreeMap<&str, &str> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let mut backward = QueryParams::new();
        for (k, v) in surviving.iter().rev() {
            backward.set(*k, *v);
        }

        prop_assert_eq!(forward.encode(), backward.encode());
    }

    /// Keys always come out sorted
    #[test]
    fn test_keys_are_sorted(params in arb_params()) {
        let mut query = QueryParams::new();
        for (k, v) in &params {
            query.set(k.as_str(), v.as_str());
        }

        let keys: Vec<&str> = query.iter().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        prop_assert_eq!(keys, sorted);
    }

    /// Map entries are indexed in sorted key order
    #[test]
    fn test_map_entries_follow_key_order(
        entries in prop::collection::hash_map(arb_key(), arb_value(), 0..10)
    ) {
        let mut query = QueryParams::new();
        query.set_map("details", &entries);

        let mut keys: Vec<&String> = entries.keys().collect();
        keys.sort();

        prop_assert_eq!(query.len(), entries.len() * 2);
        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(query.get(&format!("details[{}].key", i)), Some(key.as_str()));
            prop_assert_eq!(
                query.get(&format!("details[{}].value", i)),
                entries.get(*key).map(String::as_str)
            );
        }
    }

    /// Rebuilding the same map yields the same query
    #[test]
    fn test_map_encoding_is_deterministic(
        entries in prop::collection::vec((arb_key(), arb_value()), 0..10)
    ) {
        let a: HashMap<String, String> = entries.into_iter().collect();
        let mut pairs: Vec<(String, String)> =
            a.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        pairs.reverse();
        let b: HashMap<String, String> = pairs.into_iter().collect();

        let mut qa = QueryParams::new();
        qa.set_map("details", &a);
        let mut qb = QueryParams::new();
        qb.set_map("details", &b);

        prop_assert_eq!(qa.encode(), qb.encode());
    }

    /// Comma-free list items survive the comma join
    #[test]
    fn test_list_join_splits_back(items in prop::collection::vec("[a-z0-9-]{1,12}", 1..10)) {
        let mut query = QueryParams::new();
        query.set_list("ids", &items);

        let joined = query.get("ids").unwrap_or_default();
        let split: Vec<String> = joined.split(',').map(String::from).collect();
        prop_assert_eq!(split, items);
    }

    /// Signatures ignore the case of the canonical query
    #[test]
    fn test_signature_is_case_insensitive(value in "[a-z0-9]{1,20}") {
        let creds = Credentials::new("key", "secret");

        let mut lower = QueryParams::new();
        lower.set("name", value.as_str());
        let mut upper = QueryParams::new();
        upper.set("name", value.to_uppercase());

        prop_assert_eq!(creds.sign(&lower).unwrap(), creds.sign(&upper).unwrap());
    }
}
