//! Integration tests for sequence and map validation.

use fieldwise_validator::prelude::*;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;

fn indices(errors: &ValidationErrors) -> Vec<usize> {
    errors
        .iter()
        .map(|node| node.as_index().expect("index node").index())
        .collect()
}

#[test]
fn each_flags_only_invalid_elements() {
    let rule = each::<i64>(rules![min(0_i64, "negative")]);
    let values = [-1_i64, 2, -3, 4];

    let errors = rule.check(&values).unwrap_err().into_invalid().unwrap();
    assert_eq!(indices(&errors), [0, 2]);
    assert_eq!(errors.to_string(), "0: negative, 2: negative");
}

#[test]
fn each_accumulates_every_rule_per_element() {
    let rule = each::<String>(rules![
        required("blank"),
        min_length(3, "at least {min} characters"),
    ]);
    let names = vec![String::from("abc"), String::new()];

    let errors = rule.check(&names).unwrap_err().into_invalid().unwrap();
    assert_eq!(indices(&errors), [1]);
    assert_eq!(errors.nodes()[0].as_index().unwrap().errors().len(), 2);
}

#[test]
fn each_with_projects_elements() {
    struct Item {
        sku: String,
        quantity: u32,
    }

    let skus = each_with(|item: &Item| &item.sku, rules![matches(
        regex::Regex::new("^[A-Z]{3}-[0-9]+$").unwrap(),
        "bad sku"
    )]);
    let quantities = each_with(|item: &Item| &item.quantity, rules![min(1_u32, "empty")]);

    let items = vec![
        Item {
            sku: "ABC-1".into(),
            quantity: 0,
        },
        Item {
            sku: "abc".into(),
            quantity: 2,
        },
    ];

    assert_eq!(skus.check(&items).unwrap_err().to_string(), "1: bad sku");
    assert_eq!(quantities.check(&items).unwrap_err().to_string(), "0: empty");
}

#[test]
fn unique_flags_only_repeats() {
    let rule = unique::<&str>("duplicate");

    let errors = rule.check(&["x", "y", "x"]).unwrap_err().into_invalid().unwrap();
    assert_eq!(indices(&errors), [2]);

    assert!(rule.check(&["x", "y", "z"]).is_ok());
    assert!(rule.check(&Vec::<&str>::new()).is_ok());
}

#[test]
fn unique_by_projects_keys() {
    struct Member {
        email: String,
    }

    let rule = unique_by(|m: &Member| m.email.as_str(), "email already used");
    let members = vec![
        Member {
            email: "a@x.io".into(),
        },
        Member {
            email: "b@x.io".into(),
        },
        Member {
            email: "a@x.io".into(),
        },
    ];

    assert_eq!(
        rule.check(&members).unwrap_err().to_string(),
        "2: email already used"
    );
}

#[test]
fn nested_sequences_keep_both_indices() {
    let rule = each::<Vec<i64>>(rules![each::<i64>(rules![max(9_i64, "too big")])]);
    let matrix = vec![vec![1_i64, 2], vec![3, 40]];

    let errors = rule.check(&matrix).unwrap_err().into_invalid().unwrap();
    let outer = errors.nodes()[0].as_index().unwrap();
    let inner = outer.errors().nodes()[0].as_index().unwrap();

    assert_eq!((outer.index(), inner.index()), (1, 1));
    assert_eq!(
        Report::new(&errors).to_json().unwrap(),
        json!([{ "path": "[1][1]", "error": "too big" }])
    );
}

#[test]
fn json_arrays_are_sequences() {
    let rule = rules![
        max_size(3, "at most {max} items"),
        each::<serde_json::Value>(rules![required("blank")]),
    ];

    assert!(Rule::<serde_json::Value>::check(&rule, &json!(["a", "b"])).is_ok());

    let errors = rule.check(&json!(["a", "", "c", ""])).unwrap_err();
    assert_eq!(errors.to_string(), "at most 3 items, 1: blank, 3: blank");
}

#[test]
fn internal_failure_stops_the_walk() {
    let rule = each::<serde_json::Value>(rules![required("blank")]);

    // a number is not a string
    let err = rule.check(&json!(["", 7, ""])).unwrap_err();
    assert_eq!(
        err.internal(),
        Some(&InternalError::type_mismatch("string", "number"))
    );

    let err = rule.check(&json!({ "a": "b" })).unwrap_err();
    assert_eq!(
        err.internal(),
        Some(&InternalError::type_mismatch("array", "object"))
    );
}

// ============================================================================
// MAPS
// ============================================================================

#[test]
fn each_entry_attributes_errors_to_keys() {
    let rule = each_entry(rules![between(0_i64, 100, "not a percentage")]);

    let scores: BTreeMap<String, i64> = [("math", 120), ("art", 50), ("bio", -1)]
        .into_iter()
        .map(|(subject, score)| (subject.to_owned(), score))
        .collect();

    let errors = rule.check(&scores).unwrap_err().into_invalid().unwrap();
    let keys: Vec<_> = errors.iter().map(|node| node.as_key().unwrap().key()).collect();

    // BTreeMap iterates in key order
    assert_eq!(keys, ["bio", "math"]);
}

#[test]
fn each_entry_keeps_insertion_order_of_index_maps() {
    let rule = each_entry(rules![required("blank")]);

    let mut env: IndexMap<&str, String> = IndexMap::new();
    env.insert("PATH", String::new());
    env.insert("HOME", "/root".into());
    env.insert("LANG", String::new());

    assert_eq!(rule.check(&env).unwrap_err().to_string(), "PATH: blank, LANG: blank");
}

#[test]
fn each_entry_over_json_objects() {
    let rule = each_entry(rules![required("blank")]);

    let errors = rule
        .check(&json!({ "name": "", "city": "Oslo" }))
        .unwrap_err()
        .into_invalid()
        .unwrap();

    assert_eq!(
        Report::new(&errors).with_joiner(PointerJoiner).to_json().unwrap(),
        json!([{ "path": "/name", "error": "blank" }])
    );
}
