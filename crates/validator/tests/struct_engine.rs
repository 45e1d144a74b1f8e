//! Integration tests for field-by-field struct validation.

use fieldwise_validator::prelude::*;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// FIXTURES
// ============================================================================

#[derive(Debug, Default, Clone)]
struct Address {
    country: String,
    zip_code: String,
}

fields!(Address {
    country(json = "country"),
    zip_code(json = "zipCode"),
});

#[derive(Debug, Default, Clone)]
struct User {
    name: String,
    age: u32,
    address: Address,
    tags: Vec<String>,
}

fields!(User {
    name(json = "userName"),
    age(json = "age"),
    address(json = "address"),
    tags,
});

fn address_rule() -> StructRule<Address> {
    StructRule::<Address>::builder()
        .field(
            |a| &a.country,
            rules![
                required("country is required"),
                starts_uppercase("country must be capitalized"),
            ],
        )
        .field(
            |a| &a.zip_code,
            rules![
                required("zip code is required"),
                digits_only("zip code must be digits"),
            ],
        )
        .build()
}

fn user_rule(naming: FieldNaming) -> StructRule<User> {
    StructRule::<User>::builder()
        .naming(naming)
        .field(|u| &u.name, rules![required("name is required")])
        .field(|u| &u.age, rules![between(18_u32, 130, "must be an adult")])
        .field(|u| &u.address, rules![address_rule()])
        .field(
            |u| &u.tags,
            rules![
                unique::<String>("duplicate tag"),
                each(rules![required("blank tag")]),
            ],
        )
        .build()
}

fn valid_user() -> User {
    User {
        name: "Ada".into(),
        age: 36,
        address: Address {
            country: "Uk".into(),
            zip_code: "12345".into(),
        },
        tags: vec!["math".into(), "engines".into()],
    }
}

fn field_names(errors: &ValidationErrors) -> Vec<&str> {
    errors
        .iter()
        .map(|node| node.as_field().expect("field node").field())
        .collect()
}

// ============================================================================
// ADDRESS
// ============================================================================

#[test]
fn default_address_reports_every_failure() {
    let errors = address_rule()
        .check(&Address::default())
        .unwrap_err()
        .into_invalid()
        .unwrap();

    assert_eq!(field_names(&errors), ["country", "zip_code"]);

    let country = errors.nodes()[0].as_field().unwrap();
    assert_eq!(country.errors().len(), 2);

    // an empty zip code passes `digits_only`
    let zip_code = errors.nodes()[1].as_field().unwrap();
    assert_eq!(zip_code.errors().len(), 1);

    assert_eq!(
        errors.to_string(),
        "country: country is required, country must be capitalized, \
         zip_code: zip code is required"
    );
}

#[test]
fn valid_address_passes() {
    let address = Address {
        country: "Norway".into(),
        zip_code: "0150".into(),
    };
    assert!(address_rule().check(&address).is_ok());
}

// ============================================================================
// NESTING AND NAMING
// ============================================================================

#[test]
fn valid_user_passes() {
    assert!(user_rule(FieldNaming::Declared).check(&valid_user()).is_ok());
}

#[test]
fn nested_struct_errors_are_spliced_under_the_outer_field() {
    let mut user = valid_user();
    user.address = Address::default();

    let errors = user_rule(FieldNaming::Declared)
        .check(&user)
        .unwrap_err()
        .into_invalid()
        .unwrap();

    assert_eq!(field_names(&errors), ["address"]);
    let address = errors.nodes()[0].as_field().unwrap();
    assert_eq!(field_names(address.errors()), ["country", "zip_code"]);
}

#[test]
fn tag_naming_falls_back_to_declared_name() {
    let user = User {
        tags: vec!["a".into(), "a".into()],
        ..User::default()
    };

    let errors = user_rule(FieldNaming::tag("json"))
        .check(&user)
        .unwrap_err()
        .into_invalid()
        .unwrap();

    assert_eq!(field_names(&errors), ["userName", "age", "address", "tags"]);

    let address = errors.nodes()[2].as_field().unwrap();
    // the nested rule keeps its own naming policy
    assert_eq!(field_names(address.errors()), ["country", "zip_code"]);
}

#[test]
fn slice_field_reports_indices() {
    let mut user = valid_user();
    user.tags = vec!["x".into(), String::new(), "x".into(), String::new()];

    let errors = user_rule(FieldNaming::Declared)
        .check(&user)
        .unwrap_err()
        .into_invalid()
        .unwrap();

    assert_eq!(
        errors.to_string(),
        "tags: 2: duplicate tag, 3: duplicate tag, 1: blank tag, 3: blank tag"
    );
}

#[test]
fn validation_is_idempotent() {
    let rule = user_rule(FieldNaming::tag("json"));
    let user = User::default();

    assert_eq!(rule.check(&user), rule.check(&user));
}

// ============================================================================
// WHOLE-STRUCT AND CONTEXT RULES
// ============================================================================

#[derive(Debug)]
struct Window {
    start: u32,
    end: u32,
}

fields!(Window { start, end });

fn ordered_window() -> Rules<Window> {
    rules![from_fn::<Window, _>(|w| {
        if w.start <= w.end {
            Ok(())
        } else {
            Err(ValidationError::new("order", "start after end").into())
        }
    })]
}

#[test]
fn whole_struct_rule_uses_empty_name() {
    let rule = StructRule::<Window>::builder()
        .field(|w| &w.start, rules![max(1000_u32, "too late")])
        .whole(ordered_window())
        .build();

    assert!(rule.check(&Window { start: 1, end: 2 }).is_ok());

    let errors = rule
        .check(&Window { start: 2000, end: 2 })
        .unwrap_err()
        .into_invalid()
        .unwrap();
    assert_eq!(field_names(&errors), ["start", ""]);
    assert_eq!(errors.to_string(), "start: too late, start after end");
}

#[test]
fn accessor_returning_the_struct_uses_empty_name() {
    let rule = StructRule::<Window>::builder()
        .field(|w| w, ordered_window())
        .field(|w| &w.end, rules![max(1000_u32, "too late")])
        .build();

    assert!(rule.check(&Window { start: 1, end: 2 }).is_ok());

    let errors = rule
        .check(&Window { start: 3, end: 2000 })
        .unwrap_err()
        .into_invalid()
        .unwrap();
    assert_eq!(field_names(&errors), ["end"]);

    let errors = rule
        .check(&Window { start: 9, end: 2 })
        .unwrap_err()
        .into_invalid()
        .unwrap();
    assert_eq!(field_names(&errors), [""]);
    assert_eq!(errors.to_string(), "start after end");
}

#[derive(Debug)]
struct Username {
    inner: String,
}

fields!(Username { inner });

#[test]
fn newtype_struct_and_its_field_are_named_apart() {
    let rule = StructRule::<Username>::builder()
        .field(|u| &u.inner, rules![required("required")])
        .field(
            |u| u,
            rules![from_fn::<Username, _>(|u| {
                if u.inner.starts_with('_') {
                    Err(ValidationError::new("reserved", "reserved name").into())
                } else {
                    Ok(())
                }
            })],
        )
        .build();

    let errors = rule
        .check(&Username { inner: String::new() })
        .unwrap_err()
        .into_invalid()
        .unwrap();
    assert_eq!(field_names(&errors), ["inner"]);

    let errors = rule
        .check(&Username { inner: "_root".into() })
        .unwrap_err()
        .into_invalid()
        .unwrap();
    assert_eq!(field_names(&errors), [""]);
    assert_eq!(errors.to_string(), "reserved name");
}

#[test]
fn context_rule_sees_its_context() {
    let known: HashSet<&'static str> = ["Norway", "Uk"].into_iter().collect();

    let rule = StructRule::<Address>::builder()
        .field_with_context(
            |a| &a.country,
            known,
            ContextRules::new()
                .plain(required("country is required"))
                .with(
                    |country: &String, known: &HashSet<&'static str>| -> RuleResult {
                        if known.contains(country.as_str()) {
                            Ok(())
                        } else {
                            Err(ValidationError::new("unknown", "unknown country")
                                .with_param("actual", country.clone())
                                .into())
                        }
                    },
                ),
        )
        .build();

    let valid = Address {
        country: "Norway".into(),
        zip_code: String::new(),
    };
    assert!(rule.check(&valid).is_ok());

    let errors = rule.check(&Address::default()).unwrap_err();
    assert_eq!(
        errors.to_string(),
        "country: country is required, unknown country"
    );
}

// ============================================================================
// CONTRACT VIOLATIONS
// ============================================================================

static OUTSIDE: String = String::new();

#[test]
fn foreign_reference_is_internal() {
    let rule = StructRule::<Address>::builder()
        .field(|a| &a.country, rules![required("required")])
        .field(|_| &OUTSIDE, rules![required("required")])
        .build();

    let err = rule.check(&Address::default()).unwrap_err();
    assert!(err.is_internal());
    assert!(matches!(
        err.internal(),
        Some(InternalError::ForeignReference { .. })
    ));
}

#[test]
fn unresolved_accessor_fails_before_its_rules_run() {
    static CALLS: AtomicUsize = AtomicUsize::new(0);

    let rule = StructRule::<Address>::builder()
        .field(
            |_| &OUTSIDE,
            rules![from_fn::<String, _>(|_| {
                CALLS.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })],
        )
        .build();

    let err = rule.check(&Address::default()).unwrap_err();
    assert!(matches!(
        err.internal(),
        Some(InternalError::ForeignReference { .. })
    ));
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);
}

#[test]
fn reference_into_nested_struct_is_unknown_field() {
    let rule = StructRule::<User>::builder()
        .field(|u| &u.address.zip_code, rules![required("required")])
        .build();

    let err = rule.check(&User::default()).unwrap_err();
    assert!(matches!(
        err.internal(),
        Some(InternalError::UnknownField { .. })
    ));
}

#[test]
fn check_dyn_rejects_other_types() {
    let rule = address_rule();

    assert!(rule.check_dyn(&Address::default()).unwrap_err().is_invalid());
    assert!(matches!(
        rule.check_dyn(&valid_user()).unwrap_err().internal(),
        Some(InternalError::NotAStruct { .. })
    ));
}

#[test]
fn struct_rule_is_shareable_across_threads() {
    let rule = std::sync::Arc::new(user_rule(FieldNaming::Declared));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let rule = std::sync::Arc::clone(&rule);
            std::thread::spawn(move || rule.check(&User::default()).is_err())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
