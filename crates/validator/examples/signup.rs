//! Validating a sign-up form and printing the JSON report.
//!
//! Run with `RUST_LOG=debug` to see the struct engine's tracing output.

use fieldwise_validator::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Address {
    country: String,
    zip_code: String,
}

fields!(Address {
    country(json = "country"),
    zip_code(json = "zipCode"),
});

#[derive(Debug, Default)]
struct Signup {
    username: String,
    email: String,
    age: u32,
    address: Address,
    interests: Vec<String>,
}

fields!(Signup {
    username(json = "username"),
    email(json = "email"),
    age(json = "age"),
    address(json = "address"),
    interests(json = "interests"),
});

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let address = StructRule::<Address>::builder()
        .naming(FieldNaming::tag("json"))
        .field(
            |a| &a.country,
            rules![required("required"), starts_uppercase("must be capitalized")],
        )
        .field(
            |a| &a.zip_code,
            rules![required("required"), digits_only("digits only")],
        )
        .build();

    let signup = StructRule::<Signup>::builder()
        .naming(FieldNaming::tag("json"))
        .field(
            |s| &s.username,
            rules![length_range(3, 20, "must be {min} to {max} characters")],
        )
        .field(|s| &s.email, rules![email("must be an email address")])
        .field(|s| &s.age, rules![between(13_u32, 130, "must be at least {low}")])
        .field(|s| &s.address, rules![address])
        .field(
            |s| &s.interests,
            rules![
                max_size(5, "at most {max} interests"),
                unique::<String>("listed twice"),
            ],
        )
        .build();

    let form = Signup {
        username: "al".into(),
        email: "al@example".into(),
        age: 9,
        address: Address {
            country: "norway".into(),
            zip_code: String::new(),
        },
        interests: vec!["chess".into(), "go".into(), "chess".into()],
    };

    match signup.check(&form) {
        Ok(()) => println!("form is valid"),
        Err(RuleError::Invalid(errors)) => {
            let report = Report::new(&errors).with_joiner(PointerJoiner);
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(error) => eprintln!("cannot render report: {error}"),
            }
        }
        Err(RuleError::Internal(error)) => eprintln!("validator misconfigured: {error}"),
    }
}
