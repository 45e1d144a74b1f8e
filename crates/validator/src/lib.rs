//! # fieldwise-validator
//!
//! Declarative validation for structs, slices and maps that reports every
//! violation at once, as a tree shaped like the data it came from.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldwise_validator::prelude::*;
//!
//! #[derive(Default)]
//! struct Address {
//!     country: String,
//!     zip_code: String,
//! }
//!
//! fields!(Address { country, zip_code });
//!
//! let rule = StructRule::<Address>::builder()
//!     .field(|a| &a.country, rules![required("required"), starts_uppercase("capitalize")])
//!     .field(|a| &a.zip_code, rules![required("required"), digits_only("digits only")])
//!     .build();
//!
//! let errors = rule.check(&Address::default()).unwrap_err();
//! assert_eq!(errors.to_string(), "country: required, capitalize, zip_code: required");
//! ```
//!
//! ## Concepts
//!
//! - A [`Rule`](foundation::Rule) checks a value and returns a
//!   [`RuleResult`](foundation::RuleResult). Closures are rules.
//! - [`Rules`](combinators::Rules) runs a list of rules and collects all
//!   their errors; an [`InternalError`](foundation::InternalError) stops
//!   everything immediately.
//! - [`StructRule`](combinators::StructRule) names failing fields from
//!   metadata generated by [`fields!`], optionally through naming tags.
//! - [`each`](combinators::each), [`unique`](validators::unique) and
//!   [`each_entry`](combinators::each_entry) attribute errors to indices
//!   and keys.
//! - [`Report`](render::Report) flattens an error tree into JSON.
//!
//! ## Built-in Validators
//!
//! - **String**: [`required`](validators::required), [`min_length`](validators::min_length),
//!   [`matches`](validators::matches), [`email`](validators::email), ...
//! - **Numeric**: [`min`](validators::min), [`between`](validators::between),
//!   [`range`](validators::range)
//! - **Collection**: [`min_size`](validators::min_size), [`unique`](validators::unique)
//! - **Nullable**: [`present`](validators::present), [`one_of`](validators::one_of)

// RuleError carries a whole error tree by value; rules return it on every
// failing path.
#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod render;
pub mod validators;
