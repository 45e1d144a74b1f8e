//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: [`Rule`], [`RuleExt`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`RuleError`], [`InternalError`]
//! - **Input bridges**: [`AsValidatable`], [`Sequence`], [`Mapping`]
//! - **Field metadata**: [`Fields`], [`FieldInfo`], [`FieldNaming`]
//!
//! # Two kinds of failure
//!
//! A rule that dislikes the data returns `RuleError::Invalid` with a
//! non-empty error tree. A rule that cannot make sense of its input at all,
//! such as a string rule handed a JSON number, returns
//! `RuleError::Internal`. Combinators accumulate the first kind and stop on
//! the second.
//!
//! ```rust,ignore
//! use fieldwise_validator::prelude::*;
//!
//! let name = rules![required("cannot be blank"), min_length(2, "too short")];
//!
//! assert!(Rule::<str>::check(&name, "Al").is_ok());
//! assert!(Rule::<serde_json::Value>::check(&name, &json!(1)).unwrap_err().is_internal());
//! ```

pub mod error;
pub mod fields;
pub mod traits;
pub mod validatable;

pub use error::{
    ErrorNode, FieldError, IndexError, InternalError, KeyError, Param, RuleError, RuleResult,
    ValidationError, ValidationErrors,
};
pub use fields::{FieldInfo, FieldNaming, Fields};
pub use traits::{BoxedRule, Rule, RuleExt, from_fn};
pub use validatable::{AsValidatable, Mapping, Sequence};
