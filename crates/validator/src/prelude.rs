//! Prelude module for convenient imports.
//!
//! Provides a single `use fieldwise_validator::prelude::*;` import that brings
//! in the rule traits, the error tree, the struct/slice/map engines, every
//! built-in validator and the JSON renderer.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldwise_validator::prelude::*;
//!
//! let username: Rules<str> = rules![required("required"), max_length(20, "too long")];
//! let scores = each(rules![between(0_i64, 100, "out of range")]);
//! let tags: Rules<Vec<String>> = rules![max_size(5, "too many"), unique::<String>("duplicate")];
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, metadata
// ============================================================================

pub use crate::foundation::{
    AsValidatable, BoxedRule, ErrorNode, FieldError, FieldInfo, FieldNaming, Fields, IndexError,
    InternalError, KeyError, Mapping, Rule, RuleError, RuleExt, RuleResult, Sequence,
    ValidationError, ValidationErrors, from_fn,
};

// ============================================================================
// VALIDATORS: All built-in validators
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;

// ============================================================================
// COMBINATORS: Rule lists and engines
// ============================================================================

pub use crate::combinators::{
    ContextRule, ContextRules, Each, EachEntry, Rules, StructRule, StructRuleBuilder, each,
    each_entry, each_with,
};

// ============================================================================
// RENDERING
// ============================================================================

pub use crate::render::{Detailed, DotJoiner, Formatter, Joiner, PointerJoiner, Report};

// ============================================================================
// MACROS
// ============================================================================

pub use crate::{fields, rules};
