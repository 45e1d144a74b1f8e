//! Combinators for composing rules
//!
//! - [`Rules`] AND-composes rules with full error accumulation
//! - [`ContextRules`] does the same for rules that take a context object
//! - [`StructRule`] validates a record field by field
//! - [`Each`] validates every element of a sequence
//! - [`EachEntry`] validates every value of a map

pub mod context;
pub mod each;
pub mod keyed;
pub mod rules;
pub mod structure;

pub use context::{ContextRule, ContextRules};
pub use each::{Each, each, each_with};
pub use keyed::{EachEntry, each_entry};
pub use rules::Rules;
pub use structure::{StructRule, StructRuleBuilder};
