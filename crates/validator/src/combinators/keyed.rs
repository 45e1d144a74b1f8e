//! EACH_ENTRY combinator - validates every value of a map

use crate::combinators::rules::Rules;
use crate::foundation::{KeyError, Mapping, Rule, RuleError, RuleResult, ValidationErrors};

/// Validates every value of a [`Mapping`], attributing failures to keys.
///
/// Entries are visited in the map's own order, so the error order is
/// deterministic for `BTreeMap` (sorted) and `IndexMap` (insertion).
#[derive(Debug)]
pub struct EachEntry<V> {
    rules: Rules<V>,
}

/// Applies `rules` to every value of a map.
pub fn each_entry<V>(rules: Rules<V>) -> EachEntry<V> {
    EachEntry { rules }
}

impl<M, V> Rule<M> for EachEntry<V>
where
    M: Mapping<Value = V> + ?Sized,
{
    fn check(&self, input: &M) -> RuleResult {
        let mut errors = ValidationErrors::new();

        for (key, value) in input.entries()? {
            match self.rules.check(value) {
                Ok(()) => {}
                Err(RuleError::Invalid(found)) => errors.push(KeyError::new(key.to_string(), found)),
                Err(internal @ RuleError::Internal(_)) => return Err(internal),
            }
        }

        errors.into_result()
    }
}
