//! Context-carrying rules
//!
//! Some checks need more than the value itself, e.g. a lookup table of
//! known codes. A [`ContextRule`] receives the value and a context object
//! fixed when the struct rule is declared.

use crate::combinators::rules::accumulate;
use crate::foundation::{Rule, RuleResult};
use std::fmt;

/// A rule that also sees a context object.
pub trait ContextRule<U: ?Sized, C: ?Sized> {
    fn check(&self, value: &U, context: &C) -> RuleResult;
}

impl<U, C, F> ContextRule<U, C> for F
where
    U: ?Sized,
    C: ?Sized,
    F: Fn(&U, &C) -> RuleResult,
{
    #[inline]
    fn check(&self, value: &U, context: &C) -> RuleResult {
        self(value, context)
    }
}

/// Adapts a plain rule so it can sit in a context list.
struct IgnoreContext<R>(R);

impl<U, C, R> ContextRule<U, C> for IgnoreContext<R>
where
    U: ?Sized,
    C: ?Sized,
    R: Rule<U>,
{
    fn check(&self, value: &U, _context: &C) -> RuleResult {
        self.0.check(value)
    }
}

type BoxedContextRule<U, C> = Box<dyn ContextRule<U, C> + Send + Sync>;

/// An ordered list of context rules with the same semantics as
/// [`Rules`](crate::combinators::Rules).
pub struct ContextRules<U: ?Sized, C: ?Sized> {
    rules: Vec<BoxedContextRule<U, C>>,
}

impl<U: ?Sized, C: ?Sized> ContextRules<U, C> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a context rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with<R>(mut self, rule: R) -> Self
    where
        R: ContextRule<U, C> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends a plain rule that ignores the context.
    #[must_use = "builder methods must be chained or built"]
    pub fn plain<R>(mut self, rule: R) -> Self
    where
        R: Rule<U> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(IgnoreContext(rule)));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule against the value and context.
    pub fn check(&self, value: &U, context: &C) -> RuleResult {
        accumulate(self.rules.iter().map(|rule| rule.check(value, context)))
    }
}

impl<U: ?Sized, C: ?Sized> Default for ContextRules<U, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: ?Sized, C: ?Sized> fmt::Debug for ContextRules<U, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextRules")
            .field("len", &self.rules.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{InternalError, ValidationError};
    use std::collections::HashSet;

    fn known(code: &String, table: &HashSet<&'static str>) -> RuleResult {
        if table.contains(code.as_str()) {
            Ok(())
        } else {
            Err(ValidationError::new("unknown", "unknown code").into())
        }
    }

    fn not_blank(code: &String) -> RuleResult {
        if code.is_empty() {
            Err(ValidationError::new("required", "blank").into())
        } else {
            Ok(())
        }
    }

    #[test]
    fn test_context_rules() {
        let table: HashSet<&'static str> = ["US", "DE"].into_iter().collect();
        let rules = ContextRules::new().with(known).plain(not_blank);

        assert!(rules.check(&"US".to_owned(), &table).is_ok());

        let errors = rules.check(&String::new(), &table).unwrap_err();
        assert_eq!(errors.invalid().unwrap().len(), 2);
    }

    #[test]
    fn test_internal_stops() {
        let rules: ContextRules<String, ()> = ContextRules::new()
            .with(|_: &String, _: &()| -> RuleResult { Err(InternalError::custom("boom").into()) })
            .plain(not_blank);

        assert!(rules.check(&String::new(), &()).unwrap_err().is_internal());
    }
}
