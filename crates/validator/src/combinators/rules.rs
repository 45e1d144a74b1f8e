//! RULES combinator - AND-composes a list of rules
//!
//! Every rule sees the same input. Validation errors from all of them are
//! spliced into one flat collection; the first internal failure stops the
//! list and is returned unchanged.

use crate::foundation::{BoxedRule, Rule, RuleError, RuleResult, ValidationErrors};
use std::fmt;

// ============================================================================
// ACCUMULATION
// ============================================================================

/// Folds rule outcomes into one result.
///
/// The iterator is pulled lazily, so rules after an internal failure are
/// never run.
pub(crate) fn accumulate(outcomes: impl Iterator<Item = RuleResult>) -> RuleResult {
    let mut errors = ValidationErrors::new();

    for outcome in outcomes {
        match outcome {
            Ok(()) => {}
            Err(RuleError::Invalid(found)) => errors.extend(found),
            Err(internal @ RuleError::Internal(_)) => return Err(internal),
        }
    }

    errors.into_result()
}

// ============================================================================
// RULES COMBINATOR
// ============================================================================

/// An ordered list of rules applied with AND logic.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldwise_validator::prelude::*;
///
/// let username: Rules<str> = Rules::new()
///     .with(required("cannot be blank"))
///     .with(max_length(20, "at most {max} characters"));
///
/// assert!(username.check("alice").is_ok());
/// ```
pub struct Rules<T: ?Sized> {
    rules: Vec<BoxedRule<T>>,
}

impl<T: ?Sized> Rules<T> {
    /// Creates an empty list. An empty list accepts everything.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with<R>(mut self, rule: R) -> Self
    where
        R: Rule<T> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Appends an already boxed rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_boxed(mut self, rule: BoxedRule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: ?Sized> Default for Rules<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Rules<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("len", &self.rules.len())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> Rule<T> for Rules<T> {
    fn check(&self, input: &T) -> RuleResult {
        accumulate(self.rules.iter().map(|rule| rule.check(input)))
    }
}

impl<T: ?Sized> FromIterator<BoxedRule<T>> for Rules<T> {
    fn from_iter<I: IntoIterator<Item = BoxedRule<T>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{InternalError, RuleExt, ValidationError, from_fn};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fail(message: &'static str) -> impl Fn(&i32) -> RuleResult + Send + Sync + 'static {
        move |_| Err(ValidationError::custom(message).into())
    }

    fn pass() -> impl Fn(&i32) -> RuleResult + Send + Sync + 'static {
        |_| Ok(())
    }

    #[test]
    fn test_empty_accepts() {
        assert!(Rules::<i32>::new().check(&1).is_ok());
    }

    #[test]
    fn test_all_pass() {
        let rules = Rules::<i32>::new().with(pass()).with(pass());
        assert!(rules.check(&1).is_ok());
    }

    #[test]
    fn test_accumulates_in_order() {
        let rules = Rules::<i32>::new().with(fail("1")).with(pass()).with(fail("2"));
        let errors = rules.check(&1).unwrap_err().into_invalid().unwrap();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "1, 2");
    }

    #[test]
    fn test_internal_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let rules = Rules::<i32>::new()
            .with(fail("1"))
            .with(from_fn::<i32, _>(|_| Err(InternalError::custom("test panic").into())))
            .with(move |_: &i32| -> RuleResult {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });

        let err = rules.check(&1).unwrap_err();
        assert_eq!(err, RuleError::Internal(InternalError::custom("test panic")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_nested_lists_splice() {
        let inner = Rules::<i32>::new().with(fail("a")).with(fail("b"));
        let outer = Rules::<i32>::new().with(inner).with(fail("c"));

        let errors = outer.check(&1).unwrap_err().into_invalid().unwrap();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|node| node.as_leaf().is_some()));
    }

    #[test]
    fn test_from_boxed_iter() {
        let rules: Rules<i32> = [fail("x").boxed(), pass().boxed()].into_iter().collect();
        assert_eq!(rules.len(), 2);
        assert!(rules.check(&0).is_err());
    }
}
