//! EACH combinator - validates each element of a sequence

use crate::combinators::rules::Rules;
use crate::foundation::{IndexError, Rule, RuleError, RuleResult, Sequence, ValidationErrors};
use std::fmt;

// ============================================================================
// EACH COMBINATOR
// ============================================================================

/// Validates each element of a sequence.
///
/// Runs a rule list on every element (or on a projection of it) and wraps
/// the failures of element `i` in an [`IndexError`] with index `i`. An
/// internal failure on any element stops the walk.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldwise_validator::prelude::*;
///
/// let tags = each::<String>(rules![required("blank tag")]);
///
/// let errors = tags.check(&vec!["a".to_owned(), String::new()]).unwrap_err();
/// assert_eq!(errors.to_string(), "1: blank tag");
/// ```
pub struct Each<E: ?Sized, P> {
    project: P,
    rules: Rules<E>,
}

fn identity<E>(element: &E) -> &E {
    element
}

/// Applies `rules` to every element.
pub fn each<E>(rules: Rules<E>) -> Each<E, fn(&E) -> &E> {
    Each {
        project: identity,
        rules,
    }
}

/// Applies `rules` to a projection of every element, e.g. one of its fields.
pub fn each_with<I, E, P>(projection: P, rules: Rules<E>) -> Each<E, P>
where
    E: ?Sized,
    P: Fn(&I) -> &E,
{
    Each {
        project: projection,
        rules,
    }
}

impl<E: ?Sized, P> Each<E, P> {
    pub fn rules(&self) -> &Rules<E> {
        &self.rules
    }
}

impl<S, E, P> Rule<S> for Each<E, P>
where
    S: Sequence + ?Sized,
    E: ?Sized,
    P: Fn(&S::Item) -> &E,
{
    fn check(&self, input: &S) -> RuleResult {
        let mut errors = ValidationErrors::new();

        for (index, element) in input.items()?.iter().enumerate() {
            match self.rules.check((self.project)(element)) {
                Ok(()) => {}
                Err(RuleError::Invalid(found)) => errors.push(IndexError::new(index, found)),
                Err(internal @ RuleError::Internal(_)) => return Err(internal),
            }
        }

        errors.into_result()
    }
}

impl<E: ?Sized, P> fmt::Debug for Each<E, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Each")
            .field("rules", &self.rules)
            .field("project", &"<function>")
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
