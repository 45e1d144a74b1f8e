//! Core traits for the validation system
//!
//! Everything that checks a value implements [`Rule`]. Closures with the
//! right shape are rules too, so one-off checks need no wrapper type.

use crate::foundation::error::RuleResult;

// ============================================================================
// CORE RULE TRAIT
// ============================================================================

/// A check applied to a borrowed value.
///
/// The input type is a generic parameter rather than an associated type, so
/// one rule value can check several representations. The string rules, for
/// example, implement `Rule<S>` for every `S: AsValidatable<str>`.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldwise_validator::foundation::{Rule, RuleResult, ValidationError};
///
/// struct NotZero;
///
/// impl Rule<i64> for NotZero {
///     fn check(&self, input: &i64) -> RuleResult {
///         if *input == 0 {
///             return Err(ValidationError::new("not_zero", "must not be zero").into());
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Rule<T: ?Sized> {
    /// Checks the input value.
    ///
    /// Returns `Err(RuleError::Invalid(_))` for bad data and
    /// `Err(RuleError::Internal(_))` when the rule cannot handle the input.
    fn check(&self, input: &T) -> RuleResult;
}

impl<T, F> Rule<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> RuleResult,
{
    #[inline]
    fn check(&self, input: &T) -> RuleResult {
        self(input)
    }
}

/// A type-erased rule, shareable across threads.
pub type BoxedRule<T> = Box<dyn Rule<T> + Send + Sync>;

// ============================================================================
// EXTENSION TRAIT
// ============================================================================

/// Convenience methods available on every rule.
pub trait RuleExt<T: ?Sized>: Rule<T> + Sized {
    /// Erases the concrete rule type.
    fn boxed(self) -> BoxedRule<T>
    where
        Self: Send + Sync + 'static,
    {
        Box::new(self)
    }

    /// Returns `true` when the value passes.
    ///
    /// Internal failures count as "not valid".
    fn is_valid(&self, input: &T) -> bool {
        self.check(input).is_ok()
    }
}

impl<T: ?Sized, R: Rule<T>> RuleExt<T> for R {}

/// Pins the input type of a closure rule.
///
/// Closures passed where the input type is not yet known need either an
/// annotated parameter or this helper:
///
/// ```rust,ignore
/// let positive = from_fn::<i64, _>(|v| if *v > 0 { Ok(()) } else { Err(...) });
/// ```
pub fn from_fn<T, F>(f: F) -> F
where
    T: ?Sized,
    F: Fn(&T) -> RuleResult,
{
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::{InternalError, ValidationError};

    struct NotZero;

    impl Rule<i64> for NotZero {
        fn check(&self, input: &i64) -> RuleResult {
            if *input == 0 {
                return Err(ValidationError::new("not_zero", "must not be zero").into());
            }
            Ok(())
        }
    }

    #[test]
    fn test_struct_rule() {
        assert!(NotZero.check(&1).is_ok());
        assert!(NotZero.check(&0).is_err());
    }

    #[test]
    fn test_closure_rule() {
        let even = from_fn::<i64, _>(|v| {
            if v % 2 == 0 {
                Ok(())
            } else {
                Err(ValidationError::custom("odd").into())
            }
        });

        assert!(even.is_valid(&4));
        assert!(!even.is_valid(&3));
    }

    #[test]
    fn test_boxed_rule() {
        let rules: Vec<BoxedRule<i64>> = vec![
            NotZero.boxed(),
            from_fn::<i64, _>(|_| Err(InternalError::custom("boom").into())).boxed(),
        ];

        assert!(rules[0].check(&5).is_ok());
        assert!(rules[1].check(&5).unwrap_err().is_internal());
    }
}
