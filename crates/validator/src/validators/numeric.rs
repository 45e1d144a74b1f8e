//! Typed numeric and temporal bounds
//!
//! `min`, `max` and `between` compare against a bound of a fixed type `B`.
//! Inputs are converted with `AsValidatable<B>`, so `i32` fields can be
//! checked against `i64` bounds and JSON numbers against any of them.
//! With the `temporal` feature, `chrono::DateTime<Utc>` works as a bound too.
//!
//! NaN never satisfies a bound.

use crate::foundation::{AsValidatable, Rule, RuleResult, ValidationError};
use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;
use std::fmt::Display;

fn not_below<B: PartialOrd>(value: &B, bound: &B) -> bool {
    matches!(
        value.partial_cmp(bound),
        Some(Ordering::Greater | Ordering::Equal)
    )
}

fn not_above<B: PartialOrd>(value: &B, bound: &B) -> bool {
    matches!(
        value.partial_cmp(bound),
        Some(Ordering::Less | Ordering::Equal)
    )
}

// ============================================================================
// MIN
// ============================================================================

/// Requires `value >= min`.
#[derive(Debug, Clone, PartialEq)]
pub struct Min<B> {
    min: B,
    message: Cow<'static, str>,
}

impl<S, B> Rule<S> for Min<B>
where
    S: AsValidatable<B> + ?Sized,
    B: PartialOrd + Display,
{
    fn check(&self, input: &S) -> RuleResult {
        let converted = input.as_validatable()?;
        let value = Borrow::<B>::borrow(&converted);
        if not_below(value, &self.min) {
            return Ok(());
        }
        Err(ValidationError::new("min", self.message.clone())
            .with_param("min", self.min.to_string())
            .with_param("actual", value.to_string())
            .into())
    }
}

#[must_use]
pub fn min<B>(min: B, message: impl Into<Cow<'static, str>>) -> Min<B> {
    Min {
        min,
        message: message.into(),
    }
}

// ============================================================================
// MAX
// ============================================================================

/// Requires `value <= max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Max<B> {
    max: B,
    message: Cow<'static, str>,
}

impl<S, B> Rule<S> for Max<B>
where
    S: AsValidatable<B> + ?Sized,
    B: PartialOrd + Display,
{
    fn check(&self, input: &S) -> RuleResult {
        let converted = input.as_validatable()?;
        let value = Borrow::<B>::borrow(&converted);
        if not_above(value, &self.max) {
            return Ok(());
        }
        Err(ValidationError::new("max", self.message.clone())
            .with_param("max", self.max.to_string())
            .with_param("actual", value.to_string())
            .into())
    }
}

#[must_use]
pub fn max<B>(max: B, message: impl Into<Cow<'static, str>>) -> Max<B> {
    Max {
        max,
        message: message.into(),
    }
}

// ============================================================================
// BETWEEN
// ============================================================================

/// Requires `low <= value <= high`.
#[derive(Debug, Clone, PartialEq)]
pub struct Between<B> {
    low: B,
    high: B,
    message: Cow<'static, str>,
}

impl<S, B> Rule<S> for Between<B>
where
    S: AsValidatable<B> + ?Sized,
    B: PartialOrd + Display,
{
    fn check(&self, input: &S) -> RuleResult {
        let converted = input.as_validatable()?;
        let value = Borrow::<B>::borrow(&converted);
        if not_below(value, &self.low) && not_above(value, &self.high) {
            return Ok(());
        }
        Err(ValidationError::new("between", self.message.clone())
            .with_param("low", self.low.to_string())
            .with_param("high", self.high.to_string())
            .with_param("actual", value.to_string())
            .into())
    }
}

#[must_use]
pub fn between<B>(low: B, high: B, message: impl Into<Cow<'static, str>>) -> Between<B> {
    Between {
        low,
        high,
        message: message.into(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
