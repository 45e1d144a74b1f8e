//! Dynamic range rules over [`Bound`] values
//!
//! Unlike the typed rules in [`numeric`](super::numeric), these take bounds
//! whose kind is only known at runtime, typically read from configuration.
//! A rule whose two bounds have incompatible kinds never panics and never
//! errors at construction: every check reports
//! [`InternalError::BoundMismatch`].
//!
//! ```rust,ignore
//! let rule: Ranged = serde_json::from_value(json!({
//!     "low": 1, "high": 10, "message": "must be between {low} and {high}"
//! }))?;
//! ```

use crate::foundation::{AsValidatable, InternalError, Rule, RuleResult, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::{Borrow, Cow};
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// BOUND
// ============================================================================

/// A comparable value of one of the supported kinds.
///
/// Signed and unsigned integers compare with each other; every other pair
/// of different kinds is a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Int(i64),
    Uint(u64),
    Float(f64),
    #[cfg(feature = "temporal")]
    Time(chrono::DateTime<chrono::Utc>),
}

impl Bound {
    /// Returns the kind name used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            #[cfg(feature = "temporal")]
            Self::Time(_) => "time",
        }
    }

    /// Returns `true` when the two values can be ordered against each other.
    pub fn is_comparable_with(&self, other: &Self) -> bool {
        self.compare(other).is_ok()
    }

    /// Orders `self` against `other`.
    ///
    /// `Ok(None)` means the kinds match but the values are unordered (NaN).
    fn compare(&self, other: &Self) -> Result<Option<Ordering>, InternalError> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok(Some(a.cmp(b))),
            (Self::Uint(a), Self::Uint(b)) => Ok(Some(a.cmp(b))),
            (Self::Int(a), Self::Uint(b)) => Ok(Some(i128::from(*a).cmp(&i128::from(*b)))),
            (Self::Uint(a), Self::Int(b)) => Ok(Some(i128::from(*a).cmp(&i128::from(*b)))),
            (Self::Float(a), Self::Float(b)) => Ok(a.partial_cmp(b)),
            #[cfg(feature = "temporal")]
            (Self::Time(a), Self::Time(b)) => Ok(Some(a.cmp(b))),
            _ => Err(InternalError::type_mismatch(other.kind(), self.kind())),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Uint(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            #[cfg(feature = "temporal")]
            Self::Time(v) => f.write_str(&v.to_rfc3339()),
        }
    }
}

macro_rules! bound_from {
    ($variant:ident($target:ty): $($ty:ty),*) => {
        $(
            impl From<$ty> for Bound {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }

            impl AsValidatable<Bound> for $ty {
                type Output<'a> = Bound;

                #[inline]
                fn as_validatable(&self) -> Result<Bound, InternalError> {
                    Ok(Bound::from(*self))
                }
            }
        )*
    };
}

bound_from!(Int(i64): i8, i16, i32, i64);
bound_from!(Uint(u64): u8, u16, u32, u64);
bound_from!(Float(f64): f32, f64);

impl From<usize> for Bound {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl AsValidatable<Bound> for usize {
    type Output<'a> = Bound;

    fn as_validatable(&self) -> Result<Bound, InternalError> {
        Ok(Bound::from(*self))
    }
}

#[cfg(feature = "temporal")]
impl From<chrono::DateTime<chrono::Utc>> for Bound {
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Self::Time(value)
    }
}

#[cfg(feature = "temporal")]
impl AsValidatable<Bound> for chrono::DateTime<chrono::Utc> {
    type Output<'a> = Bound;

    fn as_validatable(&self) -> Result<Bound, InternalError> {
        Ok(Bound::Time(*self))
    }
}

impl AsValidatable<Bound> for Bound {
    type Output<'a> = &'a Bound;

    #[inline]
    fn as_validatable(&self) -> Result<&Bound, InternalError> {
        Ok(self)
    }
}

impl AsValidatable<Bound> for Value {
    type Output<'a> = Bound;

    fn as_validatable(&self) -> Result<Bound, InternalError> {
        let Value::Number(n) = self else {
            return Err(InternalError::type_mismatch(
                "number",
                crate::foundation::validatable::json_kind(self),
            ));
        };

        if let Some(v) = n.as_i64() {
            Ok(Bound::Int(v))
        } else if let Some(v) = n.as_u64() {
            Ok(Bound::Uint(v))
        } else {
            n.as_f64()
                .map(Bound::Float)
                .ok_or_else(|| InternalError::type_mismatch("number", n.to_string()))
        }
    }
}

// ============================================================================
// RANGED RULE
// ============================================================================

/// Requires a value within optional lower and upper bounds, inclusive.
///
/// Deserializable, so range rules can be declared in configuration files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ranged {
    #[serde(default)]
    low: Option<Bound>,
    #[serde(default)]
    high: Option<Bound>,
    message: Cow<'static, str>,
}

impl Ranged {
    pub fn low(&self) -> Option<&Bound> {
        self.low.as_ref()
    }

    pub fn high(&self) -> Option<&Bound> {
        self.high.as_ref()
    }

    fn verify_bounds(&self) -> Result<(), InternalError> {
        match (&self.low, &self.high) {
            (Some(low), Some(high)) if !low.is_comparable_with(high) => {
                Err(InternalError::BoundMismatch {
                    low: low.kind(),
                    high: high.kind(),
                })
            }
            _ => Ok(()),
        }
    }

    fn error(&self, value: &Bound) -> ValidationError {
        let mut error = ValidationError::new("range", self.message.clone());
        if let Some(low) = &self.low {
            error = error.with_param("low", low.to_string());
        }
        if let Some(high) = &self.high {
            error = error.with_param("high", high.to_string());
        }
        error.with_param("actual", value.to_string())
    }
}

impl<S: AsValidatable<Bound> + ?Sized> Rule<S> for Ranged {
    fn check(&self, input: &S) -> RuleResult {
        self.verify_bounds()?;

        let converted = input.as_validatable()?;
        let value = Borrow::<Bound>::borrow(&converted);

        let above_low = match &self.low {
            Some(low) => matches!(
                value.compare(low)?,
                Some(Ordering::Greater | Ordering::Equal)
            ),
            None => true,
        };
        let below_high = match &self.high {
            Some(high) => matches!(
                value.compare(high)?,
                Some(Ordering::Less | Ordering::Equal)
            ),
            None => true,
        };

        if above_low && below_high {
            Ok(())
        } else {
            Err(self.error(value).into())
        }
    }
}

/// Requires `low <= value <= high`.
#[must_use]
pub fn range(
    low: impl Into<Bound>,
    high: impl Into<Bound>,
    message: impl Into<Cow<'static, str>>,
) -> Ranged {
    Ranged {
        low: Some(low.into()),
        high: Some(high.into()),
        message: message.into(),
    }
}

/// Requires `value >= low`.
#[must_use]
pub fn at_least(low: impl Into<Bound>, message: impl Into<Cow<'static, str>>) -> Ranged {
    Ranged {
        low: Some(low.into()),
        high: None,
        message: message.into(),
    }
}

/// Requires `value <= high`.
#[must_use]
pub fn at_most(high: impl Into<Bound>, message: impl Into<Cow<'static, str>>) -> Ranged {
    Ranged {
        low: None,
        high: Some(high.into()),
        message: message.into(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
