//! Input bridges: `AsValidatable`, `Sequence` and `Mapping`
//!
//! Rules are written once against a canonical kind (`str`, `i64`, `[T]`,
//! ...) and accept every representation that converts to it. Conversions of
//! the dynamic `serde_json::Value` can fail; a value of the wrong JSON kind
//! is a configuration defect and surfaces as [`InternalError::TypeMismatch`].

use crate::foundation::error::InternalError;
use serde_json::Value;
use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::hash::BuildHasher;

// ============================================================================
// CORE TRAIT: AsValidatable with GAT
// ============================================================================

/// Trait for types that can be presented to a rule as kind `K`.
///
/// Uses a GAT so the conversion can hand out either a borrow (`&str` out of
/// a `String`) or an owned value (`i64` out of an `i32`).
pub trait AsValidatable<K: ?Sized> {
    /// The output type, which must be borrowable as `&K`.
    type Output<'a>: Borrow<K>
    where
        Self: 'a;

    /// Converts self to the canonical kind.
    fn as_validatable(&self) -> Result<Self::Output<'_>, InternalError>;
}

/// Returns a human-readable kind name for a JSON value.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn json_mismatch(expected: &'static str, value: &Value) -> InternalError {
    InternalError::type_mismatch(expected, json_kind(value))
}

// ============================================================================
// STRINGS
// ============================================================================

impl AsValidatable<str> for str {
    type Output<'a>
        = &'a str
    where
        Self: 'a;

    #[inline]
    fn as_validatable(&self) -> Result<&str, InternalError> {
        Ok(self)
    }
}

impl AsValidatable<str> for String {
    type Output<'a> = &'a str;

    #[inline]
    fn as_validatable(&self) -> Result<&str, InternalError> {
        Ok(self.as_str())
    }
}

impl AsValidatable<str> for Box<str> {
    type Output<'a> = &'a str;

    #[inline]
    fn as_validatable(&self) -> Result<&str, InternalError> {
        Ok(self)
    }
}

impl AsValidatable<str> for Cow<'_, str> {
    type Output<'a>
        = &'a str
    where
        Self: 'a;

    #[inline]
    fn as_validatable(&self) -> Result<&str, InternalError> {
        Ok(self.as_ref())
    }
}

impl AsValidatable<str> for Value {
    type Output<'a> = &'a str;

    fn as_validatable(&self) -> Result<&str, InternalError> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            other => Err(json_mismatch("string", other)),
        }
    }
}

// ============================================================================
// NUMBERS
// ============================================================================

macro_rules! reflexive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsValidatable<$ty> for $ty {
                type Output<'a> = $ty;

                #[inline]
                fn as_validatable(&self) -> Result<$ty, InternalError> {
                    Ok(*self)
                }
            }
        )*
    };
}

macro_rules! widen {
    ($target:ty: $($ty:ty),* $(,)?) => {
        $(
            impl AsValidatable<$target> for $ty {
                type Output<'a> = $target;

                #[inline]
                fn as_validatable(&self) -> Result<$target, InternalError> {
                    Ok(<$target>::from(*self))
                }
            }
        )*
    };
}

reflexive!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool);

widen!(i64: i8, i16, i32, u8, u16, u32);
widen!(u64: u8, u16, u32);
widen!(f64: f32, i8, i16, i32, u8, u16, u32);

impl AsValidatable<u64> for usize {
    type Output<'a> = u64;

    #[inline]
    fn as_validatable(&self) -> Result<u64, InternalError> {
        Ok(*self as u64)
    }
}

impl AsValidatable<i64> for isize {
    type Output<'a> = i64;

    #[inline]
    fn as_validatable(&self) -> Result<i64, InternalError> {
        Ok(*self as i64)
    }
}

impl AsValidatable<i64> for Value {
    type Output<'a> = i64;

    fn as_validatable(&self) -> Result<i64, InternalError> {
        match self {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| InternalError::type_mismatch("integer", n.to_string())),
            other => Err(json_mismatch("integer", other)),
        }
    }
}

impl AsValidatable<u64> for Value {
    type Output<'a> = u64;

    fn as_validatable(&self) -> Result<u64, InternalError> {
        match self {
            Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| InternalError::type_mismatch("unsigned integer", n.to_string())),
            other => Err(json_mismatch("unsigned integer", other)),
        }
    }
}

impl AsValidatable<f64> for Value {
    type Output<'a> = f64;

    fn as_validatable(&self) -> Result<f64, InternalError> {
        match self {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| InternalError::type_mismatch("number", n.to_string())),
            other => Err(json_mismatch("number", other)),
        }
    }
}

impl AsValidatable<bool> for Value {
    type Output<'a> = bool;

    fn as_validatable(&self) -> Result<bool, InternalError> {
        self.as_bool().ok_or_else(|| json_mismatch("boolean", self))
    }
}

#[cfg(feature = "temporal")]
impl AsValidatable<chrono::DateTime<chrono::Utc>> for chrono::DateTime<chrono::Utc> {
    type Output<'a> = Self;

    #[inline]
    fn as_validatable(&self) -> Result<Self, InternalError> {
        Ok(*self)
    }
}

// ============================================================================
// SEQUENCES
// ============================================================================

/// A contiguous run of elements the slice engine can walk.
///
/// Implemented for `[T]`, `Vec<T>`, `[T; N]` and `serde_json::Value`
/// (arrays only).
pub trait Sequence {
    type Item;

    /// Returns the elements, or a type mismatch for non-sequence values.
    fn items(&self) -> Result<&[Self::Item], InternalError>;
}

impl<T> Sequence for [T] {
    type Item = T;

    #[inline]
    fn items(&self) -> Result<&[T], InternalError> {
        Ok(self)
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    #[inline]
    fn items(&self) -> Result<&[T], InternalError> {
        Ok(self.as_slice())
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;

    #[inline]
    fn items(&self) -> Result<&[T], InternalError> {
        Ok(self.as_slice())
    }
}

impl Sequence for Value {
    type Item = Value;

    fn items(&self) -> Result<&[Value], InternalError> {
        match self {
            Value::Array(items) => Ok(items.as_slice()),
            other => Err(json_mismatch("array", other)),
        }
    }
}

// ============================================================================
// MAPPINGS
// ============================================================================

/// A keyed collection with a deterministic iteration order.
pub trait Mapping {
    type Key: Display + ?Sized;
    type Value;

    /// Returns the entries in iteration order, or a type mismatch for
    /// non-map values.
    fn entries(&self) -> Result<Vec<(&Self::Key, &Self::Value)>, InternalError>;
}

impl<K: Display, V> Mapping for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> Result<Vec<(&K, &V)>, InternalError> {
        Ok(self.iter().collect())
    }
}

impl<K: Display, V, S: BuildHasher> Mapping for indexmap::IndexMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> Result<Vec<(&K, &V)>, InternalError> {
        Ok(self.iter().collect())
    }
}

impl Mapping for Value {
    type Key = str;
    type Value = Value;

    fn entries(&self) -> Result<Vec<(&str, &Value)>, InternalError> {
        match self {
            Value::Object(map) => Ok(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            other => Err(json_mismatch("object", other)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
