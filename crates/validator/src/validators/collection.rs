//! Collection validators: size bounds and uniqueness
//!
//! All of them accept any [`Sequence`]; a JSON value that is not an array
//! is an internal failure.

use crate::foundation::{
    IndexError, Rule, RuleResult, Sequence, ValidationError, ValidationErrors,
};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

// ============================================================================
// SIZE
// ============================================================================

/// Requires at least `min` elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinSize {
    min: usize,
    message: Cow<'static, str>,
}

impl<S: Sequence + ?Sized> Rule<S> for MinSize {
    fn check(&self, input: &S) -> RuleResult {
        let size = input.items()?.len();
        if size >= self.min {
            return Ok(());
        }
        Err(ValidationError::new("min_size", self.message.clone())
            .with_param("min", self.min.to_string())
            .with_param("actual", size.to_string())
            .into())
    }
}

#[must_use]
pub fn min_size(min: usize, message: impl Into<Cow<'static, str>>) -> MinSize {
    MinSize {
        min,
        message: message.into(),
    }
}

/// Allows at most `max` elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaxSize {
    max: usize,
    message: Cow<'static, str>,
}

impl<S: Sequence + ?Sized> Rule<S> for MaxSize {
    fn check(&self, input: &S) -> RuleResult {
        let size = input.items()?.len();
        if size <= self.max {
            return Ok(());
        }
        Err(ValidationError::new("max_size", self.message.clone())
            .with_param("max", self.max.to_string())
            .with_param("actual", size.to_string())
            .into())
    }
}

#[must_use]
pub fn max_size(max: usize, message: impl Into<Cow<'static, str>>) -> MaxSize {
    MaxSize {
        max,
        message: message.into(),
    }
}

/// Requires between `min` and `max` elements, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SizeRange {
    min: usize,
    max: usize,
    message: Cow<'static, str>,
}

impl<S: Sequence + ?Sized> Rule<S> for SizeRange {
    fn check(&self, input: &S) -> RuleResult {
        let size = input.items()?.len();
        if (self.min..=self.max).contains(&size) {
            return Ok(());
        }
        Err(ValidationError::new("size_range", self.message.clone())
            .with_param("min", self.min.to_string())
            .with_param("max", self.max.to_string())
            .with_param("actual", size.to_string())
            .into())
    }
}

#[must_use]
pub fn size_range(min: usize, max: usize, message: impl Into<Cow<'static, str>>) -> SizeRange {
    SizeRange {
        min,
        max,
        message: message.into(),
    }
}

// ============================================================================
// UNIQUE
// ============================================================================

/// Flags every element whose value (or projected key) was already seen.
///
/// First occurrences are never flagged: `[x, y, x]` yields one error at
/// index 2.
pub struct Unique<K: ?Sized, P> {
    project: P,
    message: Cow<'static, str>,
    _key: PhantomData<fn(&K)>,
}

fn identity<K>(element: &K) -> &K {
    element
}

/// Requires all elements to be distinct.
#[must_use]
pub fn unique<K>(message: impl Into<Cow<'static, str>>) -> Unique<K, fn(&K) -> &K> {
    Unique {
        project: identity,
        message: message.into(),
        _key: PhantomData,
    }
}

/// Requires all elements to have distinct keys, e.g. distinct ids.
#[must_use]
pub fn unique_by<I, K, P>(projection: P, message: impl Into<Cow<'static, str>>) -> Unique<K, P>
where
    K: ?Sized,
    P: Fn(&I) -> &K,
{
    Unique {
        project: projection,
        message: message.into(),
        _key: PhantomData,
    }
}

impl<S, K, P> Rule<S> for Unique<K, P>
where
    S: Sequence + ?Sized,
    K: Hash + Eq + ?Sized,
    P: Fn(&S::Item) -> &K,
{
    fn check(&self, input: &S) -> RuleResult {
        let items = input.items()?;
        let mut seen = HashSet::with_capacity(items.len());
        let mut errors = ValidationErrors::new();

        for (index, item) in items.iter().enumerate() {
            if !seen.insert((self.project)(item)) {
                let duplicate = ValidationError::new("unique", self.message.clone());
                errors.push(IndexError::new(index, duplicate.into()));
            }
        }

        errors.into_result()
    }
}

impl<K: ?Sized, P> fmt::Debug for Unique<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unique")
            .field("message", &self.message)
            .field("project", &"<function>")
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::InternalError;
    use serde_json::json;

    #[test]
    fn test_sizes() {
        let items = vec![1, 2, 3];

        assert!(min_size(3, "few").check(&items).is_ok());
        assert!(min_size(4, "few").check(&items).is_err());
        assert!(max_size(3, "many").check(&items).is_ok());
        assert!(max_size(2, "many").check(&items).is_err());
        assert!(size_range(1, 3, "size").check(&items).is_ok());
        assert!(size_range(4, 5, "size").check(&items).is_err());
    }

    #[test]
    fn test_size_params() {
        let err = min_size(2, "at least {min} items, got {actual}")
            .check(&[0_u8; 1])
            .unwrap_err();
        assert_eq!(err.to_string(), "at least 2 items, got 1");
    }

    #[test]
    fn test_size_of_non_sequence_is_internal() {
        let err = max_size(1, "many").check(&json!("abc")).unwrap_err();
        assert_eq!(
            err.internal(),
            Some(&InternalError::type_mismatch("array", "string"))
        );
    }

    #[test]
    fn test_unique_flags_repeats_only() {
        let rule = unique::<&str>("duplicate");
        let errors = rule
            .check(&["x", "y", "x"])
            .unwrap_err()
            .into_invalid()
            .unwrap();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.nodes()[0].as_index().unwrap().index(), 2);
        assert_eq!(errors.to_string(), "2: duplicate");
    }

    #[test]
    fn test_unique_every_repeat() {
        let rule = unique::<i32>("duplicate");
        let errors = rule.check(&vec![1, 1, 2, 1]).unwrap_err().into_invalid().unwrap();

        let indices: Vec<_> = errors
            .iter()
            .map(|node| node.as_index().unwrap().index())
            .collect();
        assert_eq!(indices, [1, 3]);
    }

    #[test]
    fn test_unique_by_key() {
        struct Tag {
            id: u32,
        }

        let rule = unique_by(|tag: &Tag| &tag.id, "duplicate id");
        let tags = vec![Tag { id: 1 }, Tag { id: 2 }];
        assert!(rule.check(&tags).is_ok());

        let tags = vec![Tag { id: 7 }, Tag { id: 8 }, Tag { id: 7 }];
        assert_eq!(rule.check(&tags).unwrap_err().to_string(), "2: duplicate id");
    }
}
