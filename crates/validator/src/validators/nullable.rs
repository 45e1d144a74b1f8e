//! Presence and membership validators

use crate::foundation::{Rule, RuleResult, ValidationError};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt::Display;

// ============================================================================
// PRESENT
// ============================================================================

/// Rejects `None` and JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Present {
    message: Cow<'static, str>,
}

impl Present {
    fn error(&self) -> ValidationError {
        ValidationError::new("present", self.message.clone())
    }
}

impl<T> Rule<Option<T>> for Present {
    fn check(&self, input: &Option<T>) -> RuleResult {
        if input.is_some() {
            Ok(())
        } else {
            Err(self.error().into())
        }
    }
}

impl Rule<Value> for Present {
    fn check(&self, input: &Value) -> RuleResult {
        if input.is_null() {
            Err(self.error().into())
        } else {
            Ok(())
        }
    }
}

#[must_use]
pub fn present(message: impl Into<Cow<'static, str>>) -> Present {
    Present {
        message: message.into(),
    }
}

// ============================================================================
// ONE OF
// ============================================================================

/// Requires the value to equal one of an allowed set.
///
/// The comparison goes through `PartialEq<T>`, so a `String` field can be
/// checked against `&'static str` values and a JSON value against numbers
/// or strings.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOf<T> {
    allowed: Vec<T>,
    message: Cow<'static, str>,
}

impl<T> OneOf<T> {
    pub fn allowed(&self) -> &[T] {
        &self.allowed
    }
}

impl<S, T> Rule<S> for OneOf<T>
where
    S: PartialEq<T> + Display + ?Sized,
    T: Display,
{
    fn check(&self, input: &S) -> RuleResult {
        if self.allowed.iter().any(|candidate| input == candidate) {
            return Ok(());
        }

        let allowed = self
            .allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        Err(ValidationError::new("one_of", self.message.clone())
            .with_param("allowed", allowed)
            .with_param("actual", input.to_string())
            .into())
    }
}

#[must_use]
pub fn one_of<T>(
    allowed: impl IntoIterator<Item = T>,
    message: impl Into<Cow<'static, str>>,
) -> OneOf<T> {
    OneOf {
        allowed: allowed.into_iter().collect(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_present_option() {
        let rule = present("missing");

        assert!(rule.check(&Some(0)).is_ok());
        assert!(rule.check(&None::<i32>).is_err());
    }

    #[test]
    fn test_present_json() {
        let rule = present("missing");

        assert!(rule.check(&json!(0)).is_ok());
        assert!(rule.check(&json!("")).is_ok());
        assert!(rule.check(&Value::Null).is_err());
    }

    #[test]
    fn test_one_of_strings() {
        let rule = one_of(["admin", "user"], "{actual} is not one of {allowed}");

        assert!(rule.check(&String::from("admin")).is_ok());
        assert_eq!(
            rule.check(&String::from("root")).unwrap_err().to_string(),
            "root is not one of admin, user"
        );
    }

    #[test]
    fn test_one_of_numbers_and_json() {
        let rule = one_of([1_i64, 2, 3], "not allowed");

        assert!(rule.check(&2_i64).is_ok());
        assert!(rule.check(&4_i64).is_err());
        assert!(rule.check(&json!(3)).is_ok());
        assert!(rule.check(&json!("3")).is_err());
    }
}
