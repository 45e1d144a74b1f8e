//! String validators
//!
//! Every rule here accepts any input implementing `AsValidatable<str>`:
//! `str`, `String`, `Cow<str>`, `Box<str>` and JSON string values. Length
//! is measured in Unicode scalar values (chars).

use crate::foundation::{AsValidatable, InternalError, Rule, RuleResult, ValidationError};
use crate::macros::string_rule;
use regex::Regex;
use std::borrow::{Borrow, Cow};
use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

fn char_count<S: AsValidatable<str> + ?Sized>(input: &S) -> Result<usize, InternalError> {
    let converted = input.as_validatable()?;
    Ok(Borrow::<str>::borrow(&converted).chars().count())
}

// ============================================================================
// PRESENCE AND CONTENT
// ============================================================================

string_rule! {
    /// Rejects the empty string.
    pub Required => "required";
    rule(input) { !input.is_empty() }
    fn required;
}

string_rule! {
    /// Accepts syntactically valid email addresses.
    pub Email => "email";
    rule(input) { EMAIL_REGEX.is_match(input) }
    fn email;
}

string_rule! {
    /// Accepts strings whose letters are all uppercase.
    ///
    /// Characters without case are ignored, so `"AB-1"` and `""` pass.
    pub Uppercase => "uppercase";
    rule(input) { input.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase) }
    fn uppercase;
}

string_rule! {
    /// Accepts strings whose letters are all lowercase.
    pub Lowercase => "lowercase";
    rule(input) { input.chars().filter(|c| c.is_alphabetic()).all(char::is_lowercase) }
    fn lowercase;
}

string_rule! {
    /// Accepts strings whose first character is an uppercase letter.
    ///
    /// The empty string fails.
    pub StartsUppercase => "starts_uppercase";
    rule(input) { input.chars().next().is_some_and(char::is_uppercase) }
    fn starts_uppercase;
}

string_rule! {
    /// Accepts strings made only of ASCII digits.
    ///
    /// The empty string passes; pair with [`required`] to reject it.
    pub DigitsOnly => "digits_only";
    rule(input) { input.chars().all(|c| c.is_ascii_digit()) }
    fn digits_only;
}

string_rule! {
    /// Accepts strings that parse as a JSON document.
    pub Json => "json";
    rule(input) { serde_json::from_str::<serde::de::IgnoredAny>(input).is_ok() }
    fn json;
}

// ============================================================================
// LENGTH
// ============================================================================

/// Requires at least `min` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinLength {
    min: usize,
    message: Cow<'static, str>,
}

impl<S: AsValidatable<str> + ?Sized> Rule<S> for MinLength {
    fn check(&self, input: &S) -> RuleResult {
        let length = char_count(input)?;
        if length >= self.min {
            return Ok(());
        }
        Err(ValidationError::new("min_length", self.message.clone())
            .with_param("min", self.min.to_string())
            .with_param("actual", length.to_string())
            .into())
    }
}

#[must_use]
pub fn min_length(min: usize, message: impl Into<Cow<'static, str>>) -> MinLength {
    MinLength {
        min,
        message: message.into(),
    }
}

/// Allows at most `max` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaxLength {
    max: usize,
    message: Cow<'static, str>,
}

impl<S: AsValidatable<str> + ?Sized> Rule<S> for MaxLength {
    fn check(&self, input: &S) -> RuleResult {
        let length = char_count(input)?;
        if length <= self.max {
            return Ok(());
        }
        Err(ValidationError::new("max_length", self.message.clone())
            .with_param("max", self.max.to_string())
            .with_param("actual", length.to_string())
            .into())
    }
}

#[must_use]
pub fn max_length(max: usize, message: impl Into<Cow<'static, str>>) -> MaxLength {
    MaxLength {
        max,
        message: message.into(),
    }
}

/// Requires between `min` and `max` characters, inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LengthRange {
    min: usize,
    max: usize,
    message: Cow<'static, str>,
}

impl<S: AsValidatable<str> + ?Sized> Rule<S> for LengthRange {
    fn check(&self, input: &S) -> RuleResult {
        let length = char_count(input)?;
        if (self.min..=self.max).contains(&length) {
            return Ok(());
        }
        Err(ValidationError::new("length_range", self.message.clone())
            .with_param("min", self.min.to_string())
            .with_param("max", self.max.to_string())
            .with_param("actual", length.to_string())
            .into())
    }
}

#[must_use]
pub fn length_range(min: usize, max: usize, message: impl Into<Cow<'static, str>>) -> LengthRange {
    LengthRange {
        min,
        max,
        message: message.into(),
    }
}

// ============================================================================
// PATTERN
// ============================================================================

/// Requires a match of a regular expression.
///
/// The pattern is not anchored implicitly; use `^...$` for full matches.
#[derive(Debug, Clone)]
pub struct Matches {
    pattern: Regex,
    message: Cow<'static, str>,
}

impl<S: AsValidatable<str> + ?Sized> Rule<S> for Matches {
    fn check(&self, input: &S) -> RuleResult {
        let converted = input.as_validatable()?;
        if self.pattern.is_match(Borrow::<str>::borrow(&converted)) {
            return Ok(());
        }
        Err(ValidationError::new("matches", self.message.clone())
            .with_param("pattern", self.pattern.as_str().to_owned())
            .into())
    }
}

#[must_use]
pub fn matches(pattern: Regex, message: impl Into<Cow<'static, str>>) -> Matches {
    Matches {
        pattern,
        message: message.into(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
