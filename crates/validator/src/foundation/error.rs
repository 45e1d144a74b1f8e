//! Error types for validation outcomes
//!
//! A rule either passes, fails with a [`ValidationErrors`] collection, or
//! signals an [`InternalError`]. The two failure classes never mix:
//! [`RuleError`] keeps them apart at every propagation point so callers can
//! report the first to end users and treat the second as a defect.
//!
//! The collection is a tree. Struct fields, slice elements and map entries
//! wrap the errors found beneath them ([`FieldError`], [`IndexError`],
//! [`KeyError`]); leaves are plain [`ValidationError`]s.
//!
//! All static strings use `Cow<'static, str>` so the common case of literal
//! codes and messages does not allocate.

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Result type returned by every rule.
pub type RuleResult = Result<(), RuleError>;

/// A named message parameter, e.g. `("min", "5")`.
pub type Param = (Cow<'static, str>, Cow<'static, str>);

// ============================================================================
// LEAF ERROR
// ============================================================================

/// A single validation failure.
///
/// # Examples
///
/// ```rust,ignore
/// use fieldwise_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("min_length", "must be at least {min} characters")
///     .with_param("min", "5");
///
/// assert_eq!(error.param("min"), Some("5"));
/// assert_eq!(error.rendered_message(), "must be at least 5 characters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling and i18n.
    ///
    /// Examples: "required", "min_length", "unique"
    pub code: Cow<'static, str>,

    /// Human-readable message. May contain `{param}` placeholders.
    pub message: Cow<'static, str>,

    /// Parameters for the message template, in insertion order.
    pub params: SmallVec<[Param; 2]>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            params: SmallVec::new(),
        }
    }

    /// Creates a "custom" error with a message.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("custom", message)
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns the message with every `{key}` placeholder replaced by the
    /// matching parameter. Unknown placeholders are left as they are.
    #[must_use]
    pub fn rendered_message(&self) -> Cow<'_, str> {
        if self.params.is_empty() || !self.message.contains('{') {
            return Cow::Borrowed(self.message.as_ref());
        }

        let mut rendered = self.message.to_string();
        for (key, value) in &self.params {
            rendered = rendered.replace(&format!("{{{key}}}"), value);
        }
        Cow::Owned(rendered)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered_message())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// PATH WRAPPERS
// ============================================================================

/// Errors attributed to a struct field.
///
/// An empty field name marks a whole-struct (cross-field) rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: Cow<'static, str>,
    errors: ValidationErrors,
}

impl FieldError {
    pub fn new(field: impl Into<Cow<'static, str>>, errors: ValidationErrors) -> Self {
        Self {
            field: field.into(),
            errors,
        }
    }

    /// Returns the resolved field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            return fmt::Display::fmt(&self.errors, f);
        }
        write!(f, "{}: {}", self.field, self.errors)
    }
}

impl std::error::Error for FieldError {}

/// Errors attributed to a sequence element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexError {
    index: usize,
    errors: ValidationErrors,
}

impl IndexError {
    pub fn new(index: usize, errors: ValidationErrors) -> Self {
        Self { index, errors }
    }

    /// Returns the zero-based index of the offending element.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.index, self.errors)
    }
}

impl std::error::Error for IndexError {}

/// Errors attributed to a map entry, keyed by the entry key's display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyError {
    key: String,
    errors: ValidationErrors,
}

impl KeyError {
    pub fn new(key: impl Into<String>, errors: ValidationErrors) -> Self {
        Self {
            key: key.into(),
            errors,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.errors)
    }
}

impl std::error::Error for KeyError {}

// ============================================================================
// ERROR NODE
// ============================================================================

/// One entry of a [`ValidationErrors`] collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    Leaf(ValidationError),
    Field(FieldError),
    Index(IndexError),
    Key(KeyError),
}

impl ErrorNode {
    /// Returns the leaf error, if this node is one.
    pub fn as_leaf(&self) -> Option<&ValidationError> {
        match self {
            Self::Leaf(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldError> {
        match self {
            Self::Field(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<&IndexError> {
        match self {
            Self::Index(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<&KeyError> {
        match self {
            Self::Key(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(error) => fmt::Display::fmt(error, f),
            Self::Field(error) => fmt::Display::fmt(error, f),
            Self::Index(error) => fmt::Display::fmt(error, f),
            Self::Key(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl From<ValidationError> for ErrorNode {
    fn from(error: ValidationError) -> Self {
        Self::Leaf(error)
    }
}

impl From<FieldError> for ErrorNode {
    fn from(error: FieldError) -> Self {
        Self::Field(error)
    }
}

impl From<IndexError> for ErrorNode {
    fn from(error: IndexError) -> Self {
        Self::Index(error)
    }
}

impl From<KeyError> for ErrorNode {
    fn from(error: KeyError) -> Self {
        Self::Key(error)
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// An ordered collection of errors found at one nesting level.
///
/// Accumulators start empty; [`into_result`](Self::into_result) turns an
/// empty collection into success so a failure never carries an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    nodes: Vec<ErrorNode>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn push(&mut self, error: impl Into<ErrorNode>) {
        self.nodes.push(error.into());
    }

    /// Splices nodes into this collection, keeping their order.
    ///
    /// Passing another `ValidationErrors` flattens it into this level.
    pub fn extend<I, E>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = E>,
        E: Into<ErrorNode>,
    {
        self.nodes.extend(nodes.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorNode> {
        self.nodes.iter()
    }

    /// Returns all nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[ErrorNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<ErrorNode> {
        self.nodes
    }

    /// Converts to a rule result: `Ok(())` when empty.
    #[must_use = "result must be used"]
    pub fn into_result(self) -> RuleResult {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RuleError::Invalid(self))
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            nodes: vec![ErrorNode::Leaf(error)],
        }
    }
}

impl<E: Into<ErrorNode>> FromIterator<E> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ErrorNode;
    type IntoIter = std::vec::IntoIter<ErrorNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ErrorNode;
    type IntoIter = std::slice::Iter<'a, ErrorNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(node, f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// INTERNAL FAILURE
// ============================================================================

/// A contract violation between the validator configuration and the data.
///
/// These are defects to fix, not feedback for end users. They abort the
/// validation in progress and propagate unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum InternalError {
    /// A rule received a value of a kind it does not support.
    #[error("unexpected type: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: Cow<'static, str>,
        actual: Cow<'static, str>,
    },

    /// A field accessor returned a reference outside the struct being validated.
    #[error("field accessor of `{owner}` returned a reference outside the struct")]
    ForeignReference { owner: &'static str },

    /// A field accessor returned a reference that matches no declared field.
    #[error("`{owner}` has no declared field at offset {offset}")]
    UnknownField { owner: &'static str, offset: usize },

    /// A type-erased value was not the struct a rule was built for.
    #[error("expected a value of type `{expected}`")]
    NotAStruct { expected: &'static str },

    /// A range rule was configured with bounds of different kinds.
    #[error("range bounds must have the same kind, got {low} and {high}")]
    BoundMismatch {
        low: &'static str,
        high: &'static str,
    },

    /// Failure raised by a rule author.
    #[error("{0}")]
    Custom(Cow<'static, str>),
}

impl InternalError {
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(message.into())
    }
}

// ============================================================================
// RULE ERROR
// ============================================================================

/// The failure half of a [`RuleResult`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The data is invalid. The collection is never empty.
    #[error("{0}")]
    Invalid(ValidationErrors),

    /// The validator is misconfigured.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl RuleError {
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns the validation errors, if this is a validation failure.
    pub fn invalid(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Internal(_) => None,
        }
    }

    /// Returns the internal failure, if this is one.
    pub fn internal(&self) -> Option<&InternalError> {
        match self {
            Self::Internal(error) => Some(error),
            Self::Invalid(_) => None,
        }
    }

    pub fn into_invalid(self) -> Option<ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::Internal(_) => None,
        }
    }
}

impl From<ValidationError> for RuleError {
    fn from(error: ValidationError) -> Self {
        Self::Invalid(ValidationErrors::from(error))
    }
}

// ============================================================================
// TESTS
// ============================================================================
