//! STRUCT engine - field-by-field validation of a record
//!
//! A [`StructRule`] holds an ordered list of declarations. Each declaration
//! points at one field through an accessor closure and carries the rules for
//! that field. Field names in errors are not written by hand: they are found
//! by locating the accessor's returned reference inside the struct and
//! looking its offset up in the table built from [`Fields`] metadata.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldwise_validator::prelude::*;
//!
//! #[derive(Default)]
//! struct Address {
//!     country: String,
//!     zip_code: String,
//! }
//!
//! fields!(Address { country, zip_code(json = "zipCode") });
//!
//! let address_rule = StructRule::<Address>::builder()
//!     .naming(FieldNaming::tag("json"))
//!     .field(|a| &a.country, rules![required("required"), starts_uppercase("capitalized")])
//!     .field(|a| &a.zip_code, rules![required("required"), digits_only("digits")])
//!     .build();
//!
//! let errors = address_rule.check(&Address::default()).unwrap_err();
//! assert_eq!(errors.to_string(), "country: required, capitalized, zipCode: required");
//! ```

use crate::combinators::context::ContextRules;
use crate::combinators::rules::Rules;
use crate::foundation::fields::{FieldTable, WHOLE};
use crate::foundation::{
    FieldError, FieldNaming, Fields, InternalError, Rule, RuleError, RuleResult, ValidationErrors,
};
use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;

// ============================================================================
// DECLARATIONS
// ============================================================================

/// One type-erased entry of a struct rule.
trait Declaration<T>: Send + Sync {
    /// Returns the resolved name and the outcome of the field's rules.
    ///
    /// Fails without running any rule when the accessor's reference cannot
    /// be named.
    fn evaluate(
        &self,
        value: &T,
        table: &FieldTable,
    ) -> Result<(&'static str, RuleResult), InternalError>;
}

struct FieldDecl<T, U: ?Sized, F> {
    accessor: F,
    rules: Rules<U>,
    _phantom: PhantomData<fn(&T) -> &U>,
}

impl<T, U, F> Declaration<T> for FieldDecl<T, U, F>
where
    T: 'static,
    U: ?Sized + 'static,
    F: Fn(&T) -> &U + Send + Sync,
{
    fn evaluate(
        &self,
        value: &T,
        table: &FieldTable,
    ) -> Result<(&'static str, RuleResult), InternalError> {
        let target = (self.accessor)(value);
        let name = table.resolve(value, target)?;
        Ok((name, self.rules.check(target)))
    }
}

struct WholeDecl<T> {
    rules: Rules<T>,
}

impl<T> Declaration<T> for WholeDecl<T> {
    fn evaluate(
        &self,
        value: &T,
        _table: &FieldTable,
    ) -> Result<(&'static str, RuleResult), InternalError> {
        Ok((WHOLE, self.rules.check(value)))
    }
}

struct ContextDecl<T, U: ?Sized, C, F> {
    accessor: F,
    context: C,
    rules: ContextRules<U, C>,
    _phantom: PhantomData<fn(&T) -> &U>,
}

impl<T, U, C, F> Declaration<T> for ContextDecl<T, U, C, F>
where
    T: 'static,
    U: ?Sized + 'static,
    C: Send + Sync,
    F: Fn(&T) -> &U + Send + Sync,
{
    fn evaluate(
        &self,
        value: &T,
        table: &FieldTable,
    ) -> Result<(&'static str, RuleResult), InternalError> {
        let target = (self.accessor)(value);
        let name = table.resolve(value, target)?;
        Ok((name, self.rules.check(target, &self.context)))
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects declarations for a [`StructRule`].
pub struct StructRuleBuilder<T> {
    naming: FieldNaming,
    declarations: Vec<Box<dyn Declaration<T>>>,
}

impl<T: Fields + 'static> StructRuleBuilder<T> {
    /// Sets how field names are rendered. Defaults to the declared name.
    #[must_use = "builder methods must be chained or built"]
    pub fn naming(mut self, naming: FieldNaming) -> Self {
        self.naming = naming;
        self
    }

    /// Declares rules for the field the accessor returns.
    ///
    /// The accessor must return a reference to a field of its argument,
    /// e.g. `|a| &a.country`, or the argument itself for cross-field rules
    /// reported under the empty name. Anything else fails validation with
    /// an internal error.
    #[must_use = "builder methods must be chained or built"]
    pub fn field<U, F>(mut self, accessor: F, rules: Rules<U>) -> Self
    where
        U: ?Sized + 'static,
        F: Fn(&T) -> &U + Send + Sync + 'static,
    {
        self.declarations.push(Box::new(FieldDecl {
            accessor,
            rules,
            _phantom: PhantomData,
        }));
        self
    }

    /// Declares rules over the whole struct, for cross-field checks.
    ///
    /// Failures are reported under the empty field name.
    #[must_use = "builder methods must be chained or built"]
    pub fn whole(mut self, rules: Rules<T>) -> Self {
        self.declarations.push(Box::new(WholeDecl { rules }));
        self
    }

    /// Declares context rules for a field, with the context they receive.
    #[must_use = "builder methods must be chained or built"]
    pub fn field_with_context<U, C, F>(
        mut self,
        accessor: F,
        context: C,
        rules: ContextRules<U, C>,
    ) -> Self
    where
        U: ?Sized + 'static,
        C: Send + Sync + 'static,
        F: Fn(&T) -> &U + Send + Sync + 'static,
    {
        self.declarations.push(Box::new(ContextDecl {
            accessor,
            context,
            rules,
            _phantom: PhantomData,
        }));
        self
    }

    /// Builds the field table and freezes the declarations.
    pub fn build(self) -> StructRule<T> {
        StructRule {
            table: FieldTable::new::<T>(&self.naming),
            declarations: self.declarations,
        }
    }
}

// ============================================================================
// STRUCT RULE
// ============================================================================

/// Validates a struct field by field.
///
/// Built once with [`StructRule::builder`] and reused; it is `Send + Sync`.
/// Being a [`Rule<T>`] itself, it can appear in another struct's field
/// rules to validate nested records.
pub struct StructRule<T> {
    table: FieldTable,
    declarations: Vec<Box<dyn Declaration<T>>>,
}

impl<T: Fields + 'static> StructRule<T> {
    pub fn builder() -> StructRuleBuilder<T> {
        StructRuleBuilder {
            naming: FieldNaming::default(),
            declarations: Vec::new(),
        }
    }

    /// Validates a type-erased value.
    ///
    /// A value that is not a `T` is an internal failure.
    pub fn check_dyn(&self, value: &dyn Any) -> RuleResult {
        let value = value
            .downcast_ref::<T>()
            .ok_or(InternalError::NotAStruct {
                expected: type_name::<T>(),
            })?;
        self.check(value)
    }
}

impl<T> StructRule<T> {
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl<T> Rule<T> for StructRule<T> {
    fn check(&self, value: &T) -> RuleResult {
        tracing::trace!(owner = self.table.owner(), "validating struct");

        let mut errors = ValidationErrors::new();

        for declaration in &self.declarations {
            let (name, outcome) = match declaration.evaluate(value, &self.table) {
                Ok(evaluated) => evaluated,
                Err(error) => {
                    tracing::debug!(
                        owner = self.table.owner(),
                        %error,
                        "field accessor could not be resolved"
                    );
                    return Err(error.into());
                }
            };

            match outcome {
                Ok(()) => {}
                Err(RuleError::Invalid(found)) => {
                    errors.push(FieldError::new(name, found));
                }
                Err(internal @ RuleError::Internal(_)) => {
                    tracing::debug!(
                        owner = self.table.owner(),
                        field = name,
                        error = %internal,
                        "struct validation aborted"
                    );
                    return Err(internal);
                }
            }
        }

        errors.into_result()
    }
}

impl<T> fmt::Debug for StructRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructRule")
            .field("owner", &self.table.owner())
            .field("fields", &self.table.len())
            .field("declarations", &self.declarations.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
