//! Macros for declaring rules and field metadata with minimal boilerplate.
//!
//! # Available Macros
//!
//! - [`rules!`]: AND-compose rules into a [`Rules`](crate::combinators::Rules) list
//! - [`fields!`]: describe a struct's fields for the struct engine
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
//! fields!(Address {
//!     country(json = "country"),
//!     zip_code(json = "zipCode"),
//! });
//!
//! let rule = StructRule::<Address>::builder()
//!     .naming(FieldNaming::tag("json"))
//!     .field(|a| &a.country, rules![required("cannot be blank")])
//!     .field(|a| &a.zip_code, rules![digits_only("digits only")])
//!     .build();
//! ```

// ============================================================================
// RULES MACRO
// ============================================================================

/// Composes rules using AND logic with full error accumulation.
///
/// Expands to `Rules::new().with(a).with(b)...`. The input type is inferred
/// from where the list is used; annotate it when standing alone.
///
/// ```rust,ignore
/// let name: Rules<str> = rules![required("required"), max_length(20, "too long")];
/// ```
#[macro_export]
macro_rules! rules {
    () => {
        $crate::combinators::Rules::new()
    };
    ($($rule:expr),+ $(,)?) => {
        $crate::combinators::Rules::new()$(.with($rule))+
    };
}

// ============================================================================
// FIELDS MACRO
// ============================================================================

/// Implements [`Fields`](crate::foundation::Fields) for a struct.
///
/// List the fields that rules will point at, each optionally followed by
/// naming tags. Offsets come from `core::mem::offset_of!`, so the macro must
/// be invoked where the fields are visible.
///
/// ```rust,ignore
/// struct User {
///     name: String,
///     address: Address,
/// }
///
/// fields!(User {
///     name(json = "name", xml = "Name"),
///     address,
/// });
/// ```
#[macro_export]
macro_rules! fields {
    (
        $ty:ty {
            $(
                $field:ident $( ( $( $tag:ident = $value:literal ),* $(,)? ) )?
            ),* $(,)?
        }
    ) => {
        impl $crate::foundation::Fields for $ty {
            fn fields() -> ::std::vec::Vec<$crate::foundation::FieldInfo> {
                ::std::vec![
                    $(
                        $crate::foundation::FieldInfo::new(
                            ::core::stringify!($field),
                            ::core::mem::offset_of!($ty, $field),
                            $crate::foundation::fields::size_of_field(|value: &$ty| &value.$field),
                        )
                        $( .with_tags(&[ $( (::core::stringify!($tag), $value) ),* ]) )?
                    ),*
                ]
            }
        }
    };
}

// ============================================================================
// STRING RULE MACRO
// ============================================================================

/// Declares a message-only string predicate: struct, `Rule` impl over every
/// `AsValidatable<str>` input, and a factory function.
macro_rules! string_rule {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident => $code:literal;
        rule($inp:ident) $rule:block
        fn $factory:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name {
            message: ::std::borrow::Cow<'static, str>,
        }

        impl $name {
            /// Creates the rule with the message reported on failure.
            pub fn new(message: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                Self {
                    message: message.into(),
                }
            }
        }

        impl<S> $crate::foundation::Rule<S> for $name
        where
            S: $crate::foundation::AsValidatable<str> + ?Sized,
        {
            fn check(&self, input: &S) -> $crate::foundation::RuleResult {
                let converted = input.as_validatable()?;
                let $inp: &str = ::std::borrow::Borrow::borrow(&converted);
                if $rule {
                    Ok(())
                } else {
                    Err($crate::foundation::ValidationError::new($code, self.message.clone()).into())
                }
            }
        }

        #[doc = concat!("Creates a [`", stringify!($name), "`] rule.")]
        #[must_use]
        $vis fn $factory(message: impl Into<::std::borrow::Cow<'static, str>>) -> $name {
            $name::new(message)
        }
    };
}

pub(crate) use string_rule;

// ============================================================================
// TESTS
// ============================================================================
