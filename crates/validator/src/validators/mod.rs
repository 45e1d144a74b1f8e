//! Built-in validators
//!
//! Ready-made rules for common checks. Every factory takes the message
//! reported on failure; messages may use `{param}` placeholders filled from
//! the error's parameters (`{min}`, `{actual}`, ...).
//!
//! # Categories
//!
//! - **String**: presence, length, patterns, email, case, digits, JSON
//! - **Network**: IPv4, IPv6, URL (feature `network`)
//! - **Numeric**: typed `min` / `max` / `between`, dynamic `range` over [`Bound`]
//! - **Collection**: size bounds, uniqueness
//! - **Nullable**: presence of optional values, membership
//!
//! # Examples
//!
//! ```rust,ignore
//! use fieldwise_validator::prelude::*;
//!
//! let username: Rules<str> = rules![
//!     required("cannot be blank"),
//!     length_range(3, 20, "must be {min} to {max} characters"),
//! ];
//!
//! let age = between(18_u32, 130, "must be between {low} and {high}");
//! let tags = rules![max_size(10, "at most {max} tags"), unique::<String>("duplicate tag")];
//! ```

// String validators
pub mod string;

// Network validators
#[cfg(feature = "network")]
pub mod network;

// Numeric validators
pub mod numeric;
pub mod range;

// Collection validators
pub mod collection;

// Logical validators
pub mod nullable;

// ============================================================================
// RE-EXPORTS: String validators
// ============================================================================

pub use string::{
    DigitsOnly, Email, Json, LengthRange, Lowercase, Matches, MaxLength, MinLength, Required,
    StartsUppercase, Uppercase, digits_only, email, json, length_range, lowercase, matches,
    max_length, min_length, required, starts_uppercase, uppercase,
};

// ============================================================================
// RE-EXPORTS: Network validators
// ============================================================================

#[cfg(feature = "network")]
pub use network::{Ip, Ipv4, Ipv6, Url, ip, ipv4, ipv6, url};

// ============================================================================
// RE-EXPORTS: Numeric validators
// ============================================================================

pub use numeric::{Between, Max, Min, between, max, min};

pub use range::{Bound, Ranged, at_least, at_most, range};

// ============================================================================
// RE-EXPORTS: Collection validators
// ============================================================================

pub use collection::{
    MaxSize, MinSize, SizeRange, Unique, max_size, min_size, size_range, unique, unique_by,
};

// ============================================================================
// RE-EXPORTS: Logical validators
// ============================================================================

pub use nullable::{OneOf, Present, one_of, present};
