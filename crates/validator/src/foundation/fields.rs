//! Per-struct field metadata and name resolution
//!
//! A struct opts into field-level validation by describing its fields with
//! the [`fields!`](crate::fields) macro. The struct engine turns that
//! description into a [`FieldTable`] once, then names every failing field
//! by where the accessor's reference points inside the value.

use crate::foundation::error::InternalError;
use serde::Deserialize;
use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::collections::HashMap;
use std::mem::{size_of, size_of_val};
use std::ptr;

// ============================================================================
// FIELD METADATA
// ============================================================================

/// Compile-time facts about one field of a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Name as written in the struct definition.
    pub name: &'static str,
    /// Byte offset from the start of the struct.
    pub offset: usize,
    /// Byte size of the field's type.
    pub size: usize,
    /// Naming tags, e.g. `[("json", "zipCode")]`.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldInfo {
    pub const fn new(name: &'static str, offset: usize, size: usize) -> Self {
        Self {
            name,
            offset,
            size,
            tags: &[],
        }
    }

    #[must_use]
    pub const fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    /// Returns the value of a naming tag.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }
}

/// Types whose fields can be named by the struct engine.
///
/// Implement it with the [`fields!`](crate::fields) macro rather than by
/// hand; offsets and sizes must match the real layout.
pub trait Fields {
    fn fields() -> Vec<FieldInfo>;
}

/// Returns the size of the field an accessor points at.
///
/// Used by [`fields!`](crate::fields) to learn field types without naming them.
#[doc(hidden)]
pub fn size_of_field<T, F>(_accessor: fn(&T) -> &F) -> usize {
    size_of::<F>()
}

// ============================================================================
// NAMING POLICY
// ============================================================================

/// How field names appear in errors.
///
/// Deserializable, so the choice can come from configuration:
/// `"declared"` or `{ "tag": "json" }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldNaming {
    /// The name as written in the struct definition.
    #[default]
    Declared,
    /// The value of the named tag, or the declared name when the field has
    /// no such tag (or an empty one).
    Tag(Cow<'static, str>),
}

impl FieldNaming {
    pub fn tag(tag: impl Into<Cow<'static, str>>) -> Self {
        Self::Tag(tag.into())
    }

    /// Resolves the external name of a field.
    pub fn resolve(&self, info: &FieldInfo) -> &'static str {
        match self {
            Self::Declared => info.name,
            Self::Tag(tag) => info
                .tag(tag)
                .filter(|value| !value.is_empty())
                .unwrap_or(info.name),
        }
    }
}

// ============================================================================
// FIELD TABLE
// ============================================================================

/// Name of the struct itself, for whole-struct and cross-field rules.
pub(crate) const WHOLE: &str = "";

/// Offset-to-name lookup for one struct type.
#[derive(Debug, Clone)]
pub(crate) struct FieldTable {
    owner: &'static str,
    size: usize,
    names: HashMap<usize, (&'static str, usize)>,
}

impl FieldTable {
    /// Builds the table for `T`.
    ///
    /// Zero-sized fields are skipped: they share offsets with their
    /// neighbours and cannot be told apart by address.
    pub(crate) fn new<T: Fields>(naming: &FieldNaming) -> Self {
        let names: HashMap<_, _> = T::fields()
            .iter()
            .filter(|info| info.size > 0)
            .map(|info| (info.offset, (naming.resolve(info), info.size)))
            .collect();

        tracing::debug!(
            owner = type_name::<T>(),
            fields = names.len(),
            ?naming,
            "built field table"
        );

        Self {
            owner: type_name::<T>(),
            size: size_of::<T>(),
            names,
        }
    }

    pub(crate) fn owner(&self) -> &'static str {
        self.owner
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    /// Names the field `target` points at inside `base`.
    ///
    /// A reference to `base` itself names the whole struct, the empty name.
    /// Otherwise offset and size must both match a declared field, so a
    /// reference to the first member of a nested struct does not pass for
    /// the struct.
    pub(crate) fn resolve<T: 'static, U: ?Sized + 'static>(
        &self,
        base: &T,
        target: &U,
    ) -> Result<&'static str, InternalError> {
        let base_addr = ptr::from_ref(base).addr();
        let target_addr = ptr::from_ref(target).cast::<u8>().addr();

        // a newtype's only field has the struct's address and size
        if target_addr == base_addr && TypeId::of::<U>() == TypeId::of::<T>() {
            return Ok(WHOLE);
        }

        let offset = target_addr
            .checked_sub(base_addr)
            .filter(|offset| {
                offset
                    .checked_add(size_of_val(target))
                    .is_some_and(|end| end <= self.size)
            })
            .ok_or(InternalError::ForeignReference { owner: self.owner })?;

        self.names
            .get(&offset)
            .filter(|(_, size)| *size == size_of_val(target))
            .map(|(name, _)| *name)
            .ok_or(InternalError::UnknownField {
                owner: self.owner,
                offset,
            })
    }
}

// ============================================================================
// TESTS
// ============================================================================
