//! Override policies
//!
//! Three optional policies let callers adjust what the builder infers:
//!
//! - [`IndexPolicy`] sees the assembled schema once per build
//! - [`DocumentPolicy`] sees each record and nested record mapping
//! - [`FieldPolicy`] sees each leaf field mapping
//!
//! Each policy is implemented for closures of the matching signature.

use crate::describe::{StructDescriptor, TypeDescriptor};
use crate::mapping::{DocumentMapping, FieldMapping, IndexSchema};

/// Outcome of a document or field policy
#[derive(Debug, Clone, PartialEq)]
pub enum Decision<T> {
    /// Use the default mapping unchanged
    Keep,
    /// Use this mapping instead
    Replace(T),
    /// Do not index this document or field
    OptOut,
}

impl<T> Decision<T> {
    /// Apply the decision to a default, `None` means opted out
    pub fn resolve(self, default: T) -> Option<T> {
        match self {
            Decision::Keep => Some(default),
            Decision::Replace(value) => Some(value),
            Decision::OptOut => None,
        }
    }
}

/// Outcome of an index policy
#[derive(Debug, Clone, PartialEq)]
pub enum Override<T> {
    /// Use the assembled schema unchanged
    Keep,
    /// Use this schema instead
    Replace(T),
}

impl<T> Override<T> {
    /// Apply the override to a default
    pub fn resolve(self, default: T) -> T {
        match self {
            Override::Keep => default,
            Override::Replace(value) => value,
        }
    }
}

/// Adjusts the assembled index schema
pub trait IndexPolicy: Send + Sync {
    /// Decide on the final schema, given the one the builder assembled
    fn index_mapping(&self, schema: &IndexSchema) -> Override<IndexSchema>;
}

/// Adjusts the mapping of a record or nested record before its fields are added
pub trait DocumentPolicy: Send + Sync {
    /// Decide on the mapping of `record`, given its default
    fn document_mapping(
        &self,
        record: &StructDescriptor,
        default: &DocumentMapping,
    ) -> Decision<DocumentMapping>;
}

/// Adjusts the mapping of a leaf field
///
/// `ty` is the declared field type, before containers are unwrapped.
pub trait FieldPolicy: Send + Sync {
    /// Decide on the mapping of a field of type `ty`, given its default
    fn field_mapping(&self, ty: &TypeDescriptor, default: &FieldMapping) -> Decision<FieldMapping>;
}

impl<F> IndexPolicy for F
where
    F: Fn(&IndexSchema) -> Override<IndexSchema> + Send + Sync,
{
    fn index_mapping(&self, schema: &IndexSchema) -> Override<IndexSchema> {
        self(schema)
    }
}

impl<F> DocumentPolicy for F
where
    F: Fn(&StructDescriptor, &DocumentMapping) -> Decision<DocumentMapping> + Send + Sync,
{
    fn document_mapping(
        &self,
        record: &StructDescriptor,
        default: &DocumentMapping,
    ) -> Decision<DocumentMapping> {
        self(record, default)
    }
}

impl<F> FieldPolicy for F
where
    F: Fn(&TypeDescriptor, &FieldMapping) -> Decision<FieldMapping> + Send + Sync,
{
    fn field_mapping(&self, ty: &TypeDescriptor, default: &FieldMapping) -> Decision<FieldMapping> {
        self(ty, default)
    }
}
