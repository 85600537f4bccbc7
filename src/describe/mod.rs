//! Type description module
//!
//! Records describe their own shape instead of being reflected at runtime.
//!
//! # Overview
//!
//! The describe module provides:
//! - `Describe` - Per-type registration of a `TypeDescriptor`
//! - `Record` - Object-safe view of any describable value, used for batches
//! - `TypeDescriptor`, `StructDescriptor`, `FieldDescriptor` - The descriptor tree
//!
//! # Example
//!
//! ```
//! use indexafy::describe::{Describe, FieldDescriptor, TypeDescriptor};
//!
//! struct Person {
//!     first_name: String,
//!     age: u32,
//! }
//!
//! impl Describe for Person {
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::record("Person", || {
//!             vec![
//!                 FieldDescriptor::of::<String>("first_name").tag("firstName,omitempty"),
//!                 FieldDescriptor::of::<u32>("age"),
//!             ]
//!         })
//!     }
//! }
//!
//! assert_eq!(Person::describe().type_name(), "Person");
//! ```

mod impls;
mod types;

pub use types::{FieldDescriptor, StructDescriptor, TypeDescriptor};

/// Types that can describe their own shape
///
/// Implemented for the std scalars, strings, chrono instants, std containers
/// and pointer types. Record types implement it by returning
/// [`TypeDescriptor::record`]. Smart pointers, references and `Option`
/// describe as their target, which resolves indirection for type names.
pub trait Describe {
    /// The descriptor of this type
    fn describe() -> TypeDescriptor;
}

/// A value submitted to the schema builder
///
/// Blanket-implemented for every `Describe` type so heterogeneous records can
/// be passed as `&[&dyn Record]`.
pub trait Record {
    /// The descriptor of this value's type
    fn type_descriptor(&self) -> TypeDescriptor;

    /// The resolved type name of this value
    fn type_name(&self) -> String {
        self.type_descriptor().type_name()
    }
}

impl<T: Describe + ?Sized> Record for T {
    fn type_descriptor(&self) -> TypeDescriptor {
        T::describe()
    }
}

/// Resolved type name of a record, used as its document type
pub fn type_name_of(record: &dyn Record) -> String {
    record.type_name()
}

#[cfg(test)]
mod tests;
