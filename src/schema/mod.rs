//! Schema inference module
//!
//! Infers index mappings from record descriptors.
//!
//! # Features
//!
//! - **Type Classification**: Maps leaf types to boolean, numeric, text or datetime
//! - **Container Unwrapping**: Sequences, arrays and maps classify as their element
//! - **Nested Records**: Expanded into sub-document mappings
//! - **Tag Naming**: Serialization tags rename or exclude fields
//! - **Override Policies**: Index, document and field level adjustments

mod builder;
mod classifier;
mod path;
mod policy;

pub use builder::SchemaBuilder;
pub use classifier::{classify, leaf_type};
pub use path::{resolve_name, FieldPath};
pub use policy::{Decision, DocumentPolicy, FieldPolicy, IndexPolicy, Override};
