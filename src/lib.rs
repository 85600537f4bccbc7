// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # Indexafy
//!
//! Infers full-text search index mappings from the shape of typed records.
//!
//! ## Features
//!
//! - **Self-describing Records**: Types register their shape through `Describe`
//! - **Type Classification**: Boolean, numeric, text and datetime leaf fields
//! - **Nested Records**: Expanded into sub-document mappings at dotted paths
//! - **Serialization Tags**: Rename or exclude fields with json-style tags
//! - **Override Policies**: Adjust the index, document or field mappings
//! - **Tantivy Adapter**: Create an index straight from the inferred schema
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use indexafy::{build_index, Describe, FieldDescriptor, SchemaBuilder, TypeDescriptor};
//!
//! #[derive(serde::Serialize)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Describe for Person {
//!     fn describe() -> TypeDescriptor {
//!         TypeDescriptor::record("Person", || {
//!             vec![
//!                 FieldDescriptor::of::<String>("name"),
//!                 FieldDescriptor::of::<u32>("age"),
//!             ]
//!         })
//!     }
//! }
//!
//! let person = Person { name: "Ada".into(), age: 36 };
//! let mut index = build_index("people.idx", &SchemaBuilder::new(), &[&person])?;
//! index.add_document(&person)?;
//! index.commit()?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 SchemaBuilder::build_schema                     │
//! │        &[&dyn Record] → IndexSchema (one mapping per type)      │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────┬────────────────┴───┬──────────────┬───────────────┐
//! │  Describe   │    Classifier      │   Policies   │    Engine     │
//! ├─────────────┼────────────────────┼──────────────┼───────────────┤
//! │ Scalars     │ Boolean            │ Index        │ Tantivy schema│
//! │ Containers  │ Numeric            │ Document     │ Documents     │
//! │ Pointers    │ Text               │ Field        │ Analyzers     │
//! │ Records     │ DateTime           │              │               │
//! └─────────────┴────────────────────┴──────────────┴───────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Self-describing record types
pub mod describe;

/// Index, document and field mappings
pub mod mapping;

/// Builder configuration
pub mod config;

/// Schema inference from record descriptors
pub mod schema;

/// Tantivy index adapter
#[cfg(feature = "tantivy-engine")]
pub mod engine;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{load_config, load_config_from_str, BuilderConfig};
pub use describe::{
    type_name_of, Describe, FieldDescriptor, Record, StructDescriptor, TypeDescriptor,
};
pub use mapping::{DocumentMapping, FieldMapping, IndexSchema};
pub use schema::{Decision, DocumentPolicy, FieldPolicy, IndexPolicy, Override, SchemaBuilder};

#[cfg(feature = "tantivy-engine")]
pub use engine::{build_index, SchemaIndex};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
