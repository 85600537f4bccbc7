//! Index mapping module
//!
//! The output of schema inference, in the layout an index engine consumes.
//!
//! # Overview
//!
//! - `FieldMapping` - Leaf configuration (type, analyzer, storage flags)
//! - `DocumentMapping` - Tree node for a record or nested record
//! - `IndexSchema` - One document mapping per record type, plus index defaults

mod types;

pub use types::{DocumentMapping, FieldMapping, IndexSchema};

pub(crate) use types::{default_analyzer, default_datetime_parser, default_type, default_type_field};
