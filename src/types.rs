//! Common types used throughout indexafy
//!
//! This module contains shared type definitions used across
//! the classifier, the schema builder, the mappings and the config.

use serde::{Deserialize, Serialize};

// ============================================================================
// Classification
// ============================================================================

/// Inferred kind of a field, used to pick its default indexing behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// `bool`
    Boolean,
    /// Integers and floats
    Numeric,
    /// Strings and chars
    Text,
    /// Instants
    DateTime,
    /// Not independently indexable: an unsupported leaf, or a record that
    /// has to be expanded into its own sub-document.
    Unclassified,
}

impl Classification {
    /// The engine field type for this classification, if it is indexable
    pub fn field_type(self) -> Option<FieldType> {
        match self {
            Classification::Boolean => Some(FieldType::Boolean),
            Classification::Numeric => Some(FieldType::Number),
            Classification::Text => Some(FieldType::Text),
            Classification::DateTime => Some(FieldType::DateTime),
            Classification::Unclassified => None,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Classification::Boolean => write!(f, "boolean"),
            Classification::Numeric => write!(f, "numeric"),
            Classification::Text => write!(f, "text"),
            Classification::DateTime => write!(f, "datetime"),
            Classification::Unclassified => write!(f, "unclassified"),
        }
    }
}

// ============================================================================
// Field Type
// ============================================================================

/// Field type as written into an index mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// `"boolean"`
    Boolean,
    /// `"number"`
    Number,
    /// `"text"`, analyzed
    Text,
    /// `"datetime"`
    DateTime,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Number => write!(f, "number"),
            FieldType::Text => write!(f, "text"),
            FieldType::DateTime => write!(f, "datetime"),
        }
    }
}

// ============================================================================
// Empty Tag Name
// ============================================================================

/// What to do with a field whose serialization tag has an empty name segment,
/// e.g. `",omitempty"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTagName {
    /// Leave the field out of the mapping
    #[default]
    Skip,
    /// Index the field under its identifier
    UseIdentifier,
}
