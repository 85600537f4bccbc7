//! Mapping types

use crate::error::Result;
use crate::types::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Leaf-level indexing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Analyzer name, falls back to the document or index default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,

    /// Store the original value
    #[serde(default = "default_true")]
    pub store: bool,

    /// Make the value searchable
    #[serde(default = "default_true")]
    pub index: bool,

    /// Keep term positions (phrase queries, highlighting)
    #[serde(default)]
    pub include_term_vectors: bool,

    /// Include in the composite catch-all field
    #[serde(default = "default_true")]
    pub include_in_all: bool,

    /// Keep column-oriented values for sorting and aggregations
    #[serde(default = "default_true")]
    pub doc_values: bool,

    /// Date parser name for datetime fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

fn default_true() -> bool {
    true
}

impl FieldMapping {
    /// Create a mapping of the given type with every flag on
    ///
    /// Term vectors are only kept for text.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            analyzer: None,
            store: true,
            index: true,
            include_term_vectors: field_type == FieldType::Text,
            include_in_all: true,
            doc_values: true,
            date_format: None,
        }
    }

    /// Create a text field mapping
    pub fn text() -> Self {
        Self::new(FieldType::Text)
    }

    /// Create a numeric field mapping
    pub fn numeric() -> Self {
        Self::new(FieldType::Number)
    }

    /// Create a boolean field mapping
    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    /// Create a datetime field mapping
    pub fn datetime() -> Self {
        Self::new(FieldType::DateTime)
    }

    /// Set the analyzer
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: &str) -> Self {
        self.analyzer = Some(analyzer.to_string());
        self
    }
}

/// Indexing configuration of one record or nested record
///
/// Leaf fields are keyed by their path relative to the owning document's
/// parent: top-level fields by name, fields of a sub-document `Inner` as
/// `Inner.X`. Sub-documents are keyed by their resolved field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMapping {
    /// Whether documents of this shape are indexed at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether unmapped fields are indexed with inferred settings
    #[serde(default)]
    pub dynamic: bool,

    /// Nested document mappings
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, DocumentMapping>,

    /// Leaf field mappings
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldMapping>,

    /// Analyzer for text fields without their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_analyzer: Option<String>,
}

impl Default for DocumentMapping {
    fn default() -> Self {
        Self::new_static()
    }
}

impl DocumentMapping {
    /// Create an enabled mapping that indexes only explicitly mapped fields
    pub fn new_static() -> Self {
        Self {
            enabled: true,
            dynamic: false,
            properties: BTreeMap::new(),
            fields: BTreeMap::new(),
            default_analyzer: None,
        }
    }

    /// Create an enabled mapping that also indexes unmapped fields
    pub fn new_dynamic() -> Self {
        Self {
            dynamic: true,
            ..Self::new_static()
        }
    }

    /// Attach a leaf field mapping at a dotted path
    pub fn add_field_mapping_at(&mut self, path: impl Into<String>, mapping: FieldMapping) {
        self.fields.insert(path.into(), mapping);
    }

    /// Attach a nested document mapping under a name
    pub fn add_sub_document_mapping(&mut self, name: impl Into<String>, mapping: DocumentMapping) {
        self.properties.insert(name.into(), mapping);
    }

    /// Get a leaf field mapping by path
    pub fn field(&self, path: &str) -> Option<&FieldMapping> {
        self.fields.get(path)
    }

    /// Get a nested document mapping by name
    pub fn sub_document(&self, name: &str) -> Option<&DocumentMapping> {
        self.properties.get(name)
    }

    /// Check if neither fields nor sub-documents are mapped
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.properties.is_empty()
    }

    /// Number of leaf field mappings, including nested ones
    pub fn field_count(&self) -> usize {
        self.fields.len()
            + self
                .properties
                .values()
                .map(DocumentMapping::field_count)
                .sum::<usize>()
    }

    /// Leaf field mappings keyed by their absolute dotted path
    pub fn flatten(&self) -> Vec<(String, &FieldMapping)> {
        self.flatten_with_analyzer()
            .into_iter()
            .map(|(path, mapping, _)| (path, mapping))
            .collect()
    }

    /// Like `flatten`, with the nearest document default analyzer of each field
    pub fn flatten_with_analyzer(&self) -> Vec<(String, &FieldMapping, Option<&str>)> {
        let mut out = Vec::new();
        self.flatten_into("", "", None, &mut out);
        out
    }

    fn flatten_into<'a>(
        &'a self,
        parent: &str,
        own: &str,
        inherited: Option<&'a str>,
        out: &mut Vec<(String, &'a FieldMapping, Option<&'a str>)>,
    ) {
        if !self.enabled {
            return;
        }
        let analyzer = self.default_analyzer.as_deref().or(inherited);
        for (key, mapping) in &self.fields {
            out.push((join(parent, key), mapping, analyzer));
        }
        for (name, child) in &self.properties {
            child.flatten_into(own, &join(own, name), analyzer, out);
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Top-level index configuration: one document mapping per record type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSchema {
    /// Document mappings keyed by type name
    #[serde(default)]
    pub types: BTreeMap<String, DocumentMapping>,

    /// Mapping for documents of unknown type
    #[serde(default = "DocumentMapping::new_dynamic")]
    pub default_mapping: DocumentMapping,

    /// Name of the field carrying the document type
    #[serde(default = "default_type_field")]
    pub type_field: String,

    /// Type assumed for documents that carry none
    #[serde(default = "default_type")]
    pub default_type: String,

    /// Analyzer for text fields without their own
    #[serde(default = "default_analyzer")]
    pub default_analyzer: String,

    /// Parser for datetime fields without their own
    #[serde(default = "default_datetime_parser")]
    pub default_datetime_parser: String,

    /// Store values of dynamically mapped fields
    #[serde(default = "default_true")]
    pub store_dynamic: bool,

    /// Index values of dynamically mapped fields
    #[serde(default = "default_true")]
    pub index_dynamic: bool,

    /// Keep doc values of dynamically mapped fields
    #[serde(default = "default_true")]
    pub doc_values_dynamic: bool,
}

pub(crate) fn default_type_field() -> String {
    "_type".to_string()
}

pub(crate) fn default_type() -> String {
    "_default".to_string()
}

pub(crate) fn default_analyzer() -> String {
    "standard".to_string()
}

pub(crate) fn default_datetime_parser() -> String {
    "dateTimeOptional".to_string()
}

impl Default for IndexSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSchema {
    /// Create an empty schema with engine defaults
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
            default_mapping: DocumentMapping::new_dynamic(),
            type_field: default_type_field(),
            default_type: default_type(),
            default_analyzer: default_analyzer(),
            default_datetime_parser: default_datetime_parser(),
            store_dynamic: true,
            index_dynamic: true,
            doc_values_dynamic: true,
        }
    }

    /// Register the document mapping of a type
    pub fn add_document_mapping(&mut self, type_name: impl Into<String>, mapping: DocumentMapping) {
        self.types.insert(type_name.into(), mapping);
    }

    /// Get the document mapping of a type
    pub fn document_mapping(&self, type_name: &str) -> Option<&DocumentMapping> {
        self.types.get(type_name)
    }

    /// Registered type names in sorted order
    pub fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    /// Parse a schema from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
