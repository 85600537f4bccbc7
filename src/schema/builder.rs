//! Schema builder
//!
//! Walks record descriptors depth-first and assembles document mappings.

use super::classifier::classify;
use super::path::{resolve_name, FieldPath};
use super::policy::{DocumentPolicy, FieldPolicy, IndexPolicy};
use crate::config::BuilderConfig;
use crate::describe::{Record, StructDescriptor, TypeDescriptor};
use crate::error::{Error, Result};
use crate::mapping::{DocumentMapping, FieldMapping, IndexSchema};
use std::collections::HashSet;
use tracing::debug;

/// Builds index schemas from records
///
/// A builder holds its configuration and up to three override policies, all
/// fixed at construction. It keeps no state between builds.
#[derive(Default)]
pub struct SchemaBuilder {
    config: BuilderConfig,
    index_policy: Option<Box<dyn IndexPolicy>>,
    document_policy: Option<Box<dyn DocumentPolicy>>,
    field_policy: Option<Box<dyn FieldPolicy>>,
}

impl SchemaBuilder {
    /// Create a builder with the default config and no policies
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the builder configuration
    #[must_use]
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the index policy
    #[must_use]
    pub fn with_index_policy(mut self, policy: impl IndexPolicy + 'static) -> Self {
        self.index_policy = Some(Box::new(policy));
        self
    }

    /// Set the document policy
    #[must_use]
    pub fn with_document_policy(mut self, policy: impl DocumentPolicy + 'static) -> Self {
        self.document_policy = Some(Box::new(policy));
        self
    }

    /// Set the field policy
    #[must_use]
    pub fn with_field_policy(mut self, policy: impl FieldPolicy + 'static) -> Self {
        self.field_policy = Some(Box::new(policy));
        self
    }

    /// Get the builder configuration
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build an index schema with one document mapping per record type
    ///
    /// Fails with `DuplicateTypeName` if two records resolve to the same type
    /// name, and with `NotAStruct` if a record is not a composite type. Type
    /// names are checked for the whole batch before any mapping is built.
    pub fn build_schema(&self, records: &[&dyn Record]) -> Result<IndexSchema> {
        let mut names = HashSet::with_capacity(records.len());
        for record in records {
            let name = record.type_name();
            if !names.insert(name.clone()) {
                return Err(Error::duplicate_type(name));
            }
        }

        let mut schema = self.config.empty_schema();
        for record in records {
            let mapping = self.build_document_mapping(*record)?;
            let name = record.type_name();
            debug!(
                "Registered mapping for type '{}' ({} fields)",
                name,
                mapping.field_count()
            );
            schema.add_document_mapping(name, mapping);
        }

        if let Some(policy) = &self.index_policy {
            schema = policy.index_mapping(&schema).resolve(schema);
        }

        Ok(schema)
    }

    /// Build the document mapping of a single record
    pub fn build_document_mapping(&self, record: &dyn Record) -> Result<DocumentMapping> {
        let descriptor = record.type_descriptor();
        let Some(ty) = descriptor.as_record() else {
            return Err(Error::not_a_struct(descriptor.type_name()));
        };

        let Some(mut mapping) = self.default_document_mapping(ty) else {
            debug!("Document mapping for '{}' opted out", ty.name());
            return Ok(DocumentMapping::new_static());
        };

        let mut expanding = vec![*ty];
        self.build_field_mappings(&FieldPath::root(), ty, &mut mapping, &mut expanding);
        Ok(mapping)
    }

    /// Default static mapping for a record, passed through the document policy
    fn default_document_mapping(&self, ty: &StructDescriptor) -> Option<DocumentMapping> {
        let default = DocumentMapping::new_static();
        match &self.document_policy {
            Some(policy) => policy.document_mapping(ty, &default).resolve(default),
            None => Some(default),
        }
    }

    /// Default mapping for a leaf field, passed through the field policy
    fn default_field_mapping(&self, ty: &TypeDescriptor) -> Option<FieldMapping> {
        let field_type = classify(ty).field_type()?;
        let default = self.config.field_mapping(field_type);
        match &self.field_policy {
            Some(policy) => policy.field_mapping(ty, &default).resolve(default),
            None => Some(default),
        }
    }

    /// Add mappings for the fields of `ty` to `mapping`
    ///
    /// `path` is the absolute path of the document being filled and
    /// `expanding` holds the records on that path, so recursive types stop.
    /// Records are compared by identity, not by name alone.
    fn build_field_mappings(
        &self,
        path: &FieldPath,
        ty: &StructDescriptor,
        mapping: &mut DocumentMapping,
        expanding: &mut Vec<StructDescriptor>,
    ) {
        for field in ty.fields() {
            let Some(name) = resolve_name(&field, self.config.empty_tag_name) else {
                continue;
            };

            if let Some(nested) = field.ty().as_record() {
                if expanding.contains(nested) {
                    debug!(
                        "Skipping field '{}': record '{}' is already being expanded",
                        path.child(&name),
                        nested.name()
                    );
                    continue;
                }

                let child_path = path.child(&name);
                let sub = match self.default_document_mapping(nested) {
                    Some(mut sub) => {
                        expanding.push(*nested);
                        self.build_field_mappings(&child_path, nested, &mut sub, expanding);
                        expanding.pop();
                        sub
                    }
                    None => {
                        debug!("Sub-document mapping for '{}' opted out", child_path);
                        DocumentMapping::new_static()
                    }
                };
                debug!("Added sub-document mapping '{}'", child_path);
                mapping.add_sub_document_mapping(name, sub);
                continue;
            }

            if let Some(field_mapping) = self.default_field_mapping(field.ty()) {
                let key = path.leaf_key(&name);
                debug!(
                    "Added mapping for field '{}': {}",
                    path.child(&name),
                    field_mapping.field_type
                );
                mapping.add_field_mapping_at(key, field_mapping);
            }
        }
    }
}

impl std::fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("config", &self.config)
            .field("index_policy", &self.index_policy.is_some())
            .field("document_policy", &self.document_policy.is_some())
            .field("field_policy", &self.field_policy.is_some())
            .finish()
    }
}
