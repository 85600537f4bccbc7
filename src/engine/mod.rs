//! Index engine adapter
//!
//! Creates a tantivy index from an inferred [`IndexSchema`] and adds records
//! to it.
//!
//! # Overview
//!
//! - `EngineSchema` - The tantivy schema of an index schema, with a field
//!   handle per absolute dotted path
//! - `SchemaIndex` - An open index and writer
//! - `build_index` - Infer the schema of a batch of records and create an
//!   index from it
//!
//! All document types share one tantivy schema. The type name of each added
//! record goes into the type field (`_type` unless configured otherwise).
//!
//! # Field Types
//!
//! | Mapping    | Engine field                      |
//! |------------|-----------------------------------|
//! | `text`     | text, tokenized by its analyzer   |
//! | `number`   | f64                               |
//! | `boolean`  | bool                              |
//! | `datetime` | date                              |
//!
//! Doc values apply to numeric, boolean and datetime fields.

mod types;

pub use types::{flatten_schema, tokenizer_for, FlatField};

use crate::describe::Record;
use crate::error::{Error, Result};
use crate::mapping::{FieldMapping, IndexSchema};
use crate::schema::{FieldPath, SchemaBuilder};
use crate::types::FieldType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tantivy::schema::{
    DateOptions, Field, IndexRecordOption, NumericOptions, Schema, TextFieldIndexing,
    TextOptions, STORED, STRING,
};
use tantivy::tokenizer::TokenizerManager;
use tantivy::{Index, IndexWriter, TantivyDocument};
use tracing::{debug, info};

/// Name of tantivy's built-in English stemming tokenizer, used for the `en`
/// analyzer
pub const EN_STEM_TOKENIZER: &str = "en_stem";

/// Index writer buffer size (50MB)
const WRITER_BUFFER_SIZE: usize = 50_000_000;

// ============================================================================
// Engine Schema
// ============================================================================

/// An engine field and the mapping type it was created for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineField {
    /// Tantivy field handle
    pub field: Field,
    /// Mapping type the field was created for
    pub field_type: FieldType,
}

/// Tantivy schema derived from an index schema
#[derive(Debug, Clone)]
pub struct EngineSchema {
    schema: Schema,
    fields: HashMap<String, EngineField>,
    type_field: Field,
}

impl EngineSchema {
    /// Build the tantivy schema of an index schema
    ///
    /// Fails with `SchemaConflict` when two document types map one path to
    /// different field types, and with `Index` when a text field names an
    /// analyzer the engine has no tokenizer for.
    pub fn build(index_schema: &IndexSchema) -> Result<Self> {
        let tokenizers = TokenizerManager::default();
        let mut builder = Schema::builder();
        let mut fields = HashMap::new();

        for flat in flatten_schema(index_schema)? {
            let field = match flat.mapping.field_type {
                FieldType::Text => {
                    let analyzer = flat
                        .analyzer
                        .as_deref()
                        .unwrap_or(&index_schema.default_analyzer);
                    let tokenizer = tokenizer_for(analyzer);
                    if tokenizers.get(tokenizer).is_none() {
                        return Err(Error::index(format!(
                            "Unknown analyzer '{}' for field '{}'",
                            analyzer, flat.path
                        )));
                    }
                    builder.add_text_field(&flat.path, text_options(&flat.mapping, tokenizer))
                }
                FieldType::Number => {
                    builder.add_f64_field(&flat.path, numeric_options(&flat.mapping))
                }
                FieldType::Boolean => {
                    builder.add_bool_field(&flat.path, numeric_options(&flat.mapping))
                }
                FieldType::DateTime => {
                    builder.add_date_field(&flat.path, date_options(&flat.mapping))
                }
            };
            debug!("Engine field '{}': {}", flat.path, flat.mapping.field_type);
            fields.insert(
                flat.path,
                EngineField {
                    field,
                    field_type: flat.mapping.field_type,
                },
            );
        }

        let type_field = builder.add_text_field(&index_schema.type_field, STRING | STORED);

        Ok(Self {
            schema: builder.build(),
            fields,
            type_field,
        })
    }

    /// Get the underlying tantivy schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Get the engine field of an absolute dotted path
    pub fn field(&self, path: &str) -> Option<EngineField> {
        self.fields.get(path).copied()
    }

    /// Get the type discriminator field
    pub fn type_field(&self) -> Field {
        self.type_field
    }

    /// Number of mapped fields, excluding the type field
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Add every value of a JSON document found at a mapped path
    fn collect(&self, path: &FieldPath, value: &Value, doc: &mut TantivyDocument) {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    self.collect(path, item, doc);
                }
            }
            Value::Object(entries) => match self.fields.get(&path.to_string()) {
                // A mapped object is a map or an instant, not a sub-document
                Some(field) => add_object(*field, path, value, doc),
                None => {
                    for (key, item) in entries {
                        self.collect(&path.child(key), item, doc);
                    }
                }
            },
            scalar => {
                if let Some(field) = self.fields.get(&path.to_string()) {
                    add_scalar(*field, path, scalar, doc);
                }
            }
        }
    }
}

fn text_options(mapping: &FieldMapping, tokenizer: &str) -> TextOptions {
    let mut options = TextOptions::default();
    if mapping.index {
        let record = if mapping.include_term_vectors {
            IndexRecordOption::WithFreqsAndPositions
        } else {
            IndexRecordOption::WithFreqs
        };
        options = options.set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(tokenizer)
                .set_index_option(record),
        );
    }
    if mapping.store {
        options = options.set_stored();
    }
    options
}

fn numeric_options(mapping: &FieldMapping) -> NumericOptions {
    let mut options = NumericOptions::default();
    if mapping.index {
        options = options.set_indexed();
    }
    if mapping.store {
        options = options.set_stored();
    }
    if mapping.doc_values {
        options = options.set_fast();
    }
    options
}

fn date_options(mapping: &FieldMapping) -> DateOptions {
    let mut options = DateOptions::default();
    if mapping.index {
        options = options.set_indexed();
    }
    if mapping.store {
        options = options.set_stored();
    }
    if mapping.doc_values {
        options = options.set_fast();
    }
    options
}

fn add_object(field: EngineField, path: &FieldPath, value: &Value, doc: &mut TantivyDocument) {
    if field.field_type == FieldType::DateTime {
        if let Some(instant) = system_time(value) {
            doc.add_date(field.field, to_engine_date(instant));
            return;
        }
    }

    match value {
        Value::Object(entries) => {
            for item in entries.values() {
                add_object(field, path, item, doc);
            }
        }
        Value::Array(items) => {
            for item in items {
                add_object(field, path, item, doc);
            }
        }
        Value::Null => {}
        scalar => add_scalar(field, path, scalar, doc),
    }
}

fn add_scalar(field: EngineField, path: &FieldPath, value: &Value, doc: &mut TantivyDocument) {
    let added = match (field.field_type, value) {
        (FieldType::Text, Value::String(text)) => {
            doc.add_text(field.field, text);
            true
        }
        (FieldType::Text, Value::Number(_) | Value::Bool(_)) => {
            doc.add_text(field.field, value.to_string());
            true
        }
        (FieldType::Number, Value::Number(number)) => match number.as_f64() {
            Some(number) => {
                doc.add_f64(field.field, number);
                true
            }
            None => false,
        },
        (FieldType::Boolean, Value::Bool(flag)) => {
            doc.add_bool(field.field, *flag);
            true
        }
        (FieldType::DateTime, Value::String(text)) => match parse_datetime(text) {
            Some(instant) => {
                doc.add_date(field.field, to_engine_date(instant));
                true
            }
            None => false,
        },
        _ => false,
    };

    if !added {
        debug!("Skipping value at '{}': not a {} value", path, field.field_type);
    }
}

/// Parse an RFC 3339 timestamp, a naive datetime or a plain date as UTC
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Serialized form of `std::time::SystemTime`
fn system_time(value: &Value) -> Option<DateTime<Utc>> {
    let secs = value.get("secs_since_epoch")?.as_i64()?;
    let nanos = value.get("nanos_since_epoch")?.as_u64()?;
    DateTime::from_timestamp(secs, u32::try_from(nanos).ok()?)
}

fn to_engine_date(instant: DateTime<Utc>) -> tantivy::DateTime {
    tantivy::DateTime::from_timestamp_micros(instant.timestamp_micros())
}

// ============================================================================
// Schema Index
// ============================================================================

/// An open index built from an index schema
pub struct SchemaIndex {
    index: Index,
    writer: IndexWriter,
    schema: IndexSchema,
    engine: EngineSchema,
}

impl SchemaIndex {
    /// Create a new index in a directory
    ///
    /// The directory is created if missing. Fails if it already holds an
    /// index.
    pub fn create_in_dir(path: impl AsRef<Path>, schema: IndexSchema) -> Result<Self> {
        let path = path.as_ref();
        let engine = EngineSchema::build(&schema)?;

        std::fs::create_dir_all(path)?;
        let index = Index::create_in_dir(path, engine.schema().clone()).map_err(|e| {
            Error::index(format!("Failed to create index at {}: {e}", path.display()))
        })?;

        info!(
            "Created index at {} ({} types, {} fields)",
            path.display(),
            schema.types.len(),
            engine.field_count()
        );
        Self::open(index, schema, engine)
    }

    /// Create a new in-memory index
    pub fn create_in_ram(schema: IndexSchema) -> Result<Self> {
        let engine = EngineSchema::build(&schema)?;
        let index = Index::create_in_ram(engine.schema().clone());
        Self::open(index, schema, engine)
    }

    fn open(index: Index, schema: IndexSchema, engine: EngineSchema) -> Result<Self> {
        let writer = index
            .writer_with_num_threads(1, WRITER_BUFFER_SIZE)
            .map_err(|e| Error::index(format!("Failed to create index writer: {e}")))?;

        Ok(Self {
            index,
            writer,
            schema,
            engine,
        })
    }

    /// Add a record as a document
    ///
    /// The record is walked through its serde JSON form. Values at paths the
    /// schema does not map are ignored. The document is searchable after
    /// `commit`.
    pub fn add_document<R>(&mut self, record: &R) -> Result<()>
    where
        R: Record + Serialize + ?Sized,
    {
        let value = serde_json::to_value(record)?;
        let type_name = record.type_name();

        let mut doc = TantivyDocument::new();
        doc.add_text(self.engine.type_field(), &type_name);
        self.engine.collect(&FieldPath::root(), &value, &mut doc);

        self.writer
            .add_document(doc)
            .map_err(|e| Error::index(format!("Failed to add '{type_name}' document: {e}")))?;
        Ok(())
    }

    /// Commit added documents
    pub fn commit(&mut self) -> Result<()> {
        self.writer
            .commit()
            .map_err(|e| Error::index(format!("Failed to commit index: {e}")))?;
        Ok(())
    }

    /// Get the underlying tantivy index
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Get the index schema the index was created from
    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    /// Get the engine schema
    pub fn engine_schema(&self) -> &EngineSchema {
        &self.engine
    }

    /// Get the engine field of an absolute dotted path, excluding the type field
    pub fn field(&self, path: &str) -> Option<Field> {
        self.engine.field(path).map(|f| f.field)
    }
}

impl std::fmt::Debug for SchemaIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaIndex")
            .field("index", &"<tantivy::Index>")
            .field("types", &self.schema.type_names())
            .field("fields", &self.engine.field_count())
            .finish()
    }
}

/// Build the schema of a batch of records and create an index from it
///
/// Returns the open index, ready for `add_document`.
pub fn build_index(
    path: impl AsRef<Path>,
    builder: &SchemaBuilder,
    records: &[&dyn Record],
) -> Result<SchemaIndex> {
    let schema = builder.build_schema(records)?;
    SchemaIndex::create_in_dir(path, schema)
}
