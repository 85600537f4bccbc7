//! Engine adapter types

use crate::error::{Error, Result};
use crate::mapping::{FieldMapping, IndexSchema};
use crate::types::FieldType;
use std::collections::BTreeMap;
use tracing::warn;

/// A leaf field mapping at its absolute dotted path
#[derive(Debug, Clone, PartialEq)]
pub struct FlatField {
    /// Absolute dotted path, e.g. `author.name`
    pub path: String,
    /// The mapping that won for this path
    pub mapping: FieldMapping,
    /// Analyzer in effect for text fields: the field's own, the nearest
    /// document default, or the index default
    pub analyzer: Option<String>,
}

/// Flatten every document mapping of a schema into one field list
///
/// Records of different types share one engine schema, so a path used by
/// several types must agree on its field type. Differing options on the same
/// type keep the first mapping seen, in type name order.
pub fn flatten_schema(schema: &IndexSchema) -> Result<Vec<FlatField>> {
    let mut fields: BTreeMap<String, (String, FlatField)> = BTreeMap::new();

    for (type_name, document) in &schema.types {
        for (path, mapping, inherited) in document.flatten_with_analyzer() {
            if path == schema.type_field {
                return Err(Error::SchemaConflict {
                    path,
                    existing: "the type field".to_string(),
                    conflicting: format!("{} in '{}'", mapping.field_type, type_name),
                });
            }

            match fields.get(&path) {
                Some((owner, existing)) if existing.mapping.field_type != mapping.field_type => {
                    return Err(Error::SchemaConflict {
                        path,
                        existing: format!("{} in '{}'", existing.mapping.field_type, owner),
                        conflicting: format!("{} in '{}'", mapping.field_type, type_name),
                    });
                }
                Some((owner, existing)) => {
                    if &existing.mapping != mapping {
                        warn!(
                            "Field '{}' of '{}' differs from '{}', keeping the first mapping",
                            path, type_name, owner
                        );
                    }
                }
                None => {
                    let analyzer = (mapping.field_type == FieldType::Text).then(|| {
                        mapping
                            .analyzer
                            .as_deref()
                            .or(inherited)
                            .unwrap_or(&schema.default_analyzer)
                            .to_string()
                    });
                    let flat = FlatField {
                        path: path.clone(),
                        mapping: mapping.clone(),
                        analyzer,
                    };
                    fields.insert(path, (type_name.clone(), flat));
                }
            }
        }
    }

    Ok(fields.into_values().map(|(_, flat)| flat).collect())
}

/// Engine tokenizer name for an analyzer name
///
/// `standard` and `simple` map to the engine's default tokenizer, `keyword`
/// to the untokenized one and `en` to the built-in English stemmer. Other
/// names are passed through and must name a built-in tokenizer.
pub fn tokenizer_for(analyzer: &str) -> &str {
    match analyzer {
        "standard" | "simple" => "default",
        "keyword" => "raw",
        "en" => super::EN_STEM_TOKENIZER,
        other => other,
    }
}
