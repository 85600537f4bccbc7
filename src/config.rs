//! Configuration for the schema builder
//!
//! The builder config controls the defaults written into every inferred
//! mapping. It can be constructed in code or loaded from YAML/JSON.

use crate::error::{Error, Result};
use crate::mapping::{
    default_analyzer, default_datetime_parser, default_type, default_type_field, FieldMapping,
    IndexSchema,
};
use crate::types::{EmptyTagName, FieldType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// Builder Config
// ============================================================================

/// Schema builder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Handling of tags with an empty name segment, e.g. `",omitempty"`
    #[serde(default)]
    pub empty_tag_name: EmptyTagName,

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

    /// Flags applied to every inferred field mapping
    #[serde(default)]
    pub fields: FieldDefaults,

    /// Index-level handling of unmapped fields
    #[serde(default)]
    pub dynamic: DynamicConfig,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            empty_tag_name: EmptyTagName::default(),
            type_field: default_type_field(),
            default_type: default_type(),
            default_analyzer: default_analyzer(),
            default_datetime_parser: default_datetime_parser(),
            fields: FieldDefaults::default(),
            dynamic: DynamicConfig::default(),
        }
    }
}

impl BuilderConfig {
    /// Set the empty tag name policy
    #[must_use]
    pub fn with_empty_tag_name(mut self, policy: EmptyTagName) -> Self {
        self.empty_tag_name = policy;
        self
    }

    /// Set the default analyzer
    #[must_use]
    pub fn with_default_analyzer(mut self, analyzer: &str) -> Self {
        self.default_analyzer = analyzer.to_string();
        self
    }

    /// An empty index schema carrying these defaults
    pub fn empty_schema(&self) -> IndexSchema {
        IndexSchema {
            type_field: self.type_field.clone(),
            default_type: self.default_type.clone(),
            default_analyzer: self.default_analyzer.clone(),
            default_datetime_parser: self.default_datetime_parser.clone(),
            store_dynamic: self.dynamic.store,
            index_dynamic: self.dynamic.index,
            doc_values_dynamic: self.dynamic.doc_values,
            ..IndexSchema::new()
        }
    }

    /// The default field mapping for a field type
    pub fn field_mapping(&self, field_type: FieldType) -> FieldMapping {
        let mut mapping = FieldMapping::new(field_type);
        mapping.store = self.fields.store;
        mapping.index = self.fields.index;
        mapping.include_in_all = self.fields.include_in_all;
        mapping.doc_values = self.fields.doc_values;
        mapping.include_term_vectors =
            field_type == FieldType::Text && self.fields.include_term_vectors;
        mapping
    }
}

// ============================================================================
// Field Defaults
// ============================================================================

/// Flags applied to every inferred field mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefaults {
    /// Keep the original value
    #[serde(default = "default_true")]
    pub store: bool,

    /// Make the field searchable
    #[serde(default = "default_true")]
    pub index: bool,

    /// Include the field in the catch-all field
    #[serde(default = "default_true")]
    pub include_in_all: bool,

    /// Keep column-oriented values for sorting and aggregation
    #[serde(default = "default_true")]
    pub doc_values: bool,

    /// Only applies to text fields
    #[serde(default = "default_true")]
    pub include_term_vectors: bool,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            store: true,
            index: true,
            include_in_all: true,
            doc_values: true,
            include_term_vectors: true,
        }
    }
}

// ============================================================================
// Dynamic Config
// ============================================================================

/// Index-level handling of fields no mapping mentions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicConfig {
    /// Store unmapped values
    #[serde(default = "default_true")]
    pub store: bool,

    /// Index unmapped values
    #[serde(default = "default_true")]
    pub index: bool,

    /// Keep doc values for unmapped values
    #[serde(default = "default_true")]
    pub doc_values: bool,
}

impl Default for DynamicConfig {
    fn default() -> Self {
        Self {
            store: true,
            index: true,
            doc_values: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Loading
// ============================================================================

/// Load a builder config from a YAML or JSON file
///
/// JSON is chosen by a `.json` extension, anything else is read as YAML.
pub fn load_config(path: impl AsRef<Path>) -> Result<BuilderConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read builder config '{}': {}",
            path.display(),
            e
        ))
    })?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let config: BuilderConfig = serde_json::from_str(&content)?;
        validate_config(&config)?;
        Ok(config)
    } else {
        load_config_from_str(&content)
    }
}

/// Load a builder config from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<BuilderConfig> {
    let config: BuilderConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse builder config YAML: {e}")))?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate a builder config
fn validate_config(config: &BuilderConfig) -> Result<()> {
    if config.type_field.trim().is_empty() {
        return Err(Error::invalid_value("type_field", "cannot be empty"));
    }

    if config.type_field.contains('.') {
        return Err(Error::invalid_value(
            "type_field",
            format!("'{}' cannot contain '.'", config.type_field),
        ));
    }

    if config.default_type.trim().is_empty() {
        return Err(Error::invalid_value("default_type", "cannot be empty"));
    }

    if config.default_analyzer.trim().is_empty() {
        return Err(Error::invalid_value("default_analyzer", "cannot be empty"));
    }

    if config.default_datetime_parser.trim().is_empty() {
        return Err(Error::invalid_value(
            "default_datetime_parser",
            "cannot be empty",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_builder_config_default() {
        let config = BuilderConfig::default();
        assert_eq!(config.empty_tag_name, EmptyTagName::Skip);
        assert_eq!(config.type_field, "_type");
        assert_eq!(config.default_analyzer, "standard");
        assert!(config.fields.store);
        assert!(config.dynamic.index);
    }

    #[test]
    fn test_load_config_from_str_with_defaults() {
        let config = load_config_from_str("empty_tag_name: use_identifier\n").unwrap();
        assert_eq!(config.empty_tag_name, EmptyTagName::UseIdentifier);
        assert_eq!(config.default_type, "_default");
        assert_eq!(config.fields, FieldDefaults::default());
    }

    #[test]
    fn test_load_config_from_str_full() {
        let yaml = r"
empty_tag_name: use_identifier
type_field: kind
default_analyzer: en
fields:
  store: false
  doc_values: false
dynamic:
  index: false
";
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.type_field, "kind");
        assert_eq!(config.default_analyzer, "en");
        assert!(!config.fields.store);
        assert!(!config.fields.doc_values);
        assert!(config.fields.index);
        assert!(!config.dynamic.index);
        assert!(config.dynamic.store);
    }

    #[test]
    fn test_load_config_rejects_empty_type_field() {
        let err = load_config_from_str("type_field: ''\n").unwrap_err();
        assert!(err.to_string().contains("type_field"));
    }

    #[test]
    fn test_load_config_rejects_dotted_type_field() {
        let err = load_config_from_str("type_field: doc.type\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_load_config_rejects_bad_yaml() {
        let err = load_config_from_str("fields: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_load_config_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"default_analyzer": "keyword"}}"#).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.default_analyzer, "keyword");
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "default_datetime_parser: rfc3339").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.default_datetime_parser, "rfc3339");
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/indexafy.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read builder config"));
    }

    #[test]
    fn test_empty_schema_carries_defaults() {
        let mut config = BuilderConfig::default().with_default_analyzer("en");
        config.dynamic.store = false;

        let schema = config.empty_schema();
        assert_eq!(schema.default_analyzer, "en");
        assert!(!schema.store_dynamic);
        assert!(schema.index_dynamic);
        assert!(schema.types.is_empty());
    }

    #[test]
    fn test_field_mapping_applies_defaults() {
        let mut config = BuilderConfig::default();
        config.fields.store = false;
        config.fields.include_term_vectors = false;

        let text = config.field_mapping(FieldType::Text);
        assert!(!text.store);
        assert!(!text.include_term_vectors);

        let numeric = config.field_mapping(FieldType::Number);
        assert!(!numeric.store);
        assert!(numeric.index);
        assert!(!numeric.include_term_vectors);
    }
}
