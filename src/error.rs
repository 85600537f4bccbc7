//! Error types for indexafy
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for indexafy
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Schema Build Errors
    // ============================================================================
    /// Two records in one batch resolve to the same type name
    #[error("Duplicate document type: {name}")]
    DuplicateTypeName {
        /// The shared type name
        name: String,
    },

    /// A value passed as a record does not describe a record
    #[error("Document must be a struct, got '{type_name}'")]
    NotAStruct {
        /// Name of the offending type
        type_name: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Config file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A config value failed validation
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Config key
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// YAML parse failure
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parse failure
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Index Engine Errors
    // ============================================================================
    /// One field path is mapped to two different field types
    #[error("Field '{path}' is mapped as {existing} and {conflicting}")]
    SchemaConflict {
        /// Absolute dotted path
        path: String,
        /// Type seen first
        existing: String,
        /// Type that clashed with it
        conflicting: String,
    },

    /// The search engine rejected a schema, document or index operation
    #[error("Index error: {message}")]
    Index {
        /// Engine error text
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a duplicate type name error
    pub fn duplicate_type(name: impl Into<String>) -> Self {
        Self::DuplicateTypeName { name: name.into() }
    }

    /// Create a not-a-struct error
    pub fn not_a_struct(type_name: impl Into<String>) -> Self {
        Self::NotAStruct {
            type_name: type_name.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an index engine error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index {
            message: message.into(),
        }
    }
}

/// Result type alias for indexafy
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::duplicate_type("User");
        assert_eq!(err.to_string(), "Duplicate document type: User");

        let err = Error::not_a_struct("i32");
        assert_eq!(err.to_string(), "Document must be a struct, got 'i32'");

        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::SchemaConflict {
            path: "age".to_string(),
            existing: "numeric".to_string(),
            conflicting: "text".to_string(),
        };
        assert_eq!(err.to_string(), "Field 'age' is mapped as numeric and text");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
