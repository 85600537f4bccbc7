//! Field paths and field name resolution

use crate::describe::FieldDescriptor;
use crate::types::EmptyTagName;
use std::fmt;

/// Absolute position of a field inside a record, as a list of resolved names
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The path of the record itself
    pub fn root() -> Self {
        Self::default()
    }

    /// The path of a field directly under this one
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// The innermost segment, i.e. the name of the owning field
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Key of leaf `name` inside the document mapping at this path
    ///
    /// Leaves of the record itself are keyed by name; leaves of a nested
    /// document are qualified by the name of the field owning it.
    pub fn leaf_key(&self, name: &str) -> String {
        match self.last() {
            Some(owner) => format!("{owner}.{name}"),
            None => name.to_string(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Resolve the indexed name of a field
///
/// Returns `None` when the field must not be indexed: it is unexported, its
/// identifier is `_`, or its tag excludes it.
pub fn resolve_name(field: &FieldDescriptor, empty_tag_name: EmptyTagName) -> Option<String> {
    let ident = field.ident();
    if !field.is_exported() || ident == "_" {
        return None;
    }

    let Some(tag) = field.tag_value() else {
        return Some(ident.to_string());
    };

    match tag.split(',').next().unwrap_or_default() {
        "-" => None,
        "" => match empty_tag_name {
            EmptyTagName::UseIdentifier => Some(ident.to_string()),
            EmptyTagName::Skip => None,
        },
        name => Some(name.to_string()),
    }
}
