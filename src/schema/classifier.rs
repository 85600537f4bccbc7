//! Type classification
//!
//! Decides the default field kind of a type. Containers are unwrapped to
//! their element (sequences, arrays) or value (maps) type first.

use crate::describe::TypeDescriptor;
use crate::types::Classification;

/// Classify a type
///
/// | Type | Classification |
/// |------|----------------|
/// | `Bool` | `Boolean` |
/// | `Int`, `Float` (any width) | `Numeric` |
/// | `Text` | `Text` |
/// | `Instant` | `DateTime` |
/// | `Sequence`, `Array` | element classification |
/// | `Map` | value classification |
/// | `Record`, `Opaque` | `Unclassified` |
pub fn classify(ty: &TypeDescriptor) -> Classification {
    match leaf_type(ty) {
        TypeDescriptor::Bool => Classification::Boolean,
        TypeDescriptor::Int { .. } | TypeDescriptor::Float { .. } => Classification::Numeric,
        TypeDescriptor::Text => Classification::Text,
        TypeDescriptor::Instant => Classification::DateTime,
        _ => Classification::Unclassified,
    }
}

/// The type left after unwrapping all containers
pub fn leaf_type(ty: &TypeDescriptor) -> &TypeDescriptor {
    match ty {
        TypeDescriptor::Sequence(elem) | TypeDescriptor::Array(elem, _) => leaf_type(elem),
        TypeDescriptor::Map(_, value) => leaf_type(value),
        other => other,
    }
}
