//! Type and field descriptors

use std::fmt;

/// Static description of a type, as seen by the classifier and the builder
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// `bool`
    Bool,
    /// Integer of the given width
    Int {
        /// Whether negative values are representable
        signed: bool,
        /// Width, the platform width for pointer-sized integers
        bits: u32,
    },
    /// Floating point number
    Float {
        /// Width
        bits: u32,
    },
    /// Strings and chars
    Text,
    /// The distinguished instant-in-time type
    Instant,
    /// A composite type with named fields
    Record(StructDescriptor),
    /// Growable list of elements
    Sequence(Box<TypeDescriptor>),
    /// Fixed-length list of elements, with its length
    Array(Box<TypeDescriptor>, usize),
    /// Key-value container, key first
    Map(Box<TypeDescriptor>, Box<TypeDescriptor>),
    /// Anything the classifier cannot index: raw pointers, channels, functions
    Opaque(&'static str),
}

impl TypeDescriptor {
    /// Describe a record type from its name and a field list producer
    pub fn record(name: &'static str, fields: fn() -> Vec<FieldDescriptor>) -> Self {
        TypeDescriptor::Record(StructDescriptor::new(name, fields))
    }

    /// Describe a sequence of `elem`
    pub fn sequence(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Sequence(Box::new(elem))
    }

    /// Describe a fixed-size array of `elem`
    pub fn array(elem: TypeDescriptor, len: usize) -> Self {
        TypeDescriptor::Array(Box::new(elem), len)
    }

    /// Describe a map from `key` to `value`
    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map(Box::new(key), Box::new(value))
    }

    /// The record descriptor, if this is a record
    pub fn as_record(&self) -> Option<&StructDescriptor> {
        match self {
            TypeDescriptor::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Name of the described type
    ///
    /// Records report their declared name; other kinds report a Rust-like
    /// spelling of the shape, e.g. `u16`, `[String]` or `Map<String, f64>`.
    pub fn type_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Bool => write!(f, "bool"),
            TypeDescriptor::Int { signed: true, bits } => write!(f, "i{bits}"),
            TypeDescriptor::Int { signed: false, bits } => write!(f, "u{bits}"),
            TypeDescriptor::Float { bits } => write!(f, "f{bits}"),
            TypeDescriptor::Text => write!(f, "String"),
            TypeDescriptor::Instant => write!(f, "Instant"),
            TypeDescriptor::Record(record) => write!(f, "{}", record.name()),
            TypeDescriptor::Sequence(elem) => write!(f, "[{elem}]"),
            TypeDescriptor::Array(elem, len) => write!(f, "[{elem}; {len}]"),
            TypeDescriptor::Map(key, value) => write!(f, "Map<{key}, {value}>"),
            TypeDescriptor::Opaque(name) => write!(f, "{name}"),
        }
    }
}

/// Descriptor of a composite type
///
/// Fields are produced on demand so that a type may refer to itself through
/// a container or pointer without making its descriptor infinite.
#[derive(Clone, Copy)]
pub struct StructDescriptor {
    name: &'static str,
    fields: fn() -> Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Create a descriptor from a type name and a field list producer
    pub fn new(name: &'static str, fields: fn() -> Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    /// Declared type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> Vec<FieldDescriptor> {
        (self.fields)()
    }
}

// Two records are the same type only if both the name and the field
// producer match, so equally named records from different modules differ.
impl PartialEq for StructDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields as usize == other.fields as usize
    }
}

impl fmt::Debug for StructDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Descriptor of one field of a record
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    ident: &'static str,
    tag: Option<&'static str>,
    exported: bool,
    ty: TypeDescriptor,
}

impl FieldDescriptor {
    /// Create an exported, untagged field of the given type
    pub fn new(ident: &'static str, ty: TypeDescriptor) -> Self {
        Self {
            ident,
            tag: None,
            exported: true,
            ty,
        }
    }

    /// Create an exported, untagged field whose type describes itself
    pub fn of<T: super::Describe + ?Sized>(ident: &'static str) -> Self {
        Self::new(ident, T::describe())
    }

    /// Attach a serialization tag, e.g. `"firstName,omitempty"` or `"-"`
    #[must_use]
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the field as not exported
    #[must_use]
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Field identifier
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Serialization tag, if any
    pub fn tag_value(&self) -> Option<&'static str> {
        self.tag
    }

    /// Check if the field is exported
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// Field type
    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }
}
