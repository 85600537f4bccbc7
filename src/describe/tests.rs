//! Type description tests

use super::*;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

struct Node {
    _children: Vec<Node>,
}

impl Describe for Node {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record("Node", || {
            vec![FieldDescriptor::of::<Vec<Node>>("Children")]
        })
    }
}

#[test]
fn test_scalar_descriptors() {
    assert_eq!(bool::describe(), TypeDescriptor::Bool);
    assert_eq!(
        i16::describe(),
        TypeDescriptor::Int {
            signed: true,
            bits: 16
        }
    );
    assert_eq!(
        u64::describe(),
        TypeDescriptor::Int {
            signed: false,
            bits: 64
        }
    );
    assert_eq!(f32::describe(), TypeDescriptor::Float { bits: 32 });
    assert_eq!(String::describe(), TypeDescriptor::Text);
    assert_eq!(<str>::describe(), TypeDescriptor::Text);
}

#[test]
fn test_instant_descriptors() {
    assert_eq!(
        chrono::DateTime::<chrono::Utc>::describe(),
        TypeDescriptor::Instant
    );
    assert_eq!(chrono::NaiveDate::describe(), TypeDescriptor::Instant);
    assert_eq!(std::time::SystemTime::describe(), TypeDescriptor::Instant);
}

#[test]
fn test_container_descriptors() {
    assert_eq!(
        Vec::<String>::describe(),
        TypeDescriptor::sequence(TypeDescriptor::Text)
    );
    assert_eq!(
        <[i32; 5]>::describe(),
        TypeDescriptor::array(i32::describe(), 5)
    );
    assert_eq!(
        HashMap::<String, f64>::describe(),
        TypeDescriptor::map(TypeDescriptor::Text, f64::describe())
    );
    assert_eq!(
        BTreeMap::<u8, bool>::describe(),
        TypeDescriptor::map(u8::describe(), TypeDescriptor::Bool)
    );
    assert_eq!(
        HashSet::<char>::describe(),
        TypeDescriptor::sequence(TypeDescriptor::Text)
    );
}

#[test]
fn test_indirection_is_transparent() {
    assert_eq!(Box::<Node>::describe(), Node::describe());
    assert_eq!(Arc::<String>::describe(), TypeDescriptor::Text);
    assert_eq!(Option::<bool>::describe(), TypeDescriptor::Bool);
    assert_eq!(<&'static Node>::describe().type_name(), "Node");
}

#[test]
fn test_type_names() {
    assert_eq!(u16::describe().type_name(), "u16");
    assert_eq!(isize::describe().type_name(), format!("i{}", isize::BITS));
    assert_eq!(Vec::<String>::describe().type_name(), "[String]");
    assert_eq!(<[f64; 3]>::describe().type_name(), "[f64; 3]");
    assert_eq!(
        HashMap::<String, i32>::describe().type_name(),
        "Map<String, i32>"
    );
    assert_eq!(<*const u8>::describe().type_name(), "*const");
}

#[test]
fn test_record_type_name_resolves_indirection() {
    let node = Node {
        _children: Vec::new(),
    };
    let boxed = Box::new(Node {
        _children: Vec::new(),
    });

    assert_eq!(type_name_of(&node), "Node");
    assert_eq!(type_name_of(&boxed), "Node");
    assert_eq!(type_name_of(&&node), "Node");
    assert_eq!(type_name_of(&7_u8), "u8");
}

#[test]
fn test_self_referential_record_is_finite() {
    let descriptor = Node::describe();
    let record = descriptor.as_record().unwrap();
    let fields = record.fields();

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].ident(), "Children");
    assert_eq!(fields[0].ty(), &TypeDescriptor::sequence(Node::describe()));
}

mod other {
    use super::*;

    pub struct Node;

    impl Describe for Node {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record("Node", || vec![FieldDescriptor::of::<String>("Label")])
        }
    }
}

#[test]
fn test_same_named_records_are_distinct() {
    assert_eq!(Node::describe(), Node::describe());
    assert_eq!(Box::<Node>::describe(), Node::describe());
    assert_ne!(Node::describe(), other::Node::describe());
    assert_ne!(
        Node::describe(),
        TypeDescriptor::record("Node", Vec::new)
    );
}

#[test]
fn test_field_descriptor_builder() {
    let field = FieldDescriptor::of::<String>("first_name")
        .tag("firstName,omitempty")
        .private();

    assert_eq!(field.ident(), "first_name");
    assert_eq!(field.tag_value(), Some("firstName,omitempty"));
    assert!(!field.is_exported());
    assert_eq!(field.ty(), &TypeDescriptor::Text);

    let plain = FieldDescriptor::new("Age", u8::describe());
    assert!(plain.is_exported());
    assert!(plain.tag_value().is_none());
}

#[test]
fn test_struct_descriptor_debug_omits_fields() {
    let debug = format!("{:?}", Node::describe());
    assert!(debug.contains("Node"));
    assert!(!debug.contains("Children"));
}
