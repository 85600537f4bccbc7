//! Integration tests
//!
//! Tests the full flow: record descriptions → index schema → tantivy index

use indexafy::{
    build_index, load_config_from_str, BuilderConfig, Decision, Describe, DocumentMapping,
    EmptyTagName, Error, FieldDescriptor, FieldMapping, FieldType, IndexSchema, Override,
    Record, SchemaBuilder, SchemaIndex, StructDescriptor, TypeDescriptor,
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;
use tantivy::collector::Count;
use tantivy::query::TermQuery;
use tantivy::schema::IndexRecordOption;
use tantivy::Term;
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Fixtures
// ============================================================================

#[derive(Serialize)]
struct Person {
    #[serde(rename = "firstName")]
    first_name: String,
    #[serde(rename = "lastName")]
    last_name: String,
    age: u8,
}

impl Describe for Person {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record("Person", || {
            vec![
                FieldDescriptor::of::<String>("FirstName").tag("firstName,omitempty"),
                FieldDescriptor::of::<String>("LastName").tag("lastName,omitempty"),
                FieldDescriptor::of::<u8>("Age").tag("age,omitempty"),
            ]
        })
    }
}

#[derive(Serialize)]
struct User {
    person: Person,
    registered: bool,
    #[serde(rename = "dateCreated")]
    date_created: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "luckyNums")]
    lucky_nums: [i32; 3],
    nicknames: Vec<String>,
    #[serde(skip)]
    password: String,
}

impl Describe for User {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record("User", || {
            vec![
                FieldDescriptor::of::<Person>("Person").tag("person,omitempty"),
                FieldDescriptor::of::<bool>("Registered").tag("registered,omitempty"),
                FieldDescriptor::of::<chrono::DateTime<chrono::Utc>>("DateCreated")
                    .tag("dateCreated,omitempty"),
                FieldDescriptor::of::<[i32; 3]>("LuckyNums").tag("luckyNums,omitempty"),
                FieldDescriptor::of::<Vec<String>>("Nicknames").tag("nicknames,omitempty"),
                FieldDescriptor::of::<String>("password").private(),
            ]
        })
    }
}

fn user(first_name: &str, nicknames: &[&str]) -> User {
    User {
        person: Person {
            first_name: first_name.to_string(),
            last_name: "Lovelace".to_string(),
            age: 36,
        },
        registered: true,
        date_created: chrono::Utc::now(),
        lucky_nums: [3, 7, 11],
        nicknames: nicknames.iter().map(|n| (*n).to_string()).collect(),
        password: "hunter2".to_string(),
    }
}

#[derive(Serialize)]
struct Note {
    body: String,
}

impl Describe for Note {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record("Note", || vec![FieldDescriptor::of::<String>("body")])
    }
}

fn count(index: &SchemaIndex, path: &str, text: &str) -> usize {
    let field = index.field(path).unwrap();
    let reader = index.index().reader().unwrap();
    let query = TermQuery::new(
        Term::from_field_text(field, text),
        IndexRecordOption::Basic,
    );
    reader.searcher().search(&query, &Count).unwrap()
}

// ============================================================================
// Schema Tests
// ============================================================================

#[test]
fn test_user_schema_layout() {
    init_tracing();

    let schema = SchemaBuilder::new()
        .build_schema(&[&user("Ada", &[])])
        .unwrap();

    assert_eq!(schema.type_names(), vec!["User"]);
    let json = schema.to_json();
    let user = &json["types"]["User"];

    assert_eq!(user["fields"]["registered"]["type"], json!("boolean"));
    assert_eq!(user["fields"]["dateCreated"]["type"], json!("datetime"));
    assert_eq!(user["fields"]["luckyNums"]["type"], json!("number"));
    assert_eq!(user["fields"]["nicknames"]["type"], json!("text"));
    assert!(user["fields"].get("password").is_none());

    let person = &user["properties"]["person"];
    assert_eq!(person["fields"]["person.firstName"]["type"], json!("text"));
    assert_eq!(person["fields"]["person.lastName"]["type"], json!("text"));
    assert_eq!(person["fields"]["person.age"]["type"], json!("number"));

    assert_eq!(json["type_field"], json!("_type"));
    assert_eq!(json["default_analyzer"], json!("standard"));
}

#[test]
fn test_schema_json_roundtrip() {
    let schema = SchemaBuilder::new()
        .build_schema(&[&user("Ada", &[]), &Note { body: String::new() }])
        .unwrap();

    let parsed = IndexSchema::from_json(&schema.to_json_pretty()).unwrap();

    assert_eq!(parsed, schema);
}

#[test]
fn test_batch_errors() {
    let builder = SchemaBuilder::new();

    let err = builder
        .build_schema(&[&Note { body: String::new() }, &Box::new(Note { body: String::new() })])
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateTypeName { ref name } if name == "Note"));

    let err = builder.build_schema(&[&"just a string"]).unwrap_err();
    assert!(matches!(err, Error::NotAStruct { .. }));
}

#[test]
fn test_policies_like_a_caller_would_write_them() {
    let builder = SchemaBuilder::new()
        .with_index_policy(|schema: &IndexSchema| -> Override<IndexSchema> {
            let mut schema = schema.clone();
            schema.index_dynamic = false;
            Override::Replace(schema)
        })
        .with_document_policy(
            |ty: &StructDescriptor, _: &DocumentMapping| -> Decision<DocumentMapping> {
                if ty.name() == "Note" {
                    Decision::OptOut
                } else {
                    Decision::Keep
                }
            },
        )
        .with_field_policy(|_: &TypeDescriptor, mapping: &FieldMapping| {
            if mapping.field_type == FieldType::Text {
                Decision::Replace(mapping.clone().with_analyzer("en"))
            } else {
                Decision::Keep
            }
        });

    let records: [&dyn Record; 2] = [&user("Ada", &[]), &Note { body: String::new() }];
    let schema = builder.build_schema(&records).unwrap();

    assert!(!schema.index_dynamic);
    assert!(schema.document_mapping("Note").unwrap().is_empty());

    let user = schema.document_mapping("User").unwrap();
    assert_eq!(
        user.field("nicknames").unwrap().analyzer.as_deref(),
        Some("en")
    );
    assert_eq!(user.field("registered").unwrap().analyzer, None);
}

#[test]
fn test_config_from_yaml_drives_builder() {
    let config = load_config_from_str(
        r"
empty_tag_name: use_identifier
default_analyzer: keyword
fields:
  store: false
",
    )
    .unwrap();
    assert_eq!(config.empty_tag_name, EmptyTagName::UseIdentifier);

    let schema = SchemaBuilder::new()
        .with_config(config)
        .build_schema(&[&Note { body: String::new() }])
        .unwrap();

    assert_eq!(schema.default_analyzer, "keyword");
    let body = schema.document_mapping("Note").unwrap().field("body").unwrap();
    assert!(!body.store);
    assert!(body.index);
}

// ============================================================================
// Index Tests
// ============================================================================

#[test]
fn test_build_index_and_search() {
    init_tracing();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.idx");
    let ada = user("Ada", &["countess", "enchantress"]);
    let grace = user("Grace", &["amazing"]);

    let mut index = build_index(&path, &SchemaBuilder::new(), &[&ada]).unwrap();
    index.add_document(&ada).unwrap();
    index.add_document(&grace).unwrap();
    index.commit().unwrap();

    assert!(path.join("meta.json").exists());
    assert_eq!(count(&index, "person.firstName", "ada"), 1);
    assert_eq!(count(&index, "person.lastName", "lovelace"), 2);
    assert_eq!(count(&index, "nicknames", "enchantress"), 1);
    assert!(index.field("_type").is_none());

    let type_field = index.engine_schema().type_field();
    let reader = index.index().reader().unwrap();
    let query = TermQuery::new(
        Term::from_field_text(type_field, "User"),
        IndexRecordOption::Basic,
    );
    assert_eq!(reader.searcher().search(&query, &Count).unwrap(), 2);
    assert!(index.field("password").is_none());
}

#[test]
fn test_build_index_with_keyword_analyzer() {
    let dir = TempDir::new().unwrap();
    let builder = SchemaBuilder::new()
        .with_config(BuilderConfig::default().with_default_analyzer("keyword"));
    let note = Note {
        body: "Hello World".to_string(),
    };

    let mut index = build_index(dir.path(), &builder, &[&note]).unwrap();
    index.add_document(&note).unwrap();
    index.commit().unwrap();

    assert_eq!(count(&index, "body", "Hello World"), 1);
    assert_eq!(count(&index, "body", "hello"), 0);
}
