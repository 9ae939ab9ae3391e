use std::path::Path;

use protoplan_compiler::CompilerConfig;

use super::loader::{LoadError, load_schema, parse_pool};

pub(super) const PERSON_SET: &str = r#"{
  "file": [{
    "name": "person.proto",
    "package": "demo",
    "syntax": "proto3",
    "messageType": [
      {
        "name": "Person",
        "field": [
          { "name": "name", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_STRING", "jsonName": "name" },
          { "name": "user_id", "number": 2, "type": "TYPE_INT64", "jsonName": "userId" },
          { "name": "address", "number": 3, "type": "TYPE_MESSAGE", "typeName": ".demo.Address" }
        ]
      },
      {
        "name": "Address",
        "field": [{ "name": "city", "number": 1, "type": "TYPE_STRING" }]
      }
    ],
    "enumType": [{
      "name": "Status",
      "value": [
        { "name": "STATUS_UNKNOWN", "number": 0 },
        { "name": "STATUS_OK", "number": 1 }
      ]
    }]
  }]
}"#;

#[test]
fn parses_json_descriptor_set() {
    let pool = parse_pool(PERSON_SET, &CompilerConfig::default()).unwrap();

    let person = pool.find_message("demo.Person").unwrap();
    assert_eq!(pool.fields_of(person).count(), 3);
    assert!(pool.find_enum(".demo.Status").is_some());
}

#[test]
fn malformed_json_is_reported() {
    let err = parse_pool("{ \"file\": [", &CompilerConfig::default()).unwrap_err();
    assert!(err.to_string().starts_with("invalid descriptor set: "));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = load_schema(Path::new("/nonexistent/set.json"), None)
        .err()
        .unwrap();

    assert!(matches!(err, LoadError::Read { .. }));
    assert!(
        err.to_string()
            .starts_with("failed to read '/nonexistent/set.json': ")
    );
}
