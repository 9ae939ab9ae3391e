use indoc::indoc;

use crate::{
    Edition, FieldLabel, FieldPresence, FieldType, FileDescriptorProto, is_valid_field_number,
    parse_descriptor_set,
};

const SAMPLE_JSON: &str = indoc! {r#"
    {
      "file": [
        {
          "name": "shapes.proto",
          "package": "demo",
          "syntax": "proto3",
          "messageType": [
            {
              "name": "Point",
              "field": [
                {"name": "x", "number": 1, "label": "LABEL_OPTIONAL", "type": "TYPE_SINT32"},
                {"name": "tags", "number": 2, "label": "LABEL_REPEATED", "type": "TYPE_STRING"},
                {
                  "name": "label",
                  "number": 3,
                  "type": "TYPE_STRING",
                  "oneofIndex": 0,
                  "proto3Optional": true
                }
              ],
              "oneofDecl": [{"name": "_label"}]
            }
          ]
        },
        {
          "name": "editions.proto",
          "package": "demo.ed",
          "dependency": ["shapes.proto"],
          "publicDependency": [0],
          "syntax": "editions",
          "edition": "EDITION_2023",
          "options": {"features": {"fieldPresence": "IMPLICIT"}},
          "messageType": [
            {
              "name": "Holder",
              "field": [
                {
                  "name": "point",
                  "number": 1,
                  "type": "TYPE_MESSAGE",
                  "typeName": ".demo.Point",
                  "options": {"features": {"messageEncoding": "DELIMITED"}}
                }
              ]
            }
          ]
        }
      ]
    }
"#};

#[test]
fn parse_descriptor_set_json() {
    let set = parse_descriptor_set(SAMPLE_JSON).unwrap();
    assert_eq!(set.file.len(), 2);

    let shapes = &set.file[0];
    assert_eq!(shapes.resolved_edition(), Edition::Proto3);
    let point = &shapes.message_type[0];
    assert_eq!(point.field.len(), 3);
    assert_eq!(point.field[0].r#type, FieldType::Sint32);
    assert_eq!(point.field[1].label, FieldLabel::Repeated);
    assert!(point.field[2].proto3_optional);
    assert_eq!(point.field[2].oneof_index, Some(0));
}

#[test]
fn parse_editions_file_with_features() {
    let set = parse_descriptor_set(SAMPLE_JSON).unwrap();
    let ed = &set.file[1];
    assert_eq!(ed.resolved_edition(), Edition::Edition2023);
    assert_eq!(ed.public_dependency, vec![0]);

    let file_features = ed.options.as_ref().unwrap().features.as_ref().unwrap();
    assert_eq!(file_features.field_presence, Some(FieldPresence::Implicit));

    let point = &ed.message_type[0].field[0];
    assert_eq!(point.type_name.as_deref(), Some(".demo.Point"));
    let features = point.options.as_ref().unwrap().features.as_ref().unwrap();
    assert!(features.message_encoding.is_some());
    assert!(features.field_presence.is_none());
}

#[test]
fn missing_fields_default() {
    let set = parse_descriptor_set(r#"{"file": [{"name": "empty.proto"}]}"#).unwrap();
    let file = &set.file[0];
    assert_eq!(file.package, "");
    assert!(file.message_type.is_empty());
    assert_eq!(file.resolved_edition(), Edition::Proto2);
}

#[test]
fn builders_match_parsed_shape() {
    let file = FileDescriptorProto::new("a.proto", "pkg").with_syntax("proto2");
    let json = serde_json::to_string(&file).unwrap();
    let back: FileDescriptorProto = serde_json::from_str(&json).unwrap();
    assert_eq!(back, file);
}

#[test]
fn field_type_raw_values() {
    assert_eq!(FieldType::Double.raw(), 1);
    assert_eq!(FieldType::Sint64.raw(), 18);
    assert_eq!(FieldType::from_raw(11), Some(FieldType::Message));
    assert_eq!(FieldType::from_raw(0), None);
    assert_eq!(FieldType::from_raw(19), None);
    assert!(FieldType::Group.is_message_like());
    assert!(!FieldType::Bytes.is_packable());
    assert!(FieldType::Enum.is_packable());
}

#[test]
fn field_number_limits() {
    assert!(is_valid_field_number(1));
    assert!(is_valid_field_number(18999));
    assert!(!is_valid_field_number(19000));
    assert!(!is_valid_field_number(19999));
    assert!(is_valid_field_number(20000));
    assert!(is_valid_field_number((1 << 29) - 1));
    assert!(!is_valid_field_number(1 << 29));
    assert!(!is_valid_field_number(0));
}
