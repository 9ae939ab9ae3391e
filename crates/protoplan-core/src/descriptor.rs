//! Descriptor input records.
//!
//! 1:1 mapping to the protobuf JSON form of `descriptor.proto`. These are
//! unresolved: type references are dotted name strings. The compiler's
//! descriptor graph binds them into handles.

use serde::{Deserialize, Serialize};

use crate::edition::Edition;
use crate::features::FeatureSet;

/// Parse a JSON `FileDescriptorSet`.
pub fn parse_descriptor_set(json: &str) -> Result<FileDescriptorSet, serde_json::Error> {
    serde_json::from_str(json)
}

/// Import-ordered list of files: dependencies precede their importers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptorSet {
    #[serde(default)]
    pub file: Vec<FileDescriptorProto>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileDescriptorProto {
    pub name: String,
    pub package: String,
    pub dependency: Vec<String>,
    /// Indices into `dependency`.
    pub public_dependency: Vec<i32>,
    /// Indices into `dependency`.
    pub weak_dependency: Vec<i32>,
    pub message_type: Vec<DescriptorProto>,
    pub enum_type: Vec<EnumDescriptorProto>,
    pub service: Vec<ServiceDescriptorProto>,
    pub extension: Vec<FieldDescriptorProto>,
    pub options: Option<FileOptions>,
    pub syntax: Option<String>,
    pub edition: Option<Edition>,
}

impl FileDescriptorProto {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            ..Self::default()
        }
    }

    pub fn with_syntax(mut self, syntax: &str) -> Self {
        self.syntax = Some(syntax.to_string());
        self
    }

    pub fn with_edition(mut self, edition: Edition) -> Self {
        self.syntax = Some("editions".to_string());
        self.edition = Some(edition);
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependency.push(name.into());
        self
    }

    pub fn with_message(mut self, message: DescriptorProto) -> Self {
        self.message_type.push(message);
        self
    }

    pub fn with_enum(mut self, e: EnumDescriptorProto) -> Self {
        self.enum_type.push(e);
        self
    }

    pub fn with_service(mut self, service: ServiceDescriptorProto) -> Self {
        self.service.push(service);
        self
    }

    pub fn with_extension(mut self, field: FieldDescriptorProto) -> Self {
        self.extension.push(field);
        self
    }

    /// Edition implied by `syntax`/`edition`.
    pub fn resolved_edition(&self) -> Edition {
        Edition::from_syntax(self.syntax.as_deref(), self.edition)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DescriptorProto {
    pub name: String,
    pub field: Vec<FieldDescriptorProto>,
    pub extension: Vec<FieldDescriptorProto>,
    pub nested_type: Vec<DescriptorProto>,
    pub enum_type: Vec<EnumDescriptorProto>,
    pub extension_range: Vec<ExtensionRange>,
    pub oneof_decl: Vec<OneofDescriptorProto>,
    pub options: Option<MessageOptions>,
    pub reserved_range: Vec<ReservedRange>,
    pub reserved_name: Vec<String>,
}

impl DescriptorProto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: FieldDescriptorProto) -> Self {
        self.field.push(field);
        self
    }

    pub fn with_oneof(mut self, name: impl Into<String>) -> Self {
        self.oneof_decl.push(OneofDescriptorProto {
            name: name.into(),
            options: None,
        });
        self
    }

    pub fn with_nested(mut self, message: DescriptorProto) -> Self {
        self.nested_type.push(message);
        self
    }

    pub fn with_enum(mut self, e: EnumDescriptorProto) -> Self {
        self.enum_type.push(e);
        self
    }

    pub fn with_extension(mut self, field: FieldDescriptorProto) -> Self {
        self.extension.push(field);
        self
    }

    pub fn with_extension_range(mut self, start: i32, end: i32) -> Self {
        self.extension_range.push(ExtensionRange {
            start,
            end,
            options: None,
        });
        self
    }

    pub fn with_reserved_range(mut self, start: i32, end: i32) -> Self {
        self.reserved_range.push(ReservedRange { start, end });
        self
    }

    pub fn with_reserved_name(mut self, name: impl Into<String>) -> Self {
        self.reserved_name.push(name.into());
        self
    }

    pub fn map_entry(mut self) -> Self {
        self.options.get_or_insert_with(MessageOptions::default).map_entry = true;
        self
    }

    pub fn is_map_entry(&self) -> bool {
        self.options.as_ref().is_some_and(|o| o.map_entry)
    }
}

/// Half-open `[start, end)` range of extension numbers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionRange {
    pub start: i32,
    pub end: i32,
    pub options: Option<Options>,
}

/// Half-open `[start, end)` range of reserved field numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservedRange {
    pub start: i32,
    pub end: i32,
}

/// Inclusive `[start, end]` range of reserved enum numbers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumReservedRange {
    pub start: i32,
    pub end: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldLabel {
    #[default]
    #[serde(rename = "LABEL_OPTIONAL")]
    Optional,
    #[serde(rename = "LABEL_REQUIRED")]
    Required,
    #[serde(rename = "LABEL_REPEATED")]
    Repeated,
}

/// Declared field type, numbered as on the wire descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FieldType {
    #[serde(rename = "TYPE_DOUBLE")]
    Double = 1,
    #[serde(rename = "TYPE_FLOAT")]
    Float = 2,
    #[serde(rename = "TYPE_INT64")]
    Int64 = 3,
    #[serde(rename = "TYPE_UINT64")]
    Uint64 = 4,
    #[default]
    #[serde(rename = "TYPE_INT32")]
    Int32 = 5,
    #[serde(rename = "TYPE_FIXED64")]
    Fixed64 = 6,
    #[serde(rename = "TYPE_FIXED32")]
    Fixed32 = 7,
    #[serde(rename = "TYPE_BOOL")]
    Bool = 8,
    #[serde(rename = "TYPE_STRING")]
    String = 9,
    #[serde(rename = "TYPE_GROUP")]
    Group = 10,
    #[serde(rename = "TYPE_MESSAGE")]
    Message = 11,
    #[serde(rename = "TYPE_BYTES")]
    Bytes = 12,
    #[serde(rename = "TYPE_UINT32")]
    Uint32 = 13,
    #[serde(rename = "TYPE_ENUM")]
    Enum = 14,
    #[serde(rename = "TYPE_SFIXED32")]
    Sfixed32 = 15,
    #[serde(rename = "TYPE_SFIXED64")]
    Sfixed64 = 16,
    #[serde(rename = "TYPE_SINT32")]
    Sint32 = 17,
    #[serde(rename = "TYPE_SINT64")]
    Sint64 = 18,
}

impl FieldType {
    pub fn raw(self) -> u8 {
        self as u8
    }

    /// Inverse of `raw`.
    pub fn from_raw(raw: u8) -> Option<Self> {
        use FieldType::*;
        const ALL: [FieldType; 18] = [
            Double, Float, Int64, Uint64, Int32, Fixed64, Fixed32, Bool, String, Group, Message,
            Bytes, Uint32, Enum, Sfixed32, Sfixed64, Sint32, Sint64,
        ];
        ALL.iter().copied().find(|t| t.raw() == raw)
    }

    /// Lowercase `.proto` keyword for the type.
    pub fn name(self) -> &'static str {
        match self {
            FieldType::Double => "double",
            FieldType::Float => "float",
            FieldType::Int64 => "int64",
            FieldType::Uint64 => "uint64",
            FieldType::Int32 => "int32",
            FieldType::Fixed64 => "fixed64",
            FieldType::Fixed32 => "fixed32",
            FieldType::Bool => "bool",
            FieldType::String => "string",
            FieldType::Group => "group",
            FieldType::Message => "message",
            FieldType::Bytes => "bytes",
            FieldType::Uint32 => "uint32",
            FieldType::Enum => "enum",
            FieldType::Sfixed32 => "sfixed32",
            FieldType::Sfixed64 => "sfixed64",
            FieldType::Sint32 => "sint32",
            FieldType::Sint64 => "sint64",
        }
    }

    /// Message or group: the field's value is a nested message.
    pub fn is_message_like(self) -> bool {
        matches!(self, FieldType::Message | FieldType::Group)
    }

    /// Types that may use packed repeated encoding.
    pub fn is_packable(self) -> bool {
        !matches!(
            self,
            FieldType::String | FieldType::Bytes | FieldType::Group | FieldType::Message
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDescriptorProto {
    pub name: String,
    pub number: i32,
    pub label: FieldLabel,
    #[serde(rename = "type")]
    pub r#type: FieldType,
    /// Dotted reference to the message or enum type, usually with a leading dot.
    pub type_name: Option<String>,
    /// Dotted reference to the extended message (extensions only).
    pub extendee: Option<String>,
    pub default_value: Option<String>,
    pub oneof_index: Option<i32>,
    pub json_name: Option<String>,
    pub options: Option<FieldOptions>,
    pub proto3_optional: bool,
}

impl FieldDescriptorProto {
    pub fn new(name: impl Into<String>, number: i32, r#type: FieldType) -> Self {
        Self {
            name: name.into(),
            number,
            r#type,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: FieldLabel) -> Self {
        self.label = label;
        self
    }

    pub fn required(self) -> Self {
        self.with_label(FieldLabel::Required)
    }

    pub fn repeated(self) -> Self {
        self.with_label(FieldLabel::Repeated)
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_extendee(mut self, extendee: impl Into<String>) -> Self {
        self.extendee = Some(extendee.into());
        self
    }

    pub fn in_oneof(mut self, index: i32) -> Self {
        self.oneof_index = Some(index);
        self
    }

    /// Mark as a proto3 `optional` field; the caller adds the synthetic oneof.
    pub fn proto3_optional(mut self, oneof_index: i32) -> Self {
        self.proto3_optional = true;
        self.oneof_index = Some(oneof_index);
        self
    }

    pub fn with_json_name(mut self, json_name: impl Into<String>) -> Self {
        self.json_name = Some(json_name.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn packed(mut self, packed: bool) -> Self {
        self.options.get_or_insert_with(FieldOptions::default).packed = Some(packed);
        self
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.options.get_or_insert_with(FieldOptions::default).features = Some(features);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneofDescriptorProto {
    pub name: String,
    pub options: Option<Options>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumDescriptorProto {
    pub name: String,
    pub value: Vec<EnumValueDescriptorProto>,
    pub options: Option<EnumOptions>,
    pub reserved_range: Vec<EnumReservedRange>,
    pub reserved_name: Vec<String>,
}

impl EnumDescriptorProto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.value.push(EnumValueDescriptorProto {
            name: name.into(),
            number,
            options: None,
        });
        self
    }

    pub fn with_reserved_range(mut self, start: i32, end: i32) -> Self {
        self.reserved_range.push(EnumReservedRange { start, end });
        self
    }

    pub fn with_reserved_name(mut self, name: impl Into<String>) -> Self {
        self.reserved_name.push(name.into());
        self
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.options.get_or_insert_with(EnumOptions::default).features = Some(features);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumValueDescriptorProto {
    pub name: String,
    pub number: i32,
    pub options: Option<Options>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceDescriptorProto {
    pub name: String,
    pub method: Vec<MethodDescriptorProto>,
    pub options: Option<Options>,
}

impl ServiceDescriptorProto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        self.method.push(MethodDescriptorProto {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            ..MethodDescriptorProto::default()
        });
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MethodDescriptorProto {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub options: Option<Options>,
}

// ============================================================================
// Options
// ============================================================================

/// Options carrying only features (oneofs, enum values, services, methods,
/// extension ranges).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    pub features: Option<FeatureSet>,
    pub deprecated: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileOptions {
    pub features: Option<FeatureSet>,
    pub deprecated: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageOptions {
    pub features: Option<FeatureSet>,
    pub map_entry: bool,
    pub deprecated: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOptions {
    pub features: Option<FeatureSet>,
    pub packed: Option<bool>,
    pub deprecated: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumOptions {
    pub features: Option<FeatureSet>,
    pub allow_alias: bool,
    pub deprecated: bool,
}
