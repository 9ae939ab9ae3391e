//! Descriptor nodes.
//!
//! Nodes are created during allocation from their local declaration and
//! completed during bind. Cross references are handles into the owning
//! `DescriptorPool`; parents are never owned by their children.

use std::ops::{Range, RangeInclusive};

use protoplan_core::{
    Edition, EnumType, FieldLabel, FieldPresence, FieldType, RepeatedFieldEncoding,
    ResolvedFeatures,
};

use super::ids::{EnumId, EnumValueId, FieldId, FileId, MessageId, MethodId, OneofId, ServiceId};
use crate::invariants::ensure_bound;

/// Prefix shared by the files bundled with protobuf itself.
pub const BUNDLED_FILE_PREFIX: &str = "google/protobuf/";

// ============================================================================
// Files
// ============================================================================

#[derive(Clone, Debug)]
pub struct FileDescriptor {
    pub name: String,
    pub package: String,
    pub edition: Edition,
    pub features: ResolvedFeatures,
    pub messages: Vec<MessageId>,
    pub enums: Vec<EnumId>,
    pub services: Vec<ServiceId>,
    pub extensions: Vec<FieldId>,
    pub(crate) dependency_names: Vec<String>,
    pub(crate) public_dependency_indices: Vec<i32>,
    pub(crate) weak_dependency_indices: Vec<i32>,
    pub(crate) dependencies: Vec<FileId>,
}

impl FileDescriptor {
    /// Imported files, in declaration order.
    pub fn dependencies(&self) -> &[FileId] {
        &self.dependencies
    }

    /// Imports re-exported with `import public`.
    pub fn public_dependencies(&self) -> Vec<FileId> {
        self.select_dependencies(&self.public_dependency_indices)
    }

    pub fn weak_dependencies(&self) -> Vec<FileId> {
        self.select_dependencies(&self.weak_dependency_indices)
    }

    /// Whether this is one of the files shipped with protobuf.
    pub fn is_bundled_file(&self) -> bool {
        self.name.starts_with(BUNDLED_FILE_PREFIX)
    }

    fn select_dependencies(&self, indices: &[i32]) -> Vec<FileId> {
        indices
            .iter()
            .filter_map(|&i| usize::try_from(i).ok())
            .filter_map(|i| self.dependencies.get(i).copied())
            .collect()
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Clone, Debug)]
pub struct MessageDescriptor {
    pub name: String,
    pub full_name: String,
    pub file: FileId,
    pub containing_type: Option<MessageId>,
    pub features: ResolvedFeatures,
    /// Fields in declaration order.
    pub fields: Vec<FieldId>,
    /// Real oneofs first, then synthetic ones.
    pub oneofs: Vec<OneofId>,
    pub nested_types: Vec<MessageId>,
    pub enums: Vec<EnumId>,
    /// Extensions declared in this message's scope.
    pub extensions: Vec<FieldId>,
    /// Half-open extension number ranges.
    pub extension_ranges: Vec<Range<i32>>,
    /// Half-open reserved number ranges.
    pub reserved_ranges: Vec<Range<i32>>,
    pub reserved_names: Vec<String>,
    pub is_map_entry: bool,
    pub(crate) fields_by_number: Vec<FieldId>,
    pub(crate) real_oneof_count: usize,
}

impl MessageDescriptor {
    /// Fields sorted by field number.
    pub fn fields_by_number(&self) -> &[FieldId] {
        &self.fields_by_number
    }

    /// Oneofs declared in the schema, excluding synthetic proto3 ones.
    pub fn real_oneofs(&self) -> &[OneofId] {
        &self.oneofs[..self.real_oneof_count]
    }

    /// Key and value fields of a map entry.
    pub fn map_key_value(&self) -> Option<(FieldId, FieldId)> {
        if !self.is_map_entry {
            return None;
        }
        match self.fields.as_slice() {
            [key, value] => Some((*key, *value)),
            _ => None,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.containing_type.is_none()
    }
}

// ============================================================================
// Fields
// ============================================================================

/// Resolved target of a message, group or enum field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeRef {
    Message(MessageId),
    Enum(EnumId),
}

#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub name: String,
    pub full_name: String,
    pub number: i32,
    /// Label after feature post-processing (legacy-required fields read as required).
    pub label: FieldLabel,
    /// Type after feature post-processing (delimited messages read as groups).
    pub field_type: FieldType,
    /// JSON name: explicit, or derived from the proto name.
    pub json_name: String,
    pub file: FileId,
    pub features: ResolvedFeatures,
    pub is_extension: bool,
    /// Owning oneof, synthetic ones included.
    pub oneof: Option<OneofId>,
    pub proto3_optional: bool,
    pub default_value: Option<String>,
    pub(crate) declared_in: Option<MessageId>,
    pub(crate) type_name: Option<String>,
    pub(crate) extendee_name: Option<String>,
    pub(crate) containing_type: Option<MessageId>,
    pub(crate) target: Option<TypeRef>,
    pub(crate) real_oneof: Option<OneofId>,
    pub(crate) is_map: bool,
    pub(crate) is_group_like: bool,
}

impl FieldDescriptor {
    /// The message this field belongs to; for extensions, the extended message.
    pub fn containing_type(&self) -> MessageId {
        ensure_bound(self.containing_type, &self.full_name, "containing type")
    }

    /// For extensions, the message they were declared in (`None` at file scope).
    pub fn extension_scope(&self) -> Option<MessageId> {
        if self.is_extension {
            self.declared_in
        } else {
            None
        }
    }

    pub fn message_type(&self) -> Option<MessageId> {
        match self.target {
            Some(TypeRef::Message(id)) => Some(id),
            _ => None,
        }
    }

    pub fn enum_type(&self) -> Option<EnumId> {
        match self.target {
            Some(TypeRef::Enum(id)) => Some(id),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<TypeRef> {
        self.target
    }

    /// Member of a oneof written in the schema, not a synthetic one.
    pub fn real_oneof(&self) -> Option<OneofId> {
        self.real_oneof
    }

    pub fn is_repeated(&self) -> bool {
        self.label == FieldLabel::Repeated
    }

    pub fn is_required(&self) -> bool {
        self.features.field_presence == FieldPresence::LegacyRequired
    }

    /// Whether the field tracks if it was set, independent of its value.
    pub fn has_presence(&self) -> bool {
        if self.is_repeated() {
            return false;
        }
        if self.field_type.is_message_like() {
            return true;
        }
        self.is_extension
            || self.oneof.is_some()
            || self.features.field_presence != FieldPresence::Implicit
    }

    pub fn is_packable(&self) -> bool {
        self.is_repeated() && self.field_type.is_packable()
    }

    pub fn is_packed(&self) -> bool {
        self.is_packable()
            && self.features.repeated_field_encoding == RepeatedFieldEncoding::Packed
    }

    /// Repeated field whose message type is a map entry.
    pub fn is_map(&self) -> bool {
        self.is_map
    }

    /// Group whose text-format name is its message name.
    pub fn is_group_like(&self) -> bool {
        self.is_group_like
    }
}

// ============================================================================
// Oneofs
// ============================================================================

#[derive(Clone, Debug)]
pub struct OneofDescriptor {
    pub name: String,
    pub full_name: String,
    pub containing_type: MessageId,
    pub features: ResolvedFeatures,
    pub fields: Vec<FieldId>,
    /// Holds exactly one proto3 `optional` field.
    pub is_synthetic: bool,
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Clone, Debug)]
pub struct EnumDescriptor {
    pub name: String,
    pub full_name: String,
    pub file: FileId,
    pub containing_type: Option<MessageId>,
    pub features: ResolvedFeatures,
    pub values: Vec<EnumValueId>,
    /// Inclusive reserved number ranges.
    pub reserved_ranges: Vec<RangeInclusive<i32>>,
    pub reserved_names: Vec<String>,
    pub allow_alias: bool,
}

impl EnumDescriptor {
    pub fn is_closed(&self) -> bool {
        self.features.enum_type == EnumType::Closed
    }

    /// The first declared value.
    pub fn default_value(&self) -> Option<EnumValueId> {
        self.values.first().copied()
    }
}

#[derive(Clone, Debug)]
pub struct EnumValueDescriptor {
    pub name: String,
    /// Scoped as a sibling of the enum, not a child.
    pub full_name: String,
    pub number: i32,
    pub enum_type: EnumId,
    pub features: ResolvedFeatures,
}

// ============================================================================
// Services
// ============================================================================

#[derive(Clone, Debug)]
pub struct ServiceDescriptor {
    pub name: String,
    pub full_name: String,
    pub file: FileId,
    pub features: ResolvedFeatures,
    pub methods: Vec<MethodId>,
}

#[derive(Clone, Debug)]
pub struct MethodDescriptor {
    pub name: String,
    pub full_name: String,
    pub service: ServiceId,
    pub features: ResolvedFeatures,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub(crate) input_name: String,
    pub(crate) output_name: String,
    pub(crate) input_type: Option<MessageId>,
    pub(crate) output_type: Option<MessageId>,
}

impl MethodDescriptor {
    pub fn input_type(&self) -> MessageId {
        ensure_bound(self.input_type, &self.full_name, "input type")
    }

    pub fn output_type(&self) -> MessageId {
        ensure_bound(self.output_type, &self.full_name, "output type")
    }
}
