//! In-memory storage classes of fields.

use protoplan_core::FieldType;

use super::TargetSpecific;
use crate::descriptor::FieldDescriptor;

/// How a field is stored, independent of pointer width.
///
/// Declaration order is the order fields are laid out in: smaller scalars
/// first so that wider values land on their natural alignment with little
/// padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldStorageKind {
    OneByteScalar,
    FourByteScalar,
    EightByteScalar,
    /// Repeated fields, maps, messages and groups.
    Pointer,
    /// Strings and bytes.
    StringOrData,
}

impl FieldStorageKind {
    pub fn of(field: &FieldDescriptor) -> Self {
        if field.is_repeated() || field.is_map() {
            return FieldStorageKind::Pointer;
        }
        Self::of_singular(field.field_type)
    }

    pub fn of_singular(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Bool => FieldStorageKind::OneByteScalar,
            FieldType::Int32
            | FieldType::Uint32
            | FieldType::Sint32
            | FieldType::Fixed32
            | FieldType::Sfixed32
            | FieldType::Float
            | FieldType::Enum => FieldStorageKind::FourByteScalar,
            FieldType::Int64
            | FieldType::Uint64
            | FieldType::Sint64
            | FieldType::Fixed64
            | FieldType::Sfixed64
            | FieldType::Double => FieldStorageKind::EightByteScalar,
            FieldType::Message | FieldType::Group => FieldStorageKind::Pointer,
            FieldType::String | FieldType::Bytes => FieldStorageKind::StringOrData,
        }
    }

    /// Bytes occupied per target, padding included.
    pub fn strides(self) -> TargetSpecific<u32> {
        match self {
            FieldStorageKind::OneByteScalar => TargetSpecific::for_all_targets(1),
            FieldStorageKind::FourByteScalar => TargetSpecific::for_all_targets(4),
            FieldStorageKind::EightByteScalar => TargetSpecific::for_all_targets(8),
            FieldStorageKind::Pointer => TargetSpecific::new(8, 4),
            FieldStorageKind::StringOrData => TargetSpecific::new(16, 12),
        }
    }
}
