#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for protoplan.
//!
//! Two layers:
//! - **Input layer**: serde records mirroring the descriptor-proto JSON shape
//! - **Feature layer**: editions, feature sets and inheritance resolution
//!
//! Everything here is plain data plus pure functions; the descriptor graph
//! that cross-references these records lives in `protoplan-compiler`.

pub mod colors;
pub mod descriptor;
pub mod edition;
pub mod features;
pub mod naming;

#[cfg(test)]
mod descriptor_tests;

pub use colors::Colors;
pub use descriptor::{
    DescriptorProto, EnumDescriptorProto, EnumOptions, EnumReservedRange,
    EnumValueDescriptorProto, ExtensionRange, FieldDescriptorProto, FieldLabel, FieldOptions,
    FieldType, FileDescriptorProto, FileDescriptorSet, FileOptions, MessageOptions,
    MethodDescriptorProto, OneofDescriptorProto, Options, ReservedRange, ServiceDescriptorProto,
    parse_descriptor_set,
};
pub use edition::Edition;
pub use features::{
    EnumType, FeatureError, FeatureExtension, FeatureResolver, FeatureSet, FeatureSetDefaults,
    FeatureSetEditionDefault, FieldPresence, JsonFormat, MessageEncoding, RepeatedFieldEncoding,
    ResolvedFeatures, Utf8Validation,
};

// ============================================================================
// Field Number Limits
// ============================================================================

/// Largest field number a message may declare (2^29 - 1).
pub const FIELD_NUMBER_MAX: i32 = (1 << 29) - 1;

/// First field number of the range reserved for the protobuf implementation.
pub const FIRST_RESERVED_FIELD_NUMBER: i32 = 19000;

/// Last field number of the range reserved for the protobuf implementation.
pub const LAST_RESERVED_FIELD_NUMBER: i32 = 19999;

/// Check whether `number` is a field number a schema may legally use.
pub fn is_valid_field_number(number: i32) -> bool {
    (1..=FIELD_NUMBER_MAX).contains(&number)
        && !(FIRST_RESERVED_FIELD_NUMBER..=LAST_RESERVED_FIELD_NUMBER).contains(&number)
}
