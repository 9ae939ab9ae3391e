//! Descriptor graph.
//!
//! Construction is two-phase per file, files in import order:
//! 1. Allocate every node from its local declaration and register it
//! 2. Bind names to handles (types, extendees, imports, method types)
//!
//! Afterwards the `DescriptorPool` is read-only.

mod bind;
mod builder;
mod ids;
mod nodes;
mod pool;
mod registry;

#[cfg(test)]
mod registry_tests;

pub use builder::DescriptorPoolBuilder;
pub use ids::{EnumId, EnumValueId, FieldId, FileId, MessageId, MethodId, OneofId, ServiceId};
pub use nodes::{
    BUNDLED_FILE_PREFIX, EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FileDescriptor,
    MessageDescriptor, MethodDescriptor, OneofDescriptor, ServiceDescriptor, TypeRef,
};
pub use pool::DescriptorPool;
pub use registry::{NodeRef, SchemaRegistry};
