//! The frozen descriptor graph and its query API.

use protoplan_core::naming::registry_key;
use protoplan_core::{FileDescriptorProto, FileDescriptorSet};

use super::builder::DescriptorPoolBuilder;
use super::ids::{
    EnumId, EnumValueId, FieldId, FileId, MessageId, MethodId, OneofId, ServiceId,
};
use super::nodes::{
    EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FileDescriptor, MessageDescriptor,
    MethodDescriptor, OneofDescriptor, ServiceDescriptor,
};
use super::registry::SchemaRegistry;
use crate::{CompilerConfig, Result};

/// Arena of every descriptor node plus the name registry.
///
/// Read-only once built. Every handle stays valid for the pool's lifetime.
#[derive(Clone, Debug, Default)]
pub struct DescriptorPool {
    pub(crate) files: Vec<FileDescriptor>,
    pub(crate) messages: Vec<MessageDescriptor>,
    pub(crate) fields: Vec<FieldDescriptor>,
    pub(crate) oneofs: Vec<OneofDescriptor>,
    pub(crate) enums: Vec<EnumDescriptor>,
    pub(crate) enum_values: Vec<EnumValueDescriptor>,
    pub(crate) services: Vec<ServiceDescriptor>,
    pub(crate) methods: Vec<MethodDescriptor>,
    pub(crate) registry: SchemaRegistry,
}

impl DescriptorPool {
    /// Build a pool from import-ordered files.
    pub fn from_files(files: &[FileDescriptorProto], config: &CompilerConfig) -> Result<Self> {
        let mut builder = DescriptorPoolBuilder::new(config);
        for file in files {
            builder.add_file(file)?;
        }
        Ok(builder.build())
    }

    pub fn from_descriptor_set(set: &FileDescriptorSet, config: &CompilerConfig) -> Result<Self> {
        Self::from_files(&set.file, config)
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    // ========================================================================
    // Node access
    // ========================================================================

    pub fn file(&self, id: FileId) -> &FileDescriptor {
        &self.files[id.index()]
    }

    pub fn message(&self, id: MessageId) -> &MessageDescriptor {
        &self.messages[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldDescriptor {
        &self.fields[id.index()]
    }

    pub fn oneof(&self, id: OneofId) -> &OneofDescriptor {
        &self.oneofs[id.index()]
    }

    pub fn enum_type(&self, id: EnumId) -> &EnumDescriptor {
        &self.enums[id.index()]
    }

    pub fn enum_value(&self, id: EnumValueId) -> &EnumValueDescriptor {
        &self.enum_values[id.index()]
    }

    pub fn service(&self, id: ServiceId) -> &ServiceDescriptor {
        &self.services[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodDescriptor {
        &self.methods[id.index()]
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Files in the order they were added.
    pub fn files(&self) -> impl Iterator<Item = FileId> {
        (0..self.files.len()).map(FileId::new)
    }

    /// Every message, file by file, parents before their nested types.
    pub fn messages(&self) -> impl Iterator<Item = MessageId> {
        (0..self.messages.len()).map(MessageId::new)
    }

    /// Every enum, in allocation order.
    pub fn enums(&self) -> impl Iterator<Item = EnumId> {
        (0..self.enums.len()).map(EnumId::new)
    }

    /// Fields of `message` in declaration order.
    pub fn fields_of(&self, message: MessageId) -> impl Iterator<Item = &FieldDescriptor> {
        self.message(message).fields.iter().map(|&id| self.field(id))
    }

    pub fn values_of(&self, enum_id: EnumId) -> impl Iterator<Item = &EnumValueDescriptor> {
        self.enum_type(enum_id)
            .values
            .iter()
            .map(|&id| self.enum_value(id))
    }

    // ========================================================================
    // Lookup by name
    // ========================================================================

    pub fn find_file(&self, name: &str) -> Option<FileId> {
        self.registry.file(name)
    }

    /// Look up a message by full name, with or without the leading dot.
    pub fn find_message(&self, full_name: &str) -> Option<MessageId> {
        self.registry.message(&key_for(full_name))
    }

    pub fn find_enum(&self, full_name: &str) -> Option<EnumId> {
        self.registry.enum_type(&key_for(full_name))
    }

    pub fn find_service(&self, full_name: &str) -> Option<ServiceId> {
        self.registry.service(&key_for(full_name))
    }

    // ========================================================================
    // Enum queries
    // ========================================================================

    /// First value declared with `number`.
    pub fn enum_value_by_number(&self, enum_id: EnumId, number: i32) -> Option<EnumValueId> {
        self.enum_type(enum_id)
            .values
            .iter()
            .copied()
            .find(|&id| self.enum_value(id).number == number)
    }

    /// Values sharing a number with an earlier one.
    ///
    /// Returns the aliases of `value` when it is the canonical (first)
    /// value for its number, and an empty list otherwise.
    pub fn enum_aliases(&self, value: EnumValueId) -> Vec<EnumValueId> {
        let descriptor = self.enum_value(value);
        let enum_id = descriptor.enum_type;
        if self.enum_value_by_number(enum_id, descriptor.number) != Some(value) {
            return Vec::new();
        }
        self.enum_type(enum_id)
            .values
            .iter()
            .copied()
            .filter(|&id| id != value && self.enum_value(id).number == descriptor.number)
            .collect()
    }

    // ========================================================================
    // Scope helpers
    // ========================================================================

    /// File declaring `message`.
    pub fn file_of(&self, message: MessageId) -> &FileDescriptor {
        self.file(self.message(message).file)
    }
}

pub(crate) fn key_for(name: &str) -> String {
    if name.starts_with('.') {
        name.to_string()
    } else {
        registry_key(name)
    }
}
