//! Test utilities: pool construction and lookup shortcuts.

use protoplan_core::FileDescriptorProto;

use crate::{CompilerConfig, DescriptorPool, EnumId, FieldDescriptor, MessageId};

impl DescriptorPool {
    /// Build a pool with the default configuration, panicking on error.
    pub fn expect_valid(files: Vec<FileDescriptorProto>) -> Self {
        Self::from_files(&files, &CompilerConfig::default())
            .unwrap_or_else(|e| panic!("expected a valid descriptor set: {e}"))
    }

    pub fn expect_message(&self, full_name: &str) -> MessageId {
        self.find_message(full_name)
            .unwrap_or_else(|| panic!("message `{full_name}` not found"))
    }

    pub fn expect_enum(&self, full_name: &str) -> EnumId {
        self.find_enum(full_name)
            .unwrap_or_else(|| panic!("enum `{full_name}` not found"))
    }

    /// Field of `message` by name.
    pub fn expect_field(&self, message: &str, field: &str) -> &FieldDescriptor {
        let id = self.expect_message(message);
        self.fields_of(id)
            .find(|f| f.name == field)
            .unwrap_or_else(|| panic!("field `{message}.{field}` not found"))
    }
}

/// A proto2 file in package `test`.
pub fn proto2(name: &str) -> FileDescriptorProto {
    FileDescriptorProto::new(name, "test").with_syntax("proto2")
}

/// A proto3 file in package `test`.
pub fn proto3(name: &str) -> FileDescriptorProto {
    FileDescriptorProto::new(name, "test").with_syntax("proto3")
}
