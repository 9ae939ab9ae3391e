//! Protoplan compiler: descriptor graph, layout calculator and name tables.
//!
//! This crate turns import-ordered descriptor records into compiled messages:
//! - `descriptor` - schema registry and the two-phase (allocate, bind) graph
//! - `layout` - per-target message storage plans and submessage tables
//! - `names` - proto/JSON name table programs for messages and enums
//! - `storage` - inline vs. out-of-line storage decision
//! - `compiler` - facade caching compiled output per message

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compiler;
pub mod config;
pub mod descriptor;
mod invariants;
pub mod layout;
pub mod names;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

pub use compiler::{CompiledEnum, CompiledMessage, Compiler, OutputNames};
pub use config::{CompilerConfig, Target};
pub use descriptor::{
    DescriptorPool, DescriptorPoolBuilder, EnumDescriptor, EnumId, EnumValueDescriptor,
    EnumValueId, FieldDescriptor, FieldId, FileDescriptor, FileId, MessageDescriptor, MessageId,
    MethodDescriptor, MethodId, NodeRef, OneofDescriptor, OneofId, SchemaRegistry,
    ServiceDescriptor, ServiceId, TypeRef,
};
pub use layout::{MessageLayout, MessageLayoutCalculator, SubmessageInfo, TargetSpecific};
pub use storage::{StorageAnalysis, StorageDecision};

/// Errors surfaced to callers of the compiler.
///
/// Internal-consistency violations (unresolved references in a graph that
/// was supposed to be pre-validated) are panics, not variants here.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The resolver for a file's edition could not be built.
    #[error("{file}: {source}")]
    Feature {
        file: String,
        #[source]
        source: protoplan_core::FeatureError,
    },

    #[error("duplicate output name `{0}`")]
    DuplicateOutputName(String),

    #[error("invalid descriptor set: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Bytecode(#[from] protoplan_bytecode::BytecodeError),
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;
