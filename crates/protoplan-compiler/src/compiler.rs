//! Compiler facade: one entry point producing everything emitted per message.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::config::{CompilerConfig, Target};
use crate::descriptor::{DescriptorPool, EnumId, MessageId};
use crate::layout::{MessageLayout, MessageLayoutCalculator};
use crate::names::{enum_name_table, message_name_table};
use crate::storage::{StorageAnalysis, StorageDecision};
use crate::{CompileError, Result};

/// Compiled output of one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledMessage {
    pub id: MessageId,
    pub full_name: String,
    pub layout: MessageLayout,
    /// Layout programs for the configured targets, in configuration order.
    pub layout_programs: Vec<(Target, String)>,
    pub name_program: String,
    pub storage: StorageDecision,
}

impl CompiledMessage {
    pub fn layout_program(&self, target: Target) -> Option<&str> {
        self.layout_programs
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, program)| program.as_str())
    }
}

/// Compiled output of one enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledEnum {
    pub id: EnumId,
    pub full_name: String,
    pub name_program: String,
}

/// Compiles the messages and enums of a pool, caching per message.
pub struct Compiler<'p> {
    pool: &'p DescriptorPool,
    config: CompilerConfig,
    layouts: MessageLayoutCalculator<'p>,
    storage: StorageAnalysis<'p>,
    messages: IndexMap<MessageId, Arc<CompiledMessage>>,
}

impl<'p> Compiler<'p> {
    pub fn new(pool: &'p DescriptorPool, config: CompilerConfig) -> Self {
        let storage = StorageAnalysis::new(pool, &config);
        Self {
            pool,
            config,
            layouts: MessageLayoutCalculator::new(pool),
            storage,
            messages: IndexMap::new(),
        }
    }

    pub fn pool(&self) -> &'p DescriptorPool {
        self.pool
    }

    pub fn compile_message(&mut self, id: MessageId) -> Result<Arc<CompiledMessage>> {
        if let Some(compiled) = self.messages.get(&id) {
            return Ok(Arc::clone(compiled));
        }

        let pool = self.pool;
        let layout = self.layouts.calculate(id);
        let programs = layout.encode()?;
        let layout_programs = self
            .config
            .selected_targets()
            .iter()
            .map(|&target| (target, programs.get(target).clone()))
            .collect();

        let compiled = Arc::new(CompiledMessage {
            id,
            full_name: pool.message(id).full_name.clone(),
            layout,
            layout_programs,
            name_program: message_name_table(pool, id),
            storage: self.storage.decide(id),
        });
        debug!(message = %compiled.full_name, "compiled");
        self.messages.insert(id, Arc::clone(&compiled));
        Ok(compiled)
    }

    pub fn compile_enum(&self, id: EnumId) -> CompiledEnum {
        CompiledEnum {
            id,
            full_name: self.pool.enum_type(id).full_name.clone(),
            name_program: enum_name_table(self.pool, id),
        }
    }

    /// Every message of the pool, file by file.
    pub fn compile_all(&mut self) -> Result<Vec<Arc<CompiledMessage>>> {
        let pool = self.pool;
        pool.messages().map(|id| self.compile_message(id)).collect()
    }

    /// Number of messages compiled so far.
    pub fn cached(&self) -> usize {
        self.messages.len()
    }
}

/// Names claimed by emitted outputs.
#[derive(Clone, Debug, Default)]
pub struct OutputNames {
    names: IndexSet<String>,
}

impl OutputNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.names.contains(&name) {
            return Err(CompileError::DuplicateOutputName(name));
        }
        self.names.insert(name);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
