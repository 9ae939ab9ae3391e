//! Submessage index table.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::descriptor::{DescriptorPool, MessageId};

/// Message type referenced by a field, as seen by the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmessageRef {
    /// Full name of the message type (map fields reference their entry type).
    pub type_name: String,
    pub needs_is_initialized_check: bool,
}

/// One entry of a message's submessage table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmessageInfo {
    pub type_name: String,
    /// 1-based; 0 in a field record means "no submessage".
    pub index: u16,
    /// False when the type can never be uninitialized, so the runtime may
    /// skip walking it.
    pub needs_is_initialized_check: bool,
    /// Numbers of the fields referencing this type, in layout order.
    pub field_numbers: Vec<u32>,
}

/// Assigns indices to referenced message types on first sight.
#[derive(Clone, Debug, Default)]
pub struct SubmessageTable {
    entries: IndexMap<String, SubmessageInfo>,
}

impl SubmessageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `field_number` references `submessage`; returns its index.
    pub fn collect(&mut self, submessage: &SubmessageRef, field_number: u32) -> u16 {
        let next_index = u16::try_from(self.entries.len() + 1).unwrap_or(u16::MAX);
        let entry = self
            .entries
            .entry(submessage.type_name.clone())
            .or_insert_with(|| SubmessageInfo {
                type_name: submessage.type_name.clone(),
                index: next_index,
                needs_is_initialized_check: submessage.needs_is_initialized_check,
                field_numbers: Vec::new(),
            });
        entry.field_numbers.push(field_number);
        entry.index
    }

    pub fn index_of(&self, type_name: &str) -> Option<u16> {
        self.entries.get(type_name).map(|e| e.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by index.
    pub fn iter(&self) -> impl Iterator<Item = &SubmessageInfo> {
        self.entries.values()
    }

    pub fn into_entries(self) -> Vec<SubmessageInfo> {
        self.entries.into_values().collect()
    }
}

/// Memoized "can this message be uninitialized" analysis.
///
/// A message needs the check when it declares extension ranges or a
/// required field, or when any message reachable through its message and
/// group fields does.
#[derive(Clone, Debug, Default)]
pub struct InitializationAnalysis {
    cache: HashMap<MessageId, bool>,
}

impl InitializationAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needs_check(&mut self, pool: &DescriptorPool, message: MessageId) -> bool {
        if let Some(&cached) = self.cache.get(&message) {
            return cached;
        }
        let mut seen = HashSet::new();
        let result = Self::walk(pool, message, &mut seen);
        self.cache.insert(message, result);
        result
    }

    // A type already on the walk contributes nothing new: returning false
    // lets the remaining fields of the outer message be examined.
    fn walk(pool: &DescriptorPool, message: MessageId, seen: &mut HashSet<MessageId>) -> bool {
        if !seen.insert(message) {
            return false;
        }
        let descriptor = pool.message(message);
        if !descriptor.extension_ranges.is_empty() {
            return true;
        }
        pool.fields_of(message).any(|field| {
            field.is_required()
                || field
                    .message_type()
                    .is_some_and(|target| Self::walk(pool, target, seen))
        })
    }
}
