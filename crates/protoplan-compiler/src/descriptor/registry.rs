//! Name to node lookup.
//!
//! Files are keyed by their declared name. Every other element is keyed by
//! its full name with a leading dot, the same spelling descriptor records use
//! for type references.

use indexmap::IndexMap;

use super::ids::{EnumId, FileId, MessageId, ServiceId};

/// A registered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRef {
    File(FileId),
    Message(MessageId),
    Enum(EnumId),
    Service(ServiceId),
}

/// Registry populated during allocation and read during bind.
#[derive(Clone, Debug, Default)]
pub struct SchemaRegistry {
    files: IndexMap<String, FileId>,
    types: IndexMap<String, NodeRef>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under `name`.
    ///
    /// Returns the previously registered node when the name was taken.
    pub fn register(&mut self, name: impl Into<String>, node: NodeRef) -> Option<NodeRef> {
        let name = name.into();
        match node {
            NodeRef::File(id) => self.files.insert(name, id).map(NodeRef::File),
            _ => self.types.insert(name, node),
        }
    }

    /// Look up a type by registry key (`.pkg.Name`) or file by its name.
    pub fn lookup(&self, name: &str) -> Option<NodeRef> {
        if name.starts_with('.') {
            return self.types.get(name).copied();
        }
        self.files.get(name).copied().map(NodeRef::File)
    }

    pub fn file(&self, name: &str) -> Option<FileId> {
        self.files.get(name).copied()
    }

    pub fn message(&self, key: &str) -> Option<MessageId> {
        match self.types.get(key) {
            Some(NodeRef::Message(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn enum_type(&self, key: &str) -> Option<EnumId> {
        match self.types.get(key) {
            Some(NodeRef::Enum(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn service(&self, key: &str) -> Option<ServiceId> {
        match self.types.get(key) {
            Some(NodeRef::Service(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of registered types (files excluded).
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeRef)> {
        self.types.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Registered file names in registration order.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}
