//! Pool construction, phase 2: bind.
//!
//! Turns the names recorded during allocation into handles. Runs once per
//! file right after its allocation; the file's dependencies were bound
//! earlier and every type the file declares is already registered, so
//! forward and cyclic references within the file resolve.

use protoplan_core::FieldType;
use tracing::debug;

use super::builder::Watermark;
use super::ids::{FieldId, FileId, MessageId};
use super::nodes::TypeRef;
use super::pool::{DescriptorPool, key_for};
use crate::invariants::{
    ensure_dependency, ensure_enum_type, ensure_message_type, ensure_type_name,
};

impl DescriptorPool {
    #[tracing::instrument(skip_all, fields(file = %self.files[file.index()].name))]
    pub(crate) fn bind_file(&mut self, file: FileId, mark: Watermark) {
        self.bind_dependencies(file);

        for index in mark.fields..self.fields.len() {
            self.bind_field(FieldId::new(index));
        }
        // Group-likeness reads the scopes of bound targets.
        for index in mark.fields..self.fields.len() {
            let id = FieldId::new(index);
            let is_group_like = self.compute_group_like(id);
            self.fields[index].is_group_like = is_group_like;
        }

        for index in mark.methods..self.methods.len() {
            let method = &self.methods[index];
            let input = self.registry.message(&key_for(&method.input_name));
            let output = self.registry.message(&key_for(&method.output_name));
            let input = ensure_message_type(input, &method.full_name, &method.input_name);
            let output = ensure_message_type(output, &method.full_name, &method.output_name);
            let method = &mut self.methods[index];
            method.input_type = Some(input);
            method.output_type = Some(output);
        }

        debug!(
            messages = self.messages.len() - mark.messages,
            fields = self.fields.len() - mark.fields,
            "bound"
        );
    }

    fn bind_dependencies(&mut self, file: FileId) {
        let descriptor = &self.files[file.index()];
        let dependencies = descriptor
            .dependency_names
            .iter()
            .map(|name| ensure_dependency(self.registry.file(name), &descriptor.name, name))
            .collect();
        self.files[file.index()].dependencies = dependencies;
    }

    fn bind_field(&mut self, id: FieldId) {
        let field = &self.fields[id.index()];

        let containing_type = match &field.extendee_name {
            Some(extendee) => {
                let extended = self.registry.message(&key_for(extendee));
                Some(ensure_message_type(extended, &field.full_name, extendee))
            }
            None => field.containing_type,
        };

        let mut field_type = field.field_type;
        let target = if field_type == FieldType::Enum {
            let name = ensure_type_name(field.type_name.as_deref(), &field.full_name);
            let found = self.registry.enum_type(&key_for(name));
            Some(TypeRef::Enum(ensure_enum_type(found, &field.full_name, name)))
        } else if field_type.is_message_like() {
            let name = ensure_type_name(field.type_name.as_deref(), &field.full_name);
            let found = self.registry.message(&key_for(name));
            let message = ensure_message_type(found, &field.full_name, name);
            let in_map_entry = containing_type.is_some_and(|c| self.messages[c.index()].is_map_entry);
            if field_type == FieldType::Group
                && (self.messages[message.index()].is_map_entry || in_map_entry)
            {
                field_type = FieldType::Message;
            }
            Some(TypeRef::Message(message))
        } else {
            None
        };

        let is_map = field_type == FieldType::Message
            && matches!(target, Some(TypeRef::Message(m)) if self.messages[m.index()].is_map_entry);

        let field = &mut self.fields[id.index()];
        field.containing_type = containing_type;
        field.field_type = field_type;
        field.target = target;
        field.is_map = is_map;
    }

    /// A group whose field name is its message name lowercased, with the
    /// message declared at the scope the field itself lives in.
    fn compute_group_like(&self, id: FieldId) -> bool {
        let field = &self.fields[id.index()];
        if field.field_type != FieldType::Group {
            return false;
        }
        let Some(TypeRef::Message(target)) = field.target else {
            return false;
        };
        let message = &self.messages[target.index()];
        if field.name != message.name.to_lowercase() {
            return false;
        }

        let expected_scope: Option<MessageId> = if field.is_extension {
            match field.declared_in {
                None => return message.file == field.file && message.containing_type.is_none(),
                Some(scope) => Some(scope),
            }
        } else {
            field.containing_type
        };
        message.containing_type == expected_scope
    }
}
