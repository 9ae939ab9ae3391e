//! Name-table programs.
//!
//! Field tables pick the smallest instruction that reproduces both names:
//! `same` when the JSON name is the proto name, `standard` when it is the
//! derived camel-case form, `unique` otherwise. Group-like fields store
//! their message name. Enum tables fold aliases into their canonical value.

use protoplan_bytecode::NameTableWriter;
use protoplan_core::naming::to_json_field_name;
use tracing::debug;

use crate::descriptor::{DescriptorPool, EnumId, FieldDescriptor, MessageId};

/// Name program for the fields of `message`.
#[tracing::instrument(skip_all, fields(message = %pool.message(message).full_name))]
pub fn message_name_table(pool: &DescriptorPool, message: MessageId) -> String {
    let descriptor = pool.message(message);
    let mut writer = NameTableWriter::new();

    for &id in descriptor.fields_by_number() {
        write_field(&mut writer, pool, pool.field(id));
    }
    for name in &descriptor.reserved_names {
        writer.write_reserved_name(name);
    }
    for range in descriptor.reserved_ranges.iter().filter(|r| !r.is_empty()) {
        writer.write_reserved_numbers(range.start..=range.end - 1);
    }

    debug!(fields = descriptor.fields.len(), "message names written");
    writer.into_program()
}

fn write_field(writer: &mut NameTableWriter, pool: &DescriptorPool, field: &FieldDescriptor) {
    if field.is_group_like()
        && let Some(target) = field.message_type()
    {
        writer.write_group(field.number, &pool.message(target).name);
        return;
    }

    if field.json_name == field.name {
        writer.write_same(field.number, &field.name);
    } else if field.json_name == to_json_field_name(&field.name) {
        writer.write_standard(field.number, &field.name);
    } else {
        writer.write_unique(field.number, &field.name, &field.json_name);
    }
}

/// Name program for the values of `enum_id`.
///
/// Values are written in number order; for a number declared more than once
/// only the first value appears, carrying the others as aliases.
#[tracing::instrument(skip_all, fields(r#enum = %pool.enum_type(enum_id).full_name))]
pub fn enum_name_table(pool: &DescriptorPool, enum_id: EnumId) -> String {
    let descriptor = pool.enum_type(enum_id);
    let mut writer = NameTableWriter::new();

    let mut canonical: Vec<_> = descriptor
        .values
        .iter()
        .copied()
        .filter(|&id| pool.enum_value_by_number(enum_id, pool.enum_value(id).number) == Some(id))
        .collect();
    canonical.sort_by_key(|&id| pool.enum_value(id).number);

    for id in canonical {
        let value = pool.enum_value(id);
        let aliases: Vec<&str> = pool
            .enum_aliases(id)
            .into_iter()
            .map(|alias| pool.enum_value(alias).name.as_str())
            .collect();
        if aliases.is_empty() {
            writer.write_same(value.number, &value.name);
        } else {
            writer.write_aliased(value.number, &value.name, &aliases);
        }
    }
    for name in &descriptor.reserved_names {
        writer.write_reserved_name(name);
    }
    for range in &descriptor.reserved_ranges {
        writer.write_reserved_numbers(range.clone());
    }

    debug!(values = descriptor.values.len(), "enum names written");
    writer.into_program()
}
