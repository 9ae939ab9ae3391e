//! Invariant checks excluded from coverage reports.
//!
//! Descriptor input is assumed to be validated by the frontend that produced
//! it. Violations here mean that assumption broke, so they panic.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::descriptor::{EnumId, FileId, MessageId};

#[inline]
pub fn ensure_bound<T: Copy>(value: Option<T>, owner: &str, what: &str) -> T {
    value.unwrap_or_else(|| panic!("descriptor: {what} of `{owner}` read before bind"))
}

#[inline]
pub fn ensure_dependency(file: Option<FileId>, importer: &str, name: &str) -> FileId {
    file.unwrap_or_else(|| {
        panic!("bind: `{importer}` imports `{name}`, which was not added before it")
    })
}

#[inline]
pub fn ensure_message_type(id: Option<MessageId>, owner: &str, name: &str) -> MessageId {
    id.unwrap_or_else(|| panic!("bind: `{owner}` references unknown message type `{name}`"))
}

#[inline]
pub fn ensure_enum_type(id: Option<EnumId>, owner: &str, name: &str) -> EnumId {
    id.unwrap_or_else(|| panic!("bind: `{owner}` references unknown enum type `{name}`"))
}

#[inline]
pub fn ensure_type_name<'a>(name: Option<&'a str>, owner: &str) -> &'a str {
    name.unwrap_or_else(|| panic!("bind: `{owner}` has a message or enum type but no type name"))
}

#[inline]
pub fn ensure_oneof_index(index: i32, oneof_count: usize, field: &str) -> usize {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < oneof_count)
        .unwrap_or_else(|| {
            panic!("allocate: `{field}` has oneof index {index} but its message declares {oneof_count} oneofs")
        })
}

#[inline]
pub fn assert_unique_name(previous_owner_exists: bool, name: &str) {
    assert!(!previous_owner_exists, "allocate: `{name}` is registered twice");
}

#[inline]
pub fn assert_synthetic_oneofs_last(synthetic: &[bool], message: &str) {
    let first_synthetic = synthetic.iter().position(|&s| s).unwrap_or(synthetic.len());
    assert!(
        synthetic[first_synthetic..].iter().all(|&s| s),
        "allocate: `{message}` declares a real oneof after a synthetic one"
    );
}

#[inline]
pub fn assert_field_number(number: i32, valid: bool, field: &str) {
    assert!(valid, "allocate: `{field}` has invalid field number {number}");
}

#[inline]
pub fn assert_unique_field_number(duplicate: Option<i32>, message: &str) {
    if let Some(number) = duplicate {
        panic!("allocate: `{message}` declares field number {number} more than once");
    }
}

#[inline]
pub fn assert_map_entry_shape(field_count: usize, message: &str) {
    assert!(
        field_count == 2,
        "allocate: map entry `{message}` must have exactly a key and a value field, found {field_count}"
    );
}
