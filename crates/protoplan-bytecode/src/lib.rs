#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Bytecode formats for protoplan.
//!
//! This crate contains:
//! - Group codecs (`base128`): fixed-width 7-bit groups and 6-bit varints
//! - Generic instruction writer/reader over an opcode enumeration
//! - Layout programs: per-target message storage plans and their encoding
//! - Name tables: proto/JSON names, aliases and reserved metadata
//! - Literal rendering and human-readable dumps
//!
//! Programs are strings of Unicode scalars. Every integer group is a scalar
//! below 0x80, so a program is plain ASCII unless it embeds non-ASCII names.

pub mod base128;
pub mod dump;
mod error;
pub mod layout;
pub mod literal;
pub mod names;
mod reader;
mod writer;

#[cfg(test)]
mod writer_tests;

pub use dump::{dump_layout, dump_names};
pub use error::{BytecodeError, Result};
pub use layout::{
    Cardinality, FieldLayout, FieldMode, LAYOUT_VERSION, LayoutHeader, LayoutPlan, Presence,
    decode_layout, encode_layout,
};
pub use literal::to_literal;
pub use names::{NameEntry, NameOpcode, NameTableWriter, decode_names};
pub use reader::BytecodeReader;
pub use writer::{BytecodeWriter, Opcode, PROGRAM_FORMAT};
