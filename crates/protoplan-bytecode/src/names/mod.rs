//! Name tables.
//!
//! A name table maps field or enum numbers to their proto and JSON names,
//! in ascending number order, followed by reserved names and ranges.
//! Numbers are delta-encoded against the previous entry; a delta of one
//! uses the operand-free `*Next` opcode.

mod decode;
mod opcode;
mod writer;


pub use decode::{NameEntry, decode_names};
pub use opcode::NameOpcode;
pub use writer::NameTableWriter;
