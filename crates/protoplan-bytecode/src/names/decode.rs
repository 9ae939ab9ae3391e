use std::ops::RangeInclusive;

use protoplan_core::naming::to_json_field_name;

use super::NameOpcode;
use crate::{BytecodeReader, Result};

/// One decoded name-table instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NameEntry {
    Same { number: i32, name: String },
    Standard { number: i32, name: String },
    Unique { number: i32, proto: String, json: String },
    Group { number: i32, name: String },
    Aliased { number: i32, name: String, aliases: Vec<String> },
    ReservedName(String),
    ReservedNumbers(RangeInclusive<i32>),
}

impl NameEntry {
    pub fn number(&self) -> Option<i32> {
        match self {
            NameEntry::Same { number, .. }
            | NameEntry::Standard { number, .. }
            | NameEntry::Unique { number, .. }
            | NameEntry::Group { number, .. }
            | NameEntry::Aliased { number, .. } => Some(*number),
            NameEntry::ReservedName(_) | NameEntry::ReservedNumbers(_) => None,
        }
    }

    pub fn proto_name(&self) -> Option<&str> {
        match self {
            NameEntry::Same { name, .. }
            | NameEntry::Standard { name, .. }
            | NameEntry::Group { name, .. }
            | NameEntry::Aliased { name, .. } => Some(name),
            NameEntry::Unique { proto, .. } => Some(proto),
            NameEntry::ReservedName(_) | NameEntry::ReservedNumbers(_) => None,
        }
    }

    /// JSON name the runtime derives for this entry.
    pub fn json_name(&self) -> Option<String> {
        match self {
            NameEntry::Same { name, .. } | NameEntry::Aliased { name, .. } => Some(name.clone()),
            NameEntry::Standard { name, .. } => Some(to_json_field_name(name)),
            NameEntry::Unique { json, .. } => Some(json.clone()),
            NameEntry::Group { name, .. } => Some(name.to_lowercase()),
            NameEntry::ReservedName(_) | NameEntry::ReservedNumbers(_) => None,
        }
    }
}

/// Decode a program written by `NameTableWriter`.
pub fn decode_names(program: &str) -> Result<Vec<NameEntry>> {
    let mut reader = BytecodeReader::<NameOpcode>::new(program)?;
    let mut entries = Vec::new();
    let mut previous = 0i32;

    while reader.has_data() {
        let op = reader.next_opcode()?;
        let number = if op.has_delta() {
            previous.wrapping_add(reader.next_i32()?)
        } else {
            previous.wrapping_add(1)
        };

        let entry = match op {
            NameOpcode::SameNext | NameOpcode::SameDelta => NameEntry::Same {
                number,
                name: reader.next_nul_terminated_string()?,
            },
            NameOpcode::StandardNext | NameOpcode::StandardDelta => NameEntry::Standard {
                number,
                name: reader.next_nul_terminated_string()?,
            },
            NameOpcode::UniqueNext | NameOpcode::UniqueDelta => NameEntry::Unique {
                number,
                proto: reader.next_nul_terminated_string()?,
                json: reader.next_nul_terminated_string()?,
            },
            NameOpcode::GroupNext | NameOpcode::GroupDelta => NameEntry::Group {
                number,
                name: reader.next_nul_terminated_string()?,
            },
            NameOpcode::AliasNext | NameOpcode::AliasDelta => NameEntry::Aliased {
                number,
                name: reader.next_nul_terminated_string()?,
                aliases: reader.next_string_array()?,
            },
            NameOpcode::ReservedName => {
                entries.push(NameEntry::ReservedName(reader.next_nul_terminated_string()?));
                continue;
            }
            NameOpcode::ReservedNumbers => {
                let start = reader.next_i32()?;
                let count = match reader.next_i32()? as u32 {
                    0 => 1i64 << 32,
                    count => i64::from(count),
                };
                let end = (i64::from(start) + count - 1) as i32;
                entries.push(NameEntry::ReservedNumbers(start..=end));
                continue;
            }
        };
        previous = number;
        entries.push(entry);
    }

    Ok(entries)
}
