//! Per-field layout records.

use std::fmt;

use protoplan_core::FieldType;

use super::FIELD_WIDTHS;
use crate::base128::{read_fixed, write_fixed};
use crate::{BytecodeError, Result};

/// Field numbers occupy the low 29 bits of the number slot.
const NUMBER_MASK: u64 = (1 << 29) - 1;
/// Mode bits start at bit 28; bit 0 of the mode is never set, so the two
/// do not overlap.
const MODE_SHIFT: u32 = 28;

const MODE_ARRAY: u8 = 0b10;
const MODE_MAP: u8 = 0b100;
const MODE_CARDINALITY_MASK: u8 = 0b110;
const MODE_PACKED: u8 = 0b1000;
const MODE_EXTENSION: u8 = 0b1_0000;
const MODE_VALID_BITS: u8 = MODE_CARDINALITY_MASK | MODE_PACKED | MODE_EXTENSION;

/// Largest presence value that still denotes a has-bit.
const HAS_BIT_LIMIT: u32 = 0x2000;
const PRESENCE_MASK: u16 = 0x3fff;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cardinality {
    #[default]
    Scalar,
    Array,
    Map,
}

/// Small tag packed into the high bits of a field's number slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldMode {
    pub cardinality: Cardinality,
    pub is_packed: bool,
    pub is_extension: bool,
}

impl FieldMode {
    pub fn raw(self) -> u8 {
        let mut raw = match self.cardinality {
            Cardinality::Scalar => 0,
            Cardinality::Array => MODE_ARRAY,
            Cardinality::Map => MODE_MAP,
        };
        if self.is_packed {
            raw |= MODE_PACKED;
        }
        if self.is_extension {
            raw |= MODE_EXTENSION;
        }
        raw
    }

    pub fn from_raw(raw: u8) -> Result<Self> {
        if raw & !MODE_VALID_BITS != 0 {
            return Err(BytecodeError::InvalidFieldMode(u64::from(raw)));
        }
        let cardinality = match raw & MODE_CARDINALITY_MASK {
            0 => Cardinality::Scalar,
            MODE_ARRAY => Cardinality::Array,
            MODE_MAP => Cardinality::Map,
            _ => return Err(BytecodeError::InvalidFieldMode(u64::from(raw))),
        };
        Ok(Self {
            cardinality,
            is_packed: raw & MODE_PACKED != 0,
            is_extension: raw & MODE_EXTENSION != 0,
        })
    }
}

/// How the runtime tracks whether a field is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Implicit presence: set means non-default.
    #[default]
    None,
    /// Bit index into the has-bit region.
    HasBit(u32),
    /// Byte offset of the oneof slot holding the set member's number.
    OneofSlot(u32),
}

impl Presence {
    /// 14-bit encoding: 0 none, `index + 1` for has-bits, and the
    /// complemented offset (always `>= 0x2000`) for oneof slots.
    pub fn encode(self) -> Result<u16> {
        match self {
            Presence::None => Ok(0),
            Presence::HasBit(index) if index < HAS_BIT_LIMIT - 1 => Ok(index as u16 + 1),
            Presence::OneofSlot(offset) if offset < HAS_BIT_LIMIT => {
                Ok(!(offset as u16) & PRESENCE_MASK)
            }
            Presence::HasBit(v) | Presence::OneofSlot(v) => Err(BytecodeError::Overflow {
                value: u64::from(v),
                width: FIELD_WIDTHS[2],
            }),
        }
    }

    pub fn decode(raw: u16) -> Self {
        let raw = raw & PRESENCE_MASK;
        if raw == 0 {
            Presence::None
        } else if u32::from(raw) < HAS_BIT_LIMIT {
            Presence::HasBit(u32::from(raw - 1))
        } else {
            Presence::OneofSlot(u32::from(!raw & PRESENCE_MASK))
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presence::None => f.write_str("-"),
            Presence::HasBit(index) => write!(f, "bit {index}"),
            Presence::OneofSlot(offset) => write!(f, "oneof @{offset}"),
        }
    }
}

/// Storage record of one field on one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub number: u32,
    pub mode: FieldMode,
    /// Byte offset of the field's storage.
    pub offset: u32,
    pub presence: Presence,
    /// 1-based submessage table index, 0 when the field is not a message.
    pub submessage_index: u16,
    pub field_type: FieldType,
}

impl FieldLayout {
    pub fn write(&self, out: &mut String) -> Result<()> {
        let [w_number, w_offset, w_presence, w_submessage, w_type] = FIELD_WIDTHS;
        let number = u64::from(self.number);
        if number > NUMBER_MASK {
            return Err(BytecodeError::Overflow {
                value: number,
                width: w_number,
            });
        }
        let tagged = number | (u64::from(self.mode.raw()) << MODE_SHIFT);
        write_fixed(out, tagged, w_number)?;
        write_fixed(out, u64::from(self.offset), w_offset)?;
        write_fixed(out, u64::from(self.presence.encode()?), w_presence)?;
        write_fixed(out, u64::from(self.submessage_index), w_submessage)?;
        write_fixed(out, u64::from(self.field_type.raw()), w_type)?;
        Ok(())
    }

    pub fn read<I>(units: &mut I) -> Result<Self>
    where
        I: Iterator<Item = char>,
    {
        let [w_number, w_offset, w_presence, w_submessage, w_type] = FIELD_WIDTHS;
        let tagged = read_fixed(units, w_number)?;
        let offset = read_fixed(units, w_offset)?;
        let presence = read_fixed(units, w_presence)?;
        let submessage_index = read_fixed(units, w_submessage)?;
        let raw_type = read_fixed(units, w_type)?;

        let mode_bits = (tagged >> MODE_SHIFT) & !1;
        let mode = u8::try_from(mode_bits)
            .map_err(|_| BytecodeError::InvalidFieldMode(mode_bits))
            .and_then(FieldMode::from_raw)?;
        let field_type = FieldType::from_raw(raw_type as u8)
            .ok_or(BytecodeError::UnknownFieldType(raw_type))?;

        // Slot widths bound every value below, so the narrowing casts are lossless.
        Ok(Self {
            number: (tagged & NUMBER_MASK) as u32,
            mode,
            offset: offset as u32,
            presence: Presence::decode(presence as u16),
            submessage_index: submessage_index as u16,
            field_type,
        })
    }
}
