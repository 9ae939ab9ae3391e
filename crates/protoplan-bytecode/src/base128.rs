//! Integer group codecs.
//!
//! Two encodings share one unit alphabet (scalars `0x00..=0x7F`):
//! - **Fixed**: exactly `width` 7-bit groups, least-significant first. The
//!   width belongs to the slot, so no group carries a continuation marker.
//! - **Varint**: self-delimiting 6-bit groups; bit `0x40` marks that more
//!   groups follow.

use crate::{BytecodeError, Result};

const GROUP_BITS: u32 = 7;
const GROUP_MASK: u64 = 0x7f;

const VARINT_BITS: u32 = 6;
const VARINT_MASK: u64 = 0x3f;
const VARINT_CONTINUE: u64 = 0x40;

/// Largest value `width` fixed groups can hold.
pub fn fixed_max(width: u8) -> u64 {
    let bits = GROUP_BITS * width as u32;
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

/// Append `value` as exactly `width` 7-bit groups.
pub fn write_fixed(out: &mut String, value: u64, width: u8) -> Result<()> {
    if value > fixed_max(width) {
        return Err(BytecodeError::Overflow { value, width });
    }
    let mut v = value;
    for _ in 0..width {
        out.push(unit(v & GROUP_MASK));
        v >>= GROUP_BITS;
    }
    Ok(())
}

/// Read exactly `width` 7-bit groups.
pub fn read_fixed<I>(units: &mut I, width: u8) -> Result<u64>
where
    I: Iterator<Item = char>,
{
    let mut value = 0u64;
    for i in 0..width as u32 {
        let group = next_group(units)?;
        value |= group << (GROUP_BITS * i);
    }
    Ok(value)
}

/// Append `value` as a self-delimiting varint.
pub fn write_varint(out: &mut String, value: u64) {
    let mut v = value;
    while v > VARINT_MASK {
        out.push(unit((v & VARINT_MASK) | VARINT_CONTINUE));
        v >>= VARINT_BITS;
    }
    out.push(unit(v));
}

/// Read one self-delimiting varint.
pub fn read_varint<I>(units: &mut I) -> Result<u64>
where
    I: Iterator<Item = char>,
{
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let group = next_group(units)?;
        if shift < 64 {
            value |= (group & VARINT_MASK) << shift;
        }
        if group & VARINT_CONTINUE == 0 {
            return Ok(value);
        }
        shift += VARINT_BITS;
    }
}

fn next_group<I>(units: &mut I) -> Result<u64>
where
    I: Iterator<Item = char>,
{
    let c = units.next().ok_or(BytecodeError::UnexpectedEnd)?;
    let group = c as u64;
    if group > GROUP_MASK {
        return Err(BytecodeError::InvalidUnit(c));
    }
    Ok(group)
}

fn unit(group: u64) -> char {
    // Groups are masked to 7 bits, always a valid ASCII scalar.
    char::from(group as u8)
}
