//! Layout program header (16 units).

use super::{HEADER_WIDTHS, LAYOUT_VERSION};
use crate::base128::{read_fixed, write_fixed};
use crate::{BytecodeError, Result};

/// Message-wide layout values for one target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutHeader {
    /// Total storage bytes on this target.
    pub size: u32,
    pub field_count: u32,
    pub required_count: u32,
    /// Number of has-bit tracked fields.
    pub explicit_presence_count: u32,
    /// Fields `1..dense_below` are all declared.
    pub dense_below: u32,
}

impl LayoutHeader {
    pub fn write(&self, out: &mut String) -> Result<()> {
        let [w_version, w_size, w_count, w_required, w_presence, w_dense] = HEADER_WIDTHS;
        write_fixed(out, LAYOUT_VERSION, w_version)?;
        write_fixed(out, u64::from(self.size), w_size)?;
        write_fixed(out, u64::from(self.field_count), w_count)?;
        write_fixed(out, u64::from(self.required_count), w_required)?;
        write_fixed(out, u64::from(self.explicit_presence_count), w_presence)?;
        write_fixed(out, u64::from(self.dense_below), w_dense)?;
        Ok(())
    }

    pub fn read<I>(units: &mut I) -> Result<Self>
    where
        I: Iterator<Item = char>,
    {
        let [w_version, w_size, w_count, w_required, w_presence, w_dense] = HEADER_WIDTHS;
        let version = read_fixed(units, w_version)?;
        if version != LAYOUT_VERSION {
            return Err(BytecodeError::UnsupportedLayoutVersion(version));
        }
        // Every slot is at most 21 bits wide, so the narrowing casts are lossless.
        Ok(Self {
            size: read_fixed(units, w_size)? as u32,
            field_count: read_fixed(units, w_count)? as u32,
            required_count: read_fixed(units, w_required)? as u32,
            explicit_presence_count: read_fixed(units, w_presence)? as u32,
            dense_below: read_fixed(units, w_dense)? as u32,
        })
    }
}
