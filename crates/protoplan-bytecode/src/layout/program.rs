//! Whole-message layout plans and their program encoding.

use super::{FIELD_LEN, FieldLayout, HEADER_LEN, LayoutHeader};
use crate::{BytecodeError, Result};

/// Storage plan of one message on one pointer-width target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Total storage bytes.
    pub size: u32,
    pub required_count: u32,
    /// Fields tracked by has-bits; has-bit indices are `0..explicit_presence_count`.
    pub explicit_presence_count: u32,
    pub dense_below: u32,
    /// One record per field, ascending by number.
    pub fields: Vec<FieldLayout>,
}

impl LayoutPlan {
    pub fn header(&self) -> LayoutHeader {
        LayoutHeader {
            size: self.size,
            field_count: self.fields.len() as u32,
            required_count: self.required_count,
            explicit_presence_count: self.explicit_presence_count,
            dense_below: self.dense_below,
        }
    }

    pub fn has_bit_count(&self) -> u32 {
        self.explicit_presence_count
    }

    /// Bytes reserved for has-bits: one bit per declared field, rounded up.
    pub fn has_bit_bytes(&self) -> u32 {
        (self.fields.len() as u32).div_ceil(8)
    }

    pub fn field(&self, number: u32) -> Option<&FieldLayout> {
        self.fields
            .binary_search_by_key(&number, |f| f.number)
            .ok()
            .map(|i| &self.fields[i])
    }
}

/// Encode `plan` as a fixed-width layout program.
pub fn encode_layout(plan: &LayoutPlan) -> Result<String> {
    let mut out = String::with_capacity(HEADER_LEN + plan.fields.len() * FIELD_LEN);
    plan.header().write(&mut out)?;
    for field in &plan.fields {
        field.write(&mut out)?;
    }
    Ok(out)
}

/// Decode a layout program produced by `encode_layout`.
pub fn decode_layout(program: &str) -> Result<LayoutPlan> {
    let mut units = program.chars();
    let header = LayoutHeader::read(&mut units)?;

    let count = header.field_count as usize;
    let fields = (0..count)
        .map(|_| FieldLayout::read(&mut units))
        .collect::<Result<Vec<_>>>()?;
    if units.next().is_some() {
        return Err(BytecodeError::TrailingData(count));
    }

    Ok(LayoutPlan {
        size: header.size,
        required_count: header.required_count,
        explicit_presence_count: header.explicit_presence_count,
        dense_below: header.dense_below,
        fields,
    })
}
