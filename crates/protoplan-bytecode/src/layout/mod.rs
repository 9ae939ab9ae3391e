//! Layout programs.
//!
//! A layout program describes one message's storage for one pointer-width
//! target. Every integer occupies a fixed number of 7-bit groups, so the
//! runtime decodes it without length prefixes:
//!
//! ```text
//! header: version(1) size(3) field_count(3) required_count(3)
//!         explicit_presence_count(3) dense_below(3)
//! field:  number|mode<<28 (5) offset(3) presence(2) submessage(2) type(1)
//! ```
//!
//! Fields appear in ascending field-number order.

mod field;
mod header;
mod program;

#[cfg(test)]
mod field_tests;

pub use field::{Cardinality, FieldLayout, FieldMode, Presence};
pub use header::LayoutHeader;
pub use program::{LayoutPlan, decode_layout, encode_layout};

/// Layout program version written in the first header slot.
pub const LAYOUT_VERSION: u64 = 0;

/// Group widths of the header slots, in order.
pub const HEADER_WIDTHS: [u8; 6] = [1, 3, 3, 3, 3, 3];

/// Group widths of one field record's slots, in order.
pub const FIELD_WIDTHS: [u8; 5] = [5, 3, 2, 2, 1];

/// Units in an encoded header.
pub const HEADER_LEN: usize = 16;

/// Units in one encoded field record.
pub const FIELD_LEN: usize = 13;

const _: () = assert!(
    HEADER_WIDTHS[0] as usize
        + HEADER_WIDTHS[1] as usize
        + HEADER_WIDTHS[2] as usize
        + HEADER_WIDTHS[3] as usize
        + HEADER_WIDTHS[4] as usize
        + HEADER_WIDTHS[5] as usize
        == HEADER_LEN
);
const _: () = assert!(
    FIELD_WIDTHS[0] as usize
        + FIELD_WIDTHS[1] as usize
        + FIELD_WIDTHS[2] as usize
        + FIELD_WIDTHS[3] as usize
        + FIELD_WIDTHS[4] as usize
        == FIELD_LEN
);
