//! Errors raised while encoding or decoding programs.

/// Malformed or unencodable program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BytecodeError {
    #[error("unsupported program format {0}")]
    UnsupportedFormat(u64),

    #[error("unsupported layout version {0}")]
    UnsupportedLayoutVersion(u64),

    #[error("unexpected end of program")]
    UnexpectedEnd,

    #[error("invalid opcode {0}")]
    InvalidOpcode(u64),

    #[error("unit {0:?} is not a 7-bit group")]
    InvalidUnit(char),

    #[error("value {value} does not fit in {width} groups")]
    Overflow { value: u64, width: u8 },

    #[error("value {0} does not fit in 32 bits")]
    Int32Overflow(u64),

    #[error("unknown field type tag {0}")]
    UnknownFieldType(u64),

    #[error("invalid field mode bits {0:#x}")]
    InvalidFieldMode(u64),

    #[error("trailing data after {0} fields")]
    TrailingData(usize),
}

pub type Result<T> = std::result::Result<T, BytecodeError>;
