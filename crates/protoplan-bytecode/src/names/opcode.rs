use crate::Opcode;

/// Name-table instruction set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NameOpcode {
    /// Proto name only; the JSON name is identical.
    SameNext = 1,
    SameDelta = 2,
    /// Proto name only; the JSON name is its camel-case derivation.
    StandardNext = 3,
    StandardDelta = 4,
    /// Proto name and an unrelated JSON name.
    UniqueNext = 5,
    UniqueDelta = 6,
    /// Group-like field: the message name, lowercased for text and JSON.
    GroupNext = 7,
    GroupDelta = 8,
    /// Canonical enum value name followed by its alias names.
    AliasNext = 9,
    AliasDelta = 10,
    ReservedName = 11,
    /// Lower bound, then the count of reserved numbers.
    ReservedNumbers = 12,
}

impl NameOpcode {
    /// Whether the opcode is followed by a number delta operand.
    pub fn has_delta(self) -> bool {
        matches!(
            self,
            NameOpcode::SameDelta
                | NameOpcode::StandardDelta
                | NameOpcode::UniqueDelta
                | NameOpcode::GroupDelta
                | NameOpcode::AliasDelta
        )
    }
}

impl Opcode for NameOpcode {
    fn raw(self) -> u64 {
        self as u64
    }

    fn from_raw(raw: u64) -> Option<Self> {
        use NameOpcode::*;
        let op = match raw {
            1 => SameNext,
            2 => SameDelta,
            3 => StandardNext,
            4 => StandardDelta,
            5 => UniqueNext,
            6 => UniqueDelta,
            7 => GroupNext,
            8 => GroupDelta,
            9 => AliasNext,
            10 => AliasDelta,
            11 => ReservedName,
            12 => ReservedNumbers,
            _ => return None,
        };
        Some(op)
    }
}
