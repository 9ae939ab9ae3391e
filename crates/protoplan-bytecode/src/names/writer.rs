use std::ops::RangeInclusive;

use super::NameOpcode;
use crate::BytecodeWriter;

/// Builds a name-table program.
///
/// Numbered entries must be written in ascending number order.
#[derive(Clone, Debug, Default)]
pub struct NameTableWriter {
    bytecode: BytecodeWriter<NameOpcode>,
    previous_number: i32,
}

impl NameTableWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_same(&mut self, number: i32, name: &str) {
        self.write_numbered(number, NameOpcode::SameNext, NameOpcode::SameDelta);
        self.bytecode.write_nul_terminated_string(name);
    }

    pub fn write_standard(&mut self, number: i32, name: &str) {
        self.write_numbered(number, NameOpcode::StandardNext, NameOpcode::StandardDelta);
        self.bytecode.write_nul_terminated_string(name);
    }

    pub fn write_unique(&mut self, number: i32, proto_name: &str, json_name: &str) {
        self.write_numbered(number, NameOpcode::UniqueNext, NameOpcode::UniqueDelta);
        self.bytecode.write_nul_terminated_string(proto_name);
        self.bytecode.write_nul_terminated_string(json_name);
    }

    pub fn write_group(&mut self, number: i32, message_name: &str) {
        self.write_numbered(number, NameOpcode::GroupNext, NameOpcode::GroupDelta);
        self.bytecode.write_nul_terminated_string(message_name);
    }

    pub fn write_aliased<S: AsRef<str>>(&mut self, number: i32, name: &str, aliases: &[S]) {
        self.write_numbered(number, NameOpcode::AliasNext, NameOpcode::AliasDelta);
        self.bytecode.write_nul_terminated_string(name);
        self.bytecode.write_string_array(aliases);
    }

    pub fn write_reserved_name(&mut self, name: &str) {
        self.bytecode.write_opcode(NameOpcode::ReservedName);
        self.bytecode.write_nul_terminated_string(name);
    }

    /// Reserve `numbers`, written as the lower bound and a count.
    ///
    /// The count is stored as a `u32` bit pattern; a count of 0 stands for
    /// the full `i32` span, the only range whose count does not fit.
    pub fn write_reserved_numbers(&mut self, numbers: RangeInclusive<i32>) {
        let (start, end) = numbers.into_inner();
        let count = i64::from(end) - i64::from(start) + 1;
        self.bytecode.write_opcode(NameOpcode::ReservedNumbers);
        self.bytecode.write_i32(start);
        self.bytecode.write_i32(count as u32 as i32);
    }

    pub fn has_data(&self) -> bool {
        self.bytecode.has_data()
    }

    pub fn program(&self) -> &str {
        self.bytecode.program()
    }

    pub fn into_program(self) -> String {
        self.bytecode.into_program()
    }

    pub fn to_literal(&self) -> String {
        self.bytecode.to_literal()
    }

    fn write_numbered(&mut self, number: i32, next: NameOpcode, delta: NameOpcode) {
        let step = number.wrapping_sub(self.previous_number);
        self.previous_number = number;
        if step == 1 {
            self.bytecode.write_opcode(next);
        } else {
            self.bytecode.write_opcode(delta);
            self.bytecode.write_i32(step);
        }
    }
}
