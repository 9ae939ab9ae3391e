//! Generic instruction writer.

use std::marker::PhantomData;

use crate::base128::write_varint;
use crate::literal::to_literal;

/// Program format written as the first unit of every instruction stream.
pub const PROGRAM_FORMAT: u64 = 0;

/// Instruction set of an instruction stream.
///
/// Raw value 0 is reserved: it terminates strings and never names an opcode.
pub trait Opcode: Copy {
    fn raw(self) -> u64;
    fn from_raw(raw: u64) -> Option<Self>;
}

/// Appends instructions and operands to a program string.
///
/// Integers use self-delimiting varints; strings are written scalar by
/// scalar and terminated by a zero unit.
#[derive(Clone, Debug)]
pub struct BytecodeWriter<Op> {
    code: String,
    has_data: bool,
    _op: PhantomData<Op>,
}

impl<Op: Opcode> Default for BytecodeWriter<Op> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Op: Opcode> BytecodeWriter<Op> {
    pub fn new() -> Self {
        let mut code = String::new();
        write_varint(&mut code, PROGRAM_FORMAT);
        Self {
            code,
            has_data: false,
            _op: PhantomData,
        }
    }

    /// Whether anything was written after the program format.
    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn write_opcode(&mut self, op: Op) {
        self.write_u64(op.raw());
    }

    /// Store the bit pattern zero-extended, not sign-extended.
    pub fn write_i32(&mut self, value: i32) {
        self.write_u64(u64::from(value as u32));
    }

    pub fn write_u64(&mut self, value: u64) {
        write_varint(&mut self.code, value);
        self.has_data = true;
    }

    pub fn write_nul_terminated_string(&mut self, s: &str) {
        debug_assert!(!s.contains('\0'), "names never contain NUL: {s:?}");
        self.code.push_str(s);
        self.write_u64(0);
    }

    /// Count, then each string NUL-terminated.
    pub fn write_string_array<S: AsRef<str>>(&mut self, strings: &[S]) {
        self.write_u64(strings.len() as u64);
        for s in strings {
            self.write_nul_terminated_string(s.as_ref());
        }
    }

    pub fn program(&self) -> &str {
        &self.code
    }

    pub fn into_program(self) -> String {
        self.code
    }

    pub fn to_literal(&self) -> String {
        to_literal(&self.code)
    }
}
