//! Generic instruction reader, the inverse of `BytecodeWriter`.

use std::marker::PhantomData;
use std::str::Chars;

use crate::base128::read_varint;
use crate::writer::{Opcode, PROGRAM_FORMAT};
use crate::{BytecodeError, Result};

#[derive(Clone, Debug)]
pub struct BytecodeReader<'a, Op> {
    units: Chars<'a>,
    _op: PhantomData<Op>,
}

impl<'a, Op: Opcode> BytecodeReader<'a, Op> {
    /// Start reading `program`, checking its format unit.
    pub fn new(program: &'a str) -> Result<Self> {
        let mut units = program.chars();
        let format = read_varint(&mut units)?;
        if format != PROGRAM_FORMAT {
            return Err(BytecodeError::UnsupportedFormat(format));
        }
        Ok(Self {
            units,
            _op: PhantomData,
        })
    }

    pub fn has_data(&self) -> bool {
        !self.units.as_str().is_empty()
    }

    pub fn next_opcode(&mut self) -> Result<Op> {
        let raw = self.next_u64()?;
        if raw == 0 {
            return Err(BytecodeError::InvalidOpcode(raw));
        }
        Op::from_raw(raw).ok_or(BytecodeError::InvalidOpcode(raw))
    }

    pub fn next_i32(&mut self) -> Result<i32> {
        let value = self.next_u64()?;
        let bits = u32::try_from(value).map_err(|_| BytecodeError::Int32Overflow(value))?;
        Ok(bits as i32)
    }

    pub fn next_u64(&mut self) -> Result<u64> {
        read_varint(&mut self.units)
    }

    pub fn next_nul_terminated_string(&mut self) -> Result<String> {
        let mut s = String::new();
        loop {
            match self.units.next() {
                Some('\0') => return Ok(s),
                Some(c) => s.push(c),
                None => return Err(BytecodeError::UnexpectedEnd),
            }
        }
    }

    pub fn next_string_array(&mut self) -> Result<Vec<String>> {
        let count = self.next_u64()?;
        (0..count)
            .map(|_| self.next_nul_terminated_string())
            .collect()
    }
}
