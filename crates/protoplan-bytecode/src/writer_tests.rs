use crate::{BytecodeError, BytecodeReader, BytecodeWriter, Opcode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TestOp {
    Push = 1,
    Label = 2,
}

impl Opcode for TestOp {
    fn raw(self) -> u64 {
        self as u64
    }

    fn from_raw(raw: u64) -> Option<Self> {
        match raw {
            1 => Some(TestOp::Push),
            2 => Some(TestOp::Label),
            _ => None,
        }
    }
}

#[test]
fn new_writer_holds_only_format() {
    let w = BytecodeWriter::<TestOp>::new();
    assert!(!w.has_data());
    assert_eq!(w.program(), "\0");
    assert_eq!(w.to_literal(), r#""\0""#);
}

#[test]
fn write_then_read_instructions() {
    let mut w = BytecodeWriter::<TestOp>::new();
    w.write_opcode(TestOp::Push);
    w.write_i32(-1);
    w.write_u64(1_000_000);
    w.write_opcode(TestOp::Label);
    w.write_nul_terminated_string("hello");
    w.write_string_array(&["a", "bc"]);
    assert!(w.has_data());

    let program = w.into_program();
    let mut r = BytecodeReader::<TestOp>::new(&program).unwrap();
    assert_eq!(r.next_opcode().unwrap(), TestOp::Push);
    assert_eq!(r.next_i32().unwrap(), -1);
    assert_eq!(r.next_u64().unwrap(), 1_000_000);
    assert_eq!(r.next_opcode().unwrap(), TestOp::Label);
    assert_eq!(r.next_nul_terminated_string().unwrap(), "hello");
    assert_eq!(r.next_string_array().unwrap(), vec!["a", "bc"]);
    assert!(!r.has_data());
}

#[test]
fn negative_i32_is_zero_extended() {
    let mut w = BytecodeWriter::<TestOp>::new();
    w.write_i32(-1);
    let mut r = BytecodeReader::<TestOp>::new(w.program()).unwrap();
    assert_eq!(r.next_u64().unwrap(), u32::MAX as u64);
}

#[test]
fn i32_read_rejects_wide_values() {
    let mut w = BytecodeWriter::<TestOp>::new();
    w.write_u64(1 << 33);
    let mut r = BytecodeReader::<TestOp>::new(w.program()).unwrap();
    assert_eq!(r.next_i32(), Err(BytecodeError::Int32Overflow(1 << 33)));
}

#[test]
fn zero_and_unknown_opcodes_are_rejected() {
    let mut w = BytecodeWriter::<TestOp>::new();
    w.write_u64(0);
    w.write_u64(9);
    let mut r = BytecodeReader::<TestOp>::new(w.program()).unwrap();
    assert_eq!(r.next_opcode(), Err(BytecodeError::InvalidOpcode(0)));
    assert_eq!(r.next_opcode(), Err(BytecodeError::InvalidOpcode(9)));
}

#[test]
fn format_is_checked() {
    let err = BytecodeReader::<TestOp>::new("\u{1}").unwrap_err();
    assert_eq!(err, BytecodeError::UnsupportedFormat(1));
    assert_eq!(
        BytecodeReader::<TestOp>::new("").unwrap_err(),
        BytecodeError::UnexpectedEnd
    );
}

#[test]
fn unterminated_string_fails() {
    let mut r = BytecodeReader::<TestOp>::new("\0abc").unwrap();
    assert_eq!(
        r.next_nul_terminated_string(),
        Err(BytecodeError::UnexpectedEnd)
    );
}

#[test]
fn strings_are_escaped_in_literal() {
    let mut w = BytecodeWriter::<TestOp>::new();
    w.write_opcode(TestOp::Label);
    w.write_nul_terminated_string("a\"b");
    assert_eq!(w.to_literal(), r#""\0\u{2}a\"b\0""#);
}
