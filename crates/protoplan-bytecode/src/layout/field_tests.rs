use protoplan_core::FieldType;

use super::*;
use crate::BytecodeError;
use crate::literal::to_literal;

#[test]
fn mode_bits() {
    assert_eq!(FieldMode::default().raw(), 0);
    let packed_array = FieldMode {
        cardinality: Cardinality::Array,
        is_packed: true,
        is_extension: false,
    };
    assert_eq!(packed_array.raw(), 0b1010);
    let map_ext = FieldMode {
        cardinality: Cardinality::Map,
        is_packed: false,
        is_extension: true,
    };
    assert_eq!(map_ext.raw(), 0b10100);
    assert_eq!(FieldMode::from_raw(0b1010).unwrap(), packed_array);
    assert_eq!(FieldMode::from_raw(0b10100).unwrap(), map_ext);
}

#[test]
fn mode_rejects_invalid_bits() {
    assert_eq!(
        FieldMode::from_raw(0b110),
        Err(BytecodeError::InvalidFieldMode(0b110))
    );
    assert_eq!(
        FieldMode::from_raw(0b10_0000),
        Err(BytecodeError::InvalidFieldMode(0b10_0000))
    );
}

#[test]
fn presence_encoding_ranges() {
    assert_eq!(Presence::None.encode().unwrap(), 0);
    assert_eq!(Presence::HasBit(0).encode().unwrap(), 1);
    assert_eq!(Presence::HasBit(0x1ffe).encode().unwrap(), 0x1fff);
    assert!(Presence::HasBit(0x1fff).encode().is_err());

    let slot = Presence::OneofSlot(4).encode().unwrap();
    assert!(slot >= 0x2000);
    assert_eq!(slot, 0x3ffb);
    assert_eq!(Presence::OneofSlot(0).encode().unwrap(), 0x3fff);
    assert!(Presence::OneofSlot(0x2000).encode().is_err());
}

#[test]
fn presence_overflow_reports_full_value() {
    assert_eq!(
        Presence::HasBit(70_000).encode(),
        Err(BytecodeError::Overflow {
            value: 70_000,
            width: 2
        })
    );
    assert_eq!(
        Presence::OneofSlot(0x1_0004).encode(),
        Err(BytecodeError::Overflow {
            value: 0x1_0004,
            width: 2
        })
    );
}

#[test]
fn presence_decode_inverts_encode() {
    for p in [
        Presence::None,
        Presence::HasBit(0),
        Presence::HasBit(77),
        Presence::OneofSlot(0),
        Presence::OneofSlot(12),
        Presence::OneofSlot(0x1fff),
    ] {
        assert_eq!(Presence::decode(p.encode().unwrap()), p);
    }
}

#[test]
fn number_shares_slot_with_mode() {
    let field = FieldLayout {
        number: 300,
        mode: FieldMode {
            cardinality: Cardinality::Array,
            ..FieldMode::default()
        },
        offset: 0,
        presence: Presence::None,
        submessage_index: 0,
        field_type: FieldType::Int32,
    };
    let mut out = String::new();
    field.write(&mut out).unwrap();
    assert_eq!(out.chars().count(), FIELD_LEN);
    insta::assert_snapshot!(to_literal(&out[..5]), @r#"",\u{2}\0\0\u{2}""#);

    let back = FieldLayout::read(&mut out.chars()).unwrap();
    assert_eq!(back, field);
}

#[test]
fn max_field_number_keeps_mode_intact() {
    let field = FieldLayout {
        number: (1 << 29) - 1,
        mode: FieldMode {
            cardinality: Cardinality::Map,
            is_packed: true,
            is_extension: true,
        },
        offset: 0x1f_ffff,
        presence: Presence::OneofSlot(0x1fff),
        submessage_index: 0x3fff,
        field_type: FieldType::Sint64,
    };
    let mut out = String::new();
    field.write(&mut out).unwrap();
    assert_eq!(FieldLayout::read(&mut out.chars()).unwrap(), field);
}

#[test]
fn oversized_values_are_rejected() {
    let mut field = FieldLayout {
        number: 1 << 29,
        mode: FieldMode::default(),
        offset: 0,
        presence: Presence::None,
        submessage_index: 0,
        field_type: FieldType::Bool,
    };
    let mut out = String::new();
    assert!(field.write(&mut out).is_err());

    field.number = 1;
    field.offset = 1 << 21;
    out.clear();
    assert_eq!(
        field.write(&mut out),
        Err(BytecodeError::Overflow {
            value: 1 << 21,
            width: 3
        })
    );
}
