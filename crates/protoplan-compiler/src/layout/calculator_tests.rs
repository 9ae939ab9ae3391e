use protoplan_bytecode::{BytecodeError, Cardinality, Presence, decode_layout, dump_layout};
use protoplan_core::{Colors, DescriptorProto, FieldDescriptorProto as Field, FieldType};

use super::{FieldStorageKind, LayoutField, MessageLayoutCalculator, compute_layout};
use crate::DescriptorPool;
use crate::test_utils::{proto2, proto3};

// message M {
//   required int32 a = 1;
//   optional int32 b = 2;
//   oneof o { string c = 3; string d = 4; }
// }
fn required_optional_oneof() -> Vec<LayoutField> {
    vec![
        LayoutField::scalar(1, FieldType::Int32).required(),
        LayoutField::scalar(2, FieldType::Int32).with_presence(),
        LayoutField::scalar(3, FieldType::String).in_oneof(0),
        LayoutField::scalar(4, FieldType::String).in_oneof(0),
    ]
}

fn mixed() -> Vec<LayoutField> {
    let mut values = LayoutField::scalar(4, FieldType::Int32).repeated();
    values.mode.is_packed = true;
    vec![
        LayoutField::scalar(1, FieldType::String),
        LayoutField::scalar(2, FieldType::Bool),
        LayoutField::scalar(3, FieldType::Int64),
        values,
        LayoutField::scalar(5, FieldType::Message)
            .with_presence()
            .with_submessage("test.Sub", false),
        LayoutField::scalar(7, FieldType::Double),
    ]
}

#[test]
fn presence_and_oneof_slots() {
    let layout = compute_layout(&required_optional_oneof());

    for (_, plan) in layout.plans.iter() {
        assert_eq!(plan.dense_below, 5);
        assert_eq!(plan.required_count, 1);
        assert_eq!(plan.explicit_presence_count, 2);
        let presence: Vec<_> = plan.fields.iter().map(|f| f.presence).collect();
        assert_eq!(
            presence,
            [
                Presence::HasBit(0),
                Presence::HasBit(1),
                Presence::OneofSlot(4),
                Presence::OneofSlot(4),
            ]
        );
    }
    assert!(layout.submessages.is_empty());
}

#[test]
fn offsets_per_pointer_width() {
    let layout = compute_layout(&required_optional_oneof());

    let offsets = layout
        .plans
        .as_ref()
        .map(|plan| plan.fields.iter().map(|f| f.offset).collect::<Vec<_>>());
    assert_eq!(offsets.pointer_width_64, [8, 12, 16, 32]);
    assert_eq!(offsets.pointer_width_32, [8, 12, 24, 36]);
    assert_eq!(layout.plans.pointer_width_64.size, 48);
    assert_eq!(layout.plans.pointer_width_32.size, 48);
}

#[test]
fn required_fields_take_the_first_bits() {
    let layout = compute_layout(&[
        LayoutField::scalar(1, FieldType::Bool).with_presence(),
        LayoutField::scalar(2, FieldType::Bool),
        LayoutField::scalar(3, FieldType::Bool).required(),
    ]);

    let presence: Vec<_> = layout
        .plans
        .pointer_width_64
        .fields
        .iter()
        .map(|f| f.presence)
        .collect();
    assert_eq!(
        presence,
        [Presence::HasBit(1), Presence::None, Presence::HasBit(0)]
    );
}

#[test]
fn empty_message() {
    let layout = compute_layout(&[]);

    for (_, plan) in layout.plans.iter() {
        assert_eq!(plan.size, 0);
        assert_eq!(plan.dense_below, 1);
        assert!(plan.fields.is_empty());
    }
    insta::assert_snapshot!(dump_layout(&layout.plans.pointer_width_64, Colors::OFF), @r"
    [header]
    size              0
    fields            0
    required          0
    explicit_presence 0
    dense_below       1
    ");
}

#[test]
fn dense_below_stops_at_first_gap() {
    let layout = compute_layout(&[
        LayoutField::scalar(2, FieldType::Int32),
        LayoutField::scalar(3, FieldType::Int32),
    ]);
    assert_eq!(layout.plans.pointer_width_64.dense_below, 1);

    let layout = compute_layout(&mixed());
    assert_eq!(layout.plans.pointer_width_64.dense_below, 6);
}

#[test]
fn storage_grouped_by_kind() {
    let layout = compute_layout(&mixed());

    insta::assert_snapshot!(dump_layout(&layout.plans.pointer_width_64, Colors::OFF), @r"
    [header]
    size              64
    fields            6
    required          0
    explicit_presence 1
    dense_below       6

    [fields]
    #1  @48  string    -
    #2  @1   bool      -
    #3  @8   int64     -
    #4  @24  int32     -             repeated packed
    #5  @32  message   bit 0         M1
    #7  @16  double    -
    ");
    insta::assert_snapshot!(dump_layout(&layout.plans.pointer_width_32, Colors::OFF), @r"
    [header]
    size              48
    fields            6
    required          0
    explicit_presence 1
    dense_below       6

    [fields]
    #1  @36  string    -
    #2  @1   bool      -
    #3  @8   int64     -
    #4  @24  int32     -             repeated packed
    #5  @28  message   bit 0         M1
    #7  @16  double    -
    ");
}

#[test]
fn size_ends_at_last_placed_field() {
    for fields in [required_optional_oneof(), mixed()] {
        let layout = compute_layout(&fields);
        for (target, plan) in layout.plans.iter() {
            let mut spans: Vec<(u32, u32)> = plan
                .fields
                .iter()
                .zip(&fields)
                .map(|(placed, field)| {
                    let stride = *field.storage_kind.strides().get(target);
                    assert_eq!(placed.offset % stride, 0, "{target}: #{}", field.number);
                    (placed.offset, placed.offset + stride)
                })
                .collect();
            spans.sort();

            let header_end = (fields.len() as u32).div_ceil(8);
            assert!(spans[0].0 >= header_end);
            assert!(spans.windows(2).all(|w| w[0].1 <= w[1].0), "{target}: overlap");
            assert_eq!(plan.size, spans.last().map_or(0, |s| s.1), "{target}");
        }
    }
}

#[test]
fn shared_submessage_type_gets_one_entry() {
    let layout = compute_layout(&[
        LayoutField::scalar(1, FieldType::Message).with_submessage("test.Sub", false),
        LayoutField::scalar(2, FieldType::Int32),
        LayoutField::scalar(5, FieldType::Message)
            .repeated()
            .with_submessage("test.Sub", false),
    ]);

    let indices: Vec<_> = layout
        .plans
        .pointer_width_64
        .fields
        .iter()
        .map(|f| f.submessage_index)
        .collect();
    assert_eq!(indices, [1, 0, 1]);
    assert_eq!(layout.submessages.len(), 1);
    assert_eq!(layout.submessages[0].type_name, "test.Sub");
    assert_eq!(layout.submessages[0].field_numbers, [1, 5]);
}

#[test]
fn programs_decode_to_the_same_plans() {
    let layout = compute_layout(&mixed());
    let programs = layout.encode().unwrap();

    for (target, program) in programs.iter() {
        let decoded = decode_layout(program).unwrap();
        assert_eq!(&decoded, layout.plans.get(target));
    }
}

#[test]
fn calculator_reads_descriptors() {
    let file = proto2("m.proto").with_message(
        DescriptorProto::new("M")
            .with_oneof("o")
            .with_field(Field::new("a", 1, FieldType::Int32).required())
            .with_field(Field::new("b", 2, FieldType::Int32))
            .with_field(Field::new("c", 3, FieldType::String).in_oneof(0))
            .with_field(Field::new("d", 4, FieldType::String).in_oneof(0)),
    );
    let pool = DescriptorPool::expect_valid(vec![file]);
    let mut calculator = MessageLayoutCalculator::new(&pool);

    let computed = calculator.calculate(pool.expect_message("test.M"));
    assert_eq!(computed, compute_layout(&required_optional_oneof()));
}

#[test]
fn calculator_modes_and_map_entries() {
    let entry = DescriptorProto::new("CountsEntry")
        .map_entry()
        .with_field(Field::new("key", 1, FieldType::String))
        .with_field(Field::new("value", 2, FieldType::Int32));
    let file = proto3("h.proto")
        .with_message(
            DescriptorProto::new("Holder")
                .with_nested(entry)
                .with_field(
                    Field::new("counts", 1, FieldType::Message)
                        .repeated()
                        .with_type_name(".test.Holder.CountsEntry"),
                )
                .with_field(Field::new("values", 2, FieldType::Int32).repeated())
                .with_field(Field::new("strings", 3, FieldType::String).repeated()),
        );
    let pool = DescriptorPool::expect_valid(vec![file]);
    let mut calculator = MessageLayoutCalculator::new(&pool);

    let fields = calculator.layout_fields(pool.expect_message("test.Holder"));
    let modes: Vec<_> = fields
        .iter()
        .map(|f| (f.number, f.mode.cardinality, f.mode.is_packed, f.storage_kind))
        .collect();
    assert_eq!(
        modes,
        [
            (1, Cardinality::Map, false, FieldStorageKind::Pointer),
            (2, Cardinality::Array, true, FieldStorageKind::Pointer),
            (3, Cardinality::Array, false, FieldStorageKind::Pointer),
        ]
    );

    let layout = calculator.calculate(pool.expect_message("test.Holder"));
    assert_eq!(layout.submessages.len(), 1);
    assert_eq!(layout.submessages[0].type_name, "test.Holder.CountsEntry");
    assert!(!layout.submessages[0].needs_is_initialized_check);
    insta::assert_snapshot!(dump_layout(&layout.plans.pointer_width_32, Colors::OFF), @r"
    [header]
    size              16
    fields            3
    required          0
    explicit_presence 0
    dense_below       4

    [fields]
    #1  @4   message   -             M1  map
    #2  @8   int32     -             repeated packed
    #3  @12  string    -             repeated
    ");
}

#[test]
fn separate_oneofs_get_separate_slots() {
    let file = proto3("o.proto").with_message(
        DescriptorProto::new("Choices")
            .with_oneof("first")
            .with_oneof("second")
            .with_oneof("_opt")
            .with_field(Field::new("a", 1, FieldType::Int32).in_oneof(0))
            .with_field(Field::new("x", 2, FieldType::Int32).in_oneof(1))
            .with_field(Field::new("b", 3, FieldType::Int32).in_oneof(0))
            .with_field(Field::new("opt", 4, FieldType::Int32).proto3_optional(2))
            .with_field(Field::new("y", 5, FieldType::Int32).in_oneof(1)),
    );
    let pool = DescriptorPool::expect_valid(vec![file]);
    let mut calculator = MessageLayoutCalculator::new(&pool);

    let layout = calculator.calculate(pool.expect_message("test.Choices"));

    for (_, plan) in layout.plans.iter() {
        let presence: Vec<_> = plan.fields.iter().map(|f| f.presence).collect();
        assert_eq!(
            presence,
            [
                Presence::OneofSlot(4),
                Presence::OneofSlot(8),
                Presence::OneofSlot(4),
                Presence::HasBit(0),
                Presence::OneofSlot(8),
            ]
        );
        assert_eq!(plan.explicit_presence_count, 1);
        assert_eq!(plan.dense_below, 6);
    }
}

#[test]
fn oversized_slot_offset_is_reported_unclamped() {
    let layout = compute_layout(&[LayoutField::scalar(1, FieldType::Int32).in_oneof(20_000)]);

    assert_eq!(
        layout.plans.pointer_width_64.fields[0].presence,
        Presence::OneofSlot(80_004)
    );
    assert!(matches!(
        layout.encode(),
        Err(crate::CompileError::Bytecode(BytecodeError::Overflow { value: 80_004, .. }))
    ));
}
