//! Message layout calculation.
//!
//! Storage of a message is, in order:
//! 1. Has-bits: one bit per declared field, rounded up to whole bytes
//! 2. Oneof slots: one 4-byte slot per real oneof holding the set member's
//!    number, 4-byte aligned
//! 3. Field storage, grouped by `FieldStorageKind`, each value aligned to
//!    its own stride
//!
//! Both pointer widths are computed in one pass with independent cursors.

use protoplan_bytecode::{Cardinality, FieldLayout, FieldMode, LayoutPlan, Presence, encode_layout};
use protoplan_core::FieldType;
use tracing::{debug, trace};

use super::storage_kind::FieldStorageKind;
use super::submessages::{InitializationAnalysis, SubmessageInfo, SubmessageRef, SubmessageTable};
use super::target::TargetSpecific;
use crate::descriptor::{DescriptorPool, MessageId};
use crate::Result;

const ONEOF_SLOT_BYTES: u32 = 4;

/// A field reduced to what the layout needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutField {
    pub number: u32,
    pub field_type: FieldType,
    pub mode: FieldMode,
    pub storage_kind: FieldStorageKind,
    pub is_required: bool,
    pub has_presence: bool,
    /// Position of the field's oneof among the message's real oneofs.
    pub oneof_index: Option<u32>,
    pub submessage: Option<SubmessageRef>,
}

impl LayoutField {
    /// A singular optional scalar with no presence.
    pub fn scalar(number: u32, field_type: FieldType) -> Self {
        Self {
            number,
            field_type,
            mode: FieldMode::default(),
            storage_kind: FieldStorageKind::of_singular(field_type),
            is_required: false,
            has_presence: false,
            oneof_index: None,
            submessage: None,
        }
    }

    pub fn with_presence(mut self) -> Self {
        self.has_presence = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self.has_presence = true;
        self
    }

    pub fn in_oneof(mut self, index: u32) -> Self {
        self.oneof_index = Some(index);
        self.has_presence = true;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.mode.cardinality = Cardinality::Array;
        self.storage_kind = FieldStorageKind::Pointer;
        self
    }

    pub fn with_submessage(mut self, type_name: impl Into<String>, needs_check: bool) -> Self {
        self.submessage = Some(SubmessageRef {
            type_name: type_name.into(),
            needs_is_initialized_check: needs_check,
        });
        self
    }
}

/// Per-target layout plans and the submessage table of one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageLayout {
    pub plans: TargetSpecific<LayoutPlan>,
    /// Ordered by index, starting at 1.
    pub submessages: Vec<SubmessageInfo>,
}

impl MessageLayout {
    /// Layout programs for both targets.
    pub fn encode(&self) -> Result<TargetSpecific<String>> {
        Ok(self.plans.as_ref().try_map(encode_layout)?)
    }
}

/// Computes layouts for messages of one pool.
///
/// Holds the initialization analysis so it is shared across messages.
#[derive(Debug)]
pub struct MessageLayoutCalculator<'p> {
    pool: &'p DescriptorPool,
    initialization: InitializationAnalysis,
}

impl<'p> MessageLayoutCalculator<'p> {
    pub fn new(pool: &'p DescriptorPool) -> Self {
        Self {
            pool,
            initialization: InitializationAnalysis::new(),
        }
    }

    #[tracing::instrument(skip_all, fields(message = %self.pool.message(message).full_name))]
    pub fn calculate(&mut self, message: MessageId) -> MessageLayout {
        let fields = self.layout_fields(message);
        let layout = compute_layout(&fields);
        debug!(
            size64 = layout.plans.pointer_width_64.size,
            size32 = layout.plans.pointer_width_32.size,
            submessages = layout.submessages.len(),
            "layout computed"
        );
        layout
    }

    /// Fields of `message` sorted by number, reduced to their layout inputs.
    pub fn layout_fields(&mut self, message: MessageId) -> Vec<LayoutField> {
        let pool = self.pool;
        let descriptor = pool.message(message);
        let real_oneofs = descriptor.real_oneofs();

        descriptor
            .fields_by_number()
            .iter()
            .map(|&id| {
                let field = pool.field(id);
                let cardinality = if field.is_map() {
                    Cardinality::Map
                } else if field.is_repeated() {
                    Cardinality::Array
                } else {
                    Cardinality::Scalar
                };
                let submessage = field.message_type().map(|target| SubmessageRef {
                    type_name: pool.message(target).full_name.clone(),
                    needs_is_initialized_check: self.initialization.needs_check(pool, target),
                });
                let oneof_index = field.real_oneof().and_then(|oneof| {
                    real_oneofs
                        .iter()
                        .position(|&o| o == oneof)
                        .map(|i| i as u32)
                });
                LayoutField {
                    number: field.number as u32,
                    field_type: field.field_type,
                    mode: FieldMode {
                        cardinality,
                        is_packed: field.is_packed(),
                        is_extension: field.is_extension,
                    },
                    storage_kind: FieldStorageKind::of(field),
                    is_required: field.is_required(),
                    has_presence: field.has_presence(),
                    oneof_index,
                    submessage,
                }
            })
            .collect()
    }
}

/// Lay out fields already sorted by number.
pub fn compute_layout(fields: &[LayoutField]) -> MessageLayout {
    debug_assert!(fields.windows(2).all(|w| w[0].number < w[1].number));

    let dense_below = dense_below(fields);

    // Has-bits: required fields first, then the other tracked fields, each
    // group in number order. Oneof members are tracked by their slot.
    let mut presence = vec![Presence::None; fields.len()];
    let mut tracked: Vec<usize> = (0..fields.len())
        .filter(|&i| fields[i].oneof_index.is_none() && fields[i].has_presence)
        .collect();
    tracked.sort_by_key(|&i| !fields[i].is_required);
    for (bit, &i) in tracked.iter().enumerate() {
        presence[i] = Presence::HasBit(bit as u32);
    }
    let explicit_presence_count = tracked.len() as u32;
    let required_count = fields.iter().filter(|f| f.is_required).count() as u32;

    let mut byte_offset = (fields.len() as u32).div_ceil(8);

    let oneof_count = fields
        .iter()
        .filter_map(|f| f.oneof_index)
        .max()
        .map_or(0, |max| max + 1);
    if oneof_count > 0 {
        byte_offset = byte_offset.next_multiple_of(ONEOF_SLOT_BYTES);
        for (i, field) in fields.iter().enumerate() {
            if let Some(oneof) = field.oneof_index {
                let slot = byte_offset + oneof * ONEOF_SLOT_BYTES;
                presence[i] = Presence::OneofSlot(slot);
            }
        }
        byte_offset += oneof_count * ONEOF_SLOT_BYTES;
    }

    let mut cursors = TargetSpecific::for_all_targets(byte_offset);
    let mut offsets = vec![TargetSpecific::default(); fields.len()];
    let mut submessage_indices = vec![0u16; fields.len()];
    let mut submessages = SubmessageTable::new();

    let mut by_storage: Vec<usize> = (0..fields.len()).collect();
    by_storage.sort_by_key(|&i| fields[i].storage_kind);
    for i in by_storage {
        let field = &fields[i];
        let strides = field.storage_kind.strides();
        cursors.align_to_stride(strides);
        offsets[i] = cursors;
        cursors.add(strides);

        if let Some(submessage) = &field.submessage {
            submessage_indices[i] = submessages.collect(submessage, field.number);
        }
        trace!(
            number = field.number,
            kind = ?field.storage_kind,
            offset64 = offsets[i].pointer_width_64,
            offset32 = offsets[i].pointer_width_32,
            "placed field"
        );
    }

    let plans = TargetSpecific::from_fn(|target| LayoutPlan {
        size: *cursors.get(target),
        required_count,
        explicit_presence_count,
        dense_below,
        fields: fields
            .iter()
            .enumerate()
            .map(|(i, field)| FieldLayout {
                number: field.number,
                mode: field.mode,
                offset: *offsets[i].get(target),
                presence: presence[i],
                submessage_index: submessage_indices[i],
                field_type: field.field_type,
            })
            .collect(),
    });

    MessageLayout {
        plans,
        submessages: submessages.into_entries(),
    }
}

/// One past the end of the contiguous run of field numbers starting at 1.
fn dense_below(fields: &[LayoutField]) -> u32 {
    let mut last = 0;
    for field in fields {
        if field.number != last + 1 {
            break;
        }
        last = field.number;
    }
    last + 1
}
