//! Message storage layouts.
//!
//! Consumes bound descriptors and produces, per message, a `LayoutPlan` for
//! each pointer width plus the table of referenced submessage types.

mod calculator;
mod storage_kind;
mod submessages;
mod target;

#[cfg(test)]
mod calculator_tests;

pub use calculator::{LayoutField, MessageLayout, MessageLayoutCalculator, compute_layout};
pub use storage_kind::FieldStorageKind;
pub use submessages::{InitializationAnalysis, SubmessageInfo, SubmessageRef, SubmessageTable};
pub use target::TargetSpecific;
