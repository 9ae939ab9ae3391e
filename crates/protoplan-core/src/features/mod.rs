//! Feature sets and their inheritance across editions.
//!
//! - `set` - partial (`FeatureSet`) and fully resolved (`ResolvedFeatures`) bundles
//! - `defaults` - the per-edition defaults table and its built-in value
//! - `resolver` - `FeatureResolver`, including legacy proto2/proto3 inference

mod defaults;
mod resolver;
mod set;

#[cfg(test)]
mod resolver_tests;
#[cfg(test)]
mod set_tests;

pub use defaults::{FeatureSetDefaults, FeatureSetEditionDefault};
pub use resolver::{FeatureError, FeatureExtension, FeatureResolver, FEATURE_SET_TYPE_NAME};
pub use set::{
    EnumType, FeatureSet, FieldPresence, JsonFormat, MessageEncoding, RepeatedFieldEncoding,
    ResolvedFeatures, Utf8Validation,
};
