//! Feature bundles.
//!
//! `FeatureSet` is the sparse form found in options and defaults tables:
//! every leaf may be unset. `ResolvedFeatures` is what an element carries
//! after inheritance, with every leaf populated.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldPresence {
    Explicit,
    Implicit,
    LegacyRequired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnumType {
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepeatedFieldEncoding {
    Packed,
    Expanded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Utf8Validation {
    Verify,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageEncoding {
    LengthPrefixed,
    Delimited,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JsonFormat {
    Allow,
    LegacyBestEffort,
}

/// Sparse feature bundle, as written in options or a defaults table.
///
/// Custom feature extensions appear in JSON under bracketed keys
/// (`"[pkg.my_feature]": 1`) and are collected into `extensions`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_presence: Option<FieldPresence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_type: Option<EnumType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeated_field_encoding: Option<RepeatedFieldEncoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utf8_validation: Option<Utf8Validation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_encoding: Option<MessageEncoding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_format: Option<JsonFormat>,
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no leaf is set.
    pub fn is_empty(&self) -> bool {
        self.field_presence.is_none()
            && self.enum_type.is_none()
            && self.repeated_field_encoding.is_none()
            && self.utf8_validation.is_none()
            && self.message_encoding.is_none()
            && self.json_format.is_none()
            && self.extensions.is_empty()
    }

    /// Overwrite every leaf that `other` sets, leaving the rest alone.
    pub fn merge_from(&mut self, other: &FeatureSet) {
        merge_leaf(&mut self.field_presence, other.field_presence);
        merge_leaf(&mut self.enum_type, other.enum_type);
        merge_leaf(&mut self.repeated_field_encoding, other.repeated_field_encoding);
        merge_leaf(&mut self.utf8_validation, other.utf8_validation);
        merge_leaf(&mut self.message_encoding, other.message_encoding);
        merge_leaf(&mut self.json_format, other.json_format);
        for (name, value) in &other.extensions {
            self.extensions.insert(name.clone(), value.clone());
        }
    }
}

fn merge_leaf<T: Copy>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Fully populated feature bundle attached to a descriptor.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFeatures {
    pub field_presence: FieldPresence,
    pub enum_type: EnumType,
    pub repeated_field_encoding: RepeatedFieldEncoding,
    pub utf8_validation: Utf8Validation,
    pub message_encoding: MessageEncoding,
    pub json_format: JsonFormat,
    #[serde(flatten)]
    pub extensions: IndexMap<String, serde_json::Value>,
}

impl ResolvedFeatures {
    /// Promote a sparse set to a resolved one.
    ///
    /// Returns the name of the missing leaf when `set` is incomplete.
    pub fn from_complete(set: &FeatureSet) -> Result<Self, &'static str> {
        Ok(Self {
            field_presence: set.field_presence.ok_or("field_presence")?,
            enum_type: set.enum_type.ok_or("enum_type")?,
            repeated_field_encoding: set
                .repeated_field_encoding
                .ok_or("repeated_field_encoding")?,
            utf8_validation: set.utf8_validation.ok_or("utf8_validation")?,
            message_encoding: set.message_encoding.ok_or("message_encoding")?,
            json_format: set.json_format.ok_or("json_format")?,
            extensions: set.extensions.clone(),
        })
    }

    /// Copy of `self` with every leaf set in `overrides` replaced.
    pub fn merged(&self, overrides: &FeatureSet) -> Self {
        let mut result = self.clone();
        if let Some(v) = overrides.field_presence {
            result.field_presence = v;
        }
        if let Some(v) = overrides.enum_type {
            result.enum_type = v;
        }
        if let Some(v) = overrides.repeated_field_encoding {
            result.repeated_field_encoding = v;
        }
        if let Some(v) = overrides.utf8_validation {
            result.utf8_validation = v;
        }
        if let Some(v) = overrides.message_encoding {
            result.message_encoding = v;
        }
        if let Some(v) = overrides.json_format {
            result.json_format = v;
        }
        for (name, value) in &overrides.extensions {
            result.extensions.insert(name.clone(), value.clone());
        }
        result
    }

    /// Sparse view with every leaf set.
    pub fn to_feature_set(&self) -> FeatureSet {
        FeatureSet {
            field_presence: Some(self.field_presence),
            enum_type: Some(self.enum_type),
            repeated_field_encoding: Some(self.repeated_field_encoding),
            utf8_validation: Some(self.utf8_validation),
            message_encoding: Some(self.message_encoding),
            json_format: Some(self.json_format),
            extensions: self.extensions.clone(),
        }
    }
}
