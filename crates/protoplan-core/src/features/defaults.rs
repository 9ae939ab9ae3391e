//! Edition defaults table.

use serde::{Deserialize, Serialize};

use super::set::{
    EnumType, FeatureSet, FieldPresence, JsonFormat, MessageEncoding, RepeatedFieldEncoding,
    Utf8Validation,
};
use crate::Edition;

/// One row of the defaults table: features in force from `edition` onward.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSetEditionDefault {
    pub edition: Edition,
    /// Features that files of this edition cannot override.
    #[serde(default)]
    pub fixed_features: FeatureSet,
    /// Features that files of this edition may override.
    #[serde(default)]
    pub overridable_features: FeatureSet,
}

impl FeatureSetEditionDefault {
    /// Fixed features with the overridable ones merged on top.
    pub fn combined(&self) -> FeatureSet {
        let mut features = self.fixed_features.clone();
        features.merge_from(&self.overridable_features);
        features
    }
}

/// Defaults table in protoc's `FeatureSetDefaults` shape.
///
/// `defaults` is sorted ascending by edition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSetDefaults {
    #[serde(default)]
    pub defaults: Vec<FeatureSetEditionDefault>,
    pub minimum_edition: Edition,
    pub maximum_edition: Edition,
}

impl FeatureSetDefaults {
    /// Parse a defaults table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Last row whose edition is at or below `edition`.
    pub fn entry_for(&self, edition: Edition) -> Option<&FeatureSetEditionDefault> {
        self.defaults
            .iter()
            .take_while(|d| d.edition <= edition)
            .last()
    }

    /// The standard protobuf table, proto2 through 2024.
    pub fn builtin() -> Self {
        let legacy = FeatureSet {
            field_presence: Some(FieldPresence::Explicit),
            enum_type: Some(EnumType::Closed),
            repeated_field_encoding: Some(RepeatedFieldEncoding::Expanded),
            utf8_validation: Some(Utf8Validation::None),
            message_encoding: Some(MessageEncoding::LengthPrefixed),
            json_format: Some(JsonFormat::LegacyBestEffort),
            ..FeatureSet::default()
        };
        let proto3 = FeatureSet {
            field_presence: Some(FieldPresence::Implicit),
            enum_type: Some(EnumType::Open),
            repeated_field_encoding: Some(RepeatedFieldEncoding::Packed),
            utf8_validation: Some(Utf8Validation::Verify),
            message_encoding: Some(MessageEncoding::LengthPrefixed),
            json_format: Some(JsonFormat::Allow),
            ..FeatureSet::default()
        };
        let editions = FeatureSet {
            field_presence: Some(FieldPresence::Explicit),
            ..proto3.clone()
        };

        Self {
            defaults: vec![
                FeatureSetEditionDefault {
                    edition: Edition::Legacy,
                    fixed_features: legacy,
                    overridable_features: FeatureSet::default(),
                },
                FeatureSetEditionDefault {
                    edition: Edition::Proto3,
                    fixed_features: proto3,
                    overridable_features: FeatureSet::default(),
                },
                FeatureSetEditionDefault {
                    edition: Edition::Edition2023,
                    fixed_features: FeatureSet::default(),
                    overridable_features: editions,
                },
            ],
            minimum_edition: Edition::Proto2,
            maximum_edition: Edition::Edition2024,
        }
    }
}

impl Default for FeatureSetDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}
