//! Feature inheritance resolution.
//!
//! A `FeatureResolver` is built once per file edition. Every element then
//! resolves its features against its parent's already-resolved set, so the
//! result for any element is always fully populated.

use tracing::trace;

use super::defaults::FeatureSetDefaults;
use super::set::{
    FeatureSet, FieldPresence, MessageEncoding, RepeatedFieldEncoding, ResolvedFeatures,
};
use crate::descriptor::{FieldDescriptorProto, FieldLabel, FieldType};
use crate::Edition;

/// Fully qualified name every custom feature extension must extend.
pub const FEATURE_SET_TYPE_NAME: &str = "google.protobuf.FeatureSet";

/// Errors raised while building a resolver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error("Edition {edition} is not in the supported range ({min}...{max})")]
    UnsupportedEdition {
        edition: Edition,
        min: Edition,
        max: Edition,
    },

    #[error("No default value found for edition {edition}")]
    NoDefault { edition: Edition },

    #[error("Passed an extension that wasn't to google.protobuf.FeatureSet: {name} extends {extendee}")]
    InvalidExtension { name: String, extendee: String },

    #[error("Defaults for edition {edition} leave feature `{feature}` unset")]
    IncompleteDefaults {
        edition: Edition,
        feature: &'static str,
    },
}

/// A custom feature declared as an extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureExtension {
    /// Full name of the extension field, without a leading dot.
    pub name: String,
    /// Full name of the extended message, with or without a leading dot.
    pub extendee: String,
}

impl FeatureExtension {
    pub fn new(name: impl Into<String>, extendee: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extendee: extendee.into(),
        }
    }

    fn extends_feature_set(&self) -> bool {
        self.extendee.trim_start_matches('.') == FEATURE_SET_TYPE_NAME
    }
}

/// Resolves effective features for elements of one edition.
#[derive(Clone, Debug)]
pub struct FeatureResolver {
    edition: Edition,
    defaults: ResolvedFeatures,
    extensions: Vec<FeatureExtension>,
}

impl FeatureResolver {
    /// Build a resolver for `edition`.
    ///
    /// Fails when the edition is outside the table's supported range, when
    /// no default row applies, or when any extension targets something other
    /// than the feature set message.
    pub fn new(
        edition: Edition,
        defaults: &FeatureSetDefaults,
        extensions: &[FeatureExtension],
    ) -> Result<Self, FeatureError> {
        if edition < defaults.minimum_edition || edition > defaults.maximum_edition {
            return Err(FeatureError::UnsupportedEdition {
                edition,
                min: defaults.minimum_edition,
                max: defaults.maximum_edition,
            });
        }

        let entry = defaults
            .entry_for(edition)
            .ok_or(FeatureError::NoDefault { edition })?;

        for ext in extensions {
            if !ext.extends_feature_set() {
                return Err(FeatureError::InvalidExtension {
                    name: ext.name.clone(),
                    extendee: ext.extendee.clone(),
                });
            }
        }

        let defaults = ResolvedFeatures::from_complete(&entry.combined())
            .map_err(|feature| FeatureError::IncompleteDefaults { edition, feature })?;

        Ok(Self {
            edition,
            defaults,
            extensions: extensions.to_vec(),
        })
    }

    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// Features in force for an element with no explicit features and no parent.
    pub fn default_features(&self) -> &ResolvedFeatures {
        &self.defaults
    }

    /// Inherit from `parent`, overriding only the leaves `explicit` sets.
    ///
    /// Extension values for features that were not registered with the
    /// resolver are dropped.
    pub fn resolve(
        &self,
        explicit: Option<&FeatureSet>,
        parent: &ResolvedFeatures,
    ) -> ResolvedFeatures {
        let Some(explicit) = explicit else {
            return parent.clone();
        };
        if explicit.extensions.is_empty() {
            return parent.merged(explicit);
        }

        let mut filtered = explicit.clone();
        filtered.extensions.retain(|key, _| {
            let known = self.is_registered(key);
            if !known {
                trace!(extension = %key, "dropping unregistered feature extension");
            }
            known
        });
        parent.merged(&filtered)
    }

    /// Resolve a field, inferring features from syntax markers for proto2/proto3.
    ///
    /// Legacy fields merge their inferred features onto the edition defaults
    /// rather than onto `parent`; explicit overrides apply last.
    pub fn resolve_field(
        &self,
        field: &FieldDescriptorProto,
        parent: &ResolvedFeatures,
    ) -> ResolvedFeatures {
        let explicit = field.options.as_ref().and_then(|o| o.features.as_ref());
        if !self.edition.is_legacy_syntax() {
            return self.resolve(explicit, parent);
        }

        let mut inferred = self.infer_legacy_features(field);
        if let Some(explicit) = explicit {
            inferred.merge_from(explicit);
        }
        self.resolve(Some(&inferred), &self.defaults)
    }

    fn infer_legacy_features(&self, field: &FieldDescriptorProto) -> FeatureSet {
        let mut features = FeatureSet::new();
        if field.label == FieldLabel::Required {
            features.field_presence = Some(FieldPresence::LegacyRequired);
        }
        if field.r#type == FieldType::Group {
            features.message_encoding = Some(MessageEncoding::Delimited);
        }
        let packed = field.options.as_ref().and_then(|o| o.packed);
        match packed {
            Some(true) => {
                features.repeated_field_encoding = Some(RepeatedFieldEncoding::Packed);
            }
            Some(false) if self.edition == Edition::Proto3 => {
                features.repeated_field_encoding = Some(RepeatedFieldEncoding::Expanded);
            }
            _ => {}
        }
        features
    }

    fn is_registered(&self, key: &str) -> bool {
        let name = key.trim_start_matches('[').trim_end_matches(']');
        let name = name.trim_start_matches('.');
        self.extensions.iter().any(|e| e.name == name)
    }
}
