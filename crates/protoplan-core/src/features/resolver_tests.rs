use super::*;
use crate::descriptor::{FieldDescriptorProto, FieldType};
use crate::Edition;

fn resolver(edition: Edition) -> FeatureResolver {
    FeatureResolver::new(edition, &FeatureSetDefaults::builtin(), &[]).unwrap()
}

#[test]
fn edition_outside_range_is_rejected() {
    let defaults = FeatureSetDefaults::builtin();
    let err = FeatureResolver::new(Edition::Legacy, &defaults, &[]).unwrap_err();
    assert_eq!(
        err,
        FeatureError::UnsupportedEdition {
            edition: Edition::Legacy,
            min: Edition::Proto2,
            max: Edition::Edition2024,
        }
    );
    assert_eq!(
        err.to_string(),
        "Edition legacy is not in the supported range (proto2...2024)"
    );

    let err = FeatureResolver::new(Edition::Max, &defaults, &[]).unwrap_err();
    assert!(matches!(err, FeatureError::UnsupportedEdition { .. }));
}

#[test]
fn missing_default_row_is_rejected() {
    let mut defaults = FeatureSetDefaults::builtin();
    defaults.defaults.retain(|d| d.edition >= Edition::Edition2023);
    let err = FeatureResolver::new(Edition::Proto3, &defaults, &[]).unwrap_err();
    assert_eq!(err, FeatureError::NoDefault { edition: Edition::Proto3 });
}

#[test]
fn incomplete_default_row_is_rejected() {
    let mut defaults = FeatureSetDefaults::builtin();
    defaults.defaults[2].overridable_features.json_format = None;
    let err = FeatureResolver::new(Edition::Edition2023, &defaults, &[]).unwrap_err();
    assert_eq!(
        err,
        FeatureError::IncompleteDefaults {
            edition: Edition::Edition2023,
            feature: "json_format",
        }
    );
}

#[test]
fn extensions_are_validated_individually() {
    let defaults = FeatureSetDefaults::builtin();
    let good = FeatureExtension::new("acme.legacy_names", ".google.protobuf.FeatureSet");
    let bad = FeatureExtension::new("acme.other", ".google.protobuf.FieldOptions");

    assert!(FeatureResolver::new(Edition::Edition2023, &defaults, &[good.clone()]).is_ok());
    let err = FeatureResolver::new(Edition::Edition2023, &defaults, &[good, bad]).unwrap_err();
    assert!(matches!(err, FeatureError::InvalidExtension { ref name, .. } if name == "acme.other"));
    assert!(err.to_string().starts_with(
        "Passed an extension that wasn't to google.protobuf.FeatureSet"
    ));
}

#[test]
fn default_features_per_edition() {
    let proto2 = resolver(Edition::Proto2);
    assert_eq!(proto2.default_features().field_presence, FieldPresence::Explicit);
    assert_eq!(proto2.default_features().enum_type, EnumType::Closed);

    let proto3 = resolver(Edition::Proto3);
    assert_eq!(proto3.default_features().field_presence, FieldPresence::Implicit);
    assert_eq!(
        proto3.default_features().repeated_field_encoding,
        RepeatedFieldEncoding::Packed
    );

    let ed = resolver(Edition::Edition2024);
    assert_eq!(ed.default_features().field_presence, FieldPresence::Explicit);
    assert_eq!(ed.default_features().enum_type, EnumType::Open);
}

#[test]
fn resolve_without_explicit_returns_parent() {
    let r = resolver(Edition::Edition2023);
    let parent = r.default_features().merged(&FeatureSet {
        utf8_validation: Some(Utf8Validation::None),
        ..FeatureSet::default()
    });
    assert_eq!(r.resolve(None, &parent), parent);
}

#[test]
fn resolve_merges_only_set_leaves() {
    let r = resolver(Edition::Edition2023);
    let parent = r.default_features().clone();
    let explicit = FeatureSet {
        enum_type: Some(EnumType::Closed),
        ..FeatureSet::default()
    };
    let resolved = r.resolve(Some(&explicit), &parent);
    assert_eq!(resolved.enum_type, EnumType::Closed);
    assert_eq!(resolved.field_presence, parent.field_presence);
    assert_eq!(resolved.json_format, parent.json_format);
}

#[test]
fn fully_set_explicit_ignores_parent() {
    let r = resolver(Edition::Edition2023);
    let full = ResolvedFeatures {
        field_presence: FieldPresence::LegacyRequired,
        enum_type: EnumType::Closed,
        repeated_field_encoding: RepeatedFieldEncoding::Expanded,
        utf8_validation: Utf8Validation::None,
        message_encoding: MessageEncoding::Delimited,
        json_format: JsonFormat::LegacyBestEffort,
        extensions: Default::default(),
    };
    let explicit = full.to_feature_set();

    let parents = [
        r.default_features().clone(),
        resolver(Edition::Proto3).default_features().clone(),
        resolver(Edition::Proto2).default_features().clone(),
    ];
    for parent in &parents {
        assert_eq!(r.resolve(Some(&explicit), parent), full);
    }
}

#[test]
fn unregistered_extensions_are_dropped() {
    let defaults = FeatureSetDefaults::builtin();
    let ext = FeatureExtension::new("acme.legacy_names", "google.protobuf.FeatureSet");
    let r = FeatureResolver::new(Edition::Edition2023, &defaults, &[ext]).unwrap();

    let mut explicit = FeatureSet::new();
    explicit
        .extensions
        .insert("[acme.legacy_names]".into(), serde_json::json!(true));
    explicit
        .extensions
        .insert("[acme.unknown]".into(), serde_json::json!(3));

    let resolved = r.resolve(Some(&explicit), r.default_features());
    assert_eq!(resolved.extensions.len(), 1);
    assert!(resolved.extensions.contains_key("[acme.legacy_names]"));
}

#[test]
fn legacy_required_and_group_inference() {
    let r = resolver(Edition::Proto2);
    let parent = r.default_features().merged(&FeatureSet {
        utf8_validation: Some(Utf8Validation::Verify),
        ..FeatureSet::default()
    });

    let required = FieldDescriptorProto::new("a", 1, FieldType::Int32).required();
    let resolved = r.resolve_field(&required, &parent);
    assert_eq!(resolved.field_presence, FieldPresence::LegacyRequired);
    // legacy inference starts from the defaults, not the parent
    assert_eq!(resolved.utf8_validation, Utf8Validation::None);

    let group = FieldDescriptorProto::new("g", 2, FieldType::Group);
    let resolved = r.resolve_field(&group, &parent);
    assert_eq!(resolved.message_encoding, MessageEncoding::Delimited);
    assert_eq!(resolved.field_presence, FieldPresence::Explicit);
}

#[test]
fn legacy_packed_inference() {
    let proto2 = resolver(Edition::Proto2);
    let packed = FieldDescriptorProto::new("p", 1, FieldType::Int32)
        .repeated()
        .packed(true);
    assert_eq!(
        proto2
            .resolve_field(&packed, proto2.default_features())
            .repeated_field_encoding,
        RepeatedFieldEncoding::Packed
    );

    // proto2 `packed = false` is already the default
    let unpacked = FieldDescriptorProto::new("u", 2, FieldType::Int32)
        .repeated()
        .packed(false);
    assert_eq!(
        proto2
            .resolve_field(&unpacked, proto2.default_features())
            .repeated_field_encoding,
        RepeatedFieldEncoding::Expanded
    );

    let proto3 = resolver(Edition::Proto3);
    assert_eq!(
        proto3
            .resolve_field(&unpacked, proto3.default_features())
            .repeated_field_encoding,
        RepeatedFieldEncoding::Expanded
    );
    let plain = FieldDescriptorProto::new("v", 3, FieldType::Int32).repeated();
    assert_eq!(
        proto3
            .resolve_field(&plain, proto3.default_features())
            .repeated_field_encoding,
        RepeatedFieldEncoding::Packed
    );
}

#[test]
fn editions_field_resolves_against_parent() {
    let r = resolver(Edition::Edition2023);
    let parent = r.default_features().merged(&FeatureSet {
        field_presence: Some(FieldPresence::Implicit),
        ..FeatureSet::default()
    });
    let field = FieldDescriptorProto::new("a", 1, FieldType::Int32).with_features(FeatureSet {
        enum_type: Some(EnumType::Closed),
        ..FeatureSet::default()
    });
    let resolved = r.resolve_field(&field, &parent);
    assert_eq!(resolved.field_presence, FieldPresence::Implicit);
    assert_eq!(resolved.enum_type, EnumType::Closed);
}
