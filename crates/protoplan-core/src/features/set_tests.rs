use super::*;

fn full() -> ResolvedFeatures {
    ResolvedFeatures::from_complete(&FeatureSetDefaults::builtin().defaults[0].combined()).unwrap()
}

#[test]
fn merge_from_only_overrides_set_leaves() {
    let mut base = FeatureSet {
        field_presence: Some(FieldPresence::Explicit),
        enum_type: Some(EnumType::Open),
        ..FeatureSet::default()
    };
    let overrides = FeatureSet {
        enum_type: Some(EnumType::Closed),
        ..FeatureSet::default()
    };
    base.merge_from(&overrides);

    assert_eq!(base.field_presence, Some(FieldPresence::Explicit));
    assert_eq!(base.enum_type, Some(EnumType::Closed));
    assert!(base.json_format.is_none());
}

#[test]
fn from_complete_reports_missing_leaf() {
    let partial = FeatureSet {
        field_presence: Some(FieldPresence::Explicit),
        ..FeatureSet::default()
    };
    assert_eq!(ResolvedFeatures::from_complete(&partial), Err("enum_type"));
}

#[test]
fn merged_with_empty_set_is_identity() {
    let resolved = full();
    assert_eq!(resolved.merged(&FeatureSet::new()), resolved);
    assert!(FeatureSet::new().is_empty());
}

#[test]
fn to_feature_set_is_complete() {
    let resolved = full();
    let sparse = resolved.to_feature_set();
    assert_eq!(ResolvedFeatures::from_complete(&sparse).unwrap(), resolved);
}

#[test]
fn extension_keys_deserialize_into_map() {
    let set: FeatureSet =
        serde_json::from_str(r#"{"fieldPresence": "IMPLICIT", "[acme.legacy_names]": true}"#)
            .unwrap();
    assert_eq!(set.field_presence, Some(FieldPresence::Implicit));
    assert_eq!(
        set.extensions.get("[acme.legacy_names]"),
        Some(&serde_json::Value::Bool(true))
    );
}
