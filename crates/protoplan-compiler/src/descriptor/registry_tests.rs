use super::ids::{EnumId, FileId, MessageId};
use super::registry::{NodeRef, SchemaRegistry};

#[test]
fn register_and_lookup() {
    let mut registry = SchemaRegistry::new();
    registry.register("a.proto", NodeRef::File(FileId::new(0)));
    registry.register(".pkg.Msg", NodeRef::Message(MessageId::new(3)));

    assert_eq!(registry.lookup("a.proto"), Some(NodeRef::File(FileId::new(0))));
    assert_eq!(
        registry.lookup(".pkg.Msg"),
        Some(NodeRef::Message(MessageId::new(3)))
    );
    assert_eq!(registry.lookup(".pkg.Other"), None);
    assert_eq!(registry.len(), 1);
}

#[test]
fn files_and_types_do_not_collide() {
    let mut registry = SchemaRegistry::new();
    registry.register("pkg", NodeRef::File(FileId::new(0)));
    registry.register(".pkg", NodeRef::Message(MessageId::new(0)));

    assert_eq!(registry.file("pkg"), Some(FileId::new(0)));
    assert_eq!(registry.message(".pkg"), Some(MessageId::new(0)));
}

#[test]
fn typed_lookup_filters_kind() {
    let mut registry = SchemaRegistry::new();
    registry.register(".pkg.Color", NodeRef::Enum(EnumId::new(1)));

    assert_eq!(registry.enum_type(".pkg.Color"), Some(EnumId::new(1)));
    assert_eq!(registry.message(".pkg.Color"), None);
    assert_eq!(registry.service(".pkg.Color"), None);
}

#[test]
fn register_returns_previous() {
    let mut registry = SchemaRegistry::new();
    let first = registry.register(".pkg.A", NodeRef::Message(MessageId::new(0)));
    let second = registry.register(".pkg.A", NodeRef::Message(MessageId::new(1)));

    assert_eq!(first, None);
    assert_eq!(second, Some(NodeRef::Message(MessageId::new(0))));
}

#[test]
fn iteration_keeps_registration_order() {
    let mut registry = SchemaRegistry::new();
    registry.register(".b", NodeRef::Message(MessageId::new(0)));
    registry.register(".a", NodeRef::Enum(EnumId::new(0)));
    registry.register("x.proto", NodeRef::File(FileId::new(0)));

    let names: Vec<_> = registry.iter().map(|(name, _)| name).collect();
    assert_eq!(names, [".b", ".a"]);
    assert_eq!(registry.file_names().collect::<Vec<_>>(), ["x.proto"]);
}
