//! Pool construction, phase 1: allocate.
//!
//! Every node is created from its local declaration and registered
//! immediately. Feature resolution happens here because it only needs the
//! parent chain, which allocation walks top-down. References between nodes
//! are left as names for `bind`.

use protoplan_core::naming::{qualify, registry_key, to_json_field_name};
use protoplan_core::{
    DescriptorProto, EnumDescriptorProto, FeatureExtension, FeatureResolver, FeatureSetDefaults,
    FieldDescriptorProto, FieldLabel, FieldPresence, FieldType, FileDescriptorProto,
    MessageEncoding, ResolvedFeatures, ServiceDescriptorProto, is_valid_field_number,
};
use tracing::debug;

use super::ids::{EnumId, EnumValueId, FieldId, FileId, MessageId, MethodId, OneofId, ServiceId};
use super::nodes::{
    EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FileDescriptor, MessageDescriptor,
    MethodDescriptor, OneofDescriptor, ServiceDescriptor,
};
use super::pool::DescriptorPool;
use super::registry::NodeRef;
use crate::invariants::{
    assert_field_number, assert_map_entry_shape, assert_synthetic_oneofs_last,
    assert_unique_field_number, assert_unique_name, ensure_oneof_index,
};
use crate::{CompileError, CompilerConfig, Result};

/// Builds a `DescriptorPool` one file at a time.
///
/// Files must be added in import order: a file's dependencies are added
/// before the file itself.
#[derive(Debug)]
pub struct DescriptorPoolBuilder {
    pool: DescriptorPool,
    defaults: FeatureSetDefaults,
    extensions: Vec<FeatureExtension>,
}

/// Arena lengths before a file was allocated; bind visits everything after.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Watermark {
    pub(crate) fields: usize,
    pub(crate) messages: usize,
    pub(crate) methods: usize,
}

impl DescriptorPoolBuilder {
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            pool: DescriptorPool::default(),
            defaults: config.defaults.clone(),
            extensions: config.extensions.clone(),
        }
    }

    /// Allocate and bind one file.
    ///
    /// Fails only when no feature resolver can be built for the file's edition.
    pub fn add_file(&mut self, proto: &FileDescriptorProto) -> Result<FileId> {
        let resolver =
            FeatureResolver::new(proto.resolved_edition(), &self.defaults, &self.extensions)
                .map_err(|source| CompileError::Feature {
                    file: proto.name.clone(),
                    source,
                })?;

        let mark = Watermark {
            fields: self.pool.fields.len(),
            messages: self.pool.messages.len(),
            methods: self.pool.methods.len(),
        };
        let file = Allocator {
            pool: &mut self.pool,
            resolver: &resolver,
        }
        .allocate_file(proto);
        self.pool.bind_file(file, mark);
        Ok(file)
    }

    pub fn build(self) -> DescriptorPool {
        self.pool
    }
}

struct Allocator<'a> {
    pool: &'a mut DescriptorPool,
    resolver: &'a FeatureResolver,
}

impl Allocator<'_> {
    #[tracing::instrument(skip_all, fields(file = %proto.name))]
    fn allocate_file(&mut self, proto: &FileDescriptorProto) -> FileId {
        let id = FileId::new(self.pool.files.len());
        let explicit = proto.options.as_ref().and_then(|o| o.features.as_ref());
        let features = self
            .resolver
            .resolve(explicit, self.resolver.default_features());

        self.pool.files.push(FileDescriptor {
            name: proto.name.clone(),
            package: proto.package.clone(),
            edition: self.resolver.edition(),
            features: features.clone(),
            messages: Vec::new(),
            enums: Vec::new(),
            services: Vec::new(),
            extensions: Vec::new(),
            dependency_names: proto.dependency.clone(),
            public_dependency_indices: proto.public_dependency.clone(),
            weak_dependency_indices: proto.weak_dependency.clone(),
            dependencies: Vec::new(),
        });
        self.register(&proto.name, NodeRef::File(id));

        let scope = proto.package.as_str();
        let messages = proto
            .message_type
            .iter()
            .map(|m| self.allocate_message(m, id, None, scope, &features))
            .collect();
        let enums = proto
            .enum_type
            .iter()
            .map(|e| self.allocate_enum(e, id, None, scope, &features))
            .collect();
        let services = proto
            .service
            .iter()
            .map(|s| self.allocate_service(s, id, scope, &features))
            .collect();
        let extensions = proto
            .extension
            .iter()
            .map(|f| self.allocate_field(f, id, None, scope, &features, true))
            .collect();

        let file = &mut self.pool.files[id.index()];
        file.messages = messages;
        file.enums = enums;
        file.services = services;
        file.extensions = extensions;

        debug!(
            edition = %self.resolver.edition(),
            messages = self.pool.messages.len(),
            fields = self.pool.fields.len(),
            "allocated"
        );
        id
    }

    fn allocate_message(
        &mut self,
        proto: &DescriptorProto,
        file: FileId,
        containing_type: Option<MessageId>,
        scope: &str,
        parent: &ResolvedFeatures,
    ) -> MessageId {
        let id = MessageId::new(self.pool.messages.len());
        let full_name = qualify(scope, &proto.name);
        let explicit = proto.options.as_ref().and_then(|o| o.features.as_ref());
        let features = self.resolver.resolve(explicit, parent);

        self.pool.messages.push(MessageDescriptor {
            name: proto.name.clone(),
            full_name: full_name.clone(),
            file,
            containing_type,
            features: features.clone(),
            fields: Vec::new(),
            oneofs: Vec::new(),
            nested_types: Vec::new(),
            enums: Vec::new(),
            extensions: Vec::new(),
            extension_ranges: proto
                .extension_range
                .iter()
                .map(|r| r.start..r.end)
                .collect(),
            reserved_ranges: proto
                .reserved_range
                .iter()
                .map(|r| r.start..r.end)
                .collect(),
            reserved_names: proto.reserved_name.clone(),
            is_map_entry: proto.is_map_entry(),
            fields_by_number: Vec::new(),
            real_oneof_count: 0,
        });
        self.register(&registry_key(&full_name), NodeRef::Message(id));

        if proto.is_map_entry() {
            assert_map_entry_shape(proto.field.len(), &full_name);
        }

        // Synthetic oneofs wrap exactly one proto3 `optional` field.
        let synthetic: Vec<bool> = (0..proto.oneof_decl.len())
            .map(|index| {
                let mut members = proto
                    .field
                    .iter()
                    .filter(|f| f.oneof_index == Some(index as i32));
                matches!((members.next(), members.next()), (Some(only), None) if only.proto3_optional)
            })
            .collect();
        assert_synthetic_oneofs_last(&synthetic, &full_name);

        let oneofs: Vec<OneofId> = proto
            .oneof_decl
            .iter()
            .zip(&synthetic)
            .map(|(oneof, &is_synthetic)| {
                let oneof_id = OneofId::new(self.pool.oneofs.len());
                let explicit = oneof.options.as_ref().and_then(|o| o.features.as_ref());
                self.pool.oneofs.push(OneofDescriptor {
                    name: oneof.name.clone(),
                    full_name: qualify(&full_name, &oneof.name),
                    containing_type: id,
                    features: self.resolver.resolve(explicit, &features),
                    fields: Vec::new(),
                    is_synthetic,
                });
                oneof_id
            })
            .collect();

        let mut fields = Vec::with_capacity(proto.field.len());
        for field in &proto.field {
            let oneof = field.oneof_index.map(|index| {
                let index = ensure_oneof_index(index, oneofs.len(), &field.name);
                (oneofs[index], synthetic[index])
            });
            // Members of a real oneof inherit from the oneof.
            let parent = match oneof {
                Some((oneof_id, false)) => self.pool.oneofs[oneof_id.index()].features.clone(),
                _ => features.clone(),
            };
            let field_id = self.allocate_field(field, file, Some(id), &full_name, &parent, false);
            if let Some((oneof_id, is_synthetic)) = oneof {
                let descriptor = &mut self.pool.fields[field_id.index()];
                descriptor.oneof = Some(oneof_id);
                if !is_synthetic {
                    descriptor.real_oneof = Some(oneof_id);
                }
                self.pool.oneofs[oneof_id.index()].fields.push(field_id);
            }
            fields.push(field_id);
        }

        let mut fields_by_number = fields.clone();
        fields_by_number.sort_by_key(|f| self.pool.fields[f.index()].number);
        let duplicate = fields_by_number.windows(2).find_map(|pair| {
            let a = self.pool.fields[pair[0].index()].number;
            let b = self.pool.fields[pair[1].index()].number;
            (a == b).then_some(a)
        });
        assert_unique_field_number(duplicate, &full_name);

        let nested_types = proto
            .nested_type
            .iter()
            .map(|m| self.allocate_message(m, file, Some(id), &full_name, &features))
            .collect();
        let enums = proto
            .enum_type
            .iter()
            .map(|e| self.allocate_enum(e, file, Some(id), &full_name, &features))
            .collect();
        let extensions = proto
            .extension
            .iter()
            .map(|f| self.allocate_field(f, file, Some(id), &full_name, &features, true))
            .collect();

        let message = &mut self.pool.messages[id.index()];
        message.real_oneof_count = synthetic.iter().filter(|&&s| !s).count();
        message.fields = fields;
        message.fields_by_number = fields_by_number;
        message.oneofs = oneofs;
        message.nested_types = nested_types;
        message.enums = enums;
        message.extensions = extensions;
        id
    }

    fn allocate_field(
        &mut self,
        proto: &FieldDescriptorProto,
        file: FileId,
        declared_in: Option<MessageId>,
        scope: &str,
        parent: &ResolvedFeatures,
        is_extension: bool,
    ) -> FieldId {
        let id = FieldId::new(self.pool.fields.len());
        let full_name = qualify(scope, &proto.name);
        if !is_extension {
            assert_field_number(proto.number, is_valid_field_number(proto.number), &full_name);
        }

        let features = self.resolver.resolve_field(proto, parent);
        let field_type = if proto.r#type == FieldType::Message
            && features.message_encoding == MessageEncoding::Delimited
        {
            FieldType::Group
        } else {
            proto.r#type
        };
        let label = if features.field_presence == FieldPresence::LegacyRequired
            && proto.label == FieldLabel::Optional
        {
            FieldLabel::Required
        } else {
            proto.label
        };
        let type_name = if field_type.is_message_like() || field_type == FieldType::Enum {
            proto.type_name.clone()
        } else {
            None
        };

        self.pool.fields.push(FieldDescriptor {
            name: proto.name.clone(),
            full_name,
            number: proto.number,
            label,
            field_type,
            json_name: proto
                .json_name
                .clone()
                .unwrap_or_else(|| to_json_field_name(&proto.name)),
            file,
            features,
            is_extension,
            oneof: None,
            proto3_optional: proto.proto3_optional,
            default_value: proto.default_value.clone(),
            declared_in,
            type_name,
            extendee_name: if is_extension {
                proto.extendee.clone()
            } else {
                None
            },
            containing_type: if is_extension { None } else { declared_in },
            target: None,
            real_oneof: None,
            is_map: false,
            is_group_like: false,
        });
        id
    }

    fn allocate_enum(
        &mut self,
        proto: &EnumDescriptorProto,
        file: FileId,
        containing_type: Option<MessageId>,
        scope: &str,
        parent: &ResolvedFeatures,
    ) -> EnumId {
        let id = EnumId::new(self.pool.enums.len());
        let full_name = qualify(scope, &proto.name);
        let options = proto.options.as_ref();
        let features = self
            .resolver
            .resolve(options.and_then(|o| o.features.as_ref()), parent);
        self.register(&registry_key(&full_name), NodeRef::Enum(id));

        let values = proto
            .value
            .iter()
            .map(|value| {
                let value_id = EnumValueId::new(self.pool.enum_values.len());
                let explicit = value.options.as_ref().and_then(|o| o.features.as_ref());
                self.pool.enum_values.push(EnumValueDescriptor {
                    name: value.name.clone(),
                    full_name: qualify(scope, &value.name),
                    number: value.number,
                    enum_type: id,
                    features: self.resolver.resolve(explicit, &features),
                });
                value_id
            })
            .collect();

        self.pool.enums.push(EnumDescriptor {
            name: proto.name.clone(),
            full_name,
            file,
            containing_type,
            features,
            values,
            reserved_ranges: proto
                .reserved_range
                .iter()
                .map(|r| r.start..=r.end)
                .collect(),
            reserved_names: proto.reserved_name.clone(),
            allow_alias: options.is_some_and(|o| o.allow_alias),
        });
        id
    }

    fn allocate_service(
        &mut self,
        proto: &ServiceDescriptorProto,
        file: FileId,
        scope: &str,
        parent: &ResolvedFeatures,
    ) -> ServiceId {
        let id = ServiceId::new(self.pool.services.len());
        let full_name = qualify(scope, &proto.name);
        let explicit = proto.options.as_ref().and_then(|o| o.features.as_ref());
        let features = self.resolver.resolve(explicit, parent);
        self.register(&registry_key(&full_name), NodeRef::Service(id));

        let methods = proto
            .method
            .iter()
            .map(|method| {
                let method_id = MethodId::new(self.pool.methods.len());
                let explicit = method.options.as_ref().and_then(|o| o.features.as_ref());
                self.pool.methods.push(MethodDescriptor {
                    name: method.name.clone(),
                    full_name: qualify(&full_name, &method.name),
                    service: id,
                    features: self.resolver.resolve(explicit, &features),
                    client_streaming: method.client_streaming,
                    server_streaming: method.server_streaming,
                    input_name: method.input_type.clone(),
                    output_name: method.output_type.clone(),
                    input_type: None,
                    output_type: None,
                });
                method_id
            })
            .collect();

        self.pool.services.push(ServiceDescriptor {
            name: proto.name.clone(),
            full_name,
            file,
            features,
            methods,
        });
        id
    }

    fn register(&mut self, name: &str, node: NodeRef) {
        let previous = self.pool.registry.register(name, node);
        assert_unique_name(previous.is_some(), name);
    }
}
