//! Per-type nodes built from schema declarations.

use crate::mapper::map_type;
use graphql_introspect::{Type, TypeKind, TypeRef};

/// Index of a node inside the [`crate::NodeGraph`] that collected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One member of a generated declaration: a struct field, an interface
/// method, or an enum constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta {
    /// Name as declared in the schema, before export capitalization.
    pub name: String,
    /// Go type expression produced by [`map_type`].
    pub mapped_type: String,
    pub json_tag: String,
    pub nullable: bool,
    pub(crate) has_cycle: bool,
}

impl FieldMeta {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        mapped_type: impl Into<String>,
        json_tag: impl Into<String>,
        nullable: bool,
    ) -> Self {
        Self {
            name: name.into(),
            mapped_type: mapped_type.into(),
            json_tag: json_tag.into(),
            nullable,
            has_cycle: false,
        }
    }

    fn from_ref(name: &str, type_ref: &TypeRef) -> Self {
        Self::new(
            name,
            map_type(type_ref),
            name,
            type_ref.kind == TypeKind::Null || type_ref.of_type.is_none(),
        )
    }

    /// Whether the field is part of a reference cycle. Only set by
    /// [`crate::NodeGraph::link`].
    #[must_use]
    pub const fn has_cycle(&self) -> bool {
        self.has_cycle
    }
}

/// A named schema type and the members it will render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: TypeKind,
    pub fields: Vec<FieldMeta>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind, fields: Vec<FieldMeta>) -> Self {
        Self {
            name: name.into(),
            kind,
            fields,
            children: Vec::new(),
        }
    }

    /// Builds a node from a schema type declaration.
    ///
    /// A field is nullable when its reference is an explicit `NULL` wrapper
    /// or has no wrapped reference at all. Enum values take the enum's own
    /// name as their type and are never nullable. Kinds without members
    /// (scalars, wrappers) produce a node with no fields.
    #[must_use]
    pub fn from_type(type_def: &Type) -> Self {
        let fields = match type_def.kind {
            TypeKind::Object | TypeKind::Interface | TypeKind::Union => type_def
                .fields()
                .iter()
                .map(|field| FieldMeta::from_ref(&field.name, &field.type_ref))
                .collect(),
            TypeKind::InputObject => type_def
                .input_fields()
                .iter()
                .map(|field| FieldMeta::from_ref(&field.name, &field.type_ref))
                .collect(),
            TypeKind::Enum => type_def
                .enum_values()
                .iter()
                .map(|value| FieldMeta::new(&value.name, &type_def.name, &value.name, false))
                .collect(),
            _ => Vec::new(),
        };

        Self::new(type_def.name.clone(), type_def.kind, fields)
    }

    /// Children linked by the last [`crate::NodeGraph::link`], in first-reference order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}
