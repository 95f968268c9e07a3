//! Type definitions for GraphQL introspection responses.
//!
//! These types mirror the structure of the standard `__schema` introspection
//! response and are deserialized from JSON using serde. They carry no behavior
//! beyond decoding and a few read-only accessors.

use serde::{Deserialize, Serialize};

/// Top-level introspection response wrapper: `{"data": {"__schema": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub data: IntrospectionData,
}

/// Data field of the introspection response containing the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

/// Response to a single-type query: `{"data": {"__type": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeResponse {
    pub data: TypeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeData {
    #[serde(rename = "__type")]
    pub type_def: Type,
}

/// Complete GraphQL schema information from introspection.
///
/// Code generation only consumes `types`; the root operation types and the
/// directives are decoded so the model round-trips the full response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    #[serde(default)]
    pub types: Vec<Type>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutation_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<TypeRef>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// The kind of a GraphQL type or type reference.
///
/// `NON_NULL` and `LIST` are modifiers wrapping an inner reference. `NULL`
/// is accepted as an explicit nullable wrapper. Any other literal fails to
/// decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    #[default]
    Null,
    NonNull,
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
}

impl TypeKind {
    /// The literal used by the introspection JSON for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::NonNull => "NON_NULL",
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
        }
    }

    /// Whether this kind wraps another reference instead of naming a type.
    #[must_use]
    pub const fn is_wrapper(self) -> bool {
        matches!(self, Self::Null | Self::NonNull | Self::List)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One type declaration in the schema.
///
/// Which lists are populated depends on `kind`: `OBJECT` and `INTERFACE` carry
/// `fields`, `INPUT_OBJECT` carries `input_fields`, `ENUM` carries
/// `enum_values`, and `UNION`/`INTERFACE` carry `possible_types`. Missing and
/// `null` lists both decode to `None`; use the slice accessors to read them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_fields: Option<Vec<InputValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<TypeRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_types: Option<Vec<TypeRef>>,
}

impl Type {
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        self.fields.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn input_fields(&self) -> &[InputValue] {
        self.input_fields.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn interfaces(&self) -> &[TypeRef] {
        self.interfaces.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn enum_values(&self) -> &[EnumValue] {
        self.enum_values.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn possible_types(&self) -> &[TypeRef] {
        self.possible_types.as_deref().unwrap_or_default()
    }

    /// Introspection meta-types (`__Schema`, `__Type`, ...) start with `__`.
    #[must_use]
    pub fn is_introspection_type(&self) -> bool {
        self.name.starts_with("__")
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

/// An input field or argument.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub args: Vec<InputValue>,
}

/// A possibly wrapped reference to a named type.
///
/// Root operation types (`queryType` and friends) are encoded as bare
/// `{"name": ...}` objects, so `kind` defaults when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// A bare reference to a named type.
    #[must_use]
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// A modifier (`NON_NULL`, `LIST`, `NULL`) around `inner`.
    #[must_use]
    pub fn wrap(kind: TypeKind, inner: Self) -> Self {
        Self {
            kind,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    #[must_use]
    pub fn non_null(inner: Self) -> Self {
        Self::wrap(TypeKind::NonNull, inner)
    }

    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::wrap(TypeKind::List, inner)
    }

    /// The name, treating an empty string the same as an absent one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    #[must_use]
    pub fn of_type(&self) -> Option<&Self> {
        self.of_type.as_deref()
    }

    /// Converts the reference to GraphQL type syntax, e.g. `[String!]!`.
    ///
    /// ```
    /// # use graphql_introspect::{TypeKind, TypeRef};
    /// let type_ref = TypeRef::non_null(TypeRef::list(TypeRef::named(TypeKind::Scalar, "String")));
    /// assert_eq!(type_ref.to_type_string(), "[String]!");
    /// ```
    #[must_use]
    pub fn to_type_string(&self) -> String {
        match self.kind {
            TypeKind::NonNull => self.of_type().map_or_else(
                || "!".to_string(),
                |of_type| format!("{}!", of_type.to_type_string()),
            ),
            TypeKind::List => self.of_type().map_or_else(
                || "[]".to_string(),
                |of_type| format!("[{}]", of_type.to_type_string()),
            ),
            TypeKind::Null => self
                .of_type()
                .map(Self::to_type_string)
                .unwrap_or_default(),
            _ => self.name().unwrap_or_default().to_string(),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_type_string())
    }
}
