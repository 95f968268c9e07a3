//! Go type generation from GraphQL introspection schemas.
//!
//! Every declared type becomes a [`Node`]; nodes are collected into a
//! [`NodeGraph`] in schema order, linked to the nodes their fields reference,
//! and rendered as Go declarations. Fields that close a reference cycle are
//! rendered as pointers so the generated structs have finite size.
//!
//! # Examples
//!
//! ```
//! use graphql_codegen::generate;
//! use graphql_introspect::parse_introspection;
//!
//! let json = r#"{"data": {"__schema": {"types": [
//!     {"kind": "OBJECT", "name": "User", "fields": [
//!         {"name": "id", "args": [], "isDeprecated": false,
//!          "type": {"kind": "NON_NULL", "name": null,
//!                   "ofType": {"kind": "SCALAR", "name": "ID", "ofType": null}}}
//!     ]}
//! ], "directives": []}}}"#;
//!
//! let response = parse_introspection(json).unwrap();
//! let code = generate(&response.data.schema).unwrap();
//! assert_eq!(code, "type User struct {\n\tID string `json:\"id\"`\n}\n");
//! ```

mod emit;
mod error;
mod graph;
mod mapper;
mod naming;
mod node;

pub use emit::render;
pub use error::{CodegenError, Result};
pub use graph::NodeGraph;
pub use mapper::map_type;
pub use naming::capitalize;
pub use node::{FieldMeta, Node, NodeId};

use graphql_introspect::{IntrospectionSchema, Type, TypeKind};

/// Configurable pipeline from an introspection schema to Go source.
///
/// ```
/// use graphql_codegen::Generator;
/// use graphql_introspect::IntrospectionSchema;
///
/// let code = Generator::new()
///     .with_package("models")
///     .generate(&IntrospectionSchema::default())
///     .unwrap();
/// assert!(code.ends_with("package models\n\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Generator {
    include_introspection_types: bool,
    package: Option<String>,
}

impl Generator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `__`-prefixed introspection meta-types (`__Type`, `__Schema`, ...).
    #[must_use]
    pub fn include_introspection_types(mut self, include: bool) -> Self {
        self.include_introspection_types = include;
        self
    }

    /// Prefix the output with a generated-code banner and a package clause.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    fn wants(&self, type_def: &Type) -> bool {
        type_def.kind != TypeKind::Scalar
            && (self.include_introspection_types || !type_def.is_introspection_type())
    }

    /// Builds and links the node graph for the types this generator emits.
    #[must_use]
    pub fn build_graph(&self, schema: &IntrospectionSchema) -> NodeGraph {
        let mut graph: NodeGraph = schema
            .types
            .iter()
            .filter(|type_def| self.wants(type_def))
            .map(Node::from_type)
            .collect();
        graph.link();
        graph
    }

    /// Generates Go declarations for the schema.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::UnsupportedKind`] if the schema declares a
    /// type with a wrapper kind (`LIST`, `NON_NULL`, `NULL`).
    #[tracing::instrument(skip(self, schema), fields(types = schema.types.len()))]
    pub fn generate(&self, schema: &IntrospectionSchema) -> Result<String> {
        let graph = self.build_graph(schema);
        tracing::info!(
            declared = schema.types.len(),
            emitted = graph.len(),
            "Generating Go types"
        );

        let body = render(&graph)?;
        Ok(match &self.package {
            Some(package) => format!(
                "// Code generated by gqlgen from a GraphQL introspection schema. DO NOT EDIT.\n\npackage {package}\n\n{body}"
            ),
            None => body,
        })
    }
}

/// Generates Go declarations with the default [`Generator`] settings.
///
/// # Errors
///
/// See [`Generator::generate`].
pub fn generate(schema: &IntrospectionSchema) -> Result<String> {
    Generator::new().generate(schema)
}
