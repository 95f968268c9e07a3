//! Go source emission for a linked node graph.

use crate::naming::capitalize;
use crate::{CodegenError, Node, NodeGraph, Result};
use graphql_introspect::TypeKind;
use std::fmt::Write;

/// Renders every collected node as a Go declaration, in collection order.
///
/// Each declaration ends with a newline and declarations are separated by
/// one blank line. The graph should be linked first so cycle flags are set.
///
/// # Errors
///
/// Returns [`CodegenError::UnsupportedKind`] for a node whose kind has no
/// declaration form (scalars and wrapper kinds).
#[tracing::instrument(skip(graph), fields(nodes = graph.len()))]
pub fn render(graph: &NodeGraph) -> Result<String> {
    let mut declarations = Vec::with_capacity(graph.len());

    for node in graph.nodes() {
        let mut out = String::new();
        match node.kind {
            TypeKind::Object | TypeKind::InputObject | TypeKind::Union => {
                write_struct(&mut out, node)?;
            }
            TypeKind::Interface => write_interface(&mut out, node)?,
            TypeKind::Enum => write_enum(&mut out, node)?,
            kind => {
                tracing::error!(name = %node.name, %kind, "Cannot render type");
                return Err(CodegenError::UnsupportedKind {
                    name: node.name.clone(),
                    kind,
                });
            }
        }
        declarations.push(out);
    }

    tracing::debug!(declarations = declarations.len(), "Rendered declarations");
    Ok(declarations.join("\n"))
}

fn write_struct(out: &mut String, node: &Node) -> std::fmt::Result {
    writeln!(out, "type {} struct {{", node.name)?;
    for field in &node.fields {
        let name = capitalize(&field.name);
        let (pointer, hint) = if field.has_cycle() {
            ("*", "")
        } else if field.nullable {
            ("*", ",omitempty")
        } else {
            ("", "")
        };
        writeln!(
            out,
            "\t{name} {pointer}{} `json:\"{}{hint}\"`",
            field.mapped_type, field.json_tag
        )?;
    }
    out.push_str("}\n");
    Ok(())
}

fn write_interface(out: &mut String, node: &Node) -> std::fmt::Result {
    writeln!(out, "type {} interface {{", node.name)?;
    for field in &node.fields {
        writeln!(out, "\t{}() {}", capitalize(&field.name), field.mapped_type)?;
    }
    out.push_str("}\n");
    Ok(())
}

fn write_enum(out: &mut String, node: &Node) -> std::fmt::Result {
    writeln!(out, "type {} string\n", node.name)?;
    out.push_str("const (\n");
    for value in &node.fields {
        writeln!(
            out,
            "\t{name}{suffix} {name} = \"{value}\"",
            name = node.name,
            suffix = capitalize(&value.name.to_lowercase()),
            value = value.name,
        )?;
    }
    out.push_str(")\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldMeta;

    fn graph_of(nodes: Vec<Node>) -> NodeGraph {
        let mut graph: NodeGraph = nodes.into_iter().collect();
        graph.link();
        graph
    }

    #[test]
    fn test_render_struct_field_forms() {
        let graph = graph_of(vec![Node::new(
            "Shop",
            TypeKind::Object,
            vec![
                FieldMeta::new("id", "string", "id", false),
                FieldMeta::new("onlineStoreUrl", "string", "onlineStoreUrl", true),
                FieldMeta::new("parent", "Shop", "parent", true),
            ],
        )]);

        let expected = "type Shop struct {\n\
            \tID string `json:\"id\"`\n\
            \tOnlineStoreURL *string `json:\"onlineStoreUrl,omitempty\"`\n\
            \tParent *Shop `json:\"parent\"`\n\
            }\n";
        assert_eq!(render(&graph).unwrap(), expected);
    }

    #[test]
    fn test_render_interface() {
        let graph = graph_of(vec![Node::new(
            "Node",
            TypeKind::Interface,
            vec![FieldMeta::new("id", "string", "id", true)],
        )]);
        assert_eq!(
            render(&graph).unwrap(),
            "type Node interface {\n\tID() string\n}\n"
        );
    }

    #[test]
    fn test_render_enum() {
        let graph = graph_of(vec![Node::new(
            "CurrencyCode",
            TypeKind::Enum,
            vec![
                FieldMeta::new("USD", "CurrencyCode", "USD", false),
                FieldMeta::new("EUR_X", "CurrencyCode", "EUR_X", false),
            ],
        )]);
        let expected = "type CurrencyCode string\n\n\
            const (\n\
            \tCurrencyCodeUsd CurrencyCode = \"USD\"\n\
            \tCurrencyCodeEurX CurrencyCode = \"EUR_X\"\n\
            )\n";
        assert_eq!(render(&graph).unwrap(), expected);
    }

    #[test]
    fn test_render_separates_declarations_with_blank_line() {
        let graph = graph_of(vec![
            Node::new("A", TypeKind::Object, Vec::new()),
            Node::new("B", TypeKind::Union, Vec::new()),
        ]);
        assert_eq!(
            render(&graph).unwrap(),
            "type A struct {\n}\n\ntype B struct {\n}\n"
        );
    }

    #[test]
    fn test_render_empty_graph() {
        assert_eq!(render(&NodeGraph::new()).unwrap(), "");
    }

    #[test]
    fn test_render_rejects_scalar() {
        let graph = graph_of(vec![
            Node::new("User", TypeKind::Object, Vec::new()),
            Node::new("DateTime", TypeKind::Scalar, Vec::new()),
        ]);
        let err = render(&graph).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnsupportedKind { ref name, kind: TypeKind::Scalar } if name == "DateTime"
        ));
        assert_eq!(
            err.to_string(),
            "Unsupported type kind SCALAR for type 'DateTime'"
        );
    }
}
