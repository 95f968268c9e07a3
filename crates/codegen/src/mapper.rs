//! Maps GraphQL type references to Go type expressions.

use graphql_introspect::{TypeKind, TypeRef};

/// Go type used when a reference carries no usable type information.
pub const ANY: &str = "any";

/// Returns the Go type expression for a GraphQL type reference.
///
/// Wrappers (`NON_NULL`, `NULL`) are transparent here; nullability is
/// decided by the caller from the outer reference. Missing information
/// never fails and falls back to `any`.
#[must_use]
pub fn map_type(type_ref: &TypeRef) -> String {
    match type_ref.kind {
        TypeKind::Scalar => map_scalar(type_ref.name().unwrap_or_default()).to_string(),
        TypeKind::Object | TypeKind::Enum | TypeKind::InputObject | TypeKind::Interface => {
            type_ref.name().unwrap_or(ANY).to_string()
        }
        TypeKind::Union => ANY.to_string(),
        TypeKind::NonNull | TypeKind::Null => {
            type_ref.of_type().map_or_else(|| ANY.to_string(), map_type)
        }
        TypeKind::List => match type_ref.of_type() {
            Some(inner) if inner.name().is_some() => format!("[]{}", map_type(inner)),
            _ => format!("[]{ANY}"),
        },
    }
}

/// Built-in scalars map to Go primitives; custom scalars are carried as strings.
fn map_scalar(name: &str) -> &'static str {
    match name {
        "Int" => "int",
        "Float" | "Decimal" => "float64",
        "Boolean" => "bool",
        _ => "string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str) -> TypeRef {
        TypeRef::named(TypeKind::Scalar, name)
    }

    #[test]
    fn test_map_scalars() {
        let cases = [
            ("Int", "int"),
            ("Float", "float64"),
            ("Decimal", "float64"),
            ("String", "string"),
            ("Boolean", "bool"),
            ("ID", "string"),
            ("DateTime", "string"),
            ("URL", "string"),
        ];
        for (name, expected) in cases {
            assert_eq!(map_type(&scalar(name)), expected, "scalar {name}");
        }
    }

    #[test]
    fn test_map_named_kinds() {
        assert_eq!(map_type(&TypeRef::named(TypeKind::Object, "User")), "User");
        assert_eq!(map_type(&TypeRef::named(TypeKind::Enum, "Status")), "Status");
        assert_eq!(
            map_type(&TypeRef::named(TypeKind::InputObject, "UserInput")),
            "UserInput"
        );
        assert_eq!(map_type(&TypeRef::named(TypeKind::Interface, "Node")), "Node");
        assert_eq!(
            map_type(&TypeRef {
                kind: TypeKind::Object,
                name: None,
                of_type: None,
            }),
            "any"
        );
    }

    #[test]
    fn test_map_union_is_any() {
        assert_eq!(map_type(&TypeRef::named(TypeKind::Union, "SearchResult")), "any");
    }

    #[test]
    fn test_map_wrappers_are_transparent() {
        assert_eq!(map_type(&TypeRef::non_null(scalar("Int"))), "int");
        assert_eq!(
            map_type(&TypeRef::wrap(TypeKind::Null, TypeRef::named(TypeKind::Object, "User"))),
            "User"
        );
        assert_eq!(
            map_type(&TypeRef {
                kind: TypeKind::NonNull,
                name: None,
                of_type: None,
            }),
            "any"
        );
        assert_eq!(
            map_type(&TypeRef {
                kind: TypeKind::Null,
                name: Some("Ghost".to_string()),
                of_type: None,
            }),
            "any"
        );
    }

    #[test]
    fn test_map_lists() {
        assert_eq!(map_type(&TypeRef::list(scalar("String"))), "[]string");
        assert_eq!(
            map_type(&TypeRef::list(TypeRef::named(TypeKind::Object, "User"))),
            "[]User"
        );
        // A wrapped reference without a name loses its element type.
        assert_eq!(
            map_type(&TypeRef::list(TypeRef::non_null(scalar("String")))),
            "[]any"
        );
        assert_eq!(
            map_type(&TypeRef {
                kind: TypeKind::List,
                name: Some("String".to_string()),
                of_type: None,
            }),
            "[]any"
        );
        assert_eq!(
            map_type(&TypeRef::non_null(TypeRef::list(TypeRef::named(
                TypeKind::Object,
                "User"
            )))),
            "[]User"
        );
    }
}
