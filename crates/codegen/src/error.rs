use graphql_introspect::TypeKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Debug, Error)]
pub enum CodegenError {
    /// A collected node has a kind with no Go declaration form.
    #[error("Unsupported type kind {kind} for type '{name}'")]
    UnsupportedKind { name: String, kind: TypeKind },

    #[error("Failed to write generated code: {0}")]
    Format(#[from] std::fmt::Error),
}
