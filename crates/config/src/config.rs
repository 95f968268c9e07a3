use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level `gqlgen` configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqlgenConfig {
    /// Where the introspection schema comes from
    pub schema: SchemaConfig,

    /// File the generated Go code is written to; stdout when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Go package clause for the generated file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Keep `__`-prefixed introspection meta-types in the output
    #[serde(default)]
    pub include_introspection_types: bool,
}

impl GqlgenConfig {
    /// Resolves `output` against the directory holding the config file.
    #[must_use]
    pub fn output_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.output.as_ref().map(|output| config_dir.join(output))
    }
}

/// Schema source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    /// Path to a saved introspection JSON file
    Path(String),
    /// Introspection configuration for a live endpoint
    Introspection(IntrospectionSchemaConfig),
}

/// Configuration for introspecting a remote GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchemaConfig {
    /// The GraphQL endpoint URL to introspect
    pub url: String,

    /// HTTP headers to include in the introspection request (e.g., for authentication)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Request timeout in seconds (default: 30)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Number of retry attempts on failure (default: 5)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,
}

impl SchemaConfig {
    /// The schema file path, resolved against `config_dir` when relative.
    /// `None` for introspection configs.
    #[must_use]
    pub fn file_path(&self, config_dir: &Path) -> Option<PathBuf> {
        match self {
            Self::Path(path) => Some(config_dir.join(path)),
            Self::Introspection(_) => None,
        }
    }

    #[must_use]
    pub fn introspection_config(&self) -> Option<&IntrospectionSchemaConfig> {
        match self {
            Self::Introspection(config) => Some(config),
            Self::Path(_) => None,
        }
    }

    #[must_use]
    pub const fn is_introspection(&self) -> bool {
        matches!(self, Self::Introspection(_))
    }
}
