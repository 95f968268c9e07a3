//! Configuration for the `gqlgen` Go type generator.
//!
//! A project config names where the introspection schema comes from (a saved
//! JSON file or a live endpoint) and how the generated Go file is written.
//! It is discovered by walking up from the working directory and may be
//! written in YAML, JSON or TOML.

mod config;
mod error;
mod loader;

pub use config::{GqlgenConfig, IntrospectionSchemaConfig, SchemaConfig};
pub use error::{ConfigError, Result};
pub use loader::{
    find_config, is_valid_package_name, load_config, load_config_from_str, CONFIG_FILES,
};
