//! GraphQL introspection schema model and fetching.
//!
//! This crate decodes the JSON produced by the standard introspection query
//! into a typed model and can fetch it from a live endpoint with a
//! throttle-aware client.
//!
//! # Examples
//!
//! ## Decoding a saved schema
//!
//! ```no_run
//! use graphql_introspect::parse_introspection;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = std::fs::read_to_string("schema.json")?;
//! let response = parse_introspection(&json)?;
//! for ty in &response.data.schema.types {
//!     println!("{} {}", ty.kind, ty.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Fetching with custom headers and retry
//!
//! ```no_run
//! use graphql_introspect::IntrospectionClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = IntrospectionClient::new()
//!         .with_header("Authorization", "Bearer my-token")
//!         .with_timeout(Duration::from_secs(60))
//!         .with_retries(3);
//!
//!     let response = client.execute("https://api.example.com/graphql").await?;
//!     println!("{} types", response.data.schema.types.len());
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod query;
mod referenced;
mod types;

pub use client::IntrospectionClient;
pub use error::{IntrospectionError, Result};
pub use query::{
    execute_introspection, parse_introspection, parse_type_response, INTROSPECTION_QUERY,
};
pub use referenced::referenced_types;
pub use types::*;
