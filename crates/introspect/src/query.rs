//! The introspection query and helpers to decode its response.

use crate::{IntrospectionClient, IntrospectionResponse, Result, TypeResponse};

/// Standard GraphQL introspection query.
///
/// Type references are nested seven levels deep so wrappers like
/// `[[[String!]!]!]` resolve down to the named type.
pub const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
";

/// Decodes an introspection response from JSON text.
///
/// # Errors
///
/// Returns [`crate::IntrospectionError::Parse`] if the text is not valid JSON, does
/// not have the `{"data": {"__schema": ...}}` shape, or contains an unknown
/// type kind literal.
#[tracing::instrument(skip(json), fields(size = json.len()))]
pub fn parse_introspection(json: &str) -> Result<IntrospectionResponse> {
    let response: IntrospectionResponse = serde_json::from_str(json).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to decode introspection response");
    })?;
    tracing::debug!(
        types = response.data.schema.types.len(),
        directives = response.data.schema.directives.len(),
        "Decoded introspection response"
    );
    Ok(response)
}

/// Decodes a single-type response (`{"data": {"__type": ...}}`).
///
/// # Errors
///
/// Returns [`crate::IntrospectionError::Parse`] on malformed input.
pub fn parse_type_response(json: &str) -> Result<TypeResponse> {
    Ok(serde_json::from_str(json)?)
}

/// Executes the introspection query against `url` with a default
/// [`IntrospectionClient`].
///
/// # Errors
///
/// See [`IntrospectionClient::execute`].
///
/// ```no_run
/// # use graphql_introspect::execute_introspection;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let response = execute_introspection("https://api.example.com/graphql").await?;
/// println!("Schema has {} types", response.data.schema.types.len());
/// # Ok(())
/// # }
/// ```
pub async fn execute_introspection(url: &str) -> Result<IntrospectionResponse> {
    IntrospectionClient::new().execute(url).await
}
