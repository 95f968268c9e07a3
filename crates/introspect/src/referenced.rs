//! Collects the named types referenced by fields across a schema.

use crate::{IntrospectionSchema, TypeRef};
use std::collections::BTreeMap;

/// Returns every type referenced by a field or input field, keyed by name.
///
/// Only one level of wrapping is looked through: for `NON_NULL(User)` the
/// entry is `User → User`. When the wrapped reference has no name but the
/// outer one does, the outer name is used as the key for the wrapped
/// reference. A later reference to the same name replaces the earlier entry.
#[must_use]
#[tracing::instrument(skip(schema), fields(types = schema.types.len()))]
pub fn referenced_types(schema: &IntrospectionSchema) -> BTreeMap<String, TypeRef> {
    let mut referenced = BTreeMap::new();

    let mut record = |type_ref: &TypeRef| match type_ref.of_type() {
        Some(inner) => {
            if let Some(name) = inner.name() {
                referenced.insert(name.to_string(), inner.clone());
            } else if let Some(name) = type_ref.name() {
                referenced.insert(name.to_string(), inner.clone());
            }
        }
        None => {
            if let Some(name) = type_ref.name() {
                referenced.insert(name.to_string(), type_ref.clone());
            }
        }
    };

    for type_def in &schema.types {
        for field in type_def.fields() {
            record(&field.type_ref);
        }
        for field in type_def.input_fields() {
            record(&field.type_ref);
        }
    }

    tracing::debug!(referenced = referenced.len(), "Collected referenced types");
    referenced
}
