use serde_json::Value;
use tracing::debug;

use super::{ReferenceDescriptor, References, ResolverRegistry};
use crate::macros::{MacroRegistry, resolve_macros};
use crate::parser::ReferenceSpec;
use crate::FixtureError;

/// Collect resolver references from the string fields of `node` and expand
/// macros in every other string field.
///
/// A string with exactly one `:` whose head names a registered resolver is a
/// reference. A string with one `:` and an unknown head is left alone; any
/// other string has its macros expanded in place. Nested mappings and
/// sequences are not visited.
pub fn find_references_or_resolve_macros(
    node: &mut Value,
    profile: &str,
    resolvers: &ResolverRegistry,
    macros: &MacroRegistry,
) -> Result<References, FixtureError> {
    let mut refs = References::new();

    let mut visit = |field: String, value: &mut Value| -> Result<(), FixtureError> {
        let Value::String(text) = value else {
            return Ok(());
        };

        match ReferenceSpec::parse(text) {
            Some(spec) => {
                if resolvers.contains(spec.resolver) {
                    let descriptor = ReferenceDescriptor {
                        value: spec.value.to_string(),
                        profile: spec.profile.unwrap_or(profile).to_string(),
                    };
                    debug!(
                        %field,
                        resolver = spec.resolver,
                        profile = %descriptor.profile,
                        value = %descriptor.value,
                        "found reference"
                    );
                    refs.entry(spec.resolver.to_string())
                        .or_default()
                        .insert(field, descriptor);
                }
            }
            None => {
                let expanded = resolve_macros(text, macros)?;
                *text = expanded;
            }
        }

        Ok(())
    };

    match node {
        Value::Object(map) => {
            for (field, value) in map.iter_mut() {
                visit(field.clone(), value)?;
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter_mut().enumerate() {
                visit(index.to_string(), value)?;
            }
        }
        _ => {}
    }

    Ok(refs)
}
