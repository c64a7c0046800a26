use std::collections::HashMap;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::debug;

use super::Loader;
use crate::node::{NodeKind, PathSegment, node_mut};
use crate::resolver::{
    References, ResolutionContext, ResolvedFields, find_references_or_resolve_macros,
};
use crate::FixtureError;

/// Profiles requested by resolvers for individual fields.
type ProfileOverrides = HashMap<String, String>;

/// Write resolved fields onto `node`, remembering any per-field profile.
fn assign_resolved(node: &mut Value, fields: ResolvedFields, overrides: &mut ProfileOverrides) {
    for (field, resolved) in fields {
        match resolved.profile {
            Some(profile) => {
                overrides.insert(field.clone(), profile);
            }
            None => {
                overrides.remove(&field);
            }
        }

        match node {
            Value::Object(map) => match resolved.value {
                Some(value) => {
                    map.insert(field, value);
                }
                None => {
                    map.shift_remove(&field);
                }
            },
            Value::Array(items) => {
                if let Some(slot) = field.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
                    *slot = resolved.value.unwrap_or_default();
                }
            }
            _ => {}
        }
    }
}

/// Fields of `node` holding mappings or sequences, in order.
fn structured_children(node: &Value) -> Vec<(PathSegment, String)> {
    let fields: Vec<String> = match node {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| NodeKind::of(v).is_structured())
            .map(|(k, _)| k.clone())
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, v)| NodeKind::of(v).is_structured())
            .map(|(i, _)| i.to_string())
            .collect(),
        _ => Vec::new(),
    };

    let kind = NodeKind::of(node);
    fields
        .into_iter()
        .filter_map(|field| PathSegment::for_field(kind, &field).map(|segment| (segment, field)))
        .collect()
}

impl Loader {
    /// Extract references from the node at `path` and expand its macros.
    ///
    /// Returns `None` when there is no structured node there.
    fn prepare_node(
        &self,
        root: &mut Value,
        path: &[PathSegment],
        profile: &str,
    ) -> Result<Option<References>, FixtureError> {
        match node_mut(root, path) {
            Some(node) if NodeKind::of(node).is_structured() => {
                find_references_or_resolve_macros(node, profile, &self.resolvers, &self.macros)
                    .map(Some)
            }
            _ => Ok(None),
        }
    }

    fn apply(
        root: &mut Value,
        path: &[PathSegment],
        fields: ResolvedFields,
        overrides: &mut ProfileOverrides,
    ) {
        if let Some(node) = node_mut(root, path) {
            assign_resolved(node, fields, overrides);
        }
    }

    fn children(root: &mut Value, path: &[PathSegment]) -> Vec<(PathSegment, String)> {
        node_mut(root, path)
            .map(|node| structured_children(node))
            .unwrap_or_default()
    }

    pub(super) fn resolve_values_sync(
        &self,
        root: &mut Value,
        filename: &str,
        profile: &str,
    ) -> Result<(), FixtureError> {
        self.resolve_node_sync(root, &mut Vec::new(), filename, profile)
    }

    fn resolve_node_sync(
        &self,
        root: &mut Value,
        path: &mut Vec<PathSegment>,
        filename: &str,
        profile: &str,
    ) -> Result<(), FixtureError> {
        let Some(refs) = self.prepare_node(root, path, profile)? else {
            return Ok(());
        };

        let mut overrides = ProfileOverrides::new();
        for (name, resolver) in self.resolvers.iter() {
            let Some(group) = refs.get(name) else {
                continue;
            };

            let fields = {
                let ctx = ResolutionContext::new(root, filename, self);
                resolver.resolve_sync(group, &ctx)?
            };
            debug!(resolver = name, ?path, ?fields, "resolved fields");
            Self::apply(root, path, fields, &mut overrides);
        }

        for (segment, field) in Self::children(root, path) {
            let child_profile = overrides.get(&field).map(String::as_str).unwrap_or(profile);
            path.push(segment);
            self.resolve_node_sync(root, path, filename, child_profile)?;
            path.pop();
        }

        Ok(())
    }

    pub(super) async fn resolve_values(
        &self,
        root: &mut Value,
        filename: &str,
        profile: &str,
    ) -> Result<(), FixtureError> {
        self.resolve_node(root, Vec::new(), filename, profile.to_string())
            .await
    }

    /// Same procedure as [`Loader::resolve_node_sync`], awaiting each resolver
    /// before the next one starts.
    fn resolve_node<'a>(
        &'a self,
        root: &'a mut Value,
        path: Vec<PathSegment>,
        filename: &'a str,
        profile: String,
    ) -> BoxFuture<'a, Result<(), FixtureError>> {
        async move {
            let Some(refs) = self.prepare_node(root, &path, &profile)? else {
                return Ok(());
            };

            let mut overrides = ProfileOverrides::new();
            for (name, resolver) in self.resolvers.iter() {
                let Some(group) = refs.get(name) else {
                    continue;
                };

                let fields = {
                    let ctx = ResolutionContext::new(root, filename, self);
                    resolver.resolve(group, &ctx).await?
                };
                debug!(resolver = name, ?path, ?fields, "resolved fields");
                Self::apply(root, &path, fields, &mut overrides);
            }

            for (segment, field) in Self::children(root, &path) {
                let child_profile = overrides.get(&field).cloned().unwrap_or_else(|| profile.clone());
                let mut child_path = path.clone();
                child_path.push(segment);
                self.resolve_node(&mut *root, child_path, filename, child_profile)
                    .await?;
            }

            Ok(())
        }
        .boxed()
    }
}
