// Author: Dustin Pilgrim
// License: MIT

//! Reference resolvers.
//!
//! A string field written as `resolver[.profile]:value` is handed to the
//! resolver registered under `resolver`. Resolvers run in registration order
//! for each object, and each one sees the fields written by those before it.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;

use crate::loader::Loader;
use crate::profile::PROFILE_MASTER;
use crate::registry::Registry;
use crate::FixtureError;

mod extract;
mod get;
mod include;

pub use extract::find_references_or_resolve_macros;
pub use get::GetResolver;
pub use include::IncludeResolver;

/// One reference found in a field: the text after `:` and the profile it
/// should be resolved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDescriptor {
    pub value: String,
    pub profile: String,
}

/// Field name → reference, for a single resolver.
pub type ReferenceGroup = IndexMap<String, ReferenceDescriptor>;

/// Resolver name → its reference group.
pub type References = IndexMap<String, ReferenceGroup>;

/// The outcome for one field.
///
/// `value: None` means the target does not exist; the field is dropped.
/// `profile` asks for the nested value to be resolved under that profile
/// instead of the one inherited from its parent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedField {
    pub value: Option<Value>,
    pub profile: Option<String>,
}

impl ResolvedField {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}

impl From<Value> for ResolvedField {
    fn from(value: Value) -> Self {
        Self {
            value: Some(value),
            profile: None,
        }
    }
}

impl From<Option<Value>> for ResolvedField {
    fn from(value: Option<Value>) -> Self {
        Self {
            value,
            profile: None,
        }
    }
}

/// Field name → resolved outcome.
pub type ResolvedFields = IndexMap<String, ResolvedField>;

/// References sharing an effective profile, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileGroup {
    pub fields: Vec<String>,
    pub values: Vec<String>,
}

/// Regroup a resolver's references by effective profile.
pub fn group_by_profile(refs: &ReferenceGroup) -> IndexMap<String, ProfileGroup> {
    let mut groups: IndexMap<String, ProfileGroup> = IndexMap::new();
    for (field, descriptor) in refs {
        let group = groups.entry(descriptor.profile.clone()).or_default();
        group.fields.push(field.clone());
        group.values.push(descriptor.value.clone());
    }
    groups
}

pub(crate) fn is_master(profile: &str) -> bool {
    profile.is_empty() || profile == PROFILE_MASTER
}

/// What a resolver gets to work with: the root object being resolved, the
/// identifier it was loaded from, and the ability to load other fixtures.
pub struct ResolutionContext<'a> {
    root: &'a Value,
    filename: &'a str,
    loader: &'a Loader,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(root: &'a Value, filename: &'a str, loader: &'a Loader) -> Self {
        Self {
            root,
            filename,
            loader,
        }
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Load fixtures under `profile` without resolving their references.
    pub async fn load_objects(
        &self,
        names: &[String],
        profile: &str,
    ) -> Result<Vec<Option<Value>>, FixtureError> {
        self.loader.load_objects(names, profile).await
    }

    pub fn load_objects_sync(
        &self,
        names: &[String],
        profile: &str,
    ) -> Result<Vec<Option<Value>>, FixtureError> {
        self.loader.load_objects_sync(names, profile)
    }
}

/// A named handler for one kind of reference.
///
/// Both calling conventions must produce the same fields. Resolvers that never
/// wait on anything only implement [`Resolver::resolve_sync`].
#[async_trait]
pub trait Resolver: Send + Sync {
    fn resolve_sync(
        &self,
        refs: &ReferenceGroup,
        ctx: &ResolutionContext<'_>,
    ) -> Result<ResolvedFields, FixtureError>;

    async fn resolve(
        &self,
        refs: &ReferenceGroup,
        ctx: &ResolutionContext<'_>,
    ) -> Result<ResolvedFields, FixtureError> {
        self.resolve_sync(refs, ctx)
    }
}

/// A resolver backed by a plain function, used for both calling conventions.
pub struct FnResolver<F> {
    func: F,
}

impl<F> FnResolver<F>
where
    F: Fn(&ReferenceGroup, &ResolutionContext<'_>) -> Result<ResolvedFields, FixtureError>
        + Send
        + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> Resolver for FnResolver<F>
where
    F: Fn(&ReferenceGroup, &ResolutionContext<'_>) -> Result<ResolvedFields, FixtureError>
        + Send
        + Sync,
{
    fn resolve_sync(
        &self,
        refs: &ReferenceGroup,
        ctx: &ResolutionContext<'_>,
    ) -> Result<ResolvedFields, FixtureError> {
        (self.func)(refs, ctx)
    }
}

pub type ResolverRegistry = Registry<dyn Resolver>;

/// Registry holding `include` then `get`.
pub fn builtin_resolvers() -> ResolverRegistry {
    let mut registry = ResolverRegistry::new("Resolver");
    registry.insert_builtin("include", Arc::new(IncludeResolver));
    registry.insert_builtin("get", Arc::new(GetResolver));
    registry
}

#[cfg(test)]
mod tests;
