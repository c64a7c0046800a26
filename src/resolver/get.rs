use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::debug;

use super::{
    ProfileGroup, ReferenceGroup, ResolutionContext, ResolvedField, ResolvedFields, Resolver,
    group_by_profile, is_master,
};
use crate::node::lookup_path;
use crate::FixtureError;

/// `get:path` resolves to a property of the object being resolved.
///
/// Under `master` the path is looked up in the live root object. Under any
/// other profile the same fixture is loaded again for that profile and the
/// path is looked up there. Paths that do not exist resolve to nothing.
pub struct GetResolver;

fn lookup_all(group: &ProfileGroup, object: Option<&Value>) -> ResolvedFields {
    group
        .fields
        .iter()
        .zip(&group.values)
        .map(|(field, path)| {
            let resolved = object.and_then(|o| lookup_path(o, path)).cloned();
            debug!(%field, %path, found = resolved.is_some(), "get");
            (field.clone(), ResolvedField::from(resolved))
        })
        .collect()
}

#[async_trait]
impl Resolver for GetResolver {
    fn resolve_sync(
        &self,
        refs: &ReferenceGroup,
        ctx: &ResolutionContext<'_>,
    ) -> Result<ResolvedFields, FixtureError> {
        let mut result = ResolvedFields::new();

        for (profile, group) in group_by_profile(refs) {
            if is_master(&profile) {
                result.extend(lookup_all(&group, Some(ctx.root())));
            } else {
                let objects = ctx.load_objects_sync(&[ctx.filename().to_string()], &profile)?;
                result.extend(lookup_all(&group, objects.first().and_then(Option::as_ref)));
            }
        }

        Ok(result)
    }

    async fn resolve(
        &self,
        refs: &ReferenceGroup,
        ctx: &ResolutionContext<'_>,
    ) -> Result<ResolvedFields, FixtureError> {
        let groups = group_by_profile(refs);
        let mut result = ResolvedFields::new();
        let mut pending = Vec::new();

        for (profile, group) in &groups {
            if is_master(profile) {
                result.extend(lookup_all(group, Some(ctx.root())));
            } else {
                pending.push(async move {
                    let names = [ctx.filename().to_string()];
                    let objects = ctx.load_objects(&names, profile).await?;
                    Ok::<_, FixtureError>(lookup_all(group, objects.first().and_then(Option::as_ref)))
                });
            }
        }

        for fields in try_join_all(pending).await? {
            result.extend(fields);
        }

        Ok(result)
    }
}
