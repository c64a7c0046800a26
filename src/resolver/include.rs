use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::debug;

use super::{
    ProfileGroup, ReferenceGroup, ResolutionContext, ResolvedField, ResolvedFields, Resolver,
    group_by_profile,
};
use crate::node::NodeKind;
use crate::FixtureError;

/// `include:name[.property]` and `include.PROFILE:name[.property]` load another
/// fixture under the reference's profile.
///
/// Structured results carry that profile so their own references resolve
/// under it too.
pub struct IncludeResolver;

fn tag_with_profile(
    group: &ProfileGroup,
    profile: &str,
    objects: Vec<Option<Value>>,
) -> ResolvedFields {
    group
        .fields
        .iter()
        .zip(objects)
        .map(|(field, value)| {
            let structured = value
                .as_ref()
                .is_some_and(|v| NodeKind::of(v).is_structured());
            debug!(%field, profile, found = value.is_some(), "include");

            let resolved = ResolvedField::from(value);
            let resolved = if structured {
                resolved.with_profile(profile)
            } else {
                resolved
            };
            (field.clone(), resolved)
        })
        .collect()
}

#[async_trait]
impl Resolver for IncludeResolver {
    fn resolve_sync(
        &self,
        refs: &ReferenceGroup,
        ctx: &ResolutionContext<'_>,
    ) -> Result<ResolvedFields, FixtureError> {
        let mut result = ResolvedFields::new();

        for (profile, group) in group_by_profile(refs) {
            let objects = ctx.load_objects_sync(&group.values, &profile)?;
            result.extend(tag_with_profile(&group, &profile, objects));
        }

        Ok(result)
    }

    async fn resolve(
        &self,
        refs: &ReferenceGroup,
        ctx: &ResolutionContext<'_>,
    ) -> Result<ResolvedFields, FixtureError> {
        let groups = group_by_profile(refs);

        let loads = groups.iter().map(|(profile, group)| async move {
            let objects = ctx.load_objects(&group.values, profile).await?;
            Ok::<_, FixtureError>(tag_with_profile(group, profile, objects))
        });

        let mut result = ResolvedFields::new();
        for fields in try_join_all(loads).await? {
            result.extend(fields);
        }

        Ok(result)
    }
}
