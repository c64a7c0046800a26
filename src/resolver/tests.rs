#[cfg(test)]
use super::*;
use serde_json::json;

use crate::macros::builtin_macros;
use crate::options::LoaderOptions;
use crate::source::MemorySource;

fn descriptor(value: &str, profile: &str) -> ReferenceDescriptor {
    ReferenceDescriptor {
        value: value.to_string(),
        profile: profile.to_string(),
    }
}

fn payload_loader() -> Loader {
    let source = MemorySource::new().with(
        "payload",
        r#"{"master": {"language": "en"}, "GB": {"language": "en-GB"}}"#,
    );
    Loader::with_source(LoaderOptions::default(), Arc::new(source))
}

#[test]
fn test_extract_references_and_macros() {
    let mut node = json!({
        "a": "get:x",
        "b": "include.GB:card",
        "c": "unknown:x",
        "d": "{random-numeric-3}",
        "e": {"f": "get:y"},
        "g": 5,
        "h": "12:30:00"
    });

    let refs = find_references_or_resolve_macros(&mut node, "US", &builtin_resolvers(), &builtin_macros())
        .unwrap();

    assert_eq!(refs.len(), 2);
    assert_eq!(refs["get"]["a"], descriptor("x", "US"));
    assert_eq!(refs["include"]["b"], descriptor("card", "GB"));
    assert!(!refs["get"].contains_key("f"));

    assert_eq!(node["c"], "unknown:x");
    assert_eq!(node["h"], "12:30:00");
    assert_eq!(node["e"], json!({"f": "get:y"}));
    let d = node["d"].as_str().unwrap();
    assert!(d.len() == 3 && d.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_extract_from_sequence_uses_indices() {
    let mut node = json!(["plain", "get:a.b", {"x": "get:c"}, "include.dev-GB:card"]);

    let refs = find_references_or_resolve_macros(&mut node, "master", &builtin_resolvers(), &builtin_macros())
        .unwrap();

    assert_eq!(refs["get"].keys().collect::<Vec<_>>(), vec!["1"]);
    assert_eq!(refs["include"]["3"], descriptor("card", "dev-GB"));
}

#[test]
fn test_only_first_profile_segment_is_used() {
    let mut node = json!({"a": "get.GB.extra:x"});

    let refs = find_references_or_resolve_macros(&mut node, "master", &builtin_resolvers(), &builtin_macros())
        .unwrap();

    assert_eq!(refs["get"]["a"], descriptor("x", "GB"));
}

#[test]
fn test_group_by_profile() {
    let mut refs = ReferenceGroup::new();
    refs.insert("a".into(), descriptor("card", "master"));
    refs.insert("b".into(), descriptor("card.visa", "GB"));
    refs.insert("c".into(), descriptor("payload", "master"));

    let groups = group_by_profile(&refs);

    assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["master", "GB"]);
    assert_eq!(groups["master"].fields, vec!["a", "c"]);
    assert_eq!(groups["master"].values, vec!["card", "payload"]);
    assert_eq!(groups["GB"].fields, vec!["b"]);
}

#[test]
fn test_builtin_order() {
    assert_eq!(builtin_resolvers().names(), vec!["include", "get"]);
    assert!(is_master("master"));
    assert!(is_master(""));
    assert!(!is_master("GB"));
}

#[test]
fn test_get_resolver_on_live_root() {
    let loader = payload_loader();
    let root = json!({"address": {"line_1": "Big Data Inc"}, "cards": [{"n": "1"}]});
    let ctx = ResolutionContext::new(&root, "whatever", &loader);

    let mut refs = ReferenceGroup::new();
    refs.insert("line".into(), descriptor("address.line_1", "master"));
    refs.insert("first".into(), descriptor("cards.0.n", "master"));
    refs.insert("nope".into(), descriptor("address.line_2", "master"));

    let fields = GetResolver.resolve_sync(&refs, &ctx).unwrap();

    assert_eq!(fields["line"], ResolvedField::from(json!("Big Data Inc")));
    assert_eq!(fields["first"], ResolvedField::from(json!("1")));
    assert_eq!(fields["nope"], ResolvedField::missing());
}

#[test]
fn test_include_resolver_tags_structured_values() {
    let loader = payload_loader();
    let root = json!({});
    let ctx = ResolutionContext::new(&root, "card", &loader);

    let mut refs = ReferenceGroup::new();
    refs.insert("whole".into(), descriptor("payload", "GB"));
    refs.insert("lang".into(), descriptor("payload.language", "master"));
    refs.insert("none".into(), descriptor("payload.region", "master"));

    let fields = IncludeResolver.resolve_sync(&refs, &ctx).unwrap();

    assert_eq!(
        fields["whole"],
        ResolvedField::from(json!({"language": "en-GB"})).with_profile("GB")
    );
    assert_eq!(fields["lang"], ResolvedField::from(json!("en")));
    assert_eq!(fields["none"], ResolvedField::missing());
}

#[test]
fn test_include_missing_fixture_fails() {
    let loader = payload_loader();
    let root = json!({});
    let ctx = ResolutionContext::new(&root, "card", &loader);

    let mut refs = ReferenceGroup::new();
    refs.insert("ghost".into(), descriptor("ghost", "master"));

    assert!(IncludeResolver.resolve_sync(&refs, &ctx).unwrap_err().is_not_found());
}

#[test]
fn test_fn_resolver_async_defaults_to_sync() {
    let loader = payload_loader();
    let root = json!({"name": "root"});
    let ctx = ResolutionContext::new(&root, "file", &loader);

    let resolver = FnResolver::new(|refs: &ReferenceGroup, ctx: &ResolutionContext<'_>| {
        Ok(refs
            .keys()
            .map(|field| (field.clone(), ResolvedField::from(json!(ctx.filename()))))
            .collect())
    });

    let mut refs = ReferenceGroup::new();
    refs.insert("src".into(), descriptor("anything", "master"));

    let sync = resolver.resolve_sync(&refs, &ctx).unwrap();
    let not_sync = futures::executor::block_on(resolver.resolve(&refs, &ctx)).unwrap();
    assert_eq!(sync, not_sync);
    assert_eq!(sync["src"], ResolvedField::from(json!("file")));
}

#[tokio::test]
async fn test_get_resolver_async_with_profile() {
    let loader = payload_loader();
    let root = json!({"language": "live"});
    let ctx = ResolutionContext::new(&root, "payload", &loader);

    let mut refs = ReferenceGroup::new();
    refs.insert("live".into(), descriptor("language", "master"));
    refs.insert("gb".into(), descriptor("language", "GB"));

    let fields = GetResolver.resolve(&refs, &ctx).await.unwrap();
    assert_eq!(fields["live"], ResolvedField::from(json!("live")));
    assert_eq!(fields["gb"], ResolvedField::from(json!("en-GB")));
    assert_eq!(fields, GetResolver.resolve_sync(&refs, &ctx).unwrap());
}
