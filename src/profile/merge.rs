use serde_json::{Map, Value};
use tracing::debug;

use super::{PROFILE_MASTER, PROPERTY_DEFAULT, profile_hierarchy};

/// Deep-merge `source` into `target`.
///
/// Mappings merge key by key and sequences merge index by index; any other
/// source value replaces what is in `target`.
pub fn deep_merge(target: &mut Value, source: &Value) {
    match (target, source) {
        (Value::Object(target_map), Value::Object(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target_items), Value::Array(source_items)) => {
            for (index, value) in source_items.iter().enumerate() {
                match target_items.get_mut(index) {
                    Some(existing) => deep_merge(existing, value),
                    None => target_items.push(value.clone()),
                }
            }
        }
        (target, source) => *target = source.clone(),
    }
}

/// Merge the `default` entry of a mapping under each of its sibling mappings.
///
/// Sibling values win on conflict. The `default` key is removed; siblings that
/// are not mappings are left as they are.
pub fn extend_default_values(object: Value) -> Value {
    let mut map = match object {
        Value::Object(map) => map,
        other => return other,
    };

    let Some(defaults) = map.shift_remove(PROPERTY_DEFAULT) else {
        return Value::Object(map);
    };

    if !defaults.is_object() {
        return Value::Object(map);
    }

    debug!(?defaults, "extending default values");

    let extended: Map<String, Value> = map
        .into_iter()
        .map(|(key, value)| {
            if value.is_object() {
                let mut merged = defaults.clone();
                deep_merge(&mut merged, &value);
                (key, merged)
            } else {
                (key, value)
            }
        })
        .collect();

    Value::Object(extended)
}

/// Produce the view of `document` for `profile`.
///
/// Documents without a `master` section only get their defaults extended.
/// An unknown profile falls back to the `master` section.
pub fn extend_object(document: Value, profile: &str) -> Value {
    let mut sections = match document {
        Value::Object(sections) => sections,
        other => return other,
    };

    if !sections.contains_key(PROFILE_MASTER) {
        return extend_default_values(Value::Object(sections));
    }

    let has_section = sections.get(profile).is_some_and(|s| !s.is_null());
    if profile != PROFILE_MASTER && !has_section {
        debug!(profile, "unknown profile, falling back to master");
        let master = sections.shift_remove(PROFILE_MASTER).unwrap_or_default();
        return extend_default_values(master);
    }

    let mut result = Value::Object(Map::new());
    for key in profile_hierarchy(profile) {
        // Keys can repeat in the hierarchy (`GB-master`); null sections are skipped
        if let Some(section) = sections.get(&key).filter(|s| !s.is_null()) {
            deep_merge(&mut result, section);
        }
    }

    extend_default_values(result)
}
