//! Profile hierarchies and layered profile merging.
//!
//! A fixture document may carry a `master` section plus one section per
//! profile key (`GB`, `en`, `GB-en`, ...). Loading under a profile merges the
//! sections named by the profile's hierarchy in order, later sections winning.

use tracing::debug;

mod merge;

pub use merge::{deep_merge, extend_default_values, extend_object};

pub const PROFILE_MASTER: &str = "master";
pub const PROFILE_SEPARATOR: char = '-';
pub const PROPERTY_DEFAULT: &str = "default";

/// Expand a profile key into its ordered hierarchy.
///
/// Unique segments come first in order of appearance, then every prefix of two
/// or more segments, with `master` always at the front:
/// `GB-en-dev` => `[master, GB, en, dev, GB-en, GB-en-dev]`.
pub fn profile_hierarchy(profile: &str) -> Vec<String> {
    if profile.is_empty() {
        return vec![PROFILE_MASTER.to_string()];
    }

    let parts: Vec<&str> = profile.split(PROFILE_SEPARATOR).collect();
    let mut hierarchy: Vec<String> = Vec::with_capacity(parts.len() * 2 + 1);

    for part in &parts {
        if !hierarchy.iter().any(|p| p == part) {
            hierarchy.push(part.to_string());
        }
    }

    let mut key = String::new();
    for (index, part) in parts.iter().enumerate() {
        if index > 0 {
            key.push(PROFILE_SEPARATOR);
        }
        key.push_str(part);

        if index > 0 {
            hierarchy.push(key.clone());
        }
    }

    if hierarchy.first().map(String::as_str) != Some(PROFILE_MASTER) {
        hierarchy.insert(0, PROFILE_MASTER.to_string());
    }

    debug!(profile, ?hierarchy, "expanded profile hierarchy");
    hierarchy
}

#[cfg(test)]
mod tests;
