// Author: Dustin Pilgrim
// License: MIT

pub const REFERENCE_SEPARATOR: char = ':';
const PROFILE_OVERRIDE_SEPARATOR: char = '.';

/// A string value of the form `resolver[.profile]:value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSpec<'a> {
    pub resolver: &'a str,
    pub profile: Option<&'a str>,
    pub value: &'a str,
}

impl<'a> ReferenceSpec<'a> {
    /// Split a string holding exactly one `:` into its reference parts.
    ///
    /// Whether `resolver` names a registered resolver is up to the caller.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut parts = raw.split(REFERENCE_SEPARATOR);
        let (head, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(head), Some(value), None) => (head, value),
            _ => return None,
        };

        // Only the segment right after the first '.' is the profile override
        let mut name_parts = head.split(PROFILE_OVERRIDE_SEPARATOR);
        let resolver = name_parts.next().unwrap_or(head);
        let profile = name_parts.next();

        Some(Self {
            resolver,
            profile,
            value,
        })
    }
}
