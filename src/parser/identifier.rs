use std::fmt;

/// A fixture identifier split into its base name and optional property path.
///
/// `card.visa` names the `visa` property of the `card` fixture. The first `.`
/// after the first character starts the property path, so `nested/bank.name`
/// is `nested/bank` + `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureId {
    pub base: String,
    pub property: Option<String>,
}

impl FixtureId {
    pub fn parse(identifier: &str) -> Self {
        let split_at = identifier
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '.')
            .map(|(i, _)| i);

        match split_at {
            Some(i) => {
                let property = &identifier[i + 1..];
                Self {
                    base: identifier[..i].to_string(),
                    property: (!property.is_empty()).then(|| property.to_string()),
                }
            }
            None => Self {
                base: identifier.to_string(),
                property: None,
            },
        }
    }
}

impl fmt::Display for FixtureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{}.{}", self.base, property),
            None => write!(f, "{}", self.base),
        }
    }
}
