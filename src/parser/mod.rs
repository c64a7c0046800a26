//! Parsing of fixture sources, identifiers and reference values.

use serde_json::Value;
use tracing::debug;

use crate::lexer::strip_comments;
use crate::FixtureError;

mod identifier;
mod reference;

pub use identifier::FixtureId;
pub use reference::{REFERENCE_SEPARATOR, ReferenceSpec};

/// Parse fixture source text: JSON with `//` and `/* */` comments.
pub fn parse_document(filename: &str, content: &str) -> Result<Value, FixtureError> {
    let stripped = strip_comments(content);

    serde_json::from_str(&stripped).map_err(|e| {
        debug!(filename, error = %e, "failed to parse fixture");
        FixtureError::Parse {
            filename: filename.to_string(),
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
            content: content.to_string(),
        }
    })
}
