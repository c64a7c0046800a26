//! Inline placeholder macros.
//!
//! A macro token looks like `{name-arg1-arg2}` and may appear anywhere inside
//! a string value that is not a resolver reference. Tokens naming an unknown
//! macro are left as they are.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use crate::registry::Registry;
use crate::FixtureError;

mod random;

pub use random::random;

pub const MACRO_SEPARATOR: char = '-';

static MACRO_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([\w-]+)\}").expect("valid macro pattern"));

/// A function turning positional string arguments into replacement text.
pub trait Macro: Send + Sync {
    fn expand(&self, args: &[&str]) -> Result<String, FixtureError>;
}

impl<F> Macro for F
where
    F: Fn(&[&str]) -> Result<String, FixtureError> + Send + Sync,
{
    fn expand(&self, args: &[&str]) -> Result<String, FixtureError> {
        self(args)
    }
}

pub type MacroRegistry = Registry<dyn Macro>;

/// Registry holding the built-in macros.
pub fn builtin_macros() -> MacroRegistry {
    let mut registry = MacroRegistry::new("Macro");
    registry.insert_builtin("random", Arc::new(random));
    registry
}

/// Replace every known macro token in `value`.
pub fn resolve_macros(value: &str, macros: &MacroRegistry) -> Result<String, FixtureError> {
    if !value.contains('{') {
        return Ok(value.to_string());
    }

    let mut failure = None;
    let resolved = MACRO_TOKEN.replace_all(value, |caps: &Captures| {
        let token = &caps[0];
        let mut parts = caps[1].split(MACRO_SEPARATOR);
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let Some(macro_fn) = macros.get(name) else {
            return token.to_string();
        };

        debug!(name, ?args, "expanding macro");
        match macro_fn.expand(&args) {
            Ok(text) => text,
            Err(e) => {
                failure.get_or_insert(e);
                token.to_string()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(resolved.into_owned()),
    }
}
