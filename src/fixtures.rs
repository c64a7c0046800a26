// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use serde_json::Value;

use crate::loader::Loader;
use crate::macros::{Macro, MacroRegistry};
use crate::options::{LoaderOptions, OptionsPatch};
use crate::resolver::{Resolver, ResolverRegistry};
use crate::source::DocumentSource;
use crate::FixtureError;

/// One identifier or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureRequest {
    One(String),
    Many(Vec<String>),
}

impl FixtureRequest {
    fn identifiers(&self) -> Vec<String> {
        match self {
            FixtureRequest::One(id) => vec![id.clone()],
            FixtureRequest::Many(ids) => ids.clone(),
        }
    }
}

impl From<&str> for FixtureRequest {
    fn from(id: &str) -> Self {
        FixtureRequest::One(id.to_string())
    }
}

impl From<String> for FixtureRequest {
    fn from(id: String) -> Self {
        FixtureRequest::One(id)
    }
}

impl From<Vec<String>> for FixtureRequest {
    fn from(ids: Vec<String>) -> Self {
        FixtureRequest::Many(ids)
    }
}

impl From<Vec<&str>> for FixtureRequest {
    fn from(ids: Vec<&str>) -> Self {
        FixtureRequest::Many(ids.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for FixtureRequest {
    fn from(ids: &[&str]) -> Self {
        FixtureRequest::Many(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FixtureRequest {
    fn from(ids: [&str; N]) -> Self {
        FixtureRequest::Many(ids.iter().map(|id| id.to_string()).collect())
    }
}

/// What a load returns, shaped like the request.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    One(Value),
    Many(Vec<Value>),
}

impl Loaded {
    fn shaped(request: &FixtureRequest, mut values: Vec<Value>) -> Self {
        match request {
            FixtureRequest::One(_) => Loaded::One(values.pop().unwrap_or_default()),
            FixtureRequest::Many(_) => Loaded::Many(values),
        }
    }

    /// The single value, or the first of many.
    pub fn into_value(self) -> Value {
        match self {
            Loaded::One(value) => value,
            Loaded::Many(values) => values.into_iter().next().unwrap_or_default(),
        }
    }

    pub fn into_values(self) -> Vec<Value> {
        match self {
            Loaded::One(value) => vec![value],
            Loaded::Many(values) => values,
        }
    }

    pub fn as_one(&self) -> Option<&Value> {
        match self {
            Loaded::One(value) => Some(value),
            Loaded::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[Value]> {
        match self {
            Loaded::One(_) => None,
            Loaded::Many(values) => Some(values),
        }
    }
}

/// Entry point for loading fixtures.
///
/// # Example
/// ```ignore
/// let fixtures = Fixtures::new(LoaderOptions::new().with_src_dir("test/fixture"));
/// let card = fixtures.load_sync("card.visa", Some("GB"))?.into_value();
/// let both = fixtures.load(["card", "nested/bank"], None).await?.into_values();
/// ```
pub struct Fixtures {
    loader: Loader,
}

impl Fixtures {
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            loader: Loader::new(options),
        }
    }

    pub fn with_source(options: LoaderOptions, source: Arc<dyn DocumentSource>) -> Self {
        Self {
            loader: Loader::with_source(options, source),
        }
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    pub fn options(&self) -> &LoaderOptions {
        self.loader.options()
    }

    /// Merge `patch` into the current options.
    pub fn set_options(&mut self, patch: OptionsPatch) {
        self.loader.set_options(patch);
    }

    /// Load and resolve fixtures; `profile` defaults to the configured one.
    pub async fn load(
        &self,
        request: impl Into<FixtureRequest>,
        profile: Option<&str>,
    ) -> Result<Loaded, FixtureError> {
        let request = request.into();
        let values = self.loader.load(&request.identifiers(), profile).await?;
        Ok(Loaded::shaped(&request, values))
    }

    /// Blocking counterpart of [`Fixtures::load`].
    pub fn load_sync(
        &self,
        request: impl Into<FixtureRequest>,
        profile: Option<&str>,
    ) -> Result<Loaded, FixtureError> {
        let request = request.into();
        let values = self.loader.load_sync(&request.identifiers(), profile)?;
        Ok(Loaded::shaped(&request, values))
    }

    pub fn clear_cache(&self) {
        self.loader.clear_cache();
    }

    pub fn add_resolver(&mut self, name: &str, resolver: Arc<dyn Resolver>) -> Result<(), FixtureError> {
        self.loader.add_resolver(name, resolver)
    }

    pub fn remove_resolver(&mut self, name: &str) -> Option<Arc<dyn Resolver>> {
        self.loader.remove_resolver(name)
    }

    pub fn get_resolver(&self, name: &str) -> Option<Arc<dyn Resolver>> {
        self.loader.get_resolver(name)
    }

    pub fn resolvers(&self) -> &ResolverRegistry {
        self.loader.resolvers()
    }

    pub fn add_macro(&mut self, name: &str, macro_fn: Arc<dyn Macro>) -> Result<(), FixtureError> {
        self.loader.add_macro(name, macro_fn)
    }

    pub fn remove_macro(&mut self, name: &str) -> Option<Arc<dyn Macro>> {
        self.loader.remove_macro(name)
    }

    pub fn get_macro(&self, name: &str) -> Option<Arc<dyn Macro>> {
        self.loader.get_macro(name)
    }

    pub fn macros(&self) -> &MacroRegistry {
        self.loader.macros()
    }
}
