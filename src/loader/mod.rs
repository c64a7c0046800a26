// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;
use tracing::debug;

use crate::cache::DocumentCache;
use crate::macros::{Macro, MacroRegistry, builtin_macros};
use crate::options::{LoaderOptions, OptionsPatch};
use crate::resolver::{Resolver, ResolverRegistry, builtin_resolvers};
use crate::source::{DocumentSource, FsSource};
use crate::FixtureError;

mod objects;
mod walk;

/// Loads fixture documents and resolves them for a profile.
///
/// Holds the options, the resolver and macro registries, the parsed document
/// cache and the source documents are read from.
pub struct Loader {
    options: LoaderOptions,
    source: Arc<dyn DocumentSource>,
    custom_source: bool,
    cache: DocumentCache,
    resolvers: ResolverRegistry,
    macros: MacroRegistry,
}

impl Loader {
    /// A loader reading `<src_dir>/<name>.json` from disk.
    pub fn new(options: LoaderOptions) -> Self {
        let source = Arc::new(FsSource::new(&options.src_dir));
        Self::build(options, source, false)
    }

    /// A loader reading from any [`DocumentSource`]; `src_dir` is then unused.
    pub fn with_source(options: LoaderOptions, source: Arc<dyn DocumentSource>) -> Self {
        Self::build(options, source, true)
    }

    fn build(options: LoaderOptions, source: Arc<dyn DocumentSource>, custom_source: bool) -> Self {
        Self {
            options,
            source,
            custom_source,
            cache: DocumentCache::new(),
            resolvers: builtin_resolvers(),
            macros: builtin_macros(),
        }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    pub fn set_options(&mut self, patch: OptionsPatch) {
        let src_dir_changed = patch
            .src_dir
            .as_ref()
            .is_some_and(|dir| *dir != self.options.src_dir);

        self.options.merge(patch);

        if src_dir_changed && !self.custom_source {
            self.source = Arc::new(FsSource::new(&self.options.src_dir));
        }
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    // -- Resolvers --

    pub fn add_resolver(&mut self, name: &str, resolver: Arc<dyn Resolver>) -> Result<(), FixtureError> {
        self.resolvers.add(name, resolver)
    }

    pub fn remove_resolver(&mut self, name: &str) -> Option<Arc<dyn Resolver>> {
        self.resolvers.remove(name)
    }

    pub fn get_resolver(&self, name: &str) -> Option<Arc<dyn Resolver>> {
        self.resolvers.get(name).cloned()
    }

    pub fn resolvers(&self) -> &ResolverRegistry {
        &self.resolvers
    }

    // -- Macros --

    pub fn add_macro(&mut self, name: &str, macro_fn: Arc<dyn Macro>) -> Result<(), FixtureError> {
        self.macros.add(name, macro_fn)
    }

    pub fn remove_macro(&mut self, name: &str) -> Option<Arc<dyn Macro>> {
        self.macros.remove(name)
    }

    pub fn get_macro(&self, name: &str) -> Option<Arc<dyn Macro>> {
        self.macros.get(name).cloned()
    }

    pub fn macros(&self) -> &MacroRegistry {
        &self.macros
    }

    // -- Loading --

    fn effective_profile(&self, profile: Option<&str>) -> String {
        profile
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.options.default_profile)
            .to_string()
    }

    fn check_identifiers(identifiers: &[String]) -> Result<(), FixtureError> {
        if identifiers.is_empty() || identifiers.iter().any(|id| id.is_empty()) {
            return Err(FixtureError::MissingIdentifier);
        }
        Ok(())
    }

    /// Load and fully resolve each identifier, blocking on every read.
    ///
    /// Identifiers whose property path does not exist yield `null`.
    pub fn load_sync(&self, identifiers: &[String], profile: Option<&str>) -> Result<Vec<Value>, FixtureError> {
        Self::check_identifiers(identifiers)?;
        let profile = self.effective_profile(profile);
        debug!(?identifiers, %profile, "load_sync");

        let mut objects = self.load_objects_sync(identifiers, &profile)?;
        for (object, filename) in objects.iter_mut().zip(identifiers) {
            if let Some(root) = object {
                self.resolve_values_sync(root, filename, &profile)?;
            }
        }

        Ok(objects.into_iter().map(Option::unwrap_or_default).collect())
    }

    /// Load and fully resolve each identifier.
    ///
    /// The identifiers are resolved concurrently with each other; the first
    /// failure fails the whole call.
    pub async fn load(&self, identifiers: &[String], profile: Option<&str>) -> Result<Vec<Value>, FixtureError> {
        Self::check_identifiers(identifiers)?;
        let profile = self.effective_profile(profile);
        debug!(?identifiers, %profile, "load");

        let mut objects = self.load_objects(identifiers, &profile).await?;
        let profile = profile.as_str();
        try_join_all(objects.iter_mut().zip(identifiers).map(|(object, filename)| async move {
            match object {
                Some(root) => self.resolve_values(root, filename, profile).await,
                None => Ok(()),
            }
        }))
        .await?;

        Ok(objects.into_iter().map(Option::unwrap_or_default).collect())
    }
}
