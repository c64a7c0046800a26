use futures::future::try_join_all;
use serde_json::Value;
use tracing::debug;

use super::Loader;
use crate::node::lookup_path;
use crate::parser::{FixtureId, parse_document};
use crate::profile::extend_object;
use crate::FixtureError;

/// Shape a raw document into what an identifier asks for.
fn select(document: Value, id: &FixtureId, profile: &str) -> Option<Value> {
    let object = extend_object(document, profile);

    match &id.property {
        Some(property) => {
            debug!(identifier = %id, %property, "selecting fixture property");
            lookup_path(&object, property).cloned()
        }
        None => Some(object),
    }
}

impl Loader {
    /// Load fixtures for `profile` without resolving their references.
    ///
    /// Each entry is `None` when the identifier's property path does not exist.
    pub fn load_objects_sync(
        &self,
        names: &[String],
        profile: &str,
    ) -> Result<Vec<Option<Value>>, FixtureError> {
        debug!(?names, profile, "load_objects_sync");

        names
            .iter()
            .map(|name| {
                let id = FixtureId::parse(name);
                let document = self.read_document_sync(&id.base)?;
                Ok(select(document, &id, profile))
            })
            .collect()
    }

    /// Load fixtures for `profile` without resolving their references.
    ///
    /// All documents are read concurrently.
    pub async fn load_objects(
        &self,
        names: &[String],
        profile: &str,
    ) -> Result<Vec<Option<Value>>, FixtureError> {
        debug!(?names, profile, "load_objects");

        let ids: Vec<FixtureId> = names.iter().map(|name| FixtureId::parse(name)).collect();
        let documents = try_join_all(ids.iter().map(|id| self.read_document(&id.base))).await?;

        Ok(documents
            .into_iter()
            .zip(&ids)
            .map(|(document, id)| select(document, id, profile))
            .collect())
    }

    fn read_document_sync(&self, name: &str) -> Result<Value, FixtureError> {
        if let Some(document) = self.cache.get(name) {
            return Ok(document);
        }

        let content = self.source.read_sync(name)?;
        self.store(name, &content)
    }

    async fn read_document(&self, name: &str) -> Result<Value, FixtureError> {
        if let Some(document) = self.cache.get(name) {
            return Ok(document);
        }

        let content = self.source.read(name).await?;
        self.store(name, &content)
    }

    fn store(&self, name: &str, content: &str) -> Result<Value, FixtureError> {
        let document = parse_document(name, content)?;
        self.cache.insert(name, &document);
        debug!(name, "parsed fixture and cached it");
        Ok(document)
    }
}
