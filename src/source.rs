//! Where raw fixture text comes from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::FixtureError;

pub const FIXTURE_EXTENSION: &str = "json";

/// Supplies raw fixture text for a base name, blocking or not.
///
/// A missing fixture must surface as [`FixtureError::NotFound`].
#[async_trait]
pub trait DocumentSource: Send + Sync {
    fn read_sync(&self, name: &str) -> Result<String, FixtureError>;

    async fn read(&self, name: &str) -> Result<String, FixtureError>;
}

/// Reads `<src_dir>/<name>.json` from disk.
#[derive(Debug, Clone)]
pub struct FsSource {
    src_dir: PathBuf,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(src_dir: P) -> Self {
        Self {
            src_dir: expand_home(src_dir.as_ref()),
        }
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.src_dir.join(format!("{}.{}", name, FIXTURE_EXTENSION))
    }
}

#[async_trait]
impl DocumentSource for FsSource {
    fn read_sync(&self, name: &str) -> Result<String, FixtureError> {
        let path = self.path_for(name);
        debug!(path = %path.display(), "reading fixture");
        std::fs::read_to_string(&path).map_err(|e| FixtureError::from_io(path, e))
    }

    async fn read(&self, name: &str) -> Result<String, FixtureError> {
        let path = self.path_for(name);
        debug!(path = %path.display(), "reading fixture");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FixtureError::from_io(path, e))
    }
}

/// Expand a leading "~/" to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Fixture text held in memory, counting every read it serves.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: Mutex<HashMap<String, String>>,
    reads: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&self, name: impl Into<String>, content: impl Into<String>) {
        self.lock().insert(name.into(), content.into());
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map still holds valid fixture text.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of reads served so far, failed ones included.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn lookup(&self, name: &str) -> Result<String, FixtureError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        self.lock().get(name).cloned().ok_or_else(|| FixtureError::NotFound {
            path: PathBuf::from(format!("{}.{}", name, FIXTURE_EXTENSION)),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such fixture"),
        })
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    fn read_sync(&self, name: &str) -> Result<String, FixtureError> {
        self.lookup(name)
    }

    async fn read(&self, name: &str) -> Result<String, FixtureError> {
        self.lookup(name)
    }
}
