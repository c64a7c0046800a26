use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::profile::PROFILE_MASTER;
use crate::FixtureError;

pub const DEFAULT_SRC_DIR: &str = ".";

/// Loader configuration.
///
/// Deserializes from JSON with every field optional:
/// `{"src_dir": "test/fixture", "default_profile": "GB"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Directory fixture identifiers are relative to. A leading `~/` is
    /// expanded to the home directory.
    pub src_dir: PathBuf,
    /// Profile used when a load call does not name one.
    pub default_profile: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from(DEFAULT_SRC_DIR),
            default_profile: PROFILE_MASTER.to_string(),
        }
    }
}

impl LoaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(content: &str) -> Result<Self, FixtureError> {
        serde_json::from_str(content).map_err(|e| FixtureError::Options {
            message: e.to_string(),
        })
    }

    pub fn with_src_dir(mut self, src_dir: impl Into<PathBuf>) -> Self {
        self.src_dir = src_dir.into();
        self
    }

    pub fn with_default_profile(mut self, profile: impl Into<String>) -> Self {
        self.default_profile = profile.into();
        self
    }

    /// Apply the fields set in `patch`. An empty default profile is ignored.
    pub fn merge(&mut self, patch: OptionsPatch) {
        if let Some(src_dir) = patch.src_dir {
            self.src_dir = src_dir;
        }
        if let Some(profile) = patch.default_profile.filter(|p| !p.is_empty()) {
            self.default_profile = profile;
        }
    }
}

/// A partial set of options, merged over the current ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OptionsPatch {
    pub src_dir: Option<PathBuf>,
    pub default_profile: Option<String>,
}

impl OptionsPatch {
    pub fn src_dir(src_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: Some(src_dir.into()),
            ..Self::default()
        }
    }

    pub fn default_profile(profile: impl Into<String>) -> Self {
        Self {
            default_profile: Some(profile.into()),
            ..Self::default()
        }
    }
}
