//! Lookup settings.
//!
//! Settings live in a small YAML file:
//!
//! ```yaml
//! tolerate-miscased-keys: true
//! ```
//!
//! Missing keys take their defaults and an empty file is valid. Settings are
//! read once at startup and turned into a [`MatchPolicy`] for each
//! [`crate::Lookup`]; there is no process-wide switch.

use crate::error::{Error, Result};
use crate::loader::parse_document;
use crate::matching::MatchPolicy;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default name of the lookup settings file
pub const CONFIG_FILE_NAME: &str = "dagconfig.yaml";

/// Settings controlling how lookups match keys
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LookupConfig {
    /// Accept keys that differ only in letter case (e.g. `ABC` vs `abc`)
    #[serde(rename = "tolerate-miscased-keys")]
    pub tolerate_miscased_keys: bool,
}

impl LookupConfig {
    /// Parse settings from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is malformed, has an unknown key,
    /// or a value of the wrong type.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        parse_document(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load settings from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Config`]
    /// if its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            tolerate_miscased_keys = config.tolerate_miscased_keys,
            "Loaded lookup settings"
        );
        Ok(config)
    }

    /// The matching policy these settings select.
    #[must_use]
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy::from_tolerate_miscased(self.tolerate_miscased_keys)
    }
}
