//! Configuration for [`DefaultsService`](super::DefaultsService).
//!
//! ```toml
//! path = "/var/lib/app/defaults.json"
//! flush_on_resign = true
//!
//! [defaults]
//! theme = "dark"
//! launch_count = 0
//! volume = 0.8
//! onboarded = false
//! homepage = { url = "https://example.com" }
//! first_seen = { unix_seconds = 1700000000, nanos = 500 }
//! ```

use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use super::DefaultsError;
use super::value::StoredValue;

/// Environment variable naming the backing file.
pub const DEFAULTS_PATH_ENV: &str = "FCOMP_DEFAULTS_PATH";

/// Storage settings and inline defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Backing JSON file. `None` keeps values in memory only.
    pub path: Option<PathBuf>,
    /// Flush to the backing file on `will_resign_active`.
    pub flush_on_resign: bool,
    /// Fallback values registered at construction.
    pub defaults: BTreeMap<String, InlineDefault>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            path: None,
            flush_on_resign: true,
            defaults: BTreeMap::new(),
        }
    }
}

impl DefaultsConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, DefaultsError> {
        toml::from_str(source).map_err(DefaultsError::Config)
    }

    /// Defaults, with the path taken from `FCOMP_DEFAULTS_PATH` when set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_path(env::var(DEFAULTS_PATH_ENV).ok().as_deref())
    }

    /// Override the path with `value` unless it is absent or blank.
    #[must_use]
    pub fn with_env_path(mut self, value: Option<&str>) -> Self {
        if let Some(path) = value.map(str::trim).filter(|p| !p.is_empty()) {
            self.path = Some(PathBuf::from(path));
        }
        self
    }

    /// Inline defaults as stored values.
    #[must_use]
    pub fn stored_defaults(&self) -> BTreeMap<String, StoredValue> {
        self.defaults
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().into()))
            .collect()
    }
}

/// A default value as written in TOML.
///
/// Scalars map to their obvious kind. URLs and timestamps are written as
/// small tables so they are not mistaken for text or numbers; a timestamp's
/// `nanos` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InlineDefault {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Url { url: Url },
    Timestamp {
        unix_seconds: i64,
        #[serde(default)]
        nanos: u32,
    },
    Text(String),
}

impl From<InlineDefault> for StoredValue {
    fn from(value: InlineDefault) -> Self {
        match value {
            InlineDefault::Bool(b) => Self::Bool(b),
            InlineDefault::Integer(i) => Self::Integer(i),
            InlineDefault::Float(f) => Self::Float(f),
            InlineDefault::Url { url } => Self::Url(url),
            InlineDefault::Timestamp {
                unix_seconds,
                nanos,
            } => Self::Timestamp {
                secs: unix_seconds,
                nanos,
            },
            InlineDefault::Text(s) => Self::Text(s),
        }
    }
}
