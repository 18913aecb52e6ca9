//! Typed key-value persistence.
//!
//! [`KeyValueStore`] is the service capability; [`DefaultsService`] is the
//! stock implementation. Values live in memory and can be backed by a JSON
//! file that is read with [`DefaultsService::load`] and written with
//! [`DefaultsService::flush`]. The service is lifecycle-aware: registered in
//! a container, it flushes when the application resigns active.
//!
//! # Lookup order
//!
//! 1. An explicitly set value.
//! 2. A registered default.
//! 3. Absent.
//!
//! Only explicitly set values are written to the backing file.
//!
//! # Failure Modes
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | Value stored as another kind | read returns `None` |
//! | Backing file missing on `load` | treated as empty |
//! | I/O or parse failure on explicit `load`/`flush` | [`DefaultsError`] |
//! | I/O failure during the resign-active flush | warning logged |

mod config;
mod value;

pub use config::{DEFAULTS_PATH_ENV, DefaultsConfig, InlineDefault};
pub use value::{PersistedValue, StoredValue};

use core::fmt;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use ahash::AHashMap;
use fcomp_core::{Lifecycle, Service};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Errors from the defaults service and its configuration.
#[derive(Debug)]
pub enum DefaultsError {
    /// Reading or writing the backing file failed.
    Io { path: PathBuf, source: io::Error },
    /// The backing file is not a valid defaults document.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The configuration document is invalid.
    Config(toml::de::Error),
}

impl fmt::Display for DefaultsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "defaults file {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "defaults file {} is malformed: {source}", path.display())
            }
            Self::Config(source) => write!(f, "invalid defaults config: {source}"),
        }
    }
}

impl std::error::Error for DefaultsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Config(source) => Some(source),
        }
    }
}

/// Typed key-value persistence capability.
///
/// The object-safe methods move [`StoredValue`]s; the typed
/// [`value`](dyn KeyValueStore::value) and
/// [`set_value`](dyn KeyValueStore::set_value) helpers live on
/// `dyn KeyValueStore`.
pub trait KeyValueStore: Service {
    /// The value for `key`: explicit first, then registered default.
    fn stored_value(&self, key: &str) -> Option<StoredValue>;

    /// Set an explicit value for `key`. A value the store cannot persist,
    /// such as a non-finite float, is ignored.
    fn store_value(&self, key: &str, value: StoredValue);

    /// Remove the explicit value for `key`. Its default, if any, shows
    /// through again.
    fn remove_value(&self, key: &str);

    /// Register fallback values. Later registrations win per key.
    fn register_defaults(&self, defaults: BTreeMap<String, StoredValue>);
}

impl dyn KeyValueStore {
    /// Typed read. `None` if absent or stored as another kind.
    #[must_use]
    pub fn value<T: PersistedValue>(&self, key: &str) -> Option<T> {
        self.stored_value(key).as_ref().and_then(T::from_stored)
    }

    /// Typed write.
    pub fn set_value<T: PersistedValue>(&self, key: &str, value: T) {
        self.store_value(key, value.into_stored());
    }
}

#[derive(Default)]
struct Store {
    values: AHashMap<String, StoredValue>,
    defaults: AHashMap<String, StoredValue>,
    dirty: bool,
}

/// On-disk layout of the backing file.
#[derive(Serialize, Deserialize)]
struct DefaultsFile {
    values: BTreeMap<String, StoredValue>,
}

/// In-memory key-value store with an optional JSON backing file.
pub struct DefaultsService {
    path: Option<PathBuf>,
    flush_on_resign: bool,
    store: Mutex<Store>,
}

impl DefaultsService {
    /// A memory-only store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            flush_on_resign: false,
            store: Mutex::new(Store::default()),
        }
    }

    /// A store backed by `path`. Nothing is read until [`load`](Self::load).
    #[must_use]
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            flush_on_resign: true,
            store: Mutex::new(Store::default()),
        }
    }

    /// Build from configuration: register the inline defaults and, when a
    /// path is configured, load it.
    pub fn from_config(config: &DefaultsConfig) -> Result<Self, DefaultsError> {
        let service = Self {
            path: config.path.clone(),
            flush_on_resign: config.flush_on_resign,
            store: Mutex::new(Store::default()),
        };
        service.register_defaults(config.stored_defaults());
        if service.path.is_some() {
            service.load()?;
        }
        Ok(service)
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Typed read. `None` if absent or stored as another kind.
    #[must_use]
    pub fn value<T: PersistedValue>(&self, key: &str) -> Option<T> {
        self.stored_value(key).as_ref().and_then(T::from_stored)
    }

    /// Typed write.
    pub fn set_value<T: PersistedValue>(&self, key: &str, value: T) {
        self.store_value(key, value.into_stored());
    }

    /// Whether explicit values changed since the last load or flush.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.lock().dirty
    }

    /// Replace the explicit values with the backing file's contents.
    ///
    /// A missing file counts as empty. Returns the number of values read.
    /// Without a backing file this is a no-op returning 0.
    pub fn load(&self) -> Result<usize, DefaultsError> {
        let Some(path) = &self.path else {
            return Ok(0);
        };
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no defaults file yet");
                return Ok(0);
            }
            Err(source) => {
                return Err(DefaultsError::Io {
                    path: path.clone(),
                    source,
                });
            }
        };
        let file: DefaultsFile =
            serde_json::from_str(&text).map_err(|source| DefaultsError::Parse {
                path: path.clone(),
                source,
            })?;

        let count = file.values.len();
        let mut store = self.lock();
        store.values = file.values.into_iter().collect();
        store.dirty = false;
        debug!(path = %path.display(), count, "defaults loaded");
        Ok(count)
    }

    /// Write the explicit values to the backing file.
    ///
    /// Without a backing file this is a no-op.
    pub fn flush(&self) -> Result<(), DefaultsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        // The snapshot and the clean mark are taken together; a write that
        // lands after this point marks the store dirty again.
        let file = {
            let mut store = self.lock();
            store.dirty = false;
            DefaultsFile {
                values: store
                    .values
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            }
        };
        if let Err(err) = write_file(path, &file) {
            self.lock().dirty = true;
            return Err(err);
        }
        debug!(path = %path.display(), count = file.values.len(), "defaults flushed");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_file(path: &Path, file: &DefaultsFile) -> Result<(), DefaultsError> {
    let io_err = |source: io::Error| DefaultsError::Io {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string_pretty(file).map_err(|e| io_err(e.into()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, json).map_err(io_err)
}

impl Default for DefaultsService {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for DefaultsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.lock();
        f.debug_struct("DefaultsService")
            .field("path", &self.path)
            .field("values", &store.values.len())
            .field("defaults", &store.defaults.len())
            .field("dirty", &store.dirty)
            .finish()
    }
}

impl KeyValueStore for DefaultsService {
    fn stored_value(&self, key: &str) -> Option<StoredValue> {
        let store = self.lock();
        store
            .values
            .get(key)
            .or_else(|| store.defaults.get(key))
            .cloned()
    }

    fn store_value(&self, key: &str, value: StoredValue) {
        if !value.is_persistable() {
            warn!(key, kind = value.kind(), "ignoring value the backing file cannot hold");
            return;
        }
        let mut store = self.lock();
        store.values.insert(key.to_owned(), value);
        store.dirty = true;
    }

    fn remove_value(&self, key: &str) {
        let mut store = self.lock();
        if store.values.remove(key).is_some() {
            store.dirty = true;
        }
    }

    fn register_defaults(&self, defaults: BTreeMap<String, StoredValue>) {
        self.lock().defaults.extend(defaults);
    }
}

impl Lifecycle for DefaultsService {
    fn will_resign_active(&self) {
        if !self.flush_on_resign || !self.is_dirty() {
            return;
        }
        if let Err(err) = self.flush() {
            warn!(error = %err, "flushing defaults on resign active failed");
        }
    }
}

impl Service for DefaultsService {
    fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use url::Url;
    use web_time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn explicit_value_shadows_default() {
        let svc = DefaultsService::in_memory();
        svc.register_defaults(BTreeMap::from([(
            "theme".to_string(),
            StoredValue::Text("light".into()),
        )]));
        assert_eq!(svc.value::<String>("theme").as_deref(), Some("light"));

        svc.set_value("theme", String::from("dark"));
        assert_eq!(svc.value::<String>("theme").as_deref(), Some("dark"));

        svc.remove_value("theme");
        assert_eq!(svc.value::<String>("theme").as_deref(), Some("light"));
    }

    #[test]
    fn each_kind_reads_back() {
        let svc = DefaultsService::in_memory();
        let url = Url::parse("https://example.com/").unwrap();
        let when = UNIX_EPOCH + core::time::Duration::from_secs(1_000);

        svc.set_value("n", 5_i64);
        svc.set_value("f", 1.5_f64);
        svc.set_value("b", true);
        svc.set_value("u", url.clone());
        svc.set_value("t", when);

        assert_eq!(svc.value::<i64>("n"), Some(5));
        assert_eq!(svc.value::<f64>("f"), Some(1.5));
        assert_eq!(svc.value::<bool>("b"), Some(true));
        assert_eq!(svc.value::<Url>("u"), Some(url));
        assert_eq!(svc.value::<SystemTime>("t"), Some(when));
        assert_eq!(svc.value::<String>("n"), None);
        assert_eq!(svc.value::<i64>("missing"), None);
    }

    #[test]
    fn typed_helpers_work_through_capability() {
        let store: Arc<dyn KeyValueStore> = Arc::new(DefaultsService::in_memory());
        store.set_value("count", 2_i64);
        assert_eq!(store.value::<i64>("count"), Some(2));
        assert!(store.as_lifecycle().is_some());
    }

    #[test]
    fn memory_only_flush_and_load_are_noops() {
        let svc = DefaultsService::in_memory();
        svc.set_value("k", true);
        assert!(svc.flush().is_ok());
        assert_eq!(svc.load().unwrap(), 0);
        assert_eq!(svc.value::<bool>("k"), Some(true));
        assert!(svc.path().is_none());
    }

    #[test]
    fn dirty_tracks_explicit_changes() {
        let svc = DefaultsService::in_memory();
        assert!(!svc.is_dirty());
        svc.remove_value("absent");
        assert!(!svc.is_dirty());
        svc.set_value("k", 1_i64);
        assert!(svc.is_dirty());
    }

    #[test]
    fn error_display_names_the_file() {
        let err = DefaultsError::Io {
            path: PathBuf::from("/nope/defaults.json"),
            source: io::Error::other("denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/nope/defaults.json"));
        assert!(text.contains("denied"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
