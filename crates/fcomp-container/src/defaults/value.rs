//! Persisted value kinds.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;
use web_time::{SystemTime, UNIX_EPOCH};

/// A value as the store holds it.
///
/// Serialized with an explicit kind tag so a URL stays a URL and a timestamp
/// stays a timestamp after a round trip through the backing file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StoredValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Url(Url),
    /// Whole seconds since the Unix epoch (negative before it) plus a
    /// non-negative nanosecond part, so instants round-trip exactly.
    Timestamp { secs: i64, nanos: u32 },
}

impl StoredValue {
    /// Kind name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Url(_) => "url",
            Self::Timestamp { .. } => "timestamp",
        }
    }

    /// Whether the backing file can represent this value. JSON has no
    /// spelling for NaN or the infinities.
    #[must_use]
    pub fn is_persistable(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for String {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for bool {}
    impl Sealed for url::Url {}
    impl Sealed for web_time::SystemTime {}
}

/// Rust types the key-value store can hold.
///
/// Implemented for `String`, `i64`, `f64`, `bool`, [`Url`], and
/// [`SystemTime`]; sealed so the set of kinds stays closed. Reading a key
/// as a kind other than the one stored yields `None`.
pub trait PersistedValue: sealed::Sealed + Sized {
    fn into_stored(self) -> StoredValue;
    fn from_stored(value: &StoredValue) -> Option<Self>;
}

impl PersistedValue for String {
    fn into_stored(self) -> StoredValue {
        StoredValue::Text(self)
    }

    fn from_stored(value: &StoredValue) -> Option<Self> {
        match value {
            StoredValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl PersistedValue for i64 {
    fn into_stored(self) -> StoredValue {
        StoredValue::Integer(self)
    }

    fn from_stored(value: &StoredValue) -> Option<Self> {
        match value {
            StoredValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl PersistedValue for f64 {
    fn into_stored(self) -> StoredValue {
        StoredValue::Float(self)
    }

    fn from_stored(value: &StoredValue) -> Option<Self> {
        match value {
            StoredValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl PersistedValue for bool {
    fn into_stored(self) -> StoredValue {
        StoredValue::Bool(self)
    }

    fn from_stored(value: &StoredValue) -> Option<Self> {
        match value {
            StoredValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl PersistedValue for Url {
    fn into_stored(self) -> StoredValue {
        StoredValue::Url(self)
    }

    fn from_stored(value: &StoredValue) -> Option<Self> {
        match value {
            StoredValue::Url(u) => Some(u.clone()),
            _ => None,
        }
    }
}

impl PersistedValue for SystemTime {
    fn into_stored(self) -> StoredValue {
        let (secs, nanos) = match self.duration_since(UNIX_EPOCH) {
            Ok(after) => (
                i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
                after.subsec_nanos(),
            ),
            Err(before) => {
                let before = before.duration();
                let whole = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
                match before.subsec_nanos() {
                    0 => (-whole, 0),
                    n => (-whole - 1, NANOS_PER_SEC - n),
                }
            }
        };
        StoredValue::Timestamp { secs, nanos }
    }

    fn from_stored(value: &StoredValue) -> Option<Self> {
        let StoredValue::Timestamp { secs, nanos } = *value else {
            return None;
        };
        if nanos >= NANOS_PER_SEC {
            return None;
        }
        let whole = Duration::from_secs(secs.unsigned_abs());
        let base = if secs >= 0 {
            UNIX_EPOCH.checked_add(whole)?
        } else {
            UNIX_EPOCH.checked_sub(whole)?
        };
        base.checked_add(Duration::from_nanos(u64::from(nanos)))
    }
}

const NANOS_PER_SEC: u32 = 1_000_000_000;
