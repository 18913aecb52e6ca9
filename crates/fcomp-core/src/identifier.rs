//! Name-keyed identifiers for route segments and presenters.
//!
//! # Invariants
//!
//! 1. **Equality by name**: two identifiers are equal iff their names are
//!    byte-equal. Hashing and ordering follow the same rule.
//! 2. **Immutable**: the name cannot be changed after construction.
//!
//! # Example
//!
//! ```
//! use fcomp_core::Identifier;
//!
//! let welcome = Identifier::new("app.welcome");
//! assert_eq!(welcome, Identifier::from("app.welcome"));
//! assert_eq!(welcome.to_string(), "app.welcome");
//! ```

use core::fmt;
use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Immutable, name-keyed identifier.
///
/// The name is stored behind an `Arc<str>` so cloning an identifier does not
/// allocate; the router clones identifiers into every active-path entry.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier {
    name: Arc<str>,
}

impl Identifier {
    /// Create an identifier from a name.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
        }
    }

    /// The wrapped name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self {
            name: Arc::from(name),
        }
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({:?})", &*self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(id: &Identifier) -> u64 {
        let mut h = DefaultHasher::new();
        id.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equality_is_by_name() {
        let a = Identifier::new("root");
        let b = Identifier::from(String::from("root"));
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, Identifier::new("Root"));
    }

    #[test]
    fn usable_as_map_key_with_str_lookup() {
        let mut map = HashMap::new();
        map.insert(Identifier::new("next"), 3);
        assert_eq!(map.get("next"), Some(&3));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn display_and_debug() {
        let id = Identifier::new("app.wrapper");
        assert_eq!(id.to_string(), "app.wrapper");
        assert_eq!(format!("{id:?}"), "Identifier(\"app.wrapper\")");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = Identifier::new("welcome");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"welcome\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    proptest::proptest! {
        #[test]
        fn eq_matches_name_eq(a in "[a-z.]{0,12}", b in "[a-z.]{0,12}") {
            let ia = Identifier::new(&a);
            let ib = Identifier::new(&b);
            proptest::prop_assert_eq!(ia == ib, a == b);
            proptest::prop_assert_eq!(ia.cmp(&ib), a.cmp(&b));
        }
    }
}
