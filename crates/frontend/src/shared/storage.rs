//! Key/value persistence for user preferences and the auth token.
//!
//! Every operation is best-effort: if the browser refuses access (private
//! browsing, quota, disabled storage) reads come back empty and writes are
//! silently dropped.

use web_sys::window;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)?.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    Session,
}

/// `window.localStorage` or `window.sessionStorage`.
#[derive(Clone, Copy, Debug)]
pub struct BrowserStorage {
    kind: StorageKind,
}

impl BrowserStorage {
    pub const fn local() -> Self {
        Self {
            kind: StorageKind::Local,
        }
    }

    pub const fn session() -> Self {
        Self {
            kind: StorageKind::Session,
        }
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = window()?;
        match self.kind {
            StorageKind::Local => window.local_storage().ok()?,
            StorageKind::Session => window.session_storage().ok()?,
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("storage write for '{}' was rejected", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-process store standing in for browser storage in tests.
#[cfg(test)]
mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::KeyValueStore;

    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        items: Mutex<HashMap<String, String>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_items<I, K, V>(items: I) -> Self
        where
            I: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<String>,
        {
            Self {
                items: Mutex::new(
                    items
                        .into_iter()
                        .map(|(k, v)| (k.into(), v.into()))
                        .collect(),
                ),
            }
        }

        pub fn len(&self) -> usize {
            self.items.lock().map(|items| items.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    impl KeyValueStore for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.items.lock().ok()?.get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            if let Ok(mut items) = self.items.lock() {
                items.insert(key.to_string(), value.to_string());
            }
        }

        fn remove(&self, key: &str) {
            if let Ok(mut items) = self.items.lock() {
                items.remove(key);
            }
        }
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_helpers_ignore_garbage() {
        let store = MemoryStorage::with_items([("a", "true"), ("b", "nope")]);
        assert_eq!(store.get_bool("a"), Some(true));
        assert_eq!(store.get_bool("b"), None);
        assert_eq!(store.get_bool("missing"), None);

        store.set_bool("b", false);
        assert_eq!(store.get("b").as_deref(), Some("false"));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = MemoryStorage::new();
        store.set("token", "abc");
        store.remove("token");
        store.remove("token");
        assert!(store.is_empty());
    }
}
