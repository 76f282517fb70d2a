//! Key-value persistence adapter
//!
//! Wraps a synchronous string-keyed storage medium with JSON encode/decode.
//! This is the only module allowed to touch the backend; every other
//! component persists through [`KvStore`]. Reads of missing or corrupt data
//! yield `None` so a damaged payload can never block the application from
//! loading; corruption is logged and treated as absence.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Well-known storage keys shared across the storefront.
pub mod keys {
    /// Ordered array of cart line items.
    pub const CART: &str = "cart";
    /// Array of wishlisted product snapshots.
    pub const WISHLIST: &str = "wishlist";
    /// Last confirmed payment method token, written by the checkout flow.
    pub const PAYMENT_METHOD: &str = "payment_method";
}

/// The raw storage medium: synchronous get/set/remove on strings.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-memory backend; the default for tests and the server stub.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self { Self::default() }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner).insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner).remove(key);
    }
}

/// JSON view over a [`StorageBackend`]. Cheap to clone; clones share the
/// same backend.
#[derive(Clone)]
pub struct KvStore {
    backend: Arc<dyn StorageBackend>,
}

impl KvStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Read and decode the value under `key`. Missing and corrupt payloads
    /// both come back as `None`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "discarding corrupt persisted value");
                None
            }
        }
    }

    /// Encode and overwrite the full value under `key`.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.set(key, raw),
            Err(err) => warn!(key, %err, "failed to encode value; keeping previous"),
        }
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }

    /// Raw string under `key`, bypassing JSON decode. Test hook for
    /// inspecting what actually got persisted.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }
}
