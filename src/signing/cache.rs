//! Signing key cache.
//!
//! A derived key is valid for one access key, region, service and UTC day,
//! so the cache is keyed on all four.

use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe cache of derived SigV4 signing keys.
#[derive(Default)]
pub struct SigningKeyCache {
    keys: RwLock<HashMap<String, Vec<u8>>>,
}

impl SigningKeyCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn cache_key(access_key_id: &str, region: &str, service: &str, date_stamp: &str) -> String {
        format!("{}:{}:{}:{}", access_key_id, region, service, date_stamp)
    }

    /// Look up a key.
    pub fn get(&self, access_key_id: &str, region: &str, service: &str, date_stamp: &str) -> Option<Vec<u8>> {
        let keys = self.keys.read().ok()?;
        keys.get(&Self::cache_key(access_key_id, region, service, date_stamp))
            .cloned()
    }

    /// Store a key, dropping keys from other days.
    pub fn put(&self, access_key_id: &str, region: &str, service: &str, date_stamp: &str, signing_key: Vec<u8>) {
        if let Ok(mut keys) = self.keys.write() {
            let suffix = format!(":{}", date_stamp);
            keys.retain(|k, _| k.ends_with(&suffix));
            keys.insert(
                Self::cache_key(access_key_id, region, service, date_stamp),
                signing_key,
            );
        }
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.keys.read().map(|k| k.len()).unwrap_or(0)
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for SigningKeyCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyCache")
            .field("entries", &self.len())
            .finish()
    }
}
