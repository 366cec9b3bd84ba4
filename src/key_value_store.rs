use std::{collections::HashMap, time::Duration};

use tokio::{sync::Mutex, time::Instant};

#[derive(Debug, PartialEq)]
pub struct Value {
    pub data: String,
    pub expiration: Option<Instant>,
}

impl Value {
    fn is_expired(&self) -> bool {
        self.expiration
            .is_some_and(|expiration| Instant::now() > expiration)
    }
}

/// Plain string keys with optional expiry, behind a single lock.
#[derive(Debug, Default)]
pub struct KeyValueStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl KeyValueStore {
    pub fn new() -> Self {
        KeyValueStore::default()
    }

    /// Returns the value stored at `key`.
    ///
    /// An expired key is removed on access and reported as missing.
    pub async fn get(&self, key: &str) -> Option<String> {
        let mut entries_guard = self.entries.lock().await;

        if entries_guard.get(key)?.is_expired() {
            entries_guard.remove(key);
            return None;
        }

        entries_guard.get(key).map(|value| value.data.clone())
    }

    /// Stores `value` at `key`, replacing any previous value.
    ///
    /// `ttl_millis == 0` keeps the key forever.
    pub async fn set(&self, key: &str, value: &str, ttl_millis: u64) {
        let expiration = match ttl_millis {
            0 => None,
            ttl_millis => Some(Instant::now() + Duration::from_millis(ttl_millis)),
        };

        let mut entries_guard = self.entries.lock().await;
        entries_guard.insert(
            key.to_string(),
            Value {
                data: value.to_string(),
                expiration,
            },
        );
    }
}
