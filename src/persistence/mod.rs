//! Key-value persistence
//!
//! Features:
//! - String key-value store trait (LocalStorage on web, in-memory elsewhere)
//! - Typed numeric and JSON helpers
//! - Missing or corrupt values fall back to caller defaults

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod local;

pub use memory::MemoryStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys for every persisted field
pub mod keys {
    pub const COINS: &str = "tracFlappyCoins";
    /// Multiplier level where level 1 is the free 1x tier
    pub const MULTIPLIER: &str = "tracFlappyMultiplierV2";
    /// Older multiplier level with no base tier: its level n is level n + 1
    pub const LEGACY_MULTIPLIER: &str = "tracFlappyMultiplier";
    pub const EXTRA_LIVES: &str = "tracFlappyExtraLives";
    pub const SKIN: &str = "tracFlappySkin";
    pub const LEADERBOARD: &str = "tracFlappyLeaderboard";
    pub const WALLET: &str = "tracFlappyWallet";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("failed to read {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("unable to parse {key}: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read a raw value, logging and swallowing read failures
fn read_raw(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(StorageError::Unavailable) => None,
        Err(e) => {
            log::warn!("{e}");
            None
        }
    }
}

/// Load a finite number, or `fallback` if absent or not numeric
pub fn load_number(store: &dyn KeyValueStore, key: &str, fallback: f64) -> f64 {
    try_load_number(store, key).unwrap_or(fallback)
}

/// Load a finite number, `None` if absent or not numeric
pub fn try_load_number(store: &dyn KeyValueStore, key: &str) -> Option<f64> {
    let raw = read_raw(store, key)?;
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => {
            log::warn!("Ignoring non-numeric value for {key}: {raw:?}");
            None
        }
    }
}

/// Decode a JSON value without fallback handling
pub fn try_load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get(key)? {
        Some(raw) if !raw.is_empty() => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Parse {
                key: key.to_string(),
                source,
            }),
        _ => Ok(None),
    }
}

/// Load a JSON value, or `fallback` if absent or unparseable
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, fallback: T) -> T {
    match try_load_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) | Err(StorageError::Unavailable) => fallback,
        Err(e) => {
            log::warn!("{e}");
            fallback
        }
    }
}

pub fn save_number(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: impl std::fmt::Display,
) -> Result<(), StorageError> {
    store.set(key, &value.to_string())
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Write {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_fallbacks() {
        let mut store = MemoryStore::new();
        assert_eq!(load_number(&store, keys::COINS, 7.0), 7.0);

        store.set(keys::COINS, "not a number").unwrap();
        assert_eq!(load_number(&store, keys::COINS, 7.0), 7.0);

        store.set(keys::COINS, "inf").unwrap();
        assert_eq!(load_number(&store, keys::COINS, 7.0), 7.0);

        save_number(&mut store, keys::COINS, 42).unwrap();
        assert_eq!(load_number(&store, keys::COINS, 7.0), 42.0);
    }

    #[test]
    fn test_json_fallbacks() {
        let mut store = MemoryStore::new();
        assert_eq!(
            load_json(&store, keys::WALLET, Some("x".to_string())),
            Some("x".to_string())
        );

        store.set(keys::WALLET, "{broken").unwrap();
        assert!(matches!(
            try_load_json::<Option<String>>(&store, keys::WALLET),
            Err(StorageError::Parse { .. })
        ));
        assert_eq!(load_json::<Option<String>>(&store, keys::WALLET, None), None);

        save_json(&mut store, keys::WALLET, &Some("0xabc")).unwrap();
        assert_eq!(
            load_json::<Option<String>>(&store, keys::WALLET, None),
            Some("0xabc".to_string())
        );
    }

    #[test]
    fn test_unavailable_store_uses_defaults() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(load_number(&store, keys::SKIN, 3.0), 3.0);
        assert_eq!(load_json(&store, keys::LEADERBOARD, 5u32), 5);
        assert!(matches!(
            save_number(&mut store, keys::SKIN, 1),
            Err(StorageError::Unavailable)
        ));
    }
}
