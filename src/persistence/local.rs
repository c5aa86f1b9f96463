//! Browser LocalStorage backend

use super::{KeyValueStore, StorageError};

const PROBE_KEY: &str = "__tracFlappyStorageTest__";

/// LocalStorage handle, `None` when the browser refuses access
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    /// Open LocalStorage and check it accepts writes (private mode may not)
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .filter(|s| {
                let ok = s.set_item(PROBE_KEY, PROBE_KEY).is_ok();
                let _ = s.remove_item(PROBE_KEY);
                ok
            });

        if storage.is_none() {
            log::warn!("Local storage unavailable, progress will not be saved");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}
