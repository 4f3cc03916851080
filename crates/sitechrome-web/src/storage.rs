//! `localStorage`-backed preference store

use sitechrome_core::{ChromeError, PreferenceStore};
use web_sys::{Storage, Window};

/// Theme preference persistence; absent storage (privacy modes, sandboxed
/// iframes) loads nothing and fails every save
#[derive(Clone)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn from_window(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), ChromeError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| ChromeError::storage(key, "localStorage unavailable"))?;
        storage
            .set_item(key, value)
            .map_err(|e| ChromeError::storage(key, format!("{:?}", e)))
    }
}
