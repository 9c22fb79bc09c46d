//! Key-value storage clients
//!
//! `LocalStorageStore` backs the view-state store with the host's
//! localStorage surface. `NullStore` is the degraded stand-in when
//! storage is unavailable: reads see nothing, writes vanish.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::api::helpers::js_error_string;
use crate::engine::KeyValueStore;
use crate::error::CoreError;

/// localStorage-backed storage client.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new(storage: Storage) -> LocalStorageStore {
        LocalStorageStore { storage }
    }

    /// The window's localStorage, when the host grants access.
    pub fn from_window() -> Option<LocalStorageStore> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(LocalStorageStore { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e: JsValue| CoreError::Storage(js_error_string(&e)))
    }
}

/// Storage client used when the host exposes no persistence surface.
#[derive(Default)]
pub struct NullStore;

impl KeyValueStore for NullStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Ok(())
    }
}
