//! ブラウザの localStorage をキー・バリューストアとして使う

use interview_common::{Error, KeyValueStore, Result};

/// `window.localStorage` のラッパー
///
/// localStorage が使えない環境（プライベートモード等）では読み込みは空、
/// 書き込みは `Error::Storage` になる。
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

impl BrowserStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }

    fn require() -> Result<web_sys::Storage> {
        Self::storage().ok_or_else(|| Error::Storage("localStorage is not available".into()))
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> Error {
    Error::Storage(format!("{:?}", e))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match Self::storage() {
            Some(storage) => storage.get_item(key).map_err(js_error),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::require()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        Self::require()?.remove_item(key).map_err(js_error)
    }
}
