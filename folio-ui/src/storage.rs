#![cfg(target_arch = "wasm32")]

use folio_core::{FolioError, PreferenceStore};
use web_sys::{Storage, Window};

/// `localStorage` của trình duyệt; có thể vắng mặt (chế độ riêng tư, bị chặn).
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn from_window(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&Storage, FolioError> {
        self.storage
            .as_ref()
            .ok_or_else(|| FolioError::Storage("localStorage không khả dụng".to_string()))
    }
}

impl PreferenceStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, FolioError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| FolioError::Storage(format!("{err:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), FolioError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| FolioError::Storage(format!("{err:?}")))
    }
}
