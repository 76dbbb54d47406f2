use std::collections::HashMap;

use crate::FolioError;

/// Kho khóa-giá trị bền vững (ví dụ `localStorage`).
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, FolioError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), FolioError>;
}

/// Kho trong bộ nhớ; `unavailable()` mô phỏng kho bị chặn.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, FolioError> {
        if self.unavailable {
            return Err(FolioError::Storage("kho bị vô hiệu hóa".to_string()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), FolioError> {
        if self.unavailable {
            return Err(FolioError::Storage("kho bị vô hiệu hóa".to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
