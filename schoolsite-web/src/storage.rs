//! `localStorage`-backed preference persistence.
use schoolsite_core::PreferenceStore;

use crate::dom;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("localStorage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Preference store over `window.localStorage`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalPreferenceStore;

impl LocalPreferenceStore {
    fn storage() -> Result<web_sys::Storage, WebStorageError> {
        dom::local_storage().map_err(|e| WebStorageError::Unavailable(dom::js_error_message(&e)))
    }
}

impl PreferenceStore for LocalPreferenceStore {
    type Error = WebStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| WebStorageError::Storage(dom::js_error_message(&e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_their_cause() {
        let err = WebStorageError::Storage("QuotaExceededError".into());
        assert_eq!(err.to_string(), "Storage error: QuotaExceededError");
        let err = WebStorageError::Unavailable("window unavailable".into());
        assert!(err.to_string().contains("window unavailable"));
    }
}
