use std::cell::RefCell;
use std::collections::HashMap;

use gloo_storage::{SessionStorage, Storage};

use crate::error::StorageError;
use crate::models::AdminCredential;
use crate::utils::constants::{DEFAULT_ADMIN_NAME, STORAGE_KEY_ADMIN_NAME, STORAGE_KEY_ADMIN_TOKEN};

/// Almacén clave-valor con scope de pestaña (sessionStorage en el navegador)
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn clear(&self);

    /// Credencial del admin si hay token guardado
    fn load_credential(&self) -> Option<AdminCredential> {
        let token = self.get(STORAGE_KEY_ADMIN_TOKEN).filter(|t| !t.is_empty())?;
        let name = self
            .get(STORAGE_KEY_ADMIN_NAME)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_NAME.to_string());
        Some(AdminCredential { token, name })
    }

    fn save_credential(&self, credential: &AdminCredential) -> Result<(), StorageError> {
        self.set(STORAGE_KEY_ADMIN_TOKEN, &credential.token)?;
        self.set(STORAGE_KEY_ADMIN_NAME, &credential.name)
    }

    fn has_token(&self) -> bool {
        self.load_credential().is_some()
    }
}

/// sessionStorage del navegador vía gloo-storage
#[derive(Clone, Copy, Default)]
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        SessionStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        SessionStorage::set(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn clear(&self) {
        SessionStorage::clear();
    }
}

/// Store en memoria (tests y entornos sin sessionStorage)
#[derive(Default)]
pub struct MemorySessionStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_credential(token: &str, name: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(STORAGE_KEY_ADMIN_TOKEN.to_string(), token.to_string());
        store.entries.borrow_mut().insert(STORAGE_KEY_ADMIN_NAME.to_string(), name.to_string());
        store
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_round_trip_and_clear() {
        let store = MemorySessionStore::new();
        assert!(!store.has_token());

        let credential = AdminCredential {
            token: "t0k3n".to_string(),
            name: "Riya".to_string(),
        };
        store.save_credential(&credential).unwrap();
        assert_eq!(store.load_credential(), Some(credential));

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.load_credential(), None);
    }

    #[test]
    fn test_missing_name_defaults_to_admin() {
        let store = MemorySessionStore::new();
        store.set(STORAGE_KEY_ADMIN_TOKEN, "abc").unwrap();
        assert_eq!(store.load_credential().map(|c| c.name), Some(DEFAULT_ADMIN_NAME.to_string()));
    }

    #[test]
    fn test_empty_token_is_no_credential() {
        let store = MemorySessionStore::with_credential("", "Riya");
        assert!(!store.has_token());
    }
}
