//! Session
//!
//! Who is signed in, persisted in browser local storage as `token` (the
//! account key) and `name`. Also keeps the contact-page hand-off keys.

use std::cell::RefCell;
use std::collections::HashMap;

pub const TOKEN_KEY: &str = "token";
pub const NAME_KEY: &str = "name";
pub const LAST_EDITED_CONTACT_KEY: &str = "lastEditedContact";
pub const SELECTED_CONTACT_KEY: &str = "selectedContactEmail";

pub const GUEST_NAME: &str = "guest";

/// String key/value persistence
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`; failures are logged and otherwise ignored
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let stored = Self::storage().map(|s| s.set_item(key, value).is_ok());
        if stored != Some(true) {
            log::warn!("could not write {} to local storage", key);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Process-local storage, used by tests and as a fallback
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    /// Key of the signed-in account; guests have none
    pub token: Option<String>,
    /// Email of the signed-in account, or `guest`
    pub name: Option<String>,
}

impl Session {
    pub fn load(storage: &impl KeyValueStorage) -> Self {
        Self {
            token: non_empty(storage.get(TOKEN_KEY)),
            name: non_empty(storage.get(NAME_KEY)),
        }
    }

    pub fn sign_in(storage: &impl KeyValueStorage, account_id: &str, email: &str) -> Self {
        storage.set(TOKEN_KEY, account_id);
        storage.set(NAME_KEY, email);
        Self::load(storage)
    }

    pub fn guest(storage: &impl KeyValueStorage) -> Self {
        storage.set(TOKEN_KEY, "");
        storage.set(NAME_KEY, GUEST_NAME);
        Self::load(storage)
    }

    pub fn sign_out(storage: &impl KeyValueStorage) -> Self {
        storage.remove(TOKEN_KEY);
        storage.remove(NAME_KEY);
        Self::default()
    }

    /// Anyone with a stored name, guests included, may use the app
    pub fn is_active(&self) -> bool {
        self.name.is_some()
    }

    pub fn is_guest(&self) -> bool {
        self.token.is_none() && self.name.as_deref() == Some(GUEST_NAME)
    }

    /// Whether `account_id` is the signed-in account
    pub fn owns(&self, account_id: &str) -> bool {
        self.token.as_deref() == Some(account_id)
    }
}

// ========================
// Contact page hand-off
// ========================

pub fn remember_edited_contact(storage: &impl KeyValueStorage, email: &str) {
    storage.set(LAST_EDITED_CONTACT_KEY, email);
}

/// Read and clear the contact that was edited before the last reload
pub fn take_edited_contact(storage: &impl KeyValueStorage) -> Option<String> {
    let email = non_empty(storage.get(LAST_EDITED_CONTACT_KEY));
    storage.remove(LAST_EDITED_CONTACT_KEY);
    email
}

pub fn remember_selected_contact(storage: &impl KeyValueStorage, email: &str) {
    storage.set(SELECTED_CONTACT_KEY, email);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_storage_has_no_session() {
        let storage = MemoryStorage::default();
        let session = Session::load(&storage);
        assert!(!session.is_active());
        assert!(!session.owns(""));
    }

    #[test]
    fn test_guest_session() {
        let storage = MemoryStorage::default();
        let session = Session::guest(&storage);
        assert!(session.is_active());
        assert!(session.is_guest());
        assert_eq!(session.token, None);
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some(""));
    }

    #[test]
    fn test_sign_in_and_out() {
        let storage = MemoryStorage::default();
        let session = Session::sign_in(&storage, "-Nk1", "anna@example.com");
        assert!(session.owns("-Nk1"));
        assert!(!session.owns("-Nk2"));
        assert_eq!(Session::load(&storage), session);

        let session = Session::sign_out(&storage);
        assert!(!session.is_active());
        assert!(!Session::load(&storage).is_active());
    }

    #[test]
    fn test_edited_contact_is_read_once() {
        let storage = MemoryStorage::default();
        remember_edited_contact(&storage, "ben@example.com");
        assert_eq!(take_edited_contact(&storage).as_deref(), Some("ben@example.com"));
        assert_eq!(take_edited_contact(&storage), None);
    }
}
