//! Credential marker persistence across the durable and session stores.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login writes a bearer token to the durable store (`localStorage`) and the
//! user id to the session-scoped store (`sessionStorage`). Nothing here
//! validates the token; an entry being present is the whole signal.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::StorageKeys;
use crate::error::ClientError;

/// Which browser store an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Survives browser restarts (`localStorage`).
    Durable,
    /// Cleared when the browsing session ends (`sessionStorage`).
    Session,
}

/// Key/value access to both stores.
pub trait SessionStore {
    fn get(&self, scope: Scope, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the store is missing or refuses the write.
    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<(), ClientError>;

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the store is missing or refuses the removal.
    fn remove(&self, scope: Scope, key: &str) -> Result<(), ClientError>;
}

/// Look up a non-empty value. Empty strings count as absent.
#[must_use]
pub fn present(store: &impl SessionStore, scope: Scope, key: &str) -> Option<String> {
    store.get(scope, key).filter(|v| !v.is_empty())
}

/// The durable token, falling back to the session user id.
#[must_use]
pub fn credential_marker(store: &impl SessionStore, keys: &StorageKeys) -> Option<String> {
    present(store, Scope::Durable, &keys.token).or_else(|| present(store, Scope::Session, &keys.user_id))
}

/// `Authorization` header value: `Bearer <token>`, or empty when signed out.
#[must_use]
pub fn authorization_header(store: &impl SessionStore, keys: &StorageKeys) -> String {
    present(store, Scope::Durable, &keys.token).map_or_else(String::new, |token| format!("Bearer {token}"))
}

/// In-memory store for native tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemorySession {
    entries: RefCell<HashMap<(Scope, String), String>>,
}

impl MemorySession {
    #[must_use]
    pub fn with(entries: &[(Scope, &str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut map = store.entries.borrow_mut();
            for (scope, key, value) in entries {
                map.insert((*scope, (*key).to_owned()), (*value).to_owned());
            }
        }
        store
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        self.entries.borrow().get(&(scope, key.to_owned())).cloned()
    }

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries.borrow_mut().insert((scope, key.to_owned()), value.to_owned());
        Ok(())
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<(), ClientError> {
        self.entries.borrow_mut().remove(&(scope, key.to_owned()));
        Ok(())
    }
}

/// `localStorage` / `sessionStorage` of the current window.
#[cfg(feature = "browser")]
pub struct BrowserSession {
    durable: Option<web_sys::Storage>,
    session: Option<web_sys::Storage>,
}

#[cfg(feature = "browser")]
impl BrowserSession {
    /// Capture both stores. Either may be unavailable (private mode, sandboxed iframes).
    pub fn from_window(window: &web_sys::Window) -> Self {
        Self {
            durable: window.local_storage().unwrap_or(None),
            session: window.session_storage().unwrap_or(None),
        }
    }

    fn storage(&self, scope: Scope) -> Result<&web_sys::Storage, ClientError> {
        let store = match scope {
            Scope::Durable => self.durable.as_ref(),
            Scope::Session => self.session.as_ref(),
        };
        store.ok_or_else(|| ClientError::Storage(format!("{scope:?} storage is not available")))
    }
}

#[cfg(feature = "browser")]
impl SessionStore for BrowserSession {
    fn get(&self, scope: Scope, key: &str) -> Option<String> {
        self.storage(scope).ok()?.get_item(key).unwrap_or(None)
    }

    fn set(&self, scope: Scope, key: &str, value: &str) -> Result<(), ClientError> {
        self.storage(scope)?
            .set_item(key, value)
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<(), ClientError> {
        self.storage(scope)?
            .remove_item(key)
            .map_err(|e| ClientError::Storage(format!("{e:?}")))
    }
}
