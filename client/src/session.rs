//! The signed-in session.
//!
//! The bearer token is the only state the client keeps between page loads.
//! Every read and write goes through [`Session`], which wraps a [`TokenStore`]
//! backend: browser local storage in the web app, memory in tests.

use std::cell::RefCell;
use std::rc::Rc;

/// Local-storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    token: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

#[derive(Clone)]
pub struct Session {
    store: Rc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Rc::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// The stored token, treating a blank value as absent.
    pub fn token(&self) -> Option<String> {
        self.store.load().filter(|token| !token.trim().is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) {
        self.store.save(token);
        tracing::info!("session started");
    }

    pub fn sign_out(&self) {
        if self.store.load().is_some() {
            tracing::info!("session cleared");
        }
        self.store.clear();
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}
