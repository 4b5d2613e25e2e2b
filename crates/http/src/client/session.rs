//! Session state and durable token persistence
//!
//! `SessionStore` is the single source of truth for "am I authenticated and
//! as whom". Durable storage is a mirror behind the [`TokenStore`] seam,
//! never an independent source of truth: the in-memory token wins, and every
//! mutation writes through.

use rollcall_core::UserProfile;
use std::sync::{Arc, Mutex};

/// Durable key-value storage for the access token.
///
/// Implementations are synchronous because the canonical backend
/// (`localStorage`) is. Failures must degrade to "no token", never panic.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// In-memory [`TokenStore`] for native use and tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing token, as after a previous session.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().expect("token store lock poisoned").clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().expect("token store lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("token store lock poisoned") = None;
    }
}

#[derive(Debug, Clone, Default)]
struct Session {
    access_token: Option<String>,
    user: Option<UserProfile>,
}

/// In-memory session mirrored into a [`TokenStore`].
pub struct SessionStore {
    state: Mutex<Session>,
    persistence: Arc<dyn TokenStore>,
}

impl SessionStore {
    /// Create a store, picking up any token the persistence layer still
    /// holds from a previous session.
    pub fn new(persistence: Arc<dyn TokenStore>) -> Self {
        let access_token = persistence.load();
        Self {
            state: Mutex::new(Session {
                access_token,
                user: None,
            }),
            persistence,
        }
    }

    /// Store a new access token in memory and write it through.
    ///
    /// No validation of token shape; that is the caller's responsibility.
    pub fn set_token(&self, token: &str) {
        self.state
            .lock()
            .expect("session lock poisoned")
            .access_token = Some(token.to_string());
        self.persistence.save(token);
    }

    /// Store the authenticated user's profile. Does not affect the token.
    pub fn set_user(&self, user: UserProfile) {
        self.state.lock().expect("session lock poisoned").user = Some(user);
    }

    /// Wipe token, profile, and durable persistence. Idempotent.
    pub fn clear(&self) {
        let mut state = self.state.lock().expect("session lock poisoned");
        state.access_token = None;
        state.user = None;
        drop(state);
        self.persistence.clear();
    }

    pub fn token(&self) -> Option<String> {
        self.state
            .lock()
            .expect("session lock poisoned")
            .access_token
            .clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.lock().expect("session lock poisoned").user.clone()
    }

    /// Whether a token is present, for authenticated-vs-anonymous routing.
    pub fn is_authenticated(&self) -> bool {
        self.state
            .lock()
            .expect("session lock poisoned")
            .access_token
            .is_some()
    }
}
