//! Session Store
//!
//! Holds the bearer token in memory and mirrors it to the settings table.

use parking_lot::RwLock;
use std::sync::Arc;

use magicpen_storage::Database;

use crate::session::SessionState;

/// Settings key the token is persisted under.
pub const TOKEN_KEY: &str = "token";

pub struct SessionStore {
    /// In-memory token, authoritative for reads
    token: Arc<RwLock<Option<String>>>,
    /// Durable backing, absent for detached stores
    db: Option<Database>,
}

impl SessionStore {
    /// Build a store backed by `db`, loading any persisted token.
    pub fn new(db: Database) -> Self {
        let token = match db.get_setting(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load persisted session, starting anonymous");
                None
            }
        };

        tracing::debug!(
            state = %SessionState::from_token(token.as_deref()),
            "Loaded session"
        );

        Self {
            token: Arc::new(RwLock::new(token)),
            db: Some(db),
        }
    }

    /// A store with no durable backing.
    pub fn detached() -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            db: None,
        }
    }

    pub fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Store `token`. An empty token carries no credential and clears the session.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            self.clear();
            return;
        }

        if let Some(db) = &self.db {
            if let Err(e) = db.set_setting(TOKEN_KEY, &token) {
                tracing::warn!(error = %e, "Failed to persist session token");
            }
        }

        *self.token.write() = Some(token);
        tracing::info!("Session established");
    }

    pub fn clear(&self) {
        if let Some(db) = &self.db {
            if let Err(e) = db.delete_setting(TOKEN_KEY) {
                tracing::warn!(error = %e, "Failed to remove persisted session token");
            }
        }

        *self.token.write() = None;
        tracing::info!("Session cleared");
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_token(self.token.read().as_deref())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            token: Arc::clone(&self.token),
            db: self.db.clone(),
        }
    }
}

impl std::fmt::Debug for SessionStore {
    // Never print the token itself
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .field("persistent", &self.db.is_some())
            .finish()
    }
}
