//! Application state container

use magicpen_api::{ApiClient, User};
use magicpen_session::SessionStore;
use magicpen_storage::Database;

use crate::config::Config;
use crate::Result;

/// Composition root.
///
/// Owns the session (and through it the storage handle) and the API
/// client the front end works through. Build as many as needed; nothing
/// here is global.
pub struct App {
    /// Configuration
    config: Config,
    /// Bearer token session, shared with the client
    session: SessionStore,
    /// API client
    client: ApiClient,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        let app = Self::from_parts(config, db);

        tracing::info!(
            api = %app.client.base_url(),
            session = %app.session.state(),
            "MagicPen initialized"
        );

        Ok(app)
    }

    /// Build on top of an already opened database.
    pub fn from_parts(config: Config, db: Database) -> Self {
        let session = SessionStore::new(db);
        let client = ApiClient::new(config.api_config(), session.clone());

        Self {
            config,
            session,
            client,
        }
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        config.validate()?;
        let db = Database::open_in_memory()?;
        Ok(Self::from_parts(config, db))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The signed-in user, if a session exists and the server accepts it.
    ///
    /// Failures are logged and read as "no user"; the session is left as is.
    pub async fn current_user(&self) -> Option<User> {
        if !self.session.is_authenticated() {
            return None;
        }

        match self.client.get_me().await {
            Ok(response) if response.success => response.user,
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load current user");
                None
            }
        }
    }
}

impl Clone for App {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            session: self.session.clone(),
            client: self.client.clone(),
        }
    }
}
