//! MagicPen Core
//!
//! Composition root for the MagicPen client: one storage handle, one
//! session, one API client, plus the prompt composer state the front
//! end renders.

mod app;
mod composer;
mod config;
mod error;

pub use app::App;
pub use composer::{Composer, Submission, UserStats, DEFAULT_TONE, HISTORY_PREVIEW_LEN};
pub use config::{Config, API_URL_ENV, DATA_DIR_ENV};
pub use error::CoreError;

// Re-export core components
pub use magicpen_api::{
    ApiClient, ApiConfig, ApiError, AuthResponse, Credentials, DeleteResponse, HistoryResponse,
    MeResponse, Post, PostAllowance, PostResponse, Registration, RequestDescriptor, User,
};
pub use magicpen_session::{SessionState, SessionStore};
pub use magicpen_storage::{Database, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
