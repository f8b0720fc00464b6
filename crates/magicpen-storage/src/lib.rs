//! MagicPen Storage Layer
//!
//! SQLite-backed durable storage for client state that must survive
//! restarts. Values are plain strings addressed by a fixed key.

mod database;
mod error;
mod migrations;

pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
