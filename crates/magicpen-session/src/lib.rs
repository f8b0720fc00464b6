//! MagicPen Session Management
//!
//! - A session is a single optional bearer token
//! - Read once from durable storage when the store is built
//! - Every set/clear writes through to storage
//! - Storage failures never block the in-memory session

mod session;
mod store;

pub use session::SessionState;
pub use store::{SessionStore, TOKEN_KEY};
