//! MagicPen API Client
//!
//! Single point of outbound HTTP communication:
//! - Fixed base URL plus a relative path per request
//! - `Content-Type: application/json` on every request
//! - `Authorization: Bearer <token>` whenever the session holds a token
//! - Every failure normalized into [`ApiError::RequestFailed`]

mod client;
mod error;
mod request;
mod types;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, FALLBACK_ERROR_MESSAGE};
pub use request::RequestDescriptor;
pub use types::{
    AuthResponse, Credentials, DeleteResponse, HistoryResponse, MeResponse, Post, PostAllowance,
    PostResponse, Registration, User,
};

pub use reqwest::Method;

pub type Result<T> = std::result::Result<T, ApiError>;
