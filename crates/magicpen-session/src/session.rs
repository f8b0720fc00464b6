//! Session state

use serde::{Deserialize, Serialize};

/// Whether a bearer token is currently held.
///
/// ```text
/// Anonymous --login success--> Authenticated
/// Authenticated --logout/clear--> Anonymous
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl SessionState {
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Anonymous,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
