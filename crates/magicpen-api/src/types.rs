//! Wire types for the generation API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "UserWire")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub account_type: Option<String>,
    pub post_limit: Option<i64>,
    pub posts_generated: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    object_id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    email: String,
    #[serde(default)]
    account_type: Option<String>,
    #[serde(default)]
    post_limit: Option<i64>,
    #[serde(default)]
    posts_generated: Option<i64>,
}

impl From<UserWire> for User {
    fn from(wire: UserWire) -> Self {
        Self {
            id: pick_id(wire.id, wire.object_id).unwrap_or_default(),
            name: wire.name,
            email: wire.email,
            account_type: wire.account_type,
            post_limit: wire.post_limit,
            posts_generated: wire.posts_generated,
        }
    }
}

/// How many more posts a user may generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAllowance {
    Unlimited,
    Remaining(i64),
    /// The server did not report enough to tell
    Unknown,
}

impl std::fmt::Display for PostAllowance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostAllowance::Unlimited => write!(f, "unlimited"),
            PostAllowance::Remaining(n) => write!(f, "{}", n),
            PostAllowance::Unknown => write!(f, "unknown"),
        }
    }
}

impl User {
    pub fn is_premium(&self) -> bool {
        self.account_type.as_deref() == Some("premium")
    }

    pub fn allowance(&self) -> PostAllowance {
        if self.is_premium() {
            return PostAllowance::Unlimited;
        }

        match (self.post_limit, self.posts_generated) {
            (Some(limit), Some(used)) => PostAllowance::Remaining((limit - used).max(0)),
            _ => PostAllowance::Unknown,
        }
    }
}

/// A generated post. Opaque to the client beyond display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PostWire")]
pub struct Post {
    pub id: String,
    pub prompt: String,
    pub tone: String,
    pub content: String,
    /// `None` when absent or in a format we do not read
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostWire {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    object_id: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    prompt: String,
    #[serde(default, deserialize_with = "null_as_default")]
    tone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    content: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<PostWire> for Post {
    type Error = String;

    fn try_from(wire: PostWire) -> std::result::Result<Self, Self::Error> {
        let id = pick_id(wire.id, wire.object_id).ok_or("post has no usable id")?;
        Ok(Self {
            id,
            prompt: wire.prompt,
            tone: wire.tone,
            content: wire.content,
            created_at: wire.created_at,
        })
    }
}

/// Response of register and login.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub user: Option<User>,
}

/// Response of generate and single-post lookups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub post: Option<Post>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: Vec<Post>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Identifiers arrive as strings from some backends and numbers from
/// others, under `id`, `_id` or both. `id` wins when usable.
fn pick_id(primary: Option<Value>, fallback: Option<Value>) -> Option<String> {
    fn as_id(value: Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    primary.and_then(as_id).or_else(|| fallback.and_then(as_id))
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// RFC 3339 strings or epoch milliseconds; anything else reads as `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}
