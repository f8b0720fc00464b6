//! HTTP client for the generation API

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use magicpen_session::SessionStore;

use crate::error::ApiError;
use crate::request::RequestDescriptor;
use crate::types::{AuthResponse, DeleteResponse, HistoryResponse, MeResponse, PostResponse};
use crate::Result;

/// Production API origin, including the `/api` prefix.
pub const DEFAULT_BASE_URL: &str = "https://magic-backend-production-c9c5.up.railway.app/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every request path is appended to, without trailing `/`
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Serialize)]
struct GeneratePostRequest<'a> {
    prompt: &'a str,
    tone: &'a str,
}

/// Client for the MagicPen backend.
///
/// The session is injected at construction; `login` and `logout` are the
/// only operations that mutate it.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Headers for `descriptor`: JSON content type, bearer token when a
    /// session exists, then the descriptor's own headers.
    pub fn headers_for(&self, descriptor: &RequestDescriptor) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.get() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::request_failed("Session token is not a valid header value"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in &descriptor.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::request_failed(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::request_failed(format!("Invalid value for header {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Issue one request and return the decoded JSON body of a 2xx response.
    pub async fn execute(&self, descriptor: RequestDescriptor) -> Result<Value> {
        let result = self.send(&descriptor).await;

        match &result {
            Ok(_) => tracing::debug!(
                method = %descriptor.method,
                path = %descriptor.path,
                "API request succeeded"
            ),
            Err(e) => tracing::error!(
                method = %descriptor.method,
                path = %descriptor.path,
                status = ?e.status(),
                error = %e,
                "API request failed"
            ),
        }

        result
    }

    async fn send(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let url = self.url_for(&descriptor.path);
        let headers = self.headers_for(descriptor)?;

        let mut request = self
            .http
            .request(descriptor.method.clone(), url)
            .headers(headers);

        if let Some(body) = &descriptor.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Decode before the status check; a non-JSON error page is a parse failure
        let data: Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::with_status(status.as_u16(), e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &data));
        }

        Ok(data)
    }

    async fn execute_as<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<T> {
        let path = descriptor.path.clone();
        let data = self.execute(descriptor).await?;

        serde_json::from_value(data).map_err(|e| {
            tracing::error!(path = %path, error = %e, "Unexpected API response shape");
            ApiError::from(e)
        })
    }

    pub async fn register<T: Serialize + ?Sized>(&self, user_data: &T) -> Result<AuthResponse> {
        let body = to_body(user_data)?;
        self.execute_as(RequestDescriptor::post("/auth/register", body))
            .await
    }

    /// Log in and, when the server hands back a token, store it in the session.
    pub async fn login<T: Serialize + ?Sized>(&self, credentials: &T) -> Result<AuthResponse> {
        let body = to_body(credentials)?;
        let response: AuthResponse = self
            .execute_as(RequestDescriptor::post("/auth/login", body))
            .await?;

        if response.success {
            if let Some(token) = response.token.as_deref().filter(|t| !t.is_empty()) {
                self.session.set(token);
            }
        }

        Ok(response)
    }

    pub async fn get_me(&self) -> Result<MeResponse> {
        self.execute_as(RequestDescriptor::get("/auth/me")).await
    }

    /// Drop the session. No network call is made.
    pub fn logout(&self) {
        self.session.clear();
    }

    pub async fn generate_post(&self, prompt: &str, tone: &str) -> Result<PostResponse> {
        let body = to_body(&GeneratePostRequest { prompt, tone })?;
        self.execute_as(RequestDescriptor::post("/posts/generate", body))
            .await
    }

    pub async fn get_post_history(&self) -> Result<HistoryResponse> {
        self.execute_as(RequestDescriptor::get("/posts/history"))
            .await
    }

    pub async fn get_post(&self, id: &str) -> Result<PostResponse> {
        self.execute_as(RequestDescriptor::get(format!("/posts/{}", id)))
            .await
    }

    pub async fn delete_post(&self, id: &str) -> Result<DeleteResponse> {
        self.execute_as(RequestDescriptor::delete(format!("/posts/{}", id)))
            .await
    }
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            session: self.session.clone(),
        }
    }
}

fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        tracing::error!(error = %e, "Failed to encode request body");
        ApiError::from(e)
    })
}
