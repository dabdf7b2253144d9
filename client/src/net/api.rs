//! REST API client for the workplace backend.
//!
//! Builds transport-neutral requests, attaches the stored bearer token, and
//! decodes JSON responses into typed values.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as an `ApiError`; nothing is retried and nothing
//! is swallowed. Non-2xx responses carry the backend's `detail` message when
//! the body has one.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::http::{Body, HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use super::types::{TokenResponse, User};
use crate::state::session_store::SessionStore;
use crate::util::storage::{Storage, StorageError};

/// Base path the browser build talks to; proxied to the backend.
pub const DEFAULT_API_BASE_URL: &str = "/api";

pub const TOKEN_PATH: &str = "/auth/token";
pub const CURRENT_USER_PATH: &str = "/auth/me";

/// Where the backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("{}", status_failed_message(*status, detail.as_deref()))]
    Status { status: u16, detail: Option<String> },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// HTTP status for backend rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

fn status_failed_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("backend returned {status}: {detail}"),
        None => format!("backend returned {status}"),
    }
}

/// Pull a human-readable `detail` out of a backend error body.
///
/// The backend sends `{"detail": "..."}` for most errors and
/// `{"detail": [...]}` for validation failures.
fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Flatten a serializable filter struct into query pairs, dropping nulls.
///
/// # Errors
///
/// Returns [`ApiError::Encode`] when `query` is not a flat JSON object.
pub fn query_pairs<Q: Serialize>(query: &Q) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(query).map_err(|e| ApiError::Encode(e.to_string()))?;
    let serde_json::Value::Object(map) = value else {
        return Err(ApiError::Encode("query must serialize to an object".to_owned()));
    };
    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let rendered = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            other => return Err(ApiError::Encode(format!("query field `{key}` is not a scalar: {other}"))),
        };
        pairs.push((key, rendered));
    }
    Ok(pairs)
}

/// Authenticated request builder over a transport and the persisted token.
#[derive(Debug)]
pub struct ApiClient<T, S> {
    transport: T,
    store: SessionStore<S>,
}

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    pub fn new(transport: T, store: SessionStore<S>) -> Self {
        Self { transport, store }
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` with the stored bearer token and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn send<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ApiError> {
        let token = self.store.token()?;
        let response = self.dispatch(request.with_bearer(token)).await?;
        decode(&response)
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(HttpRequest::new(Method::Get, path)).await
    }

    pub async fn get_with_query<Q: Serialize, R: DeserializeOwned>(&self, path: &str, query: &Q) -> Result<R, ApiError> {
        let request = HttpRequest::new(Method::Get, path).with_query(query_pairs(query)?);
        self.send(request).await
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.send(HttpRequest::new(Method::Post, path).with_body(json_body(body)?)).await
    }

    pub async fn put<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.send(HttpRequest::new(Method::Put, path).with_body(json_body(body)?)).await
    }

    pub async fn patch<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        self.send(HttpRequest::new(Method::Patch, path).with_body(json_body(body)?)).await
    }

    /// `PATCH` an action route that takes no body.
    pub async fn patch_empty<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(HttpRequest::new(Method::Patch, path)).await
    }

    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send(HttpRequest::new(Method::Delete, path)).await
    }

    /// Exchange credentials for a token via form-encoded `POST /auth/token`.
    ///
    /// No bearer token is attached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, rejection, or a bad body.
    pub async fn issue_token(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = HttpRequest::new(Method::Post, TOKEN_PATH).with_body(Body::Form(vec![
            ("username".to_owned(), username.to_owned()),
            ("password".to_owned(), password.to_owned()),
        ]));
        let response = self.dispatch(request).await?;
        decode(&response)
    }

    /// Fetch `/auth/me` with an explicit token (before it is persisted).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, rejection, or a bad body.
    pub async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let request = HttpRequest::new(Method::Get, CURRENT_USER_PATH).with_bearer(Some(token.to_owned()));
        let response = self.dispatch(request).await?;
        decode(&response)
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "api request");
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status { status: response.status, detail: error_detail(&response.body) });
        }
        Ok(response)
    }
}

fn json_body<B: Serialize>(body: &B) -> Result<Body, ApiError> {
    serde_json::to_value(body)
        .map(Body::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
