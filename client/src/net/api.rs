//! REST access to the HR backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, through the host's
//! same-origin `/api` proxy. Server-side (SSR): stubs that fail with a
//! transport error, since these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call maps into `StoreError` so the resource coordinator can decide
//! between rollback and refetch:
//!
//! - 401/403 trigger one token refresh and one retry; a failed refresh
//!   clears the session and yields `Unauthorized`
//! - other non-2xx answers become `Status` with the backend's message
//! - requests that outlive `REQUEST_TIMEOUT_MS` become `Timeout`

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crud::{RecordStore, Record, RecordId, RemoteOptions, ResourceEndpoint, SelectOption, StoreError};

/// Base path of the backend as seen from the browser.
pub const API_BASE: &str = match option_env!("HCIMS_CLIENT_API_BASE") {
    Some(base) => base,
    None => "/api",
};

pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

const LOGIN_PATH: &str = "/auth/login/";
const REFRESH_PATH: &str = "/Auth/token/refresh/";

/// Token pair issued by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Join `base` and `path` with exactly one slash between them.
#[must_use]
pub fn api_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
fn is_auth_failure(status: u16) -> bool {
    status == 401 || status == 403
}

/// Human-readable message from a Django REST error body.
///
/// Understands `{"detail": ..}`, `{"message": ..}`, and field maps such as
/// `{"name": ["This field is required."]}`.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return (!trimmed.starts_with('<') && trimmed.len() <= 200).then(|| trimmed.to_owned());
    };
    let map = value.as_object()?;
    for key in ["detail", "message", "error"] {
        if let Some(Value::String(msg)) = map.get(key) {
            return Some(msg.clone());
        }
    }
    let (field, errors) = map.iter().next()?;
    let first = match errors {
        Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_owned),
        Value::String(msg) => Some(msg.clone()),
        _ => None,
    }?;
    Some(format!("{field}: {first}"))
}

/// Map a non-2xx answer into a store error.
#[must_use]
pub fn status_error(status: u16, body: &str) -> StoreError {
    if status == 401 || status == 403 {
        return StoreError::Unauthorized;
    }
    let message = error_message(body).unwrap_or_else(|| format!("request failed with status {status}"));
    StoreError::Status { status, message }
}

// =============================================================
// HttpStore
// =============================================================

/// `RecordStore` over one backend collection.
#[derive(Debug, Clone)]
pub struct HttpStore {
    endpoint: ResourceEndpoint,
    base: String,
}

impl HttpStore {
    #[must_use]
    pub fn new(endpoint: ResourceEndpoint) -> Self {
        Self { endpoint, base: API_BASE.to_owned() }
    }

    #[must_use]
    pub fn endpoint(&self) -> &ResourceEndpoint {
        &self.endpoint
    }

    fn decode_one(&self, body: Value) -> Result<Option<Record>, StoreError> {
        if body.is_null() {
            return Ok(None);
        }
        self.endpoint.to_record(body).map(Some).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl RecordStore for HttpStore {
    async fn list(&self) -> Result<Vec<Record>, StoreError> {
        let body = send(&self.base, Verb::Get, &self.endpoint.collection_url(), None).await?;
        self.endpoint.to_records(body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn create(&self, payload: &Map<String, Value>) -> Result<Option<Record>, StoreError> {
        let body = send(&self.base, Verb::Post, &self.endpoint.collection_url(), Some(payload)).await?;
        self.decode_one(body)
    }

    async fn update(&self, id: &RecordId, payload: &Map<String, Value>) -> Result<Option<Record>, StoreError> {
        let body = send(&self.base, Verb::Patch, &self.endpoint.item_url(id), Some(payload)).await?;
        self.decode_one(body)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), StoreError> {
        send(&self.base, Verb::Delete, &self.endpoint.item_url(id), None).await?;
        Ok(())
    }
}

/// Load select options for a remote-backed field.
///
/// # Errors
///
/// Whatever listing the source collection fails with.
pub async fn fetch_options(remote: &RemoteOptions) -> Result<Vec<SelectOption>, StoreError> {
    let records = HttpStore::new(remote.source.clone()).list().await?;
    Ok(SelectOption::from_records(&records, &remote.value_key, &remote.label_key))
}

/// Sign in with email and password, storing the issued tokens.
///
/// # Errors
///
/// `Status` with the backend's message for bad credentials, transport and
/// timeout errors otherwise.
pub async fn login(email: &str, password: &str) -> Result<(), StoreError> {
    let mut payload = Map::new();
    payload.insert("email".to_owned(), Value::String(email.to_owned()));
    payload.insert("password".to_owned(), Value::String(password.to_owned()));
    let body = send_once(API_BASE, Verb::Post, LOGIN_PATH, Some(&payload)).await?;
    let tokens: TokenPair = serde_json::from_value(body).map_err(|e| StoreError::Decode(e.to_string()))?;
    crate::util::session::store_tokens(&tokens.access, tokens.refresh.as_deref().unwrap_or_default());
    Ok(())
}

// =============================================================
// Transport
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Get,
    Post,
    Patch,
    Delete,
}

/// Send with the stored access token, refreshing once on 401/403.
async fn send(base: &str, verb: Verb, path: &str, body: Option<&Map<String, Value>>) -> Result<Value, StoreError> {
    #[cfg(feature = "hydrate")]
    {
        let url = api_url(base, path);
        let token = crate::util::session::access_token();
        let resp = with_timeout(request(verb, &url, body, token.as_deref())).await?;
        let resp = if is_auth_failure(resp.status()) {
            let token = refresh_access(base).await?;
            with_timeout(request(verb, &url, body, Some(&token))).await?
        } else {
            resp
        };
        read_body(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, verb, path, body);
        Err(StoreError::Transport("not available on server".to_owned()))
    }
}

/// Send without auth handling, for the login call itself.
async fn send_once(base: &str, verb: Verb, path: &str, body: Option<&Map<String, Value>>) -> Result<Value, StoreError> {
    #[cfg(feature = "hydrate")]
    {
        let url = api_url(base, path);
        let resp = with_timeout(request(verb, &url, body, None)).await?;
        if is_auth_failure(resp.status()) {
            let text = resp.text().await.unwrap_or_default();
            let message = error_message(&text).unwrap_or_else(|| "invalid credentials".to_owned());
            return Err(StoreError::Status { status: resp.status(), message });
        }
        read_body(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (base, verb, path, body);
        Err(StoreError::Transport("not available on server".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
async fn request(
    verb: Verb,
    url: &str,
    body: Option<&Map<String, Value>>,
    token: Option<&str>,
) -> Result<gloo_net::http::Response, StoreError> {
    use gloo_net::http::Request;

    let mut builder = match verb {
        Verb::Get => Request::get(url),
        Verb::Post => Request::post(url),
        Verb::Patch => Request::patch(url),
        Verb::Delete => Request::delete(url),
    };
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        builder = builder.header("Authorization", &crate::util::session::bearer(token));
    }
    let request = match body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| StoreError::Transport(e.to_string()))?;
    request.send().await.map_err(|e| StoreError::Transport(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn read_body(resp: gloo_net::http::Response) -> Result<Value, StoreError> {
    let status = resp.status();
    let text = resp.text().await.map_err(|e| StoreError::Decode(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(status_error(status, &text));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Exchange the refresh token for a new access token.
#[cfg(feature = "hydrate")]
async fn refresh_access(base: &str) -> Result<String, StoreError> {
    use crate::util::session;

    let Some(refresh) = session::refresh_token() else {
        session::clear_tokens();
        return Err(StoreError::Unauthorized);
    };
    let mut payload = Map::new();
    payload.insert("refresh".to_owned(), Value::String(refresh.clone()));
    let url = api_url(base, REFRESH_PATH);
    let tokens = match with_timeout(request(Verb::Post, &url, Some(&payload), None)).await {
        Ok(resp) if resp.ok() => resp.json::<TokenPair>().await.ok(),
        _ => None,
    };
    let Some(tokens) = tokens else {
        leptos::logging::warn!("token refresh failed, signing out");
        session::clear_tokens();
        return Err(StoreError::Unauthorized);
    };
    session::store_tokens(&tokens.access, tokens.refresh.as_deref().unwrap_or(&refresh));
    Ok(tokens.access)
}

#[cfg(feature = "hydrate")]
async fn with_timeout<T>(fut: impl Future<Output = Result<T, StoreError>>) -> Result<T, StoreError> {
    use futures::future::{Either, select};

    let fut = std::pin::pin!(fut);
    let timer = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(REQUEST_TIMEOUT_MS));
    match select(fut, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(StoreError::Timeout),
    }
}
