//! Authenticated HTTP client.

use std::sync::Arc;
use std::time::Duration;

use catadmin_core::error::{AdminError, Result};
use catadmin_core::{Navigator, Route, SessionHandle};
use catadmin_infrastructure::ApiConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// `{ "data": ... }` wrapper around every successful payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// `{ "error": { "message": ... } }`, with a bare `{ "message": ... }` accepted too.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the admin REST backend.
///
/// Reads the bearer token from the shared [`SessionHandle`] on every request,
/// so a login or logout is picked up immediately. Any 401 response clears the
/// session (memory and storage) and navigates to [`Route::Login`] before the
/// error is returned to the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionHandle,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration, session: SessionHandle) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdminError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            navigator: None,
        })
    }

    pub fn from_config(config: &ApiConfig, session: SessionHandle) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
            session,
        )
    }

    /// Where to send the user when the backend rejects the session.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    // ============================================================================
    // Request helpers used by the endpoint modules
    // ============================================================================

    pub(crate) async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let body = self.dispatch(Method::GET, path, self.request(Method::GET, path)).await?;
        parse_data(&body)
    }

    /// A list endpoint; an absent `data` is an empty list.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        Ok(self.get_one::<Vec<T>>(path).await?.unwrap_or_default())
    }

    pub(crate) async fn post_for<B, T>(&self, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        let body = self.dispatch(Method::POST, path, request).await?;
        parse_data(&body)
    }

    /// A mutation whose response payload is ignored.
    pub(crate) async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method.clone(), path);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.dispatch(method, path, request).await?;
        Ok(())
    }

    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<()> {
        self.send::<()>(method, path, None).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        let token = self.session.token();
        if !token.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        request
    }

    async fn dispatch(&self, method: Method, path: &str, request: RequestBuilder) -> Result<Vec<u8>> {
        debug!(%method, path, "API request");

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "API response");

        if status == StatusCode::UNAUTHORIZED {
            // the session is rejected whether or not the body can be read
            let body = response.bytes().await.unwrap_or_default();
            return Err(self.reject_session(error_message(status, &body)));
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(AdminError::api(status.as_u16(), error_message(status, &body)));
        }
        Ok(body.to_vec())
    }

    /// Signs out locally after a 401 and builds the error for the caller.
    fn reject_session(&self, message: String) -> AdminError {
        warn!("Backend rejected the session, signing out");
        if let Err(e) = self.session.clear_session() {
            warn!(error = %e, "Failed to clear persisted session after 401");
        }
        if let Some(navigator) = &self.navigator {
            navigator.navigate(Route::Login);
        }
        AdminError::unauthenticated(message)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .field("navigator", &self.navigator.is_some())
            .finish()
    }
}

fn parse_data<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let envelope: Envelope<T> = serde_json::from_slice(body)?;
    Ok(envelope.data)
}

/// Backend message from an error body, or the status reason when there is none.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.and_then(|e| e.message).or(b.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

fn map_transport_error(err: reqwest::Error) -> AdminError {
    if err.is_timeout() {
        AdminError::network(format!("Request timed out: {}", err))
    } else {
        AdminError::network(err.to_string())
    }
}
