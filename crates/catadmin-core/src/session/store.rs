//! Session store: the authentication operations screens call.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use super::handle::SessionHandle;
use super::model::{Session, SessionUpdate};
use crate::auth::{AuthApi, AuthPayload, Credentials, RegisterRequest};
use crate::error::Result;
use crate::user::User;

/// Login, registration, logout and profile loading on top of a
/// [`SessionHandle`].
///
/// The store owns no state of its own; it combines the shared handle with
/// the backend's [`AuthApi`]. Backend failures are returned unmodified and
/// never retried.
#[derive(Clone)]
pub struct SessionStore {
    handle: SessionHandle,
    auth: Arc<dyn AuthApi>,
}

impl SessionStore {
    pub fn new(handle: SessionHandle, auth: Arc<dyn AuthApi>) -> Self {
        Self { handle, auth }
    }

    /// The shared state this store mutates.
    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    pub fn session(&self) -> Session {
        self.handle.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.handle.subscribe()
    }

    pub fn set_session(&self, update: SessionUpdate) -> Result<()> {
        self.handle.set_session(update)
    }

    pub fn clear_session(&self) -> Result<()> {
        self.handle.clear_session()
    }

    pub fn has_ability(&self, tag: &str) -> bool {
        self.handle.has_ability(tag)
    }

    /// Loads the profile of the current token's owner into the session.
    ///
    /// An absent payload stores `None`. Errors leave the cached user as is.
    pub async fn fetch_me(&self) -> Result<Option<User>> {
        let user = self.auth.me().await?;
        debug!(found = user.is_some(), "Fetched current user");
        self.handle.set_user(user.clone());
        Ok(user)
    }

    /// Exchanges credentials for a session and installs it.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload> {
        let payload = self.auth.login(&Credentials::new(email, password)).await?;
        self.handle.set_session(SessionUpdate::from(payload.clone()))?;
        Ok(payload)
    }

    /// Registers an account and installs the returned session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload> {
        let payload = self.auth.register(request).await?;
        self.handle.set_session(SessionUpdate::from(payload.clone()))?;
        Ok(payload)
    }

    /// Notifies the backend, then clears the local session unconditionally.
    ///
    /// A failing backend call is logged and ignored. The returned error, if
    /// any, only reports a local storage failure; the in-memory session is
    /// empty either way.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.auth.logout().await {
            warn!(error = %e, "Backend logout failed; clearing local session anyway");
        }
        self.handle.clear_session()
    }
}
