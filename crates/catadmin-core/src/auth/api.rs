use async_trait::async_trait;

use super::model::{AuthPayload, Credentials, RegisterRequest};
use crate::error::Result;
use crate::user::User;

/// Authentication endpoints consumed by the session store.
///
/// Implementations attach the currently stored token themselves; the store
/// never passes it explicitly.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a session.
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload>;

    /// Creates an account and returns its session.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload>;

    /// Invalidates the current token server-side.
    async fn logout(&self) -> Result<()>;

    /// Reads the profile of the token's owner. `None` when the payload is absent.
    async fn me(&self) -> Result<Option<User>>;
}
