use async_trait::async_trait;
use catadmin_core::auth::{AuthApi, AuthPayload, Credentials, RegisterRequest};
use catadmin_core::error::{AdminError, Result};
use catadmin_core::user::User;
use reqwest::Method;

use crate::client::ApiClient;

fn require_payload(payload: Option<AuthPayload>, endpoint: &str) -> Result<AuthPayload> {
    payload.ok_or_else(|| AdminError::Serialization {
        format: "JSON".to_string(),
        message: format!("{} response has no data", endpoint),
    })
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload> {
        let payload = self.post_for("/auth/login", credentials).await?;
        require_payload(payload, "login")
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload> {
        let payload = self.post_for("/auth/register", request).await?;
        require_payload(payload, "register")
    }

    async fn logout(&self) -> Result<()> {
        self.send_empty(Method::POST, "/auth/logout").await
    }

    async fn me(&self) -> Result<Option<User>> {
        self.get_one("/auth/me").await
    }
}
