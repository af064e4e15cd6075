use async_trait::async_trait;
use catadmin_core::error::Result;
use catadmin_core::user::{User, UserApi, UserUpdate};
use reqwest::Method;

use crate::client::ApiClient;

#[async_trait]
impl UserApi for ApiClient {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.get_list("/admin/users").await
    }

    async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<()> {
        self.send(Method::PATCH, &format!("/admin/users/{}", id), Some(update))
            .await
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/admin/users/{}", id))
            .await
    }

    async fn toggle_admin(&self, id: i64) -> Result<()> {
        self.send_empty(Method::POST, &format!("/admin/users/{}/toggle-admin", id))
            .await
    }
}
