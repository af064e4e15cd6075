//! User backend operations.

use async_trait::async_trait;

use super::model::{User, UserUpdate};
use crate::error::Result;

/// Backend operations behind the users screen.
#[async_trait]
pub trait UserApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<()>;

    async fn delete_user(&self, id: i64) -> Result<()>;

    /// Grants or revokes the `admin` ability.
    async fn toggle_admin(&self, id: i64) -> Result<()>;
}
