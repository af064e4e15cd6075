//! User management: edit, delete, toggle the admin ability.

use std::sync::Arc;

use catadmin_core::error::Result;
use catadmin_core::user::{User, UserApi, UserUpdate};
use tokio::sync::RwLock;
use tracing::debug;

use super::ListState;

const LOAD_FAILED: &str = "Failed to load users";

pub struct UsersScreen {
    api: Arc<dyn UserApi>,
    state: RwLock<ListState<User>>,
}

impl UsersScreen {
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self {
            api,
            state: RwLock::new(ListState::default()),
        }
    }

    pub async fn state(&self) -> ListState<User> {
        self.state.read().await.clone()
    }

    pub async fn load(&self) -> Result<()> {
        self.state.write().await.begin();
        let result = self.api.list_users().await;
        self.state.write().await.finish(result, LOAD_FAILED)
    }

    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<()> {
        self.api.update_user(id, update).await?;
        self.refetch().await;
        Ok(())
    }

    pub async fn toggle_admin(&self, id: i64) -> Result<()> {
        self.api.toggle_admin(id).await?;
        self.refetch().await;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete_user(id).await?;
        self.refetch().await;
        Ok(())
    }

    async fn refetch(&self) {
        if let Err(e) = self.load().await {
            debug!(error = %e, "Refetch after mutation failed");
        }
    }
}
