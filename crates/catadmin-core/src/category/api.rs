use async_trait::async_trait;

use super::model::{Category, CategoryPayload};
use crate::error::Result;

/// Backend operations on categories.
#[async_trait]
pub trait CategoryApi: Send + Sync {
    /// The full flat list; hierarchy is reconstructed client-side.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn get_category(&self, id: i64) -> Result<Category>;

    async fn create_category(&self, payload: &CategoryPayload) -> Result<()>;

    async fn update_category(&self, id: i64, payload: &CategoryPayload) -> Result<()>;

    async fn delete_category(&self, id: i64) -> Result<()>;

    /// Persists a new `sort` value for one category.
    async fn update_sort(&self, id: i64, sort: i64) -> Result<()>;
}
