use async_trait::async_trait;
use catadmin_core::category::{Category, CategoryApi, CategoryPayload};
use catadmin_core::error::{AdminError, Result};
use reqwest::Method;
use serde::Serialize;

use crate::client::ApiClient;

#[derive(Serialize)]
struct SortBody {
    sort: i64,
}

#[async_trait]
impl CategoryApi for ApiClient {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get_list("/admin/categories").await
    }

    async fn get_category(&self, id: i64) -> Result<Category> {
        self.get_one(&format!("/admin/categories/{}", id))
            .await?
            .ok_or_else(|| AdminError::not_found("category", id.to_string()))
    }

    async fn create_category(&self, payload: &CategoryPayload) -> Result<()> {
        self.send(Method::POST, "/admin/categories", Some(payload))
            .await
    }

    async fn update_category(&self, id: i64, payload: &CategoryPayload) -> Result<()> {
        self.send(Method::PATCH, &format!("/admin/categories/{}", id), Some(payload))
            .await
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/admin/categories/{}", id))
            .await
    }

    async fn update_sort(&self, id: i64, sort: i64) -> Result<()> {
        self.send(
            Method::PATCH,
            &format!("/admin/categories/{}/sort", id),
            Some(&SortBody { sort }),
        )
        .await
    }
}
