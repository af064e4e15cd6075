use async_trait::async_trait;
use catadmin_core::attribute::{
    Attribute, AttributeApi, AttributePayload, AttributeValue, AttributeValuePayload,
    CategoryAttribute, CategoryAttributeApi, CategoryAttributePayload,
};
use catadmin_core::error::Result;
use reqwest::Method;

use crate::client::ApiClient;

#[async_trait]
impl AttributeApi for ApiClient {
    async fn list_attributes(&self) -> Result<Vec<Attribute>> {
        self.get_list("/admin/attributes").await
    }

    async fn create_attribute(&self, payload: &AttributePayload) -> Result<()> {
        self.send(Method::POST, "/admin/attributes", Some(payload))
            .await
    }

    async fn update_attribute(&self, id: i64, payload: &AttributePayload) -> Result<()> {
        self.send(Method::PATCH, &format!("/admin/attributes/{}", id), Some(payload))
            .await
    }

    async fn delete_attribute(&self, id: i64) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/admin/attributes/{}", id))
            .await
    }

    async fn list_values(&self, attribute_id: i64) -> Result<Vec<AttributeValue>> {
        self.get_list(&format!("/admin/attributes/{}/values", attribute_id))
            .await
    }

    async fn create_value(&self, attribute_id: i64, payload: &AttributeValuePayload) -> Result<()> {
        self.send(
            Method::POST,
            &format!("/admin/attributes/{}/values", attribute_id),
            Some(payload),
        )
        .await
    }

    async fn delete_value(&self, value_id: i64) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/admin/attribute-values/{}", value_id))
            .await
    }
}

#[async_trait]
impl CategoryAttributeApi for ApiClient {
    async fn list_category_attributes(&self, category_id: i64) -> Result<Vec<CategoryAttribute>> {
        self.get_list(&format!("/admin/categories/{}/attributes", category_id))
            .await
    }

    async fn attach_attribute(
        &self,
        category_id: i64,
        payload: &CategoryAttributePayload,
    ) -> Result<()> {
        self.send(
            Method::POST,
            &format!("/admin/categories/{}/attributes", category_id),
            Some(payload),
        )
        .await
    }

    async fn update_category_attribute(
        &self,
        pivot_id: i64,
        payload: &CategoryAttributePayload,
    ) -> Result<()> {
        self.send(
            Method::PATCH,
            &format!("/admin/category-attributes/{}", pivot_id),
            Some(payload),
        )
        .await
    }

    async fn delete_category_attribute(&self, pivot_id: i64) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/admin/category-attributes/{}", pivot_id))
            .await
    }

    async fn detach_attribute(&self, category_id: i64, attribute_id: i64) -> Result<()> {
        self.send_empty(
            Method::DELETE,
            &format!("/admin/categories/{}/attributes/{}", category_id, attribute_id),
        )
        .await
    }
}
