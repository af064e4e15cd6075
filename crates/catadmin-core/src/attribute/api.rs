use async_trait::async_trait;

use super::model::{
    Attribute, AttributePayload, AttributeValue, AttributeValuePayload, CategoryAttribute,
    CategoryAttributePayload,
};
use crate::error::Result;

/// Backend operations on attributes and their predefined values.
#[async_trait]
pub trait AttributeApi: Send + Sync {
    async fn list_attributes(&self) -> Result<Vec<Attribute>>;

    async fn create_attribute(&self, payload: &AttributePayload) -> Result<()>;

    async fn update_attribute(&self, id: i64, payload: &AttributePayload) -> Result<()>;

    async fn delete_attribute(&self, id: i64) -> Result<()>;

    async fn list_values(&self, attribute_id: i64) -> Result<Vec<AttributeValue>>;

    async fn create_value(&self, attribute_id: i64, payload: &AttributeValuePayload) -> Result<()>;

    async fn delete_value(&self, value_id: i64) -> Result<()>;
}

/// Backend operations on category-attribute associations.
#[async_trait]
pub trait CategoryAttributeApi: Send + Sync {
    async fn list_category_attributes(&self, category_id: i64) -> Result<Vec<CategoryAttribute>>;

    async fn attach_attribute(
        &self,
        category_id: i64,
        payload: &CategoryAttributePayload,
    ) -> Result<()>;

    async fn update_category_attribute(
        &self,
        pivot_id: i64,
        payload: &CategoryAttributePayload,
    ) -> Result<()>;

    async fn delete_category_attribute(&self, pivot_id: i64) -> Result<()>;

    /// Removes the association identified by the (category, attribute) pair.
    async fn detach_attribute(&self, category_id: i64, attribute_id: i64) -> Result<()>;
}
