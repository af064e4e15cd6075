//! Attribute management, grouped by category, with the values editor for
//! select and checkbox attributes.

use std::sync::Arc;

use catadmin_core::attribute::{
    Attribute, AttributeApi, AttributePayload, AttributeValue, AttributeValuePayload,
};
use catadmin_core::error::{AdminError, Result};
use tokio::sync::RwLock;
use tracing::debug;

use super::ListState;

const LOAD_FAILED: &str = "Failed to load attributes";
const VALUES_LOAD_FAILED: &str = "Failed to load values";

/// Group label for attributes without a category.
pub const UNASSIGNED_GROUP: &str = "Unassigned";

/// Attributes sharing one category name, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGroup {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Default)]
pub struct AttributesState {
    pub list: ListState<Attribute>,
    /// Attribute whose values editor is open.
    pub values_for: Option<i64>,
    pub values: ListState<AttributeValue>,
}

pub struct AttributesScreen {
    api: Arc<dyn AttributeApi>,
    state: RwLock<AttributesState>,
}

impl AttributesScreen {
    pub fn new(api: Arc<dyn AttributeApi>) -> Self {
        Self {
            api,
            state: RwLock::new(AttributesState::default()),
        }
    }

    pub async fn state(&self) -> AttributesState {
        self.state.read().await.clone()
    }

    pub async fn load(&self) -> Result<()> {
        self.state.write().await.list.begin();
        let result = self.api.list_attributes().await;
        self.state.write().await.list.finish(result, LOAD_FAILED)
    }

    pub async fn groups(&self) -> Vec<AttributeGroup> {
        group_by_category(&self.state.read().await.list.items)
    }

    pub async fn create(&self, payload: &AttributePayload) -> Result<()> {
        validate(payload)?;
        self.api.create_attribute(payload).await?;
        self.refetch().await;
        Ok(())
    }

    pub async fn update(&self, id: i64, payload: &AttributePayload) -> Result<()> {
        validate(payload)?;
        self.api.update_attribute(id, payload).await?;
        self.refetch().await;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete_attribute(id).await?;
        self.refetch().await;
        Ok(())
    }

    /// Opens the values editor of `attribute_id` and loads its values.
    ///
    /// Only attributes whose kind carries values can be opened.
    pub async fn open_values(&self, attribute_id: i64) -> Result<()> {
        {
            let mut state = self.state.write().await;
            let attribute = state
                .list
                .items
                .iter()
                .find(|a| a.id == attribute_id)
                .ok_or_else(|| AdminError::not_found("attribute", attribute_id.to_string()))?;
            if !attribute.kind.has_values() {
                return Err(AdminError::validation(format!(
                    "{} attributes have no predefined values",
                    attribute.kind.as_str()
                )));
            }
            state.values_for = Some(attribute_id);
            state.values = ListState::default();
        }
        self.load_values().await
    }

    pub async fn close_values(&self) {
        let mut state = self.state.write().await;
        state.values_for = None;
        state.values = ListState::default();
    }

    pub async fn add_value(&self, payload: &AttributeValuePayload) -> Result<()> {
        if payload.value_en.trim().is_empty() || payload.value_me.trim().is_empty() {
            return Err(AdminError::validation("Both value translations are required"));
        }
        let attribute_id = self.open_attribute().await?;
        self.api.create_value(attribute_id, payload).await?;
        self.refetch_values().await;
        Ok(())
    }

    pub async fn delete_value(&self, value_id: i64) -> Result<()> {
        self.open_attribute().await?;
        self.api.delete_value(value_id).await?;
        self.refetch_values().await;
        Ok(())
    }

    async fn open_attribute(&self) -> Result<i64> {
        self.state
            .read()
            .await
            .values_for
            .ok_or_else(|| AdminError::validation("No attribute selected"))
    }

    async fn load_values(&self) -> Result<()> {
        let attribute_id = self.open_attribute().await?;
        self.state.write().await.values.begin();
        let result = self.api.list_values(attribute_id).await;

        let mut state = self.state.write().await;
        if state.values_for != Some(attribute_id) {
            // closed or switched while loading
            return Ok(());
        }
        state.values.finish(result, VALUES_LOAD_FAILED)
    }

    async fn refetch(&self) {
        if let Err(e) = self.load().await {
            debug!(error = %e, "Refetch after mutation failed");
        }
    }

    async fn refetch_values(&self) {
        if let Err(e) = self.load_values().await {
            debug!(error = %e, "Refetch of attribute values failed");
        }
    }
}

fn validate(payload: &AttributePayload) -> Result<()> {
    if payload.name.trim().is_empty() || payload.code.trim().is_empty() {
        return Err(AdminError::validation("Name and code are required"));
    }
    Ok(())
}

/// Groups attributes by their category name; attributes without a category
/// go to [`UNASSIGNED_GROUP`].
pub fn group_by_category(attributes: &[Attribute]) -> Vec<AttributeGroup> {
    let mut groups: Vec<AttributeGroup> = Vec::new();
    for attribute in attributes {
        let name = attribute
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(UNASSIGNED_GROUP);
        match groups.iter_mut().find(|g| g.name == name) {
            Some(group) => group.attributes.push(attribute.clone()),
            None => groups.push(AttributeGroup {
                name: name.to_string(),
                attributes: vec![attribute.clone()],
            }),
        }
    }
    groups
}
