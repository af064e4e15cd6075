//! Attaching attributes to categories.

use std::sync::Arc;

use catadmin_core::attribute::{
    Attribute, AttributeApi, CategoryAttribute, CategoryAttributeApi, CategoryAttributePayload,
};
use catadmin_core::category::{Category, CategoryApi, CategoryForest, HierarchyEntry};
use catadmin_core::error::{AdminError, Result};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::ListState;

const LOAD_FAILED: &str = "Failed to load data";
const ASSIGNED_LOAD_FAILED: &str = "Failed to load category attributes";

#[derive(Debug, Clone, Default)]
pub struct CategoryAttributesState {
    pub categories: ListState<Category>,
    pub attributes: Vec<Attribute>,
    pub selected: Option<i64>,
    /// Associations of the selected category.
    pub assigned: Vec<CategoryAttribute>,
    pub search: String,
    pub error: Option<String>,
}

pub struct CategoryAttributesScreen {
    categories: Arc<dyn CategoryApi>,
    attributes: Arc<dyn AttributeApi>,
    pivots: Arc<dyn CategoryAttributeApi>,
    state: RwLock<CategoryAttributesState>,
}

impl CategoryAttributesScreen {
    pub fn new(
        categories: Arc<dyn CategoryApi>,
        attributes: Arc<dyn AttributeApi>,
        pivots: Arc<dyn CategoryAttributeApi>,
    ) -> Self {
        Self {
            categories,
            attributes,
            pivots,
            state: RwLock::new(CategoryAttributesState::default()),
        }
    }

    pub async fn state(&self) -> CategoryAttributesState {
        self.state.read().await.clone()
    }

    /// Loads categories and attributes concurrently; either failing fails
    /// the load and keeps the previous lists.
    pub async fn load(&self) -> Result<()> {
        self.state.write().await.categories.begin();
        let (categories, attributes) = tokio::join!(
            self.categories.list_categories(),
            self.attributes.list_attributes()
        );

        let mut state = self.state.write().await;
        match (categories, attributes) {
            (Ok(categories), Ok(attributes)) => {
                state.attributes = attributes;
                state.categories.finish(Ok(categories), LOAD_FAILED)
            }
            (Err(e), _) | (_, Err(e)) => state.categories.finish(Err(e), LOAD_FAILED),
        }
    }

    pub async fn set_search(&self, term: impl Into<String>) {
        self.state.write().await.search = term.into();
    }

    /// Full hierarchy with `──` labels, filtered by name (not
    /// ancestor-inclusive).
    pub async fn category_entries(&self) -> Result<Vec<HierarchyEntry>> {
        let state = self.state.read().await;
        let needle = state.search.to_lowercase();
        let entries = CategoryForest::new(&state.categories.items)?.hierarchical();
        Ok(entries
            .into_iter()
            .filter(|e| e.category.display_name().to_lowercase().contains(&needle))
            .collect())
    }

    /// Selects a category and loads its attributes.
    pub async fn select_category(&self, category_id: i64) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.selected = Some(category_id);
            state.assigned.clear();
        }
        self.load_assigned().await
    }

    /// Attributes not yet attached to the selected category.
    pub async fn available_attributes(&self) -> Vec<Attribute> {
        let state = self.state.read().await;
        state
            .attributes
            .iter()
            .filter(|a| !state.assigned.iter().any(|ca| ca.attribute_id() == Some(a.id)))
            .cloned()
            .collect()
    }

    /// Creates an association for the selected category, or updates
    /// `editing` when given.
    pub async fn save(
        &self,
        editing: Option<&CategoryAttribute>,
        payload: &CategoryAttributePayload,
    ) -> Result<()> {
        let category_id = self.selected().await?;
        match editing {
            Some(existing) => {
                self.pivots
                    .update_category_attribute(existing.pivot_id(), payload)
                    .await?
            }
            None => self.pivots.attach_attribute(category_id, payload).await?,
        }
        self.refetch_assigned().await;
        Ok(())
    }

    /// Detaches the association `pivot_id` from the selected category.
    ///
    /// Removal goes through the (category, attribute) pair. An id that is
    /// not in the current list is ignored.
    pub async fn remove(&self, pivot_id: i64) -> Result<()> {
        let category_id = self.selected().await?;
        let attribute_id = {
            let state = self.state.read().await;
            state
                .assigned
                .iter()
                .find(|ca| ca.id == pivot_id)
                .and_then(CategoryAttribute::attribute_id)
        };
        let Some(attribute_id) = attribute_id else {
            debug!(pivot_id, "No attached attribute to remove");
            return Ok(());
        };

        self.pivots.detach_attribute(category_id, attribute_id).await?;
        self.refetch_assigned().await;
        Ok(())
    }

    /// Deletes the association row `pivot_id` directly.
    pub async fn delete_pivot(&self, pivot_id: i64) -> Result<()> {
        self.selected().await?;
        self.pivots.delete_category_attribute(pivot_id).await?;
        self.refetch_assigned().await;
        Ok(())
    }

    async fn selected(&self) -> Result<i64> {
        self.state
            .read()
            .await
            .selected
            .ok_or_else(|| AdminError::validation("Select a category first"))
    }

    async fn load_assigned(&self) -> Result<()> {
        let category_id = self.selected().await?;
        let result = self.pivots.list_category_attributes(category_id).await;

        let mut state = self.state.write().await;
        if state.selected != Some(category_id) {
            return Ok(());
        }
        match result {
            Ok(assigned) => {
                state.assigned = assigned;
                state.error = None;
                Ok(())
            }
            Err(e) => {
                warn!(category_id, error = %e, "Failed to load category attributes");
                state.error = Some(e.display_message(ASSIGNED_LOAD_FAILED));
                Err(e)
            }
        }
    }

    async fn refetch_assigned(&self) {
        if let Err(e) = self.load_assigned().await {
            debug!(error = %e, "Refetch of category attributes failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{MockBackend, attribute, cat};
    use catadmin_core::attribute::AttributeType;

    fn backend() -> Arc<MockBackend> {
        let backend = MockBackend::with_categories(vec![
            cat(1, None, "Vehicles", 0),
            cat(2, Some(1), "Cars", 0),
            cat(3, None, "Property", 0),
        ]);
        *backend.attributes.lock().unwrap() = vec![
            attribute(10, "Fuel", AttributeType::Select),
            attribute(11, "Year", AttributeType::Number),
        ];
        Arc::new(backend)
    }

    fn screen(api: &Arc<MockBackend>) -> CategoryAttributesScreen {
        CategoryAttributesScreen::new(api.clone(), api.clone(), api.clone())
    }

    #[tokio::test]
    async fn test_entries_filter_by_name() {
        let api = backend();
        let screen = screen(&api);
        screen.load().await.unwrap();

        let labels: Vec<String> = screen
            .category_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, vec!["Vehicles", "── Cars", "Property"]);

        screen.set_search("CAR").await;
        let ids: Vec<i64> = screen
            .category_entries()
            .await
            .unwrap()
            .iter()
            .map(|e| e.category.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_save_requires_selection() {
        let api = backend();
        let screen = screen(&api);
        screen.load().await.unwrap();

        let payload = CategoryAttributePayload {
            attribute_id: 10,
            ..CategoryAttributePayload::default()
        };
        let err = screen.save(None, &payload).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_attach_update_and_remove() {
        let api = backend();
        let screen = screen(&api);
        screen.load().await.unwrap();
        screen.select_category(2).await.unwrap();

        let payload = CategoryAttributePayload {
            attribute_id: 10,
            is_required: true,
            ..CategoryAttributePayload::default()
        };
        screen.save(None, &payload).await.unwrap();

        let assigned = screen.state().await.assigned;
        assert_eq!(assigned.len(), 1);
        let available: Vec<i64> = screen.available_attributes().await.iter().map(|a| a.id).collect();
        assert_eq!(available, vec![11]);

        let edited = CategoryAttributePayload {
            sort_order: 4,
            ..payload.clone()
        };
        screen.save(Some(&assigned[0]), &edited).await.unwrap();
        assert_eq!(screen.state().await.assigned[0].sort_order, 4);

        screen.remove(assigned[0].id).await.unwrap();
        assert!(screen.state().await.assigned.is_empty());

        // unknown pivot ids are ignored
        screen.remove(999).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                "POST /admin/categories/2/attributes 10",
                "PATCH /admin/category-attributes/1",
                "DELETE /admin/categories/2/attributes/10",
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_pivot_by_row_id() {
        let api = backend();
        let screen = screen(&api);
        screen.load().await.unwrap();
        screen.select_category(1).await.unwrap();

        let payload = CategoryAttributePayload {
            attribute_id: 11,
            ..CategoryAttributePayload::default()
        };
        screen.save(None, &payload).await.unwrap();
        let pivot_id = screen.state().await.assigned[0].id;

        screen.delete_pivot(pivot_id).await.unwrap();
        assert!(screen.state().await.assigned.is_empty());
        assert_eq!(
            api.calls().last().map(String::as_str),
            Some(format!("DELETE /admin/category-attributes/{}", pivot_id).as_str())
        );
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_lists() {
        let api = backend();
        let screen = screen(&api);
        screen.load().await.unwrap();

        *api.fail_lists.lock().unwrap() = Some(AdminError::network("down"));
        assert!(screen.load().await.is_err());

        let state = screen.state().await;
        assert_eq!(state.categories.items.len(), 3);
        assert_eq!(state.attributes.len(), 2);
        assert_eq!(state.categories.error.as_deref(), Some(LOAD_FAILED));
    }
}
