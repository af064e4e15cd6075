//! Interactive category table: search, collapsible hierarchy, inline sort
//! editing and CRUD.

use std::collections::HashSet;
use std::sync::Arc;

use catadmin_core::category::tree::table_rows;
use catadmin_core::category::{
    Category, CategoryApi, CategoryForest, CategoryPayload, DisplayNode, ParentOption,
};
use catadmin_core::error::{AdminError, Result};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::ListState;

const LOAD_FAILED: &str = "Failed to load categories";

#[derive(Debug, Clone, Default)]
pub struct CategoriesState {
    pub list: ListState<Category>,
    pub expanded: HashSet<i64>,
    pub search: String,
    /// A sort commit is in flight.
    pub reordering: bool,
}

pub struct CategoriesScreen {
    api: Arc<dyn CategoryApi>,
    state: RwLock<CategoriesState>,
}

impl CategoriesScreen {
    pub fn new(api: Arc<dyn CategoryApi>) -> Self {
        Self {
            api,
            state: RwLock::new(CategoriesState::default()),
        }
    }

    pub async fn state(&self) -> CategoriesState {
        self.state.read().await.clone()
    }

    pub async fn load(&self) -> Result<()> {
        self.state.write().await.list.begin();
        let result = self.api.list_categories().await;
        self.state.write().await.list.finish(result, LOAD_FAILED)
    }

    pub async fn set_search(&self, term: impl Into<String>) {
        self.state.write().await.search = term.into();
    }

    /// Flips the expansion of `id`; returns whether it is now expanded.
    pub async fn toggle(&self, id: i64) -> bool {
        let mut state = self.state.write().await;
        if state.expanded.remove(&id) {
            false
        } else {
            state.expanded.insert(id);
            true
        }
    }

    /// Render-ready rows for the current items, search term and expansion.
    pub async fn rows(&self) -> Result<Vec<DisplayNode>> {
        let state = self.state.read().await;
        table_rows(&state.list.items, &state.search, &state.expanded)
    }

    /// Changes a sort value locally, while the user is still typing.
    pub async fn edit_sort(&self, id: i64, sort: i64) {
        let mut state = self.state.write().await;
        if let Some(category) = state.list.items.iter_mut().find(|c| c.id == id) {
            category.sort = Some(sort);
        }
    }

    /// Persists the locally edited sort value of `id`, then reloads.
    ///
    /// The list is reloaded even when the update fails, discarding the local
    /// edit. Unknown ids are ignored.
    pub async fn commit_sort(&self, id: i64) -> Result<()> {
        let sort = {
            let mut state = self.state.write().await;
            let Some(category) = state.list.items.iter().find(|c| c.id == id) else {
                return Ok(());
            };
            let sort = category.sort_key();
            state.reordering = true;
            sort
        };

        let result = self.api.update_sort(id, sort).await;
        if let Err(e) = &result {
            warn!(id, error = %e, "Failed to update category sort");
        }
        self.refetch().await;
        self.state.write().await.reordering = false;
        result
    }

    pub async fn create(&self, payload: &CategoryPayload) -> Result<()> {
        validate(payload)?;
        self.api.create_category(payload).await?;
        self.refetch().await;
        Ok(())
    }

    pub async fn update(&self, id: i64, payload: &CategoryPayload) -> Result<()> {
        validate(payload)?;
        self.api.update_category(id, payload).await?;
        self.refetch().await;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete_category(id).await?;
        self.refetch().await;
        Ok(())
    }

    /// Parent picker options for a category form; `editing` and its subtree
    /// are excluded.
    pub async fn parent_options(&self, editing: Option<i64>) -> Result<Vec<ParentOption>> {
        let state = self.state.read().await;
        let forest = CategoryForest::new(&state.list.items)?;
        Ok(forest.parent_options(editing))
    }

    /// Reloads after a mutation. A failure is already shown inline.
    async fn refetch(&self) {
        if let Err(e) = self.load().await {
            debug!(error = %e, "Refetch after mutation failed");
        }
    }
}

pub(crate) fn validate(payload: &CategoryPayload) -> Result<()> {
    if payload.is_valid() {
        Ok(())
    } else {
        Err(AdminError::validation(
            "Both the English and the Montenegrin name are required",
        ))
    }
}
