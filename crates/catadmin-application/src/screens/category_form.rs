//! Stand-alone create/edit form behind `CategoryNew` and `CategoryEdit`.

use std::sync::Arc;

use catadmin_core::Route;
use catadmin_core::category::{Category, CategoryApi, CategoryForest, CategoryPayload, ParentOption};
use catadmin_core::error::Result;
use tokio::sync::RwLock;

use super::categories::validate;

#[derive(Debug, Clone, Default)]
pub struct CategoryFormState {
    pub payload: CategoryPayload,
    /// Every category, used to build the parent picker.
    pub categories: Vec<Category>,
    pub error: Option<String>,
}

pub struct CategoryFormScreen {
    api: Arc<dyn CategoryApi>,
    editing: Option<i64>,
    state: RwLock<CategoryFormState>,
}

impl CategoryFormScreen {
    /// A form for a new category.
    pub fn create(api: Arc<dyn CategoryApi>) -> Self {
        Self::with_target(api, None)
    }

    /// A form editing category `id`.
    pub fn edit(api: Arc<dyn CategoryApi>, id: i64) -> Self {
        Self::with_target(api, Some(id))
    }

    fn with_target(api: Arc<dyn CategoryApi>, editing: Option<i64>) -> Self {
        Self {
            api,
            editing,
            state: RwLock::new(CategoryFormState::default()),
        }
    }

    /// Route this form is mounted at.
    pub fn route(&self) -> Route {
        match self.editing {
            Some(id) => Route::CategoryEdit(id),
            None => Route::CategoryNew,
        }
    }

    pub async fn state(&self) -> CategoryFormState {
        self.state.read().await.clone()
    }

    /// Loads the parent candidates and, when editing, pre-fills the form.
    pub async fn load(&self) -> Result<()> {
        let categories = self.api.list_categories().await;
        let existing = match self.editing {
            Some(id) => Some(self.api.get_category(id).await),
            None => None,
        };

        let outcome = categories.and_then(|categories| Ok((categories, existing.transpose()?)));

        let mut state = self.state.write().await;
        match outcome {
            Ok((categories, existing)) => {
                state.categories = categories;
                if let Some(existing) = existing {
                    state.payload = CategoryPayload::from(&existing);
                }
                state.error = None;
                Ok(())
            }
            Err(e) => {
                state.error = Some(e.display_message("Failed to load category"));
                Err(e)
            }
        }
    }

    pub async fn set_payload(&self, payload: CategoryPayload) {
        self.state.write().await.payload = payload;
    }

    /// Parent picker options; the edited category and its subtree are excluded.
    pub async fn parent_options(&self) -> Result<Vec<ParentOption>> {
        let state = self.state.read().await;
        Ok(CategoryForest::new(&state.categories)?.parent_options(self.editing))
    }

    /// Submits the form. Returns the route to continue to.
    pub async fn save(&self) -> Result<Route> {
        let payload = self.state.read().await.payload.clone();
        let result = match validate(&payload) {
            Ok(()) => match self.editing {
                Some(id) => self.api.update_category(id, &payload).await,
                None => self.api.create_category(&payload).await,
            },
            Err(e) => Err(e),
        };

        let mut state = self.state.write().await;
        match result {
            Ok(()) => {
                state.error = None;
                Ok(Route::Categories)
            }
            Err(e) => {
                state.error = Some(e.display_message("Failed to save category"));
                Err(e)
            }
        }
    }
}
