//! Two-level category overview: roots with their direct children.

use std::sync::Arc;

use catadmin_core::category::{Category, CategoryApi, CategoryForest, IndentedCategory};
use catadmin_core::error::Result;
use tokio::sync::RwLock;
use tracing::debug;

use super::ListState;

const LOAD_FAILED: &str = "Failed to load categories";

pub struct AdminCategoriesScreen {
    api: Arc<dyn CategoryApi>,
    state: RwLock<ListState<Category>>,
}

impl AdminCategoriesScreen {
    pub fn new(api: Arc<dyn CategoryApi>) -> Self {
        Self {
            api,
            state: RwLock::new(ListState::default()),
        }
    }

    pub async fn state(&self) -> ListState<Category> {
        self.state.read().await.clone()
    }

    pub async fn load(&self) -> Result<()> {
        self.state.write().await.begin();
        let result = self.api.list_categories().await;
        self.state.write().await.finish(result, LOAD_FAILED)
    }

    pub async fn rows(&self) -> Result<Vec<IndentedCategory>> {
        let state = self.state.read().await;
        Ok(CategoryForest::new(&state.items)?.flatten_with_indent())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete_category(id).await?;
        if let Err(e) = self.load().await {
            debug!(error = %e, "Refetch after delete failed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::{MockBackend, cat};

    #[tokio::test]
    async fn test_rows_stop_at_first_level() {
        let api = Arc::new(MockBackend::with_categories(vec![
            cat(1, None, "Vehicles", 0),
            cat(2, Some(1), "Cars", 0),
            cat(3, Some(2), "Electric", 0),
            cat(4, None, "Property", 0),
        ]));
        let screen = AdminCategoriesScreen::new(api.clone());
        screen.load().await.unwrap();

        let rows: Vec<(i64, usize)> = screen
            .rows()
            .await
            .unwrap()
            .iter()
            .map(|r| (r.category.id, r.level))
            .collect();
        assert_eq!(rows, vec![(1, 0), (2, 1), (4, 0)]);

        screen.delete(4).await.unwrap();
        assert_eq!(screen.state().await.items.len(), 3);
        assert_eq!(api.calls(), vec!["DELETE /admin/categories/4"]);
    }
}
