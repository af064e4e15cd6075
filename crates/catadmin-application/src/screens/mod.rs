//! Headless screen controllers.
//!
//! Each controller owns the state one admin screen renders: the fetched
//! list, a loading flag and an inline error. A failed load keeps the last
//! list that loaded successfully. Every successful mutation is followed by
//! a refetch, which is the only consistency mechanism with the backend.

mod admin_categories;
mod attributes;
mod categories;
mod category_attributes;
mod category_form;
mod users;

#[cfg(test)]
mod test_support;

pub use admin_categories::AdminCategoriesScreen;
pub use attributes::{AttributeGroup, AttributesScreen, AttributesState, UNASSIGNED_GROUP};
pub use categories::{CategoriesScreen, CategoriesState};
pub use category_attributes::{CategoryAttributesScreen, CategoryAttributesState};
pub use category_form::{CategoryFormScreen, CategoryFormState};
pub use users::UsersScreen;

use catadmin_core::error::Result;

/// A fetched list with its loading flag and inline error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ListState<T> {
    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Installs a load result. On failure the previous items stay and the
    /// error is shown as `fallback` unless the backend sent a message.
    pub(crate) fn finish(&mut self, result: Result<Vec<T>>, fallback: &str) -> Result<()> {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.display_message(fallback));
                Err(e)
            }
        }
    }
}
