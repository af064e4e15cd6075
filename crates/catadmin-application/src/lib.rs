//! Application layer for catadmin.
//!
//! The router decides which screen may be mounted for the current session;
//! the screen controllers hold list state and drive the backend APIs.

pub mod router;
pub mod screens;

pub use router::Router;
pub use screens::{
    AdminCategoriesScreen, AttributesScreen, CategoriesScreen, CategoryAttributesScreen,
    CategoryFormScreen, UsersScreen,
};
