//! User domain module.
//!
//! - `model`: user records as returned by the admin endpoints
//! - `api`: backend operations on users

mod api;
mod model;

pub use api::UserApi;
pub use model::{ADMIN_ABILITY, User, UserUpdate};
