//! Session domain module.
//!
//! - `model`: the session value and partial updates
//! - `handle`: shared observable state persisted to a [`KeyValueStore`](crate::storage::KeyValueStore)
//! - `store`: login/logout/profile operations against the backend

mod handle;
mod model;
mod store;

pub use handle::SessionHandle;
pub use model::{Session, SessionUpdate};
pub use store::SessionStore;
