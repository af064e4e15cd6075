//! Authentication exchange with the backend.

mod api;
mod model;

pub use api::AuthApi;
pub use model::{AuthPayload, Credentials, RegisterRequest};
