//! REST access to the catalogue backend.
//!
//! [`ApiClient`] wraps a `reqwest::Client`, attaches the session's bearer
//! token to every request and invalidates the session on HTTP 401. It
//! implements every backend trait from `catadmin-core`.

mod attributes;
mod auth;
mod categories;
pub mod client;
mod users;

pub use client::ApiClient;
