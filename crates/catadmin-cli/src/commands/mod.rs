pub mod attributes;
pub mod auth;
pub mod categories;
pub mod category_attributes;
pub mod users;

pub use attributes::AttributeAction;
pub use auth::AuthAction;
pub use categories::CategoryAction;
pub use category_attributes::CategoryAttributeAction;
pub use users::UserAction;

use catadmin_core::AdminError;

/// Turns a screen error into the message the web console would show inline.
pub fn inline_error(err: AdminError, fallback: &str) -> anyhow::Error {
    anyhow::anyhow!(err.display_message(fallback))
}
