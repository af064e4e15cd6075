//! User domain model.

use serde::{Deserialize, Serialize};

/// Ability tag that unlocks every admin screen.
pub const ADMIN_ABILITY: &str = "admin";

/// A console user as returned by `/auth/me` and `/admin/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Capability tags granted to this user.
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl User {
    /// Whether this user holds the `admin` ability.
    pub fn is_admin(&self) -> bool {
        self.abilities.iter().any(|a| a == ADMIN_ABILITY)
    }
}

/// Editable user fields (`PATCH /admin/users/{id}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
