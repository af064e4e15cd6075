//! Session state and partial updates.

use std::collections::BTreeSet;

use crate::auth::AuthPayload;
use crate::user::User;

/// Client-held authentication state.
///
/// An empty `token` means unauthenticated. `user` may lag the token: it is
/// only filled by login/register or an explicit profile fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub abilities: BTreeSet<String>,
    pub user: Option<User>,
}

impl Session {
    /// The signed-out state.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// True iff `tag` is one of the current abilities.
    pub fn has_ability(&self, tag: &str) -> bool {
        self.abilities.contains(tag)
    }
}

/// Partial replacement applied by `set_session`.
///
/// The token is always replaced. `abilities` and `user` are only replaced
/// when provided; `user: Some(None)` explicitly clears the profile while
/// `user: None` keeps whatever was there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub token: String,
    pub abilities: Option<Vec<String>>,
    pub user: Option<Option<User>>,
}

impl SessionUpdate {
    /// An update that only replaces the token.
    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn with_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abilities = Some(abilities.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(Some(user));
        self
    }

    /// Explicitly clear the stored profile.
    pub fn without_user(mut self) -> Self {
        self.user = Some(None);
        self
    }

    /// Applies this update on top of `current`.
    pub fn apply_to(&self, current: &Session) -> Session {
        Session {
            token: self.token.clone(),
            abilities: match &self.abilities {
                Some(abilities) => abilities.iter().cloned().collect(),
                None => current.abilities.clone(),
            },
            user: match &self.user {
                Some(user) => user.clone(),
                None => current.user.clone(),
            },
        }
    }
}

impl From<AuthPayload> for SessionUpdate {
    /// An absent `abilities`/`user` in the payload keeps the prior value.
    fn from(payload: AuthPayload) -> Self {
        Self {
            token: payload.token,
            abilities: payload.abilities,
            user: payload.user.map(Some),
        }
    }
}
