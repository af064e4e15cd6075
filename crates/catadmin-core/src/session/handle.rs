//! Shared, observable session state backed by durable storage.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::model::{Session, SessionUpdate};
use crate::error::Result;
use crate::storage::{ABILITIES_KEY, KeyValueStore, TOKEN_KEY};
use crate::user::User;

/// Cheaply cloneable handle to the process-wide session.
///
/// Every clone observes the same state. Mutations persist `token` and
/// `abilities` to the [`KeyValueStore`] before (set) or alongside (clear) the
/// in-memory change, and notify all [`subscribe`](Self::subscribe) receivers.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<Session>,
    storage: Arc<dyn KeyValueStore>,
}

impl SessionHandle {
    /// Builds the initial session from durable storage.
    ///
    /// Missing keys hydrate as an empty token / empty ability set. Unreadable
    /// storage and a corrupt `abilities` entry are logged and treated as
    /// empty too. The user profile is never persisted and always starts as
    /// `None`.
    pub fn hydrate(storage: Arc<dyn KeyValueStore>) -> Self {
        let token = read_key(storage.as_ref(), TOKEN_KEY).unwrap_or_default();
        let abilities = match read_key(storage.as_ref(), ABILITIES_KEY) {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unreadable persisted abilities");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let session = Session {
            token,
            abilities: abilities.into_iter().collect(),
            user: None,
        };
        info!(
            authenticated = session.is_authenticated(),
            abilities = session.abilities.len(),
            "Session hydrated from storage"
        );

        let (state, _) = watch::channel(session);
        Self {
            inner: Arc::new(Inner { state, storage }),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Current bearer token (empty when signed out).
    pub fn token(&self) -> String {
        self.inner.state.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// True iff `tag` is in the current ability set. Never errors.
    pub fn has_ability(&self, tag: &str) -> bool {
        self.inner.state.borrow().has_ability(tag)
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user.clone()
    }

    /// Receiver notified after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Applies a partial update.
    ///
    /// A non-empty token and any supplied ability list are written to storage
    /// first; if that fails the in-memory session is left untouched.
    pub fn set_session(&self, update: SessionUpdate) -> Result<()> {
        let storage = &self.inner.storage;
        if !update.token.is_empty() {
            storage.set(TOKEN_KEY, &update.token)?;
        }
        if let Some(abilities) = &update.abilities {
            storage.set(ABILITIES_KEY, &serde_json::to_string(abilities)?)?;
        }

        self.inner.state.send_modify(|session| {
            *session = update.apply_to(session);
        });

        let session = self.inner.state.borrow();
        info!(
            authenticated = session.is_authenticated(),
            abilities = session.abilities.len(),
            has_user = session.user.is_some(),
            "Session updated"
        );
        Ok(())
    }

    /// Replaces only the cached profile.
    pub fn set_user(&self, user: Option<User>) {
        self.inner.state.send_modify(|session| session.user = user);
    }

    /// Signs out locally.
    ///
    /// The in-memory session is always reset. Both storage keys are removed
    /// even if the first removal fails; the first storage error is returned.
    pub fn clear_session(&self) -> Result<()> {
        self.inner.state.send_modify(|session| *session = Session::empty());

        let storage = &self.inner.storage;
        let token_result = storage.remove(TOKEN_KEY);
        let abilities_result = storage.remove(ABILITIES_KEY);

        info!("Session cleared");
        token_result.and(abilities_result)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.state.borrow();
        f.debug_struct("SessionHandle")
            .field("authenticated", &session.is_authenticated())
            .field("abilities", &session.abilities)
            .field("user", &session.user.as_ref().map(|u| u.id))
            .finish()
    }
}

fn read_key(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    storage.get(key).unwrap_or_else(|e| {
        warn!(key, error = %e, "Ignoring unreadable session storage");
        None
    })
}
