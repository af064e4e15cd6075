//! Domain core of catadmin.
//!
//! Holds the models, the error type, the traits the outer crates implement
//! (`KeyValueStore`, the `*Api` traits, `Navigator`), and the logic with real
//! invariants: the session container, route guards, and the category tree
//! projector.

pub mod attribute;
pub mod auth;
pub mod category;
pub mod error;
pub mod guard;
pub mod session;
pub mod storage;
pub mod user;
pub mod wire;

pub use error::{AdminError, Result};
pub use guard::{Guard, GuardDecision, Navigator, Route};
pub use session::{Session, SessionHandle, SessionStore, SessionUpdate};
pub use storage::{InMemoryKeyValueStore, KeyValueStore};
