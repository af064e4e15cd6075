//! Durable storage backends.

mod file_store;

pub use file_store::FileKeyValueStore;
