//! Type-safe key-value persistence for the Silver Spoon storefront.
//!
//! Provides a simple, ergonomic API for storing JSON-serialized values
//! under string keys. Two backends are available: a file-backed store
//! (one file per key under a root directory) for durable session state,
//! and an in-memory store for tests or for running without persistence.
//!
//! # Example
//!
//! ```rust,ignore
//! use spoon_store::Store;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Settings {
//!     delivery_enabled: bool,
//! }
//!
//! let store = Store::open("~/.silver-spoon")?;
//!
//! // Store a value
//! store.set("settings", &Settings { delivery_enabled: true })?;
//!
//! // Retrieve a value
//! let settings: Option<Settings> = store.get("settings")?;
//!
//! // Delete a value
//! store.delete("settings")?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use kv::Store;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, MemoryStore, Store, StoreError};
}
