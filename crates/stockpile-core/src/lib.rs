//! stockpile-core - offline-first client for a remote product inventory API.
//!
//! The pieces, leaves first:
//!
//! - [`cache`]: one JSON snapshot of the inventory under a fixed key
//! - [`api`]: the REST client (`list`, `fetch_one`, `create`, `update`, `remove`)
//! - [`inventory`]: the in-memory ordered product list
//! - [`sync`]: the controller tying them together
//!
//! On startup the controller hydrates from the cache when it holds data and
//! from the network otherwise. Each mutation calls the API first, then
//! updates the inventory, then rewrites the whole cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod inventory;
pub mod models;
pub mod sync;
pub mod utils;

pub use api::{ApiClient, ApiError, ProductApi};
pub use cache::{CacheError, CacheStore, FileStorage, MemoryStorage, Storage};
pub use config::Config;
pub use inventory::{Inventory, InventoryError};
pub use models::{Product, ProductDraft};
pub use sync::{
    HydrationReport, HydrationSource, InventoryView, Operation, Outcome, PendingEdit, Severity,
    SyncController, SyncState, ViewChange,
};
