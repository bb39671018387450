//! Local caching module for offline data access.
//!
//! This module provides the `CacheStore`, which keeps a single JSON snapshot
//! of the whole product inventory under one fixed key. The snapshot is
//! always replaced in full and never expires.
//!
//! Two storage backends are available:
//! - `FileStorage`: one `<key>.json` file per key in a cache directory
//! - `MemoryStorage`: an in-process map, for tests and embedders

pub mod manager;
pub mod storage;

pub use manager::{CacheStore, CACHE_KEY};
pub use storage::{CacheError, FileStorage, MemoryStorage, Storage};
