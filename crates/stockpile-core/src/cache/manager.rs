use tracing::{debug, warn};

use super::storage::{CacheError, Storage};
use crate::models::Product;

/// Storage key holding the serialized product inventory.
pub const CACHE_KEY: &str = "products";

/// Persists the whole inventory as one JSON array under [`CACHE_KEY`].
///
/// There is no envelope, timestamp or version field: the stored value is the
/// array itself. Every save is a full replace.
pub struct CacheStore<S> {
    storage: S,
}

impl<S: Storage> CacheStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the cached inventory, propagating read and parse failures.
    pub fn try_load(&self) -> Result<Option<Vec<Product>>, CacheError> {
        let Some(contents) = self.storage.get(CACHE_KEY)? else {
            return Ok(None);
        };
        let products: Vec<Product> = serde_json::from_str(&contents)?;
        Ok(Some(products))
    }

    /// Load the cached inventory.
    ///
    /// A missing key, an unreadable value and malformed JSON are all reported
    /// as `None`; the caller then falls back to the network.
    pub fn load(&self) -> Option<Vec<Product>> {
        match self.try_load() {
            Ok(Some(products)) => {
                debug!(count = products.len(), "Loaded products from cache");
                Some(products)
            }
            Ok(None) => {
                debug!("No cached products");
                None
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable product cache");
                None
            }
        }
    }

    /// Replace the cached inventory with `products`.
    pub fn save(&mut self, products: &[Product]) -> Result<(), CacheError> {
        let contents = serde_json::to_string_pretty(products)?;
        self.storage.set(CACHE_KEY, &contents)?;
        debug!(count = products.len(), "Saved products to cache");
        Ok(())
    }

    /// Drop the cached inventory so the next hydration goes to the network.
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.storage.remove(CACHE_KEY)
    }
}
