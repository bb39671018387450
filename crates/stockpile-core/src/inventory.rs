//! In-memory product inventory.
//!
//! An ordered list of products, unique by id, that is the source of truth
//! for the current session. Lookups are linear scans; the list is small.

use thiserror::Error;
use tracing::warn;

use crate::models::Product;

/// Identifier handed out when the inventory is empty.
pub const SYNTHETIC_ID_BASELINE: i64 = 101;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("A product with id {0} already exists")]
    DuplicateId(i64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, records: Vec<Product>) {
        let mut products: Vec<Product> = Vec::with_capacity(records.len());
        for record in records {
            if products.iter().any(|p| p.id == record.id) {
                warn!(id = record.id, "Dropping duplicate product id during hydration");
                continue;
            }
            products.push(record);
        }
        self.products = products;
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Append a record.
    pub fn insert(&mut self, record: Product) -> Result<(), InventoryError> {
        if self.find(record.id).is_some() {
            return Err(InventoryError::DuplicateId(record.id));
        }
        self.products.push(record);
        Ok(())
    }

    /// Substitute the record with `id` in place. Returns false if absent.
    pub fn replace(&mut self, id: i64, record: Product) -> bool {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&mut self, id: i64) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    /// One more than the largest id present, or [`SYNTHETIC_ID_BASELINE`] when empty.
    ///
    /// `None` when the largest id is `i64::MAX`.
    pub fn next_synthetic_id(&self) -> Option<i64> {
        match self.products.iter().map(|p| p.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(SYNTHETIC_ID_BASELINE),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }
}
