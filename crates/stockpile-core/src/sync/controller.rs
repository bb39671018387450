use tracing::{debug, error, info, warn};

use super::outcome::{Operation, Outcome, PendingEdit};
use super::view::{InventoryView, ViewChange};
use crate::api::ProductApi;
use crate::cache::{CacheError, CacheStore, Storage};
use crate::inventory::Inventory;
use crate::models::{Product, ProductDraft};

/// Number of products requested when hydrating from the network.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Hydrating,
    /// Accepting operations. `degraded` is set when hydration failed and the
    /// inventory was left empty.
    Ready { degraded: bool },
    Mutating(Operation),
}

/// Where hydration got its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationSource {
    Cache,
    Network,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationReport {
    pub source: HydrationSource,
    pub count: usize,
}

/// Orchestrates the remote API, the cache store and the in-memory inventory.
///
/// All operations take `&mut self`: one operation runs to completion
/// (network, inventory, cache) before the next can start. On any failure the
/// inventory and the cache are left exactly as they were.
pub struct SyncController<A, S, V> {
    api: A,
    cache: CacheStore<S>,
    inventory: Inventory,
    view: V,
    state: SyncState,
    degraded: bool,
    list_limit: u32,
}

impl<A, S, V> SyncController<A, S, V>
where
    A: ProductApi,
    S: Storage,
    V: InventoryView,
{
    pub fn new(api: A, cache: CacheStore<S>, view: V) -> Self {
        Self {
            api,
            cache,
            inventory: Inventory::new(),
            view,
            state: SyncState::Uninitialized,
            degraded: false,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    pub fn with_list_limit(mut self, limit: u32) -> Self {
        self.list_limit = limit;
        self
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn products(&self) -> &[Product] {
        self.inventory.as_slice()
    }

    pub fn count(&self) -> usize {
        self.inventory.len()
    }

    pub fn cache(&self) -> &CacheStore<S> {
        &self.cache
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    // =========================================================================
    // Hydration
    // =========================================================================

    /// Populate the inventory, preferring the cache over the network.
    ///
    /// A non-empty cache is used as-is without contacting the API. Otherwise
    /// the first page is fetched and written to both the inventory and the
    /// cache. A network failure leaves an empty, degraded inventory.
    pub async fn hydrate(&mut self) -> HydrationReport {
        self.state = SyncState::Hydrating;

        if let Some(products) = self.cache.load().filter(|p| !p.is_empty()) {
            self.inventory.replace_all(products);
            info!(count = self.inventory.len(), "Hydrated inventory from cache");
            return self.finish_hydration(HydrationSource::Cache);
        }

        match self.api.list(self.list_limit).await {
            Ok(products) => {
                self.inventory.replace_all(products);
                if let Err(e) = self.cache.save(self.inventory.as_slice()) {
                    warn!(error = %e, "Failed to seed product cache");
                }
                info!(count = self.inventory.len(), "Hydrated inventory from network");
                self.finish_hydration(HydrationSource::Network)
            }
            Err(e) => {
                error!(error = %e, "Failed to load products");
                self.inventory.replace_all(Vec::new());
                let message = format!("Failed to load products: {}", e);
                self.view.on_change(ViewChange::LoadFailed(&message));
                self.finish_hydration(HydrationSource::Failed { message })
            }
        }
    }

    fn finish_hydration(&mut self, source: HydrationSource) -> HydrationReport {
        self.degraded = matches!(source, HydrationSource::Failed { .. });
        self.state = SyncState::Ready {
            degraded: self.degraded,
        };
        if !self.degraded {
            self.view.on_change(ViewChange::Reset(self.inventory.as_slice()));
        }
        self.view.on_change(ViewChange::Count(self.inventory.len()));
        HydrationReport {
            source,
            count: self.inventory.len(),
        }
    }

    /// Drop the cache and hydrate again from the network.
    pub async fn reload(&mut self) -> Result<HydrationReport, CacheError> {
        self.cache.clear()?;
        self.state = SyncState::Uninitialized;
        Ok(self.hydrate().await)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a product remotely and add it locally under a synthetic id.
    ///
    /// The remote API does not persist created records, so the id it returns
    /// is discarded in favour of `Inventory::next_synthetic_id`.
    pub async fn add(&mut self, draft: ProductDraft) -> Outcome {
        if let Err(outcome) = self.begin(Operation::Add) {
            return outcome;
        }
        if let Err(e) = draft.validate() {
            return self.finish(Outcome::failure(Operation::Add, format!("Cannot add product: {}", e)));
        }
        let Some(id) = self.inventory.next_synthetic_id() else {
            warn!("Synthetic id space exhausted");
            return self.finish(Outcome::failure(
                Operation::Add,
                "Cannot add product: no identifier is left above the largest existing id",
            ));
        };

        let outcome = match self.api.create(&draft).await {
            Ok(created) => {
                debug!(remote_id = created.id, id, "Assigning synthetic id");
                let product = Product::from_draft(id, draft);
                let mut next = self.inventory.clone();
                match next.insert(product.clone()) {
                    Ok(()) => match self.commit(Operation::Add, next) {
                        Ok(()) => {
                            self.view.on_change(ViewChange::Inserted(&product));
                            self.emit_count();
                            Outcome::success(Operation::Add, format!("Added \"{}\"", product.title))
                        }
                        Err(outcome) => outcome,
                    },
                    Err(e) => Outcome::failure(Operation::Add, format!("Failed to add product: {}", e)),
                }
            }
            Err(e) => {
                warn!(error = %e, "Remote create failed");
                Outcome::failure(Operation::Add, format!("Failed to add product: {}", e))
            }
        };
        self.finish(outcome)
    }

    /// Start editing the product with `id`, pre-populated from the inventory.
    ///
    /// No network call is made: the remote API does not hold locally
    /// created records, so the inventory is the only reliable copy.
    pub fn begin_edit(&self, id: i64) -> Option<PendingEdit> {
        self.inventory.find(id).map(|product| PendingEdit {
            id,
            draft: product.to_draft(),
        })
    }

    /// Send an edit to the API and apply it locally on success.
    pub async fn submit_edit(&mut self, edit: PendingEdit) -> Outcome {
        if let Err(outcome) = self.begin(Operation::Update) {
            return outcome;
        }
        let PendingEdit { id, draft } = edit;

        if self.inventory.find(id).is_none() {
            return self.finish(Outcome::failure(Operation::Update, format!("No product with id {}", id)));
        }
        if let Err(e) = draft.validate() {
            return self.finish(Outcome::failure(Operation::Update, format!("Cannot update product: {}", e)));
        }

        let outcome = match self.api.update(id, &draft).await {
            Ok(_) => {
                let product = Product::from_draft(id, draft);
                let mut next = self.inventory.clone();
                next.replace(id, product.clone());
                match self.commit(Operation::Update, next) {
                    Ok(()) => {
                        self.view.on_change(ViewChange::Replaced(&product));
                        self.emit_count();
                        Outcome::success(Operation::Update, format!("Updated \"{}\"", product.title))
                    }
                    Err(outcome) => outcome,
                }
            }
            Err(e) => {
                warn!(id, error = %e, "Remote update failed");
                Outcome::failure(Operation::Update, format!("Failed to update product {}: {}", id, e))
            }
        };
        self.finish(outcome)
    }

    /// Delete a product remotely and drop it locally on success.
    pub async fn delete(&mut self, id: i64) -> Outcome {
        if let Err(outcome) = self.begin(Operation::Delete) {
            return outcome;
        }
        if self.inventory.find(id).is_none() {
            return self.finish(Outcome::failure(Operation::Delete, format!("No product with id {}", id)));
        }

        let outcome = match self.api.remove(id).await {
            Ok(()) => {
                let mut next = self.inventory.clone();
                match next.remove_by_id(id) {
                    Some(removed) => match self.commit(Operation::Delete, next) {
                        Ok(()) => {
                            self.view.on_change(ViewChange::Removed(id));
                            self.emit_count();
                            Outcome::success(Operation::Delete, format!("Deleted \"{}\"", removed.title))
                        }
                        Err(outcome) => outcome,
                    },
                    None => Outcome::failure(Operation::Delete, format!("No product with id {}", id)),
                }
            }
            Err(e) => {
                warn!(id, error = %e, "Remote delete failed");
                Outcome::failure(Operation::Delete, format!("Failed to delete product {}: {}", id, e))
            }
        };
        self.finish(outcome)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn begin(&mut self, operation: Operation) -> Result<(), Outcome> {
        let state = self.state;
        match state {
            SyncState::Ready { .. } => {
                self.state = SyncState::Mutating(operation);
                Ok(())
            }
            _ => {
                warn!(?state, %operation, "Operation rejected before inventory is ready");
                let outcome = Outcome::failure(operation, "Products have not been loaded yet");
                self.view.on_change(ViewChange::Notify(&outcome));
                Err(outcome)
            }
        }
    }

    /// Persist `next` to the cache and only then make it the live inventory.
    ///
    /// When the write fails the inventory keeps its previous contents, so
    /// it still matches what the cache holds.
    fn commit(&mut self, operation: Operation, next: Inventory) -> Result<(), Outcome> {
        if let Err(e) = self.cache.save(next.as_slice()) {
            error!(error = %e, %operation, "Failed to update product cache");
            return Err(Outcome::failure(
                operation,
                format!("Failed to {} product: the local cache could not be updated: {}", operation, e),
            ));
        }
        self.inventory = next;
        Ok(())
    }

    fn emit_count(&mut self) {
        self.view.on_change(ViewChange::Count(self.inventory.len()));
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        self.state = SyncState::Ready {
            degraded: self.degraded,
        };
        self.view.on_change(ViewChange::Notify(&outcome));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;
    use crate::ApiError;
    use async_trait::async_trait;

    /// API that must never be called.
    struct UnreachableApi;

    #[async_trait]
    impl ProductApi for UnreachableApi {
        async fn list(&self, _limit: u32) -> Result<Vec<Product>, ApiError> {
            panic!("list should not be called")
        }
        async fn fetch_one(&self, _id: i64) -> Result<Product, ApiError> {
            panic!("fetch_one should not be called")
        }
        async fn create(&self, _draft: &ProductDraft) -> Result<Product, ApiError> {
            panic!("create should not be called")
        }
        async fn update(&self, _id: i64, _draft: &ProductDraft) -> Result<Product, ApiError> {
            panic!("update should not be called")
        }
        async fn remove(&self, _id: i64) -> Result<(), ApiError> {
            panic!("remove should not be called")
        }
    }

    fn cached_controller() -> SyncController<UnreachableApi, MemoryStorage, ()> {
        let mut cache = CacheStore::new(MemoryStorage::new());
        cache
            .save(&[Product {
                id: 5,
                title: "Stapler".to_string(),
                description: None,
                price: 4.0,
                category: "office".to_string(),
                thumbnail: "s".to_string(),
            }])
            .unwrap();
        SyncController::new(UnreachableApi, cache, ())
    }

    #[tokio::test]
    async fn test_mutation_before_hydration_is_rejected() {
        let mut controller = cached_controller();
        assert_eq!(controller.state(), SyncState::Uninitialized);

        let outcome = controller.delete(5).await;
        assert!(!outcome.is_success());
        assert_eq!(controller.state(), SyncState::Uninitialized);
    }

    #[tokio::test]
    async fn test_begin_edit_reads_from_inventory() {
        let mut controller = cached_controller();
        controller.hydrate().await;

        let edit = controller.begin_edit(5).unwrap();
        assert_eq!(edit.id, 5);
        assert_eq!(edit.draft.title, "Stapler");
        assert!(controller.begin_edit(6).is_none());
    }

    #[tokio::test]
    async fn test_unknown_ids_fail_without_network() {
        let mut controller = cached_controller();
        controller.hydrate().await;

        let outcome = controller.delete(42).await;
        assert!(!outcome.is_success());
        assert_eq!(outcome.operation, Operation::Delete);

        let outcome = controller
            .submit_edit(PendingEdit {
                id: 42,
                draft: ProductDraft {
                    title: "Ghost".to_string(),
                    ..Default::default()
                },
            })
            .await;
        assert!(!outcome.is_success());
        assert_eq!(controller.state(), SyncState::Ready { degraded: false });
        assert_eq!(controller.count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_fails_without_network() {
        let mut controller = cached_controller();
        controller.hydrate().await;

        let outcome = controller
            .add(ProductDraft {
                title: String::new(),
                price: 1.0,
                ..Default::default()
            })
            .await;
        assert!(!outcome.is_success());
        assert!(outcome.message.contains("Title"));
        assert_eq!(controller.count(), 1);
    }
}
