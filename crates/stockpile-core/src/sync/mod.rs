//! Cache/remote reconciliation.
//!
//! The `SyncController` owns the remote client, the cache store and the
//! in-memory inventory. It decides where hydration reads from and, for
//! every mutation, applies the remote result to the inventory and then
//! rewrites the whole cache. Failures come back as `Outcome` values.

pub mod controller;
pub mod outcome;
pub mod view;

pub use controller::{HydrationReport, HydrationSource, SyncController, SyncState};
pub use outcome::{Operation, Outcome, PendingEdit, Severity};
pub use view::{InventoryView, ViewChange};
