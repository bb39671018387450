use crate::models::Product;

use super::Outcome;

/// A change the presentation layer should reflect.
#[derive(Debug, Clone, Copy)]
pub enum ViewChange<'a> {
    /// The whole list was (re)loaded.
    Reset(&'a [Product]),
    Inserted(&'a Product),
    Replaced(&'a Product),
    Removed(i64),
    /// Number of products now held.
    Count(usize),
    Notify(&'a Outcome),
    /// Hydration failed; shown in place of the list rather than as a notification.
    LoadFailed(&'a str),
}

/// Receives changes from the `SyncController`.
///
/// Implementations keep their own mapping from product id to whatever
/// handle they render; the controller only ever passes ids and records.
pub trait InventoryView {
    fn on_change(&mut self, change: ViewChange<'_>);
}

/// Headless: ignores every change.
impl InventoryView for () {
    fn on_change(&mut self, _change: ViewChange<'_>) {}
}
