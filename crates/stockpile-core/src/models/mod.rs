//! Data models for the product inventory.
//!
//! - `Product`: a record as stored in the inventory and the local cache
//! - `ProductDraft`: the editable field set sent on create/update
//! - `ProductsPage`: the list endpoint's response envelope

pub mod product;

pub use product::{DraftError, Product, ProductDraft, ProductsPage};
