//! REST API client module for the remote product service.
//!
//! `ProductApi` is the seam the sync controller talks to; `ApiClient` is the
//! `reqwest` implementation against a fixed base URL:
//!
//! | operation   | request                  |
//! |-------------|--------------------------|
//! | `list`      | `GET /products?limit=N`  |
//! | `fetch_one` | `GET /products/{id}`     |
//! | `create`    | `POST /products/add`     |
//! | `update`    | `PUT /products/{id}`     |
//! | `remove`    | `DELETE /products/{id}`  |
//!
//! Any 2xx status is success. There is no retry and no authentication.

pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::models::{Product, ProductDraft};

pub use client::ApiClient;
pub use error::ApiError;

/// Remote product operations. Each call performs exactly one round-trip.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// Fetch the first `limit` products.
    async fn list(&self, limit: u32) -> Result<Vec<Product>, ApiError>;

    async fn fetch_one(&self, id: i64) -> Result<Product, ApiError>;

    /// Create a product. The returned identifier is not durable.
    async fn create(&self, draft: &ProductDraft) -> Result<Product, ApiError>;

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Product, ApiError>;

    async fn remove(&self, id: i64) -> Result<(), ApiError>;
}
