use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::format_price;

/// A product record.
///
/// The remote API returns many more fields (stock, rating, images, ...);
/// only the ones the inventory tracks are kept, the rest are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
}

impl Product {
    /// Build a record from a draft and an identifier.
    pub fn from_draft(id: i64, draft: ProductDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            thumbnail: draft.thumbnail,
        }
    }

    /// The editable fields of this record, used to pre-populate an edit.
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            category: self.category.clone(),
            thumbnail: self.thumbnail.clone(),
        }
    }

    pub fn display_price(&self) -> String {
        format_price(self.price)
    }

    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DraftError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
}

/// Request body for create (`POST /products/add`) and update (`PUT /products/{id}`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ProductDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub thumbnail: String,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DraftError::InvalidPrice(self.price));
        }
        Ok(())
    }
}

/// Response envelope of `GET /products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}
