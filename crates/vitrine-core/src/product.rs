//! The `Product` view model shared by the listing and detail pages.

use serde::{Deserialize, Serialize};

use crate::money::format_brl;

/// A projected product, ready for rendering.
///
/// `price_formatted` is derived from `price` at construction and is never
/// set independently; use [`Product::new`] so the two cannot diverge.
/// `description` and `image_url` are populated for the detail view only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The source document's `uid`, stable per document. Doubles as the
    /// slug in `/product/{id}` links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// Currency-agnostic amount, passed through from the document unchanged.
    pub price: f64,
    pub price_formatted: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Builds a product, deriving `price_formatted` from `price`.
    #[must_use]
    pub fn new(
        id: Option<String>,
        title: String,
        price: f64,
        description: Option<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            price,
            price_formatted: format_brl(price),
            description,
            image_url,
        }
    }
}
