//! Cursor-driven listing pagination.
//!
//! A [`ListingState`] accumulates projected products batch by batch while
//! [`ListingPaginator`] steps it through the content API. Batches are
//! atomic: a failed fetch appends nothing, so the state a caller holds is
//! always a prefix of the listing in fetch order.

use std::sync::Arc;

use vitrine_cms::{CmsClient, QueryResponse};
use vitrine_core::Product;

use crate::error::CatalogError;
use crate::project::project;

/// Document type of catalog products in the content repository.
pub const PRODUCT_DOC_TYPE: &str = "product";

/// Fields projected into listing queries. Detail-only fields (description,
/// image) stay out of the listing payload.
pub const LISTING_FETCH_FIELDS: [&str; 2] = ["product.title", "product.price"];

/// An opaque continuation token: the URL where the listing resumes.
///
/// Issued by a query response, consumed by exactly one continuation fetch,
/// then replaced by the response's own cursor (or retired when the listing
/// is exhausted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    #[must_use]
    pub fn new(url: String) -> Self {
        Self(url)
    }

    #[must_use]
    pub fn as_url(&self) -> &str {
        &self.0
    }
}

/// The accumulated listing: products in fetch order plus the cursor for
/// the next batch.
#[derive(Debug, Default)]
pub struct ListingState {
    products: Vec<Product>,
    cursor: Option<PageCursor>,
}

impl ListingState {
    /// An empty listing with no continuation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A listing resumed from a cursor held elsewhere. The sequence starts
    /// empty: the caller (the browser, in practice) keeps the already
    /// rendered prefix and only the cursor travels back to the server.
    #[must_use]
    pub fn resuming(cursor: PageCursor) -> Self {
        Self {
            products: Vec::new(),
            cursor: Some(cursor),
        }
    }

    /// Products accumulated so far, in fetch order. Duplicates delivered by
    /// the API are kept as delivered.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn cursor(&self) -> Option<&PageCursor> {
        self.cursor.as_ref()
    }

    /// True when no further page can be fetched.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    /// Appends one full batch and replaces the cursor. Only called once the
    /// whole response is in hand, which is what keeps batches atomic.
    fn append_batch(&mut self, response: &QueryResponse) {
        self.products.extend(response.results.iter().map(project));
        self.cursor = response.next_page.clone().map(PageCursor::new);
    }
}

/// Steps a [`ListingState`] through the content API one page at a time.
#[derive(Clone)]
pub struct ListingPaginator {
    client: Arc<CmsClient>,
    page_size: u32,
}

impl ListingPaginator {
    #[must_use]
    pub fn new(client: Arc<CmsClient>, page_size: u32) -> Self {
        Self { client, page_size }
    }

    /// Fetches the first page of the product listing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::FetchFailed`] when the query fails or its
    /// response cannot be parsed.
    pub async fn fetch_first_page(&self) -> Result<ListingState, CatalogError> {
        let response = self
            .client
            .query(PRODUCT_DOC_TYPE, &LISTING_FETCH_FIELDS, self.page_size)
            .await?;

        let mut state = ListingState::new();
        state.append_batch(&response);
        Ok(state)
    }

    /// Fetches the next batch and appends it to `state`.
    ///
    /// On failure `state` is untouched: the cursor stays in place so the
    /// caller can retry the same continuation.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::PreconditionFailed`] when the cursor is already
    ///   exhausted. Checked before any I/O.
    /// - [`CatalogError::FetchFailed`] when the continuation fetch fails or
    ///   its response cannot be parsed.
    pub async fn fetch_next_page(&self, state: &mut ListingState) -> Result<(), CatalogError> {
        let Some(cursor) = state.cursor() else {
            return Err(CatalogError::PreconditionFailed);
        };

        let response = self.client.fetch_page(cursor.as_url()).await?;
        state.append_batch(&response);
        Ok(())
    }
}
