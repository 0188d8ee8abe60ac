//! Single-document resolution by slug.

use std::sync::Arc;

use vitrine_cms::CmsClient;
use vitrine_core::Product;

use crate::error::CatalogError;
use crate::listing::{LISTING_FETCH_FIELDS, PRODUCT_DOC_TYPE};
use crate::project::project;

/// Resolves individual product documents by their uid.
///
/// Stateless; safe to call concurrently for any mix of slugs.
#[derive(Clone)]
pub struct DetailResolver {
    client: Arc<CmsClient>,
}

impl DetailResolver {
    #[must_use]
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }

    /// Resolves `slug` to its projected product.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] when no document carries that uid.
    /// - [`CatalogError::FetchFailed`] when the lookup itself fails.
    pub async fn resolve(&self, slug: &str) -> Result<Product, CatalogError> {
        match self.client.get_by_uid(PRODUCT_DOC_TYPE, slug).await? {
            Some(document) => Ok(project(&document)),
            None => Err(CatalogError::NotFound {
                slug: slug.to_owned(),
            }),
        }
    }

    /// Enumerates product slugs for pre-building, querying one listing page
    /// of `page_size` documents and collecting their uids.
    ///
    /// Only that single page is taken, so a page size smaller than the
    /// product count under-enumerates; slugs left out are built on first
    /// demand instead of at startup. The reference deployment runs this
    /// with page size 1.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::FetchFailed`] when the query fails.
    pub async fn enumerate_slugs(&self, page_size: u32) -> Result<Vec<String>, CatalogError> {
        let response = self
            .client
            .query(PRODUCT_DOC_TYPE, &LISTING_FETCH_FIELDS, page_size)
            .await?;

        Ok(response
            .results
            .into_iter()
            .filter_map(|document| document.uid)
            .collect())
    }
}
