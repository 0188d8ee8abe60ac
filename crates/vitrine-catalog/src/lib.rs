//! Catalog core: view-model projection, listing pagination, and detail-page
//! resolution strategies on top of the content API client.

mod detail;
mod error;
mod listing;
mod pages;
mod project;

pub use detail::DetailResolver;
pub use error::CatalogError;
pub use listing::{
    ListingPaginator, ListingState, PageCursor, LISTING_FETCH_FIELDS, PRODUCT_DOC_TYPE,
};
pub use pages::{PageMode, ProductPages};
pub use project::project;
