use thiserror::Error;

use vitrine_cms::CmsError;

/// Errors returned by listing pagination and detail resolution.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product document carries the requested slug.
    #[error("no product document for slug \"{slug}\"")]
    NotFound { slug: String },

    /// The content API could not be fetched or its response not parsed.
    #[error("content fetch failed: {source}")]
    FetchFailed {
        #[from]
        source: CmsError,
    },

    /// A listing continuation was requested after the cursor was exhausted.
    #[error("no further pages: the listing cursor is exhausted")]
    PreconditionFailed,
}
