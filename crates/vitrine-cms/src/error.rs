use thiserror::Error;

/// Errors returned by the content API client.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The content API answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A URL (base or continuation) could not be parsed.
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A continuation URL points at a different host than the configured
    /// content API. Cursors are fetched verbatim, so following one to an
    /// arbitrary origin is refused.
    #[error("continuation URL {url} does not point at the content host")]
    ForeignCursor { url: String },
}
