//! HTTP client for the content API's document-search endpoint.
//!
//! Wraps `reqwest` with access-token management, typed response
//! deserialization, and continuation-URL handling for paginated listings.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::CmsError;
use crate::types::{Document, QueryResponse};

/// Client for the content API.
///
/// Manages the HTTP client, the public access token, and the API base URL.
/// Point `base_url` at a mock server in tests.
pub struct CmsClient {
    client: Client,
    access_token: String,
    base_url: Url,
    search_url: Url,
}

impl CmsClient {
    /// Creates a new client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`CmsError::InvalidUrl`] if `base_url` is not a
    /// valid URL.
    pub fn new(base_url: &str, access_token: &str, timeout_secs: u64) -> Result<Self, CmsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("vitrine/0.1 (catalog)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join resolves "documents/search" under the API root rather than
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| CmsError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let search_url = parsed
            .join("documents/search")
            .map_err(|e| CmsError::InvalidUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            base_url: parsed,
            search_url,
        })
    }

    /// Queries one page of documents of `document_type`, projecting only the
    /// `fetch` fields into each document's data payload.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure.
    /// - [`CmsError::UnexpectedStatus`] on a non-2xx response.
    /// - [`CmsError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn query(
        &self,
        document_type: &str,
        fetch: &[&str],
        page_size: u32,
    ) -> Result<QueryResponse, CmsError> {
        let predicate = format!("[[at(document.type,\"{document_type}\")]]");
        let fields = fetch.join(",");
        let page_size = page_size.to_string();

        let url = self.build_url(&[
            ("q", &predicate),
            ("fetch", &fields),
            ("pageSize", &page_size),
        ]);
        self.get_json(&url, &format!("query(type={document_type})"))
            .await
    }

    /// Resolves a single document of `document_type` by its `uid`.
    ///
    /// Returns `None` when no document carries that uid; existence is a
    /// content question, not an error. A uid containing `"` cannot be
    /// expressed in the predicate literal and is treated as a miss without
    /// a request.
    ///
    /// # Errors
    ///
    /// - [`CmsError::Http`] on network failure.
    /// - [`CmsError::UnexpectedStatus`] on a non-2xx response.
    /// - [`CmsError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> Result<Option<Document>, CmsError> {
        // A double quote would terminate the predicate literal early.
        if uid.contains('"') {
            return Ok(None);
        }

        let predicate = format!("[[at(my.{document_type}.uid,\"{uid}\")]]");

        let url = self.build_url(&[("q", &predicate), ("pageSize", "1")]);
        let response: QueryResponse = self
            .get_json(&url, &format!("getByUID({document_type}, {uid})"))
            .await?;

        Ok(response.results.into_iter().next())
    }

    /// Follows a continuation URL issued by a previous [`query`] or
    /// `fetch_page` response, appending the access token.
    ///
    /// [`query`]: CmsClient::query
    ///
    /// # Errors
    ///
    /// - [`CmsError::InvalidUrl`] if the continuation does not parse.
    /// - [`CmsError::ForeignCursor`] if it points at a different origin than
    ///   the configured API.
    /// - [`CmsError::Http`] / [`CmsError::UnexpectedStatus`] /
    ///   [`CmsError::Deserialize`] as for [`query`].
    pub async fn fetch_page(&self, next_page_url: &str) -> Result<QueryResponse, CmsError> {
        let mut url = Url::parse(next_page_url).map_err(|e| CmsError::InvalidUrl {
            url: next_page_url.to_owned(),
            reason: e.to_string(),
        })?;

        if url.origin() != self.base_url.origin() {
            return Err(CmsError::ForeignCursor {
                url: next_page_url.to_owned(),
            });
        }

        url.query_pairs_mut()
            .append_pair("access_token", &self.access_token);

        self.get_json(&url, "pagination fetch").await
    }

    /// Builds a search request URL with properly percent-encoded query
    /// parameters: the access token first, then the given pairs, appended
    /// via [`Url::query_pairs_mut`].
    fn build_url(&self, extra: &[(&str, &str)]) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", &self.access_token);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Http`] on network failure,
    /// [`CmsError::UnexpectedStatus`] on a non-2xx status, and
    /// [`CmsError::Deserialize`] if the body is not the expected JSON.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url, context: &str) -> Result<T, CmsError> {
        tracing::debug!(url = %url, "content api request");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CmsError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CmsError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}
