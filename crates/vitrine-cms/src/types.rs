//! Content API response types.
//!
//! All types model the JSON returned by the document-search endpoint. The
//! API wraps every page of results in a `{"results": [...], "next_page":
//! ...}` envelope; [`QueryResponse`] captures that shape. Unknown fields are
//! ignored throughout, so the richer envelopes the API actually sends
//! (tags, slugs, alternate languages) deserialize cleanly.

use serde::Deserialize;

use crate::rich_text::RichText;

/// One page of a document search: the matching documents plus the cursor
/// for the following page, `null`/absent when the listing is exhausted.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<Document>,
    #[serde(default)]
    pub next_page: Option<String>,
}

/// A raw content document as delivered by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Repository-assigned opaque identifier.
    pub id: String,
    /// Author-chosen unique identifier, used as the URL slug. Optional at
    /// the API level; documents published without one cannot be linked.
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub data: DocumentData,
}

/// The custom-type payload of a product document.
///
/// Every field defaults: a field-projected query (`fetch=...`) omits
/// everything it was not asked for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentData {
    #[serde(default)]
    pub title: RichText,
    #[serde(default)]
    pub description: RichText,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<ImageField>,
}

/// A structured image field. Only the URL is consumed; dimensions and crops
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageField {
    pub url: String,
}
