//! Typed client for the headless content API backing the catalog.
//!
//! The API exposes one read surface: a document-search endpoint returning
//! pages of `{results, next_page}`. [`CmsClient`] covers the three access
//! patterns the catalog needs (typed listing queries, uid lookup, raw
//! continuation fetches); the raw wire shapes live in [`types`] and
//! [`rich_text`].

mod client;
mod error;
pub mod rich_text;
pub mod types;

pub use client::CmsClient;
pub use error::CmsError;
pub use rich_text::RichText;
pub use types::{Document, DocumentData, ImageField, QueryResponse};
