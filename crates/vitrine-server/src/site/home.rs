use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use vitrine_catalog::{CatalogError, ListingState, PageCursor};
use vitrine_cms::CmsError;
use vitrine_core::Product;

use crate::render;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct LoadMoreQuery {
    pub cursor: Option<String>,
}

/// One "load more" batch, mirroring what the home page script appends.
#[derive(Debug, Serialize)]
pub(super) struct ListingPage {
    results: Vec<Product>,
    next_page: Option<String>,
}

/// `GET /`: renders the home page around the first listing batch.
pub(super) async fn home(State(state): State<AppState>) -> Response {
    match state.paginator.fetch_first_page().await {
        Ok(listing) => {
            let cursor = listing.cursor().map(|c| c.as_url().to_owned());
            let page = render::home_page(listing.products(), cursor.as_deref());
            Html(page.into_string()).into_response()
        }
        Err(error) => {
            tracing::error!(%error, "home: first listing batch failed");
            let page = render::error_page();
            (StatusCode::BAD_GATEWAY, Html(page.into_string())).into_response()
        }
    }
}

/// `GET /products/page?cursor=...`: fetches one further listing batch.
///
/// A missing or empty cursor means the listing is already exhausted,
/// so there is nothing to fetch and the request is rejected up front.
pub(super) async fn load_more(
    State(state): State<AppState>,
    Query(query): Query<LoadMoreQuery>,
) -> Response {
    let Some(cursor) = query.cursor.filter(|cursor| !cursor.is_empty()) else {
        return ApiError::new("precondition_failed", "the listing cursor is exhausted")
            .into_response();
    };

    let mut listing = ListingState::resuming(PageCursor::new(cursor));
    match state.paginator.fetch_next_page(&mut listing).await {
        Ok(()) => {
            let next_page = listing.cursor().map(|c| c.as_url().to_owned());
            Json(ListingPage {
                results: listing.products().to_vec(),
                next_page,
            })
            .into_response()
        }
        Err(CatalogError::PreconditionFailed) => {
            ApiError::new("precondition_failed", "the listing cursor is exhausted").into_response()
        }
        Err(CatalogError::FetchFailed {
            source: source @ (CmsError::ForeignCursor { .. } | CmsError::InvalidUrl { .. }),
        }) => {
            tracing::warn!(error = %source, "load more: rejected continuation cursor");
            ApiError::new("invalid_cursor", "cursor does not continue this listing")
                .into_response()
        }
        Err(error) => {
            tracing::error!(%error, "load more: continuation fetch failed");
            ApiError::new("fetch_failed", "could not load the next page").into_response()
        }
    }
}
