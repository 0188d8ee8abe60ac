use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use vitrine_catalog::CatalogError;

use crate::{render, shipping};

use super::AppState;

/// `GET /product/{slug}`: renders a product detail page.
///
/// How the product is obtained depends on the configured page mode:
/// the slot cache may serve a prebuilt page, build one on the spot or
/// kick off a background refresh. The handler only sees the result.
pub(super) async fn detail(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.pages.product_for(&slug).await {
        Ok(product) => {
            let fee = shipping::estimate(product.price);
            let page = render::product_page(&product, fee);
            Html(page.into_string()).into_response()
        }
        Err(CatalogError::NotFound { .. }) => {
            let page = render::not_found_page();
            (StatusCode::NOT_FOUND, Html(page.into_string())).into_response()
        }
        Err(error) => {
            tracing::error!(slug = %slug, %error, "product page: resolution failed");
            let page = render::error_page();
            (StatusCode::BAD_GATEWAY, Html(page.into_string())).into_response()
        }
    }
}
