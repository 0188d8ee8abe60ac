mod home;
mod product;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use vitrine_catalog::{ListingPaginator, ProductPages};

#[derive(Clone)]
pub struct AppState {
    pub paginator: ListingPaginator,
    pub pages: ProductPages,
}

/// JSON error envelope returned by the pagination endpoint.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "precondition_failed" | "invalid_cursor" => StatusCode::BAD_REQUEST,
            "fetch_failed" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/products/page", get(home::load_more))
        .route("/product/{slug}", get(product::detail))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthData { status: "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
    use std::sync::Arc;
    use tower::ServiceExt;
    use vitrine_catalog::{DetailResolver, PageMode, ProductPages};
    use vitrine_cms::CmsClient;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_app(server: &MockServer) -> Router {
        let client = Arc::new(CmsClient::new(&server.uri(), "test-token", 5).expect("client"));
        let paginator = ListingPaginator::new(Arc::clone(&client), 2);
        let pages = ProductPages::new(DetailResolver::new(client), PageMode::OnRequest);
        build_app(AppState { paginator, pages })
    }

    fn product_doc(uid: &str, title: &str, price: f64) -> serde_json::Value {
        serde_json::json!({
            "id": format!("doc-{uid}"),
            "uid": uid,
            "type": "product",
            "data": {
                "title": [{ "type": "heading", "text": title }],
                "price": price,
            }
        })
    }

    /// Percent-encodes a cursor so it can ride in a query string.
    fn encode(value: &str) -> String {
        utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, body.to_vec())
    }

    #[test]
    fn api_error_precondition_failed_maps_to_bad_request() {
        let response = ApiError::new("precondition_failed", "no cursor").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_fetch_failed_maps_to_bad_gateway() {
        let response = ApiError::new("fetch_failed", "upstream down").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let server = MockServer::start().await;
        let (status, body) = fetch(test_app(&server), "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn home_renders_the_first_batch_and_the_load_more_button() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .and(query_param("q", "[[at(document.type,\"product\")]]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    product_doc("camiseta-preta", "Camiseta preta", 49.9),
                    product_doc("caneca", "Caneca", 19.9),
                ],
                "next_page": format!("{}/documents/search?page=2", server.uri()),
            })))
            .mount(&server)
            .await;

        let (status, body) = fetch(test_app(&server), "/").await;
        let html = String::from_utf8(body).expect("utf-8 body");

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Camiseta preta"));
        assert!(html.contains("R$ 49,90"));
        assert!(html.contains("/product/caneca"));
        assert!(html.contains("Carregar mais.."));
        assert!(html.contains("page=2"));
    }

    #[tokio::test]
    async fn home_maps_an_upstream_failure_to_a_502_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (status, body) = fetch(test_app(&server), "/").await;
        let html = String::from_utf8(body).expect("utf-8 body");

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(html.contains("Tente novamente"));
    }

    #[tokio::test]
    async fn product_page_renders_the_resolved_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .and(query_param("q", "[[at(my.product.uid,\"caneca\")]]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{
                    "id": "doc-caneca",
                    "uid": "caneca",
                    "type": "product",
                    "data": {
                        "title": [{ "type": "heading", "text": "Caneca" }],
                        "description": [{ "type": "paragraph", "text": "Caneca de cerâmica." }],
                        "price": 19.9,
                        "image": { "url": "https://images.example.io/caneca.png" },
                    }
                }],
                "next_page": null,
            })))
            .mount(&server)
            .await;

        let (status, body) = fetch(test_app(&server), "/product/caneca").await;
        let html = String::from_utf8(body).expect("utf-8 body");

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Caneca"));
        assert!(html.contains("R$ 19,90"));
        assert!(html.contains("Caneca de cerâmica."));
        assert!(html.contains("Produto adicionado ao carrinho!"));
        assert!(html.contains("Frete: R$ 25,00"));
    }

    #[tokio::test]
    async fn unknown_product_is_a_404_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "results": [], "next_page": null })),
            )
            .mount(&server)
            .await;

        let (status, body) = fetch(test_app(&server), "/product/sumiu").await;
        let html = String::from_utf8(body).expect("utf-8 body");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("Produto não encontrado"));
    }

    #[tokio::test]
    async fn load_more_returns_the_next_batch_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .and(query_param("page", "2"))
            .and(query_param("access_token", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    product_doc("bone", "Boné", 39.9),
                    product_doc("moletom", "Moletom", 129.0),
                ],
                "next_page": null,
            })))
            .mount(&server)
            .await;

        let cursor = format!("{}/documents/search?page=2", server.uri());
        let uri = format!("/products/page?cursor={}", encode(&cursor));
        let (status, body) = fetch(test_app(&server), &uri).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        let results = json["results"].as_array().expect("results array");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["id"], "bone");
        assert_eq!(results[0]["price_formatted"], "R$ 39,90");
        assert!(json["next_page"].is_null());
    }

    #[tokio::test]
    async fn load_more_without_a_cursor_is_a_precondition_failure() {
        let server = MockServer::start().await;
        let (status, body) = fetch(test_app(&server), "/products/page").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["error"]["code"], "precondition_failed");
    }

    #[tokio::test]
    async fn load_more_rejects_a_cursor_for_another_host() {
        let server = MockServer::start().await;
        let cursor = "https://attacker.example.com/documents/search?page=2";
        let uri = format!("/products/page?cursor={}", encode(cursor));
        let (status, body) = fetch(test_app(&server), &uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["error"]["code"], "invalid_cursor");
    }

    #[tokio::test]
    async fn load_more_maps_an_upstream_failure_to_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let cursor = format!("{}/documents/search?page=2", server.uri());
        let uri = format!("/products/page?cursor={}", encode(&cursor));
        let (status, body) = fetch(test_app(&server), &uri).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["error"]["code"], "fetch_failed");
    }

    #[tokio::test]
    async fn blocking_fallback_serves_the_same_page_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/documents/search"))
            .and(query_param("q", "[[at(my.product.uid,\"caneca\")]]"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [product_doc("caneca", "Caneca", 19.9)],
                "next_page": null,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = Arc::new(CmsClient::new(&server.uri(), "test-token", 5).expect("client"));
        let paginator = ListingPaginator::new(Arc::clone(&client), 2);
        let pages = ProductPages::new(DetailResolver::new(client), PageMode::BlockingFallback);
        let app = build_app(AppState { paginator, pages });

        // The second request must be served from the slot; a second
        // upstream hit would trip the mock's expectation on drop.
        for _ in 0..2 {
            let (status, _) = fetch(app.clone(), "/product/caneca").await;
            assert_eq!(status, StatusCode::OK);
        }
    }
}
