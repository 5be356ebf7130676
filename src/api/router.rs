//! Register API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! The health probe sits at the root; everything else is nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Extension → 2. Access log → 3. Cache-Control (admin) → 4. Admin gate (admin)

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::auth::AdminAuth;
use crate::store::DocumentStore;

/// Build the register router over `store`, gating admin routes on `auth`.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn register_router(store: Arc<dyn DocumentStore>, auth: AdminAuth) -> Router {
    build_router(ApiContext::new(store, auth))
}

fn build_router(ctx: ApiContext) -> Router {
    // Admin routes. `route_layer` keeps the gate off unmatched paths so
    // unknown routes still 404.
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let admin = Router::new()
        .route("/dashboard", get(endpoints::dashboard::summary))
        .route(
            "/documents",
            get(endpoints::documents::index).post(endpoints::documents::store),
        )
        .route("/documents/options", get(endpoints::documents::options))
        .route(
            "/documents/:id",
            get(endpoints::documents::show)
                .put(endpoints::documents::update)
                .patch(endpoints::documents::update)
                .delete(endpoints::documents::destroy),
        )
        .with_state(ctx.clone())
        .route_layer(axum::middleware::from_fn(middleware::auth::require_admin))
        .route_layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    // Public routes, reachable from the tracking page without a token
    let public = Router::new()
        .route(
            "/track",
            get(endpoints::tracking::show).post(endpoints::tracking::search),
        )
        .with_state(ctx.clone())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::Extension(ctx));

    Router::new()
        .route("/health-check", get(endpoints::health::check))
        .nest("/api", admin.merge(public))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    use crate::models::enums::DocumentStatus;
    use crate::store::SqliteDocumentStore;
    use crate::test_support::input;

    const TOKEN: &str = "test-admin-token";

    fn test_store() -> Arc<SqliteDocumentStore> {
        Arc::new(SqliteDocumentStore::open_in_memory().unwrap())
    }

    fn app(store: Arc<SqliteDocumentStore>) -> Router {
        register_router(store, AdminAuth::new(TOKEN))
    }

    fn make_request(method: &str, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header("Authorization", format!("Bearer {t}"));
        }
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn payload(register_number: &str, sender: &str) -> String {
        serde_json::to_string(&input(register_number, sender, DocumentStatus::Received)).unwrap()
    }

    #[tokio::test]
    async fn health_check_is_public() {
        let response = app(test_store())
            .oneshot(make_request("GET", "/health-check", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn admin_routes_require_token() {
        for (method, uri) in [
            ("GET", "/api/dashboard"),
            ("GET", "/api/documents"),
            ("POST", "/api/documents"),
            ("GET", "/api/documents/options"),
            ("DELETE", "/api/documents/00000000-0000-0000-0000-000000000000"),
        ] {
            let response = app(test_store())
                .oneshot(make_request(method, uri, None, None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "AUTH_REQUIRED");
        }
    }

    #[tokio::test]
    async fn wrong_token_is_rejected_before_store_access() {
        let store = test_store();
        let response = app(store.clone())
            .oneshot(make_request(
                "POST",
                "/api/documents",
                Some("wrong-token"),
                Some(&payload("DOC-1", "John Doe")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn admin_responses_are_not_cached() {
        let response = app(test_store())
            .oneshot(make_request("GET", "/api/dashboard", Some(TOKEN), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
    }

    #[tokio::test]
    async fn create_returns_201_with_document() {
        let store = test_store();
        let response = app(store.clone())
            .oneshot(make_request(
                "POST",
                "/api/documents",
                Some(TOKEN),
                Some(&payload("DOC-2024-0001", "John Doe")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Document created successfully.");
        assert_eq!(json["document"]["register_number"], "DOC-2024-0001");
        assert_eq!(json["document"]["status"], "Diterima");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_create_returns_422_with_field_messages() {
        let store = test_store();
        let mut bad = input("DOC-1", "John Doe", DocumentStatus::Received);
        bad.status = Some("Unknown".into());
        bad.sender_name = None;
        let response = app(store.clone())
            .oneshot(make_request(
                "POST",
                "/api/documents",
                Some(TOKEN),
                Some(&serde_json::to_string(&bad).unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(json["error"]["fields"]["status"], "Please select a valid status.");
        assert_eq!(json["error"]["fields"]["sender_name"], "Sender Name is required.");
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn malformed_json_returns_400() {
        let response = app(test_store())
            .oneshot(make_request("POST", "/api/documents", Some(TOKEN), Some("{not json")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_id_returns_400() {
        let response = app(test_store())
            .oneshot(make_request("GET", "/api/documents/not-a-uuid", Some(TOKEN), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_id_returns_404() {
        let id = uuid::Uuid::new_v4();
        for method in ["GET", "DELETE"] {
            let response = app(test_store())
                .oneshot(make_request(method, &format!("/api/documents/{id}"), Some(TOKEN), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let json = body_json(response).await;
            assert_eq!(json["error"]["code"], "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn show_update_and_delete_flow() {
        let store = test_store();
        let doc = store
            .create(&input("DOC-2024-0001", "John Doe", DocumentStatus::Received))
            .unwrap();
        let uri = format!("/api/documents/{}", doc.id);

        let response = app(store.clone())
            .oneshot(make_request("GET", &uri, Some(TOKEN), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], doc.id.to_string());

        let update = serde_json::to_string(&input(
            "DOC-2024-0001",
            "John Doe",
            DocumentStatus::Completed,
        ))
        .unwrap();
        let response = app(store.clone())
            .oneshot(make_request("PATCH", &uri, Some(TOKEN), Some(&update)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Document updated successfully.");
        assert_eq!(json["document"]["status"], "Selesai");

        let response = app(store.clone())
            .oneshot(make_request("DELETE", &uri, Some(TOKEN), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Document deleted successfully.");
        assert!(json.get("document").is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_register_number_on_update_returns_422() {
        let store = test_store();
        store
            .create(&input("DOC-A", "Alice", DocumentStatus::Received))
            .unwrap();
        let b = store
            .create(&input("DOC-B", "Bob", DocumentStatus::Received))
            .unwrap();
        let response = app(store.clone())
            .oneshot(make_request(
                "PUT",
                &format!("/api/documents/{}", b.id),
                Some(TOKEN),
                Some(&payload("DOC-A", "Bob")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(
            json["error"]["fields"]["register_number"],
            "This register number already exists."
        );
        assert_eq!(store.get(&b.id).unwrap().register_number, "DOC-B");
    }

    #[tokio::test]
    async fn index_searches_and_paginates() {
        let store = test_store();
        for i in 0..20 {
            store
                .create(&input(&format!("DOC-{i:02}"), "Jane Doe", DocumentStatus::Received))
                .unwrap();
        }
        store
            .create(&input("DOC-X", "Someone Else", DocumentStatus::Received))
            .unwrap();

        let response = app(store)
            .oneshot(make_request(
                "GET",
                "/api/documents?search=doe&page=2",
                Some(TOKEN),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["total"], 20);
        assert_eq!(json["current_page"], 2);
        assert_eq!(json["last_page"], 2);
        assert_eq!(json["per_page"], 15);
        assert_eq!(json["search"], "doe");
        assert_eq!(json["data"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn options_lists_statuses_and_departments() {
        let response = app(test_store())
            .oneshot(make_request("GET", "/api/documents/options", Some(TOKEN), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json["statuses"],
            serde_json::json!(["Diterima", "Diproses", "Selesai", "Ditolak"])
        );
        assert_eq!(json["departments"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn dashboard_reports_counts() {
        let store = test_store();
        store
            .create(&input("DOC-1", "A", DocumentStatus::InProgress))
            .unwrap();
        store
            .create(&input("DOC-2", "B", DocumentStatus::Completed))
            .unwrap();
        store
            .create(&input("DOC-3", "C", DocumentStatus::Rejected))
            .unwrap();

        let response = app(store)
            .oneshot(make_request("GET", "/api/dashboard", Some(TOKEN), None))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["stats"]["total_documents"], 3);
        assert_eq!(json["stats"]["in_progress"], 1);
        assert_eq!(json["stats"]["completed"], 1);
        assert_eq!(json["recent_documents"][0]["register_number"], "DOC-3");
    }

    #[tokio::test]
    async fn tracking_is_public_and_exact() {
        let store = test_store();
        store
            .create(&input("DOC-2024-0001", "John Doe", DocumentStatus::InProgress))
            .unwrap();

        let response = app(store.clone())
            .oneshot(make_request(
                "POST",
                "/api/track",
                None,
                Some(r#"{"register_number":"  DOC-2024-0001 "}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["searched"], true);
        assert_eq!(json["search_query"], "DOC-2024-0001");
        assert_eq!(json["document"]["status"], "Diproses");

        let response = app(store)
            .oneshot(make_request(
                "GET",
                "/api/track?register_number=DOC-2024",
                None,
                None,
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["searched"], true);
        assert!(json["document"].is_null());
    }

    #[tokio::test]
    async fn tracking_without_query_is_blank_form() {
        let response = app(test_store())
            .oneshot(make_request("GET", "/api/track", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["searched"], false);
        assert!(json["document"].is_null());
    }

    #[tokio::test]
    async fn blank_tracking_number_is_validation_error() {
        let response = app(test_store())
            .oneshot(make_request(
                "POST",
                "/api/track",
                None,
                Some(r#"{"register_number":"   "}"#),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert!(json["error"]["fields"]["register_number"].is_string());
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let response = app(test_store())
            .oneshot(make_request("GET", "/api/nonexistent", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
