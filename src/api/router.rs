//! API router.
//!
//! Returns a composable `Router` with every endpoint under `/api/`.
//!
//! Layers (outermost → innermost): CORS → request logging → handler.

use axum::http::Uri;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router around a shared context.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7). The
/// static `/drugs/suggest` route takes priority over `/drugs/:name`.
pub fn api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/drugs/suggest", get(endpoints::drugs::suggest))
        .route("/drugs/:name", get(endpoints::drugs::info))
        .route("/interactions/check", post(endpoints::interactions::check_pair))
        .route("/interactions/regimen", post(endpoints::interactions::check_regimen))
        .route(
            "/resources/emergency-drugs",
            get(endpoints::resources::emergency_drugs),
        )
        .route(
            "/resources/controlled-substances",
            get(endpoints::resources::controlled_substances),
        )
        .route(
            "/resources/black-box-warnings",
            get(endpoints::resources::black_box_warnings),
        )
        .with_state(ctx);

    Router::new()
        .nest("/api", routes)
        .fallback(not_found)
        .layer(axum::middleware::from_fn(middleware::request_log::trace_request))
        .layer(CorsLayer::permissive())
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::api::types::REQUEST_ID_HEADER;
    use crate::lookup::{LocalSource, RemoteSource};
    use crate::reference::ReferenceData;
    use crate::remote::mock::{MockOpenFda, MockRxNav};

    fn local_app() -> Router {
        let reference = Arc::new(ReferenceData::load_test());
        let source = Arc::new(LocalSource::new(reference.clone()));
        api_router(ApiContext::new(source, reference))
    }

    fn remote_app(rx: MockRxNav) -> Router {
        let rx = Arc::new(rx);
        let source = Arc::new(RemoteSource::new(rx.clone(), rx, Arc::new(MockOpenFda::new())));
        api_router(ApiContext::new(source, Arc::new(ReferenceData::load_test())))
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        let body = to_bytes(response.into_body(), 1 << 20).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_reports_source() {
        let (status, json) = send(local_app(), get_req("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["source"], "local");
    }

    #[tokio::test]
    async fn pair_check_hit() {
        let req = post_json(
            "/api/interactions/check",
            json!({"drug_a": "Warfarin", "drug_b": "AMIODARONE"}),
        );
        let (status, json) = send(local_app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["drug_a_display"], "Warfarin");
        assert_eq!(json["interaction"]["severity"], "major");
        assert!(json["checked_at"].is_string());
    }

    #[tokio::test]
    async fn pair_check_miss_is_null_interaction() {
        let req = post_json(
            "/api/interactions/check",
            json!({"drug_a": "metformin", "drug_b": "warfarin"}),
        );
        let (status, json) = send(local_app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["interaction"].is_null());
    }

    #[tokio::test]
    async fn same_drug_is_400() {
        let req = post_json(
            "/api/interactions/check",
            json!({"drug_a": "warfarin", "drug_b": "Warfarin"}),
        );
        let (status, json) = send(local_app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn missing_field_is_400() {
        let req = post_json("/api/interactions/check", json!({"drug_a": "warfarin"}));
        let (status, json) = send(local_app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["message"], "Please enter a drug name");
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/interactions/check")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, json) = send(local_app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn regimen_report() {
        let req = post_json(
            "/api/interactions/regimen",
            json!({"drugs": ["amiodarone", "warfarin", "simvastatin", "metoprolol", ""]}),
        );
        let (status, json) = send(local_app(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_drugs"], 4);
        assert_eq!(json["total_interactions"], 3);
        assert_eq!(json["major_interactions"], 2);
        assert_eq!(json["pairs_checked"], 6);
        assert_eq!(json["interactions"][0]["severity"], "major");
        assert_eq!(json["interactions"][2]["severity"], "minor");
    }

    #[tokio::test]
    async fn regimen_duplicate_is_400() {
        let req = post_json("/api/interactions/regimen", json!({"drugs": ["digoxin", "digoxin"]}));
        let (status, json) = send(local_app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]["message"].as_str().unwrap().contains("Duplicate drug"));
    }

    #[tokio::test]
    async fn oversized_regimen_is_400() {
        let drugs: Vec<String> = (0..2000).map(|i| format!("drug{i}")).collect();
        let req = post_json("/api/interactions/regimen", json!({ "drugs": drugs }));
        let (status, json) = send(local_app(), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
        assert!(json["error"]["message"].as_str().unwrap().contains("at most"));
    }

    #[tokio::test]
    async fn drug_info_hit() {
        let (status, json) = send(local_app(), get_req("/api/drugs/Coumadin")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["info"]["kind"], "reference");
        assert_eq!(json["info"]["data"]["id"], "warfarin");
        assert!(json.get("available_drugs").is_none());
    }

    #[tokio::test]
    async fn drug_info_miss_lists_available_drugs() {
        let (status, json) = send(local_app(), get_req("/api/drugs/aspirin")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["info"].is_null());
        assert_eq!(json["available_drugs"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn suggest_route_is_not_a_drug_name() {
        let (status, json) = send(local_app(), get_req("/api/drugs/suggest?q=war")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["suggestions"], json!(["warfarin"]));
    }

    #[tokio::test]
    async fn resources_are_listed() {
        let (status, json) = send(local_app(), get_req("/api/resources/controlled-substances")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 1);
        assert_eq!(json["items"][0]["schedule"], "CII");

        let (status, _) = send(local_app(), get_req("/api/resources/emergency-drugs")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(local_app(), get_req("/api/resources/black-box-warnings")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_404_json() {
        let (status, json) = send(local_app(), get_req("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn unresolved_remote_drug_is_422() {
        let rx = MockRxNav::new().with_drug("warfarin", "11289", "warfarin");
        let req = post_json(
            "/api/interactions/check",
            json!({"drug_a": "warfarin", "drug_b": "notadrug"}),
        );
        let (status, json) = send(remote_app(rx), req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "UNRESOLVED_DRUG");
    }

    #[tokio::test]
    async fn remote_outage_is_502() {
        let req = post_json(
            "/api/interactions/check",
            json!({"drug_a": "warfarin", "drug_b": "amiodarone"}),
        );
        let (status, json) = send(remote_app(MockRxNav::failing()), req).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["error"]["code"], "UPSTREAM_UNAVAILABLE");
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/interactions/check")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = local_app().oneshot(req).await.unwrap();
        assert!(response.status().is_success());
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }
}
