use crate::config::loader::Config;
use crate::controllers::dataset::__path_dataset_detail;
use crate::controllers::dataset::__path_datasets;
use crate::controllers::dataset::{dataset_detail, datasets};
use crate::controllers::health::__path_health;
use crate::controllers::health::health;
use crate::controllers::ping::__path_ping;
use crate::controllers::ping::ping;
use crate::controllers::upload::__path_upload;
use crate::controllers::upload::{ignored, upload};
use crate::models::dataset_dto::{DatasetImage, DatasetListing, DatasetSummary};
use crate::models::form_dto::ImageForm;
use crate::models::health_dto::Health;
use crate::models::ping_dto::Ping;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace;
use tower_http::trace::TraceLayer;
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        upload,
        datasets,
        dataset_detail,
        ping,
        health
    ),
    components(
        schemas(ImageForm, DatasetSummary, DatasetImage, DatasetListing, Health, Ping)
    ),
    tags(
        (name = "images", description = "Image upload endpoints"),
        (name = "datasets", description = "Read-only dataset browsing"),
        (name = "health", description = "Health check endpoints")
    )
)]
struct ApiDoc;

pub fn create_routes(config: Config) -> Router {
    let body_limit = config.max_upload_size;
    // Stored uploads are served read-only from `/uploads`, next to but
    // distinct from the `/upload` endpoint.
    let mut router = Router::new()
        .route("/", get(ping))
        .route("/health", get(health))
        .route("/upload", post(upload).fallback(ignored))
        .route("/dataset", get(datasets))
        .route("/dataset/{name}", get(dataset_detail))
        .nest_service("/uploads", ServeDir::new(&config.upload_dir));
    if let Some(root) = &config.dataset_root {
        router = router.nest_service("/dataset_files", ServeDir::new(root));
    }

    let state = AppState { config };
    router
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(DefaultBodyLimit::max(body_limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::ServiceExt;

    fn test_router() -> (Router, tempfile::TempDir) {
        let upload_dir = tempdir().unwrap();
        let config = Config {
            upload_dir: upload_dir.path().to_path_buf(),
            ..Config::default()
        };
        (create_routes(config), upload_dir)
    }

    #[tokio::test]
    async fn test_ping_route() {
        let (router, _dir) = test_router();
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "pong");
    }

    #[tokio::test]
    async fn test_health_route() {
        let (router, _dir) = test_router();
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (router, _dir) = test_router();
        let req = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"]["/upload"]["post"].is_object());
        assert!(json["paths"]["/health"]["get"].is_object());
        assert!(json["paths"]["/dataset/{name}"]["get"].is_object());
    }

    #[test]
    fn test_openapi_describes_image_field() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schema = &doc["components"]["schemas"]["ImageForm"];
        assert_eq!(schema["properties"]["image"]["type"], "string");
    }
}
