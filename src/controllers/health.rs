use crate::models::health_dto::Health;
use crate::routes::router::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use utoipa;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = Health),
        (status = 503, description = "Upload directory is missing")
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<Health>, StatusCode> {
    // Uploads can only succeed if the target directory is there
    match tokio::fs::metadata(&state.config.upload_dir).await {
        Ok(metadata) if metadata.is_dir() => Ok(Json(Health {
            status: "ok".to_string(),
            upload_dir: state.config.upload_dir.display().to_string(),
        })),
        _ => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}
