use crate::models::dataset_dto::{DatasetListing, DatasetSummary};
use crate::routes::router::AppState;
use crate::services::dataset::{self, DatasetError};
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use tracing::error;

#[utoipa::path(
    get,
    path = "/dataset",
    responses(
        (status = 200, description = "Image count per dataset split", body = [DatasetSummary]),
        (status = 404, description = "Dataset browsing is not configured")
    ),
    tag = "datasets"
)]
pub async fn datasets(
    State(state): State<AppState>,
) -> Result<Json<Vec<DatasetSummary>>, StatusCode> {
    let root = state
        .config
        .dataset_root
        .clone()
        .ok_or(StatusCode::NOT_FOUND)?;

    let summary = tokio::task::spawn_blocking(move || dataset::summarize(&root))
        .await
        .map_err(|e| {
            error!("dataset summary failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/dataset/{name}",
    params(
        ("name" = String, Path, description = "Dataset split, e.g. trainA")
    ),
    responses(
        (status = 200, description = "Images of the split", body = DatasetListing),
        (status = 404, description = "Unknown name or browsing not configured"),
        (status = 500, description = "Split could not be read")
    ),
    tag = "datasets"
)]
pub async fn dataset_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DatasetListing>, StatusCode> {
    let root = state
        .config
        .dataset_root
        .clone()
        .ok_or(StatusCode::NOT_FOUND)?;

    let lookup = name.clone();
    let images = tokio::task::spawn_blocking(move || dataset::list_images(&root, &lookup))
        .await
        .map_err(|e| {
            error!("dataset listing failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match images {
        Ok(images) => Ok(Json(DatasetListing {
            dataset: name,
            images,
        })),
        Err(DatasetError::InvalidName) => Err(StatusCode::NOT_FOUND),
        Err(DatasetError::Io(e)) => {
            error!("could not read dataset {:?}: {}", name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
