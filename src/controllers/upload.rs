use crate::models::form_dto::ImageForm;
use crate::models::outcome_dto::UploadOutcome;
use crate::models::upload_dao::ImageUpload;
use crate::routes::router::AppState;
use crate::services::storage::{self, StoreError};
use axum::extract::State;
use tracing::{error, info, warn};

#[utoipa::path(
    post,
    path = "/upload",
    request_body(
        content = ImageForm,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Upload handled, the body says whether it was stored", body = String, content_type = "text/html"),
        (status = 400, description = "Missing `image` field or file name"),
        (status = 413, description = "Body exceeds the configured size limit"),
        (status = 500, description = "Upload could not be spooled")
    ),
    tag = "images"
)]
pub async fn upload(State(state): State<AppState>, image: ImageUpload) -> UploadOutcome {
    let target = storage::target_path(&state.config.upload_dir, &image.base_name);
    info!(
        "received {:?} ({} bytes) for {}",
        image.original_filename,
        image.size,
        target.display()
    );

    // Decoding and copying are blocking; the spool file lives until the closure
    // returns.
    let result = tokio::task::spawn_blocking(move || {
        let stored = storage::store(image.path(), &target);
        (image.base_name, target, stored)
    })
    .await;

    match result {
        Ok((base_name, target, Ok(info))) => {
            info!(
                "stored {} ({:?}, {}x{})",
                target.display(),
                info.format,
                info.width,
                info.height
            );
            UploadOutcome::Stored { base_name }
        }
        Ok((base_name, _, Err(StoreError::Invalid(e)))) => {
            warn!("{:?} is not a valid image: {}", base_name, e);
            UploadOutcome::NotAnImage
        }
        Ok((_, target, Err(StoreError::Persistence(e)))) => {
            error!("could not persist {}: {}", target.display(), e);
            UploadOutcome::NotSaved
        }
        Err(e) => {
            error!("upload task failed: {}", e);
            UploadOutcome::NotSaved
        }
    }
}

/// Every method other than `POST` is accepted and ignored.
pub async fn ignored() {}
