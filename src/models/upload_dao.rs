use crate::routes::router::AppState;
use crate::services::storage::base_name;
use crate::utils::io::stream_to_file;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("没有上传图片")]
    MissingImage,
    #[error("未选择文件")]
    MissingFilename,
    #[error("{message}")]
    InvalidForm { status: StatusCode, message: String },
    #[error("Failed to spool upload: {0}")]
    Spool(#[from] io::Error),
}

impl UploadError {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadError::MissingImage | UploadError::MissingFilename => StatusCode::BAD_REQUEST,
            UploadError::InvalidForm { status, .. } => *status,
            UploadError::Spool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartRejection> for UploadError {
    fn from(rejection: MultipartRejection) -> Self {
        UploadError::InvalidForm {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        UploadError::InvalidForm {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match &self {
            UploadError::Spool(e) => tracing::error!("could not spool upload: {}", e),
            e => tracing::warn!("rejected upload: {}", e),
        }
        (self.status(), self.to_string()).into_response()
    }
}

/// The `image` field of a multipart body, spooled to a temporary file that is
/// removed when the value is dropped.
#[derive(Debug)]
pub struct ImageUpload {
    /// Name as sent by the client. Untrusted, never used as a path.
    pub original_filename: String,
    pub base_name: String,
    pub file: NamedTempFile,
    pub size: u64,
}

impl ImageUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Binds the first `image` field; every other field is skipped.
    pub async fn from_multipart(
        mut multipart: Multipart,
        spool_dir: &Path,
    ) -> Result<ImageUpload, UploadError> {
        while let Some(field) = multipart.next_field().await? {
            if field.name() == Some(IMAGE_FIELD) {
                return ImageUpload::spool(field, spool_dir).await;
            }
        }
        Err(UploadError::MissingImage)
    }

    async fn spool(field: Field<'_>, spool_dir: &Path) -> Result<ImageUpload, UploadError> {
        let original_filename = field.file_name().unwrap_or_default().to_string();
        let base_name = base_name(&original_filename)
            .ok_or(UploadError::MissingFilename)?
            .to_string();

        let file = NamedTempFile::new_in(spool_dir)?;
        let writer = tokio::fs::File::from_std(file.as_file().try_clone()?);
        let size = stream_to_file(writer, field)
            .await
            .map_err(from_stream_error)?;

        Ok(ImageUpload {
            original_filename,
            base_name,
            file,
            size,
        })
    }
}

// Errors from the multipart stream come back wrapped in io::Error; unwrap them
// so body limit and parse errors keep their status code.
fn from_stream_error(err: io::Error) -> UploadError {
    let multipart = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<MultipartError>())
        .map(|e| (e.status(), e.body_text()));

    match multipart {
        Some((status, message)) => UploadError::InvalidForm { status, message },
        None => UploadError::Spool(err),
    }
}

impl FromRequest<AppState> for ImageUpload {
    type Rejection = UploadError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state).await?;
        ImageUpload::from_multipart(multipart, &state.config.spool_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status() {
        assert_eq!(UploadError::MissingImage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            UploadError::MissingFilename.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UploadError::Spool(io::Error::other("disk full")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(UploadError::MissingImage.to_string(), "没有上传图片");
        assert_eq!(UploadError::MissingFilename.to_string(), "未选择文件");
    }

    #[test]
    fn test_from_stream_error_keeps_io_errors() {
        let err = io::Error::other("disk full");
        assert!(matches!(from_stream_error(err), UploadError::Spool(_)));
    }
}
