use axum::response::{Html, IntoResponse, Response};
use std::fmt;

/// Result of a bound upload. Every variant is answered with `200 OK`; only the
/// message differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Stored { base_name: String },
    NotAnImage,
    NotSaved,
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Stored { base_name } => write!(
                f,
                "文件 {} 已上传并处理。",
                html_escape::encode_safe(base_name)
            ),
            UploadOutcome::NotSaved => write!(f, "抱歉，上传图片时发生了错误。"),
            UploadOutcome::NotAnImage => write!(f, "文件不是有效的图片。"),
        }
    }
}

impl IntoResponse for UploadOutcome {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}
