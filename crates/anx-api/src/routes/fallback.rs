use axum::http::Uri;

use crate::error::ApiError;

/// Every undefined endpoint is refused
pub async fn forbidden(uri: Uri) -> ApiError {
    ApiError::Forbidden(uri.path().trim_start_matches('/').to_string())
}
