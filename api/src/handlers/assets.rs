//! Static asset fallback

use axum::http::StatusCode;

/// Response for any path under `/image` that has no matching file
pub async fn image_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404: File Not Found")
}
