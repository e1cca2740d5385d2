use axum::http::StatusCode;

/// Unversioned liveness probe; not enveloped.
pub async fn health() -> StatusCode {
    StatusCode::OK
}
