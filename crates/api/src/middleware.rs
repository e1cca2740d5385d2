use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Wrap each request in a span carrying a fresh request id, method and path,
/// so every log line written while handling it can be correlated.
pub async fn request_context(req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::now_v7();
    let span = tracing::info_span!(
        "request",
        %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    next.run(req).instrument(span).await
}
