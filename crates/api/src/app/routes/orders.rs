use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::response::Response;
use serde_json::Value;

use crate::app::handler;
use crate::app::services::AppServices;

/// The body goes to the order service untouched; it owns the structural
/// check, so a missing body fails validation there instead of here.
pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<Value>>,
) -> Response {
    handler::run(&services, || {
        let payload = body.as_ref().map(|Json(value)| value);
        services.orders.create_order(payload)
    })
}
