use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::response::Response;
use serde_json::Value;

use storegate_core::GatewayError;

use crate::app::handler;
use crate::app::services::AppServices;

/// Body shape: `{"products": [id, ...], "address": {...}}`. A missing or
/// non-record body is rejected here; everything inside it is validated by
/// the shipping service.
pub async fn shipment_options(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<Value>>,
) -> Response {
    handler::run(&services, || {
        let Some(Json(Value::Object(params))) = body.as_ref() else {
            return Err(GatewayError::bad_request("Invalid request body"));
        };
        services
            .shipping
            .shipment_options(params.get("products"), params.get("address"))
    })
}
