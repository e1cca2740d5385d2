use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::response::Response;

use storegate_core::GatewayError;

use crate::app::services::AppServices;
use crate::app::{dto, handler};

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> Response {
    handler::run(&services, || {
        let products = services.catalog.all_products()?;
        Ok(dto::products_to_json(&products))
    })
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    handler::run(&services, || {
        let id = parse_product_id(&id)?;
        let details = services.catalog.product_by_id(id)?;
        Ok(dto::product_to_json(&details))
    })
}

/// A variation id resolves to its parent with the full variant set.
pub async fn get_product_with_variants(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    handler::run(&services, || {
        let id = parse_product_id(&id)?;
        let details = services.catalog.product_with_variants(id)?;
        Ok(dto::product_to_json(&details))
    })
}

/// Route-level id check; non-numeric and non-positive ids never reach the
/// catalog.
fn parse_product_id(raw: &str) -> Result<i64, GatewayError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(GatewayError::invalid_product_id()),
    }
}
