use axum::{
    Router,
    routing::{get, post},
};

pub mod orders;
pub mod products;
pub mod shipping;
pub mod system;

/// Router for all versioned gateway endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/products/:id", get(products::get_product))
        .route(
            "/products-with-variants/:id",
            get(products::get_product_with_variants),
        )
        .route("/shipment-options", post(shipping::shipment_options))
        .route("/orders", post(orders::create_order))
}
