use std::sync::Arc;

#[tokio::main]
async fn main() {
    storegate_observability::init();

    let addr =
        std::env::var("STOREGATE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let services = Arc::new(storegate_api::app::services::build_services());
    let app = storegate_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
