//! HTTP application wiring (Axum router + service wiring).
//!
//! The folder is structured like:
//! - `services.rs`: collaborator wiring shared by the binary and tests
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: response JSON mapping for catalog payloads
//! - `envelope.rs` / `handler.rs`: the uniform response contract

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod envelope;
pub mod handler;
pub mod routes;
pub mod services;

/// Versioned prefix every gateway endpoint lives under.
pub const API_PREFIX: &str = "/storegate/v1";

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest(API_PREFIX, routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_context))
                .layer(Extension(services)),
        )
}
