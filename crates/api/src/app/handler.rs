//! Standardized handler execution.
//!
//! Every versioned endpoint runs through [`run`], so no response leaves the
//! gateway outside the envelope. Typed failures log one warn line with their
//! code; unexpected ones log the internal cause at error level and answer
//! with the generic 500 envelope.

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use storegate_core::{GatewayError, GatewayResult};

use crate::app::envelope::Envelope;
use crate::app::services::AppServices;

pub fn run<T, F>(services: &AppServices, handler: F) -> Response
where
    T: Serialize,
    F: FnOnce() -> GatewayResult<T>,
{
    let backend_version = services.platform.version();
    let envelope = match handler() {
        Ok(data) => match serde_json::to_value(data) {
            Ok(value) => Envelope::success(value, backend_version),
            Err(cause) => {
                tracing::error!(%cause, "response serialization failed");
                Envelope::unexpected(backend_version)
            }
        },
        Err(GatewayError::Unexpected(cause)) => {
            tracing::error!(cause = ?cause, "unexpected gateway failure");
            Envelope::unexpected(backend_version)
        }
        Err(error) => {
            tracing::warn!(code = error.error_code(), "{error}");
            Envelope::failure(&error, backend_version)
        }
    };
    envelope.into_response()
}
