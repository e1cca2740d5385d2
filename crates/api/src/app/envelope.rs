//! Uniform response envelope.
//!
//! Every versioned endpoint answers with the same wrapper, success and
//! failure alike. `status` derives from the HTTP status alone (`success`
//! iff < 400), `data` is null on failure, `errorCode`/`errorMessage` are
//! null on success. Clients branch on `errorCode`, never on the message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use storegate_core::{GatewayError, codes};

/// Gateway release reported in every envelope.
pub const GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status: &'static str,
    pub system_time: String,
    pub error_code: Option<&'static str>,
    pub error_message: Option<String>,
    /// Version the commerce backend reports about itself, when it does.
    pub backend_version: Option<String>,
    pub gateway_version: &'static str,
    pub data: Value,
    #[serde(skip)]
    http_status: u16,
}

impl Envelope {
    fn build(
        data: Value,
        http_status: u16,
        error_code: Option<&'static str>,
        error_message: Option<String>,
        backend_version: Option<String>,
    ) -> Self {
        let status = if http_status < 400 { "success" } else { "failure" };
        Self {
            status,
            system_time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            error_code,
            error_message,
            backend_version,
            gateway_version: GATEWAY_VERSION,
            data,
            http_status,
        }
    }

    pub fn success(data: Value, backend_version: Option<String>) -> Self {
        Self::build(data, 200, None, None, backend_version)
    }

    pub fn failure(error: &GatewayError, backend_version: Option<String>) -> Self {
        Self::build(
            Value::Null,
            error.http_status(),
            Some(error.error_code()),
            Some(error.to_string()),
            backend_version,
        )
    }

    /// Generic 500 for failures whose cause must stay internal.
    pub fn unexpected(backend_version: Option<String>) -> Self {
        Self::build(
            Value::Null,
            500,
            Some(codes::INTERNAL_ERROR),
            Some("Unexpected error".to_string()),
            backend_version,
        )
    }

    pub fn http_status(&self) -> u16 {
        self.http_status
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
