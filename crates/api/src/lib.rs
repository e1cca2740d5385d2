//! HTTP API: router, response envelope, and request/response mapping.

pub mod app;
pub mod middleware;
