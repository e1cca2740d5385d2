//! Synthetic shipping package.
//!
//! Rate quotes run without any cart or session: every request builds a fresh
//! package from the product ids and the normalized destination, hands it to
//! the rate engine, and drops it. Packages are never cached or shared.

use serde::Serialize;
use storegate_core::Destination;

/// One package line. Quantity is always 1; rate calculation prices each
/// product as a single line regardless of how many units the client wants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageItem {
    pub key: String,
    pub product_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl PackageItem {
    pub fn single(product_id: i64, price: f64) -> Self {
        Self {
            key: product_id.to_string(),
            product_id,
            quantity: 1,
            unit_price: price,
            line_total: price,
        }
    }
}

/// Request-scoped bundle handed to the rate engine. The destination here is
/// authoritative for zone matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub contents: Vec<PackageItem>,
    pub contents_cost: f64,
    pub destination: Destination,
    pub customer_id: Option<i64>,
}
