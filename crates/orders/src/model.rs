//! Order draft model.
//!
//! A draft is created empty by the order store, filled by the orchestrator,
//! priced by the store, and finally persisted. Totals are floats end to end,
//! matching what the commerce backend reports.

use serde::{Deserialize, Serialize};

use storegate_core::OrderAddress;

/// Payment integration identity stamped on every gateway order.
pub const PAYMENT_METHOD_ID: &str = "storegate-app";
pub const PAYMENT_METHOD_TITLE: &str = "Storegate App";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
        }
    }
}

/// One product line on an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
    pub line_tax: f64,
}

/// Shipping line attached from a resolved rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingLine {
    pub rate_id: String,
    pub method_id: String,
    pub label: String,
    pub cost: f64,
    pub tax: f64,
}

/// Fee line. Negative totals reduce the order total; discounts are fees
/// named `Discount` with a negative total and no tax.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeLine {
    pub name: String,
    pub total: f64,
    pub taxable: bool,
}

/// A not-yet-final order under construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDraft {
    pub id: i64,
    pub number: String,
    pub customer_id: Option<i64>,
    pub billing: OrderAddress,
    pub shipping: OrderAddress,
    pub lines: Vec<OrderLine>,
    pub shipping_line: Option<ShippingLine>,
    pub fees: Vec<FeeLine>,
    pub currency: String,
    pub payment_method: String,
    pub payment_method_title: String,
    pub status: OrderStatus,
    pub total: f64,
}

impl OrderDraft {
    /// Fresh draft with allocated identity and everything else empty.
    pub fn new(id: i64, number: impl Into<String>) -> Self {
        Self {
            id,
            number: number.into(),
            customer_id: None,
            billing: OrderAddress::default(),
            shipping: OrderAddress::default(),
            lines: Vec::new(),
            shipping_line: None,
            fees: Vec::new(),
            currency: String::new(),
            payment_method: String::new(),
            payment_method_title: String::new(),
            status: OrderStatus::Pending,
            total: 0.0,
        }
    }
}

/// Confirmation summary returned to the client after placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlaced {
    pub order_id: i64,
    pub order_number: String,
    pub status: String,
    pub total: f64,
    pub currency: String,
    pub payment_method: String,
}
