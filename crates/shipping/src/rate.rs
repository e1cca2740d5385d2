//! Rate types crossing the engine boundary and the wire.

use serde::{Deserialize, Serialize};

/// One rate as the engine prices it. The id is `method:instance`, e.g.
/// `flat_rate:3`, and is what clients later pass back as a shipment option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRate {
    pub id: String,
    pub label: String,
    pub method_id: String,
    pub cost: f64,
    pub taxes: Vec<f64>,
}

impl ShippingRate {
    pub fn tax_total(&self) -> f64 {
        self.taxes.iter().sum()
    }
}

/// Everything the engine resolved for one package.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneQuote {
    pub zone_id: i64,
    pub rates: Vec<ShippingRate>,
}

/// One shipment option offered to the client. `price` is what the buyer
/// pays: cost plus the summed taxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOption {
    pub id: String,
    pub label: String,
    pub method_id: String,
    pub cost: f64,
    pub tax: f64,
    pub price: f64,
}

impl RateOption {
    pub fn from_rate(rate: &ShippingRate) -> Self {
        let tax = rate.tax_total();
        Self {
            id: rate.id.clone(),
            label: rate.label.clone(),
            method_id: rate.method_id.clone(),
            cost: rate.cost,
            tax,
            price: rate.cost + tax,
        }
    }
}

/// Wire payload for the shipment-options operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentOptions {
    pub options: Vec<RateOption>,
}
