//! Shipping resolution.
//!
//! Turns raw client input into a package, quotes it, and shapes the result.
//! Order placement resolves its chosen rate through the same package
//! construction, so the price quoted up front is the price attached.

use std::sync::Arc;

use serde_json::Value;

use storegate_catalog::CatalogStore;
use storegate_core::{CommercePlatform, Destination, GatewayError, GatewayResult, address};

use crate::engine::RateEngine;
use crate::package::{Package, PackageItem};
use crate::rate::{RateOption, ShipmentOptions, ShippingRate};

#[derive(Clone)]
pub struct ShippingService {
    catalog: Arc<dyn CatalogStore>,
    engine: Arc<dyn RateEngine>,
    platform: Arc<dyn CommercePlatform>,
}

impl ShippingService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        engine: Arc<dyn RateEngine>,
        platform: Arc<dyn CommercePlatform>,
    ) -> Self {
        Self {
            catalog,
            engine,
            platform,
        }
    }

    /// Resolve every shipment option for the given products and address.
    pub fn shipment_options(
        &self,
        products: Option<&Value>,
        raw_address: Option<&Value>,
    ) -> GatewayResult<ShipmentOptions> {
        self.ensure_active()?;
        let list = require_product_list(products)?;
        let destination = address::normalize(raw_address)?;
        let product_ids = parse_product_ids(list)?;
        let package = self.build_package(&product_ids, destination)?;
        let rates = self.collect_rates(&package)?;
        let options = rates.iter().map(RateOption::from_rate).collect();
        Ok(ShipmentOptions { options })
    }

    /// Resolve one specific rate for already-validated product ids. The
    /// package is built exactly as for [`Self::shipment_options`]; a rate id
    /// the engine no longer offers is an invalid shipment option.
    pub fn rate_by_id(
        &self,
        product_ids: &[i64],
        raw_address: Option<&Value>,
        rate_id: &str,
    ) -> GatewayResult<ShippingRate> {
        self.ensure_active()?;
        let destination = address::normalize(raw_address)?;
        let package = self.build_package(product_ids, destination)?;
        let quote = self.engine.quote(&package)?;
        quote
            .rates
            .into_iter()
            .find(|rate| rate.id == rate_id)
            .ok_or_else(|| {
                GatewayError::invalid_shipment_option("Requested shipment option is not available")
            })
    }

    fn build_package(
        &self,
        product_ids: &[i64],
        destination: Destination,
    ) -> GatewayResult<Package> {
        let mut contents = Vec::new();
        let mut contents_cost = 0.0;

        for &product_id in product_ids {
            let product = self
                .catalog
                .product(product_id)?
                .ok_or_else(GatewayError::product_not_found)?;
            if !product.requires_shipping {
                continue;
            }
            contents_cost += product.price;
            contents.push(PackageItem::single(product.id, product.price));
        }

        if contents.is_empty() {
            return Err(GatewayError::NoShippingOptions(
                "No shippable products found".into(),
            ));
        }

        Ok(Package {
            contents,
            contents_cost,
            destination,
            customer_id: None,
        })
    }

    fn collect_rates(&self, package: &Package) -> GatewayResult<Vec<ShippingRate>> {
        let quote = self.engine.quote(package)?;
        if quote.rates.is_empty() {
            tracing::warn!(
                zone_id = quote.zone_id,
                destination = ?package.destination,
                "no rates for destination"
            );
            return Err(GatewayError::no_shipping_options());
        }
        Ok(quote.rates)
    }

    fn ensure_active(&self) -> GatewayResult<()> {
        if self.platform.is_active() {
            Ok(())
        } else {
            Err(GatewayError::backend_inactive())
        }
    }
}

fn require_product_list(products: Option<&Value>) -> GatewayResult<&[Value]> {
    products
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .filter(|list| !list.is_empty())
        .ok_or_else(|| GatewayError::invalid_product_list("Products list is required"))
}

fn parse_product_ids(list: &[Value]) -> GatewayResult<Vec<i64>> {
    list.iter()
        .map(|value| {
            let id = match value {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            };
            id.ok_or_else(|| GatewayError::invalid_product_list("Product IDs must be numeric"))
        })
        .collect()
}
