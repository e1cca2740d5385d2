//! In-memory commerce backend.
//!
//! One Mutex-guarded state snapshot implementing every collaborator port
//! the gateway defines. Default wiring for development and the test suites.
//! Drafts exist in the backend from `create_draft` on, like the real
//! platform, so abandoned orders stay observable.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use storegate_catalog::{CatalogProduct, CatalogStore, ProductKind};
use storegate_core::{BackendError, CommercePlatform, Destination};
use storegate_orders::{CustomerDirectory, OrderDraft, OrderStore};
use storegate_shipping::{Package, RateEngine, ShippingRate, ZoneQuote};

use zones::{MethodKind, ShippingZone, ZoneMethod};

mod fixtures;
pub mod zones;

/// Ambient customer location. Primed from the package destination before
/// every quote; tax lookup prefers the shipping side and falls back to
/// billing.
#[derive(Debug, Clone, PartialEq)]
struct CustomerLocation {
    country: String,
    state: String,
    postcode: String,
    city: String,
}

impl CustomerLocation {
    fn from_destination(destination: &Destination) -> Self {
        Self {
            country: destination.country.clone(),
            state: destination.state.clone(),
            postcode: destination.postcode.clone(),
            city: destination.city.clone(),
        }
    }
}

#[derive(Debug)]
struct BackendState {
    active: bool,
    version: Option<String>,
    currency: String,
    products: BTreeMap<i64, CatalogProduct>,
    customers: BTreeMap<String, i64>,
    zones: Vec<ShippingZone>,
    fallback_zone: ShippingZone,
    /// Shipping tax rate by billing country.
    tax_rates: BTreeMap<String, f64>,
    shipping_location: Option<CustomerLocation>,
    billing_location: Option<CustomerLocation>,
    orders: BTreeMap<i64, OrderDraft>,
    next_order_id: i64,
}

pub struct InMemoryBackend {
    state: Mutex<BackendState>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BackendState {
                active: true,
                version: Some("9.4.1".into()),
                currency: "TRY".into(),
                products: BTreeMap::new(),
                customers: BTreeMap::new(),
                zones: Vec::new(),
                fallback_zone: ShippingZone::fallback(),
                tax_rates: BTreeMap::new(),
                shipping_location: None,
                billing_location: None,
                orders: BTreeMap::new(),
                next_order_id: 1001,
            }),
        }
    }

    pub fn with_product(mut self, product: CatalogProduct) -> Self {
        let state = self.state.get_mut().unwrap();
        state.products.insert(product.id, product);
        self
    }

    pub fn with_products(self, products: impl IntoIterator<Item = CatalogProduct>) -> Self {
        products.into_iter().fold(self, Self::with_product)
    }

    /// Zones match in the order they are added; the first match wins.
    pub fn with_zone(mut self, zone: ShippingZone) -> Self {
        self.state.get_mut().unwrap().zones.push(zone);
        self
    }

    /// Method offered to destinations no configured zone covers.
    pub fn with_fallback_method(mut self, method: ZoneMethod) -> Self {
        self.state.get_mut().unwrap().fallback_zone.methods.push(method);
        self
    }

    pub fn with_tax_rate(mut self, country: impl Into<String>, rate: f64) -> Self {
        self.state.get_mut().unwrap().tax_rates.insert(country.into(), rate);
        self
    }

    pub fn with_customer(mut self, email: impl Into<String>, id: i64) -> Self {
        let email = email.into().to_lowercase();
        self.state.get_mut().unwrap().customers.insert(email, id);
        self
    }

    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.state.get_mut().unwrap().currency = code.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.state.get_mut().unwrap().version = Some(version.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.state.get_mut().unwrap().active = false;
        self
    }

    /// Flip the platform on or off after the backend is shared.
    pub fn set_active(&self, active: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.active = active;
        }
    }

    /// Persisted or drafted order by id.
    pub fn order(&self, id: i64) -> Option<OrderDraft> {
        self.state.lock().ok().and_then(|state| state.orders.get(&id).cloned())
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().map(|state| state.orders.len()).unwrap_or(0)
    }

    fn state(&self) -> Result<MutexGuard<'_, BackendState>, BackendError> {
        self.state
            .lock()
            .map_err(|_| BackendError::Unavailable("backend state poisoned".into()))
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for InMemoryBackend {
    fn product(&self, id: i64) -> Result<Option<CatalogProduct>, BackendError> {
        Ok(self.state()?.products.get(&id).cloned())
    }

    fn published_ids(&self) -> Result<Vec<i64>, BackendError> {
        // Variations never appear as catalog entries of their own; they are
        // reached through their parent.
        Ok(self
            .state()?
            .products
            .values()
            .filter(|product| product.published && product.kind != ProductKind::Variation)
            .map(|product| product.id)
            .collect())
    }
}

impl CommercePlatform for InMemoryBackend {
    fn is_active(&self) -> bool {
        self.state.lock().map(|state| state.active).unwrap_or(false)
    }

    fn version(&self) -> Option<String> {
        self.state.lock().ok().and_then(|state| state.version.clone())
    }

    fn currency(&self) -> String {
        self.state
            .lock()
            .map(|state| state.currency.clone())
            .unwrap_or_default()
    }
}

impl CustomerDirectory for InMemoryBackend {
    fn customer_id_by_email(&self, email: &str) -> Result<Option<i64>, BackendError> {
        Ok(self.state()?.customers.get(&email.to_lowercase()).copied())
    }
}

impl RateEngine for InMemoryBackend {
    fn quote(&self, package: &Package) -> Result<ZoneQuote, BackendError> {
        let mut state = self.state()?;

        // The ambient location follows the quoted destination, shipping and
        // billing both. Concurrent quotes would race on this slot.
        let location = CustomerLocation::from_destination(&package.destination);
        state.shipping_location = Some(location.clone());
        state.billing_location = Some(location);

        let zone = state
            .zones
            .iter()
            .find(|zone| zone.matches(&package.destination))
            .unwrap_or(&state.fallback_zone)
            .clone();
        tracing::debug!(zone_id = zone.id, zone = %zone.name, "destination matched zone");

        let rates = zone
            .methods
            .iter()
            .filter_map(|method| price_method(&state, method, package))
            .collect();

        Ok(ZoneQuote {
            zone_id: zone.id,
            rates,
        })
    }
}

impl OrderStore for InMemoryBackend {
    fn create_draft(&self) -> Result<OrderDraft, BackendError> {
        let mut state = self.state()?;
        let id = state.next_order_id;
        state.next_order_id += 1;
        let draft = OrderDraft::new(id, id.to_string());
        state.orders.insert(id, draft.clone());
        Ok(draft)
    }

    fn compute_totals(&self, draft: &mut OrderDraft) -> Result<(), BackendError> {
        let lines: f64 = draft
            .lines
            .iter()
            .map(|line| line.line_total + line.line_tax)
            .sum();
        let shipping: f64 = draft
            .shipping_line
            .as_ref()
            .map(|line| line.cost + line.tax)
            .unwrap_or(0.0);
        let fees: f64 = draft.fees.iter().map(|fee| fee.total).sum();
        draft.total = lines + shipping + fees;
        Ok(())
    }

    fn persist(&self, draft: &OrderDraft) -> Result<(), BackendError> {
        self.state()?.orders.insert(draft.id, draft.clone());
        Ok(())
    }

    fn decrement_stock(&self, draft: &OrderDraft) -> Result<(), BackendError> {
        let mut state = self.state()?;
        for line in &draft.lines {
            let Some(product) = state.products.get_mut(&line.product_id) else {
                continue;
            };
            if !product.stock.manage_stock {
                continue;
            }
            if let Some(quantity) = product.stock.stock_quantity {
                let remaining = quantity - line.quantity;
                product.stock.stock_quantity = Some(remaining);
                if remaining <= 0 && !product.stock.backorders_allowed {
                    product.stock.in_stock = false;
                }
            }
        }
        Ok(())
    }
}

fn price_method(
    state: &BackendState,
    method: &ZoneMethod,
    package: &Package,
) -> Option<ShippingRate> {
    if !method.enabled {
        return None;
    }
    let cost = match &method.kind {
        MethodKind::FlatRate { cost } => *cost,
        MethodKind::FreeShipping { min_amount } => {
            if let Some(min) = min_amount {
                if package.contents_cost < *min {
                    return None;
                }
            }
            0.0
        }
        MethodKind::LocalPickup { cost } => *cost,
    };
    Some(ShippingRate {
        id: method.rate_id(),
        label: method.title.clone(),
        method_id: method.kind.method_id().to_string(),
        cost,
        taxes: shipping_taxes(state, cost),
    })
}

fn shipping_taxes(state: &BackendState, cost: f64) -> Vec<f64> {
    if cost <= 0.0 {
        return Vec::new();
    }
    let location = state
        .shipping_location
        .as_ref()
        .or(state.billing_location.as_ref());
    let Some(location) = location else {
        return Vec::new();
    };
    match state.tax_rates.get(&location.country) {
        Some(rate) if *rate > 0.0 => vec![cost * rate],
        _ => Vec::new(),
    }
}
