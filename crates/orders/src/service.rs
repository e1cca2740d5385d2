//! Order orchestration.
//!
//! Validates the raw request in a fixed sequence, then drives the order
//! store: draft, addresses, lines, shipping, totals, discount, persist,
//! stock. Everything before draft creation is side-effect free; once the
//! draft exists there is no compensation, so a later failure leaves the
//! draft behind in the backend.

use std::sync::Arc;

use serde_json::{Map, Value};

use storegate_catalog::{CatalogProduct, CatalogStore};
use storegate_core::{BuyerInfo, CommercePlatform, GatewayError, GatewayResult, address};
use storegate_shipping::ShippingService;

use crate::model::{
    FeeLine, OrderDraft, OrderLine, OrderPlaced, OrderStatus, PAYMENT_METHOD_ID,
    PAYMENT_METHOD_TITLE, ShippingLine,
};
use crate::store::{CustomerDirectory, OrderStore};

struct ValidatedItem {
    product: CatalogProduct,
    quantity: i64,
}

#[derive(Clone)]
pub struct OrderService {
    catalog: Arc<dyn CatalogStore>,
    store: Arc<dyn OrderStore>,
    customers: Arc<dyn CustomerDirectory>,
    platform: Arc<dyn CommercePlatform>,
    shipping: ShippingService,
}

impl OrderService {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        store: Arc<dyn OrderStore>,
        customers: Arc<dyn CustomerDirectory>,
        platform: Arc<dyn CommercePlatform>,
        shipping: ShippingService,
    ) -> Self {
        Self {
            catalog,
            store,
            customers,
            platform,
            shipping,
        }
    }

    /// Create an order from the raw request payload.
    pub fn create_order(&self, payload: Option<&Value>) -> GatewayResult<OrderPlaced> {
        self.ensure_active()?;
        let request = payload
            .and_then(Value::as_object)
            .ok_or_else(|| GatewayError::invalid_order_request("Invalid request body"))?;

        let buyer = parse_buyer(request.get("buyer"))?;
        address::validate(request.get("billingAddress"))?;
        address::validate(request.get("shippingAddress"))?;
        let items = self.validate_products(request.get("products"))?;
        let option_id = require_shipment_option(request)?;

        let mut draft = self.store.create_draft().map_err(|err| {
            tracing::error!(error = %err, "order draft creation failed");
            GatewayError::internal("Order creation failed")
        })?;
        draft.customer_id = self.customers.customer_id_by_email(&buyer.email)?;
        draft.billing = address::order_address(request.get("billingAddress"), &buyer, true)?;
        draft.shipping = address::order_address(request.get("shippingAddress"), &buyer, false)?;

        for item in &items {
            draft.lines.push(OrderLine {
                product_id: item.product.id,
                name: item.product.name.clone(),
                quantity: item.quantity,
                unit_price: item.product.price,
                line_total: item.product.price * item.quantity as f64,
                line_tax: 0.0,
            });
        }

        let product_ids: Vec<i64> = items.iter().map(|item| item.product.id).collect();
        let rate =
            self.shipping
                .rate_by_id(&product_ids, request.get("shippingAddress"), &option_id)?;
        draft.shipping_line = Some(ShippingLine {
            rate_id: rate.id.clone(),
            method_id: rate.method_id.clone(),
            label: rate.label.clone(),
            cost: rate.cost,
            tax: rate.tax_total(),
        });

        draft.currency = self.platform.currency();
        draft.payment_method = PAYMENT_METHOD_ID.into();
        draft.payment_method_title = PAYMENT_METHOD_TITLE.into();

        self.store.compute_totals(&mut draft)?;

        if let Some(amount) = request.get("discountAmount").filter(|v| !v.is_null()) {
            // The draft already exists in the backend and is not compensated
            // when the discount is rejected.
            if let Err(err) = self.apply_discount(&mut draft, amount) {
                tracing::warn!(order_id = draft.id, error = %err, "discount rejected after draft creation");
                return Err(err);
            }
        }

        draft.status = OrderStatus::Processing;
        self.store.persist(&draft)?;
        self.store.decrement_stock(&draft)?;

        Ok(OrderPlaced {
            order_id: draft.id,
            order_number: draft.number.clone(),
            status: draft.status.as_str().into(),
            total: draft.total,
            currency: draft.currency.clone(),
            payment_method: draft.payment_method.clone(),
        })
    }

    /// Validate the product list and check stock rules item by item.
    fn validate_products(&self, products: Option<&Value>) -> GatewayResult<Vec<ValidatedItem>> {
        let list = products
            .and_then(Value::as_array)
            .filter(|list| !list.is_empty())
            .ok_or_else(|| GatewayError::invalid_product_list("Products list is required"))?;

        let mut items = Vec::with_capacity(list.len());
        for entry in list {
            let record = entry
                .as_object()
                .ok_or_else(|| GatewayError::invalid_product_list("productId is required"))?;
            let product_id = record
                .get("productId")
                .and_then(int_value)
                .filter(|id| *id > 0)
                .ok_or_else(|| GatewayError::invalid_product_list("productId is required"))?;

            let quantity = record.get("quantity").and_then(int_value).unwrap_or(0);
            if quantity < 1 {
                return Err(GatewayError::invalid_product_list(
                    "quantity must be at least 1",
                ));
            }

            let product = self
                .catalog
                .product(product_id)?
                .ok_or_else(GatewayError::product_not_found)?;
            assert_stock(&product, quantity)?;

            items.push(ValidatedItem { product, quantity });
        }
        Ok(items)
    }

    fn apply_discount(&self, draft: &mut OrderDraft, amount: &Value) -> GatewayResult<()> {
        let discount = amount
            .as_f64()
            .ok_or_else(|| GatewayError::invalid_order_request("discountAmount must be numeric"))?;
        if discount <= 0.0 {
            return Err(GatewayError::invalid_order_request(
                "discountAmount must be greater than 0",
            ));
        }
        if discount > draft.total {
            return Err(GatewayError::discount_exceeds_total());
        }

        draft.fees.push(FeeLine {
            name: "Discount".into(),
            total: -discount,
            taxable: false,
        });
        self.store.compute_totals(draft)?;
        Ok(())
    }

    fn ensure_active(&self) -> GatewayResult<()> {
        if self.platform.is_active() {
            Ok(())
        } else {
            Err(GatewayError::backend_inactive())
        }
    }
}

fn parse_buyer(raw: Option<&Value>) -> GatewayResult<BuyerInfo> {
    let Some(record) = raw.and_then(Value::as_object) else {
        return Err(GatewayError::invalid_order_request("buyer.email is required"));
    };
    let email = text(record, "email")
        .ok_or_else(|| GatewayError::invalid_order_request("buyer.email is required"))?;
    Ok(BuyerInfo {
        email,
        first_name: text(record, "firstName"),
        last_name: text(record, "lastName"),
        phone: text(record, "phone"),
    })
}

fn require_shipment_option(request: &Map<String, Value>) -> GatewayResult<String> {
    let option_id = match request.get("shipmentOptionId") {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    option_id
        .ok_or_else(|| GatewayError::invalid_shipment_option("shipmentOptionId is required"))
}

fn assert_stock(product: &CatalogProduct, quantity: i64) -> GatewayResult<()> {
    let stock = &product.stock;
    if !stock.in_stock && !stock.backorders_allowed {
        return Err(GatewayError::insufficient_stock("Product is out of stock"));
    }
    if stock.manage_stock {
        let available = stock.stock_quantity.unwrap_or(0);
        if available < quantity && !stock.backorders_allowed {
            return Err(GatewayError::insufficient_stock(
                "Insufficient stock quantity",
            ));
        }
    }
    Ok(())
}

fn text(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use storegate_core::BackendError;
    use storegate_catalog::StockInfo;
    use storegate_shipping::{Package, RateEngine, ShippingRate, ZoneQuote};

    struct MapCatalog {
        products: BTreeMap<i64, CatalogProduct>,
    }

    impl CatalogStore for MapCatalog {
        fn product(&self, id: i64) -> Result<Option<CatalogProduct>, BackendError> {
            Ok(self.products.get(&id).cloned())
        }

        fn published_ids(&self) -> Result<Vec<i64>, BackendError> {
            Ok(self.products.keys().copied().collect())
        }
    }

    /// Records every store interaction so tests can assert on the sequence.
    #[derive(Default)]
    struct RecordingStore {
        next_id: Mutex<i64>,
        persisted: Mutex<Vec<OrderDraft>>,
        stock_reduced: Mutex<Vec<i64>>,
        fail_draft: bool,
    }

    impl OrderStore for RecordingStore {
        fn create_draft(&self) -> Result<OrderDraft, BackendError> {
            if self.fail_draft {
                return Err(BackendError::Other(anyhow::anyhow!("wp_insert_post failed")));
            }
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let id = 1000 + *next;
            Ok(OrderDraft::new(id, id.to_string()))
        }

        fn compute_totals(&self, draft: &mut OrderDraft) -> Result<(), BackendError> {
            let lines: f64 = draft.lines.iter().map(|l| l.line_total + l.line_tax).sum();
            let shipping: f64 = draft
                .shipping_line
                .as_ref()
                .map(|s| s.cost + s.tax)
                .unwrap_or(0.0);
            let fees: f64 = draft.fees.iter().map(|f| f.total).sum();
            draft.total = lines + shipping + fees;
            Ok(())
        }

        fn persist(&self, draft: &OrderDraft) -> Result<(), BackendError> {
            self.persisted.lock().unwrap().push(draft.clone());
            Ok(())
        }

        fn decrement_stock(&self, draft: &OrderDraft) -> Result<(), BackendError> {
            self.stock_reduced.lock().unwrap().push(draft.id);
            Ok(())
        }
    }

    struct MapDirectory {
        by_email: BTreeMap<String, i64>,
    }

    impl CustomerDirectory for MapDirectory {
        fn customer_id_by_email(&self, email: &str) -> Result<Option<i64>, BackendError> {
            Ok(self.by_email.get(email).copied())
        }
    }

    struct FixedEngine {
        rates: Vec<ShippingRate>,
    }

    impl RateEngine for FixedEngine {
        fn quote(&self, _package: &Package) -> Result<ZoneQuote, BackendError> {
            Ok(ZoneQuote {
                zone_id: 1,
                rates: self.rates.clone(),
            })
        }
    }

    struct StubPlatform {
        active: bool,
    }

    impl CommercePlatform for StubPlatform {
        fn is_active(&self) -> bool {
            self.active
        }

        fn version(&self) -> Option<String> {
            Some("9.4.0".into())
        }

        fn currency(&self) -> String {
            "TRY".into()
        }
    }

    struct Fixture {
        service: OrderService,
        store: Arc<RecordingStore>,
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingStore::default(), true)
    }

    fn fixture_with(store: RecordingStore, active: bool) -> Fixture {
        let mut limited = CatalogProduct::simple(2, "Filter Coffee 250g", 120.0);
        limited.stock = StockInfo::managed(3);
        let mut sold_out = CatalogProduct::simple(4, "Moka Pot", 450.0);
        sold_out.stock = StockInfo::managed(0);
        let mut backordered = CatalogProduct::simple(5, "Cezve", 200.0);
        backordered.stock = StockInfo::managed(1);
        backordered.stock.backorders_allowed = true;
        let products = vec![
            CatalogProduct::simple(1, "French Press", 650.0),
            limited,
            sold_out,
            backordered,
        ];
        let catalog = Arc::new(MapCatalog {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        });

        let engine = Arc::new(FixedEngine {
            rates: vec![ShippingRate {
                id: "flat_rate:1".into(),
                label: "Standart Kargo".into(),
                method_id: "flat_rate".into(),
                cost: 49.90,
                taxes: vec![9.98],
            }],
        });
        let platform = Arc::new(StubPlatform { active });
        let shipping = ShippingService::new(catalog.clone(), engine, platform.clone());

        let store = Arc::new(store);
        let customers = Arc::new(MapDirectory {
            by_email: BTreeMap::from([("known@example.com".to_string(), 77_i64)]),
        });

        Fixture {
            service: OrderService::new(catalog, store.clone(), customers, platform, shipping),
            store,
        }
    }

    fn valid_payload() -> Value {
        json!({
            "buyer": {
                "email": "known@example.com",
                "firstName": "Ayşe",
                "lastName": "Demir",
                "phone": "+90 555 000 00 00"
            },
            "billingAddress": {"countryId": "TR", "cityId": "34", "districtId": "Kadıköy"},
            "shippingAddress": {"countryId": "TR", "cityId": "34", "districtId": "Kadıköy"},
            "products": [
                {"productId": 1, "quantity": 1},
                {"productId": 2, "quantity": 2}
            ],
            "shipmentOptionId": "flat_rate:1"
        })
    }

    #[test]
    fn happy_path_places_a_processing_order() {
        let fix = fixture();
        let placed = fix.service.create_order(Some(&valid_payload())).unwrap();

        assert_eq!(placed.status, "processing");
        assert_eq!(placed.currency, "TRY");
        assert_eq!(placed.payment_method, "storegate-app");
        // 650 + 2 * 120 + 49.90 + 9.98
        assert!((placed.total - 949.88).abs() < 1e-9);

        let persisted = fix.store.persisted.lock().unwrap();
        assert_eq!(persisted.len(), 1);
        let draft = &persisted[0];
        assert_eq!(draft.customer_id, Some(77));
        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.lines[1].quantity, 2);
        assert_eq!(draft.status, OrderStatus::Processing);
        assert_eq!(draft.payment_method_title, "Storegate App");
        assert_eq!(
            draft.shipping_line.as_ref().map(|s| s.rate_id.as_str()),
            Some("flat_rate:1")
        );
        // Billing carries contact data, shipping does not.
        assert_eq!(draft.billing.email.as_deref(), Some("known@example.com"));
        assert_eq!(draft.shipping.email, None);
        assert_eq!(draft.billing.state, "TR34");

        assert_eq!(*fix.store.stock_reduced.lock().unwrap(), vec![draft.id]);
    }

    #[test]
    fn unknown_buyer_places_a_guest_order() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["buyer"]["email"] = json!("guest@example.com");

        fix.service.create_order(Some(&payload)).unwrap();
        let persisted = fix.store.persisted.lock().unwrap();
        assert_eq!(persisted[0].customer_id, None);
    }

    #[test]
    fn non_record_body_is_rejected() {
        let fix = fixture();
        let err = fix.service.create_order(Some(&json!([1, 2]))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid request body");
        let err = fix.service.create_order(None).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidOrderRequest(_)));
    }

    #[test]
    fn buyer_email_is_checked_before_addresses() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["buyer"] = json!({"firstName": "Ayşe"});
        payload["billingAddress"] = json!("broken");

        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "buyer.email is required");
    }

    #[test]
    fn billing_address_is_checked_before_shipping_address() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["billingAddress"] = json!({"countryId": "TR"});
        payload["shippingAddress"] = json!("broken");

        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "countryId, cityId and districtId are required"
        );
    }

    #[test]
    fn product_entries_need_positive_ids_and_quantities() {
        let fix = fixture();

        let mut payload = valid_payload();
        payload["products"] = json!([{"quantity": 1}]);
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "productId is required");

        let mut payload = valid_payload();
        payload["products"] = json!([{"productId": 1}]);
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "quantity must be at least 1");

        let mut payload = valid_payload();
        payload["products"] = json!([{"productId": 1, "quantity": 0}]);
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "quantity must be at least 1");

        let mut payload = valid_payload();
        payload["products"] = json!([]);
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "Products list is required");
    }

    #[test]
    fn unknown_product_is_not_found() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["products"] = json!([{"productId": 99, "quantity": 1}]);
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert!(matches!(err, GatewayError::ProductNotFound(_)));
    }

    #[test]
    fn stock_rules_reject_before_any_draft_exists() {
        let fix = fixture();

        let mut payload = valid_payload();
        payload["products"] = json!([{"productId": 4, "quantity": 1}]);
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "Product is out of stock");

        let mut payload = valid_payload();
        payload["products"] = json!([{"productId": 2, "quantity": 5}]);
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient stock quantity");

        assert_eq!(*fix.store.next_id.lock().unwrap(), 0);
        assert!(fix.store.persisted.lock().unwrap().is_empty());
    }

    #[test]
    fn backorders_allow_ordering_past_available_stock() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["products"] = json!([{"productId": 5, "quantity": 2}]);

        let placed = fix.service.create_order(Some(&payload)).unwrap();
        // 2 * 200 + 49.90 + 9.98
        assert!((placed.total - 459.88).abs() < 1e-9);
        assert_eq!(fix.store.persisted.lock().unwrap().len(), 1);
    }

    #[test]
    fn missing_shipment_option_is_rejected_before_the_draft() {
        let fix = fixture();
        for missing in [json!(""), json!("   "), Value::Null] {
            let mut payload = valid_payload();
            payload["shipmentOptionId"] = missing;
            let err = fix.service.create_order(Some(&payload)).unwrap_err();
            assert_eq!(err.to_string(), "shipmentOptionId is required");
        }
        assert_eq!(*fix.store.next_id.lock().unwrap(), 0);
    }

    #[test]
    fn unavailable_shipment_option_fails_after_the_draft() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["shipmentOptionId"] = json!("free_shipping:9");

        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidShipmentOption(_)));
        // The draft was already allocated and stays behind unpersisted.
        assert_eq!(*fix.store.next_id.lock().unwrap(), 1);
        assert!(fix.store.persisted.lock().unwrap().is_empty());
        assert!(fix.store.stock_reduced.lock().unwrap().is_empty());
    }

    #[test]
    fn draft_creation_failure_reads_as_order_creation_failed() {
        let fix = fixture_with(
            RecordingStore {
                fail_draft: true,
                ..RecordingStore::default()
            },
            true,
        );
        let err = fix.service.create_order(Some(&valid_payload())).unwrap_err();
        assert_eq!(err.to_string(), "Order creation failed");
        assert!(matches!(err, GatewayError::Internal(_)));
    }

    #[test]
    fn discount_reduces_the_total() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["discountAmount"] = json!(100.0);

        let placed = fix.service.create_order(Some(&payload)).unwrap();
        assert!((placed.total - 849.88).abs() < 1e-9);

        let persisted = fix.store.persisted.lock().unwrap();
        let fees = &persisted[0].fees;
        assert_eq!(fees.len(), 1);
        assert_eq!(fees[0].name, "Discount");
        assert!((fees[0].total + 100.0).abs() < 1e-9);
        assert!(!fees[0].taxable);
    }

    #[test]
    fn discount_must_be_a_positive_number() {
        let fix = fixture();

        let mut payload = valid_payload();
        payload["discountAmount"] = json!("fifty");
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "discountAmount must be numeric");
        assert!(matches!(err, GatewayError::InvalidOrderRequest(_)));

        let mut payload = valid_payload();
        payload["discountAmount"] = json!(-5);
        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "discountAmount must be greater than 0");
    }

    #[test]
    fn discount_above_total_is_rejected_and_nothing_is_persisted() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["discountAmount"] = json!(10_000);

        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert!(matches!(err, GatewayError::DiscountExceedsTotal(_)));
        assert!(fix.store.persisted.lock().unwrap().is_empty());
        assert!(fix.store.stock_reduced.lock().unwrap().is_empty());
    }

    #[test]
    fn discount_equal_to_the_total_brings_it_to_zero() {
        let fix = fixture();
        let mut payload = valid_payload();
        // 949.88 is the fixture order's pre-discount total.
        payload["discountAmount"] = json!(949.88);

        let placed = fix.service.create_order(Some(&payload)).unwrap();
        assert!(placed.total.abs() < 1e-9);
        assert_eq!(placed.status, "processing");
        assert_eq!(fix.store.persisted.lock().unwrap().len(), 1);
    }

    #[test]
    fn discount_just_above_the_total_is_rejected() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["discountAmount"] = json!(950.88);

        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert!(matches!(err, GatewayError::DiscountExceedsTotal(_)));
    }

    #[test]
    fn zero_discount_is_rejected() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["discountAmount"] = json!(0);

        let err = fix.service.create_order(Some(&payload)).unwrap_err();
        assert_eq!(err.to_string(), "discountAmount must be greater than 0");
        assert!(matches!(err, GatewayError::InvalidOrderRequest(_)));
    }

    #[test]
    fn null_discount_counts_as_absent() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["discountAmount"] = Value::Null;
        let placed = fix.service.create_order(Some(&payload)).unwrap();
        assert!((placed.total - 949.88).abs() < 1e-9);
    }

    #[test]
    fn inactive_platform_rejects_order_creation() {
        let fix = fixture_with(RecordingStore::default(), false);
        let err = fix.service.create_order(Some(&valid_payload())).unwrap_err();
        assert!(matches!(err, GatewayError::BackendInactive(_)));
    }

    #[test]
    fn numeric_strings_are_accepted_for_ids_and_quantities() {
        let fix = fixture();
        let mut payload = valid_payload();
        payload["products"] = json!([{"productId": "1", "quantity": "2"}]);
        let placed = fix.service.create_order(Some(&payload)).unwrap();
        // 2 * 650 + 49.90 + 9.98
        assert!((placed.total - 1359.88).abs() < 1e-9);
    }
}
