//! Response JSON mapping for catalog payloads.
//!
//! The product shape on the wire is the mobile client's DTO, not the
//! domain model: string ids and prices, keys that appear only when the
//! source value is set, `gtin`/`mpn` both fed from the SKU and variation
//! summaries with numeric ids. Deterministic reshaping only.

use serde_json::{Map, Value, json};

use storegate_catalog::{CatalogProduct, ProductDetails, ProductKind};

/// Map a product listing.
pub fn products_to_json(products: &[ProductDetails]) -> Value {
    Value::Array(products.iter().map(product_to_json).collect())
}

/// Map one product with its variation summaries.
pub fn product_to_json(details: &ProductDetails) -> Value {
    let product = &details.product;
    let mut out = Map::new();

    out.insert("id".into(), json!(product.id.to_string()));
    out.insert("title".into(), json!(&product.name));
    out.insert("description".into(), json!(&product.description));
    out.insert("link".into(), json!(&product.permalink));

    if let Some(image) = &product.image {
        out.insert("imageLink".into(), json!(&image.url));
    }
    if !product.gallery.is_empty() {
        let links: Vec<&str> = product.gallery.iter().map(|image| image.url.as_str()).collect();
        out.insert("additionalImageLinks".into(), json!(links));
    }

    out.insert("inStock".into(), json!(product.stock.in_stock));
    out.insert("price".into(), json!(price_string(product.price)));
    if let Some(sale) = product.sale_price.filter(|price| *price != 0.0) {
        out.insert("salePrice".into(), json!(price_string(sale)));
    }
    if let (Some(from), Some(to)) = (product.sale_from, product.sale_to) {
        out.insert(
            "salePriceEffectiveDate".into(),
            json!(format!("{}/{}", iso_date(from), iso_date(to))),
        );
    }

    out.insert("productType".into(), json!(product.kind.as_str()));

    if let Some(sku) = product.sku.as_deref().filter(|sku| !sku.is_empty()) {
        out.insert("gtin".into(), json!(sku));
        out.insert("mpn".into(), json!(sku));
    }
    if let Some(parent_id) = product.parent_id.filter(|id| *id != 0) {
        out.insert("itemGroupId".into(), json!(parent_id.to_string()));
    }
    if product.kind == ProductKind::Bundle {
        out.insert("isBundle".into(), json!("yes"));
    }

    if let Some(length) = product.dimensions.length.filter(|value| *value != 0.0) {
        out.insert("productLength".into(), json!(length.to_string()));
    }
    if let Some(width) = product.dimensions.width.filter(|value| *value != 0.0) {
        out.insert("productWidth".into(), json!(width.to_string()));
    }
    if let Some(height) = product.dimensions.height.filter(|value| *value != 0.0) {
        out.insert("productHeight".into(), json!(height.to_string()));
    }
    if let Some(weight) = product.weight.filter(|value| *value != 0.0) {
        out.insert("productWeight".into(), json!(weight.to_string()));
    }

    out.insert(
        "variations".into(),
        Value::Array(details.variations.iter().map(variation_to_json).collect()),
    );
    out.insert("attributes".into(), json!(&product.attributes));

    Value::Object(out)
}

fn variation_to_json(variation: &CatalogProduct) -> Value {
    let mut out = Map::new();

    out.insert("id".into(), json!(variation.id));
    out.insert("sku".into(), json!(variation.sku.as_deref().unwrap_or("")));
    out.insert("price".into(), json!(price_string(variation.price)));
    if let Some(sale) = variation.sale_price.filter(|price| *price != 0.0) {
        out.insert("salePrice".into(), json!(price_string(sale)));
    }
    out.insert("inStock".into(), json!(variation.stock.in_stock));
    out.insert("attributes".into(), json!(&variation.variation_attributes));
    if let Some(image) = &variation.image {
        out.insert("image".into(), json!(image));
    }

    Value::Object(out)
}

/// Two-decimal price string, e.g. `"649.90"`.
fn price_string(price: f64) -> String {
    format!("{price:.2}")
}

fn iso_date(date: chrono::DateTime<chrono::Utc>) -> String {
    date.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use storegate_catalog::{AttributeValue, Dimensions, ImageRef, StockInfo};

    use super::*;

    fn details(product: CatalogProduct) -> ProductDetails {
        ProductDetails {
            product,
            variations: Vec::new(),
        }
    }

    #[test]
    fn simple_product_maps_ids_and_prices_as_strings() {
        let mut product = CatalogProduct::simple(101, "French Press", 650.0);
        product.sku = Some("FP-850".into());
        product.description = "Borosilicate press.".into();

        let wire = product_to_json(&details(product));
        assert_eq!(wire["id"], "101");
        assert_eq!(wire["title"], "French Press");
        assert_eq!(wire["price"], "650.00");
        assert_eq!(wire["productType"], "simple");
        assert_eq!(wire["gtin"], "FP-850");
        assert_eq!(wire["mpn"], "FP-850");
        assert_eq!(wire["inStock"], true);
        assert_eq!(wire["variations"], json!([]));
        assert_eq!(wire["attributes"], json!([]));
    }

    #[test]
    fn optional_keys_appear_only_when_set() {
        let wire = product_to_json(&details(CatalogProduct::simple(1, "Plain", 10.0)));
        for absent in [
            "imageLink",
            "additionalImageLinks",
            "salePrice",
            "salePriceEffectiveDate",
            "gtin",
            "mpn",
            "itemGroupId",
            "isBundle",
            "productLength",
            "productWeight",
        ] {
            assert!(wire.get(absent).is_none(), "unexpected key {absent}");
        }
    }

    #[test]
    fn sale_pricing_maps_price_and_effective_range() {
        let mut product = CatalogProduct::simple(102, "Moka Pot", 399.0);
        product.sale_price = Some(399.0);
        product.regular_price = 450.0;
        product.sale_from = Some(chrono::Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap());
        product.sale_to = Some(chrono::Utc.with_ymd_and_hms(2026, 8, 31, 0, 0, 0).unwrap());

        let wire = product_to_json(&details(product));
        assert_eq!(wire["salePrice"], "399.00");
        assert_eq!(
            wire["salePriceEffectiveDate"],
            "2026-08-01T00:00:00Z/2026-08-31T00:00:00Z"
        );
    }

    #[test]
    fn bundle_flag_and_dimension_strings() {
        let mut product = CatalogProduct::simple(130, "Starter Kit", 999.0);
        product.kind = ProductKind::Bundle;
        product.weight = Some(2.0);
        product.dimensions = Dimensions {
            length: Some(30.5),
            width: Some(20.0),
            height: None,
        };

        let wire = product_to_json(&details(product));
        assert_eq!(wire["isBundle"], "yes");
        assert_eq!(wire["productLength"], "30.5");
        assert_eq!(wire["productWidth"], "20");
        assert_eq!(wire["productWeight"], "2");
        assert!(wire.get("productHeight").is_none());
    }

    #[test]
    fn gallery_becomes_additional_image_links() {
        let mut product = CatalogProduct::simple(7, "Kettle", 800.0);
        product.image = Some(ImageRef {
            id: 1,
            url: "https://shop.example/media/kettle.jpg".into(),
            alt: "Kettle".into(),
        });
        product.gallery = vec![
            ImageRef {
                id: 2,
                url: "https://shop.example/media/kettle-2.jpg".into(),
                alt: String::new(),
            },
            ImageRef {
                id: 3,
                url: "https://shop.example/media/kettle-3.jpg".into(),
                alt: String::new(),
            },
        ];

        let wire = product_to_json(&details(product));
        assert_eq!(wire["imageLink"], "https://shop.example/media/kettle.jpg");
        assert_eq!(
            wire["additionalImageLinks"],
            json!([
                "https://shop.example/media/kettle-2.jpg",
                "https://shop.example/media/kettle-3.jpg"
            ])
        );
    }

    #[test]
    fn variation_summary_uses_numeric_ids_and_pinned_attributes() {
        let parent = CatalogProduct::variable(110, "Çekirdek Kahve", vec![111]);
        let mut child = CatalogProduct::variation(111, 110, "Çekirdek Kahve 250g", 140.0);
        child.sku = Some("CK-250".into());
        child.stock = StockInfo::managed(0);
        child.variation_attributes = vec![AttributeValue {
            name: "Weight".into(),
            slug: "weight".into(),
            value: "250g".into(),
        }];

        let wire = product_to_json(&ProductDetails {
            product: parent,
            variations: vec![child],
        });

        let variation = &wire["variations"][0];
        assert_eq!(variation["id"], 111);
        assert_eq!(variation["sku"], "CK-250");
        assert_eq!(variation["price"], "140.00");
        assert_eq!(variation["inStock"], false);
        assert_eq!(
            variation["attributes"],
            json!([{ "name": "Weight", "slug": "weight", "value": "250g" }])
        );
        assert!(variation.get("image").is_none());
        assert!(variation.get("description").is_none());
    }

    #[test]
    fn variation_carries_item_group_id_when_fetched_directly() {
        let wire = product_to_json(&details(CatalogProduct::variation(111, 110, "250g", 140.0)));
        assert_eq!(wire["itemGroupId"], "110");
        assert_eq!(wire["productType"], "variation");
    }
}
