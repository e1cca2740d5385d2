//! Seeded demo catalog for local development.

use storegate_catalog::{
    AttributeTerm, AttributeValue, CatalogProduct, CustomOption, ImageRef, ProductAttribute,
    ProductKind, StockInfo,
};

use super::InMemoryBackend;
use super::zones::{ShippingZone, ZoneMethod, ZoneScope};

impl InMemoryBackend {
    /// Backend seeded with a small Turkish storefront: brewing gear, a
    /// variable coffee product, a digital gift card, zones for İstanbul and
    /// the rest of the country, 20% shipping VAT and one known customer.
    /// Product prices are tax inclusive; only shipping carries its own tax.
    pub fn demo() -> Self {
        Self::new()
            .with_products(demo_products())
            .with_zone(
                ShippingZone::new(1, "İstanbul")
                    .covering(ZoneScope::state("TR", "TR34"))
                    .with_method(ZoneMethod::flat_rate(1, "Standart Kargo", 49.90))
                    .with_method(ZoneMethod::free_shipping(2, "Ücretsiz Kargo", Some(500.0)))
                    .with_method(ZoneMethod::local_pickup(4, "Mağazadan Teslim", 0.0)),
            )
            .with_zone(
                ShippingZone::new(2, "Türkiye")
                    .covering(ZoneScope::country("TR"))
                    .with_method(ZoneMethod::flat_rate(3, "Yurtiçi Kargo", 79.90)),
            )
            .with_tax_rate("TR", 0.20)
            .with_customer("demo@example.com", 501)
    }
}

fn demo_products() -> Vec<CatalogProduct> {
    let mut french_press = CatalogProduct::simple(101, "French Press", 650.0);
    french_press.sku = Some("FP-850".into());
    french_press.description = "850 ml borosilicate french press.".into();
    french_press.weight = Some(0.6);
    french_press.image = Some(ImageRef {
        id: 9101,
        url: "https://shop.example/media/french-press.jpg".into(),
        alt: "French Press".into(),
    });

    let mut moka_pot = CatalogProduct::simple(102, "Moka Pot", 450.0);
    moka_pot.sku = Some("MP-6".into());
    moka_pot.sale_price = Some(399.0);
    moka_pot.price = 399.0;

    let mut filter_coffee = CatalogProduct::simple(103, "Filter Coffee 250g", 120.0);
    filter_coffee.sku = Some("FC-250".into());
    filter_coffee.stock = StockInfo::managed(40);

    let mut beans = CatalogProduct::variable(110, "Çekirdek Kahve", vec![111, 112]);
    beans.sku = Some("CK".into());
    beans.description = "Taze kavrulmuş çekirdek kahve.".into();
    beans.attributes = vec![
        ProductAttribute::Taxonomy {
            name: "Roast".into(),
            slug: "pa_roast".into(),
            visible: true,
            options: vec![
                AttributeTerm {
                    id: 31,
                    name: "Medium".into(),
                    slug: "medium".into(),
                },
                AttributeTerm {
                    id: 32,
                    name: "Dark".into(),
                    slug: "dark".into(),
                },
            ],
        },
        ProductAttribute::Custom {
            name: "Grind".into(),
            slug: "grind".into(),
            visible: true,
            options: vec![CustomOption::new("Whole Bean"), CustomOption::new("Filter")],
        },
    ];

    let mut beans_250 = CatalogProduct::variation(111, 110, "Çekirdek Kahve 250g", 140.0);
    beans_250.sku = Some("CK-250".into());
    beans_250.stock = StockInfo::managed(25);
    beans_250.variation_attributes = vec![AttributeValue {
        name: "Weight".into(),
        slug: "weight".into(),
        value: "250g".into(),
    }];

    let mut beans_1kg = CatalogProduct::variation(112, 110, "Çekirdek Kahve 1kg", 520.0);
    beans_1kg.sku = Some("CK-1000".into());
    beans_1kg.stock = StockInfo::managed(10);
    beans_1kg.variation_attributes = vec![AttributeValue {
        name: "Weight".into(),
        slug: "weight".into(),
        value: "1kg".into(),
    }];

    let mut gift_card = CatalogProduct::simple(120, "Gift Card", 500.0);
    gift_card.requires_shipping = false;
    gift_card.description = "Digital gift card delivered by email.".into();

    let mut starter_kit = CatalogProduct::simple(130, "Starter Kit", 999.0);
    starter_kit.kind = ProductKind::Bundle;
    starter_kit.sku = Some("SK-1".into());

    vec![
        french_press,
        moka_pot,
        filter_coffee,
        beans,
        beans_250,
        beans_1kg,
        gift_card,
        starter_kit,
    ]
}
