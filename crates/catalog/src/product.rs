//! Catalog product model.
//!
//! Read-side snapshot of one product as the commerce backend reports it.
//! Variations are products of kind [`ProductKind::Variation`] pointing at
//! their parent; variable parents list child ids in `children`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product kind as the backend classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Simple,
    Variable,
    Variation,
    Bundle,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Variable => "variable",
            Self::Variation => "variation",
            Self::Bundle => "bundle",
        }
    }
}

/// Stock posture for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    pub in_stock: bool,
    pub manage_stock: bool,
    pub stock_quantity: Option<i64>,
    pub backorders_allowed: bool,
}

impl StockInfo {
    /// Stock is not tracked; the product sells while flagged in stock.
    pub fn unmanaged() -> Self {
        Self {
            in_stock: true,
            manage_stock: false,
            stock_quantity: None,
            backorders_allowed: false,
        }
    }

    /// Tracked stock with a concrete quantity and no backorders.
    pub fn managed(quantity: i64) -> Self {
        Self {
            in_stock: quantity > 0,
            manage_stock: true,
            stock_quantity: Some(quantity),
            backorders_allowed: false,
        }
    }
}

/// One term of a taxonomy-backed attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeTerm {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

/// One option of a product-local custom attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomOption {
    pub name: String,
    pub slug: String,
}

impl CustomOption {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }
}

/// Product attribute. Taxonomy-backed attributes carry shared terms with
/// ids; custom attributes carry free-form options local to the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductAttribute {
    Taxonomy {
        name: String,
        slug: String,
        visible: bool,
        options: Vec<AttributeTerm>,
    },
    Custom {
        name: String,
        slug: String,
        visible: bool,
        options: Vec<CustomOption>,
    },
}

/// Attribute value pinned on a variation, e.g. `color = red`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub name: String,
    pub slug: String,
    pub value: String,
}

/// Stored image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: i64,
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// One catalog product as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub kind: ProductKind,
    /// Status is `publish`.
    pub published: bool,
    /// Passes the backend's catalog visibility rules.
    pub visible: bool,
    pub description: String,
    pub permalink: String,
    pub sku: Option<String>,
    pub price: f64,
    pub regular_price: f64,
    pub sale_price: Option<f64>,
    pub sale_from: Option<DateTime<Utc>>,
    pub sale_to: Option<DateTime<Utc>>,
    /// Physical goods need shipping; virtual and downloadable ones do not.
    pub requires_shipping: bool,
    pub stock: StockInfo,
    pub weight: Option<f64>,
    pub dimensions: Dimensions,
    pub parent_id: Option<i64>,
    pub children: Vec<i64>,
    pub image: Option<ImageRef>,
    pub gallery: Vec<ImageRef>,
    pub attributes: Vec<ProductAttribute>,
    /// Populated on variations only.
    pub variation_attributes: Vec<AttributeValue>,
}

impl CatalogProduct {
    /// Published, visible, in-stock simple product; fixture baseline.
    pub fn simple(id: i64, name: impl Into<String>, price: f64) -> Self {
        let name = name.into();
        let permalink = format!("https://shop.example/product/{}", slugify(&name));
        Self {
            id,
            name,
            kind: ProductKind::Simple,
            published: true,
            visible: true,
            description: String::new(),
            permalink,
            sku: None,
            price,
            regular_price: price,
            sale_price: None,
            sale_from: None,
            sale_to: None,
            requires_shipping: true,
            stock: StockInfo::unmanaged(),
            weight: None,
            dimensions: Dimensions::default(),
            parent_id: None,
            children: Vec::new(),
            image: None,
            gallery: Vec::new(),
            attributes: Vec::new(),
            variation_attributes: Vec::new(),
        }
    }

    /// Variation of `parent_id` with its own price.
    pub fn variation(id: i64, parent_id: i64, name: impl Into<String>, price: f64) -> Self {
        let mut product = Self::simple(id, name, price);
        product.kind = ProductKind::Variation;
        product.parent_id = Some(parent_id);
        product
    }

    /// Variable parent listing its variation ids.
    pub fn variable(id: i64, name: impl Into<String>, children: Vec<i64>) -> Self {
        let mut product = Self::simple(id, name, 0.0);
        product.kind = ProductKind::Variable;
        product.children = children;
        product
    }
}

/// Lowercase URL-safe slug: alphanumerics kept, runs of anything else
/// collapsed to single dashes.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_dash = true;
    for ch in input.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
