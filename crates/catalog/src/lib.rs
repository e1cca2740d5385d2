//! Catalog domain module.
//!
//! Read-side product model and the visibility rules the gateway applies on
//! top of the raw catalog: published-only listings, visibility filtering,
//! and variation-to-parent resolution.

pub mod product;
pub mod service;
pub mod store;

pub use product::{
    AttributeTerm, AttributeValue, CatalogProduct, CustomOption, Dimensions, ImageRef,
    ProductAttribute, ProductKind, StockInfo,
};
pub use service::{CatalogService, ProductDetails};
pub use store::CatalogStore;
