//! Catalog read operations.
//!
//! Listing and lookup with the gateway's surface rules applied: listings
//! cover published products, direct lookups enforce visibility, and
//! variation lookups resolve to their parent.

use std::sync::Arc;

use storegate_core::{CommercePlatform, GatewayError, GatewayResult};

use crate::product::{CatalogProduct, ProductKind};
use crate::store::CatalogStore;

/// One product plus its expanded variation children. Empty for anything
/// that is not a variable product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub product: CatalogProduct,
    pub variations: Vec<CatalogProduct>,
}

#[derive(Clone)]
pub struct CatalogService {
    catalog: Arc<dyn CatalogStore>,
    platform: Arc<dyn CommercePlatform>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn CatalogStore>, platform: Arc<dyn CommercePlatform>) -> Self {
        Self { catalog, platform }
    }

    /// Every published product, with variations expanded. Ids that stop
    /// resolving between listing and fetch are skipped.
    pub fn all_products(&self) -> GatewayResult<Vec<ProductDetails>> {
        self.ensure_active()?;
        let mut products = Vec::new();
        for id in self.catalog.published_ids()? {
            if let Some(product) = self.catalog.product(id)? {
                products.push(self.with_variations(product)?);
            }
        }
        Ok(products)
    }

    /// One product by id. Hidden products are reported as not visible,
    /// unknown ids as not found.
    pub fn product_by_id(&self, id: i64) -> GatewayResult<ProductDetails> {
        self.ensure_active()?;
        let product = self.lookup_visible(id)?;
        self.with_variations(product)
    }

    /// One product by id, resolving variations to their parent so clients
    /// holding a variation id land on the full variant set.
    pub fn product_with_variants(&self, id: i64) -> GatewayResult<ProductDetails> {
        self.ensure_active()?;
        let product = self.lookup_visible(id)?;

        if product.kind != ProductKind::Variation {
            return self.with_variations(product);
        }

        let parent_id = product
            .parent_id
            .ok_or_else(GatewayError::variation_parent_not_found)?;
        let parent = self
            .catalog
            .product(parent_id)?
            .ok_or_else(GatewayError::variation_parent_not_found)?;
        if !parent.visible {
            return Err(GatewayError::ProductNotVisible(
                "Variation parent product not visible".into(),
            ));
        }
        self.with_variations(parent)
    }

    fn lookup_visible(&self, id: i64) -> GatewayResult<CatalogProduct> {
        let product = self
            .catalog
            .product(id)?
            .ok_or_else(GatewayError::product_not_found)?;
        if !product.visible {
            return Err(GatewayError::product_not_visible());
        }
        Ok(product)
    }

    fn with_variations(&self, product: CatalogProduct) -> GatewayResult<ProductDetails> {
        let mut variations = Vec::new();
        if product.kind == ProductKind::Variable {
            for child_id in &product.children {
                match self.catalog.product(*child_id)? {
                    Some(variation) if variation.visible => variations.push(variation),
                    _ => {}
                }
            }
        }
        Ok(ProductDetails { product, variations })
    }

    fn ensure_active(&self) -> GatewayResult<()> {
        if self.platform.is_active() {
            Ok(())
        } else {
            Err(GatewayError::backend_inactive())
        }
    }
}
