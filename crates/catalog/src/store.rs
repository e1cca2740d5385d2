//! Catalog port.

use storegate_core::BackendError;

use crate::product::CatalogProduct;

/// Read access to the commerce catalog.
pub trait CatalogStore: Send + Sync {
    /// Fetch one product by id. `None` when the id does not resolve,
    /// regardless of visibility.
    fn product(&self, id: i64) -> Result<Option<CatalogProduct>, BackendError>;

    /// Ids of all published products, in catalog order.
    fn published_ids(&self) -> Result<Vec<i64>, BackendError>;
}
