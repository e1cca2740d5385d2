//! Collaborator wiring shared by the binary and tests.

use std::sync::Arc;

use storegate_catalog::{CatalogService, CatalogStore};
use storegate_core::CommercePlatform;
use storegate_infra::InMemoryBackend;
use storegate_orders::{CustomerDirectory, OrderService, OrderStore};
use storegate_shipping::{RateEngine, ShippingService};

/// Gateway services shared across handlers via an `Extension`.
pub struct AppServices {
    pub platform: Arc<dyn CommercePlatform>,
    pub catalog: CatalogService,
    pub shipping: ShippingService,
    pub orders: OrderService,
}

impl AppServices {
    /// Wire the services from individual collaborator ports.
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        engine: Arc<dyn RateEngine>,
        store: Arc<dyn OrderStore>,
        customers: Arc<dyn CustomerDirectory>,
        platform: Arc<dyn CommercePlatform>,
    ) -> Self {
        let shipping = ShippingService::new(catalog.clone(), engine, platform.clone());
        let orders = OrderService::new(
            catalog.clone(),
            store,
            customers,
            platform.clone(),
            shipping.clone(),
        );
        let catalog = CatalogService::new(catalog, platform.clone());
        Self {
            platform,
            catalog,
            shipping,
            orders,
        }
    }

    /// Wire every port from one backend implementing them all.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: CatalogStore + RateEngine + OrderStore + CustomerDirectory + CommercePlatform + 'static,
    {
        Self::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
        )
    }
}

/// Default wiring used by the binary: the in-memory backend seeded with the
/// demo storefront, so the surface is exercisable out of the box.
pub fn build_services() -> AppServices {
    AppServices::from_backend(Arc::new(InMemoryBackend::demo()))
}
