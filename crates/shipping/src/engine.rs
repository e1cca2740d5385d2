//! Rate engine port.

use storegate_core::BackendError;

use crate::package::Package;
use crate::rate::ZoneQuote;

/// External rate calculation engine.
///
/// The package destination is authoritative. Engines that keep an ambient
/// customer location must prime both the shipping and the billing side from
/// it before matching zones, and are therefore not reentrant across
/// concurrent quotes.
pub trait RateEngine: Send + Sync {
    /// Match a zone for the package and price every enabled method in it.
    /// An unmatched destination yields the fallback zone; a matched zone
    /// with no priceable methods yields an empty rate list.
    fn quote(&self, package: &Package) -> Result<ZoneQuote, BackendError>;
}
