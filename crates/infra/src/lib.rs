//! Backend adapters.
//!
//! Implementations of the collaborator ports the gateway defines: catalog
//! reads, rate quoting, order persistence, customer lookup and platform
//! status. The in-memory backend is the default wiring for development and
//! tests.

pub mod memory;

pub use memory::InMemoryBackend;
pub use memory::zones::{MethodKind, ShippingZone, ZoneMethod, ZoneScope};
