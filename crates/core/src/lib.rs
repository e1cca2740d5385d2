//! `storegate-core` — gateway foundation building blocks.
//!
//! Failure taxonomy with stable wire codes, address normalization, and the
//! commerce-platform status port shared by every service crate.

pub mod address;
pub mod error;
pub mod platform;

pub use address::{BuyerInfo, Destination, OrderAddress};
pub use error::{BackendError, GatewayError, GatewayResult, codes};
pub use platform::CommercePlatform;
