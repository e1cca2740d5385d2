//! Shipping domain module.
//!
//! Stateless rate resolution: a synthetic package built per request, a rate
//! engine port behind it, and the option shaping the gateway exposes.

pub mod engine;
pub mod package;
pub mod rate;
pub mod service;

pub use engine::RateEngine;
pub use package::{Package, PackageItem};
pub use rate::{RateOption, ShipmentOptions, ShippingRate, ZoneQuote};
pub use service::ShippingService;
