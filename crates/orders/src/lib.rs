//! Orders domain module.
//!
//! Order creation on behalf of an external sales channel: strict payload
//! validation, shipping resolved through the quoting path, float totals,
//! and a deliberate absence of rollback once the backend draft exists.

pub mod model;
pub mod service;
pub mod store;

pub use model::{
    FeeLine, OrderDraft, OrderLine, OrderPlaced, OrderStatus, PAYMENT_METHOD_ID,
    PAYMENT_METHOD_TITLE, ShippingLine,
};
pub use service::OrderService;
pub use store::{CustomerDirectory, OrderStore};
