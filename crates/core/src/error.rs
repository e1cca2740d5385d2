//! Gateway failure taxonomy.

use thiserror::Error;

/// Result type used across the gateway services.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Stable machine-readable error codes, grouped by numeric prefix.
///
/// These are part of the wire contract; clients branch on them. Never renumber
/// an existing code.
pub mod codes {
    // 1xxx: gateway and platform failures.
    pub const INTERNAL_ERROR: &str = "1000";
    pub const BAD_REQUEST: &str = "1001";
    pub const NOT_FOUND: &str = "1002";
    pub const SERVICE_UNAVAILABLE: &str = "1003";
    pub const BACKEND_INACTIVE: &str = "1004";

    // 2xxx: product failures.
    pub const INVALID_PRODUCT_ID: &str = "2000";
    pub const PRODUCT_NOT_FOUND: &str = "2001";
    pub const PRODUCT_NOT_VISIBLE: &str = "2002";
    pub const VARIATION_PARENT_NOT_FOUND: &str = "2003";
    pub const INVALID_PRODUCT_LIST: &str = "2004";

    // 3xxx: shipping and address failures.
    pub const INVALID_ADDRESS: &str = "3000";
    pub const NO_SHIPPING_OPTIONS: &str = "3001";

    // 4xxx: order failures.
    pub const INVALID_ORDER_REQUEST: &str = "4000";
    pub const INVALID_SHIPMENT_OPTION: &str = "4001";
    pub const INSUFFICIENT_STOCK: &str = "4002";
    pub const DISCOUNT_EXCEEDS_TOTAL: &str = "4003";
}

/// Failure reported by an external collaborator (catalog, rate engine,
/// order store). Converted into [`GatewayError`] at the service layer.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend refused or could not accept work.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Anything else the backend surfaced.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Typed gateway failure.
///
/// A closed set of variants, each carrying the client-facing message and
/// mapping to a stable error code plus HTTP status. Errors are constructed at
/// the point of violation and cross every layer unmodified until the HTTP
/// boundary shapes them into the response envelope.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Internal(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    /// The commerce backend is installed but not serving.
    #[error("{0}")]
    BackendInactive(String),

    #[error("{0}")]
    InvalidProductId(String),

    #[error("{0}")]
    ProductNotFound(String),

    /// The product exists but is hidden from the catalog surface.
    #[error("{0}")]
    ProductNotVisible(String),

    #[error("{0}")]
    VariationParentNotFound(String),

    /// A product id list was missing, empty, or malformed.
    #[error("{0}")]
    InvalidProductList(String),

    #[error("{0}")]
    InvalidAddress(String),

    #[error("{0}")]
    NoShippingOptions(String),

    #[error("{0}")]
    InvalidOrderRequest(String),

    #[error("{0}")]
    InvalidShipmentOption(String),

    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    DiscountExceedsTotal(String),

    /// Unclassified failure. The boundary logs the cause and reports a
    /// generic message; the cause never reaches the client.
    #[error("Unexpected error")]
    Unexpected(anyhow::Error),
}

impl GatewayError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn backend_inactive() -> Self {
        Self::BackendInactive("Commerce backend is not active".into())
    }

    pub fn invalid_product_id() -> Self {
        Self::InvalidProductId("Invalid product ID".into())
    }

    pub fn product_not_found() -> Self {
        Self::ProductNotFound("Product not found".into())
    }

    pub fn product_not_visible() -> Self {
        Self::ProductNotVisible("Product not visible".into())
    }

    pub fn variation_parent_not_found() -> Self {
        Self::VariationParentNotFound("Variation parent product not found".into())
    }

    pub fn invalid_product_list(msg: impl Into<String>) -> Self {
        Self::InvalidProductList(msg.into())
    }

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::InvalidAddress(msg.into())
    }

    pub fn no_shipping_options() -> Self {
        Self::NoShippingOptions("No shipping options available".into())
    }

    pub fn invalid_order_request(msg: impl Into<String>) -> Self {
        Self::InvalidOrderRequest(msg.into())
    }

    pub fn invalid_shipment_option(msg: impl Into<String>) -> Self {
        Self::InvalidShipmentOption(msg.into())
    }

    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        Self::InsufficientStock(msg.into())
    }

    pub fn discount_exceeds_total() -> Self {
        Self::DiscountExceedsTotal("Discount exceeds order total".into())
    }

    pub fn unexpected(cause: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected(cause.into())
    }

    /// Stable machine-readable code for this failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Internal(_) | Self::Unexpected(_) => codes::INTERNAL_ERROR,
            Self::BadRequest(_) => codes::BAD_REQUEST,
            Self::NotFound(_) => codes::NOT_FOUND,
            Self::ServiceUnavailable(_) => codes::SERVICE_UNAVAILABLE,
            Self::BackendInactive(_) => codes::BACKEND_INACTIVE,
            Self::InvalidProductId(_) => codes::INVALID_PRODUCT_ID,
            Self::ProductNotFound(_) => codes::PRODUCT_NOT_FOUND,
            Self::ProductNotVisible(_) => codes::PRODUCT_NOT_VISIBLE,
            Self::VariationParentNotFound(_) => codes::VARIATION_PARENT_NOT_FOUND,
            Self::InvalidProductList(_) => codes::INVALID_PRODUCT_LIST,
            Self::InvalidAddress(_) => codes::INVALID_ADDRESS,
            Self::NoShippingOptions(_) => codes::NO_SHIPPING_OPTIONS,
            Self::InvalidOrderRequest(_) => codes::INVALID_ORDER_REQUEST,
            Self::InvalidShipmentOption(_) => codes::INVALID_SHIPMENT_OPTION,
            Self::InsufficientStock(_) => codes::INSUFFICIENT_STOCK,
            Self::DiscountExceedsTotal(_) => codes::DISCOUNT_EXCEEDS_TOTAL,
        }
    }

    /// HTTP status this failure maps to at the boundary.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Internal(_) | Self::Unexpected(_) => 500,
            Self::ServiceUnavailable(_) | Self::BackendInactive(_) => 503,
            Self::NotFound(_)
            | Self::ProductNotFound(_)
            | Self::ProductNotVisible(_)
            | Self::VariationParentNotFound(_)
            | Self::NoShippingOptions(_) => 404,
            Self::BadRequest(_)
            | Self::InvalidProductId(_)
            | Self::InvalidProductList(_)
            | Self::InvalidAddress(_)
            | Self::InvalidOrderRequest(_)
            | Self::InvalidShipmentOption(_)
            | Self::InsufficientStock(_)
            | Self::DiscountExceedsTotal(_) => 400,
        }
    }

    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::Unexpected(_))
    }
}

impl From<BackendError> for GatewayError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unavailable(msg) => Self::ServiceUnavailable(msg),
            BackendError::Other(cause) => Self::Unexpected(cause),
        }
    }
}
