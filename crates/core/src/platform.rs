//! Commerce platform status port.

/// Ambient facts about the connected commerce platform.
///
/// Every service checks [`CommercePlatform::is_active`] before doing work;
/// version and currency feed the response envelope and order drafts.
pub trait CommercePlatform: Send + Sync {
    /// Whether the commerce backend is installed and serving.
    fn is_active(&self) -> bool;

    /// Backend version string, when the platform reports one.
    fn version(&self) -> Option<String>;

    /// Store currency code (ISO 4217).
    fn currency(&self) -> String;
}
