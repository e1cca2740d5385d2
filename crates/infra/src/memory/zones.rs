//! Shipping zone configuration for the in-memory backend.

use storegate_core::Destination;

/// Where a zone applies. Scopes are matched against the normalized
/// destination; a zone applies when any of its scopes matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneScope {
    Country(String),
    State { country: String, state: String },
}

impl ZoneScope {
    pub fn country(code: impl Into<String>) -> Self {
        Self::Country(code.into())
    }

    pub fn state(country: impl Into<String>, state: impl Into<String>) -> Self {
        Self::State {
            country: country.into(),
            state: state.into(),
        }
    }

    fn matches(&self, destination: &Destination) -> bool {
        match self {
            Self::Country(country) => destination.country == *country,
            Self::State { country, state } => {
                destination.country == *country && destination.state == *state
            }
        }
    }
}

/// Pricing behavior of one configured method.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodKind {
    FlatRate { cost: f64 },
    FreeShipping { min_amount: Option<f64> },
    LocalPickup { cost: f64 },
}

impl MethodKind {
    pub fn method_id(&self) -> &'static str {
        match self {
            Self::FlatRate { .. } => "flat_rate",
            Self::FreeShipping { .. } => "free_shipping",
            Self::LocalPickup { .. } => "local_pickup",
        }
    }
}

/// One shipping method instance inside a zone. The rate id exposed to
/// clients is `method_id:instance_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMethod {
    pub instance_id: i64,
    pub title: String,
    pub enabled: bool,
    pub kind: MethodKind,
}

impl ZoneMethod {
    pub fn flat_rate(instance_id: i64, title: impl Into<String>, cost: f64) -> Self {
        Self {
            instance_id,
            title: title.into(),
            enabled: true,
            kind: MethodKind::FlatRate { cost },
        }
    }

    pub fn free_shipping(
        instance_id: i64,
        title: impl Into<String>,
        min_amount: Option<f64>,
    ) -> Self {
        Self {
            instance_id,
            title: title.into(),
            enabled: true,
            kind: MethodKind::FreeShipping { min_amount },
        }
    }

    pub fn local_pickup(instance_id: i64, title: impl Into<String>, cost: f64) -> Self {
        Self {
            instance_id,
            title: title.into(),
            enabled: true,
            kind: MethodKind::LocalPickup { cost },
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn rate_id(&self) -> String {
        format!("{}:{}", self.kind.method_id(), self.instance_id)
    }
}

/// A shipping zone: scopes plus the methods offered inside them. Zones are
/// evaluated in configuration order; the first match wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingZone {
    pub id: i64,
    pub name: String,
    pub scopes: Vec<ZoneScope>,
    pub methods: Vec<ZoneMethod>,
}

impl ShippingZone {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            scopes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// The zone every destination falls into when nothing else matches.
    pub fn fallback() -> Self {
        Self::new(0, "Everywhere else")
    }

    pub fn covering(mut self, scope: ZoneScope) -> Self {
        self.scopes.push(scope);
        self
    }

    pub fn with_method(mut self, method: ZoneMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn matches(&self, destination: &Destination) -> bool {
        self.scopes.iter().any(|scope| scope.matches(destination))
    }
}
