//! Destination validation and normalization.
//!
//! Client payloads carry addresses in app shape (`countryId`, `cityId`,
//! `districtId`). The rate engine and the order store want platform shape:
//! the app's city maps to the platform's state, and the app's district maps
//! to the platform's city. Everything downstream of this module works on the
//! normalized form only.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{GatewayError, GatewayResult};

/// Canonical shipping destination in platform shape.
///
/// `country`, `state` and `city` are always non-empty and sanitized; the
/// remaining fields default to empty strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub country: String,
    pub state: String,
    pub city: String,
    pub postcode: String,
    pub address_1: String,
    pub address_2: String,
}

/// Buyer contact details supplied with an order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuyerInfo {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

/// Address persisted on an order, billing or shipping side.
///
/// Contact fields are only populated on the billing side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderAddress {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Check that a raw address is a record carrying the three required fields.
pub fn validate(raw: Option<&Value>) -> GatewayResult<()> {
    normalize(raw).map(|_| ())
}

/// Validate and convert a raw client address into platform shape.
///
/// Turkish numeric province codes get the `TR` prefix the rate engine keys
/// its zones on (`34` becomes `TR34`); already-prefixed codes pass through.
pub fn normalize(raw: Option<&Value>) -> GatewayResult<Destination> {
    let record = raw
        .and_then(Value::as_object)
        .ok_or_else(|| GatewayError::invalid_address("Address is required"))?;

    let (Some(country), Some(state), Some(city)) = (
        field_text(record, "countryId"),
        field_text(record, "cityId"),
        field_text(record, "districtId"),
    ) else {
        return Err(GatewayError::invalid_address(
            "countryId, cityId and districtId are required",
        ));
    };

    let state = if country == "TR" && state.bytes().all(|b| b.is_ascii_digit()) {
        format!("TR{state}")
    } else {
        state
    };

    Ok(Destination {
        country,
        state,
        city,
        postcode: field_text(record, "postcode").unwrap_or_default(),
        address_1: field_text(record, "addressLine").unwrap_or_default(),
        address_2: String::new(),
    })
}

/// Build the address persisted on an order from a raw client address plus
/// buyer details. `include_contact` attaches email and phone; orders carry
/// contact data on the billing side only.
pub fn order_address(
    raw: Option<&Value>,
    buyer: &BuyerInfo,
    include_contact: bool,
) -> GatewayResult<OrderAddress> {
    let destination = normalize(raw)?;
    let mut address = OrderAddress {
        first_name: buyer.first_name.as_deref().map(sanitize).unwrap_or_default(),
        last_name: buyer.last_name.as_deref().map(sanitize).unwrap_or_default(),
        company: String::new(),
        address_1: destination.address_1,
        address_2: destination.address_2,
        city: destination.city,
        state: destination.state,
        postcode: destination.postcode,
        country: destination.country,
        email: None,
        phone: None,
    };
    if include_contact {
        address.email = Some(sanitize(&buyer.email));
        address.phone = buyer.phone.as_deref().map(sanitize);
    }
    Ok(address)
}

/// Strip control characters and collapse whitespace runs to single spaces.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = true;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else if !ch.is_control() {
            out.push(ch);
            last_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Sanitized text content of a field; accepts strings and numbers, treats
/// missing, blank, and other shapes as absent.
fn field_text(record: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match record.get(key) {
        Some(Value::String(s)) => sanitize(s),
        Some(Value::Number(n)) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}
