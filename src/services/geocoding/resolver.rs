use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::client::GeocodeTransport;
use super::{GeocodeError, LocationQuery};
use crate::kernel::message::{Button, OutboundMessage, TurnOutcome};
use crate::kernel::slots::SlotUpdate;

pub const NOT_FOUND_TEXT: &str = "I couldn't find that place. Please check the spelling.";
pub const UNAVAILABLE_TEXT: &str = "Map service is unavailable. Please try again.";
pub const TECHNICAL_ERROR_TEXT: &str = "Technical error finding location.";

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl ResolvedLocation {
    pub fn confirmation_text(&self) -> String {
        format!("I have your location as: {}. Is this correct?", self.address)
    }
}

pub struct LocationResolver {
    transport: Arc<dyn GeocodeTransport>,
}

impl LocationResolver {
    pub fn new(transport: Arc<dyn GeocodeTransport>) -> Self {
        Self { transport }
    }

    pub async fn resolve(&self, raw: &str) -> Result<ResolvedLocation, GeocodeError> {
        let query = LocationQuery::classify(raw);
        let body = self.transport.fetch(&query).await?;
        extract_result(&body, raw.trim()).ok_or(GeocodeError::NotFound)
    }

    /// Resolve and turn the result into the user-facing outcome. Failures never
    /// escape; they become an apology with no slot updates.
    pub async fn respond(&self, raw: &str) -> TurnOutcome {
        match self.resolve(raw).await {
            Ok(location) => {
                info!(address = %location.address, "Location resolved");
                let confirm = OutboundMessage::text(location.confirmation_text()).with_buttons(vec![
                    Button::new("Yes", "/confirm_location"),
                    Button::new("No", "/provide_location"),
                ]);
                TurnOutcome::empty()
                    .say(confirm)
                    .set(SlotUpdate::Location(location.address))
                    .set(SlotUpdate::LocationLat(location.lat))
                    .set(SlotUpdate::LocationLng(location.lng))
            }
            Err(e) => {
                warn!(error = %e, "Location lookup failed");
                TurnOutcome::empty().say(OutboundMessage::text(failure_text(&e)))
            }
        }
    }
}

pub fn failure_text(err: &GeocodeError) -> &'static str {
    match err {
        GeocodeError::NotFound => NOT_FOUND_TEXT,
        GeocodeError::Unavailable(_) => UNAVAILABLE_TEXT,
        GeocodeError::Network(_) | GeocodeError::Malformed(_) => TECHNICAL_ERROR_TEXT,
    }
}

/// Forward search answers with an array (first entry wins); reverse lookup
/// answers with one object, or an object carrying `error`. An empty object
/// is not a result.
pub fn extract_result(body: &Value, raw: &str) -> Option<ResolvedLocation> {
    let result = match body {
        Value::Array(items) => items.first()?,
        Value::Object(map) if !map.contains_key("error") => body,
        _ => return None,
    };
    match result.as_object() {
        Some(map) if !map.is_empty() => {}
        _ => return None,
    }

    let address = result
        .get("display_name")
        .and_then(Value::as_str)
        .unwrap_or(raw)
        .to_string();

    Some(ResolvedLocation {
        address,
        lat: coordinate(result.get("lat")),
        lng: coordinate(result.get("lon")),
    })
}

/// The service sends coordinates as strings; accept numbers too.
fn coordinate(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}
