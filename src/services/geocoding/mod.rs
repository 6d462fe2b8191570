//! Location resolution against an external geocoding service.

pub mod client;
pub mod resolver;

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

pub use client::NominatimTransport;
pub use resolver::{LocationResolver, ResolvedLocation};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodeError {
    #[error("no usable geocoding result")]
    NotFound,

    #[error("geocoding service returned status {0}")]
    Unavailable(u16),

    #[error("geocoding request failed: {0}")]
    Network(String),

    #[error("malformed geocoding response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// How a raw location utterance is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    /// `<lat>, <lng>` with fractional parts: reverse lookup.
    Coordinates { lat: String, lng: String },
    /// Anything else: forward search for the single best match.
    Place(String),
}

fn coordinate_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(-?\d+\.\d+),\s*(-?\d+\.\d+)").expect("coordinate pattern is valid")
    })
}

impl LocationQuery {
    pub fn classify(raw: &str) -> Self {
        let text = raw.trim();
        match coordinate_pattern().captures(text) {
            Some(caps) => Self::Coordinates {
                lat: caps[1].to_string(),
                lng: caps[2].to_string(),
            },
            None => Self::Place(text.to_string()),
        }
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, Self::Coordinates { .. })
    }
}
