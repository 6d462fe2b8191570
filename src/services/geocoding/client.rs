use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::{GeocodeError, LocationQuery};
use crate::config::GeocodingConfig;

/// The single blocking call a turn may make. Implementations must bound it
/// with a timeout.
#[async_trait]
pub trait GeocodeTransport: Send + Sync {
    /// Returns the decoded JSON body of a 200 response.
    async fn fetch(&self, query: &LocationQuery) -> Result<Value, GeocodeError>;
}

#[derive(Clone)]
pub struct NominatimTransport {
    client: Client,
    search_url: String,
    reverse_url: String,
}

impl NominatimTransport {
    pub fn new(config: &GeocodingConfig) -> Self {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&config.referer) {
            Ok(value) => {
                headers.insert(REFERER, value);
            }
            Err(e) => warn!("Ignoring invalid Referer '{}': {}", config.referer, e),
        }

        Self {
            client: Client::builder()
                .user_agent(config.user_agent.clone())
                .default_headers(headers)
                .timeout(Duration::from_secs(config.timeout_secs)) // Bounds the whole turn
                .build()
                .unwrap_or_default(),
            search_url: config.search_url.clone(),
            reverse_url: config.reverse_url.clone(),
        }
    }
}

#[async_trait]
impl GeocodeTransport for NominatimTransport {
    async fn fetch(&self, query: &LocationQuery) -> Result<Value, GeocodeError> {
        let request = match query {
            LocationQuery::Coordinates { lat, lng } => self
                .client
                .get(&self.reverse_url)
                .query(&[("lat", lat.as_str()), ("lon", lng.as_str()), ("format", "json")]),
            LocationQuery::Place(text) => self
                .client
                .get(&self.search_url)
                .query(&[("q", text.as_str()), ("format", "json"), ("limit", "1")]),
        };

        debug!(reverse = query.is_reverse(), "Sending geocoding request");
        let response = request.send().await?;

        let status = response.status();
        debug!(status = status.as_u16(), "Geocoding response received");
        if status != StatusCode::OK {
            return Err(GeocodeError::Unavailable(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}
