//! Read-only shelter directory keyed by city.
//!
//! Built once from configuration and shared by reference; lookups never fail
//! because the fallback city is validated at construction.

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::kernel::message::{Button, OutboundMessage, TurnOutcome};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectoryError {
    #[error("fallback city '{0}' is not in the directory")]
    MissingFallback(String),

    #[error("fallback city '{0}' has no shelters")]
    EmptyFallback(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterRecord {
    pub name: String,
    pub address: String,
    pub distance: String,
    pub maps_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityEntry {
    /// Lower-case key matched by substring against the location.
    pub key: String,
    /// Shown to the user when no location is known.
    pub display_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub shelters: Vec<ShelterRecord>,
}

impl CityEntry {
    fn matches(&self, location_lower: &str) -> bool {
        std::iter::once(&self.key)
            .chain(self.aliases.iter())
            .any(|name| location_lower.contains(&name.to_lowercase()))
    }
}

/// Cities are checked in listed order; the first containment match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterDirectoryConfig {
    pub fallback: String,
    pub cities: Vec<CityEntry>,
}

impl Default for ShelterDirectoryConfig {
    fn default() -> Self {
        Self {
            fallback: "berlin".into(),
            cities: vec![
                CityEntry {
                    key: "munich".into(),
                    display_name: "Munich".into(),
                    aliases: vec!["münchen".into()],
                    shelters: vec![ShelterRecord {
                        name: "Munich Stadtmission".into(),
                        address: "Lehrter Str. 68, 10557 Munich".into(),
                        distance: "1.2 km".into(),
                        maps_link: "https://www.google.com/maps/search/?api=1&query=Berliner+Stadtmission+Lehrter+Str+68".into(),
                    }],
                },
                CityEntry {
                    key: "berlin".into(),
                    display_name: "Berlin".into(),
                    aliases: Vec::new(),
                    shelters: vec![ShelterRecord {
                        name: "Berliner Stadtmission".into(),
                        address: "Lehrter Str. 68, 10557 Berlin".into(),
                        distance: "1.2 km".into(),
                        maps_link: "https://www.google.com/maps/search/?api=1&query=Berliner+Stadtmission+Lehrter+Str+68".into(),
                    }],
                },
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShelterDirectory {
    cities: Vec<CityEntry>,
    fallback: usize,
}

impl ShelterDirectory {
    pub fn new(config: ShelterDirectoryConfig) -> Result<Self, DirectoryError> {
        let fallback_key = config.fallback.to_lowercase();
        let fallback = config
            .cities
            .iter()
            .position(|c| c.key.to_lowercase() == fallback_key)
            .ok_or_else(|| DirectoryError::MissingFallback(config.fallback.clone()))?;

        if config.cities[fallback].shelters.is_empty() {
            return Err(DirectoryError::EmptyFallback(config.fallback));
        }

        Ok(Self { cities: config.cities, fallback })
    }

    pub fn fallback_city(&self) -> &CityEntry {
        &self.cities[self.fallback]
    }

    pub fn city_for(&self, location: Option<&str>) -> &CityEntry {
        let Some(location) = location else {
            return self.fallback_city();
        };
        let location_lower = location.to_lowercase();
        self.cities
            .iter()
            .find(|city| city.matches(&location_lower))
            .unwrap_or_else(|| self.fallback_city())
    }

    /// Never empty.
    pub fn lookup(&self, location: Option<&str>) -> &[ShelterRecord] {
        let city = self.city_for(location);
        if city.shelters.is_empty() {
            &self.fallback_city().shelters
        } else {
            &city.shelters
        }
    }

    /// Shelter list message with the UI payload the chat client renders.
    pub fn respond(&self, location: Option<&str>) -> TurnOutcome {
        let location = location.filter(|l| !l.trim().is_empty());
        let shelters = self.lookup(location);
        let label = location.unwrap_or(&self.fallback_city().display_name);

        let message = OutboundMessage::text(format!(
            "I found {} emergency shelters near {}.",
            shelters.len(),
            label
        ))
        .with_custom(json!({
            "show_shelters": true,
            "shelters": shelters,
        }))
        .with_buttons(vec![
            Button::new("Talk to Operator", "/request_operator"),
            Button::new("End Chat", "/deny_emergency"),
        ]);

        TurnOutcome::empty().say(message)
    }
}
