//! Named actions the orchestrator invokes, and the registry that dispatches
//! to them.

pub mod handlers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;
use crate::kernel::message::TurnOutcome;
use crate::kernel::slots::ConversationSlots;
use crate::kernel::triage::TriageEngine;
use crate::services::geocoding::{LocationResolver, NominatimTransport};
use crate::services::shelters::{DirectoryError, ShelterDirectory};
use handlers::{CalculateRisk, EscalateToHuman, ProcessLocation, ProvideShelters, RouteAfterLocation};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("No registered action found for name '{0}'.")]
    NotFound(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub intent: Option<IntentRef>,
    #[serde(default)]
    pub text: Option<String>,
}

/// The slice of the orchestrator's conversation tracker the actions read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, name: &str, value: Value) -> Self {
        self.slots.insert(name.to_string(), value);
        self
    }

    pub fn with_intent(mut self, name: &str) -> Self {
        self.latest_message.intent = Some(IntentRef { name: Some(name.to_string()) });
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.latest_message.text = Some(text.to_string());
        self
    }

    pub fn slots(&self) -> ConversationSlots {
        ConversationSlots::from_slot_map(&self.slots)
    }

    pub fn latest_intent(&self) -> Option<&str> {
        self.latest_message.intent.as_ref()?.name.as_deref()
    }

    pub fn latest_text(&self) -> &str {
        self.latest_message.text.as_deref().unwrap_or_default()
    }
}

#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &'static str;

    /// Handle one turn. Never fails; problems surface as messages.
    async fn run(&self, tracker: &Tracker) -> TurnOutcome;
}

/// Read-only after construction; shared by every in-flight request.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: Vec<Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every action against injected collaborators.
    pub fn with_services(resolver: LocationResolver, directory: ShelterDirectory) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ProcessLocation::new(resolver)));
        registry.register(Arc::new(RouteAfterLocation));
        registry.register(Arc::new(CalculateRisk::new(TriageEngine::new())));
        registry.register(Arc::new(EscalateToHuman));
        registry.register(Arc::new(ProvideShelters::new(Arc::new(directory))));
        registry
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, DirectoryError> {
        let directory = ShelterDirectory::new(config.shelters.clone())?;
        let transport = Arc::new(NominatimTransport::new(&config.geocoding));
        Ok(Self::with_services(LocationResolver::new(transport), directory))
    }

    /// Later registrations replace earlier ones with the same name.
    pub fn register(&mut self, action: Arc<dyn Action>) {
        self.actions.retain(|a| a.name() != action.name());
        self.actions.push(action);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.iter().find(|a| a.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    pub async fn dispatch(&self, name: &str, tracker: &Tracker) -> Result<TurnOutcome, ActionError> {
        let action = self.get(name).ok_or_else(|| ActionError::NotFound(name.to_string()))?;
        info!(
            action = name,
            intent = tracker.latest_intent().unwrap_or("none"),
            "Running action"
        );
        Ok(action.run(tracker).await)
    }
}
