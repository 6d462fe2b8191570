use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::slots::{SlotEvent, SlotUpdate};

/// Predefined response templates owned by the orchestrator's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    // Earthquake
    AdviceIndoors,
    AdviceOutdoors,
    AdviceVehicle,
    EarthquakeTrapped,
    EarthquakeInjured,
    AskStructuralDamage,
    AskGasLeak,
    AskNeeds,
    // Fire
    FireLarge,
    FireSmall,
    FireMonitor,
    FireEvacuateNow,
    AskFireControl,
    // Flood
    AskEvacuate,
    AskFloodZone,
    FloodShutdownEvacuate,
    FloodMoveHigh,
    FloodPrepare,
    FloodStayInformed,
    // Shared questions
    AskInjury,
    AskIndoors,
    AskFireSeverity,
    AskWaterLevel,
}

impl Template {
    pub fn id(self) -> &'static str {
        match self {
            Self::AdviceIndoors => "utter_advice_indoors",
            Self::AdviceOutdoors => "utter_advice_outdoors",
            Self::AdviceVehicle => "utter_advice_vehicle",
            Self::EarthquakeTrapped => "utter_earthquake_trapped",
            Self::EarthquakeInjured => "utter_earthquake_injured",
            Self::AskStructuralDamage => "utter_ask_structural_damage",
            Self::AskGasLeak => "utter_ask_gas_leak",
            Self::AskNeeds => "utter_ask_needs",
            Self::FireLarge => "utter_fire_large",
            Self::FireSmall => "utter_fire_small",
            Self::FireMonitor => "utter_fire_monitor",
            Self::FireEvacuateNow => "utter_fire_evacuate_now",
            Self::AskFireControl => "utter_ask_fire_control",
            Self::AskEvacuate => "utter_ask_evacuate",
            Self::AskFloodZone => "utter_ask_flood_zone",
            Self::FloodShutdownEvacuate => "utter_flood_shutdown_evacuate",
            Self::FloodMoveHigh => "utter_flood_move_high",
            Self::FloodPrepare => "utter_flood_prepare",
            Self::FloodStayInformed => "utter_flood_stay_informed",
            Self::AskInjury => "utter_ask_injury",
            Self::AskIndoors => "utter_ask_indoors",
            Self::AskFireSeverity => "utter_ask_fire_severity",
            Self::AskWaterLevel => "utter_ask_water_level",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    pub payload: String,
}

impl Button {
    pub fn new(title: &str, payload: &str) -> Self {
        Self {
            title: title.to_string(),
            payload: payload.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Template(Template),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub body: MessageBody,
    pub buttons: Vec<Button>,
    /// Structured UI hint (e.g. `{"handoff": true}`).
    pub custom: Option<Value>,
}

impl OutboundMessage {
    pub fn template(template: Template) -> Self {
        Self {
            body: MessageBody::Template(template),
            buttons: Vec::new(),
            custom: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            body: MessageBody::Text(text.into()),
            buttons: Vec::new(),
            custom: None,
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<Button>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_custom(mut self, custom: Value) -> Self {
        self.custom = Some(custom);
        self
    }

    pub fn template_id(&self) -> Option<&'static str> {
        match &self.body {
            MessageBody::Template(t) => Some(t.id()),
            MessageBody::Text(_) => None,
        }
    }

    pub fn text_body(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text(t) => Some(t),
            MessageBody::Template(_) => None,
        }
    }
}

/// Wire form of an outbound message in the action server response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl From<&OutboundMessage> for BotResponse {
    fn from(message: &OutboundMessage) -> Self {
        Self {
            text: message.text_body().map(str::to_string),
            response: message.template_id().map(str::to_string),
            buttons: message.buttons.clone(),
            custom: message.custom.clone(),
        }
    }
}

/// Everything a handler produces for one turn: messages to send, then slot
/// updates for the orchestrator to apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOutcome {
    pub messages: Vec<OutboundMessage>,
    pub updates: Vec<SlotUpdate>,
}

impl TurnOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn say(mut self, message: OutboundMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn utter(self, template: Template) -> Self {
        self.say(OutboundMessage::template(template))
    }

    pub fn set(mut self, update: SlotUpdate) -> Self {
        self.updates.push(update);
        self
    }

    pub fn escalate(self) -> Self {
        self.set(SlotUpdate::EscalationRequired(true))
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.updates.is_empty()
    }

    pub fn escalates(&self) -> bool {
        self.updates.contains(&SlotUpdate::EscalationRequired(true))
    }

    pub fn template_ids(&self) -> Vec<&'static str> {
        self.messages.iter().filter_map(OutboundMessage::template_id).collect()
    }

    pub fn events(&self) -> Vec<SlotEvent> {
        self.updates.iter().map(SlotEvent::from).collect()
    }

    pub fn responses(&self) -> Vec<BotResponse> {
        self.messages.iter().map(BotResponse::from).collect()
    }
}
