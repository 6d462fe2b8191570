use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

pub const DISASTER_TYPE: &str = "disaster_type";
pub const INJURY_STATUS: &str = "injury_status";
pub const FIRE_SEVERITY: &str = "fire_severity";
pub const FIRE_UNDER_CONTROL: &str = "fire_under_control";
pub const WATER_LEVEL: &str = "water_level";
pub const IN_FLOOD_ZONE: &str = "in_flood_zone";
pub const CAN_EVACUATE: &str = "can_evacuate";
pub const ESCALATION_REQUIRED: &str = "escalation_required";
pub const LOCATION: &str = "location";
pub const LOCATION_LAT: &str = "location_lat";
pub const LOCATION_LNG: &str = "location_lng";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisasterType {
    Earthquake,
    Fire,
    Flood,
    Unknown,
}

impl Default for DisasterType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl DisasterType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "earthquake" => Self::Earthquake,
            "fire" => Self::Fire,
            "flood" => Self::Flood,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjuryStatus {
    None,
    Injured,
    Trapped,
    Unknown,
}

impl Default for InjuryStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

impl InjuryStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "none" => Self::None,
            "injured" => Self::Injured,
            "trapped" => Self::Trapped,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FireSeverity {
    Small,
    Large,
    Unknown,
}

impl Default for FireSeverity {
    fn default() -> Self {
        Self::Unknown
    }
}

impl FireSeverity {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "small" => Self::Small,
            "large" => Self::Large,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterLevel {
    InsideHome,
    Other,
    Unknown,
}

impl Default for WaterLevel {
    fn default() -> Self {
        Self::Unknown
    }
}

impl WaterLevel {
    /// Any filled value other than `inside_home` counts as `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "inside_home" => Self::InsideHome,
            _ => Self::Other,
        }
    }
}

/// Three-valued boolean for slots the NLU may or may not have filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriState {
    True,
    False,
    Unknown,
}

impl Default for TriState {
    fn default() -> Self {
        Self::Unknown
    }
}

impl TriState {
    /// Accepts JSON booleans and the strings "true"/"false" in any case.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => Self::True,
            Some(Value::Bool(false)) => Self::False,
            Some(Value::String(s)) => match s.to_lowercase().as_str() {
                "true" => Self::True,
                "false" => Self::False,
                _ => Self::Unknown,
            },
            _ => Self::Unknown,
        }
    }

    pub fn is_true(self) -> bool {
        self == Self::True
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }
}

/// Typed view of one conversation's slot store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationSlots {
    pub disaster_type: DisasterType,
    pub injury_status: InjuryStatus,
    pub fire_severity: FireSeverity,
    pub fire_under_control: TriState,
    pub water_level: WaterLevel,
    pub in_flood_zone: TriState,
    pub can_evacuate: TriState,
    pub escalation_required: bool,
    pub location: Option<String>,
    pub location_lat: f64,
    pub location_lng: f64,
}

impl ConversationSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the orchestrator's raw slot map. Unrecognized values degrade to
    /// `Unknown` rather than failing the turn.
    pub fn from_slot_map(raw: &HashMap<String, Value>) -> Self {
        let text = |key: &str| raw.get(key).and_then(Value::as_str);
        let number = |key: &str| match raw.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };

        Self {
            disaster_type: text(DISASTER_TYPE).map(DisasterType::parse).unwrap_or_default(),
            injury_status: text(INJURY_STATUS).map(InjuryStatus::parse).unwrap_or_default(),
            fire_severity: text(FIRE_SEVERITY).map(FireSeverity::parse).unwrap_or_default(),
            fire_under_control: TriState::from_value(raw.get(FIRE_UNDER_CONTROL)),
            water_level: text(WATER_LEVEL).map(WaterLevel::parse).unwrap_or_default(),
            in_flood_zone: TriState::from_value(raw.get(IN_FLOOD_ZONE)),
            can_evacuate: TriState::from_value(raw.get(CAN_EVACUATE)),
            escalation_required: TriState::from_value(raw.get(ESCALATION_REQUIRED)).is_true(),
            location: text(LOCATION).map(str::to_string),
            location_lat: number(LOCATION_LAT),
            location_lng: number(LOCATION_LNG),
        }
    }

    /// Pure reduction: Slots + Update -> Mutated Slots.
    /// `escalation_required` only ever moves from false to true.
    pub fn apply(&mut self, update: &SlotUpdate) {
        match update {
            SlotUpdate::EscalationRequired(true) => self.escalation_required = true,
            SlotUpdate::EscalationRequired(false) => {
                if self.escalation_required {
                    warn!("Ignoring attempt to clear escalation_required");
                }
            }
            SlotUpdate::Location(address) => self.location = Some(address.clone()),
            SlotUpdate::LocationLat(lat) => self.location_lat = *lat,
            SlotUpdate::LocationLng(lng) => self.location_lng = *lng,
        }
    }

    pub fn apply_all<'a>(&mut self, updates: impl IntoIterator<Item = &'a SlotUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }
}

/// A slot-set declaration returned to the orchestrator. This is the ONLY way
/// handlers affect conversation state.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotUpdate {
    EscalationRequired(bool),
    Location(String),
    LocationLat(f64),
    LocationLng(f64),
}

impl SlotUpdate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EscalationRequired(_) => ESCALATION_REQUIRED,
            Self::Location(_) => LOCATION,
            Self::LocationLat(_) => LOCATION_LAT,
            Self::LocationLng(_) => LOCATION_LNG,
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Self::EscalationRequired(flag) => Value::Bool(*flag),
            Self::Location(address) => Value::String(address.clone()),
            Self::LocationLat(v) | Self::LocationLng(v) => serde_json::json!(v),
        }
    }
}

/// Wire form of a slot update: `{"event": "slot", "name": .., "value": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEvent {
    pub event: String,
    pub name: String,
    pub value: Value,
}

impl From<&SlotUpdate> for SlotEvent {
    fn from(update: &SlotUpdate) -> Self {
        Self {
            event: "slot".to_string(),
            name: update.name().to_string(),
            value: update.value(),
        }
    }
}
