use crate::kernel::message::{OutboundMessage, Template, TurnOutcome};
use crate::kernel::slots::DisasterType;

pub const DESCRIBE_SITUATION_TEXT: &str = "Please describe what is happening.";

/// Opening question once the location is confirmed.
pub fn route_after_location(disaster: DisasterType) -> TurnOutcome {
    match disaster {
        DisasterType::Earthquake => TurnOutcome::empty().utter(Template::AskIndoors),
        DisasterType::Fire => TurnOutcome::empty().utter(Template::AskFireSeverity),
        DisasterType::Flood => TurnOutcome::empty().utter(Template::AskWaterLevel),
        DisasterType::Unknown => TurnOutcome::empty().say(OutboundMessage::text(DESCRIBE_SITUATION_TEXT)),
    }
}
