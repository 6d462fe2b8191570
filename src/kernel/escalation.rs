use serde_json::json;

use crate::kernel::message::OutboundMessage;

pub const HANDOFF_TEXT: &str = "Connecting to emergency operator...";

/// Handoff signal for the UI layer. Never touches slots.
pub fn notify() -> OutboundMessage {
    OutboundMessage::text(HANDOFF_TEXT).with_custom(json!({ "handoff": true }))
}
