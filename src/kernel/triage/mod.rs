//! Triage decision engine.
//!
//! Pure function of (disaster type, slots, latest intent, latest text). No I/O
//! and no failure path: an unmatched combination yields an empty outcome.

pub mod evidence;
pub mod rules;

use tracing::debug;

use crate::kernel::event::TurnInput;
use crate::kernel::message::TurnOutcome;
use crate::kernel::slots::{ConversationSlots, DisasterType};
use rules::{Rule, RULES};

/// Everything a rule may look at for one turn.
pub struct TriageContext<'a> {
    pub disaster: DisasterType,
    pub slots: &'a ConversationSlots,
    pub turn: &'a TurnInput,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Name of the rule that fired, if any.
    pub rule: Option<&'static str>,
    pub outcome: TurnOutcome,
}

pub struct TriageEngine {
    rules: &'static [Rule],
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TriageEngine {
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    /// First matching rule wins; no fallthrough.
    pub fn evaluate(&self, ctx: &TriageContext) -> Decision {
        match self.rules.iter().find(|rule| (rule.applies)(ctx)) {
            Some(rule) => {
                let outcome = (rule.respond)(ctx);
                debug!(
                    rule = rule.name,
                    messages = outcome.messages.len(),
                    escalates = outcome.escalates(),
                    "Triage rule fired"
                );
                Decision { rule: Some(rule.name), outcome }
            }
            None => {
                debug!(intent = ?ctx.turn.intent, disaster = ?ctx.disaster, "No triage rule matched");
                Decision { rule: None, outcome: TurnOutcome::empty() }
            }
        }
    }

    pub fn decide(
        &self,
        disaster: DisasterType,
        slots: &ConversationSlots,
        latest_intent: Option<&str>,
        latest_text: &str,
    ) -> Decision {
        let turn = TurnInput::new(latest_intent, latest_text);
        self.evaluate(&TriageContext { disaster, slots, turn: &turn })
    }
}

/// Convenience wrapper over a default engine.
pub fn decide(
    disaster: DisasterType,
    slots: &ConversationSlots,
    latest_intent: Option<&str>,
    latest_text: &str,
) -> Decision {
    TriageEngine::new().decide(disaster, slots, latest_intent, latest_text)
}
