//! The triage cascade as an ordered rule table.
//!
//! Rules are evaluated top-down; the first whose predicate holds produces the
//! turn's outcome and evaluation stops. Within an intent group the catch-all
//! rule always comes last.

use super::evidence::{affirmed, slot_or_keyword};
use super::TriageContext;
use crate::kernel::event::TriageIntent;
use crate::kernel::message::{Button, OutboundMessage, Template, TurnOutcome};
use crate::kernel::slots::{DisasterType, FireSeverity, InjuryStatus, WaterLevel};

pub const ASSEMBLY_POINT_TEXT: &str =
    "Proceed to the nearest assembly point immediately. Do not return inside.";
pub const STAY_CAUTIOUS_TEXT: &str = "Please remain cautious and follow official orders.";
pub const DAMAGE_DANGER_TEXT: &str = "Danger: Do not enter damaged buildings.";
pub const GAS_DANGER_TEXT: &str = "Danger: Gas leak detected. Evacuate immediately.";

pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&TriageContext<'_>) -> bool,
    pub respond: fn(&TriageContext<'_>) -> TurnOutcome,
}

pub fn safety_buttons() -> Vec<Button> {
    vec![
        Button::new("🏠 Find Shelter", "/find_shelter"),
        Button::new("👤 Talk to Operator", "/request_operator"),
    ]
}

fn is(ctx: &TriageContext, intent: TriageIntent) -> bool {
    ctx.turn.intent == intent
}

fn is_trapped(ctx: &TriageContext) -> bool {
    slot_or_keyword(ctx.slots.injury_status == InjuryStatus::Trapped, ctx.turn, "trapped")
}

fn is_injured(ctx: &TriageContext) -> bool {
    slot_or_keyword(ctx.slots.injury_status == InjuryStatus::Injured, ctx.turn, "injured")
}

fn initial(ctx: &TriageContext, disaster: DisasterType) -> bool {
    !ctx.turn.intent.is_report() && ctx.disaster == disaster
}

/// First keyword wins: indoors, then outdoors, then vehicle.
fn context_advice(ctx: &TriageContext) -> Option<Template> {
    [
        ("indoors", Template::AdviceIndoors),
        ("outdoors", Template::AdviceOutdoors),
        ("vehicle", Template::AdviceVehicle),
    ]
    .into_iter()
    .find(|(keyword, _)| ctx.turn.mentions(keyword))
    .map(|(_, template)| template)
}

pub static RULES: &[Rule] = &[
    // 1. Location context (earthquake flow)
    Rule {
        name: "location_context",
        applies: |ctx| is(ctx, TriageIntent::ReportLocationContext),
        respond: |ctx| {
            let outcome = match context_advice(ctx) {
                Some(template) => TurnOutcome::empty().utter(template),
                None => TurnOutcome::empty(),
            };
            outcome.utter(Template::AskInjury)
        },
    },
    // 2. Injury triage
    Rule {
        name: "injury_trapped",
        applies: |ctx| is(ctx, TriageIntent::ReportInjury) && is_trapped(ctx),
        respond: |_| TurnOutcome::empty().utter(Template::EarthquakeTrapped).escalate(),
    },
    Rule {
        name: "injury_injured",
        applies: |ctx| is(ctx, TriageIntent::ReportInjury) && is_injured(ctx),
        respond: |_| TurnOutcome::empty().utter(Template::EarthquakeInjured).escalate(),
    },
    Rule {
        name: "injury_safe_earthquake",
        applies: |ctx| is(ctx, TriageIntent::ReportInjury) && ctx.disaster == DisasterType::Earthquake,
        respond: |_| TurnOutcome::empty().utter(Template::AskStructuralDamage),
    },
    Rule {
        name: "injury_safe_fire",
        applies: |ctx| is(ctx, TriageIntent::ReportInjury) && ctx.disaster == DisasterType::Fire,
        respond: |_| {
            TurnOutcome::empty()
                .say(OutboundMessage::text(ASSEMBLY_POINT_TEXT).with_buttons(safety_buttons()))
        },
    },
    Rule {
        name: "injury_safe_other",
        applies: |ctx| is(ctx, TriageIntent::ReportInjury),
        respond: |_| {
            TurnOutcome::empty()
                .say(OutboundMessage::text(STAY_CAUTIOUS_TEXT).with_buttons(safety_buttons()))
        },
    },
    // 3. Structural damage
    Rule {
        name: "damage_reported",
        applies: |ctx| {
            is(ctx, TriageIntent::ReportDamageStatus) && ctx.turn.mentions_any(&["yes", "damage"])
        },
        respond: |_| TurnOutcome::empty().say(OutboundMessage::text(DAMAGE_DANGER_TEXT)).escalate(),
    },
    Rule {
        name: "damage_clear",
        applies: |ctx| is(ctx, TriageIntent::ReportDamageStatus),
        respond: |_| TurnOutcome::empty().utter(Template::AskGasLeak),
    },
    // 4. Gas leak
    Rule {
        name: "gas_reported",
        applies: |ctx| is(ctx, TriageIntent::ReportGasStatus) && ctx.turn.mentions_any(&["yes", "gas"]),
        respond: |_| TurnOutcome::empty().say(OutboundMessage::text(GAS_DANGER_TEXT)).escalate(),
    },
    Rule {
        name: "gas_clear",
        applies: |ctx| is(ctx, TriageIntent::ReportGasStatus),
        respond: |_| TurnOutcome::empty().utter(Template::AskNeeds),
    },
    // 5. Fire control
    Rule {
        name: "fire_controlled",
        applies: |ctx| {
            is(ctx, TriageIntent::ReportFireControl) && affirmed(ctx.slots.fire_under_control, ctx.turn)
        },
        respond: |_| TurnOutcome::empty().utter(Template::FireMonitor),
    },
    Rule {
        name: "fire_uncontrolled",
        applies: |ctx| is(ctx, TriageIntent::ReportFireControl),
        respond: |_| {
            TurnOutcome::empty()
                .utter(Template::FireEvacuateNow)
                .utter(Template::AskInjury)
                .escalate()
        },
    },
    // 6. Flood evacuation ability
    Rule {
        name: "flood_can_evacuate",
        applies: |ctx| {
            is(ctx, TriageIntent::ReportEvacuationAbility) && affirmed(ctx.slots.can_evacuate, ctx.turn)
        },
        respond: |_| TurnOutcome::empty().utter(Template::FloodShutdownEvacuate),
    },
    Rule {
        name: "flood_cannot_evacuate",
        applies: |ctx| is(ctx, TriageIntent::ReportEvacuationAbility),
        respond: |_| TurnOutcome::empty().utter(Template::FloodMoveHigh).escalate(),
    },
    // 7. Flood zone
    Rule {
        name: "flood_zone_inside",
        applies: |ctx| is(ctx, TriageIntent::ReportFloodZone) && affirmed(ctx.slots.in_flood_zone, ctx.turn),
        respond: |_| TurnOutcome::empty().utter(Template::FloodPrepare),
    },
    Rule {
        name: "flood_zone_outside",
        applies: |ctx| is(ctx, TriageIntent::ReportFloodZone),
        respond: |_| TurnOutcome::empty().utter(Template::FloodStayInformed),
    },
    // 8. Initial trigger
    // Earthquake: the location router already asked the indoors/outdoors question.
    Rule {
        name: "initial_earthquake",
        applies: |ctx| initial(ctx, DisasterType::Earthquake),
        respond: |_| TurnOutcome::empty(),
    },
    Rule {
        name: "initial_flood_inside",
        applies: |ctx| {
            initial(ctx, DisasterType::Flood)
                && slot_or_keyword(ctx.slots.water_level == WaterLevel::InsideHome, ctx.turn, "inside")
        },
        respond: |_| TurnOutcome::empty().utter(Template::AskEvacuate),
    },
    Rule {
        name: "initial_flood_outside",
        applies: |ctx| initial(ctx, DisasterType::Flood),
        respond: |_| TurnOutcome::empty().utter(Template::AskFloodZone),
    },
    Rule {
        name: "initial_fire_large",
        applies: |ctx| {
            initial(ctx, DisasterType::Fire)
                && slot_or_keyword(ctx.slots.fire_severity == FireSeverity::Large, ctx.turn, "large")
        },
        respond: |_| {
            TurnOutcome::empty()
                .utter(Template::FireLarge)
                .utter(Template::AskInjury)
                .escalate()
        },
    },
    Rule {
        name: "initial_fire_small",
        applies: |ctx| initial(ctx, DisasterType::Fire),
        respond: |_| {
            TurnOutcome::empty()
                .utter(Template::FireSmall)
                .utter(Template::AskFireControl)
        },
    },
];
