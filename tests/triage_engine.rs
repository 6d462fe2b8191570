use crisis_actions::kernel::message::Template;
use crisis_actions::kernel::slots::{
    ConversationSlots, DisasterType, FireSeverity, InjuryStatus, SlotUpdate, TriState, WaterLevel,
};
use crisis_actions::kernel::triage::rules::{
    ASSEMBLY_POINT_TEXT, DAMAGE_DANGER_TEXT, GAS_DANGER_TEXT, STAY_CAUTIOUS_TEXT,
};
use crisis_actions::kernel::triage::TriageEngine;

fn slots_for(disaster: DisasterType) -> ConversationSlots {
    ConversationSlots {
        disaster_type: disaster,
        ..ConversationSlots::default()
    }
}

fn ids(templates: &[Template]) -> Vec<&'static str> {
    templates.iter().map(|t| t.id()).collect()
}

#[test]
fn test_location_context_advice_then_injury_question() {
    let engine = TriageEngine::new();
    let slots = slots_for(DisasterType::Earthquake);

    let cases = [
        ("I am Indoors right now", Some(Template::AdviceIndoors)),
        ("outdoors in a park", Some(Template::AdviceOutdoors)),
        ("stuck in my vehicle", Some(Template::AdviceVehicle)),
        // First keyword wins in fixed order
        ("outdoors, then indoors", Some(Template::AdviceIndoors)),
        ("not sure", None),
    ];

    for (text, advice) in cases {
        let decision = engine.decide(DisasterType::Earthquake, &slots, Some("report_location_context"), text);
        assert_eq!(decision.rule, Some("location_context"));

        let mut expected: Vec<Template> = advice.into_iter().collect();
        expected.push(Template::AskInjury);
        assert_eq!(decision.outcome.template_ids(), ids(&expected), "text: {}", text);
        assert!(decision.outcome.updates.is_empty(), "Context report must not mutate slots");
    }
}

#[test]
fn test_injury_trapped_escalates_from_slot_or_text() {
    let engine = TriageEngine::new();

    // 1. Slot evidence alone
    let mut slots = slots_for(DisasterType::Earthquake);
    slots.injury_status = InjuryStatus::Trapped;
    let decision = engine.decide(DisasterType::Earthquake, &slots, Some("report_injury"), "help");
    assert_eq!(decision.rule, Some("injury_trapped"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_earthquake_trapped"]);
    assert_eq!(decision.outcome.updates, vec![SlotUpdate::EscalationRequired(true)]);

    // 2. Text evidence alone, outranking "injured"
    let slots = slots_for(DisasterType::Fire);
    let decision = engine.decide(DisasterType::Fire, &slots, Some("report_injury"), "I'm injured and TRAPPED");
    assert_eq!(decision.rule, Some("injury_trapped"));
    assert!(decision.outcome.escalates());
}

#[test]
fn test_injury_injured_escalates() {
    let engine = TriageEngine::new();

    let mut slots = slots_for(DisasterType::Flood);
    slots.injury_status = InjuryStatus::Injured;
    let decision = engine.decide(DisasterType::Flood, &slots, Some("report_injury"), "");
    assert_eq!(decision.rule, Some("injury_injured"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_earthquake_injured"]);
    assert!(decision.outcome.escalates());

    let slots = slots_for(DisasterType::Earthquake);
    let decision = engine.decide(DisasterType::Earthquake, &slots, Some("report_injury"), "my friend is injured");
    assert_eq!(decision.rule, Some("injury_injured"));
}

#[test]
fn test_injury_safe_path_branches_on_disaster() {
    let engine = TriageEngine::new();

    // Earthquake: ask about the building
    let decision = engine.decide(
        DisasterType::Earthquake,
        &slots_for(DisasterType::Earthquake),
        Some("report_injury"),
        "we are fine",
    );
    assert_eq!(decision.rule, Some("injury_safe_earthquake"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_ask_structural_damage"]);
    assert!(!decision.outcome.escalates());

    // Fire: assembly point with safety buttons
    let decision = engine.decide(DisasterType::Fire, &slots_for(DisasterType::Fire), Some("report_injury"), "no");
    assert_eq!(decision.rule, Some("injury_safe_fire"));
    let msg = &decision.outcome.messages[0];
    assert_eq!(msg.text_body(), Some(ASSEMBLY_POINT_TEXT));
    let payloads: Vec<&str> = msg.buttons.iter().map(|b| b.payload.as_str()).collect();
    assert_eq!(payloads, vec!["/find_shelter", "/request_operator"]);
    assert!(decision.outcome.updates.is_empty());

    // Anything else: generic caution
    for disaster in [DisasterType::Flood, DisasterType::Unknown] {
        let decision = engine.decide(disaster, &slots_for(disaster), Some("report_injury"), "all good");
        assert_eq!(decision.rule, Some("injury_safe_other"));
        assert_eq!(decision.outcome.messages[0].text_body(), Some(STAY_CAUTIOUS_TEXT));
        assert_eq!(decision.outcome.messages[0].buttons.len(), 2);
        assert!(!decision.outcome.escalates());
    }
}

#[test]
fn test_damage_report() {
    let engine = TriageEngine::new();
    let slots = slots_for(DisasterType::Earthquake);

    for text in ["yes", "there is some damage to the walls"] {
        let decision = engine.decide(DisasterType::Earthquake, &slots, Some("report_damage_status"), text);
        assert_eq!(decision.rule, Some("damage_reported"));
        assert_eq!(decision.outcome.messages[0].text_body(), Some(DAMAGE_DANGER_TEXT));
        assert!(decision.outcome.escalates());
    }

    let decision = engine.decide(DisasterType::Earthquake, &slots, Some("report_damage_status"), "no");
    assert_eq!(decision.rule, Some("damage_clear"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_ask_gas_leak"]);
    assert!(decision.outcome.updates.is_empty());
}

#[test]
fn test_gas_report() {
    let engine = TriageEngine::new();
    let slots = slots_for(DisasterType::Earthquake);

    let decision = engine.decide(DisasterType::Earthquake, &slots, Some("report_gas_status"), "I smell GAS");
    assert_eq!(decision.rule, Some("gas_reported"));
    assert_eq!(decision.outcome.messages[0].text_body(), Some(GAS_DANGER_TEXT));
    assert!(decision.outcome.escalates());
}

#[test]
fn test_gas_clear_is_idempotent() {
    let engine = TriageEngine::new();
    let slots = slots_for(DisasterType::Earthquake);

    let first = engine.decide(DisasterType::Earthquake, &slots, Some("report_gas_status"), "no");
    let second = engine.decide(DisasterType::Earthquake, &slots, Some("report_gas_status"), "no");

    assert_eq!(first, second, "Same input must yield the same decision");
    assert_eq!(first.outcome.template_ids(), vec!["utter_ask_needs"]);
    assert!(!first.outcome.escalates());
    assert!(!second.outcome.escalates());
}

#[test]
fn test_fire_control_yes_text_without_slot() {
    let engine = TriageEngine::new();
    let slots = slots_for(DisasterType::Fire);
    assert_eq!(slots.fire_under_control, TriState::Unknown);

    let decision = engine.decide(DisasterType::Fire, &slots, Some("report_fire_control"), "yes please");
    assert_eq!(decision.rule, Some("fire_controlled"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_fire_monitor"]);
    assert!(decision.outcome.updates.is_empty(), "Controlled fire must not escalate");
}

#[test]
fn test_fire_control_slot_true_and_uncontrolled() {
    let engine = TriageEngine::new();

    let mut slots = slots_for(DisasterType::Fire);
    slots.fire_under_control = TriState::True;
    let decision = engine.decide(DisasterType::Fire, &slots, Some("report_fire_control"), "hmm");
    assert_eq!(decision.rule, Some("fire_controlled"));

    slots.fire_under_control = TriState::False;
    let decision = engine.decide(DisasterType::Fire, &slots, Some("report_fire_control"), "no it is spreading");
    assert_eq!(decision.rule, Some("fire_uncontrolled"));
    assert_eq!(
        decision.outcome.template_ids(),
        vec!["utter_fire_evacuate_now", "utter_ask_injury"]
    );
    assert!(decision.outcome.escalates());
}

#[test]
fn test_flood_cannot_evacuate_escalates() {
    let engine = TriageEngine::new();
    let mut slots = slots_for(DisasterType::Flood);
    slots.can_evacuate = TriState::False;

    let decision = engine.decide(DisasterType::Flood, &slots, Some("report_evacuation_ability"), "no");
    assert_eq!(decision.rule, Some("flood_cannot_evacuate"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_flood_move_high"]);
    assert_eq!(decision.outcome.updates, vec![SlotUpdate::EscalationRequired(true)]);
}

#[test]
fn test_flood_can_evacuate() {
    let engine = TriageEngine::new();
    let mut slots = slots_for(DisasterType::Flood);
    slots.can_evacuate = TriState::True;

    let decision = engine.decide(DisasterType::Flood, &slots, Some("report_evacuation_ability"), "");
    assert_eq!(decision.rule, Some("flood_can_evacuate"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_flood_shutdown_evacuate"]);
    assert!(!decision.outcome.escalates());
}

#[test]
fn test_flood_zone_never_escalates() {
    let engine = TriageEngine::new();
    let slots = slots_for(DisasterType::Flood);

    let inside = engine.decide(DisasterType::Flood, &slots, Some("report_flood_zone"), "yes we are");
    assert_eq!(inside.rule, Some("flood_zone_inside"));
    assert_eq!(inside.outcome.template_ids(), vec!["utter_flood_prepare"]);
    assert!(inside.outcome.updates.is_empty());

    let outside = engine.decide(DisasterType::Flood, &slots, Some("report_flood_zone"), "no");
    assert_eq!(outside.rule, Some("flood_zone_outside"));
    assert_eq!(outside.outcome.template_ids(), vec!["utter_flood_stay_informed"]);
    assert!(outside.outcome.updates.is_empty());
}

#[test]
fn test_initial_trigger_earthquake_is_silent() {
    let engine = TriageEngine::new();
    let decision = engine.decide(
        DisasterType::Earthquake,
        &slots_for(DisasterType::Earthquake),
        Some("report_disaster"),
        "there was an earthquake",
    );
    assert_eq!(decision.rule, Some("initial_earthquake"));
    assert!(decision.outcome.is_empty());
}

#[test]
fn test_initial_trigger_flood() {
    let engine = TriageEngine::new();

    // 1. Slot says water is inside the home
    let mut slots = slots_for(DisasterType::Flood);
    slots.water_level = WaterLevel::InsideHome;
    let decision = engine.decide(DisasterType::Flood, &slots, Some("report_disaster"), "flood");
    assert_eq!(decision.rule, Some("initial_flood_inside"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_ask_evacuate"]);

    // 2. Text says so
    let slots = slots_for(DisasterType::Flood);
    let decision = engine.decide(DisasterType::Flood, &slots, None, "Water is INSIDE the house");
    assert_eq!(decision.rule, Some("initial_flood_inside"));

    // 3. Otherwise ask about the zone
    let mut slots = slots_for(DisasterType::Flood);
    slots.water_level = WaterLevel::Other;
    let decision = engine.decide(DisasterType::Flood, &slots, Some("report_disaster"), "street is flooded");
    assert_eq!(decision.rule, Some("initial_flood_outside"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_ask_flood_zone"]);
    assert!(decision.outcome.updates.is_empty());
}

#[test]
fn test_initial_trigger_fire() {
    let engine = TriageEngine::new();

    let mut slots = slots_for(DisasterType::Fire);
    slots.fire_severity = FireSeverity::Large;
    let decision = engine.decide(DisasterType::Fire, &slots, Some("report_disaster"), "fire");
    assert_eq!(decision.rule, Some("initial_fire_large"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_fire_large", "utter_ask_injury"]);
    assert!(decision.outcome.escalates());

    let slots = slots_for(DisasterType::Fire);
    let decision = engine.decide(DisasterType::Fire, &slots, Some("report_disaster"), "a large blaze");
    assert_eq!(decision.rule, Some("initial_fire_large"));

    let mut slots = slots_for(DisasterType::Fire);
    slots.fire_severity = FireSeverity::Small;
    let decision = engine.decide(DisasterType::Fire, &slots, Some("report_disaster"), "kitchen fire");
    assert_eq!(decision.rule, Some("initial_fire_small"));
    assert_eq!(decision.outcome.template_ids(), vec!["utter_fire_small", "utter_ask_fire_control"]);
    assert!(!decision.outcome.escalates());
}

#[test]
fn test_unmatched_combinations_are_noops() {
    let engine = TriageEngine::new();
    let slots = ConversationSlots::default();

    for intent in [None, Some("greet"), Some("report_disaster"), Some("")] {
        let decision = engine.decide(DisasterType::Unknown, &slots, intent, "anything at all");
        assert_eq!(decision.rule, None, "intent: {:?}", intent);
        assert!(decision.outcome.is_empty());
    }
}

#[test]
fn test_every_intent_and_disaster_terminates() {
    let engine = TriageEngine::new();
    let intents = [
        "report_location_context",
        "report_injury",
        "report_damage_status",
        "report_gas_status",
        "report_fire_control",
        "report_evacuation_ability",
        "report_flood_zone",
        "something_else",
    ];
    let disasters = [
        DisasterType::Earthquake,
        DisasterType::Fire,
        DisasterType::Flood,
        DisasterType::Unknown,
    ];

    for disaster in disasters {
        for intent in intents {
            let decision = engine.decide(disaster, &slots_for(disaster), Some(intent), "");
            // Every triage intent has a catch-all rule in its group
            if intent != "something_else" {
                assert!(decision.rule.is_some(), "{:?}/{} should match a rule", disaster, intent);
            }
            assert!(
                decision.outcome.updates.iter().all(|u| *u == SlotUpdate::EscalationRequired(true)),
                "Triage only ever raises escalation"
            );
        }
    }
}

#[test]
fn test_rule_order_is_stable() {
    let engine = TriageEngine::new();
    let names: Vec<&str> = engine.rule_names().collect();

    assert_eq!(names.first(), Some(&"location_context"));
    let trapped = names.iter().position(|n| *n == "injury_trapped").unwrap();
    let injured = names.iter().position(|n| *n == "injury_injured").unwrap();
    let safe = names.iter().position(|n| *n == "injury_safe_other").unwrap();
    assert!(trapped < injured && injured < safe, "Trapped outranks injured outranks safe");
    assert!(names.iter().position(|n| *n == "initial_earthquake").unwrap() > safe);
}
