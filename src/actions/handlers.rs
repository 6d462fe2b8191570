use async_trait::async_trait;
use std::sync::Arc;

use super::{Action, Tracker};
use crate::kernel::escalation;
use crate::kernel::message::TurnOutcome;
use crate::kernel::router::route_after_location;
use crate::kernel::triage::TriageEngine;
use crate::services::geocoding::LocationResolver;
use crate::services::shelters::ShelterDirectory;

pub struct ProcessLocation {
    resolver: LocationResolver,
}

impl ProcessLocation {
    pub fn new(resolver: LocationResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Action for ProcessLocation {
    fn name(&self) -> &'static str {
        "action_process_location"
    }

    async fn run(&self, tracker: &Tracker) -> TurnOutcome {
        self.resolver.respond(tracker.latest_text().trim()).await
    }
}

pub struct RouteAfterLocation;

#[async_trait]
impl Action for RouteAfterLocation {
    fn name(&self) -> &'static str {
        "action_route_after_location"
    }

    async fn run(&self, tracker: &Tracker) -> TurnOutcome {
        route_after_location(tracker.slots().disaster_type)
    }
}

pub struct CalculateRisk {
    engine: TriageEngine,
}

impl CalculateRisk {
    pub fn new(engine: TriageEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl Action for CalculateRisk {
    fn name(&self) -> &'static str {
        "action_calculate_risk"
    }

    async fn run(&self, tracker: &Tracker) -> TurnOutcome {
        let slots = tracker.slots();
        self.engine
            .decide(slots.disaster_type, &slots, tracker.latest_intent(), tracker.latest_text())
            .outcome
    }
}

pub struct EscalateToHuman;

#[async_trait]
impl Action for EscalateToHuman {
    fn name(&self) -> &'static str {
        "action_escalate_to_human"
    }

    async fn run(&self, _tracker: &Tracker) -> TurnOutcome {
        TurnOutcome::empty().say(escalation::notify())
    }
}

pub struct ProvideShelters {
    directory: Arc<ShelterDirectory>,
}

impl ProvideShelters {
    pub fn new(directory: Arc<ShelterDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl Action for ProvideShelters {
    fn name(&self) -> &'static str {
        "action_provide_shelters"
    }

    async fn run(&self, tracker: &Tracker) -> TurnOutcome {
        let slots = tracker.slots();
        self.directory.respond(slots.location.as_deref())
    }
}
