use serde::{Deserialize, Serialize};

/// Intent identifiers the triage cascade reacts to. Anything else is carried
/// through as `Other` and falls to the initial-trigger rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriageIntent {
    ReportLocationContext,
    ReportInjury,
    ReportDamageStatus,
    ReportGasStatus,
    ReportFireControl,
    ReportEvacuationAbility,
    ReportFloodZone,
    Other(String),
}

impl TriageIntent {
    pub fn parse(name: &str) -> Self {
        match name {
            "report_location_context" => Self::ReportLocationContext,
            "report_injury" => Self::ReportInjury,
            "report_damage_status" => Self::ReportDamageStatus,
            "report_gas_status" => Self::ReportGasStatus,
            "report_fire_control" => Self::ReportFireControl,
            "report_evacuation_ability" => Self::ReportEvacuationAbility,
            "report_flood_zone" => Self::ReportFloodZone,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_report(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// One user turn as seen by a handler.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnInput {
    pub intent: TriageIntent,
    /// Lower-cased user utterance.
    pub text: String,
}

impl TurnInput {
    pub fn new(intent: Option<&str>, text: &str) -> Self {
        Self {
            intent: TriageIntent::parse(intent.unwrap_or_default()),
            text: text.to_lowercase(),
        }
    }

    /// Keyword evidence: substring match on the lower-cased utterance.
    pub fn mentions(&self, keyword: &str) -> bool {
        self.text.contains(keyword)
    }

    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.mentions(k))
    }
}
