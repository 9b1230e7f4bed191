//! Scenario configuration catalog.
//!
//! [`ScenarioCatalog`] is the read side of the authored configuration
//! tables: scenarios, assumption profiles, scorecards, and risk profiles
//! with their raw conditional rows. Conditionals are stored the way they
//! are authored, as freeform operator/value text; the resolver compiles
//! them once per scenario run.
//!
//! [`InMemoryCatalog`] is the in-process implementation used by tests, the
//! CLI, and any caller that bulk-loads configuration up front.

use chrono::{DateTime, Utc};
use loanrisk_core::assumptions::AssumptionProfile;
use loanrisk_core::scenario::{Scenario, ScoreCardProfile};
use loanrisk_core::types::{
    AssumptionProfileId, RiskFactorId, RiskProfileId, ScenarioId, ScoreCardId, ScoreCardProfileId,
};
use crate::scorecard::ScoreCard;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One authored conditional row, operator and value still freeform text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConditionalRecord {
    /// Operator text, e.g. `"<"`, `"between"`, `"in"`.
    pub conditional: String,
    /// Comparison value text, e.g. `"650"`, `"450..550"`, `"NJ,NY"`.
    pub value: String,
}

/// One authored risk-factor row with its conditional rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorRecord {
    /// Factor identifier.
    pub id: RiskFactorId,
    /// The loan attribute the factor is keyed on.
    pub attribute: String,
    /// Target assumption name, e.g. `"CDR"`, `"recovery"`.
    pub changing_assumption: String,
    /// Authored percentage magnitude.
    pub percentage_change: f64,
    /// Conditional rows; all must hold for the factor to match.
    pub conditionals: Vec<RiskConditionalRecord>,
}

/// One authored risk profile with its factors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskProfileRecord {
    /// Profile identifier.
    pub id: RiskProfileId,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub last_updated: DateTime<Utc>,
    /// Factors in authored order.
    pub factors: Vec<RiskFactorRecord>,
}

/// Read access to the authored scenario configuration.
pub trait ScenarioCatalog {
    /// Scenario by id.
    fn scenario(&self, id: ScenarioId) -> Option<&Scenario>;
    /// Assumption profile by id.
    fn assumption_profile(&self, id: AssumptionProfileId) -> Option<&AssumptionProfile>;
    /// Scorecard profile by id.
    fn score_card_profile(&self, id: ScoreCardProfileId) -> Option<&ScoreCardProfile>;
    /// Scorecard by id.
    fn score_card(&self, id: ScoreCardId) -> Option<&ScoreCard>;
    /// Risk profile by id, with factor and conditional rows.
    fn risk_profile(&self, id: RiskProfileId) -> Option<&RiskProfileRecord>;
}

/// In-process catalog backed by hash maps.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    scenarios: HashMap<ScenarioId, Scenario>,
    assumption_profiles: HashMap<AssumptionProfileId, AssumptionProfile>,
    score_card_profiles: HashMap<ScoreCardProfileId, ScoreCardProfile>,
    score_cards: HashMap<ScoreCardId, ScoreCard>,
    risk_profiles: HashMap<RiskProfileId, RiskProfileRecord>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scenario.
    pub fn add_scenario(&mut self, scenario: Scenario) -> &mut Self {
        self.scenarios.insert(scenario.id, scenario);
        self
    }

    /// Adds an assumption profile.
    pub fn add_assumption_profile(&mut self, profile: AssumptionProfile) -> &mut Self {
        self.assumption_profiles.insert(profile.id, profile);
        self
    }

    /// Adds a scorecard profile.
    pub fn add_score_card_profile(&mut self, profile: ScoreCardProfile) -> &mut Self {
        self.score_card_profiles.insert(profile.id, profile);
        self
    }

    /// Adds a scorecard.
    pub fn add_score_card(&mut self, card: ScoreCard) -> &mut Self {
        self.score_cards.insert(card.id, card);
        self
    }

    /// Adds a risk profile with its factor rows.
    pub fn add_risk_profile(&mut self, profile: RiskProfileRecord) -> &mut Self {
        self.risk_profiles.insert(profile.id, profile);
        self
    }
}

impl ScenarioCatalog for InMemoryCatalog {
    fn scenario(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.get(&id)
    }

    fn assumption_profile(&self, id: AssumptionProfileId) -> Option<&AssumptionProfile> {
        self.assumption_profiles.get(&id)
    }

    fn score_card_profile(&self, id: ScoreCardProfileId) -> Option<&ScoreCardProfile> {
        self.score_card_profiles.get(&id)
    }

    fn score_card(&self, id: ScoreCardId) -> Option<&ScoreCard> {
        self.score_cards.get(&id)
    }

    fn risk_profile(&self, id: RiskProfileId) -> Option<&RiskProfileRecord> {
        self.risk_profiles.get(&id)
    }
}

/// Convenience constructor for authored risk-profile rows with fresh
/// timestamps.
pub fn risk_profile_record(
    id: RiskProfileId,
    name: impl Into<String>,
    factors: Vec<RiskFactorRecord>,
) -> RiskProfileRecord {
    let now = Utc::now();
    RiskProfileRecord {
        id,
        name: name.into(),
        date_created: now,
        last_updated: now,
        factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanrisk_core::assumptions::AssumptionProfileBuilder;

    #[test]
    fn test_catalog_lookup_roundtrip() {
        let mut catalog = InMemoryCatalog::new();
        let profile =
            AssumptionProfileBuilder::new(AssumptionProfileId::new(1), "Base", 3.0, 8.5, 3.7, 5.2, 120.0)
                .build();
        catalog.add_assumption_profile(profile.clone());

        assert_eq!(
            catalog.assumption_profile(AssumptionProfileId::new(1)),
            Some(&profile)
        );
        assert_eq!(catalog.assumption_profile(AssumptionProfileId::new(2)), None);
        assert!(catalog.scenario(ScenarioId::new(1)).is_none());
    }

    #[test]
    fn test_risk_profile_record_timestamps() {
        let record = risk_profile_record(RiskProfileId::new(2), "FICO Scores", vec![]);
        assert_eq!(record.date_created, record.last_updated);
        assert_eq!(record.name, "FICO Scores");
    }
}
