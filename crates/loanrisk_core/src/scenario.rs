//! Scenarios and scorecard-profile references.
//!
//! A [`Scenario`] names a stress test: one assumption profile, one
//! scorecard profile, and zero or more risk profiles attached through an
//! explicit many-to-many relation. The scenario holds risk-profile ids
//! only; risk profiles are scenario-agnostic and reusable.

use crate::types::{
    AssumptionKind, AssumptionProfileId, RiskProfileId, ScenarioId, ScoreCardId,
    ScoreCardProfileId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named stress test over a portfolio.
///
/// A scenario with an empty `risk_profile_ids` list is valid and evaluates
/// to baseline pass-through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier.
    pub id: ScenarioId,
    /// Display name, e.g. "3 Month Timber Shortage".
    pub name: String,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Last modification timestamp.
    pub last_updated: DateTime<Utc>,
    /// Baseline assumptions for this scenario.
    pub assumption_profile_id: AssumptionProfileId,
    /// The four scorecards for this scenario.
    pub score_card_profile_id: ScoreCardProfileId,
    /// Attached risk profiles, in authored order.
    pub risk_profile_ids: Vec<RiskProfileId>,
}

impl Scenario {
    /// Creates a scenario with fresh timestamps.
    pub fn new(
        id: ScenarioId,
        name: impl Into<String>,
        assumption_profile_id: AssumptionProfileId,
        score_card_profile_id: ScoreCardProfileId,
        risk_profile_ids: Vec<RiskProfileId>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            date_created: now,
            last_updated: now,
            assumption_profile_id,
            score_card_profile_id,
            risk_profile_ids,
        }
    }
}

/// Bundle of four scorecards, one per target assumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCardProfile {
    /// Profile identifier.
    pub id: ScoreCardProfileId,
    /// CDR scorecard.
    pub cdr_card_id: ScoreCardId,
    /// CPR scorecard.
    pub cpr_card_id: ScoreCardId,
    /// Recovery scorecard.
    pub recovery_card_id: ScoreCardId,
    /// Lag scorecard.
    pub lag_card_id: ScoreCardId,
}

impl ScoreCardProfile {
    /// The scorecard id for one assumption kind.
    #[inline]
    pub fn card_id(&self, kind: AssumptionKind) -> ScoreCardId {
        match kind {
            AssumptionKind::Cdr => self.cdr_card_id,
            AssumptionKind::Cpr => self.cpr_card_id,
            AssumptionKind::Recovery => self.recovery_card_id,
            AssumptionKind::Lag => self.lag_card_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_with_no_risk_profiles_is_valid() {
        let s = Scenario::new(
            ScenarioId::new(1),
            "Baseline",
            AssumptionProfileId::new(1),
            ScoreCardProfileId::new(1),
            vec![],
        );
        assert!(s.risk_profile_ids.is_empty());
    }

    #[test]
    fn test_card_id_per_kind() {
        let profile = ScoreCardProfile {
            id: ScoreCardProfileId::new(1),
            cdr_card_id: ScoreCardId::new(11),
            cpr_card_id: ScoreCardId::new(12),
            recovery_card_id: ScoreCardId::new(13),
            lag_card_id: ScoreCardId::new(14),
        };
        assert_eq!(profile.card_id(AssumptionKind::Cdr), ScoreCardId::new(11));
        assert_eq!(profile.card_id(AssumptionKind::Lag), ScoreCardId::new(14));
        for kind in AssumptionKind::ALL {
            let _ = profile.card_id(kind);
        }
    }
}
