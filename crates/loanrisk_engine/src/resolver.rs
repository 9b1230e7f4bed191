//! Risk profile resolution.
//!
//! Turns a scenario id into a [`ResolvedScenario`]: the assumption profile,
//! the four validated scorecards, and every attached risk profile with its
//! factors compiled, fully materialised up front. Matching against the
//! resolved form is side-effect-free and repeatable; nothing is lazily
//! loaded or re-parsed per loan.
//!
//! Resolution is where configuration errors surface: unknown ids, factors
//! without conditionals, unparseable conditional text, and invalid
//! scorecard weights all refuse the run before any loan is evaluated.

use crate::catalog::{RiskFactorRecord, ScenarioCatalog};
use crate::conditional::Conditional;
use crate::error::EngineError;
use crate::factor::{RiskFactor, RiskProfile};
use crate::scorecard::ScoreCard;
use loanrisk_core::assumptions::AssumptionProfile;
use loanrisk_core::types::{AssumptionKind, RiskProfileId, ScenarioId};
use tracing::info;

/// A scenario's full evaluation configuration, materialised and immutable.
///
/// Resolved once per scenario run and shared read-only across all workers
/// evaluating that scenario.
#[derive(Clone, Debug)]
pub struct ResolvedScenario {
    /// The scenario's id.
    pub scenario_id: ScenarioId,
    /// The scenario's display name.
    pub scenario_name: String,
    /// Baseline assumptions.
    pub assumptions: AssumptionProfile,
    /// The four scorecards, indexed by [`AssumptionKind::index`].
    pub cards: [ScoreCard; 4],
    /// Attached risk profiles with compiled factors, in authored order.
    pub profiles: Vec<RiskProfile>,
}

impl ResolvedScenario {
    /// Total number of compiled factors across all profiles.
    pub fn factor_count(&self) -> usize {
        self.profiles.iter().map(|p| p.factors.len()).sum()
    }
}

/// Resolves a scenario id against the catalog.
///
/// Fails with the appropriate `NotFound` variant when the scenario or any
/// referenced profile/card id is missing, and with a configuration error
/// when a scorecard or factor is invalid. A scenario with zero attached
/// risk profiles resolves successfully to an empty factor set.
pub fn resolve(
    catalog: &impl ScenarioCatalog,
    scenario_id: ScenarioId,
) -> Result<ResolvedScenario, EngineError> {
    let scenario = catalog
        .scenario(scenario_id)
        .ok_or(EngineError::ScenarioNotFound(scenario_id))?;

    let assumptions = catalog
        .assumption_profile(scenario.assumption_profile_id)
        .ok_or(EngineError::AssumptionProfileNotFound(
            scenario.assumption_profile_id,
        ))?
        .clone();

    let card_profile = catalog
        .score_card_profile(scenario.score_card_profile_id)
        .ok_or(EngineError::ScoreCardProfileNotFound(
            scenario.score_card_profile_id,
        ))?;

    let card_for = |kind: AssumptionKind| -> Result<ScoreCard, EngineError> {
        let card_id = card_profile.card_id(kind);
        let card = catalog
            .score_card(card_id)
            .ok_or(EngineError::ScoreCardNotFound(card_id))?;
        if card.adjusted_assumption != kind {
            return Err(EngineError::ScoreCardConfig {
                card: card_id,
                kind,
                reason: format!(
                    "card adjusts {} but is wired to the {} slot",
                    card.adjusted_assumption, kind
                ),
            });
        }
        card.validate()?;
        Ok(card.clone())
    };
    let cards = [
        card_for(AssumptionKind::Cdr)?,
        card_for(AssumptionKind::Cpr)?,
        card_for(AssumptionKind::Recovery)?,
        card_for(AssumptionKind::Lag)?,
    ];

    let mut profiles = Vec::with_capacity(scenario.risk_profile_ids.len());
    for &profile_id in &scenario.risk_profile_ids {
        let record = catalog
            .risk_profile(profile_id)
            .ok_or(EngineError::RiskProfileNotFound(profile_id))?;
        let mut factors = Vec::with_capacity(record.factors.len());
        for factor in &record.factors {
            factors.push(compile_factor(profile_id, factor)?);
        }
        profiles.push(RiskProfile {
            id: record.id,
            name: record.name.clone(),
            factors,
        });
    }

    let resolved = ResolvedScenario {
        scenario_id,
        scenario_name: scenario.name.clone(),
        assumptions,
        cards,
        profiles,
    };
    info!(
        scenario = %scenario_id,
        name = %resolved.scenario_name,
        profiles = resolved.profiles.len(),
        factors = resolved.factor_count(),
        "scenario resolved"
    );
    Ok(resolved)
}

/// Compiles one authored factor row: target kind parsed, conditionals
/// compiled from their freeform text.
fn compile_factor(
    profile_id: RiskProfileId,
    record: &RiskFactorRecord,
) -> Result<RiskFactor, EngineError> {
    let kind = AssumptionKind::parse(&record.changing_assumption).ok_or_else(|| {
        EngineError::UnknownAssumptionKind {
            factor: record.id,
            kind: record.changing_assumption.clone(),
        }
    })?;

    if record.conditionals.is_empty() {
        return Err(EngineError::EmptyRiskFactor(record.id));
    }

    let mut conditionals = Vec::with_capacity(record.conditionals.len());
    for row in &record.conditionals {
        let compiled = Conditional::parse(&record.attribute, &row.conditional, &row.value)
            .map_err(|source| EngineError::Conditional {
                factor: record.id,
                source,
            })?;
        conditionals.push(compiled);
    }

    Ok(RiskFactor {
        id: record.id,
        risk_profile_id: profile_id,
        attribute: record.attribute.clone(),
        changing_assumption: kind,
        percentage_change: record.percentage_change,
        conditionals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{risk_profile_record, InMemoryCatalog, RiskConditionalRecord};
    use crate::scorecard::{IndexScoreMap, ScoreCardAttribute};
    use loanrisk_core::assumptions::AssumptionProfileBuilder;
    use loanrisk_core::scenario::{Scenario, ScoreCardProfile};
    use loanrisk_core::types::{
        AssumptionProfileId, RiskFactorId, ScoreCardId, ScoreCardProfileId,
    };

    fn card(id: u64, kind: AssumptionKind) -> ScoreCard {
        ScoreCard {
            id: ScoreCardId::new(id),
            adjusted_assumption: kind,
            index_score_map: IndexScoreMap::new(1, (0..=20).map(|i| (i, 2.0 * i as f64))),
            attributes: vec![ScoreCardAttribute {
                attribute: "FICO".to_string(),
                weight: 0.4,
                original_index: 5,
                index_change: 2,
            }],
        }
    }

    fn seed_catalog() -> InMemoryCatalog {
        let mut catalog = InMemoryCatalog::new();
        catalog.add_assumption_profile(
            AssumptionProfileBuilder::new(
                AssumptionProfileId::new(1),
                "Base",
                3.2,
                8.5,
                3.7,
                5.2,
                128.0,
            )
            .build(),
        );
        catalog.add_score_card_profile(ScoreCardProfile {
            id: ScoreCardProfileId::new(1),
            cdr_card_id: ScoreCardId::new(11),
            cpr_card_id: ScoreCardId::new(12),
            recovery_card_id: ScoreCardId::new(13),
            lag_card_id: ScoreCardId::new(14),
        });
        catalog.add_score_card(card(11, AssumptionKind::Cdr));
        catalog.add_score_card(card(12, AssumptionKind::Cpr));
        catalog.add_score_card(card(13, AssumptionKind::Recovery));
        catalog.add_score_card(card(14, AssumptionKind::Lag));
        catalog.add_risk_profile(risk_profile_record(
            RiskProfileId::new(2),
            "Low FICO",
            vec![RiskFactorRecord {
                id: RiskFactorId::new(1),
                attribute: "FICO".to_string(),
                changing_assumption: "CDR".to_string(),
                percentage_change: -5.0,
                conditionals: vec![RiskConditionalRecord {
                    conditional: "<".to_string(),
                    value: "650".to_string(),
                }],
            }],
        ));
        catalog.add_scenario(Scenario::new(
            ScenarioId::new(1),
            "Stress",
            AssumptionProfileId::new(1),
            ScoreCardProfileId::new(1),
            vec![RiskProfileId::new(2)],
        ));
        catalog
    }

    #[test]
    fn test_resolve_materialises_everything() {
        let resolved = resolve(&seed_catalog(), ScenarioId::new(1)).unwrap();
        assert_eq!(resolved.scenario_name, "Stress");
        assert_eq!(resolved.profiles.len(), 1);
        assert_eq!(resolved.factor_count(), 1);
        assert_eq!(
            resolved.profiles[0].factors[0].changing_assumption,
            AssumptionKind::Cdr
        );
        // Conditional text compiled into a typed predicate.
        assert_eq!(resolved.profiles[0].factors[0].conditionals.len(), 1);
        for kind in AssumptionKind::ALL {
            assert_eq!(resolved.cards[kind.index()].adjusted_assumption, kind);
        }
    }

    #[test]
    fn test_resolve_unknown_scenario() {
        let err = resolve(&seed_catalog(), ScenarioId::new(99)).unwrap_err();
        assert!(matches!(err, EngineError::ScenarioNotFound(_)));
    }

    #[test]
    fn test_resolve_unknown_risk_profile() {
        let mut catalog = seed_catalog();
        catalog.add_scenario(Scenario::new(
            ScenarioId::new(2),
            "Dangling",
            AssumptionProfileId::new(1),
            ScoreCardProfileId::new(1),
            vec![RiskProfileId::new(77)],
        ));
        let err = resolve(&catalog, ScenarioId::new(2)).unwrap_err();
        assert!(matches!(err, EngineError::RiskProfileNotFound(_)));
    }

    #[test]
    fn test_resolve_empty_risk_profile_list_is_valid() {
        let mut catalog = seed_catalog();
        catalog.add_scenario(Scenario::new(
            ScenarioId::new(3),
            "Baseline only",
            AssumptionProfileId::new(1),
            ScoreCardProfileId::new(1),
            vec![],
        ));
        let resolved = resolve(&catalog, ScenarioId::new(3)).unwrap();
        assert_eq!(resolved.factor_count(), 0);
    }

    #[test]
    fn test_resolve_rejects_invalid_scorecard_before_run() {
        let mut catalog = seed_catalog();
        let mut bad = card(11, AssumptionKind::Cdr);
        bad.attributes[0].weight = 1.5;
        catalog.add_score_card(bad);
        let err = resolve(&catalog, ScenarioId::new(1)).unwrap_err();
        assert!(matches!(err, EngineError::ScoreCardConfig { .. }));
    }

    #[test]
    fn test_resolve_rejects_card_wired_to_wrong_slot() {
        // CDR slot pointing at a card that adjusts CPR is a configuration
        // error, reported before any loan is evaluated.
        let mut catalog = seed_catalog();
        catalog.add_score_card(card(11, AssumptionKind::Cpr));
        let err = resolve(&catalog, ScenarioId::new(1)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ScoreCardConfig {
                kind: AssumptionKind::Cdr,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_rejects_factor_without_conditionals() {
        let mut catalog = seed_catalog();
        catalog.add_risk_profile(risk_profile_record(
            RiskProfileId::new(3),
            "Empty factor",
            vec![RiskFactorRecord {
                id: RiskFactorId::new(9),
                attribute: "FICO".to_string(),
                changing_assumption: "CDR".to_string(),
                percentage_change: 1.0,
                conditionals: vec![],
            }],
        ));
        catalog.add_scenario(Scenario::new(
            ScenarioId::new(4),
            "Bad",
            AssumptionProfileId::new(1),
            ScoreCardProfileId::new(1),
            vec![RiskProfileId::new(3)],
        ));
        let err = resolve(&catalog, ScenarioId::new(4)).unwrap_err();
        assert!(matches!(err, EngineError::EmptyRiskFactor(_)));
    }

    #[test]
    fn test_resolve_rejects_bad_conditional_text() {
        let mut catalog = seed_catalog();
        catalog.add_risk_profile(risk_profile_record(
            RiskProfileId::new(4),
            "Bad operator",
            vec![RiskFactorRecord {
                id: RiskFactorId::new(10),
                attribute: "FICO".to_string(),
                changing_assumption: "CDR".to_string(),
                percentage_change: 1.0,
                conditionals: vec![RiskConditionalRecord {
                    conditional: "like".to_string(),
                    value: "650".to_string(),
                }],
            }],
        ));
        catalog.add_scenario(Scenario::new(
            ScenarioId::new(5),
            "Bad",
            AssumptionProfileId::new(1),
            ScoreCardProfileId::new(1),
            vec![RiskProfileId::new(4)],
        ));
        let err = resolve(&catalog, ScenarioId::new(5)).unwrap_err();
        assert!(matches!(err, EngineError::Conditional { .. }));
    }

    #[test]
    fn test_resolve_rejects_unknown_assumption_kind() {
        let mut catalog = seed_catalog();
        catalog.add_risk_profile(risk_profile_record(
            RiskProfileId::new(5),
            "Bad kind",
            vec![RiskFactorRecord {
                id: RiskFactorId::new(11),
                attribute: "FICO".to_string(),
                changing_assumption: "WAM".to_string(),
                percentage_change: 1.0,
                conditionals: vec![RiskConditionalRecord {
                    conditional: "<".to_string(),
                    value: "650".to_string(),
                }],
            }],
        ));
        catalog.add_scenario(Scenario::new(
            ScenarioId::new(6),
            "Bad",
            AssumptionProfileId::new(1),
            ScoreCardProfileId::new(1),
            vec![RiskProfileId::new(5)],
        ));
        let err = resolve(&catalog, ScenarioId::new(6)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownAssumptionKind { .. }));
    }
}
