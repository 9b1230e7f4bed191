//! End-to-end scenario runs: catalog -> resolver -> matcher -> scorecards
//! -> adjustment -> store.

use approx::assert_relative_eq;
use loanrisk_core::assumptions::AssumptionProfileBuilder;
use loanrisk_core::fixtures::sample_record_with_fico;
use loanrisk_core::loan::LoanRecord;
use loanrisk_core::scenario::{Scenario, ScoreCardProfile};
use loanrisk_core::types::{
    AssumptionKind, AssumptionProfileId, RiskFactorId, RiskProfileId, ScenarioId, ScoreCardId,
    ScoreCardProfileId, SnapshotId,
};
use loanrisk_engine::{
    resolve, risk_profile_record, run_to_completion, InMemoryCatalog, InMemoryResultStore,
    IndexScoreMap, RiskConditionalRecord, RiskFactorRecord, ScenarioRunner, ScoreCard,
    ScoreCardAttribute,
};

/// Score = 2 x index, as in the platform's reference configuration.
fn doubling_card(id: u64, kind: AssumptionKind) -> ScoreCard {
    ScoreCard {
        id: ScoreCardId::new(id),
        adjusted_assumption: kind,
        index_score_map: IndexScoreMap::new(1, (0..=30).map(|i| (i, 2.0 * i as f64))),
        attributes: vec![
            ScoreCardAttribute {
                attribute: "FICO".to_string(),
                weight: 0.4,
                original_index: 5,
                index_change: 2,
            },
            ScoreCardAttribute {
                attribute: "current_LTV".to_string(),
                weight: 0.3,
                original_index: 4,
                index_change: 1,
            },
        ],
    }
}

fn fico_below(factor_id: u64, cutoff: &str, assumption: &str) -> RiskFactorRecord {
    RiskFactorRecord {
        id: RiskFactorId::new(factor_id),
        attribute: "FICO".to_string(),
        changing_assumption: assumption.to_string(),
        percentage_change: -5.0,
        conditionals: vec![RiskConditionalRecord {
            conditional: "<".to_string(),
            value: cutoff.to_string(),
        }],
    }
}

fn seed_catalog(risk_profile_ids: Vec<RiskProfileId>) -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    catalog.add_assumption_profile(
        AssumptionProfileBuilder::new(
            AssumptionProfileId::new(1),
            "3 Month Timber Shortage",
            3.0,
            8.5,
            3.7,
            5.2,
            128.0,
        )
        .constant_default_rate(8.0)
        .constant_prepayment_rate(21.4444)
        .recovery(59.25)
        .build(),
    );
    catalog.add_score_card_profile(ScoreCardProfile {
        id: ScoreCardProfileId::new(1),
        cdr_card_id: ScoreCardId::new(11),
        cpr_card_id: ScoreCardId::new(12),
        recovery_card_id: ScoreCardId::new(13),
        lag_card_id: ScoreCardId::new(14),
    });
    catalog.add_score_card(doubling_card(11, AssumptionKind::Cdr));
    catalog.add_score_card(doubling_card(12, AssumptionKind::Cpr));
    catalog.add_score_card(doubling_card(13, AssumptionKind::Recovery));
    catalog.add_score_card(doubling_card(14, AssumptionKind::Lag));
    catalog.add_scenario(Scenario::new(
        ScenarioId::new(1),
        "Stress",
        AssumptionProfileId::new(1),
        ScoreCardProfileId::new(1),
        risk_profile_ids,
    ));
    catalog
}

fn run_one(catalog: &InMemoryCatalog, loan: &LoanRecord) -> loanrisk_engine::LoanAdjustedAssumption {
    let resolved = resolve(catalog, ScenarioId::new(1)).unwrap();
    let store = InMemoryResultStore::new();
    let summary = run_to_completion(
        &ScenarioRunner::default(),
        &resolved,
        std::slice::from_ref(loan),
        &store,
    );
    assert_eq!(summary.written, 1);
    store.get(loan.snapshot.id, ScenarioId::new(1)).unwrap()
}

#[test]
fn reference_scenario_adjusts_cdr_by_score_delta() {
    // FICO 620 matches "< 650". Both card attributes are weighted, so the
    // baseline total is 0.4*10 + 0.3*8 = 6.4 and the updated total is
    // 0.4*14 + 0.3*8 = 8.0, a 1.25x multiplier on every matched card.
    let mut catalog = seed_catalog(vec![RiskProfileId::new(2)]);
    catalog.add_risk_profile(risk_profile_record(
        RiskProfileId::new(2),
        "FICO below 650",
        vec![fico_below(1, "650", "CDR")],
    ));

    let record = run_one(&catalog, &sample_record_with_fico(620));
    assert_relative_eq!(record.adjusted_cdr, 8.0 * 1.25, epsilon = 1e-9);
    // Other assumptions untouched: no factors target them.
    assert_relative_eq!(record.adjusted_cpr, 21.4444, epsilon = 1e-9);
    assert_relative_eq!(record.adjusted_recovery, 59.25, epsilon = 1e-9);
    assert_relative_eq!(record.adjusted_lag, 128.0, epsilon = 1e-9);
}

#[test]
fn scenario_without_risk_profiles_is_baseline_pass_through() {
    let catalog = seed_catalog(vec![]);
    let record = run_one(&catalog, &sample_record_with_fico(620));

    assert_relative_eq!(record.adjusted_cdr, 8.0);
    assert_relative_eq!(record.adjusted_cpr, 21.4444);
    assert_relative_eq!(record.adjusted_recovery, 59.25);
    assert_relative_eq!(record.adjusted_lag, 128.0);
}

#[test]
fn zero_total_score_card_is_baseline_pass_through() {
    // A card whose every attribute has zero weight has total_score == 0;
    // the formula degrades to pass-through regardless of matched factors.
    let mut catalog = seed_catalog(vec![RiskProfileId::new(2)]);
    let mut zero_card = doubling_card(11, AssumptionKind::Cdr);
    for attr in &mut zero_card.attributes {
        attr.weight = 0.0;
    }
    catalog.add_score_card(zero_card);
    catalog.add_risk_profile(risk_profile_record(
        RiskProfileId::new(2),
        "FICO below 650",
        vec![fico_below(1, "650", "CDR")],
    ));

    let record = run_one(&catalog, &sample_record_with_fico(620));
    assert_relative_eq!(record.adjusted_cdr, 8.0);
}

#[test]
fn conjunctive_conditionals_must_all_hold() {
    let banded_factor = RiskFactorRecord {
        id: RiskFactorId::new(1),
        attribute: "FICO".to_string(),
        changing_assumption: "CDR".to_string(),
        percentage_change: -5.0,
        conditionals: vec![
            RiskConditionalRecord {
                conditional: ">".to_string(),
                value: "450".to_string(),
            },
            RiskConditionalRecord {
                conditional: "<".to_string(),
                value: "550".to_string(),
            },
        ],
    };
    let mut catalog = seed_catalog(vec![RiskProfileId::new(2)]);
    catalog.add_risk_profile(risk_profile_record(
        RiskProfileId::new(2),
        "FICO band",
        vec![banded_factor],
    ));

    let inside = run_one(&catalog, &sample_record_with_fico(500));
    assert!(inside.adjusted_cdr > 8.0);

    let below = run_one(&catalog, &sample_record_with_fico(400));
    assert_relative_eq!(below.adjusted_cdr, 8.0);

    let above = run_one(&catalog, &sample_record_with_fico(620));
    assert_relative_eq!(above.adjusted_cdr, 8.0);
}

#[test]
fn risk_profile_order_does_not_change_results() {
    // Two profiles whose factors touch the same scorecard attribute;
    // attaching them in either order yields the same adjusted values.
    let build = |order: Vec<RiskProfileId>| {
        let mut catalog = seed_catalog(order);
        catalog.add_risk_profile(risk_profile_record(
            RiskProfileId::new(2),
            "FICO below 650",
            vec![fico_below(1, "650", "CDR")],
        ));
        catalog.add_risk_profile(risk_profile_record(
            RiskProfileId::new(3),
            "FICO below 700",
            vec![fico_below(2, "700", "CDR")],
        ));
        run_one(&catalog, &sample_record_with_fico(620))
    };

    let forward = build(vec![RiskProfileId::new(2), RiskProfileId::new(3)]);
    let reversed = build(vec![RiskProfileId::new(3), RiskProfileId::new(2)]);
    assert_relative_eq!(forward.adjusted_cdr, reversed.adjusted_cdr);
}

#[test]
fn rerun_upserts_rather_than_duplicates() {
    let mut catalog = seed_catalog(vec![RiskProfileId::new(2)]);
    catalog.add_risk_profile(risk_profile_record(
        RiskProfileId::new(2),
        "FICO below 650",
        vec![fico_below(1, "650", "CDR")],
    ));
    let resolved = resolve(&catalog, ScenarioId::new(1)).unwrap();
    let loan = sample_record_with_fico(620);
    let store = InMemoryResultStore::new();
    let runner = ScenarioRunner::default();

    run_to_completion(&runner, &resolved, std::slice::from_ref(&loan), &store);
    run_to_completion(&runner, &resolved, std::slice::from_ref(&loan), &store);

    assert_eq!(store.len(), 1);
    let record = store.get(SnapshotId::new(10), ScenarioId::new(1)).unwrap();
    assert_relative_eq!(record.adjusted_cdr, 8.0 * 1.25, epsilon = 1e-9);
}

#[test]
fn factor_on_unknown_attribute_reports_diagnostic_and_continues() {
    let mut catalog = seed_catalog(vec![RiskProfileId::new(2)]);
    catalog.add_risk_profile(risk_profile_record(
        RiskProfileId::new(2),
        "Unknown field",
        vec![RiskFactorRecord {
            id: RiskFactorId::new(1),
            attribute: "coupon_frequency".to_string(),
            changing_assumption: "CDR".to_string(),
            percentage_change: 1.0,
            conditionals: vec![RiskConditionalRecord {
                conditional: "=".to_string(),
                value: "12".to_string(),
            }],
        }],
    ));

    let resolved = resolve(&catalog, ScenarioId::new(1)).unwrap();
    let loan = sample_record_with_fico(620);
    let store = InMemoryResultStore::new();
    let summary = run_to_completion(
        &ScenarioRunner::default(),
        &resolved,
        std::slice::from_ref(&loan),
        &store,
    );

    // Run completed with the factor treated as a non-match.
    assert_eq!(summary.written, 1);
    assert_eq!(summary.diagnostics.len(), 1);
    let record = store.get(SnapshotId::new(10), ScenarioId::new(1)).unwrap();
    assert_relative_eq!(record.adjusted_cdr, 8.0);
}
