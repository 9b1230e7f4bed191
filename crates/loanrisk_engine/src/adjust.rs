//! Adjustment calculation: baseline assumptions × scorecard deltas.
//!
//! For each of the four assumption kinds the adjusted value is
//!
//! ```text
//! adjusted = baseline × (1 + (updated_total − total) / total)
//! ```
//!
//! with baseline pass-through when the card's total score is zero (no
//! multiplicative adjustment is defined there, and the fallback avoids the
//! division). Results outside the assumption's domain are clamped and
//! reported as warnings, never as failures.

use crate::scorecard::ScoreOutcome;
use chrono::{DateTime, Utc};
use loanrisk_core::assumptions::AssumptionProfile;
use loanrisk_core::types::{AssumptionKind, ScenarioId, SnapshotId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Adjusted assumptions for one (loan snapshot, scenario) pair.
///
/// Unique per key; the result store upserts rather than appends. CDR, CPR,
/// and recovery are percentages in `[0, 100]`; lag is months, non-negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoanAdjustedAssumption {
    /// The evaluated snapshot.
    pub loan_snapshot_id: SnapshotId,
    /// The scenario evaluated under.
    pub scenario_id: ScenarioId,
    /// When this record was produced.
    pub last_updated: DateTime<Utc>,
    /// Adjusted constant default rate, percent.
    pub adjusted_cdr: f64,
    /// Adjusted constant prepayment rate, percent.
    pub adjusted_cpr: f64,
    /// Adjusted recovery, percent.
    pub adjusted_recovery: f64,
    /// Adjusted recovery lag, months.
    pub adjusted_lag: f64,
}

/// An adjusted value fell outside its domain and was clamped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AdjustmentWarning {
    /// Which assumption was clamped.
    pub kind: AssumptionKind,
    /// The raw formula output.
    pub raw_value: f64,
    /// The value actually recorded.
    pub clamped_value: f64,
}

/// Applies the scorecard delta to one baseline value.
///
/// Zero baseline total degrades to pass-through.
pub fn adjusted_value(baseline: f64, outcome: &ScoreOutcome) -> f64 {
    if outcome.total_score == 0.0 {
        baseline
    } else {
        baseline * (1.0 + (outcome.updated_total_score - outcome.total_score) / outcome.total_score)
    }
}

/// Domain-valid range for one assumption kind.
fn domain(kind: AssumptionKind) -> (f64, f64) {
    match kind {
        AssumptionKind::Cdr | AssumptionKind::Cpr | AssumptionKind::Recovery => (0.0, 100.0),
        AssumptionKind::Lag => (0.0, f64::INFINITY),
    }
}

/// Combines baselines and the four scorecard outcomes into the output
/// record, clamping out-of-domain values.
///
/// `outcomes` is indexed by [`AssumptionKind::index`]. Returns the record
/// with a fresh `last_updated` stamp plus any clamp warnings.
pub fn assemble(
    loan_snapshot_id: SnapshotId,
    scenario_id: ScenarioId,
    profile: &AssumptionProfile,
    outcomes: &[ScoreOutcome; 4],
) -> (LoanAdjustedAssumption, Vec<AdjustmentWarning>) {
    let mut warnings = Vec::new();
    let mut adjusted = [0.0f64; 4];

    for kind in AssumptionKind::ALL {
        let outcome = &outcomes[kind.index()];
        debug_assert_eq!(outcome.kind, kind);
        let raw = adjusted_value(profile.baseline(kind), outcome);
        let (lo, hi) = domain(kind);
        let clamped = raw.clamp(lo, hi);
        if clamped != raw {
            warn!(
                snapshot = %loan_snapshot_id,
                scenario = %scenario_id,
                %kind,
                raw,
                clamped,
                "adjusted value outside domain, clamped"
            );
            warnings.push(AdjustmentWarning {
                kind,
                raw_value: raw,
                clamped_value: clamped,
            });
        }
        adjusted[kind.index()] = clamped;
    }

    let record = LoanAdjustedAssumption {
        loan_snapshot_id,
        scenario_id,
        last_updated: Utc::now(),
        adjusted_cdr: adjusted[AssumptionKind::Cdr.index()],
        adjusted_cpr: adjusted[AssumptionKind::Cpr.index()],
        adjusted_recovery: adjusted[AssumptionKind::Recovery.index()],
        adjusted_lag: adjusted[AssumptionKind::Lag.index()],
    };
    (record, warnings)
}
