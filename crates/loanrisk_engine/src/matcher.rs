//! Conditional matching of risk factors against loan attribute bags.
//!
//! Matching is side-effect-free and repeatable: it reads only the compiled
//! factors and the loan view. Data mismatches (unknown or null attributes)
//! make the affected factor not applicable and are recorded as diagnostics,
//! never raised as errors.

use crate::factor::{RiskFactor, RiskProfile};
use loanrisk_core::loan::LoanView;
use loanrisk_core::types::{AssumptionKind, RiskFactorId, SnapshotId};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Why a conditional could not be evaluated against a loan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The attribute name is not part of the loan schema.
    UnknownAttribute,
    /// The attribute exists but is unset on this loan.
    NullAttribute,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownAttribute => f.write_str("unknown attribute"),
            SkipReason::NullAttribute => f.write_str("null attribute"),
        }
    }
}

/// Diagnostic for a factor that could not be evaluated cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchDiagnostic {
    /// The snapshot being evaluated.
    pub snapshot_id: SnapshotId,
    /// The factor whose conditional hit the problem.
    pub factor_id: RiskFactorId,
    /// The attribute name the conditional referenced.
    pub attribute: String,
    /// What went wrong.
    pub reason: SkipReason,
}

/// Matched factors for one loan, partitioned by target assumption.
#[derive(Debug, Default)]
pub struct MatchOutcome<'a> {
    /// Applicable factors per assumption kind, indexed by
    /// [`AssumptionKind::index`].
    by_kind: [Vec<&'a RiskFactor>; 4],
    /// Data-mismatch diagnostics collected during matching.
    pub diagnostics: Vec<MatchDiagnostic>,
}

impl<'a> MatchOutcome<'a> {
    /// Applicable factors targeting one assumption kind.
    #[inline]
    pub fn matched(&self, kind: AssumptionKind) -> &[&'a RiskFactor] {
        &self.by_kind[kind.index()]
    }

    /// Total number of applicable factors across all kinds.
    pub fn matched_count(&self) -> usize {
        self.by_kind.iter().map(Vec::len).sum()
    }
}

/// Evaluates every factor of every risk profile against one loan.
///
/// A factor applies iff all of its conditionals hold against the loan's
/// current attribute values. The outcome partitions applicable factors by
/// `changing_assumption` so the scorecard engine can consume them per card.
pub fn match_factors<'a>(view: &LoanView<'_>, profiles: &'a [RiskProfile]) -> MatchOutcome<'a> {
    let mut outcome = MatchOutcome::default();

    for profile in profiles {
        for factor in &profile.factors {
            let mut applicable = true;
            for conditional in &factor.conditionals {
                match view.attribute(&conditional.attribute) {
                    Some(value) => {
                        if !conditional.matches(&value) {
                            applicable = false;
                            break;
                        }
                    }
                    None => {
                        let reason = if LoanView::is_known_attribute(&conditional.attribute) {
                            SkipReason::NullAttribute
                        } else {
                            SkipReason::UnknownAttribute
                        };
                        debug!(
                            snapshot = %view.snapshot_id(),
                            factor = %factor.id,
                            attribute = %conditional.attribute,
                            %reason,
                            "conditional not evaluable, factor treated as non-match"
                        );
                        outcome.diagnostics.push(MatchDiagnostic {
                            snapshot_id: view.snapshot_id(),
                            factor_id: factor.id,
                            attribute: conditional.attribute.clone(),
                            reason,
                        });
                        applicable = false;
                        break;
                    }
                }
            }
            if applicable && !factor.conditionals.is_empty() {
                debug!(
                    snapshot = %view.snapshot_id(),
                    factor = %factor.id,
                    kind = %factor.changing_assumption,
                    percentage_change = factor.percentage_change,
                    "risk factor matched"
                );
                outcome.by_kind[factor.changing_assumption.index()].push(factor);
            }
        }
    }

    outcome
}
